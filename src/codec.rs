//! Fixed-width little-endian integer codec used for instruction payloads and
//! address seeds.
//!
//! Values that do not fit in the requested width are rejected with
//! [`TokenizerClientError::AmountOverflow`]; nothing is ever truncated.

use {
    crate::error::{TokenizerClientError, TokenizerClientResult},
    num_bigint::BigUint,
    num_traits::{ToPrimitive, Zero},
    std::{fmt, str::FromStr},
};

pub const U32_SIZE: usize = 4;
pub const U64_SIZE: usize = 8;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum IntWidth {
    U32,
    U64,
}

impl IntWidth {
    pub fn byte_len(self) -> usize {
        match self {
            IntWidth::U32 => U32_SIZE,
            IntWidth::U64 => U64_SIZE,
        }
    }

    pub fn from_byte_len(len: usize) -> TokenizerClientResult<Self> {
        match len {
            U32_SIZE => Ok(IntWidth::U32),
            U64_SIZE => Ok(IntWidth::U64),
            _ => Err(TokenizerClientError::UnsupportedWidth),
        }
    }
}

/// Encodes `value` as exactly `width` little-endian bytes, zero-padded on the
/// high end.
pub fn encode_le(value: &BigUint, width: IntWidth) -> TokenizerClientResult<Vec<u8>> {
    let len = width.byte_len();
    let mut bytes = value.to_bytes_le();
    if bytes.len() > len {
        return Err(TokenizerClientError::AmountOverflow);
    }
    bytes.resize(len, 0);
    Ok(bytes)
}

/// Decodes a little-endian buffer whose length must equal `width`.
pub fn decode_le(bytes: &[u8], width: IntWidth) -> TokenizerClientResult<BigUint> {
    if bytes.len() != width.byte_len() {
        return Err(TokenizerClientError::InvalidBufferLength);
    }
    Ok(BigUint::from_bytes_le(bytes))
}

/// A token quantity. Arbitrary precision on input, but only values within the
/// u64 range can be serialized.
#[derive(Clone, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Amount(BigUint);

impl Amount {
    pub fn new(value: BigUint) -> Self {
        Amount(value)
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn as_biguint(&self) -> &BigUint {
        &self.0
    }

    pub fn to_u64(&self) -> Option<u64> {
        self.0.to_u64()
    }

    pub fn to_le_bytes(&self) -> TokenizerClientResult<[u8; U64_SIZE]> {
        let bytes = encode_le(&self.0, IntWidth::U64)?;
        <[u8; U64_SIZE]>::try_from(bytes.as_slice())
            .map_err(|_| TokenizerClientError::InvalidBufferLength)
    }

    pub fn from_le_bytes(bytes: &[u8]) -> TokenizerClientResult<Self> {
        decode_le(bytes, IntWidth::U64).map(Amount)
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Amount(BigUint::from(value))
    }
}

impl From<BigUint> for Amount {
    fn from(value: BigUint) -> Self {
        Amount(value)
    }
}

impl FromStr for Amount {
    type Err = TokenizerClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BigUint::from_str(s.trim())
            .map(Amount)
            .map_err(|_| TokenizerClientError::InvalidAmount)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
