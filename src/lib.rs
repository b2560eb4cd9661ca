pub mod codec;
pub mod config;
pub mod error;
pub mod instruction;
pub mod pipeline;
pub mod transaction;

use {
    crate::{
        codec::{encode_le, IntWidth, U64_SIZE},
        config::TokenizerConfig,
        error::{TokenizerClientError, TokenizerClientResult},
    },
    chrono::{DateTime, Duration, NaiveDateTime, Utc},
    num_bigint::BigUint,
    solana_program::{declare_id, pubkey::Pubkey},
    spl_associated_token_account::get_associated_token_address_with_program_id,
};

declare_id!("LSDjBzV1CdC4zeXETyLnoUddeBeQAvXXRo49j8rSguH");

/// Runs the bump search for `seeds`. Running out of bumps means the seeds or
/// the program id are wrong, so it is reported rather than retried.
pub fn find_program_address(
    seeds: &[&[u8]],
    program_id: &Pubkey,
) -> TokenizerClientResult<Pubkey> {
    Pubkey::try_find_program_address(seeds, program_id)
        .map(|(address, _)| address)
        .ok_or(TokenizerClientError::DerivationExhausted)
}

// Milliseconds since the epoch, 8 bytes little-endian
pub fn maturity_date_seed(
    maturity_date: &DateTime<Utc>,
) -> TokenizerClientResult<[u8; U64_SIZE]> {
    let millis = u64::try_from(maturity_date.timestamp_millis())
        .map_err(|_| TokenizerClientError::InvalidMaturityDate)?;
    let bytes = encode_le(&BigUint::from(millis), IntWidth::U64)?;
    <[u8; U64_SIZE]>::try_from(bytes.as_slice())
        .map_err(|_| TokenizerClientError::InvalidBufferLength)
}

// Generate the tokenizer address
pub fn get_tokenizer_address(
    program_id: &Pubkey,
    deposit_mint: &Pubkey,
    maturity_date: &DateTime<Utc>,
) -> TokenizerClientResult<Pubkey> {
    let maturity_seed = maturity_date_seed(maturity_date)?;
    find_program_address(&[deposit_mint.as_ref(), &maturity_seed], program_id)
}

// Generate the yield mint address
pub fn get_yield_mint_address(
    program_id: &Pubkey,
    tokenizer_address: &Pubkey,
    deposit_mint: &Pubkey,
    maturity_date: &DateTime<Utc>,
) -> TokenizerClientResult<Pubkey> {
    let maturity_seed = maturity_date_seed(maturity_date)?;
    find_program_address(
        &[tokenizer_address.as_ref(), deposit_mint.as_ref(), &maturity_seed],
        program_id,
    )
}

/// Generate the principal mint address.
///
/// The seeds are the same as [`get_yield_mint_address`], so both mints resolve
/// to one address. This mirrors what the deployed client sends today; a
/// distinguishing seed has to be confirmed against the program before it is
/// changed here.
pub fn get_principal_mint_address(
    program_id: &Pubkey,
    tokenizer_address: &Pubkey,
    deposit_mint: &Pubkey,
    maturity_date: &DateTime<Utc>,
) -> TokenizerClientResult<Pubkey> {
    let maturity_seed = maturity_date_seed(maturity_date)?;
    find_program_address(
        &[tokenizer_address.as_ref(), deposit_mint.as_ref(), &maturity_seed],
        program_id,
    )
}

/// Program owned accounts of one (deposit mint, maturity) tokenizer.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TokenizerAddresses {
    pub tokenizer: Pubkey,
    pub deposit_mint: Pubkey,
    pub principal_mint: Pubkey,
    pub yield_mint: Pubkey,
    /// Tokenizer's associated token account for the deposit mint
    pub deposit_vault: Pubkey,
}

impl TokenizerAddresses {
    pub fn derive(
        config: &TokenizerConfig,
        deposit_mint: &Pubkey,
        maturity_date: &DateTime<Utc>,
    ) -> TokenizerClientResult<Self> {
        let program_id = &config.program_id;
        let tokenizer = get_tokenizer_address(program_id, deposit_mint, maturity_date)?;
        let principal_mint =
            get_principal_mint_address(program_id, &tokenizer, deposit_mint, maturity_date)?;
        let yield_mint =
            get_yield_mint_address(program_id, &tokenizer, deposit_mint, maturity_date)?;
        let deposit_vault = get_associated_token_address_with_program_id(
            &tokenizer,
            deposit_mint,
            &spl_token::id(),
        );

        Ok(Self {
            tokenizer,
            deposit_mint: *deposit_mint,
            principal_mint,
            yield_mint,
            deposit_vault,
        })
    }
}

/// A wallet's associated token accounts for the three tokenizer mints.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct UserTokenAccounts {
    pub owner: Pubkey,
    pub deposit: Pubkey,
    pub principal: Pubkey,
    pub yield_token: Pubkey,
}

impl UserTokenAccounts {
    pub fn derive(owner: &Pubkey, addresses: &TokenizerAddresses) -> Self {
        let ata = |mint: &Pubkey| {
            get_associated_token_address_with_program_id(owner, mint, &spl_token::id())
        };
        Self {
            owner: *owner,
            deposit: ata(&addresses.deposit_mint),
            principal: ata(&addresses.principal_mint),
            yield_token: ata(&addresses.yield_mint),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Expiry {
    TwelveMonths,
    EighteenMonths,
    TwentyFourMonths,
}

impl Expiry {
    pub fn to_seconds(&self) -> i64 {
        match self {
            Expiry::TwelveMonths => 31536000,
            Expiry::EighteenMonths => 47304000,
            Expiry::TwentyFourMonths => 63072000,
        }
    }

    pub fn from_months(months: i64) -> TokenizerClientResult<Self> {
        match months {
            12 => Ok(Expiry::TwelveMonths),
            18 => Ok(Expiry::EighteenMonths),
            24 => Ok(Expiry::TwentyFourMonths),
            _ => Err(TokenizerClientError::InvalidExpiry(months)),
        }
    }

    // Maturity falls on the start of the UTC day the expiry lands on
    pub fn maturity_date(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let expiry_duration = Duration::try_seconds(self.to_seconds())?;
        let expiry_date = now.checked_add_signed(expiry_duration)?;
        let expiry_date: NaiveDateTime = expiry_date.date_naive().and_hms_opt(0, 0, 0)?;
        Some(expiry_date.and_utc())
    }
}

#[cfg(test)]
mod tests {
    use {super::*, chrono::TimeZone};

    fn new_year_2025() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn maturity_seed_is_le_millis() {
        let seed = maturity_date_seed(&new_year_2025()).unwrap();
        assert_eq!(seed, 1_735_689_600_000u64.to_le_bytes());
    }

    #[test]
    fn maturity_seed_rejects_pre_epoch_dates() {
        let date = Utc.with_ymd_and_hms(1969, 12, 31, 23, 59, 59).unwrap();
        assert_eq!(
            maturity_date_seed(&date),
            Err(TokenizerClientError::InvalidMaturityDate)
        );
    }

    #[test]
    fn tokenizer_address_uses_mint_and_maturity_seeds() {
        let mint = Pubkey::new_unique();
        let date = new_year_2025();
        let (expected, _) = Pubkey::find_program_address(
            &[mint.as_ref(), &1_735_689_600_000u64.to_le_bytes()],
            &crate::id(),
        );
        assert_eq!(get_tokenizer_address(&crate::id(), &mint, &date).unwrap(), expected);
    }

    #[test]
    fn oversized_seed_exhausts_the_bump_search() {
        assert_eq!(
            find_program_address(&[&[7u8; 33]], &crate::id()),
            Err(TokenizerClientError::DerivationExhausted)
        );
    }

    #[test]
    fn derivation_is_deterministic() {
        let mint = Pubkey::new_unique();
        let date = new_year_2025();
        let first = get_tokenizer_address(&crate::id(), &mint, &date).unwrap();
        for _ in 0..8 {
            assert_eq!(get_tokenizer_address(&crate::id(), &mint, &date).unwrap(), first);
        }
    }

    #[test]
    fn derivation_is_seed_sensitive() {
        let mint = Pubkey::new_unique();
        let date = new_year_2025();
        let base = get_tokenizer_address(&crate::id(), &mint, &date).unwrap();

        let one_ms_later = date + Duration::milliseconds(1);
        assert_ne!(
            get_tokenizer_address(&crate::id(), &mint, &one_ms_later).unwrap(),
            base
        );
        assert_ne!(
            get_tokenizer_address(&crate::id(), &Pubkey::new_unique(), &date).unwrap(),
            base
        );
        assert_ne!(
            get_tokenizer_address(&Pubkey::new_unique(), &mint, &date).unwrap(),
            base
        );
    }

    #[test]
    fn principal_and_yield_mints_share_seeds() {
        let mint = Pubkey::new_unique();
        let date = new_year_2025();
        let tokenizer = get_tokenizer_address(&crate::id(), &mint, &date).unwrap();
        let yield_mint = get_yield_mint_address(&crate::id(), &tokenizer, &mint, &date).unwrap();
        let principal_mint =
            get_principal_mint_address(&crate::id(), &tokenizer, &mint, &date).unwrap();
        assert_eq!(yield_mint, principal_mint);
        assert_ne!(yield_mint, tokenizer);
    }

    #[test]
    fn derives_vault_and_user_accounts() {
        let config = TokenizerConfig::default();
        let mint = Pubkey::new_unique();
        let owner = Pubkey::new_unique();
        let addresses = TokenizerAddresses::derive(&config, &mint, &new_year_2025()).unwrap();

        assert_eq!(
            addresses.deposit_vault,
            spl_associated_token_account::get_associated_token_address(&addresses.tokenizer, &mint)
        );

        let accounts = UserTokenAccounts::derive(&owner, &addresses);
        assert_eq!(
            accounts.deposit,
            spl_associated_token_account::get_associated_token_address(&owner, &mint)
        );
        assert_eq!(
            accounts.yield_token,
            spl_associated_token_account::get_associated_token_address(
                &owner,
                &addresses.yield_mint
            )
        );
    }

    #[test]
    fn expiry_from_months() {
        assert_eq!(Expiry::from_months(18), Ok(Expiry::EighteenMonths));
        assert_eq!(
            Expiry::from_months(6),
            Err(TokenizerClientError::InvalidExpiry(6))
        );
    }

    #[test]
    fn expiry_lands_on_start_of_day() {
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 17, 42, 9).unwrap();
        let maturity = Expiry::TwelveMonths.maturity_date(now).unwrap();
        assert_eq!(maturity, Utc.with_ymd_and_hms(2025, 3, 15, 0, 0, 0).unwrap());
        assert_eq!(maturity_date_seed(&maturity).unwrap().len(), 8);
    }
}
