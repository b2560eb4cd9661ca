use thiserror::Error;

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum TokenizerClientError {
    #[error("Invalid Amount")]
    InvalidAmount,
    #[error("Amount Does Not Fit In Target Width")]
    AmountOverflow,
    #[error("Unsupported Integer Width")]
    UnsupportedWidth,
    #[error("Invalid Buffer Length")]
    InvalidBufferLength,
    #[error("Invalid Maturity Date")]
    InvalidMaturityDate,
    #[error("Invalid Expiry: {0} months")]
    InvalidExpiry(i64),
    #[error("Missing Account Address")]
    MissingAccount,
    #[error("Program Address Derivation Exhausted")]
    DerivationExhausted,
    #[error("Recent Blockhash Unavailable: {0}")]
    BlockhashUnavailable(String),
    #[error("Unable To Compile Message: {0}")]
    MessageCompile(String),
    #[error("Signing Rejected")]
    SigningRejected,
    #[error("Empty Instruction List")]
    EmptyInstructionList,
}

pub type TokenizerClientResult<T> = Result<T, TokenizerClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_the_cause() {
        let err = TokenizerClientError::BlockhashUnavailable("connection refused".to_string());
        assert_eq!(
            err.to_string(),
            "Recent Blockhash Unavailable: connection refused"
        );
        assert_eq!(
            TokenizerClientError::InvalidExpiry(6).to_string(),
            "Invalid Expiry: 6 months"
        );
    }
}
