use {
    solana_program::pubkey::Pubkey,
    solana_sdk::commitment_config::CommitmentConfig,
};

pub const DEFAULT_RPC_URL: &str = "https://api.devnet.solana.com";

/// Values the builders and the assembler's callers need, passed in rather
/// than read from globals.
#[derive(Clone, Debug, PartialEq)]
pub struct TokenizerConfig {
    /// Id the tokenizer program is deployed under. Every derivation depends on it.
    pub program_id: Pubkey,
    pub rpc_url: String,
    pub commitment: CommitmentConfig,
}

impl TokenizerConfig {
    pub fn new(program_id: Pubkey, rpc_url: impl Into<String>) -> Self {
        Self {
            program_id,
            rpc_url: rpc_url.into(),
            commitment: CommitmentConfig::confirmed(),
        }
    }

    pub fn with_program_id(mut self, program_id: Pubkey) -> Self {
        self.program_id = program_id;
        self
    }

    pub fn with_commitment(mut self, commitment: CommitmentConfig) -> Self {
        self.commitment = commitment;
        self
    }
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self::new(crate::id(), DEFAULT_RPC_URL)
    }
}
