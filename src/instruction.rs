use {
    crate::{
        codec::Amount,
        config::TokenizerConfig,
        error::{TokenizerClientError, TokenizerClientResult},
        get_principal_mint_address, get_tokenizer_address, get_yield_mint_address,
        TokenizerAddresses, UserTokenAccounts,
    },
    chrono::{DateTime, Utc},
    solana_program::{
        instruction::{AccountMeta, Instruction},
        pubkey::Pubkey,
    },
};

/// The user facing actions of the tokenizer program. Every action carries a
/// single argument, the amount, as 8 little-endian bytes with no
/// discriminator; the program tells them apart by account list alone.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TokenizerAction {
    /// Splits a deposit into principal and yield tokens
    ///
    /// Accounts expected:
    ///
    /// 0. `[writable, signer]` Buyer
    /// 1. `[writable]` Tokenizer account
    /// 2. `[writable]` Deposit mint
    /// 3. `[writable]` Principal token mint
    /// 4. `[writable]` Deposit vault
    /// 5. `[writable]` Buyer deposit token account
    /// 6. `[writable]` Buyer principal token account
    /// 7. `[writable]` Buyer yield token account
    TokenizeYield,

    /// Burns principal and yield tokens for the deposit
    ///
    /// Accounts expected:
    ///
    /// 0. `[writable, signer]` Redeemer
    /// 1. `[writable]` Tokenizer account
    /// 2. `[writable]` Deposit mint
    /// 3. `[writable]` Principal token mint
    /// 4. `[writable]` Yield token mint
    /// 5. `[writable]` Deposit vault
    /// 6. `[writable]` Redeemer deposit token account
    /// 7. `[writable]` Redeemer principal token account
    /// 8. `[writable]` Redeemer yield token account
    RedeemYield,

    /// Redeems principal tokens for the deposit at maturity
    ///
    /// Accounts expected:
    ///
    /// 0. `[writable, signer]` Redeemer
    /// 1. `[writable]` Tokenizer account
    /// 2. `[writable]` Deposit mint
    /// 3. `[writable]` Principal token mint
    /// 4. `[writable]` Yield token mint
    /// 5. `[writable]` Deposit vault
    /// 6. `[writable]` Redeemer deposit token account
    /// 7. `[writable]` Redeemer principal token account
    RedeemPrincipal,

    /// Claims accrued yield against yield tokens
    ///
    /// Accounts expected:
    ///
    /// 0. `[writable, signer]` Claimer
    /// 1. `[writable]` Tokenizer account
    /// 2. `[writable]` Deposit mint
    /// 3. `[writable]` Yield token mint
    /// 4. `[writable]` Deposit vault
    /// 5. `[writable]` Claimer deposit token account
    /// 6. `[writable]` Claimer yield token account
    ClaimYield,
}

impl TokenizerAction {
    pub fn account_count(&self) -> usize {
        match self {
            TokenizerAction::TokenizeYield => 8,
            TokenizerAction::RedeemYield => 9,
            TokenizerAction::RedeemPrincipal => 8,
            TokenizerAction::ClaimYield => 7,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TokenizeYieldAccounts {
    pub buyer: Pubkey,
    pub deposit_vault: Pubkey,
    pub buyer_deposit_ata: Pubkey,
    pub buyer_principal_ata: Pubkey,
    pub buyer_yield_ata: Pubkey,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RedeemYieldAccounts {
    pub redeemer: Pubkey,
    pub deposit_vault: Pubkey,
    pub redeemer_deposit_ata: Pubkey,
    pub redeemer_principal_ata: Pubkey,
    pub redeemer_yield_ata: Pubkey,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RedeemPrincipalAccounts {
    pub redeemer: Pubkey,
    pub deposit_vault: Pubkey,
    pub redeemer_deposit_ata: Pubkey,
    pub redeemer_principal_ata: Pubkey,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ClaimYieldAccounts {
    pub claimer: Pubkey,
    pub deposit_vault: Pubkey,
    pub claimer_deposit_ata: Pubkey,
    pub claimer_yield_ata: Pubkey,
}

/// Caller supplied accounts for any one action.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ActionAccounts {
    TokenizeYield(TokenizeYieldAccounts),
    RedeemYield(RedeemYieldAccounts),
    RedeemPrincipal(RedeemPrincipalAccounts),
    ClaimYield(ClaimYieldAccounts),
}

impl ActionAccounts {
    /// Fills the accounts for `action` from a wallet's associated token accounts.
    pub fn for_user(
        action: TokenizerAction,
        addresses: &TokenizerAddresses,
        user: &UserTokenAccounts,
    ) -> Self {
        match action {
            TokenizerAction::TokenizeYield => ActionAccounts::TokenizeYield(TokenizeYieldAccounts {
                buyer: user.owner,
                deposit_vault: addresses.deposit_vault,
                buyer_deposit_ata: user.deposit,
                buyer_principal_ata: user.principal,
                buyer_yield_ata: user.yield_token,
            }),
            TokenizerAction::RedeemYield => ActionAccounts::RedeemYield(RedeemYieldAccounts {
                redeemer: user.owner,
                deposit_vault: addresses.deposit_vault,
                redeemer_deposit_ata: user.deposit,
                redeemer_principal_ata: user.principal,
                redeemer_yield_ata: user.yield_token,
            }),
            TokenizerAction::RedeemPrincipal => {
                ActionAccounts::RedeemPrincipal(RedeemPrincipalAccounts {
                    redeemer: user.owner,
                    deposit_vault: addresses.deposit_vault,
                    redeemer_deposit_ata: user.deposit,
                    redeemer_principal_ata: user.principal,
                })
            }
            TokenizerAction::ClaimYield => ActionAccounts::ClaimYield(ClaimYieldAccounts {
                claimer: user.owner,
                deposit_vault: addresses.deposit_vault,
                claimer_deposit_ata: user.deposit,
                claimer_yield_ata: user.yield_token,
            }),
        }
    }

    pub fn action(&self) -> TokenizerAction {
        match self {
            ActionAccounts::TokenizeYield(_) => TokenizerAction::TokenizeYield,
            ActionAccounts::RedeemYield(_) => TokenizerAction::RedeemYield,
            ActionAccounts::RedeemPrincipal(_) => TokenizerAction::RedeemPrincipal,
            ActionAccounts::ClaimYield(_) => TokenizerAction::ClaimYield,
        }
    }
}

// Derived accounts and payload shared by every action
struct PreparedAction {
    tokenizer: Pubkey,
    principal_mint: Pubkey,
    yield_mint: Pubkey,
    data: Vec<u8>,
}

fn prepare_action(
    config: &TokenizerConfig,
    deposit_mint: &Pubkey,
    maturity_date: &DateTime<Utc>,
    user_accounts: &[&Pubkey],
    amount: &Amount,
) -> TokenizerClientResult<PreparedAction> {
    if amount.is_zero() {
        return Err(TokenizerClientError::InvalidAmount);
    }
    let data = amount.to_le_bytes()?.to_vec();

    // An all-zero key is what an unset address looks like
    if *deposit_mint == Pubkey::default()
        || user_accounts.iter().any(|key| **key == Pubkey::default())
    {
        return Err(TokenizerClientError::MissingAccount);
    }

    let program_id = &config.program_id;
    let tokenizer = get_tokenizer_address(program_id, deposit_mint, maturity_date)?;
    let principal_mint =
        get_principal_mint_address(program_id, &tokenizer, deposit_mint, maturity_date)?;
    let yield_mint = get_yield_mint_address(program_id, &tokenizer, deposit_mint, maturity_date)?;

    Ok(PreparedAction {
        tokenizer,
        principal_mint,
        yield_mint,
        data,
    })
}

/// Creates a `TokenizeYield` instruction
pub fn tokenize_yield(
    config: &TokenizerConfig,
    deposit_mint: &Pubkey,
    maturity_date: &DateTime<Utc>,
    accounts: &TokenizeYieldAccounts,
    amount: &Amount,
) -> TokenizerClientResult<Instruction> {
    let prepared = prepare_action(
        config,
        deposit_mint,
        maturity_date,
        &[
            &accounts.buyer,
            &accounts.deposit_vault,
            &accounts.buyer_deposit_ata,
            &accounts.buyer_principal_ata,
            &accounts.buyer_yield_ata,
        ],
        amount,
    )?;

    Ok(Instruction::new_with_bytes(
        config.program_id,
        &prepared.data,
        vec![
            AccountMeta::new(accounts.buyer, true),
            AccountMeta::new(prepared.tokenizer, false),
            AccountMeta::new(*deposit_mint, false),
            AccountMeta::new(prepared.principal_mint, false),
            AccountMeta::new(accounts.deposit_vault, false),
            AccountMeta::new(accounts.buyer_deposit_ata, false),
            AccountMeta::new(accounts.buyer_principal_ata, false),
            AccountMeta::new(accounts.buyer_yield_ata, false),
        ],
    ))
}

/// Creates a `RedeemYield` instruction
pub fn redeem_yield(
    config: &TokenizerConfig,
    deposit_mint: &Pubkey,
    maturity_date: &DateTime<Utc>,
    accounts: &RedeemYieldAccounts,
    amount: &Amount,
) -> TokenizerClientResult<Instruction> {
    let prepared = prepare_action(
        config,
        deposit_mint,
        maturity_date,
        &[
            &accounts.redeemer,
            &accounts.deposit_vault,
            &accounts.redeemer_deposit_ata,
            &accounts.redeemer_principal_ata,
            &accounts.redeemer_yield_ata,
        ],
        amount,
    )?;

    Ok(Instruction::new_with_bytes(
        config.program_id,
        &prepared.data,
        vec![
            AccountMeta::new(accounts.redeemer, true),
            AccountMeta::new(prepared.tokenizer, false),
            AccountMeta::new(*deposit_mint, false),
            AccountMeta::new(prepared.principal_mint, false),
            AccountMeta::new(prepared.yield_mint, false),
            AccountMeta::new(accounts.deposit_vault, false),
            AccountMeta::new(accounts.redeemer_deposit_ata, false),
            AccountMeta::new(accounts.redeemer_principal_ata, false),
            AccountMeta::new(accounts.redeemer_yield_ata, false),
        ],
    ))
}

/// Creates a `RedeemPrincipal` instruction
pub fn redeem_principal(
    config: &TokenizerConfig,
    deposit_mint: &Pubkey,
    maturity_date: &DateTime<Utc>,
    accounts: &RedeemPrincipalAccounts,
    amount: &Amount,
) -> TokenizerClientResult<Instruction> {
    let prepared = prepare_action(
        config,
        deposit_mint,
        maturity_date,
        &[
            &accounts.redeemer,
            &accounts.deposit_vault,
            &accounts.redeemer_deposit_ata,
            &accounts.redeemer_principal_ata,
        ],
        amount,
    )?;

    Ok(Instruction::new_with_bytes(
        config.program_id,
        &prepared.data,
        vec![
            AccountMeta::new(accounts.redeemer, true),
            AccountMeta::new(prepared.tokenizer, false),
            AccountMeta::new(*deposit_mint, false),
            AccountMeta::new(prepared.principal_mint, false),
            AccountMeta::new(prepared.yield_mint, false),
            AccountMeta::new(accounts.deposit_vault, false),
            AccountMeta::new(accounts.redeemer_deposit_ata, false),
            AccountMeta::new(accounts.redeemer_principal_ata, false),
        ],
    ))
}

/// Creates a `ClaimYield` instruction
pub fn claim_yield(
    config: &TokenizerConfig,
    deposit_mint: &Pubkey,
    maturity_date: &DateTime<Utc>,
    accounts: &ClaimYieldAccounts,
    amount: &Amount,
) -> TokenizerClientResult<Instruction> {
    let prepared = prepare_action(
        config,
        deposit_mint,
        maturity_date,
        &[
            &accounts.claimer,
            &accounts.deposit_vault,
            &accounts.claimer_deposit_ata,
            &accounts.claimer_yield_ata,
        ],
        amount,
    )?;

    Ok(Instruction::new_with_bytes(
        config.program_id,
        &prepared.data,
        vec![
            AccountMeta::new(accounts.claimer, true),
            AccountMeta::new(prepared.tokenizer, false),
            AccountMeta::new(*deposit_mint, false),
            AccountMeta::new(prepared.yield_mint, false),
            AccountMeta::new(accounts.deposit_vault, false),
            AccountMeta::new(accounts.claimer_deposit_ata, false),
            AccountMeta::new(accounts.claimer_yield_ata, false),
        ],
    ))
}

pub fn build_action_instruction(
    config: &TokenizerConfig,
    deposit_mint: &Pubkey,
    maturity_date: &DateTime<Utc>,
    accounts: &ActionAccounts,
    amount: &Amount,
) -> TokenizerClientResult<Instruction> {
    match accounts {
        ActionAccounts::TokenizeYield(accounts) => {
            tokenize_yield(config, deposit_mint, maturity_date, accounts, amount)
        }
        ActionAccounts::RedeemYield(accounts) => {
            redeem_yield(config, deposit_mint, maturity_date, accounts, amount)
        }
        ActionAccounts::RedeemPrincipal(accounts) => {
            redeem_principal(config, deposit_mint, maturity_date, accounts, amount)
        }
        ActionAccounts::ClaimYield(accounts) => {
            claim_yield(config, deposit_mint, maturity_date, accounts, amount)
        }
    }
}
