//! Wraps built instructions into a v0 transaction.
//!
//! The blockhash fetch is the only await point between an action and a
//! signable transaction. Nothing here retries; a stale or failed fetch is
//! returned to the caller, which may run the whole pipeline again.

use {
    crate::error::{TokenizerClientError, TokenizerClientResult},
    solana_client::nonblocking::rpc_client::RpcClient,
    solana_program::{
        hash::Hash,
        instruction::Instruction,
        message::{v0, VersionedMessage},
        msg,
        pubkey::Pubkey,
    },
    solana_sdk::{
        signature::Signature,
        signer::Signer,
        transaction::VersionedTransaction,
    },
    std::future::Future,
};

/// Source of the recent blockhash a transaction must reference.
pub trait BlockhashProvider {
    fn latest_blockhash(&self) -> impl Future<Output = TokenizerClientResult<Hash>>;
}

impl BlockhashProvider for RpcClient {
    async fn latest_blockhash(&self) -> TokenizerClientResult<Hash> {
        self.get_latest_blockhash().await.map_err(|err| {
            msg!("Unable to get latest blockhash: {}", err);
            TokenizerClientError::BlockhashUnavailable(err.to_string())
        })
    }
}

/// Compiles `instructions` into a v0 message paid for by `fee_payer` and signs
/// it with every supplied signer. Required signers that were not supplied keep
/// an empty signature slot so a wallet can sign afterwards.
pub async fn sign_transaction_instructions<P>(
    provider: &P,
    signers: &[&dyn Signer],
    fee_payer: &Pubkey,
    instructions: &[Instruction],
) -> TokenizerClientResult<VersionedTransaction>
where
    P: BlockhashProvider + ?Sized,
{
    if instructions.is_empty() {
        return Err(TokenizerClientError::EmptyInstructionList);
    }

    let recent_blockhash = provider.latest_blockhash().await?;

    let message = v0::Message::try_compile(fee_payer, instructions, &[], recent_blockhash)
        .map_err(|err| {
            msg!("Unable to compile message: {}", err);
            TokenizerClientError::MessageCompile(err.to_string())
        })?;
    let message = VersionedMessage::V0(message);
    let signatures = sign_message(&message, signers)?;

    Ok(VersionedTransaction {
        signatures,
        message,
    })
}

fn sign_message(
    message: &VersionedMessage,
    signers: &[&dyn Signer],
) -> TokenizerClientResult<Vec<Signature>> {
    let required = message.header().num_required_signatures as usize;
    let signer_keys = &message.static_account_keys()[..required];
    let message_data = message.serialize();

    let mut signatures = vec![Signature::default(); required];
    for signer in signers {
        let pubkey = signer
            .try_pubkey()
            .map_err(|_| TokenizerClientError::SigningRejected)?;
        let position = signer_keys
            .iter()
            .position(|key| *key == pubkey)
            .ok_or(TokenizerClientError::SigningRejected)?;
        signatures[position] = signer
            .try_sign_message(&message_data)
            .map_err(|_| TokenizerClientError::SigningRejected)?;
    }

    Ok(signatures)
}
