use anchor_client::solana_sdk::{
    compute_budget::ComputeBudgetInstruction,
    hash::Hash,
    instruction::Instruction,
    pubkey::Pubkey,
    signature::{Keypair, Signer},
    transaction::Transaction,
};
use tracing::debug;

use crate::mint::MintError;

/// Keypairs signing a mint transaction.
pub struct MintSigners<'a> {
    pub wallet: &'a Keypair,
    /// Pays fees and rent; the wallet pays when absent.
    pub payer: Option<&'a Keypair>,
    pub mint: &'a Keypair,
}

impl<'a> MintSigners<'a> {
    pub fn fee_payer(&self) -> Pubkey {
        self.payer.unwrap_or(self.wallet).pubkey()
    }

    /// Signing order: wallet, a payer distinct from the wallet, then the mint.
    fn ordered(&self) -> Vec<&'a Keypair> {
        let mut keypairs = vec![self.wallet];

        if let Some(payer) = self.payer {
            if payer.pubkey() != self.wallet.pubkey() {
                keypairs.push(payer);
            }
        }

        keypairs.push(self.mint);
        keypairs
    }
}

/// Prepends the compute budget request to the mint instructions.
pub fn assemble_instructions(compute_units: u32, mint_instructions: Vec<Instruction>) -> Vec<Instruction> {
    let mut instructions = Vec::with_capacity(1 + mint_instructions.len());
    instructions.push(ComputeBudgetInstruction::set_compute_unit_limit(compute_units));
    instructions.extend(mint_instructions);
    instructions
}

/// Builds the transaction with the fee payer of `signers` and signs it with
/// every keypair against `blockhash`.
pub fn sign_transaction(
    instructions: &[Instruction],
    signers: &MintSigners,
    blockhash: Hash,
) -> Result<Transaction, MintError> {
    sign_with(instructions, &signers.fee_payer(), &signers.ordered(), blockhash)
}

/// Builds a transaction paid by `fee_payer` and partially signs it with each
/// keypair in turn.
pub fn sign_with(
    instructions: &[Instruction],
    fee_payer: &Pubkey,
    keypairs: &[&Keypair],
    blockhash: Hash,
) -> Result<Transaction, MintError> {
    let mut transaction = Transaction::new_with_payer(instructions, Some(fee_payer));

    for keypair in keypairs {
        transaction
            .try_partial_sign(&[*keypair], blockhash)
            .map_err(|_| MintError::KeypairMismatch(keypair.pubkey()))?;
        debug!("Signed with {}", keypair.pubkey());
    }

    Ok(transaction)
}
