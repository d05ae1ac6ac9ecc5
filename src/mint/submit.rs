use anchor_client::solana_sdk::{pubkey::Pubkey, signature::Signature, transaction::Transaction};
use tracing::info;

use crate::{mint::MintError, network::ChainWriter};

/// Required signers whose signature slot is still empty.
pub fn missing_signers(transaction: &Transaction) -> Vec<Pubkey> {
    let required = transaction.message.header.num_required_signatures as usize;

    transaction
        .message
        .account_keys
        .iter()
        .take(required)
        .zip(transaction.signatures.iter())
        .filter(|(_, signature)| **signature == Signature::default())
        .map(|(key, _)| *key)
        .collect()
}

/// Sends a fully signed transaction and waits for confirmation.
///
/// Nothing is sent when a required signature is missing or invalid.
pub async fn submit<W>(writer: &W, transaction: &Transaction) -> Result<Signature, MintError>
where
    W: ChainWriter + ?Sized,
{
    let missing = missing_signers(transaction);
    if !missing.is_empty() {
        return Err(MintError::IncompleteSigners(missing));
    }

    transaction
        .verify()
        .map_err(|err| MintError::InvalidSignatures(err.to_string()))?;

    let signature = writer.send_and_confirm(transaction).await?;
    info!("Transaction confirmed: {}", signature);

    Ok(signature)
}

#[cfg(test)]
mod tests {
    use anchor_client::solana_sdk::{
        hash::Hash,
        instruction::{AccountMeta, Instruction},
        signature::{Keypair, Signer},
    };

    use super::*;

    #[test]
    fn unsigned_keys_are_reported() {
        let payer = Keypair::new();
        let mint = Keypair::new();
        let ix = Instruction {
            program_id: Pubkey::new_unique(),
            accounts: vec![AccountMeta::new(mint.pubkey(), true)],
            data: vec![],
        };

        let mut tx = Transaction::new_with_payer(&[ix], Some(&payer.pubkey()));
        tx.try_partial_sign(&[&payer], Hash::new_unique()).unwrap();

        assert_eq!(missing_signers(&tx), vec![mint.pubkey()]);
    }
}
