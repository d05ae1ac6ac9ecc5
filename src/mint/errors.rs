use anchor_client::solana_sdk::pubkey::Pubkey;
use thiserror::Error;

use crate::{modules::ModuleError, network::NetworkError};

#[derive(Debug, Error)]
pub enum MintError {
    #[error("Invalid candy machine id '{0}'")]
    MalformedMachineId(String),

    #[error("Candy machine account {0} does not exist")]
    MachineNotFound(Pubkey),

    #[error("Candy machine {0} has no items left to mint")]
    MachineEmpty(Pubkey),

    #[error("Failed to decode candy machine account {0}: {1}")]
    InvalidMachineAccount(Pubkey, String),

    #[error("Mint instruction is missing the required '{0}' account")]
    MissingRole(&'static str),

    #[error("Mint {0} must be referenced exactly once by the mint instruction, found {1}")]
    MintRoleCount(Pubkey, usize),

    #[error(
        "Transaction is missing signatures from: {}",
        .0.iter().map(|k| k.to_string()).collect::<Vec<String>>().join(", ")
    )]
    IncompleteSigners(Vec<Pubkey>),

    #[error("Keypair {0} is not a signer required by the transaction")]
    KeypairMismatch(Pubkey),

    #[error("Transaction signatures failed verification: {0}")]
    InvalidSignatures(String),

    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error(transparent)]
    Module(#[from] ModuleError),
}
