use thiserror::Error;

#[derive(Debug, Error)]
pub enum SetupError {
    #[error("Keypair {0} is not the authority of candy machine {1}")]
    AuthorityMismatch(String, String),
}
