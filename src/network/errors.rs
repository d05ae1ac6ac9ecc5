use thiserror::Error;

#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("RPC request timed out after {0} seconds")]
    Timeout(u64),

    #[error("RPC request failed: {0}")]
    Transient(String),

    /// The transaction was refused by the network or the program. The message
    /// is the client error as reported, including any custom program error code.
    #[error("Transaction rejected: {0}")]
    Rejected(String),
}
