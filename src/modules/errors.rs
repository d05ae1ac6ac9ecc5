use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModuleError {
    #[error("Failed to encode module instruction: {0}")]
    Encoding(#[from] std::io::Error),

    #[error("Invalid lockup type '{0}', expected 'expiration' or 'duration'")]
    InvalidLockupType(String),
}
