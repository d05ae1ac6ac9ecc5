use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid cluster: {0}")]
    InvalidCluster(String),

    #[error("Invalid {0} address: {1}")]
    InvalidPubkey(&'static str, String),

    #[error("Could not read {0} keypair: {1}")]
    InvalidKeypair(&'static str, String),

    #[error("Invalid ruleset name '{0}'")]
    InvalidRulesetName(String),
}
