use std::{
    fmt::{self, Display},
    str::FromStr,
};

use anchor_client::solana_sdk::signature::Keypair;
use serde::{Deserialize, Serialize};

use crate::config::errors::ConfigError;

/// Signers and endpoint shared by every command.
pub struct ToolConfig {
    pub keypair: Keypair,
    /// Distinct fee payer, when one is configured.
    pub payer: Option<Keypair>,
    pub rpc_url: String,
}

impl ToolConfig {
    /// Keypair paying fees: the configured payer or the wallet.
    pub fn fee_payer(&self) -> &Keypair {
        self.payer.as_ref().unwrap_or(&self.keypair)
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct SolanaConfig {
    pub json_rpc_url: String,
    pub keypair_path: String,
    pub commitment: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cluster {
    Mainnet,
    Devnet,
    Testnet,
    Localnet,
}

impl Cluster {
    /// Public endpoint of the cluster. `mainnet_primary` replaces the default
    /// mainnet endpoint.
    pub fn rpc_url(&self, mainnet_primary: Option<&str>) -> String {
        match self {
            Cluster::Mainnet => mainnet_primary
                .unwrap_or("https://solana-api.projectserum.com")
                .to_string(),
            Cluster::Devnet => "https://api.devnet.solana.com/".to_string(),
            Cluster::Testnet => "https://api.testnet.solana.com/".to_string(),
            Cluster::Localnet => "http://localhost:8899/".to_string(),
        }
    }
}

impl FromStr for Cluster {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mainnet-beta" | "mainnet" => Ok(Cluster::Mainnet),
            "devnet" => Ok(Cluster::Devnet),
            "testnet" => Ok(Cluster::Testnet),
            "localnet" => Ok(Cluster::Localnet),
            _ => Err(ConfigError::InvalidCluster(s.to_string())),
        }
    }
}

impl Display for Cluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Cluster::Mainnet => "mainnet-beta",
            Cluster::Devnet => "devnet",
            Cluster::Testnet => "testnet",
            Cluster::Localnet => "localnet",
        };
        write!(f, "{}", name)
    }
}
