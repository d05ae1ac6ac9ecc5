use std::time::Duration;

use anyhow::Result;
use tracing::info;

use crate::{
    cli::NetworkOpts,
    config::{parse_keypair, parse_solana_config, Cluster, ToolConfig},
    constants::{DEFAULT_CLUSTER, DEFAULT_KEYPATH},
    network::RpcChain,
};

pub fn setup_chain(config: &ToolConfig, timeout: Duration) -> RpcChain {
    RpcChain::new(config.rpc_url.clone(), timeout)
}

/// RPC endpoint: the explicit url, then the named cluster, then the Solana
/// CLI configuration, then devnet.
pub fn resolve_rpc_url(opts: &NetworkOpts) -> Result<String> {
    if let Some(rpc_url) = &opts.rpc_url {
        return Ok(rpc_url.clone());
    }

    let cluster = match (&opts.cluster, parse_solana_config()) {
        (Some(cluster), _) => cluster.parse::<Cluster>()?,
        (None, Some(sol_config)) => return Ok(sol_config.json_rpc_url),
        (None, None) => DEFAULT_CLUSTER.parse::<Cluster>()?,
    };

    Ok(cluster.rpc_url(opts.mainnet_primary.as_deref()))
}

/// Resolves signers and the RPC endpoint. The wallet keypair falls back to
/// the Solana CLI configuration and then to the default keypair path.
pub fn tool_setup(opts: &NetworkOpts) -> Result<ToolConfig> {
    let sol_config_option = parse_solana_config();

    let rpc_url = resolve_rpc_url(opts)?;

    let keypair = match &opts.keypair {
        Some(keypair) => parse_keypair("wallet", keypair)?,
        None => match sol_config_option {
            Some(ref sol_config) => parse_keypair("wallet", &sol_config.keypair_path)?,
            None => parse_keypair("wallet", DEFAULT_KEYPATH)?,
        },
    };

    let payer = opts
        .payer_keypair
        .as_deref()
        .map(|payer| parse_keypair("payer", payer))
        .transpose()?;

    info!("RPC url: {}", rpc_url);

    Ok(ToolConfig {
        keypair,
        payer,
        rpc_url,
    })
}
