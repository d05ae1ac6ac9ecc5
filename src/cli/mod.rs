use clap::{AppSettings, Args, Parser, Subcommand};

use crate::constants::{DEFAULT_COMPUTE_UNITS, DEFAULT_RPC_TIMEOUT, DEFAULT_RULESET};

#[derive(Parser)]
#[clap(author, version, about)]
#[clap(setting(AppSettings::SubcommandRequiredElseHelp))]
pub struct Cli {
    /// Log level: trace, debug, info, warn, error, off
    #[clap(short, long, global = true)]
    pub log_level: Option<String>,

    #[clap(subcommand)]
    pub command: Commands,
}

/// Signers and endpoint options shared by every command.
#[derive(Args, Clone, Debug)]
pub struct NetworkOpts {
    /// Wallet keypair file or base58 secret key, uses Sol config or defaults to "~/.config/solana/id.json"
    #[clap(short, long, env = "WALLET_KEYPAIR", hide_env_values = true)]
    pub keypair: Option<String>,

    /// Keypair file or base58 secret key of a distinct fee payer
    #[clap(long, env = "PAYER_KEYPAIR", hide_env_values = true)]
    pub payer_keypair: Option<String>,

    /// RPC Url, takes precedence over the cluster
    #[clap(short, long, env = "RPC_URL")]
    pub rpc_url: Option<String>,

    /// Cluster: mainnet-beta, mainnet, devnet, testnet, localnet
    #[clap(long, env = "CLUSTER")]
    pub cluster: Option<String>,

    /// RPC Url used for mainnet instead of the public endpoint
    #[clap(long, env = "MAINNET_PRIMARY")]
    pub mainnet_primary: Option<String>,

    /// Candy machine program id
    #[clap(long)]
    pub program_id: Option<String>,

    /// Seconds allowed for each RPC request
    #[clap(long, default_value_t = DEFAULT_RPC_TIMEOUT)]
    pub timeout: u64,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Mint one NFT from the candy machine
    Mint {
        /// Address of the candy machine
        #[clap(short, long, env = "CANDY_MACHINE_ID")]
        candy_machine: String,

        /// Link the minted NFT to this collection mint
        #[clap(long, env = "COLLECTION_MINT")]
        collection_mint: Option<String>,

        /// Transfer ruleset enforced by the creator standard module
        #[clap(long, env = "RULESET_NAME", default_value = DEFAULT_RULESET)]
        ruleset_name: String,

        /// Compute units requested for the mint transaction
        #[clap(long, default_value_t = DEFAULT_COMPUTE_UNITS)]
        compute_units: u32,

        /// Merge identical accounts contributed by the extension modules
        #[clap(long)]
        dedupe_roles: bool,

        #[clap(flatten)]
        network: NetworkOpts,
    },

    /// Show the candy machine state and its active extension modules
    Show {
        /// Address of the candy machine
        #[clap(short, long, env = "CANDY_MACHINE_ID")]
        candy_machine: String,

        #[clap(flatten)]
        network: NetworkOpts,
    },

    /// Create a candy machine, optionally with payment and module settings
    Create {
        /// Number of items the candy machine holds
        #[clap(long)]
        items: u64,

        /// Mint price in lamports, or in base units of the payment mint
        #[clap(long)]
        price: u64,

        /// Symbol of the minted NFTs
        #[clap(long, default_value = "")]
        symbol: String,

        /// Royalties in basis points
        #[clap(long, default_value_t = 0)]
        seller_fee_basis_points: u16,

        /// Unix timestamp minting opens at, defaults to now
        #[clap(long)]
        go_live_date: Option<i64>,

        /// SPL token the mint price is paid in
        #[clap(long)]
        payment_mint: Option<String>,

        /// Lockup type of minted NFTs: expiration or duration
        #[clap(long, requires = "lockup_number")]
        lockup_type: Option<String>,

        /// Unix timestamp or number of seconds, depending on the lockup type
        #[clap(long, requires = "lockup_type")]
        lockup_number: Option<u64>,

        /// Creator allowed to approve transfers of minted NFTs
        #[clap(long)]
        permissioned_creator: Option<String>,

        /// Creator of the transfer ruleset enforced on minted NFTs
        #[clap(long)]
        ruleset_creator: Option<String>,

        /// Transfer ruleset enforced on minted NFTs
        #[clap(long, env = "RULESET_NAME", default_value = DEFAULT_RULESET)]
        ruleset_name: String,

        #[clap(flatten)]
        network: NetworkOpts,
    },

    /// Set the lockup settings of a candy machine
    SetLockup {
        /// Address of the candy machine
        #[clap(short, long, env = "CANDY_MACHINE_ID")]
        candy_machine: String,

        /// Lockup type: expiration or duration
        #[clap(long)]
        lockup_type: String,

        /// Unix timestamp or number of seconds, depending on the lockup type
        #[clap(long)]
        number: u64,

        #[clap(flatten)]
        network: NetworkOpts,
    },

    /// Set the permissioned settings of a candy machine
    SetPermissioned {
        /// Address of the candy machine
        #[clap(short, long, env = "CANDY_MACHINE_ID")]
        candy_machine: String,

        /// Creator allowed to approve transfers of minted NFTs
        #[clap(long)]
        creator: String,

        #[clap(flatten)]
        network: NetworkOpts,
    },

    /// Set the creator standard ruleset of a candy machine
    SetRuleset {
        /// Address of the candy machine
        #[clap(short, long, env = "CANDY_MACHINE_ID")]
        candy_machine: String,

        /// Creator of the ruleset
        #[clap(long)]
        creator: String,

        /// Name of the ruleset
        #[clap(long, env = "RULESET_NAME", default_value = DEFAULT_RULESET)]
        ruleset_name: String,

        #[clap(flatten)]
        network: NetworkOpts,
    },
}
