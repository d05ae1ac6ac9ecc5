use console::Emoji;
use solana_program::pubkey::Pubkey;

/// Candy machine program with extension module support.
pub const CANDY_MACHINE_ID: Pubkey =
    solana_program::pubkey!("ccmpgw68x3NJmNPePFrTm6TsKCEYUVhF8ZJAhcd1gQ1");

/// Token manager program used by the lockup and permissioned modules.
pub const TOKEN_MANAGER_ID: Pubkey =
    solana_program::pubkey!("mgr99QFMYByTqGPWmNqunV7vBLmWWXdSrHUfV8Jf3JM");

/// Time invalidator program used by the lockup module.
pub const TIME_INVALIDATOR_ID: Pubkey =
    solana_program::pubkey!("tmeEDp1RgoDtZFtx6qod3HkbQmv9LMe36uqKVvsLTDE");

/// Creator standard program enforcing transfer rulesets.
pub const CREATOR_STANDARD_ID: Pubkey =
    solana_program::pubkey!("ccsxqYAg64wuLEh45KabyPvkKjrEfDPsDZUQrGn7mf3");

// pda seeds

pub const CANDY_MACHINE_PREFIX: &str = "candy_machine";
pub const COLLECTION_PREFIX: &str = "collection";
pub const LOCKUP_SETTINGS_SEED: &str = "lockup-settings";
pub const PERMISSIONED_SETTINGS_SEED: &str = "permissioned-settings";
pub const CCS_SETTINGS_SEED: &str = "ccs-settings";
pub const TOKEN_MANAGER_SEED: &str = "token-manager";
pub const MINT_COUNTER_SEED: &str = "mint-counter";
pub const TIME_INVALIDATOR_SEED: &str = "time-invalidator";
pub const MINT_MANAGER_SEED: &str = "mint-manager";
pub const RULESET_SEED: &str = "ruleset";

/// Compute units requested ahead of the mint instruction.
pub const DEFAULT_COMPUTE_UNITS: u32 = 400_000;

/// Seconds allowed for a single RPC request.
pub const DEFAULT_RPC_TIMEOUT: u64 = 30;

pub const DEFAULT_RULESET: &str = "ruleset-no-checks";

pub const DEFAULT_CLUSTER: &str = "devnet";

pub const DEFAULT_KEYPATH: &str = "~/.config/solana/id.json";

pub const LOG_FILE: &str = "candy-mint.log";

// emojis

pub const CANDY_EMOJI: Emoji<'_, '_> = Emoji("🍬 ", "");
pub const COMPLETE_EMOJI: Emoji<'_, '_> = Emoji("✅ ", "");
pub const ERROR_EMOJI: Emoji<'_, '_> = Emoji("🛑 ", "");
pub const LOOKING_GLASS_EMOJI: Emoji<'_, '_> = Emoji("🔍 ", "");
pub const LOCK_EMOJI: Emoji<'_, '_> = Emoji("🔒 ", "");
pub const PAPER_EMOJI: Emoji<'_, '_> = Emoji("📝 ", "");
pub const SIGNING_EMOJI: Emoji<'_, '_> = Emoji("✍️  ", "");
