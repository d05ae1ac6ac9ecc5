use std::{fs::File, path::Path, str::FromStr};

use anchor_client::solana_sdk::{
    pubkey::Pubkey,
    signature::{read_keypair_file, Keypair},
};

use crate::{
    config::{data::SolanaConfig, errors::ConfigError},
    pdas::find_ruleset_pda,
};

const MAX_SEED_LEN: usize = 32;

/// Reads the Solana CLI configuration, if there is one.
pub fn parse_solana_config() -> Option<SolanaConfig> {
    let config_path = shellexpand::tilde("~/.config/solana/cli/config.yml");

    let conf_file = File::open(config_path.as_ref()).ok()?;
    serde_yaml::from_reader(&conf_file).ok()
}

/// Parses keypair material: either a path to a JSON keypair file or a
/// base58 encoded secret key.
pub fn parse_keypair(role: &'static str, input: &str) -> Result<Keypair, ConfigError> {
    let path = shellexpand::tilde(input);

    if Path::new(path.as_ref()).is_file() {
        return read_keypair_file(path.as_ref())
            .map_err(|err| ConfigError::InvalidKeypair(role, err.to_string()));
    }

    let bytes = bs58::decode(input.trim())
        .into_vec()
        .map_err(|_| ConfigError::InvalidKeypair(role, "not a file or base58 secret key".into()))?;

    Keypair::from_bytes(&bytes).map_err(|err| ConfigError::InvalidKeypair(role, err.to_string()))
}

pub fn parse_pubkey(role: &'static str, input: &str) -> Result<Pubkey, ConfigError> {
    Pubkey::from_str(input.trim()).map_err(|_| ConfigError::InvalidPubkey(role, input.to_string()))
}

/// Address of the named creator standard ruleset.
pub fn parse_ruleset(name: &str) -> Result<Pubkey, ConfigError> {
    if name.is_empty() || name.len() > MAX_SEED_LEN {
        return Err(ConfigError::InvalidRulesetName(name.to_string()));
    }

    Ok(find_ruleset_pda(name))
}

#[cfg(test)]
mod tests {
    use anchor_client::solana_sdk::signature::Signer;

    use super::*;

    #[test]
    fn base58_secret_key_is_accepted() {
        let keypair = Keypair::new();
        let encoded = keypair.to_base58_string();

        let parsed = parse_keypair("wallet", &encoded).unwrap();

        assert_eq!(parsed.pubkey(), keypair.pubkey());
    }

    #[test]
    fn garbage_keypair_names_its_role() {
        let result = parse_keypair("payer", "definitely-not-a-key");

        assert!(matches!(result, Err(ConfigError::InvalidKeypair("payer", _))));
    }

    #[test]
    fn ruleset_names_must_fit_a_seed() {
        assert_eq!(
            parse_ruleset("ruleset-no-checks").unwrap(),
            find_ruleset_pda("ruleset-no-checks")
        );
        assert!(parse_ruleset(&"x".repeat(33)).is_err());
        assert!(parse_ruleset("").is_err());
    }

    #[test]
    fn pubkey_parse_errors_keep_input() {
        let result = parse_pubkey("collection mint", "xyz");

        assert!(matches!(
            result,
            Err(ConfigError::InvalidPubkey("collection mint", input)) if input == "xyz"
        ));
    }
}
