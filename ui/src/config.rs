//! Startup configuration from the environment.
//!
//! The two addresses are mandatory; startup aborts before any window opens
//! when they are missing or malformed. Everything else has a devnet default.

use std::env;
use std::fmt;
use std::str::FromStr;

use cmint_chain::Pubkey;

pub const DEFAULT_RPC_URL: &str = "https://api.devnet.solana.com";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub rpc_url: String,
    pub candy_machine: Pubkey,
    pub collection_mint: Pubkey,
    pub keypair_path: String,
}

#[derive(Debug, PartialEq)]
pub enum ConfigError {
    Missing(&'static str),
    InvalidAddress(&'static str, String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing(name) => write!(f, "missing required environment variable {name}"),
            Self::InvalidAddress(name, value) => {
                write!(f, "{name} is not a valid address: {value}")
            }
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(|name| env::var(name).ok())
    }

    /// Build the config from an injectable variable lookup, so tests stay
    /// off the process environment. Empty values count as unset.
    pub fn load_with(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let candy_machine = require_address("CANDY_MACHINE", &get)?;
        let collection_mint = require_address("COLLECTION_MINT", &get)?;
        let rpc_url = lookup(&get, "SOLANA_RPC").unwrap_or_else(|| DEFAULT_RPC_URL.to_string());
        let keypair_path = lookup(&get, "WALLET_KEYPAIR").unwrap_or_else(default_keypair_path);

        Ok(Self {
            rpc_url,
            candy_machine,
            collection_mint,
            keypair_path,
        })
    }
}

fn lookup(get: &impl Fn(&str) -> Option<String>, name: &str) -> Option<String> {
    get(name).filter(|value| !value.is_empty())
}

fn require_address(
    name: &'static str,
    get: &impl Fn(&str) -> Option<String>,
) -> Result<Pubkey, ConfigError> {
    let value = lookup(get, name).ok_or(ConfigError::Missing(name))?;
    Pubkey::from_str(&value).map_err(|_| ConfigError::InvalidAddress(name, value))
}

// The solana CLI keypair location, shared with its tooling.
fn default_keypair_path() -> String {
    match env::var("HOME") {
        Ok(home) => format!("{home}/.config/solana/id.json"),
        Err(_) => "id.json".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MACHINE: &str = "CndyV3LdqHUfDLmE5naZjVN8rBZz4tqVLbtLeTHRAdA";
    const COLLECTION: &str = "Guard1JwRhJkVH6XZhzoYxeBVQe872VH6QggF4BWmS9g";

    fn lookup_in<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |name| {
            vars.iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| value.to_string())
        }
    }

    #[test]
    fn missing_candy_machine_fails() {
        let err = AppConfig::load_with(lookup_in(&[("COLLECTION_MINT", COLLECTION)])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("CANDY_MACHINE"));
    }

    #[test]
    fn missing_collection_mint_fails() {
        let err = AppConfig::load_with(lookup_in(&[("CANDY_MACHINE", MACHINE)])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("COLLECTION_MINT"));
    }

    #[test]
    fn empty_value_counts_as_missing() {
        let err = AppConfig::load_with(lookup_in(&[
            ("CANDY_MACHINE", ""),
            ("COLLECTION_MINT", COLLECTION),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::Missing("CANDY_MACHINE"));
    }

    #[test]
    fn invalid_address_rejected() {
        let err = AppConfig::load_with(lookup_in(&[
            ("CANDY_MACHINE", "not-an-address"),
            ("COLLECTION_MINT", COLLECTION),
        ]))
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidAddress("CANDY_MACHINE", "not-an-address".to_string())
        );
    }

    #[test]
    fn defaults_applied() {
        let config = AppConfig::load_with(lookup_in(&[
            ("CANDY_MACHINE", MACHINE),
            ("COLLECTION_MINT", COLLECTION),
        ]))
        .unwrap();
        assert_eq!(config.rpc_url, DEFAULT_RPC_URL);
        assert!(config.keypair_path.ends_with("id.json"));
        assert_eq!(config.candy_machine.to_string(), MACHINE);
        assert_eq!(config.collection_mint.to_string(), COLLECTION);
    }

    #[test]
    fn overrides_respected() {
        let config = AppConfig::load_with(lookup_in(&[
            ("CANDY_MACHINE", MACHINE),
            ("COLLECTION_MINT", COLLECTION),
            ("SOLANA_RPC", "http://localhost:8899"),
            ("WALLET_KEYPAIR", "/tmp/minter.json"),
        ]))
        .unwrap();
        assert_eq!(config.rpc_url, "http://localhost:8899");
        assert_eq!(config.keypair_path, "/tmp/minter.json");
    }
}
