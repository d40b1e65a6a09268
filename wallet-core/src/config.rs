// wallet-core/src/config.rs
//
// Wallet manager configuration: defaults, JSON file, environment.

use crate::crypto::{ChainId, EntropyStrength};
use crate::error::{WalletError, WalletResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

/// Backend keys under which the wallet set is persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageKeys {
    /// JSON-encoded phrase
    pub mnemonic: String,
    /// JSON array of `{publicKey, privateKey}`
    pub wallets: String,
    /// JSON-encoded next account index
    pub index: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            mnemonic: "mnemonic".to_string(),
            wallets: "wallets".to_string(),
            index: "index".to_string(),
        }
    }
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalletConfig {
    /// Entropy of newly generated mnemonics (128, 192 or 256 bits)
    pub strength: EntropyStrength,
    /// BIP-39 passphrase mixed into the seed; empty by default
    pub passphrase: String,
    /// Chain used when an intent does not name one
    pub default_chain: ChainId,
    pub keys: StorageKeys,
    /// JSON store file used by the CLI
    pub store_path: PathBuf,
}

// Custom Debug - KHÔNG hiển thị passphrase
impl std::fmt::Debug for WalletConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletConfig")
            .field("strength", &self.strength)
            .field("passphrase", &if self.passphrase.is_empty() { "" } else { "[REDACTED]" })
            .field("default_chain", &self.default_chain)
            .field("keys", &self.keys)
            .field("store_path", &self.store_path)
            .finish()
    }
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            strength: EntropyStrength::Bits128,
            passphrase: String::new(),
            default_chain: ChainId::Solana,
            keys: StorageKeys::default(),
            store_path: PathBuf::from("vaultora.json"),
        }
    }
}

impl WalletConfig {
    /// Defaults overridden by `VAULTORA_*` environment variables (`.env` is loaded if present)
    ///
    /// - `VAULTORA_STRENGTH`: 128 | 192 | 256
    /// - `VAULTORA_PASSPHRASE`
    /// - `VAULTORA_CHAIN`: coin type or name (`501`, `solana`, `60`, `eth`)
    /// - `VAULTORA_STORE`: store file path
    pub fn from_env() -> WalletResult<Self> {
        dotenvy::dotenv().ok();
        Self::default().with_overrides(|name| env::var(name).ok().filter(|v| !v.is_empty()))
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> WalletResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            WalletError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        serde_json::from_str(&raw)
            .map_err(|e| WalletError::Config(format!("invalid config {}: {}", path.display(), e)))
    }

    /// Apply overrides from a variable lookup
    pub fn with_overrides<F>(mut self, lookup: F) -> WalletResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(bits) = lookup("VAULTORA_STRENGTH") {
            let bits: u32 = bits
                .trim()
                .parse()
                .map_err(|_| WalletError::Config(format!("VAULTORA_STRENGTH must be a number, got '{}'", bits)))?;
            self.strength = EntropyStrength::try_from(bits)
                .map_err(|e| WalletError::Config(e.to_string()))?;
        }
        if let Some(passphrase) = lookup("VAULTORA_PASSPHRASE") {
            self.passphrase = passphrase;
        }
        if let Some(chain) = lookup("VAULTORA_CHAIN") {
            self.default_chain = chain
                .parse()
                .map_err(|e: WalletError| WalletError::Config(e.to_string()))?;
        }
        if let Some(path) = lookup("VAULTORA_STORE") {
            self.store_path = PathBuf::from(path);
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = WalletConfig::default();
        assert_eq!(config.strength, EntropyStrength::Bits128);
        assert_eq!(config.passphrase, "");
        assert_eq!(config.default_chain, ChainId::Solana);
        assert_eq!(config.keys.mnemonic, "mnemonic");
        assert_eq!(config.keys.wallets, "wallets");
        assert_eq!(config.keys.index, "index");
    }

    #[test]
    fn test_overrides() {
        let config = WalletConfig::default()
            .with_overrides(lookup(&[
                ("VAULTORA_STRENGTH", "256"),
                ("VAULTORA_CHAIN", "eth"),
                ("VAULTORA_STORE", "/tmp/w.json"),
            ]))
            .unwrap();
        assert_eq!(config.strength, EntropyStrength::Bits256);
        assert_eq!(config.default_chain, ChainId::Ethereum);
        assert_eq!(config.store_path, PathBuf::from("/tmp/w.json"));
    }

    #[test]
    fn test_invalid_overrides() {
        let strength = WalletConfig::default().with_overrides(lookup(&[("VAULTORA_STRENGTH", "160")]));
        assert!(matches!(strength, Err(WalletError::Config(_))));

        let chain = WalletConfig::default().with_overrides(lookup(&[("VAULTORA_CHAIN", "637")]));
        assert!(matches!(chain, Err(WalletError::Config(_))));
    }

    #[test]
    fn test_partial_json() {
        let config: WalletConfig =
            serde_json::from_str(r#"{"strength": 192, "keys": {"index": "idx"}}"#).unwrap();
        assert_eq!(config.strength, EntropyStrength::Bits192);
        assert_eq!(config.keys.index, "idx");
        assert_eq!(config.keys.wallets, "wallets");
        assert_eq!(config.default_chain, ChainId::Solana);
    }

    #[test]
    fn test_debug_redacts_passphrase() {
        let config = WalletConfig {
            passphrase: "hunter2".to_string(),
            ..WalletConfig::default()
        };
        assert!(!format!("{:?}", config).contains("hunter2"));
    }
}
