// wallet-core/src/types.rs
//
// Wallet records shared by the key algebra, the store and the manager.

use serde::{Deserialize, Serialize};

/// A derived wallet in its chain-native text encoding
///
/// Serialized as `{"publicKey": ..., "privateKey": ...}`, the format of the
/// persisted `wallets` array.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    pub public_key: String,
    pub private_key: String,
}

// Custom Debug - KHÔNG hiển thị private key
impl std::fmt::Debug for Wallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wallet")
            .field("public_key", &self.public_key)
            .field("private_key", &"[REDACTED]")
            .finish()
    }
}

/// A wallet plus its UI-level visibility flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletEntry {
    pub wallet: Wallet,
    /// Private key currently unmasked in the rendering layer
    pub visible: bool,
}

impl From<Wallet> for WalletEntry {
    fn from(wallet: Wallet) -> Self {
        Self {
            wallet,
            visible: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wallet_json_shape() {
        let wallet = Wallet {
            public_key: "pub".to_string(),
            private_key: "priv".to_string(),
        };
        let json = serde_json::to_string(&wallet).unwrap();
        assert_eq!(json, r#"{"publicKey":"pub","privateKey":"priv"}"#);
        assert_eq!(serde_json::from_str::<Wallet>(&json).unwrap(), wallet);
    }

    #[test]
    fn test_debug_redacts_private_key() {
        let wallet = Wallet {
            public_key: "pub".to_string(),
            private_key: "very-secret".to_string(),
        };
        let debug = format!("{:?}", wallet);
        assert!(!debug.contains("very-secret"));
        assert!(debug.contains("REDACTED"));
    }
}
