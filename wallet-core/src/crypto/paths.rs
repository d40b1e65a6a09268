// wallet-core/src/crypto/paths.rs
//
// Derivation Paths Module - per-chain BIP-44 account paths
// BIP-44 (Purpose), SLIP-44 (Coin Types), SLIP-0010 (all levels hardened)

use crate::error::{CryptoError, WalletError, WalletResult};
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// SLIP-44 COIN TYPES
// =============================================================================
/// SLIP-44 Registered Coin Types
/// Ref: https://github.com/satoshilabs/slips/blob/master/slip-0044.md
pub mod coin_type {
    /// secp256k1, EVM chains dùng chung coin_type 60
    pub const ETHEREUM: u32 = 60;
    /// ed25519
    pub const SOLANA: u32 = 501;
}

/// Bit đánh dấu hardened index (2^31)
pub const HARDENED_OFFSET: u32 = 0x8000_0000;

// =============================================================================
// CHAIN IDENTIFIER
// =============================================================================
/// Supported networks, identified by SLIP-44 coin type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum ChainId {
    /// `coin_type = 501`, Ed25519 curve
    #[default]
    Solana,
    /// `coin_type = 60`, secp256k1 curve
    Ethereum,
}

impl ChainId {
    pub const ALL: [ChainId; 2] = [ChainId::Solana, ChainId::Ethereum];

    #[inline]
    pub const fn coin_type(self) -> u32 {
        match self {
            ChainId::Solana => coin_type::SOLANA,
            ChainId::Ethereum => coin_type::ETHEREUM,
        }
    }

    /// Resolve a raw coin type. Unknown coin types are rejected, never defaulted.
    pub fn from_coin_type(coin_type: u32) -> WalletResult<Self> {
        match coin_type {
            coin_type::SOLANA => Ok(ChainId::Solana),
            coin_type::ETHEREUM => Ok(ChainId::Ethereum),
            other => Err(WalletError::UnsupportedChain(other)),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ChainId::Solana => "Solana",
            ChainId::Ethereum => "Ethereum",
        }
    }
}

impl TryFrom<u32> for ChainId {
    type Error = WalletError;

    fn try_from(coin_type: u32) -> Result<Self, Self::Error> {
        Self::from_coin_type(coin_type)
    }
}

impl From<ChainId> for u32 {
    fn from(chain: ChainId) -> Self {
        chain.coin_type()
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.coin_type())
    }
}

impl std::str::FromStr for ChainId {
    type Err = WalletError;

    /// Accepts a coin type (`501`, `60`) or a chain name (`solana`, `sol`, `ethereum`, `eth`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "solana" | "sol" => Ok(ChainId::Solana),
            "ethereum" | "eth" => Ok(ChainId::Ethereum),
            other => {
                let coin_type = other.parse::<u32>().map_err(|_| {
                    WalletError::Config(format!("Unknown chain '{}'", s.trim()))
                })?;
                Self::from_coin_type(coin_type)
            }
        }
    }
}

// =============================================================================
// DERIVATION PATHS
// =============================================================================
/// Account derivation paths
///
/// # Conventions (mọi level đều hardened)
/// - Solana:   `m/44'/501'/<index>'/0'`  (index ở level account)
/// - Ethereum: `m/44'/60'/0'/<index>'`   (index ở level change)
///
/// Vị trí của index khác nhau giữa hai chain. Layout này phải giữ nguyên để
/// tái tạo đúng các ví đã derive trước đó.
pub struct DerivationPaths;

impl DerivationPaths {
    pub const SOLANA_0: &'static str = "m/44'/501'/0'/0'";
    pub const EVM_0: &'static str = "m/44'/60'/0'/0'";

    /// Path for the wallet at `index` on `chain`
    pub fn account(chain: ChainId, index: u32) -> WalletResult<String> {
        if index >= HARDENED_OFFSET {
            return Err(WalletError::Crypto(CryptoError::IndexOutOfRange(index)));
        }
        let coin = chain.coin_type();
        Ok(match chain {
            ChainId::Solana => Self::hardened_path(coin, index, &[0]),
            ChainId::Ethereum => Self::hardened_path(coin, 0, &[index]),
        })
    }

    /// Same as [`account`](Self::account) but starting from a raw coin type.
    ///
    /// # Errors
    /// [`WalletError::UnsupportedChain`] cho coin type ngoài {501, 60}.
    pub fn for_coin_type(coin_type: u32, index: u32) -> WalletResult<String> {
        Self::account(ChainId::from_coin_type(coin_type)?, index)
    }

    /// Tạo Path chuẩn SLIP-0010 (luôn hardened)
    ///
    /// - `hardened_path(501, 0, &[0])` -> m/44'/501'/0'/0'
    /// - `hardened_path(60, 0, &[3])`  -> m/44'/60'/0'/3'
    pub fn hardened_path(coin_type: u32, account: u32, sub_paths: &[u32]) -> String {
        let mut path = format!("m/44'/{}'/{}'", coin_type, account);
        for &idx in sub_paths {
            path.push_str(&format!("/{}'", idx));
        }
        path
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solana_paths() {
        assert_eq!(DerivationPaths::account(ChainId::Solana, 0).unwrap(), DerivationPaths::SOLANA_0);
        assert_eq!(DerivationPaths::account(ChainId::Solana, 2).unwrap(), "m/44'/501'/2'/0'");
    }

    #[test]
    fn test_evm_paths() {
        assert_eq!(DerivationPaths::account(ChainId::Ethereum, 0).unwrap(), DerivationPaths::EVM_0);
        assert_eq!(DerivationPaths::account(ChainId::Ethereum, 7).unwrap(), "m/44'/60'/0'/7'");
    }

    #[test]
    fn test_distinct_indices_distinct_paths() {
        for chain in ChainId::ALL {
            let a = DerivationPaths::account(chain, 1).unwrap();
            let b = DerivationPaths::account(chain, 10).unwrap();
            assert_ne!(a, b);
        }
    }

    #[test]
    fn test_unsupported_coin_type() {
        assert_eq!(
            DerivationPaths::for_coin_type(0, 0),
            Err(WalletError::UnsupportedChain(0))
        );
        assert_eq!(
            DerivationPaths::for_coin_type(637, 1),
            Err(WalletError::UnsupportedChain(637))
        );
        assert_eq!(
            DerivationPaths::for_coin_type(60, 1).unwrap(),
            "m/44'/60'/0'/1'"
        );
    }

    #[test]
    fn test_hardened_path_layout() {
        assert_eq!(DerivationPaths::hardened_path(501, 2, &[0]), "m/44'/501'/2'/0'");
        assert_eq!(DerivationPaths::hardened_path(60, 0, &[7]), "m/44'/60'/0'/7'");
        assert_eq!(DerivationPaths::hardened_path(60, 1, &[]), "m/44'/60'/1'");
    }

    #[test]
    fn test_index_out_of_hardened_range() {
        assert_eq!(
            DerivationPaths::account(ChainId::Solana, HARDENED_OFFSET),
            Err(WalletError::Crypto(CryptoError::IndexOutOfRange(HARDENED_OFFSET)))
        );
        assert!(DerivationPaths::account(ChainId::Ethereum, HARDENED_OFFSET - 1).is_ok());
    }

    #[test]
    fn test_chain_parsing() {
        assert_eq!("501".parse::<ChainId>().unwrap(), ChainId::Solana);
        assert_eq!("ETH".parse::<ChainId>().unwrap(), ChainId::Ethereum);
        assert_eq!("118".parse::<ChainId>(), Err(WalletError::UnsupportedChain(118)));
        assert!(matches!("dogecoin".parse::<ChainId>(), Err(WalletError::Config(_))));
    }

    #[test]
    fn test_chain_serde_as_coin_type() {
        assert_eq!(serde_json::to_string(&ChainId::Ethereum).unwrap(), "60");
        assert_eq!(serde_json::from_str::<ChainId>("501").unwrap(), ChainId::Solana);
        assert!(serde_json::from_str::<ChainId>("2").is_err());
    }
}
