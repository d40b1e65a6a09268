// wallet-core/src/chains/mod.rs

//! Per-chain key algebra
//!
//! Mỗi chain implement [`ChainKeyAlgebra`]: raw derived key → keypair → text
//! encoding. [`derive_wallet`] chọn implementation theo [`ChainId`]; thêm chain
//! mới = thêm một variant + một impl.

pub mod evm;
pub mod solana;

pub use evm::{EvmAddress, Secp256k1Chain};
pub use solana::Ed25519Chain;

use crate::crypto::{ChainId, DerivationPaths, KeyDeriver};
use crate::error::WalletResult;
use crate::types::Wallet;

pub trait ChainKeyAlgebra {
    type Keypair;

    /// Chain this algebra serves; tags log events
    const CHAIN: ChainId;

    fn keypair_from_seed(raw: &[u8; 32]) -> WalletResult<Self::Keypair>;

    fn encode_public(keypair: &Self::Keypair) -> String;

    fn encode_private(keypair: &Self::Keypair) -> String;

    fn wallet_from_seed(raw: &[u8; 32]) -> WalletResult<Wallet> {
        let keypair = Self::keypair_from_seed(raw).map_err(|e| {
            tracing::warn!(chain = %Self::CHAIN, error = %e, "derived key rejected by curve");
            e
        })?;
        Ok(Wallet {
            public_key: Self::encode_public(&keypair),
            private_key: Self::encode_private(&keypair),
        })
    }
}

/// Derive the wallet at `index` on `chain` from a BIP-39 seed.
///
/// path → hardened SLIP-0010 key → chain encoding. Deterministic.
pub fn derive_wallet(seed: &[u8], chain: ChainId, index: u32) -> WalletResult<Wallet> {
    let path = DerivationPaths::account(chain, index)?;
    tracing::debug!(%chain, %path, "deriving wallet");
    let raw = KeyDeriver::derive(seed, &path)?;

    match chain {
        ChainId::Solana => Ed25519Chain::wallet_from_seed(&raw),
        ChainId::Ethereum => Secp256k1Chain::wallet_from_seed(&raw),
    }
}

/// [`derive_wallet`] keyed by raw SLIP-44 coin type.
///
/// # Errors
/// [`WalletError::UnsupportedChain`](crate::error::WalletError::UnsupportedChain)
/// cho coin type ngoài {501, 60}; không tạo wallet nào.
pub fn derive_wallet_for_coin_type(seed: &[u8], coin_type: u32, index: u32) -> WalletResult<Wallet> {
    derive_wallet(seed, ChainId::from_coin_type(coin_type)?, index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::mnemonic;
    use crate::error::WalletError;

    const TEST_MNEMONIC: &str =
        "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    #[test]
    fn test_golden_solana_index_0() {
        let seed = mnemonic::to_seed(TEST_MNEMONIC, "").unwrap();
        let wallet = derive_wallet(&*seed, ChainId::Solana, 0).unwrap();
        assert_eq!(wallet.public_key, "HAgk14JpMQLgt6rVgv7cBQFJWFto5Dqxi472uT3DKpqk");
        assert_eq!(
            wallet.private_key,
            "27npWoNE4HfmLeQo1TyWcW7NEA28qnsnDK7kcttDQEWrCWnro83HMJ97rMmpvYYZRwDAvG4KRuB7hTBacvwD7bgi"
        );
    }

    #[test]
    fn test_golden_ethereum_index_0() {
        let seed = mnemonic::to_seed(TEST_MNEMONIC, "").unwrap();
        let wallet = derive_wallet(&*seed, ChainId::Ethereum, 0).unwrap();
        assert_eq!(wallet.public_key, "0x2759A6Ad812b8A7B73A63a243816D66F5b72A0A7");
        assert_eq!(
            wallet.private_key,
            "bca443f5149618b5dbe6e80b5c096ad4280d5a2e8bc0ce3ebc71c9c0878ba5de"
        );
    }

    #[test]
    fn test_later_indices() {
        let seed = mnemonic::to_seed(TEST_MNEMONIC, "").unwrap();
        assert_eq!(
            derive_wallet(&*seed, ChainId::Solana, 1).unwrap().public_key,
            "Hh8QwFUA6MtVu1qAoq12ucvFHNwCcVTV7hpWjeY1Hztb"
        );
        assert_eq!(
            derive_wallet(&*seed, ChainId::Ethereum, 2).unwrap().public_key,
            "0xd48228905FFD1C9235AaA5Bb70783c27dE8cc76A"
        );
    }

    #[test]
    fn test_distinct_indices_distinct_wallets() {
        let seed = mnemonic::to_seed(TEST_MNEMONIC, "").unwrap();
        for chain in ChainId::ALL {
            let wallets: Vec<_> = (0..4).map(|i| derive_wallet(&*seed, chain, i).unwrap()).collect();
            for i in 0..wallets.len() {
                for j in (i + 1)..wallets.len() {
                    assert_ne!(wallets[i].public_key, wallets[j].public_key);
                    assert_ne!(wallets[i].private_key, wallets[j].private_key);
                }
            }
        }
    }

    #[test]
    fn test_determinism() {
        let seed = mnemonic::to_seed(TEST_MNEMONIC, "").unwrap();
        for chain in ChainId::ALL {
            assert_eq!(
                derive_wallet(&*seed, chain, 3).unwrap(),
                derive_wallet(&*seed, chain, 3).unwrap()
            );
        }
    }

    #[test]
    fn test_chains_unrelated() {
        let seed = mnemonic::to_seed(TEST_MNEMONIC, "").unwrap();
        let sol = derive_wallet(&*seed, ChainId::Solana, 0).unwrap();
        let eth = derive_wallet(&*seed, ChainId::Ethereum, 0).unwrap();
        assert_ne!(sol.public_key, eth.public_key);
        assert_ne!(sol.private_key, eth.private_key);
    }

    #[test]
    fn test_algebra_chain_tags() {
        assert_eq!(Ed25519Chain::CHAIN.coin_type(), 501);
        assert_eq!(Secp256k1Chain::CHAIN.coin_type(), 60);
    }

    #[test]
    fn test_unsupported_coin_type() {
        let seed = mnemonic::to_seed(TEST_MNEMONIC, "").unwrap();
        for coin in [0u32, 2, 118, 195, 637] {
            assert_eq!(
                derive_wallet_for_coin_type(&*seed, coin, 0),
                Err(WalletError::UnsupportedChain(coin))
            );
        }
        assert!(derive_wallet_for_coin_type(&*seed, 60, 0).is_ok());
    }
}
