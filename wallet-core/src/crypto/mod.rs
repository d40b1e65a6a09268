// wallet-core/src/crypto/mod.rs

//! Core Cryptography Module
//!
//! - **Mnemonic Generation**: BIP-39 recovery phrases and seed stretching via [`WalletMnemonic`].
//! - **Derivation Paths**: Per-chain account path layout via [`DerivationPaths`] and [`ChainId`].
//! - **Key Derivation**: SLIP-0010 hardened derivation to a raw 32-byte key via [`KeyDeriver`].

pub mod key_deriver;
pub mod mnemonic;
pub mod paths;

// Re-exports for cleaner API access
pub use key_deriver::{KeyDeriver, RawDerivedKey};
pub use mnemonic::{EntropyStrength, Seed, WalletMnemonic};
pub use paths::{coin_type, ChainId, DerivationPaths};
