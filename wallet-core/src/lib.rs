// wallet-core/src/lib.rs

//! Vaultora wallet core
//!
//! Local hierarchical-deterministic wallet manager. One BIP-39 recovery phrase
//! derives any number of Solana (`coin_type = 501`, Ed25519) and Ethereum
//! (`coin_type = 60`, secp256k1) wallets through SLIP-0010 hardened paths.
//! Secret material never leaves the process except through the injected
//! [`KeyValueBackend`](store::KeyValueBackend).
//!
//! ```text
//! Intent → WalletManager → { WalletMnemonic, DerivationPaths + KeyDeriver, ChainKeyAlgebra }
//!                        → Wallet → WalletStore → KeyValueBackend
//! ```

pub mod chains;
pub mod config;
pub mod crypto;
pub mod error;
pub mod manager;
pub mod store;
pub mod types;

pub use chains::{derive_wallet, derive_wallet_for_coin_type, ChainKeyAlgebra};
pub use config::{StorageKeys, WalletConfig};
pub use crypto::{ChainId, DerivationPaths, EntropyStrength, KeyDeriver, WalletMnemonic};
pub use error::{WalletError, WalletResult};
pub use manager::{Intent, ManagerState, ViewModel, WalletManager};
pub use store::{FileBackend, KeyValueBackend, MemoryBackend, WalletStore};
pub use types::Wallet;
