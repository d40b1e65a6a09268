// wallet-core/src/store/mod.rs

//! Wallet persistence
//!
//! - [`KeyValueBackend`]: injected get/set/remove capability over opaque strings.
//! - [`WalletStore`]: in-memory [`WalletSet`] + next account index, re-persisted after every mutation.

pub mod backend;
pub mod wallet_store;

pub use backend::{FileBackend, KeyValueBackend, MemoryBackend};
pub use wallet_store::{Persisted, WalletSet, WalletStore};
