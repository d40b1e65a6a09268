// wallet-core/src/store/wallet_store.rs
//
// In-memory wallet set + its persisted image.
//
// Persisted keys (xem `StorageKeys`): `mnemonic` (JSON string), `wallets`
// (JSON array), `index` (JSON number = next free account index).
//
// Mỗi mutation: build trạng thái mới → ghi backend → chỉ commit vào memory khi
// ghi thành công. Ghi lỗi thì memory giữ snapshot cũ và backend được ghi lại
// snapshot cũ (best-effort).

use crate::config::StorageKeys;
use crate::crypto::paths::HARDENED_OFFSET;
use crate::crypto::WalletMnemonic;
use crate::error::{CryptoError, StorageError, WalletError, WalletResult};
use crate::store::backend::KeyValueBackend;
use crate::types::{Wallet, WalletEntry};

/// Ordered wallets (creation order) plus the next free account index
///
/// # Invariant
/// `next_index >= entries.len()`; `next_index` chỉ tăng, không giảm khi delete.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalletSet {
    entries: Vec<WalletEntry>,
    next_index: u32,
}

impl WalletSet {
    pub fn entries(&self) -> &[WalletEntry] {
        &self.entries
    }

    pub fn wallets(&self) -> impl Iterator<Item = &Wallet> {
        self.entries.iter().map(|e| &e.wallet)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn next_index(&self) -> u32 {
        self.next_index
    }

    fn appended(&self, wallet: Wallet) -> WalletResult<Self> {
        let next_index = self
            .next_index
            .checked_add(1)
            .filter(|i| *i <= HARDENED_OFFSET)
            .ok_or(WalletError::Crypto(CryptoError::IndexOutOfRange(self.next_index)))?;
        let mut entries = self.entries.clone();
        entries.push(wallet.into());
        Ok(Self {
            entries,
            next_index,
        })
    }

    fn check_position(&self, position: usize) -> WalletResult<()> {
        if position >= self.entries.len() {
            return Err(WalletError::InvalidPosition {
                position,
                len: self.entries.len(),
            });
        }
        Ok(())
    }
}

/// Persisted state as read back from a backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Persisted {
    pub mnemonic: WalletMnemonic,
    pub set: WalletSet,
}

pub struct WalletStore<B> {
    backend: B,
    keys: StorageKeys,
    mnemonic: Option<WalletMnemonic>,
    set: WalletSet,
}

impl<B: KeyValueBackend> WalletStore<B> {
    /// Empty store over `backend`; call [`hydrate`](Self::hydrate) to read persisted state.
    pub fn new(backend: B, keys: StorageKeys) -> Self {
        Self {
            backend,
            keys,
            mnemonic: None,
            set: WalletSet::default(),
        }
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    pub fn mnemonic(&self) -> Option<&WalletMnemonic> {
        self.mnemonic.as_ref()
    }

    pub fn set(&self) -> &WalletSet {
        &self.set
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    // =========================================================================
    // LOAD
    // =========================================================================

    /// Read the persisted mnemonic and wallet set.
    ///
    /// Returns `None` when either key is absent or anything is malformed
    /// (the store is an advisory cache, not the source of truth).
    pub fn load(&self) -> Option<Persisted> {
        let raw_mnemonic = self.backend.get(&self.keys.mnemonic)?;
        let raw_wallets = self.backend.get(&self.keys.wallets)?;

        let phrase: String = serde_json::from_str(&raw_mnemonic)
            .map_err(|e| tracing::warn!(error = %e, "persisted mnemonic is not a JSON string"))
            .ok()?;
        let mnemonic = WalletMnemonic::from_phrase(&phrase)
            .map_err(|e| tracing::warn!(error = %e, "persisted mnemonic failed validation"))
            .ok()?;
        let wallets: Vec<Wallet> = serde_json::from_str(&raw_wallets)
            .map_err(|e| tracing::warn!(error = %e, "persisted wallets are malformed"))
            .ok()?;

        // Older stores wrote the last *used* index, or none at all.
        let stored_index = self.backend.get(&self.keys.index).and_then(|raw| {
            serde_json::from_str::<u32>(&raw)
                .map_err(|e| tracing::warn!(error = %e, "persisted index is malformed, recomputing"))
                .ok()
        });
        let floor = u32::try_from(wallets.len()).ok()?;
        let next_index = stored_index.unwrap_or(0).max(floor);

        Some(Persisted {
            mnemonic,
            set: WalletSet {
                entries: wallets.into_iter().map(WalletEntry::from).collect(),
                next_index,
            },
        })
    }

    /// Replace the in-memory state with what [`load`](Self::load) returns.
    /// Returns `true` if persisted state was found.
    pub fn hydrate(&mut self) -> bool {
        match self.load() {
            Some(Persisted { mnemonic, set }) => {
                tracing::info!(wallets = set.len(), next_index = set.next_index, "wallet set hydrated");
                self.mnemonic = Some(mnemonic);
                self.set = set;
                true
            }
            None => {
                self.mnemonic = None;
                self.set = WalletSet::default();
                false
            }
        }
    }

    // =========================================================================
    // MUTATIONS
    // =========================================================================

    /// Start a new wallet set: `mnemonic` with `first` at index 0.
    pub fn begin(&mut self, mnemonic: WalletMnemonic, first: Wallet) -> WalletResult<()> {
        let set = WalletSet::default().appended(first)?;
        self.commit(Some(mnemonic), set)
    }

    /// Append a wallet derived at [`WalletSet::next_index`].
    pub fn append(&mut self, wallet: Wallet) -> WalletResult<()> {
        if self.mnemonic.is_none() {
            return Err(WalletError::NoMnemonic);
        }
        let set = self.set.appended(wallet)?;
        self.commit(self.mnemonic.clone(), set)
    }

    /// Remove the wallet at zero-based `position`. The index counter is untouched.
    pub fn remove_at(&mut self, position: usize) -> WalletResult<Wallet> {
        self.set.check_position(position)?;
        let mut set = self.set.clone();
        let removed = set.entries.remove(position);
        self.commit(self.mnemonic.clone(), set)?;
        Ok(removed.wallet)
    }

    /// Drop the mnemonic, every wallet and the index counter.
    pub fn clear(&mut self) -> WalletResult<()> {
        self.commit(None, WalletSet::default())
    }

    /// Flip the visibility flag of one wallet. UI-only, not persisted.
    pub fn toggle_visible(&mut self, position: usize) -> WalletResult<bool> {
        self.set.check_position(position)?;
        let entry = &mut self.set.entries[position];
        entry.visible = !entry.visible;
        Ok(entry.visible)
    }

    // =========================================================================
    // PERSISTENCE
    // =========================================================================

    fn commit(&mut self, mnemonic: Option<WalletMnemonic>, set: WalletSet) -> WalletResult<()> {
        if let Err(e) = self.write(mnemonic.as_ref(), &set) {
            tracing::warn!(error = %e, "persist failed, restoring previous snapshot");
            self.restore();
            return Err(e.into());
        }

        self.mnemonic = mnemonic;
        self.set = set;
        Ok(())
    }

    /// Rewrite the in-memory snapshot key by key. Mỗi key thử độc lập: một key
    /// lỗi thì log rồi tiếp tục với các key còn lại.
    fn restore(&mut self) {
        let writes: Vec<(&str, Option<Result<String, StorageError>>)> = match &self.mnemonic {
            Some(mnemonic) => {
                let wallets: Vec<&Wallet> = self.set.wallets().collect();
                vec![
                    (self.keys.mnemonic.as_str(), Some(encode(&self.keys.mnemonic, mnemonic.phrase()))),
                    (self.keys.index.as_str(), Some(encode(&self.keys.index, &self.set.next_index))),
                    (self.keys.wallets.as_str(), Some(encode(&self.keys.wallets, &wallets))),
                ]
            }
            None => vec![
                (self.keys.wallets.as_str(), None),
                (self.keys.index.as_str(), None),
                (self.keys.mnemonic.as_str(), None),
            ],
        };

        for (key, value) in writes {
            let result = match value {
                Some(Ok(encoded)) => self.backend.set(key, &encoded),
                Some(Err(e)) => Err(e),
                None => self.backend.remove(key),
            };
            if let Err(e) = result {
                tracing::warn!(key, error = %e, "rollback write failed");
            }
        }
    }

    /// Order: `mnemonic`, `index`, `wallets` on write; `wallets`, `index`,
    /// `mnemonic` on clear. Backend luôn có `index >= len(wallets)`.
    fn write(&mut self, mnemonic: Option<&WalletMnemonic>, set: &WalletSet) -> Result<(), StorageError> {
        let Some(mnemonic) = mnemonic else {
            self.backend.remove(&self.keys.wallets)?;
            self.backend.remove(&self.keys.index)?;
            self.backend.remove(&self.keys.mnemonic)?;
            tracing::debug!("persisted wallet set cleared");
            return Ok(());
        };

        let wallets: Vec<&Wallet> = set.wallets().collect();
        let encoded_mnemonic = encode(&self.keys.mnemonic, &mnemonic.phrase())?;
        let encoded_index = encode(&self.keys.index, &set.next_index)?;
        let encoded_wallets = encode(&self.keys.wallets, &wallets)?;

        self.backend.set(&self.keys.mnemonic, &encoded_mnemonic)?;
        self.backend.set(&self.keys.index, &encoded_index)?;
        self.backend.set(&self.keys.wallets, &encoded_wallets)?;
        tracing::debug!(wallets = set.len(), next_index = set.next_index, "wallet set persisted");
        Ok(())
    }
}

fn encode<T: serde::Serialize + ?Sized>(key: &str, value: &T) -> Result<String, StorageError> {
    serde_json::to_string(value).map_err(|e| StorageError::Encode {
        key: key.to_string(),
        reason: e.to_string(),
    })
}

// =============================================================================
// TESTS
// =============================================================================
