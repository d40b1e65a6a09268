// wallet-core/src/manager.rs
//
// Wallet Manager - orchestrator + state machine
//
//   Empty  --generate/import-->  Active
//   Active --add_wallet------->  Active
//   Active --delete_wallet---->  Active   (mnemonic + index giữ nguyên, kể cả khi hết wallet)
//   Active --clear_all-------->  Empty
//
// Manager là owner duy nhất của mnemonic + wallet set. Không có locking bên
// trong; embed đa luồng thì bọc cả manager trong một Mutex.

use crate::chains::derive_wallet;
use crate::config::WalletConfig;
use crate::crypto::{ChainId, WalletMnemonic};
use crate::error::{WalletError, WalletResult};
use crate::store::{KeyValueBackend, WalletStore};
use crate::types::Wallet;
use rand::{rngs::OsRng, CryptoRng, RngCore};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManagerState {
    /// No mnemonic, no wallets
    Empty,
    /// Mnemonic present (wallet list may be empty after deletes)
    Active,
}

/// Discrete user intents sent by the rendering layer
#[derive(Clone, PartialEq, Eq)]
pub enum Intent {
    Generate { chain: ChainId },
    Import { phrase: String, chain: ChainId },
    AddWallet { chain: ChainId },
    DeleteWallet { position: usize },
    ClearAll,
    TogglePrivateKeyVisible { position: usize },
}

impl std::fmt::Debug for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Intent::Generate { chain } => f.debug_struct("Generate").field("chain", chain).finish(),
            Intent::Import { chain, .. } => f
                .debug_struct("Import")
                .field("phrase", &"[REDACTED]")
                .field("chain", chain)
                .finish(),
            Intent::AddWallet { chain } => f.debug_struct("AddWallet").field("chain", chain).finish(),
            Intent::DeleteWallet { position } => f
                .debug_struct("DeleteWallet")
                .field("position", position)
                .finish(),
            Intent::ClearAll => f.write_str("ClearAll"),
            Intent::TogglePrivateKeyVisible { position } => f
                .debug_struct("TogglePrivateKeyVisible")
                .field("position", position)
                .finish(),
        }
    }
}

#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletView {
    pub public_key: String,
    pub private_key: String,
    pub visible: bool,
}

/// Immutable snapshot for the rendering layer, rebuilt after every intent
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewModel {
    pub mnemonic: Option<String>,
    pub wallets: Vec<WalletView>,
    pub can_add: bool,
    pub can_generate: bool,
}

// Custom Debug - KHÔNG hiển thị mnemonic / private keys
impl std::fmt::Debug for ViewModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let public_keys: Vec<&str> = self.wallets.iter().map(|w| w.public_key.as_str()).collect();
        f.debug_struct("ViewModel")
            .field("mnemonic", &self.mnemonic.as_ref().map(|_| "[REDACTED]"))
            .field("wallets", &public_keys)
            .field("can_add", &self.can_add)
            .field("can_generate", &self.can_generate)
            .finish()
    }
}

impl std::fmt::Debug for WalletView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletView")
            .field("public_key", &self.public_key)
            .field("private_key", &"[REDACTED]")
            .field("visible", &self.visible)
            .finish()
    }
}

pub struct WalletManager<B, R = OsRng> {
    store: WalletStore<B>,
    config: WalletConfig,
    rng: R,
}

impl<B: KeyValueBackend> WalletManager<B> {
    /// Manager in `Empty` state using the OS CSPRNG. Call [`hydrate`](Self::hydrate) at startup.
    pub fn new(backend: B, config: WalletConfig) -> Self {
        Self::with_rng(backend, config, OsRng)
    }
}

impl<B: KeyValueBackend, R: RngCore + CryptoRng> WalletManager<B, R> {
    pub fn with_rng(backend: B, config: WalletConfig, rng: R) -> Self {
        let store = WalletStore::new(backend, config.keys.clone());
        Self { store, config, rng }
    }

    // =========================================================================
    // LIFECYCLE
    // =========================================================================

    /// Read the backend once and adopt whatever valid state it holds.
    pub fn hydrate(&mut self) -> ViewModel {
        if !self.store.hydrate() {
            tracing::info!("no persisted wallet set, starting empty");
        }
        self.view()
    }

    pub fn handle_intent(&mut self, intent: Intent) -> WalletResult<ViewModel> {
        tracing::debug!(?intent, "handling intent");
        match intent {
            Intent::Generate { chain } => self.generate(chain).map(drop),
            Intent::Import { phrase, chain } => self.import(&phrase, chain).map(drop),
            Intent::AddWallet { chain } => self.add_wallet(chain).map(drop),
            Intent::DeleteWallet { position } => self.delete_wallet(position).map(drop),
            Intent::ClearAll => self.clear_all(),
            Intent::TogglePrivateKeyVisible { position } => {
                self.toggle_private_key_visible(position).map(drop)
            }
        }?;
        Ok(self.view())
    }

    // =========================================================================
    // TRANSITIONS
    // =========================================================================

    /// `Empty → Active`: fresh mnemonic, wallet at index 0.
    ///
    /// # Errors
    /// [`WalletError::AlreadyInitialized`] while a mnemonic is held; clear first.
    pub fn generate(&mut self, chain: ChainId) -> WalletResult<Wallet> {
        self.ensure_empty()?;
        let mnemonic = WalletMnemonic::generate_with(&mut self.rng, self.config.strength)?;
        let wallet = self.begin(mnemonic, chain)?;
        tracing::info!(%chain, "new wallet set generated");
        Ok(wallet)
    }

    /// `Empty → Active` from an existing recovery phrase, wallet at index 0.
    pub fn import(&mut self, phrase: &str, chain: ChainId) -> WalletResult<Wallet> {
        self.ensure_empty()?;
        let mnemonic = WalletMnemonic::from_phrase(phrase)?;
        let wallet = self.begin(mnemonic, chain)?;
        tracing::info!(%chain, "wallet set imported");
        Ok(wallet)
    }

    /// Derive the next index under the current mnemonic.
    pub fn add_wallet(&mut self, chain: ChainId) -> WalletResult<Wallet> {
        let index = self.store.set().next_index();
        let seed = self
            .store
            .mnemonic()
            .ok_or(WalletError::NoMnemonic)?
            .to_seed(&self.config.passphrase)?;
        let wallet = derive_wallet(&*seed, chain, index)?;
        self.store.append(wallet.clone())?;
        tracing::info!(%chain, index, "wallet added");
        Ok(wallet)
    }

    /// Remove the wallet at `position`. Its index is never reissued.
    pub fn delete_wallet(&mut self, position: usize) -> WalletResult<Wallet> {
        let removed = self.store.remove_at(position)?;
        tracing::info!(position, remaining = self.store.set().len(), "wallet deleted");
        Ok(removed)
    }

    /// `Active → Empty`: forget the mnemonic, every wallet and the index.
    pub fn clear_all(&mut self) -> WalletResult<()> {
        self.store.clear()?;
        tracing::info!("all wallets cleared");
        Ok(())
    }

    pub fn toggle_private_key_visible(&mut self, position: usize) -> WalletResult<bool> {
        self.store.toggle_visible(position)
    }

    fn ensure_empty(&self) -> WalletResult<()> {
        if self.store.mnemonic().is_some() {
            return Err(WalletError::AlreadyInitialized);
        }
        Ok(())
    }

    fn begin(&mut self, mnemonic: WalletMnemonic, chain: ChainId) -> WalletResult<Wallet> {
        let seed = mnemonic.to_seed(&self.config.passphrase)?;
        let wallet = derive_wallet(&*seed, chain, 0)?;
        self.store.begin(mnemonic, wallet.clone())?;
        Ok(wallet)
    }

    // =========================================================================
    // READ SIDE
    // =========================================================================

    pub fn state(&self) -> ManagerState {
        match self.store.mnemonic() {
            Some(_) => ManagerState::Active,
            None => ManagerState::Empty,
        }
    }

    pub fn mnemonic(&self) -> Option<&WalletMnemonic> {
        self.store.mnemonic()
    }

    pub fn wallets(&self) -> Vec<&Wallet> {
        self.store.set().wallets().collect()
    }

    /// Next account index that `add_wallet` will derive
    pub fn next_index(&self) -> u32 {
        self.store.set().next_index()
    }

    pub fn config(&self) -> &WalletConfig {
        &self.config
    }

    pub fn store(&self) -> &WalletStore<B> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut WalletStore<B> {
        &mut self.store
    }

    pub fn view(&self) -> ViewModel {
        let state = self.state();
        ViewModel {
            mnemonic: self.store.mnemonic().map(|m| m.phrase().to_string()),
            wallets: self
                .store
                .set()
                .entries()
                .iter()
                .map(|entry| WalletView {
                    public_key: entry.wallet.public_key.clone(),
                    private_key: entry.wallet.private_key.clone(),
                    visible: entry.visible,
                })
                .collect(),
            can_add: state == ManagerState::Active,
            can_generate: state == ManagerState::Empty,
        }
    }
}
