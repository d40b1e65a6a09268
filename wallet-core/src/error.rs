use thiserror::Error;

pub type WalletResult<T> = std::result::Result<T, WalletError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WalletError {
    #[error("Mnemonic Error: {0}")]
    Mnemonic(#[from] MnemonicError),

    #[error("Cryptography Error: {0}")]
    Crypto(#[from] CryptoError),

    #[error("Storage Error: {0}")]
    Storage(#[from] StorageError),

    #[error("Secure random source unavailable: {0}")]
    EntropySourceUnavailable(String),

    #[error("Unsupported chain: coin type {0} (supported: 501, 60)")]
    UnsupportedChain(u32),

    #[error("No mnemonic present. Generate or import a wallet first.")]
    NoMnemonic,

    #[error("A mnemonic is already active. Clear all wallets before generating a new one.")]
    AlreadyInitialized,

    #[error("No wallet at position {position} (wallet count: {len})")]
    InvalidPosition { position: usize, len: usize },

    #[error("Configuration Error: {0}")]
    Config(String),
}

impl WalletError {
    /// `true` for every failure that means "this phrase is not a valid BIP-39 mnemonic".
    pub fn is_invalid_mnemonic(&self) -> bool {
        matches!(self, WalletError::Mnemonic(e) if !matches!(e, MnemonicError::UnsupportedStrength(_)))
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MnemonicError {
    #[error("Invalid word count: {0}. Expected 12, 15, 18, 21 or 24 words.")]
    InvalidWordCount(usize),

    #[error("Word '{0}' not found in the BIP39 wordlist.")]
    UnknownWord(String),

    #[error("Checksum validation failed.")]
    ChecksumFailed,

    #[error("Unsupported entropy strength: {0} bits. Expected 128, 192 or 256.")]
    UnsupportedStrength(u32),

    #[error("BIP39 internal error: {0}")]
    Bip39Error(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CryptoError {
    #[error("Key derivation failed: {0}")]
    DerivationFailed(String),

    #[error("Account index {0} is out of range for hardened derivation")]
    IndexOutOfRange(u32),

    #[error("Derived secp256k1 scalar is outside [1, n-1]")]
    InvalidScalar,

    #[error("Invalid key format: {0}")]
    InvalidKeyFormat(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("Failed to write '{key}': {reason}")]
    WriteFailed { key: String, reason: String },

    #[error("Failed to encode '{key}': {reason}")]
    Encode { key: String, reason: String },
}
