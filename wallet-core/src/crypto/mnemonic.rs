// wallet-core/src/crypto/mnemonic.rs
//
// Mnemonic Module - BIP-39 recovery phrases
// Chuẩn: BIP-39 (Mnemonic), PBKDF2-HMAC-SHA512 x2048 (Seed Derivation)

use crate::error::{MnemonicError, WalletError, WalletResult};
use bip39::Mnemonic;
use rand::{rngs::OsRng, CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// 64-byte BIP-39 seed, zeroized on drop. Never persisted.
pub type Seed = Zeroizing<[u8; 64]>;

/// Entropy strength accepted for newly generated mnemonics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum EntropyStrength {
    /// 12 words
    #[default]
    Bits128,
    /// 18 words
    Bits192,
    /// 24 words
    Bits256,
}

impl EntropyStrength {
    #[inline]
    pub const fn bits(self) -> u32 {
        match self {
            EntropyStrength::Bits128 => 128,
            EntropyStrength::Bits192 => 192,
            EntropyStrength::Bits256 => 256,
        }
    }

    #[inline]
    pub const fn entropy_bytes(self) -> usize {
        (self.bits() / 8) as usize
    }

    #[inline]
    pub const fn word_count(self) -> usize {
        // 3 words per 32 bits of entropy (checksum included)
        (self.bits() as usize) * 3 / 32
    }
}

impl TryFrom<u32> for EntropyStrength {
    type Error = MnemonicError;

    fn try_from(bits: u32) -> Result<Self, Self::Error> {
        match bits {
            128 => Ok(EntropyStrength::Bits128),
            192 => Ok(EntropyStrength::Bits192),
            256 => Ok(EntropyStrength::Bits256),
            other => Err(MnemonicError::UnsupportedStrength(other)),
        }
    }
}

impl From<EntropyStrength> for u32 {
    fn from(strength: EntropyStrength) -> Self {
        strength.bits()
    }
}

/// Wallet Mnemonic - validated BIP-39 phrase
///
/// # Security Architecture
/// - **ZeroizeOnDrop**: Phrase được ghi đè bằng 0 khi struct bị drop
/// - **CSPRNG only**: `generate` dùng `OsRng`; `generate_with` nhận bất kỳ `CryptoRng`
/// - **No Debug Leak**: Custom Debug impl không hiển thị phrase
///
/// Một `WalletMnemonic` luôn hợp lệ: chỉ tạo được qua `generate*` hoặc `from_phrase`.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct WalletMnemonic {
    phrase: String,
    word_count: usize,
}

// Custom Debug - KHÔNG BAO GIỜ hiển thị mnemonic phrase
impl std::fmt::Debug for WalletMnemonic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletMnemonic")
            .field("word_count", &self.word_count)
            .field("phrase", &"[REDACTED]")
            .finish()
    }
}

impl WalletMnemonic {
    // =========================================================================
    // CONSTRUCTORS
    // =========================================================================

    /// Generate a fresh mnemonic from the operating system's CSPRNG.
    pub fn generate(strength: EntropyStrength) -> WalletResult<Self> {
        Self::generate_with(&mut OsRng, strength)
    }

    /// Generate a fresh mnemonic from a caller-supplied secure random source.
    ///
    /// # Errors
    /// [`WalletError::EntropySourceUnavailable`] nếu nguồn random không trả về entropy.
    pub fn generate_with<R>(rng: &mut R, strength: EntropyStrength) -> WalletResult<Self>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        let entropy_size = strength.entropy_bytes();

        // Stack-allocated entropy buffer (max 32 bytes)
        let mut entropy = Zeroizing::new([0u8; 32]);
        rng.try_fill_bytes(&mut entropy[..entropy_size])
            .map_err(|e| WalletError::EntropySourceUnavailable(e.to_string()))?;

        let mnemonic = Mnemonic::from_entropy(&entropy[..entropy_size])
            .map_err(|e| WalletError::Mnemonic(MnemonicError::Bip39Error(e.to_string())))?;

        Ok(Self {
            phrase: mnemonic.to_string(),
            word_count: strength.word_count(),
        })
    }

    /// Khôi phục mnemonic từ phrase có sẵn
    ///
    /// # Validation
    /// - Kiểm tra số lượng words (12, 15, 18, 21, 24)
    /// - Kiểm tra từng word có trong BIP-39 wordlist
    /// - Kiểm tra checksum
    pub fn from_phrase(phrase: &str) -> WalletResult<Self> {
        let normalized = phrase.split_whitespace().collect::<Vec<_>>();
        let count = normalized.len();

        if !matches!(count, 12 | 15 | 18 | 21 | 24) {
            return Err(WalletError::Mnemonic(MnemonicError::InvalidWordCount(
                count,
            )));
        }

        let normalized_phrase = normalized.join(" ");
        Mnemonic::parse(&normalized_phrase).map_err(|e| match e {
            bip39::Error::UnknownWord(i) => WalletError::Mnemonic(MnemonicError::UnknownWord(
                normalized.get(i).map(|w| w.to_string()).unwrap_or_default(),
            )),
            bip39::Error::InvalidChecksum => WalletError::Mnemonic(MnemonicError::ChecksumFailed),
            bip39::Error::BadWordCount(n) => {
                WalletError::Mnemonic(MnemonicError::InvalidWordCount(n))
            }
            other => WalletError::Mnemonic(MnemonicError::Bip39Error(other.to_string())),
        })?;

        Ok(Self {
            phrase: normalized_phrase,
            word_count: count,
        })
    }

    // =========================================================================
    // GETTERS
    // =========================================================================

    /// Lấy mnemonic phrase
    ///
    /// # Warning
    /// Cẩn thận khi hiển thị hoặc log giá trị này!
    #[inline]
    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    #[inline]
    pub fn word_count(&self) -> usize {
        self.word_count
    }

    /// Lấy danh sách các words (cho display layer)
    pub fn words(&self) -> Vec<&str> {
        self.phrase.split_whitespace().collect()
    }

    /// Strength (bit) của mnemonic
    pub fn strength_bits(&self) -> usize {
        self.word_count * 32 / 3
    }

    // =========================================================================
    // SEED DERIVATION
    // =========================================================================

    /// Tạo seed từ mnemonic (PBKDF2-HMAC-SHA512, 2048 rounds)
    ///
    /// Pure function: cùng phrase + passphrase luôn cho cùng seed.
    /// Passphrase rỗng là mặc định.
    pub fn to_seed(&self, passphrase: &str) -> WalletResult<Seed> {
        let mnemonic = Mnemonic::parse(&self.phrase)
            .map_err(|_| WalletError::Mnemonic(MnemonicError::ChecksumFailed))?;
        Ok(Zeroizing::new(mnemonic.to_seed(passphrase)))
    }

    // =========================================================================
    // VALIDATION
    // =========================================================================

    /// Kiểm tra xem phrase có hợp lệ không (word count, wordlist, checksum)
    #[inline]
    pub fn validate(phrase: &str) -> bool {
        Self::from_phrase(phrase).is_ok()
    }

    /// Kiểm tra một từ có trong BIP-39 English wordlist không
    pub fn is_valid_word(word: &str) -> bool {
        bip39::Language::English.find_word(word).is_some()
    }
}

/// Validate `phrase` and stretch it into a seed in one step.
pub fn to_seed(phrase: &str, passphrase: &str) -> WalletResult<Seed> {
    WalletMnemonic::from_phrase(phrase)?.to_seed(passphrase)
}

// =============================================================================
// UNIT TESTS
// =============================================================================
