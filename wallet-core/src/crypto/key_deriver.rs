// wallet-core/src/crypto/key_deriver.rs
//
// Key Derivation - SLIP-0010 hardened derivation
//
// Algorithm: HMAC-SHA512, master secret "ed25519 seed", chỉ hardened child.
// Reference: https://github.com/satoshilabs/slips/blob/master/slip-0010.md
//
// Cả hai chain (Solana và Ethereum) đều lấy raw 32-byte key từ cùng thuật toán
// này; chain-specific algebra (ed25519 keypair / secp256k1 scalar) nằm ở
// `crate::chains`. Tất cả levels trong path PHẢI là hardened (có dấu ').

use crate::crypto::paths::HARDENED_OFFSET;
use crate::error::{CryptoError, WalletError, WalletResult};
use hmac::{Hmac, Mac};
use sha2::Sha512;
use zeroize::{Zeroize, Zeroizing};

type HmacSha512 = Hmac<Sha512>;

/// Raw 32-byte key at the end of a derivation path, auto-zeroize on drop
pub type RawDerivedKey = Zeroizing<[u8; 32]>;

/// Hardened hierarchical key deriver
///
/// - Master: `I = HMAC-SHA512(Key = "ed25519 seed", Data = seed)`
/// - Child:  `I = HMAC-SHA512(Key = chain_code, Data = 0x00 || key || ser32(index | 2^31))`
/// - `IL` là key mới, `IR` là chain code mới
///
/// Caller chỉ nhận key cuối cùng; chain code trung gian bị zeroize.
pub struct KeyDeriver;

impl KeyDeriver {
    /// SLIP-0010 master key seed constant
    const MASTER_SECRET: &'static [u8] = b"ed25519 seed";

    /// Derive 32-byte key từ seed + path
    ///
    /// # Arguments
    /// * `seed` - BIP-39 seed (64 bytes; BIP-32 cho phép 16..=64)
    /// * `path` - e.g. "m/44'/501'/0'/0'", mọi level phải hardened
    pub fn derive(seed: &[u8], path: &str) -> WalletResult<RawDerivedKey> {
        Self::validate_seed(seed)?;
        let indices = Self::parse_path(path)?;

        let (mut key, mut chain_code) = Self::master_key_generate(seed)?;

        for index in &indices {
            let (child_key, child_chain) = Self::child_key_derive(&key, &chain_code, *index)?;
            key.zeroize();
            chain_code.zeroize();
            key = child_key;
            chain_code = child_chain;
        }

        chain_code.zeroize();

        Ok(Zeroizing::new(key))
    }

    fn master_key_generate(seed: &[u8]) -> WalletResult<([u8; 32], [u8; 32])> {
        let mut mac = HmacSha512::new_from_slice(Self::MASTER_SECRET).map_err(|e| {
            WalletError::Crypto(CryptoError::DerivationFailed(format!(
                "HMAC init failed: {}",
                e
            )))
        })?;
        mac.update(seed);
        Ok(Self::split(mac))
    }

    /// Data = 0x00 || parent_key || ser32(index + 0x80000000)
    fn child_key_derive(
        parent_key: &[u8; 32],
        parent_chain_code: &[u8; 32],
        index: u32,
    ) -> WalletResult<([u8; 32], [u8; 32])> {
        let mut mac = HmacSha512::new_from_slice(parent_chain_code).map_err(|e| {
            WalletError::Crypto(CryptoError::DerivationFailed(format!(
                "HMAC init failed: {}",
                e
            )))
        })?;

        let hardened_index = index | HARDENED_OFFSET;
        mac.update(&[0x00]);
        mac.update(parent_key);
        mac.update(&hardened_index.to_be_bytes());

        Ok(Self::split(mac))
    }

    /// Finalize HMAC và tách thành (IL, IR)
    fn split(mac: HmacSha512) -> ([u8; 32], [u8; 32]) {
        let mut buf = Zeroizing::new([0u8; 64]);
        buf.copy_from_slice(&mac.finalize().into_bytes());

        let mut key = [0u8; 32];
        let mut chain_code = [0u8; 32];
        key.copy_from_slice(&buf[..32]);
        chain_code.copy_from_slice(&buf[32..]);
        (key, chain_code)
    }

    /// Parse derivation path thành list of indices
    ///
    /// Input: "m/44'/501'/0'/0'" -> Output: [44, 501, 0, 0]
    pub(crate) fn parse_path(path: &str) -> WalletResult<Vec<u32>> {
        let path = path.trim();

        let segments = path.strip_prefix("m/").ok_or_else(|| {
            WalletError::Crypto(CryptoError::DerivationFailed(format!(
                "Path must start with 'm/': {}",
                path
            )))
        })?;

        if segments.is_empty() {
            return Err(WalletError::Crypto(CryptoError::DerivationFailed(
                "Empty derivation path".to_string(),
            )));
        }

        let mut indices = Vec::new();
        for segment in segments.split('/') {
            let segment = segment.trim();

            let num_str = segment
                .strip_suffix('\'')
                .or_else(|| segment.strip_suffix('h'))
                .ok_or_else(|| {
                    WalletError::Crypto(CryptoError::DerivationFailed(format!(
                        "All levels must be hardened (add '). Invalid segment: '{}'",
                        segment
                    )))
                })?;

            let index: u32 = num_str.parse().map_err(|e| {
                WalletError::Crypto(CryptoError::DerivationFailed(format!(
                    "Invalid index '{}': {}",
                    num_str, e
                )))
            })?;

            if index >= HARDENED_OFFSET {
                return Err(WalletError::Crypto(CryptoError::IndexOutOfRange(index)));
            }

            indices.push(index);
        }

        Ok(indices)
    }

    /// Validate path (tất cả levels phải hardened)
    pub fn is_valid_path(path: &str) -> bool {
        Self::parse_path(path).is_ok()
    }

    #[inline]
    fn validate_seed(seed: &[u8]) -> WalletResult<()> {
        if !(16..=64).contains(&seed.len()) {
            return Err(WalletError::Crypto(CryptoError::DerivationFailed(format!(
                "Invalid seed length: expected 16..=64 bytes, got {}",
                seed.len()
            ))));
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
