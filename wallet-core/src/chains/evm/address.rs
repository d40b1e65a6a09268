// wallet-core/src/chains/evm/address.rs
//
// EVM Address Module
// EIP-55 (Checksum), Keccak-256, secp256k1

use crate::error::{CryptoError, WalletError, WalletResult};
use alloy::primitives::Address;
use k256::{elliptic_curve::sec1::ToEncodedPoint, PublicKey};
use tiny_keccak::{Hasher, Keccak};
use zeroize::Zeroize;

/// EVM Address Generator
///
/// # Flow:  Private Key (32B) → Public Key (64B) → Keccak256 → Address (20B)
pub struct EvmAddress;

impl EvmAddress {
    // =========================================================================
    // CORE: Public Key → Address Bytes (20 bytes)
    // =========================================================================

    /// # Algorithm (Ethereum Yellow Paper)
    /// 1. `pub_key` → uncompressed SEC1 (65B)
    /// 2. Bỏ prefix byte 0x04 → `pub_key_raw` (64B)
    /// 3. Keccak-256(`pub_key_raw`) → `hash` (32B)
    /// 4. `hash[12..32]` → `address` (20B)
    pub fn bytes_from_public_key(public_key: &PublicKey) -> [u8; 20] {
        let encoded = public_key.to_encoded_point(false);
        let pub_key_raw = &encoded.as_bytes()[1..];

        let mut hasher = Keccak::v256();
        let mut hash = [0u8; 32];
        hasher.update(pub_key_raw);
        hasher.finalize(&mut hash);

        let mut address = [0u8; 20];
        address.copy_from_slice(&hash[12..]);
        hash.zeroize();

        address
    }

    /// EIP-55 checksummed address, e.g. `"0xAb5801a7D398351b8bE11C439e05C5B3259aeC9B"`
    #[inline]
    pub fn from_public_key(public_key: &PublicKey) -> String {
        Address::from_slice(&Self::bytes_from_public_key(public_key)).to_checksum(None)
    }

    // =========================================================================
    // UTILITIES
    // =========================================================================

    /// `0x` prefix + 40 hex chars, và EIP-55 checksum nếu mixed case
    pub fn is_valid(address: &str) -> bool {
        let Some(body) = address.strip_prefix("0x") else {
            return false;
        };
        if body.len() != 40 || address.parse::<Address>().is_err() {
            return false;
        }
        let has_lower = body.chars().any(|c| c.is_ascii_lowercase());
        let has_upper = body.chars().any(|c| c.is_ascii_uppercase());
        if has_lower && has_upper {
            return Address::parse_checksummed(address, None).is_ok();
        }
        true
    }

    /// Normalize về EIP-55 checksum format
    pub fn to_checksum(address: &str) -> WalletResult<String> {
        let addr: Address = address.parse().map_err(|_| {
            WalletError::Crypto(CryptoError::InvalidKeyFormat(
                "Invalid Ethereum address format".to_string(),
            ))
        })?;
        Ok(addr.to_checksum(None))
    }

    /// So sánh 2 address (case-insensitive)
    #[inline]
    pub fn equals(addr1: &str, addr2: &str) -> bool {
        match (addr1.parse::<Address>(), addr2.parse::<Address>()) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use k256::SecretKey;

    const TEST_PRIVATE_KEY: &str =
        "501c797c4b1fdfa88fb7efdf7c9871b8e0f46dbc44259e3e270e0d4c938165f5";
    const TEST_ADDRESS: &str = "0xb611C31e4284BF7A7daD3296e62880F14b3b15DD";

    // Anvil/Hardhat account #0
    const ANVIL_PRIVATE_KEY: &str =
        "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const ANVIL_ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

    fn address_of(priv_hex: &str) -> String {
        let raw = hex::decode(priv_hex).unwrap();
        EvmAddress::from_public_key(&SecretKey::from_slice(&raw).unwrap().public_key())
    }

    #[test]
    fn test_known_addresses() {
        assert_eq!(address_of(TEST_PRIVATE_KEY), TEST_ADDRESS);
        assert_eq!(address_of(ANVIL_PRIVATE_KEY), ANVIL_ADDRESS);
    }

    #[test]
    fn test_bytes_match_checksum_string() {
        let raw = hex::decode(TEST_PRIVATE_KEY).unwrap();
        let public_key = SecretKey::from_slice(&raw).unwrap().public_key();
        let bytes = EvmAddress::bytes_from_public_key(&public_key);
        let address_hex = format!("0x{}", hex::encode(bytes));
        assert!(EvmAddress::equals(&address_hex, TEST_ADDRESS));
        assert_eq!(EvmAddress::from_public_key(&public_key), TEST_ADDRESS);
    }

    #[test]
    fn test_is_valid() {
        assert!(EvmAddress::is_valid(TEST_ADDRESS));
        assert!(EvmAddress::is_valid(ANVIL_ADDRESS));
        assert!(EvmAddress::is_valid(
            "0xdead000000000000000000000000000000000000"
        ));

        assert!(!EvmAddress::is_valid("0xinvalid"));
        assert!(!EvmAddress::is_valid("not an address"));
        assert!(!EvmAddress::is_valid("0x123"));
        assert!(!EvmAddress::is_valid(""));
        // Mixed case with a broken checksum
        assert!(!EvmAddress::is_valid("0xB611C31e4284BF7A7daD3296e62880F14b3b15DD"));
    }

    #[test]
    fn test_to_checksum() {
        let lowercase = "0xb611c31e4284bf7a7dad3296e62880f14b3b15dd";
        assert_eq!(EvmAddress::to_checksum(lowercase).unwrap(), TEST_ADDRESS);
    }

    #[test]
    fn test_equals() {
        let upper = "0xABCD1234ABCD1234ABCD1234ABCD1234ABCD1234";
        let lower = "0xabcd1234abcd1234abcd1234abcd1234abcd1234";
        assert!(EvmAddress::equals(upper, lower));
        assert!(!EvmAddress::equals(upper, TEST_ADDRESS));
    }
}
