// wallet-core/src/chains/solana.rs
//
// Solana key algebra (`coin_type = 501`, Ed25519)
//
// Raw 32 bytes = Ed25519 seed. Private key = base-58 của 64-byte keypair
// (seed || public key), public key = base-58 của 32-byte verifying key.

use super::ChainKeyAlgebra;
use crate::crypto::ChainId;
use crate::error::WalletResult;
use ed25519_dalek::SigningKey;
use zeroize::Zeroizing;

pub struct Ed25519Chain;

impl Ed25519Chain {
    /// 32-byte public key in base-58
    pub fn is_valid_public_key(encoded: &str) -> bool {
        matches!(bs58::decode(encoded).into_vec(), Ok(bytes) if bytes.len() == 32)
    }
}

impl ChainKeyAlgebra for Ed25519Chain {
    type Keypair = SigningKey;

    const CHAIN: ChainId = ChainId::Solana;

    /// Ed25519 chấp nhận mọi 32 bytes làm seed
    fn keypair_from_seed(raw: &[u8; 32]) -> WalletResult<Self::Keypair> {
        Ok(SigningKey::from_bytes(raw))
    }

    fn encode_public(keypair: &Self::Keypair) -> String {
        bs58::encode(keypair.verifying_key().to_bytes()).into_string()
    }

    fn encode_private(keypair: &Self::Keypair) -> String {
        let keypair_bytes = Zeroizing::new(keypair.to_keypair_bytes());
        bs58::encode(&*keypair_bytes).into_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // SLIP-0010 ed25519 test vector 1, chain m/0H
    const VECTOR_PRIVATE: &str = "68e0fe46dfb67e368c75379acec591dad19df3cde26e63b93a8e704f1dade7a3";
    const VECTOR_PUBLIC: &str = "8c8a13df77a28f3445213a0f432fde644acaa215fc72dcdf300d5efaa85d350c";

    fn vector_seed() -> [u8; 32] {
        hex::decode(VECTOR_PRIVATE).unwrap().try_into().unwrap()
    }

    #[test]
    fn test_public_key_matches_vector() {
        let wallet = Ed25519Chain::wallet_from_seed(&vector_seed()).unwrap();
        let public = bs58::decode(&wallet.public_key).into_vec().unwrap();
        assert_eq!(hex::encode(public), VECTOR_PUBLIC);
        assert!(Ed25519Chain::is_valid_public_key(&wallet.public_key));
    }

    #[test]
    fn test_private_key_is_seed_then_public() {
        let wallet = Ed25519Chain::wallet_from_seed(&vector_seed()).unwrap();
        let secret = bs58::decode(&wallet.private_key).into_vec().unwrap();
        assert_eq!(secret.len(), 64);
        assert_eq!(hex::encode(&secret[..32]), VECTOR_PRIVATE);
        assert_eq!(hex::encode(&secret[32..]), VECTOR_PUBLIC);
    }

    #[test]
    fn test_is_valid_public_key() {
        assert!(Ed25519Chain::is_valid_public_key(
            "HAgk14JpMQLgt6rVgv7cBQFJWFto5Dqxi472uT3DKpqk"
        ));
        assert!(!Ed25519Chain::is_valid_public_key("0OIl"));
        assert!(!Ed25519Chain::is_valid_public_key("abc"));
    }
}
