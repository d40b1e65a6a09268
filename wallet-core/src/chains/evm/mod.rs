// wallet-core/src/chains/evm/mod.rs

//! Ethereum / EVM key algebra (`coin_type = 60`, secp256k1)
//!
//! - **Private key**: the derived 32 bytes as a secp256k1 scalar, lowercase hex without `0x`.
//! - **Public key**: EIP-55 checksummed 20-byte address via [`EvmAddress`].

pub mod address;

pub use address::EvmAddress;

use super::ChainKeyAlgebra;
use crate::crypto::ChainId;
use crate::error::{CryptoError, WalletError, WalletResult};
use k256::{FieldBytes, SecretKey};
use zeroize::Zeroizing;

pub struct Secp256k1Chain;

impl ChainKeyAlgebra for Secp256k1Chain {
    type Keypair = SecretKey;

    const CHAIN: ChainId = ChainId::Ethereum;

    /// Scalar phải nằm trong `[1, n-1]`; không reduce mod n.
    fn keypair_from_seed(raw: &[u8; 32]) -> WalletResult<Self::Keypair> {
        SecretKey::from_bytes(FieldBytes::from_slice(raw))
            .map_err(|_| WalletError::Crypto(CryptoError::InvalidScalar))
    }

    fn encode_public(keypair: &Self::Keypair) -> String {
        EvmAddress::from_public_key(&keypair.public_key())
    }

    fn encode_private(keypair: &Self::Keypair) -> String {
        let key_bytes: Zeroizing<[u8; 32]> = Zeroizing::new(keypair.to_bytes().into());
        hex::encode(&*key_bytes)
    }
}
