// wallet-core/src/chains/bitcoin/address.rs
//
// Bitcoin Address Module - Legacy P2PKH (1... / m..., n...)
// Hash160 = RIPEMD-160(SHA-256(pubkey)), Base58Check

use crate::protocol::Network;
use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

/// Bitcoin P2PKH Address Generator
///
/// # Flow:  Compressed Public Key (33B) → SHA-256 → RIPEMD-160 → version || hash160 → Base58Check
pub struct BitcoinAddress;

impl BitcoinAddress {
    /// Mainnet P2PKH version byte
    pub const MAINNET_VERSION: u8 = 0x00;
    /// Testnet P2PKH version byte
    pub const TESTNET_VERSION: u8 = 0x6f;

    /// Version byte theo network. Unit dùng testnet encoding.
    #[inline]
    pub const fn version_byte(network: Network) -> u8 {
        match network {
            Network::Production => Self::MAINNET_VERSION,
            Network::Test | Network::Unit => Self::TESTNET_VERSION,
        }
    }

    /// RIPEMD-160(SHA-256(data))
    pub fn hash160(data: &[u8]) -> [u8; 20] {
        let sha = Sha256::digest(data);
        Ripemd160::digest(sha).into()
    }

    /// Base58Check P2PKH address từ compressed public key
    pub fn from_public_key(public_key: &[u8; 33], network: Network) -> String {
        bs58::encode(Self::hash160(public_key))
            .with_check_version(Self::version_byte(network))
            .into_string()
    }
}
