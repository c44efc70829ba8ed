// wallet-core/src/chains/evm/mod.rs

//! Ethereum Virtual Machine (EVM) Chain Support
//!
//! - **Address Derivation**: lowercase Keccak-256 addresses via [`EvmAddress`].
//! - **Backend**: secret = SHA-256 of the BIP-39 seed via [`EvmBackend`].
//! - **Protocol**: passphrase-salted seed, single private key via [`EthereumProtocol`].

pub mod address;
pub mod protocol;

pub use address::EvmAddress;
pub use protocol::EthereumProtocol;

use super::{BackendResult, KeyDerivationBackend};
use crate::protocol::{Network, Technology};
use sha2::{Digest, Sha256};
use zeroize::{Zeroize, Zeroizing};

/// Ethereum backend
///
/// # Flow:  Seed (64B) → SHA-256 → Private Key (32B, hex secret) → Address
///
/// Address không phụ thuộc network.
#[derive(Debug, Clone, Copy, Default)]
pub struct EvmBackend;

impl KeyDerivationBackend for EvmBackend {
    fn technology(&self) -> Technology {
        Technology::Ethereum
    }

    fn derive_address(&self, private_key: &[u8], _network: Network) -> BackendResult<String> {
        EvmAddress::derive(private_key)
    }

    fn derive_secret_from_seed(&self, seed: &[u8]) -> BackendResult<Zeroizing<String>> {
        let mut key: [u8; 32] = Sha256::digest(seed).into();
        let result = EvmAddress::parse_private_key(&key).map(|_| Zeroizing::new(hex::encode(key)));
        key.zeroize();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{MnemonicWords, SeedDeriver};

    const TEST_MNEMONIC: &str =
        "history suit seat regular toe valid circle public issue degree river vendor";
    const TEST_SECRET: &str = "b0507b391821757ffc8b3cd7ee8dd1b96f7cb05f7fcce2fb650ce1804159f7b0";
    const TEST_ADDRESS: &str = "0x7612ba8356851158ca0d21b23a3322dbf81c2938";

    #[test]
    fn test_secret_from_seed() {
        let words = MnemonicWords::from_phrase(TEST_MNEMONIC);
        let seed = SeedDeriver::default()
            .derive_seed(words.as_slice(), "test_pass_phrase")
            .unwrap();
        let secret = EvmBackend.derive_secret_from_seed(&seed).unwrap();
        assert_eq!(&*secret, TEST_SECRET);
    }

    #[test]
    fn test_address_from_secret() {
        let key = hex::decode(TEST_SECRET).unwrap();
        for network in Network::ALL {
            assert_eq!(EvmBackend.derive_address(&key, network).unwrap(), TEST_ADDRESS);
        }
    }
}
