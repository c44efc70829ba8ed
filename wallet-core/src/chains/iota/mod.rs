// wallet-core/src/chains/iota/mod.rs

//! IOTA Support
//!
//! - **Converter**: balanced ternary trytes ⇄ trits.
//! - **Kerl**: Keccak-384 sponge over 243-trit chunks via [`Kerl`].
//! - **Address Derivation**: WOTS key → digests → address + checksum via [`IotaAddress`].
//! - **Protocol**: 81-tryte symbol seed as secret via [`IotaProtocol`].

pub mod address;
pub mod converter;
pub mod kerl;
pub mod protocol;

pub use address::IotaAddress;
pub use kerl::Kerl;
pub use protocol::IotaProtocol;

use super::{BackendResult, KeyDerivationBackend};
use crate::error::CryptoError;
use crate::protocol::{Network, Technology};

/// IOTA backend: tryte seed → address
///
/// Address không phụ thuộc network.
#[derive(Debug, Clone, Copy)]
pub struct IotaBackend {
    pub security: u8,
    pub index: u32,
    pub checksum: bool,
}

impl Default for IotaBackend {
    fn default() -> Self {
        Self {
            security: address::DEFAULT_SECURITY,
            index: 0,
            checksum: true,
        }
    }
}

impl KeyDerivationBackend for IotaBackend {
    fn technology(&self) -> Technology {
        Technology::Iota
    }

    fn derive_address(&self, seed: &[u8], _network: Network) -> BackendResult<String> {
        let seed = std::str::from_utf8(seed).map_err(|_| {
            CryptoError::KeyDerivationFailed("seed is not tryte text".to_string())
        })?;
        IotaAddress::generate(seed, self.index, self.security, self.checksum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SEED: &str =
        "WZGTVNXWXTJ9SBNRYWAPZW99DPZQTDDMTRXZYOX9XRMBY9VFRGNTYGAGSJSRGDLOYCINVANLXQJGHYVUG";
    const TEST_ADDRESS: &str = "RCJXXBJJGBXOCCRGVZYITIBTVRGYQZDTJIZELVWTYJNHFLKFQNYGCJNXLWXPJDCICQJBCGGUOVNUTQGKYFZZSOCJED";

    #[test]
    fn test_backend_address() {
        let address = IotaBackend::default()
            .derive_address(TEST_SEED.as_bytes(), Network::Production)
            .unwrap();
        assert_eq!(address, TEST_ADDRESS);
    }

    #[test]
    fn test_backend_rejects_invalid_seed() {
        let backend = IotaBackend::default();
        assert!(matches!(
            backend.derive_address(b"not a seed", Network::Test),
            Err(CryptoError::KeyDerivationFailed(_))
        ));
        assert!(backend.derive_address(&[0xff, 0xfe], Network::Test).is_err());
    }

    #[test]
    fn test_no_secret_from_seed() {
        assert!(IotaBackend::default().derive_secret_from_seed(&[0u8; 64]).is_err());
    }
}
