// wallet-core/src/crypto/key_deriver/secp256k1.rs
//
// secp256k1 Key Derivation: BIP-32 / BIP-44
//
// m/44'/0'/account'/change/index, HMAC-SHA512 child keys (bip32 crate)

use super::{validate_seed, DerivedKey};
use crate::error::CryptoError;
use bip32::{ChildNumber, DerivationPath, XPrv};
use std::ops::Range;
use std::str::FromStr;
use zeroize::Zeroizing;

/// BIP-32 trên secp256k1, dùng cho Bitcoin receive addresses.
///
/// Private key ra ngoài luôn nằm trong `Zeroizing`; các `XPrv` trung gian
/// chỉ sống trong scope của một lần gọi.
pub struct Secp256k1Deriver;

impl Secp256k1Deriver {
    /// Key tại `path` (e.g. `"m/44'/0'/0'/0/0"`) từ BIP-39 seed.
    pub fn derive(seed: &[u8], path: &str) -> Result<DerivedKey, CryptoError> {
        let xprv = Self::walk(Self::master(seed)?, Self::parse_path(path)?)?;
        Ok(Self::to_derived(&xprv, path.to_string()))
    }

    /// Keys `chain_path/i` cho mọi `i` trong `indices`.
    ///
    /// `chain_path` chỉ được walk một lần; mỗi index là một bước non-hardened.
    pub fn derive_batch(
        seed: &[u8],
        chain_path: &str,
        indices: Range<u32>,
    ) -> Result<Vec<DerivedKey>, CryptoError> {
        let chain = Self::walk(Self::master(seed)?, Self::parse_path(chain_path)?)?;

        indices
            .map(|index| {
                let step = ChildNumber::new(index, false).map_err(|e| {
                    CryptoError::KeyDerivationFailed(format!("Index {} out of range: {}", index, e))
                })?;
                let xprv = Self::step(&chain, step)?;
                Ok(Self::to_derived(&xprv, format!("{}/{}", chain_path, index)))
            })
            .collect()
    }

    fn parse_path(path: &str) -> Result<DerivationPath, CryptoError> {
        DerivationPath::from_str(path).map_err(|e| {
            CryptoError::KeyDerivationFailed(format!("Malformed derivation path '{}': {}", path, e))
        })
    }

    fn master(seed: &[u8]) -> Result<XPrv, CryptoError> {
        validate_seed(seed)?;
        XPrv::new(seed)
            .map_err(|e| CryptoError::KeyDerivationFailed(format!("Master key: {}", e)))
    }

    fn walk(root: XPrv, path: DerivationPath) -> Result<XPrv, CryptoError> {
        path.into_iter().try_fold(root, |xprv, step| Self::step(&xprv, step))
    }

    fn step(parent: &XPrv, step: ChildNumber) -> Result<XPrv, CryptoError> {
        parent
            .derive_child(step)
            .map_err(|e| CryptoError::KeyDerivationFailed(format!("Child {}: {}", step, e)))
    }

    fn to_derived(xprv: &XPrv, path: String) -> DerivedKey {
        let private_key: [u8; 32] = xprv.private_key().to_bytes().into();
        DerivedKey {
            private_key: Zeroizing::new(private_key),
            public_key: xprv.public_key().to_bytes(),
            path,
        }
    }
}
