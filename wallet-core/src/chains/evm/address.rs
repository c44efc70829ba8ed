// wallet-core/src/chains/evm/address.rs
//
// EVM Address Module - Keccak-256 address derivation
// Wallet file lưu address dạng lowercase hex (không EIP-55 checksum)

use crate::error::CryptoError;
use k256::{elliptic_curve::sec1::ToEncodedPoint, SecretKey};
use tiny_keccak::{Hasher, Keccak};
use zeroize::{Zeroize, Zeroizing};

/// Ethereum account address: `0x` + 40 lowercase hex chars.
///
/// Stateless; hash và public key bytes tạm được zeroize sau khi dùng.
pub struct EvmAddress;

impl EvmAddress {
    /// 20 byte cuối của Keccak-256(uncompressed pubkey không có prefix 0x04)
    pub fn derive_bytes(priv_key: &[u8]) -> Result<[u8; 20], CryptoError> {
        let secret_key = Self::parse_private_key(priv_key)?;

        let point = Zeroizing::new(secret_key.public_key().to_encoded_point(false));

        let mut digest = [0u8; 32];
        let mut keccak = Keccak::v256();
        keccak.update(&point.as_bytes()[1..]);
        keccak.finalize(&mut digest);

        let mut out = [0u8; 20];
        out.copy_from_slice(&digest[12..]);
        digest.zeroize();
        Ok(out)
    }

    /// Derive lowercase `0x`-prefixed address string
    ///
    /// # Returns
    /// `"0x7612ba8356851158ca0d21b23a3322dbf81c2938"`
    #[inline]
    pub fn derive(priv_key: &[u8]) -> Result<String, CryptoError> {
        Ok(Self::format(&Self::derive_bytes(priv_key)?))
    }

    #[inline]
    pub fn format(address: &[u8; 20]) -> String {
        format!("0x{}", hex::encode(address))
    }

    /// Parse & validate secp256k1 scalar (non-zero, < n)
    pub fn parse_private_key(priv_key: &[u8]) -> Result<SecretKey, CryptoError> {
        SecretKey::from_slice(priv_key).map_err(|e| {
            CryptoError::KeyDerivationFailed(format!("Invalid secp256k1 private key: {}", e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // SHA-256 của seed từ "history suit seat ..." + "test_pass_phrase"
    const WALLET_SECRET: &str =
        "b0507b391821757ffc8b3cd7ee8dd1b96f7cb05f7fcce2fb650ce1804159f7b0";
    const WALLET_ADDRESS: &str = "0x7612ba8356851158ca0d21b23a3322dbf81c2938";

    // Hardhat dev key #0
    const DEV_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const DEV_ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

    #[test]
    fn test_wallet_secret_address() {
        let key = hex::decode(WALLET_SECRET).unwrap();
        assert_eq!(EvmAddress::derive(&key).unwrap(), WALLET_ADDRESS);
        assert_eq!(
            EvmAddress::format(&EvmAddress::derive_bytes(&key).unwrap()),
            WALLET_ADDRESS
        );
    }

    #[test]
    fn test_output_is_lowercase() {
        let key = hex::decode(DEV_KEY).unwrap();
        let address = EvmAddress::derive(&key).unwrap();
        assert_eq!(address, DEV_ADDRESS.to_lowercase());
    }

    #[test]
    fn test_rejects_bad_scalars() {
        for key in [&[][..], &[7u8; 16][..], &[7u8; 33][..], &[0u8; 32][..], &[0xffu8; 32][..]] {
            assert!(matches!(
                EvmAddress::derive(key),
                Err(CryptoError::KeyDerivationFailed(_))
            ));
        }
    }
}
