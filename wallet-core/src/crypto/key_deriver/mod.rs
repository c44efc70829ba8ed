// wallet-core/src/crypto/key_deriver/mod.rs
//
// Key Derivation Engine - BIP-32 secp256k1
//
// ┌──────────────────────────────────────────┐
// │  Seed (64 bytes from SeedDeriver)        │
// │                    │                     │
// │                    ▼                     │
// │          secp256k1 (BIP-32)              │
// │          └─ Bitcoin m/44'/0'/a'/c/i      │
// └──────────────────────────────────────────┘

pub mod secp256k1;

pub use secp256k1::Secp256k1Deriver;

use crate::error::CryptoError;
use zeroize::Zeroizing;

/// BIP-39 seed length expected by the tree walker.
pub const SEED_LEN: usize = 64;

/// Kết quả derivation: private key + compressed public key + path
pub struct DerivedKey {
    /// Private key bytes (32 bytes, auto-zeroize khi drop)
    pub private_key: Zeroizing<[u8; 32]>,
    /// SEC1 compressed public key (33 bytes)
    pub public_key: [u8; 33],
    /// Derivation path đã sử dụng
    pub path: String,
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("private_key", &"[REDACTED]")
            .field("public_key", &hex::encode(self.public_key))
            .field("path", &self.path)
            .finish()
    }
}

/// Validate seed length
#[inline]
pub(crate) fn validate_seed(seed: &[u8]) -> Result<(), CryptoError> {
    if seed.len() != SEED_LEN {
        return Err(CryptoError::KeyDerivationFailed(format!(
            "Invalid seed length: expected {SEED_LEN} bytes, got {}",
            seed.len()
        )));
    }
    Ok(())
}
