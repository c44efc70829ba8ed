// wallet-core/src/crypto/cipher.rs
//
// At-rest encryption cho account secret
// AES-256-GCM, key = Argon2id(passphrase, salt = IV)

use crate::config::CipherConfig;
use crate::error::{CryptoError, WalletError, WalletResult};
use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use argon2::{Algorithm, Argon2, Params, Version};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use rand::{rngs::OsRng, RngCore};
use zeroize::Zeroizing;

/// GCM nonce length; doubles as the Argon2 salt.
pub const IV_LEN: usize = 12;
const KEY_LEN: usize = 32;

/// Base64-encoded ciphertext and initialization vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ciphertext {
    pub data: String,
    pub iv: String,
}

/// Passphrase-keyed symmetric cipher.
///
/// Mọi lỗi decrypt (sai passphrase, ciphertext/IV hỏng) đều là `DecryptionFailed`.
pub trait SymmetricCipher: Send + Sync {
    fn encrypt(&self, plaintext: &str, passphrase: &str) -> Result<Ciphertext, CryptoError>;

    fn decrypt(
        &self,
        ciphertext: &str,
        iv: &str,
        passphrase: &str,
    ) -> Result<Zeroizing<String>, CryptoError>;
}

/// AES-256-GCM with an Argon2id-derived key.
pub struct AesGcmCipher {
    params: Params,
}

impl std::fmt::Debug for AesGcmCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AesGcmCipher")
            .field("memory_kib", &self.params.m_cost())
            .field("iterations", &self.params.t_cost())
            .field("parallelism", &self.params.p_cost())
            .finish()
    }
}

impl AesGcmCipher {
    pub fn new(config: &CipherConfig) -> WalletResult<Self> {
        let params = Params::new(
            config.memory_kib,
            config.iterations,
            config.parallelism,
            Some(KEY_LEN),
        )
        .map_err(|e| WalletError::InvalidConfig(format!("Argon2 parameters: {e}")))?;
        Ok(Self { params })
    }

    /// Derive 256-bit key từ passphrase bằng Argon2id
    fn derive_key(&self, passphrase: &str, salt: &[u8]) -> Result<Zeroizing<[u8; KEY_LEN]>, CryptoError> {
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone());
        let mut key = Zeroizing::new([0u8; KEY_LEN]);
        argon2
            .hash_password_into(passphrase.as_bytes(), salt, &mut *key)
            .map_err(|e| CryptoError::KeyDerivationFailed(format!("Argon2id: {e}")))?;
        Ok(key)
    }
}

impl SymmetricCipher for AesGcmCipher {
    fn encrypt(&self, plaintext: &str, passphrase: &str) -> Result<Ciphertext, CryptoError> {
        let mut iv = [0u8; IV_LEN];
        OsRng
            .try_fill_bytes(&mut iv)
            .map_err(|e| CryptoError::EntropyUnavailable(e.to_string()))?;

        let key = self.derive_key(passphrase, &iv)?;
        let cipher = Aes256Gcm::new_from_slice(&*key)
            .map_err(|e| CryptoError::EncryptionFailed(e.to_string()))?;

        let data = cipher
            .encrypt(Nonce::from_slice(&iv), plaintext.as_bytes())
            .map_err(|e| CryptoError::EncryptionFailed(e.to_string()))?;

        Ok(Ciphertext {
            data: BASE64.encode(data),
            iv: BASE64.encode(iv),
        })
    }

    fn decrypt(
        &self,
        ciphertext: &str,
        iv: &str,
        passphrase: &str,
    ) -> Result<Zeroizing<String>, CryptoError> {
        let iv = BASE64.decode(iv).map_err(|_| CryptoError::DecryptionFailed)?;
        // Verify nonce length (Nonce::from_slice panic nếu sai độ dài)
        if iv.len() != IV_LEN {
            return Err(CryptoError::DecryptionFailed);
        }
        let data = BASE64
            .decode(ciphertext)
            .map_err(|_| CryptoError::DecryptionFailed)?;

        let key = self
            .derive_key(passphrase, &iv)
            .map_err(|_| CryptoError::DecryptionFailed)?;
        let cipher =
            Aes256Gcm::new_from_slice(&*key).map_err(|_| CryptoError::DecryptionFailed)?;

        let plaintext = Zeroizing::new(
            cipher
                .decrypt(Nonce::from_slice(&iv), data.as_slice())
                .map_err(|_| CryptoError::DecryptionFailed)?,
        );

        std::str::from_utf8(&plaintext)
            .map(|s| Zeroizing::new(s.to_owned()))
            .map_err(|_| CryptoError::DecryptionFailed)
    }
}
