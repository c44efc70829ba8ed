// wallet-core/src/config.rs
//
// Cấu hình runtime cho derivation và wallet file.

use crate::crypto::WordCount;
use crate::error::{WalletError, WalletResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Reference PBKDF2 iteration count for mnemonic stretching.
pub const DEFAULT_PBKDF2_ROUNDS: u32 = 2048;
/// 128 bits ⇒ 12 words.
pub const DEFAULT_ENTROPY_BITS: usize = 128;
pub const DEFAULT_FILE_EXTENSION: &str = "json";

/// Argon2id cost parameters used to key the at-rest cipher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CipherConfig {
    /// Memory cost (in KiB)
    pub memory_kib: u32,
    /// Time cost (iterations)
    pub iterations: u32,
    /// Parallelism factor
    pub parallelism: u32,
}

impl Default for CipherConfig {
    fn default() -> Self {
        Self {
            memory_kib: 19_456, // 19 MB
            iterations: 2,
            parallelism: 1,
        }
    }
}

/// Wallet engine configuration
///
/// Mặc định khớp với reference values (2048 rounds, 128-bit entropy, `.json` files).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WalletConfig {
    pub pbkdf2_rounds: u32,
    pub entropy_bits: usize,
    pub file_extension: String,
    pub default_directory: PathBuf,
    pub cipher: CipherConfig,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            pbkdf2_rounds: DEFAULT_PBKDF2_ROUNDS,
            entropy_bits: DEFAULT_ENTROPY_BITS,
            file_extension: DEFAULT_FILE_EXTENSION.to_string(),
            default_directory: PathBuf::from("."),
            cipher: CipherConfig::default(),
        }
    }
}

impl WalletConfig {
    /// Config with cheap Argon2 costs. Derivation parameters stay at their
    /// reference values so golden vectors still hold.
    pub fn for_testing() -> Self {
        Self {
            cipher: CipherConfig {
                memory_kib: 64,
                iterations: 1,
                parallelism: 1,
            },
            ..Self::default()
        }
    }

    /// Parse config từ JSON, thiếu field thì dùng default
    pub fn from_json(json: &str) -> WalletResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| WalletError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> WalletResult<()> {
        if self.pbkdf2_rounds == 0 {
            return Err(WalletError::InvalidConfig(
                "pbkdf2Rounds must be positive".to_string(),
            ));
        }
        if WordCount::from_entropy_bits(self.entropy_bits).is_none() {
            return Err(WalletError::InvalidConfig(format!(
                "entropyBits must be a multiple of 32 between 128 and 256, got {}",
                self.entropy_bits
            )));
        }
        if self.file_extension.is_empty() || self.file_extension.contains('.') {
            return Err(WalletError::InvalidConfig(format!(
                "fileExtension must be a bare extension, got '{}'",
                self.file_extension
            )));
        }
        if self.cipher.iterations == 0 || self.cipher.parallelism == 0 {
            return Err(WalletError::InvalidConfig(
                "cipher iterations and parallelism must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
