// wallet-core/src/error.rs
//
// Error taxonomy cho toàn bộ wallet-core.
// Validation errors (bad input) tách biệt với integrity errors (file bị sửa / sai passphrase).

use std::fmt;
use thiserror::Error;

pub type WalletResult<T> = std::result::Result<T, WalletError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WalletError {
    #[error("Mnemonic Error: {0}")]
    Mnemonic(#[from] MnemonicError),

    #[error("Cryptography Error: {0}")]
    Crypto(#[from] CryptoError),

    #[error("Invalid mnemonic: {reason}")]
    InvalidMnemonic {
        reason: String,
        #[source]
        source: Option<MnemonicError>,
    },

    #[error("Unsupported technology: '{0}'")]
    UnsupportedTechnology(String),

    #[error("Unsupported network: '{0}'")]
    UnsupportedNetwork(String),

    #[error("Wallet file is missing the '{0}' field")]
    MissingField(Field),

    #[error("Unsupported wallet file version: '{0}'")]
    UnsupportedVersion(String),

    #[error("Wallet secret is encrypted; a passphrase is required")]
    PassphraseRequired,

    #[error(
        "Wallet integrity check failed: stored address {stored} does not match address {derived} \
         derived from the secret (file corrupted or tampered)"
    )]
    AddressMismatch { stored: String, derived: String },

    #[error("Wallet file is empty")]
    EmptyFile,

    #[error("Malformed wallet file: {0}")]
    MalformedFile(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl WalletError {
    /// `true` khi lỗi chỉ ra dữ liệu bị hỏng/bị sửa hoặc sai passphrase,
    /// không phải input sai định dạng.
    pub fn is_integrity_error(&self) -> bool {
        matches!(
            self,
            WalletError::Mnemonic(MnemonicError::ChecksumMismatch)
                | WalletError::Crypto(CryptoError::DecryptionFailed)
                | WalletError::AddressMismatch { .. }
        ) || matches!(
            self,
            WalletError::InvalidMnemonic {
                source: Some(MnemonicError::ChecksumMismatch),
                ..
            }
        )
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MnemonicError {
    #[error("Invalid entropy length: {0} bytes. Expected a non-zero multiple of 4 bytes.")]
    InvalidEntropyLength(usize),

    #[error("Word list resource is corrupt: {0}")]
    DictionaryCorrupt(String),

    #[error("Invalid word count: {0}. Expected a non-zero multiple of 3.")]
    InvalidWordListSize(usize),

    #[error("Word '{word}' at position {position} not found in the BIP39 wordlist.")]
    UnknownWord { position: usize, word: String },

    #[error("Mnemonic checksum mismatch (words corrupted or mistyped).")]
    ChecksumMismatch,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CryptoError {
    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    #[error("System randomness unavailable: {0}")]
    EntropyUnavailable(String),

    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Decryption failed: wrong passphrase or corrupted ciphertext")]
    DecryptionFailed,
}

/// Wallet file fields that may be reported as missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Version,
    Technology,
    Network,
    Account,
    Address,
    Secret,
    Encrypted,
    Iv,
}

impl Field {
    pub const fn as_str(self) -> &'static str {
        match self {
            Field::Version => "version",
            Field::Technology => "technology",
            Field::Network => "network",
            Field::Account => "account",
            Field::Address => "address",
            Field::Secret => "secret",
            Field::Encrypted => "encrypted",
            Field::Iv => "iv",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
