// wallet-core/src/wallet/mod.rs

//! Wallet Module
//!
//! - [`Wallet`]: mnemonic words (when known), passphrase, the derived account
//!   and where the wallet file should live.
//! - [`envelope`]: versioned JSON wallet file, nested and legacy shapes.
//! - [`WalletManager`]: create / restore / serialize / migrate.

pub mod envelope;
pub mod manager;

pub use envelope::{parse_envelope, EnvelopeShape, ParsedEnvelope, WalletEnvelope, WALLET_VERSION};
pub use manager::WalletManager;

use crate::account::Account;
use crate::crypto::MnemonicWords;
use crate::protocol::ProtocolId;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use zeroize::Zeroizing;

/// Wallet - một account cùng nguồn gốc của nó
///
/// Wallet tạo mới giữ mnemonic words; wallet restore từ file thì không.
/// Passphrase chỉ được giữ khi nó thực sự bảo vệ secret (file encrypted).
#[derive(Clone)]
pub struct Wallet {
    mnemonic_words: Option<MnemonicWords>,
    passphrase: Option<Zeroizing<String>>,
    account: Account,
    path_to_directory: PathBuf,
    file_extension: String,
}

impl fmt::Debug for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wallet")
            .field("mnemonic_words", &self.mnemonic_words.as_ref().map(|_| "[REDACTED]"))
            .field("passphrase", &self.passphrase.as_ref().map(|_| "[REDACTED]"))
            .field("account", &self.account)
            .field("path_to_directory", &self.path_to_directory)
            .finish()
    }
}

impl Wallet {
    pub(crate) fn new(
        mnemonic_words: Option<MnemonicWords>,
        passphrase: Option<&str>,
        account: Account,
        path_to_directory: PathBuf,
        file_extension: String,
    ) -> Self {
        Self {
            mnemonic_words,
            passphrase: passphrase
                .filter(|p| !p.is_empty())
                .map(|p| Zeroizing::new(p.to_string())),
            account,
            path_to_directory,
            file_extension,
        }
    }

    #[inline]
    pub fn mnemonic_words(&self) -> Option<&MnemonicWords> {
        self.mnemonic_words.as_ref()
    }

    #[inline]
    pub fn passphrase(&self) -> Option<&str> {
        self.passphrase.as_deref().map(String::as_str)
    }

    #[inline]
    pub fn account(&self) -> &Account {
        &self.account
    }

    #[inline]
    pub fn protocol(&self) -> ProtocolId {
        self.account.protocol()
    }

    // =========================================================================
    // FILE LOCATION
    // =========================================================================

    #[inline]
    pub fn path_to_directory(&self) -> &Path {
        &self.path_to_directory
    }

    pub fn set_path_to_directory(&mut self, directory: impl Into<PathBuf>) {
        self.path_to_directory = directory.into();
    }

    #[inline]
    pub fn file_extension(&self) -> &str {
        &self.file_extension
    }

    /// Base name = address của account chính
    #[inline]
    pub fn file_base_name(&self) -> &str {
        self.account.address()
    }

    /// `<address>.<extension>`, hoặc chỉ address khi extension rỗng
    pub fn file_name(&self) -> String {
        if self.file_extension.is_empty() {
            self.file_base_name().to_string()
        } else {
            format!("{}.{}", self.file_base_name(), self.file_extension)
        }
    }

    pub fn absolute_path(&self) -> PathBuf {
        self.path_to_directory.join(self.file_name())
    }
}

// Words và passphrase chỉ so sánh khi cả hai phía đều có, nên equality đối xứng
// và wallet tạo mới bằng wallet restore từ chính file của nó.
impl PartialEq for Wallet {
    fn eq(&self, other: &Self) -> bool {
        if let (Some(a), Some(b)) = (&self.mnemonic_words, &other.mnemonic_words) {
            if a != b {
                return false;
            }
        }
        if let (Some(a), Some(b)) = (&self.passphrase, &other.passphrase) {
            if a != b {
                return false;
            }
        }
        self.account == other.account
    }
}

impl Eq for Wallet {}

impl Hash for Wallet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.account.hash(state);
    }
}
