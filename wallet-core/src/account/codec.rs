// wallet-core/src/account/codec.rs
//
// Account Codec - Account ⇄ JSON record
// Secret được mã hoá khi có passphrase; codec KHÔNG re-derive address.

use super::Account;
use crate::crypto::SymmetricCipher;
use crate::error::{Field, WalletError, WalletResult};
use crate::protocol::ProtocolId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::debug;
use zeroize::Zeroizing;

/// Serialized account.
///
/// Mọi field đều optional để phân biệt "thiếu field" với giá trị sai.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technology: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,

    /// Plaintext secret, or base64 ciphertext when `encrypted`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encrypted: Option<bool>,

    /// Base64 IV, present iff `encrypted`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iv: Option<String>,
}

impl AccountRecord {
    #[inline]
    pub fn is_encrypted(&self) -> bool {
        self.encrypted == Some(true)
    }
}

/// Account ⇄ AccountRecord
#[derive(Clone)]
pub struct AccountCodec {
    cipher: Arc<dyn SymmetricCipher>,
}

impl fmt::Debug for AccountCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountCodec").finish_non_exhaustive()
    }
}

impl AccountCodec {
    pub fn new(cipher: Arc<dyn SymmetricCipher>) -> Self {
        Self { cipher }
    }

    /// Account → record
    ///
    /// - `address` luôn được ghi
    /// - `technology`/`network` chỉ khi `include_protocol_info`
    /// - passphrase `None`/rỗng ⇒ secret plaintext, `encrypted = false`
    pub fn to_record(
        &self,
        account: &Account,
        passphrase: Option<&str>,
        include_protocol_info: bool,
    ) -> WalletResult<AccountRecord> {
        let mut record = AccountRecord {
            address: Some(account.address().to_string()),
            ..AccountRecord::default()
        };

        if include_protocol_info {
            let protocol = account.protocol();
            record.technology = Some(protocol.technology.to_string());
            record.network = Some(protocol.network.to_string());
        }

        match non_empty(passphrase) {
            Some(passphrase) => {
                let sealed = self.cipher.encrypt(account.secret(), passphrase)?;
                record.secret = Some(sealed.data);
                record.iv = Some(sealed.iv);
                record.encrypted = Some(true);
            }
            None => {
                record.secret = Some(account.secret().to_string());
                record.encrypted = Some(false);
            }
        }

        Ok(record)
    }

    /// Record → account, decrypting when needed.
    ///
    /// Thứ tự kiểm tra: address, secret, encrypted, rồi (nếu encrypted) iv và passphrase.
    pub fn from_record(
        &self,
        record: &AccountRecord,
        passphrase: Option<&str>,
        protocol: ProtocolId,
    ) -> WalletResult<Account> {
        let address = record
            .address
            .as_deref()
            .ok_or(WalletError::MissingField(Field::Address))?;
        let stored_secret = record
            .secret
            .as_deref()
            .ok_or(WalletError::MissingField(Field::Secret))?;
        let encrypted = record
            .encrypted
            .ok_or(WalletError::MissingField(Field::Encrypted))?;

        check_declared(record.technology.as_deref(), protocol.technology.as_str(), Field::Technology)?;
        check_declared(record.network.as_deref(), protocol.network.as_str(), Field::Network)?;

        let secret = if encrypted {
            let iv = record
                .iv
                .as_deref()
                .ok_or(WalletError::MissingField(Field::Iv))?;
            let passphrase = non_empty(passphrase).ok_or(WalletError::PassphraseRequired)?;
            self.cipher.decrypt(stored_secret, iv, passphrase)?
        } else {
            Zeroizing::new(stored_secret.to_string())
        };

        debug!(%protocol, address, encrypted, "account record decoded");
        Ok(Account::new(address.to_string(), secret, protocol))
    }
}

#[inline]
fn non_empty(passphrase: Option<&str>) -> Option<&str> {
    passphrase.filter(|p| !p.is_empty())
}

/// Record có thể tự khai báo technology/network; nếu có thì phải khớp.
fn check_declared(declared: Option<&str>, expected: &str, field: Field) -> WalletResult<()> {
    match declared {
        Some(value) if value != expected => Err(WalletError::MalformedFile(format!(
            "account {field} '{value}' does not match '{expected}'"
        ))),
        _ => Ok(()),
    }
}
