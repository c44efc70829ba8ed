// wallet-core/src/wallet/envelope.rs
//
// Wallet Envelope - versioned JSON wallet file
//
// Nested (hiện tại):
//   { "version", "technology", "network", "account": { address, secret, encrypted, iv } }
// Legacy (flat, chỉ đọc):
//   { "version", "technology", "network", "seed", "address", "encrypted", "iv" }
//
// `parse_envelope` thử nested trước, rồi legacy.

use crate::account::AccountRecord;
use crate::error::{Field, WalletError, WalletResult};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The only supported envelope version.
pub const WALLET_VERSION: &str = "1.0";

/// Serializable nested envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletEnvelope {
    pub version: String,
    pub technology: String,
    pub network: String,
    pub account: AccountRecord,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeShape {
    Nested,
    Legacy,
}

/// Envelope sau khi kiểm tra version/technology/network/account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedEnvelope {
    pub technology: String,
    pub network: String,
    pub account: AccountRecord,
    pub shape: EnvelopeShape,
}

// Mọi field optional: thiếu field phải báo MissingField, không phải lỗi serde.
#[derive(Deserialize)]
struct RawEnvelope {
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    technology: Option<String>,
    #[serde(default)]
    network: Option<String>,
    #[serde(default)]
    account: Option<AccountRecord>,
    #[serde(flatten)]
    legacy: LegacyAccount,
}

#[derive(Deserialize)]
struct LegacyAccount {
    #[serde(default)]
    seed: Option<String>,
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    encrypted: Option<bool>,
    #[serde(default)]
    iv: Option<String>,
}

impl LegacyAccount {
    fn is_present(&self) -> bool {
        self.seed.is_some() || self.address.is_some() || self.encrypted.is_some()
    }

    fn into_record(self) -> AccountRecord {
        AccountRecord {
            address: self.address,
            technology: None,
            network: None,
            secret: self.seed,
            encrypted: self.encrypted,
            iv: self.iv,
        }
    }
}

/// Parse wallet file content.
///
/// # Errors
/// - `EmptyFile`: content chỉ có whitespace
/// - `MalformedFile`: không phải JSON object hợp lệ
/// - `MissingField`: version / technology / network / account
/// - `UnsupportedVersion`: version khác `"1.0"`
pub fn parse_envelope(content: &str) -> WalletResult<ParsedEnvelope> {
    if content.trim().is_empty() {
        return Err(WalletError::EmptyFile);
    }

    let raw: RawEnvelope =
        serde_json::from_str(content).map_err(|e| WalletError::MalformedFile(e.to_string()))?;

    let version = raw
        .version
        .ok_or(WalletError::MissingField(Field::Version))?;
    if version != WALLET_VERSION {
        return Err(WalletError::UnsupportedVersion(version));
    }

    let technology = raw
        .technology
        .ok_or(WalletError::MissingField(Field::Technology))?;
    let network = raw
        .network
        .ok_or(WalletError::MissingField(Field::Network))?;

    let (account, shape) = match raw.account {
        Some(account) => (account, EnvelopeShape::Nested),
        None if raw.legacy.is_present() => {
            debug!(%technology, %network, "legacy wallet envelope detected");
            (raw.legacy.into_record(), EnvelopeShape::Legacy)
        }
        None => return Err(WalletError::MissingField(Field::Account)),
    };

    debug!(%technology, %network, ?shape, "wallet envelope parsed");
    Ok(ParsedEnvelope {
        technology,
        network,
        account,
        shape,
    })
}

impl WalletEnvelope {
    pub fn new(technology: String, network: String, account: AccountRecord) -> Self {
        Self {
            version: WALLET_VERSION.to_string(),
            technology,
            network,
            account,
        }
    }

    /// Pretty-printed JSON
    pub fn to_json_pretty(&self) -> WalletResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| WalletError::MalformedFile(e.to_string()))
    }
}
