// wallet-core/src/account/mod.rs

//! Account Module
//!
//! - [`Account`]: address + secret + owning protocol identity.
//! - [`AccountRecord`]: JSON-shaped serialized form.
//! - [`AccountCodec`]: Account ⇄ AccountRecord, encrypting the secret when a passphrase is given.

pub mod codec;

pub use codec::{AccountCodec, AccountRecord};

use crate::protocol::ProtocolId;
use std::fmt;
use std::hash::{Hash, Hasher};
use zeroize::Zeroizing;

/// Account - một cặp (address, secret) của một protocol
///
/// Secret ở dạng native của protocol: mnemonic sentence (Bitcoin),
/// hex private key (Ethereum) hoặc tryte seed (Iota).
/// Equality là structural trên (secret, address, protocol).
#[derive(Clone, PartialEq, Eq)]
pub struct Account {
    address: String,
    secret: Zeroizing<String>,
    protocol: ProtocolId,
}

// Custom Debug - KHÔNG BAO GIỜ hiển thị secret
impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("address", &self.address)
            .field("secret", &"[REDACTED]")
            .field("protocol", &self.protocol)
            .finish()
    }
}

impl Hash for Account {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.address.hash(state);
        self.secret.as_str().hash(state);
        self.protocol.hash(state);
    }
}

impl Account {
    pub fn new(address: String, secret: Zeroizing<String>, protocol: ProtocolId) -> Self {
        Self {
            address,
            secret,
            protocol,
        }
    }

    #[inline]
    pub fn address(&self) -> &str {
        &self.address
    }

    /// # Warning
    /// Cẩn thận khi hiển thị hoặc log giá trị này!
    #[inline]
    pub fn secret(&self) -> &str {
        &self.secret
    }

    #[inline]
    pub fn protocol(&self) -> ProtocolId {
        self.protocol
    }
}
