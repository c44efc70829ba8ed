// wallet-core/src/protocol/mod.rs

//! Protocol Layer
//!
//! A protocol is the immutable pair (technology, network) plus the behavior
//! bound to it: mnemonic validation, mnemonic generation, account creation and
//! account restoration. Technologies form a closed set, every variant is
//! reached through the single [`Protocol`] trait.

pub mod registry;

pub use registry::ProtocolRegistry;

use crate::account::{Account, AccountCodec, AccountRecord};
use crate::chains::KeyDerivationBackend;
use crate::crypto::{EntropySource, MnemonicCodec, MnemonicWords, SeedDeriver, WordCount};
use crate::error::{MnemonicError, WalletError, WalletResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::warn;

// =============================================================================
// IDENTITY
// =============================================================================

/// Supported ledger families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Technology {
    Bitcoin,
    Ethereum,
    Iota,
}

impl Technology {
    pub const ALL: [Technology; 3] = [Technology::Bitcoin, Technology::Ethereum, Technology::Iota];

    pub const fn as_str(self) -> &'static str {
        match self {
            Technology::Bitcoin => "Bitcoin",
            Technology::Ethereum => "Ethereum",
            Technology::Iota => "Iota",
        }
    }
}

impl fmt::Display for Technology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Technology {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Technology::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| WalletError::UnsupportedTechnology(s.to_string()))
    }
}

/// Deployment environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Network {
    Production,
    Test,
    Unit,
}

impl Network {
    pub const ALL: [Network; 3] = [Network::Production, Network::Test, Network::Unit];

    pub const fn as_str(self) -> &'static str {
        match self {
            Network::Production => "Production",
            Network::Test => "Test",
            Network::Unit => "Unit",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Network::ALL
            .into_iter()
            .find(|n| n.as_str() == s)
            .ok_or_else(|| WalletError::UnsupportedNetwork(s.to_string()))
    }
}

/// Structural protocol identity. Equality and hashing cover exactly this pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProtocolId {
    pub technology: Technology,
    pub network: Network,
}

impl ProtocolId {
    pub const fn new(technology: Technology, network: Network) -> Self {
        Self {
            technology,
            network,
        }
    }
}

impl fmt::Display for ProtocolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.technology, self.network)
    }
}

// =============================================================================
// SHARED CONTEXT
// =============================================================================

/// Collaborators every protocol variant needs.
#[derive(Clone)]
pub struct ProtocolContext {
    pub(crate) id: ProtocolId,
    pub(crate) backend: Arc<dyn KeyDerivationBackend>,
    pub(crate) dictionary: &'static MnemonicCodec,
    pub(crate) entropy: Arc<dyn EntropySource>,
    pub(crate) seed_deriver: SeedDeriver,
    pub(crate) account_codec: AccountCodec,
    pub(crate) entropy_bits: usize,
}

impl fmt::Debug for ProtocolContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProtocolContext")
            .field("id", &self.id)
            .field("backend", &self.backend)
            .field("rounds", &self.seed_deriver.rounds())
            .field("entropy_bits", &self.entropy_bits)
            .finish_non_exhaustive()
    }
}

impl ProtocolContext {
    #[inline]
    pub fn backend(&self) -> &dyn KeyDerivationBackend {
        self.backend.as_ref()
    }

    #[inline]
    pub fn dictionary(&self) -> &'static MnemonicCodec {
        self.dictionary
    }

    #[inline]
    pub fn seed_deriver(&self) -> SeedDeriver {
        self.seed_deriver
    }

    #[inline]
    pub fn account_codec(&self) -> &AccountCodec {
        &self.account_codec
    }
}

// =============================================================================
// PROTOCOL TRAIT
// =============================================================================

/// Protocol - capability object bound to one (technology, network)
///
/// Variants chỉ cần implement validation, account derivation và address
/// derivation. Creation, generation, restoration và verification dùng default
/// methods.
pub trait Protocol: Send + Sync + fmt::Debug {
    fn context(&self) -> &ProtocolContext;

    /// Technology-specific mnemonic rule. Fails with `InvalidMnemonic`.
    fn validate_mnemonic_words(&self, words: &MnemonicWords) -> WalletResult<()>;

    /// Derive an account from words that already passed validation.
    ///
    /// `passphrase = None` và `Some("")` đều là "không passphrase".
    fn derive_account(
        &self,
        words: &MnemonicWords,
        passphrase: Option<&str>,
    ) -> WalletResult<Account>;

    /// Recompute the public address from an account secret.
    fn derive_address(&self, secret: &str) -> WalletResult<String>;

    // =========================================================================
    // PROVIDED
    // =========================================================================

    #[inline]
    fn id(&self) -> ProtocolId {
        self.context().id
    }

    #[inline]
    fn technology(&self) -> Technology {
        self.id().technology
    }

    #[inline]
    fn network(&self) -> Network {
        self.id().network
    }

    /// Validate words rồi derive account. Words sai không bao giờ thành account.
    fn create_account(
        &self,
        words: &MnemonicWords,
        passphrase: Option<&str>,
    ) -> WalletResult<Account> {
        self.validate_mnemonic_words(words)?;
        self.derive_account(words, passphrase)
    }

    /// EntropySource → MnemonicCodec.encode với entropy size mặc định
    fn generate_mnemonic_words(&self) -> WalletResult<MnemonicWords> {
        let ctx = self.context();
        let entropy = ctx.entropy.generate(ctx.entropy_bits)?;
        Ok(ctx.dictionary.encode(&entropy)?)
    }

    /// Decode a serialized account and verify its address.
    fn restore_account(
        &self,
        record: &AccountRecord,
        passphrase: Option<&str>,
    ) -> WalletResult<Account> {
        let account = self
            .context()
            .account_codec
            .from_record(record, passphrase, self.id())?;
        self.verify_account(&account)?;
        Ok(account)
    }

    /// Re-derive the address from the secret and compare with the stored one.
    fn verify_account(&self, account: &Account) -> WalletResult<()> {
        let derived = self.derive_address(account.secret())?;
        if derived != account.address() {
            warn!(
                protocol = %self.id(),
                stored = account.address(),
                derived = %derived,
                "address re-derivation mismatch"
            );
            return Err(WalletError::AddressMismatch {
                stored: account.address().to_string(),
                derived,
            });
        }
        Ok(())
    }

    /// Serialize an account through the shared codec.
    fn account_to_record(
        &self,
        account: &Account,
        passphrase: Option<&str>,
        include_protocol_info: bool,
    ) -> WalletResult<AccountRecord> {
        self.context()
            .account_codec
            .to_record(account, passphrase, include_protocol_info)
    }
}

// =============================================================================
// VALIDATION HELPERS
// =============================================================================

/// 12, 15, 18, 21 hoặc 24 words
pub(crate) fn check_word_bounds(words: &MnemonicWords) -> WalletResult<WordCount> {
    let count = words.len();
    WordCount::from_len(count).ok_or_else(|| WalletError::InvalidMnemonic {
        reason: format!("expected 12, 15, 18, 21 or 24 words, got {count}"),
        source: Some(MnemonicError::InvalidWordListSize(count)),
    })
}

/// Words phải decode được (dictionary + checksum)
pub(crate) fn check_decodable(codec: &MnemonicCodec, words: &MnemonicWords) -> WalletResult<()> {
    codec
        .decode(words.as_slice())
        .map(drop)
        .map_err(|e| WalletError::InvalidMnemonic {
            reason: e.to_string(),
            source: Some(e),
        })
}
