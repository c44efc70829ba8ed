// wallet-core/src/lib.rs

//! Wallet Core
//!
//! Deterministic paper-wallet derivation for Bitcoin, Ethereum and Iota:
//!
//! - **Mnemonic**: BIP-39 entropy ⇄ words, generation and validation.
//! - **Seed**: PBKDF2 byte seeds and tryte symbol seeds.
//! - **Protocol**: per-(technology, network) account creation and restoration.
//! - **Wallet**: versioned JSON wallet files with optional AES-GCM secrets.
//!
//! ```no_run
//! use wallet_core::{Network, Technology, WalletConfig, WalletManager};
//!
//! let manager = WalletManager::new(&WalletConfig::default())?;
//! let wallet = manager.create_for(Technology::Ethereum, Network::Test, None, Some("pass"))?;
//! let content = manager.to_file_content(&wallet)?;
//! let restored = manager.restore(&content, Some("pass"))?;
//! assert_eq!(wallet, restored);
//! # Ok::<(), wallet_core::WalletError>(())
//! ```

pub mod account;
pub mod chains;
pub mod config;
pub mod crypto;
pub mod error;
pub mod protocol;
pub mod wallet;

pub use account::{Account, AccountCodec, AccountRecord};
pub use chains::KeyDerivationBackend;
pub use config::{CipherConfig, WalletConfig};
pub use crypto::{MnemonicCodec, MnemonicWords, SeedDeriver};
pub use error::{CryptoError, Field, MnemonicError, WalletError, WalletResult};
pub use protocol::{Network, Protocol, ProtocolId, ProtocolRegistry, Technology};
pub use wallet::{Wallet, WalletManager};
