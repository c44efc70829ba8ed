// wallet-core/src/crypto/mod.rs

//! Core Cryptography Module
//!
//! Deterministic building blocks shared by every technology:
//!
//! - **Entropy**: OS-backed randomness for new mnemonics via [`EntropySource`].
//! - **Mnemonic Codec**: BIP-39 entropy ⇄ words over a digest-verified dictionary via [`MnemonicCodec`].
//! - **Seed Derivation**: PBKDF2-HMAC-SHA512 byte seeds and alphabet-restricted symbol seeds via [`SeedDeriver`].
//! - **Key Derivation**: BIP-32 secp256k1 tree walking via [`Secp256k1Deriver`].
//! - **Cipher**: passphrase-keyed AES-256-GCM for secrets at rest via [`SymmetricCipher`].

pub mod cipher;
pub mod entropy;
pub mod key_deriver;
pub mod mnemonic;
pub mod paths;
pub mod seed;

// Re-exports for cleaner API access
pub use cipher::{AesGcmCipher, Ciphertext, SymmetricCipher};
pub use entropy::{EntropySource, OsEntropy};
pub use key_deriver::{DerivedKey, Secp256k1Deriver};
pub use mnemonic::{MnemonicCodec, MnemonicWords, WordCount};
pub use paths::DerivationPaths;
pub use seed::{SeedDeriver, SALT_PREFIX, TRYTE_ALPHABET};
