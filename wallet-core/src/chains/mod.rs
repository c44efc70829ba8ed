// wallet-core/src/chains/mod.rs

//! Per-technology support
//!
//! Mỗi technology có hai phần:
//! - một [`KeyDerivationBackend`]: seed/secret in, address out
//! - một `Protocol` variant: validation, generation, account creation/restoration
//!
//! | Technology | Secret                    | Address                         |
//! |------------|---------------------------|---------------------------------|
//! | Bitcoin    | mnemonic sentence         | P2PKH base58check (BIP-44 m/44'/0'/0'/0/0) |
//! | Ethereum   | hex SHA-256 of BIP-39 seed | `0x` + keccak256(pubkey)[12..] |
//! | Iota       | 81-tryte symbol seed      | Kerl address + 9-tryte checksum |

pub mod bitcoin;
pub mod evm;
pub mod iota;

pub use bitcoin::{BitcoinBackend, BitcoinProtocol};
pub use evm::{EthereumProtocol, EvmBackend};
pub use iota::{IotaBackend, IotaProtocol};

use crate::error::CryptoError;
use crate::protocol::{Network, Technology};
use std::fmt;
use zeroize::Zeroizing;

pub type BackendResult<T> = Result<T, CryptoError>;

// =============================================================================
// KEY DERIVATION BACKEND
// =============================================================================

/// KeyDerivationBackend - capability chuyển seed/secret thành address
///
/// Core chỉ gọi backend như black box. Mọi lỗi backend phải là
/// [`CryptoError::KeyDerivationFailed`].
///
/// `key_material` có ý nghĩa riêng cho từng technology:
/// - Bitcoin: 64-byte BIP-39 seed
/// - Ethereum: 32-byte private key
/// - Iota: 81 tryte characters (ASCII)
pub trait KeyDerivationBackend: Send + Sync + fmt::Debug {
    /// Technology mà backend này phục vụ
    fn technology(&self) -> Technology;

    /// Derive address (protocol-specific format) từ key material
    fn derive_address(&self, key_material: &[u8], network: Network) -> BackendResult<String>;

    /// Derive secret từ byte seed, cho technologies có secret ≠ seed
    fn derive_secret_from_seed(&self, _seed: &[u8]) -> BackendResult<Zeroizing<String>> {
        Err(CryptoError::KeyDerivationFailed(format!(
            "{} secrets are not derived from byte seeds",
            self.technology()
        )))
    }
}
