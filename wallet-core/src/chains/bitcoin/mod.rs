// wallet-core/src/chains/bitcoin/mod.rs

//! Bitcoin Support
//!
//! - **Address Derivation**: Legacy P2PKH Base58Check addresses via [`BitcoinAddress`].
//! - **Backend**: BIP-32 walk to `m/44'/0'/0'/0/0` via [`BitcoinBackend`].
//! - **Protocol**: secret = mnemonic sentence via [`BitcoinProtocol`].

pub mod address;
pub mod protocol;

pub use address::BitcoinAddress;
pub use protocol::BitcoinProtocol;

use super::{BackendResult, KeyDerivationBackend};
use crate::crypto::{DerivationPaths, Secp256k1Deriver};
use crate::protocol::{Network, Technology};
use std::ops::Range;

/// Bitcoin backend: 64-byte seed → BIP-44 account 0 receive address
#[derive(Debug, Clone, Copy, Default)]
pub struct BitcoinBackend;

impl BitcoinBackend {
    /// External chain addresses `m/44'/0'/account'/0/i` for `i` in `indices`.
    pub fn receive_addresses(
        &self,
        seed: &[u8],
        network: Network,
        account: u32,
        indices: Range<u32>,
    ) -> BackendResult<Vec<String>> {
        let base = DerivationPaths::btc_legacy_chain(account, false);
        Ok(Secp256k1Deriver::derive_batch(seed, &base, indices)?
            .iter()
            .map(|key| BitcoinAddress::from_public_key(&key.public_key, network))
            .collect())
    }
}

impl KeyDerivationBackend for BitcoinBackend {
    fn technology(&self) -> Technology {
        Technology::Bitcoin
    }

    fn derive_address(&self, seed: &[u8], network: Network) -> BackendResult<String> {
        let key = Secp256k1Deriver::derive(seed, DerivationPaths::BTC_LEGACY_0)?;
        Ok(BitcoinAddress::from_public_key(&key.public_key, network))
    }
}
