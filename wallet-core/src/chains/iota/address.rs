// wallet-core/src/chains/iota/address.rs
//
// IOTA Address Module - Kerl-based WOTS address generation
//
// ┌──────────┐  increment×index   ┌─────────┐  Kerl   ┌─────────┐
// │ seed 243 │ ─────────────────► │ subseed │ ──────► │ key     │ 27×security chunks
// └──────────┘                    └─────────┘         └────┬────┘
//                                                          │ 26 rounds / fragment
//                                                          ▼
//                                 ┌─────────┐  Kerl   ┌─────────┐
//                                 │ address │ ◄────── │ digests │ 243×security
//                                 └─────────┘         └─────────┘

use super::converter::{increment, is_trytes, trits_to_trytes, trytes_to_trits};
use super::kerl::{Kerl, HASH_LENGTH};
use crate::error::CryptoError;
use zeroize::Zeroizing;

/// Trytes in a seed / address without checksum
pub const ADDRESS_TRYTES: usize = 81;
/// Trytes in the checksum suffix
pub const CHECKSUM_TRYTES: usize = 9;
/// Default security level
pub const DEFAULT_SECURITY: u8 = 2;

const FRAGMENTS_PER_CHUNK: usize = 27;
const KEY_CHUNK_LENGTH: usize = HASH_LENGTH * FRAGMENTS_PER_CHUNK;
const HASH_ROUNDS: usize = 26;

pub struct IotaAddress;

impl IotaAddress {
    /// Seed + index + security → address trytes (81, hoặc 90 khi `checksum`)
    pub fn generate(
        seed: &str,
        index: u32,
        security: u8,
        checksum: bool,
    ) -> Result<String, CryptoError> {
        if !is_trytes(seed, ADDRESS_TRYTES) {
            return Err(CryptoError::KeyDerivationFailed(format!(
                "seed must be {ADDRESS_TRYTES} trytes"
            )));
        }
        if !(1..=3).contains(&security) {
            return Err(CryptoError::KeyDerivationFailed(format!(
                "security level must be 1..=3, got {security}"
            )));
        }

        let seed_trits = Zeroizing::new(trytes_to_trits(seed)?);
        let key = Self::key(&seed_trits, index, security)?;
        let digests = Self::digests(&key)?;
        let address = trits_to_trytes(&Self::address(&digests)?);

        if checksum {
            Self::add_checksum(&address)
        } else {
            Ok(address)
        }
    }

    /// Private key trits (27 × 243 × security)
    pub fn key(
        seed: &[i8],
        index: u32,
        security: u8,
    ) -> Result<Zeroizing<Vec<i8>>, CryptoError> {
        let mut subseed = Zeroizing::new(seed.to_vec());
        for _ in 0..index {
            increment(&mut subseed);
        }

        let mut kerl = Kerl::new();
        kerl.absorb(&subseed)?;
        kerl.squeeze(&mut subseed)?;
        kerl.reset();
        kerl.absorb(&subseed)?;

        let mut key = Zeroizing::new(vec![0i8; KEY_CHUNK_LENGTH * security as usize]);
        kerl.squeeze(&mut key)?;
        Ok(key)
    }

    /// Key → digests, một digest 243 trits cho mỗi key chunk
    pub fn digests(key: &[i8]) -> Result<Vec<i8>, CryptoError> {
        if key.is_empty() || key.len() % KEY_CHUNK_LENGTH != 0 {
            return Err(CryptoError::KeyDerivationFailed(format!(
                "key length {} is not a multiple of {KEY_CHUNK_LENGTH}",
                key.len()
            )));
        }

        let mut digests = vec![0i8; key.len() / KEY_CHUNK_LENGTH * HASH_LENGTH];
        let mut kerl = Kerl::new();

        for (chunk, digest) in key
            .chunks_exact(KEY_CHUNK_LENGTH)
            .zip(digests.chunks_exact_mut(HASH_LENGTH))
        {
            let mut buffer = Zeroizing::new(chunk.to_vec());
            for fragment in buffer.chunks_exact_mut(HASH_LENGTH) {
                for _ in 0..HASH_ROUNDS {
                    kerl.reset();
                    kerl.absorb(fragment)?;
                    kerl.squeeze(fragment)?;
                }
            }
            kerl.reset();
            kerl.absorb(&buffer)?;
            kerl.squeeze(digest)?;
        }

        Ok(digests)
    }

    /// Digests → address trits
    pub fn address(digests: &[i8]) -> Result<[i8; HASH_LENGTH], CryptoError> {
        Kerl::hash(digests)
    }

    /// 9 trytes cuối của Kerl(address)
    pub fn checksum(address: &str) -> Result<String, CryptoError> {
        let digest = Kerl::hash(&trytes_to_trits(address)?)?;
        let trytes = trits_to_trytes(&digest);
        Ok(trytes[ADDRESS_TRYTES - CHECKSUM_TRYTES..].to_string())
    }

    pub fn add_checksum(address: &str) -> Result<String, CryptoError> {
        Ok(format!("{address}{}", Self::checksum(address)?))
    }
}
