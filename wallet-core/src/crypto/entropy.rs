// wallet-core/src/crypto/entropy.rs
//
// Entropy Source - OS-level CSPRNG

use crate::error::{CryptoError, MnemonicError, WalletResult};
use rand::{rngs::OsRng, RngCore};
use zeroize::Zeroizing;

/// Nguồn entropy cho mnemonic generation.
///
/// Implementations phải cryptographically strong; `OsEntropy` là mặc định.
/// Tests có thể inject nguồn cố định để tạo mnemonic deterministic.
pub trait EntropySource: Send + Sync {
    /// Fill `bits / 8` bytes. `bits` must be a positive multiple of 8.
    fn generate(&self, bits: usize) -> WalletResult<Zeroizing<Vec<u8>>>;
}

/// Entropy từ OS (`getrandom` qua `OsRng`)
#[derive(Debug, Clone, Copy, Default)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn generate(&self, bits: usize) -> WalletResult<Zeroizing<Vec<u8>>> {
        let len = checked_byte_len(bits)?;
        let mut buf = Zeroizing::new(vec![0u8; len]);
        OsRng
            .try_fill_bytes(&mut buf)
            .map_err(|e| CryptoError::EntropyUnavailable(e.to_string()))?;
        Ok(buf)
    }
}

/// Validate bit length, trả về số bytes
pub(crate) fn checked_byte_len(bits: usize) -> WalletResult<usize> {
    if bits == 0 || bits % 8 != 0 {
        return Err(MnemonicError::InvalidEntropyLength(bits / 8).into());
    }
    Ok(bits / 8)
}
