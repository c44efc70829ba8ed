// wallet-core/src/crypto/seed.rs
//
// Seed Deriver - PBKDF2-HMAC-SHA512 key stretching
//
// Hai dạng output:
// ┌──────────────────────────────────────────────────────────┐
// │  (words, passphrase) ── PBKDF2-HMAC-SHA512 ──► bytes     │
// │                                    │                     │
// │                     8-byte block / symbol                │
// │                                    ▼                     │
// │                Lcg48(seed = block as i64) ──► symbol     │
// └──────────────────────────────────────────────────────────┘

use crate::config::DEFAULT_PBKDF2_ROUNDS;
use crate::error::{CryptoError, WalletResult};
use hmac::Hmac;
use sha2::Sha512;
use zeroize::Zeroizing;

/// Fixed salt prefix, followed by the passphrase.
pub const SALT_PREFIX: &str = "mnemonic";

/// 27-symbol tryte alphabet used for symbol seeds.
pub const TRYTE_ALPHABET: &str = "9ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Bytes of stretched output consumed per symbol.
const BYTES_PER_SYMBOL: usize = 8;

/// Deterministic (words, passphrase) → seed stretching.
///
/// Cùng input luôn cho cùng output, không có randomness ẩn.
/// Passphrase rỗng `""` là giá trị "không passphrase".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedDeriver {
    rounds: u32,
}

impl Default for SeedDeriver {
    fn default() -> Self {
        Self::new(DEFAULT_PBKDF2_ROUNDS)
    }
}

impl SeedDeriver {
    pub const fn new(rounds: u32) -> Self {
        Self { rounds }
    }

    #[inline]
    pub const fn rounds(&self) -> u32 {
        self.rounds
    }

    /// PBKDF2-HMAC-SHA512(password = joined words, salt = "mnemonic" + passphrase)
    ///
    /// # Arguments
    /// * `output_bits` - Độ dài output, phải là bội số dương của 8
    pub fn derive_bytes<S: AsRef<str>>(
        &self,
        words: &[S],
        passphrase: &str,
        output_bits: usize,
    ) -> WalletResult<Zeroizing<Vec<u8>>> {
        if output_bits == 0 || output_bits % 8 != 0 {
            return Err(CryptoError::KeyDerivationFailed(format!(
                "seed length must be a positive multiple of 8 bits, got {output_bits}"
            ))
            .into());
        }

        let password = Zeroizing::new(
            words
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<_>>()
                .join(" "),
        );
        let salt = Zeroizing::new(format!("{SALT_PREFIX}{passphrase}"));

        let mut output = Zeroizing::new(vec![0u8; output_bits / 8]);
        pbkdf2::pbkdf2::<Hmac<Sha512>>(
            password.as_bytes(),
            salt.as_bytes(),
            self.rounds,
            &mut output,
        )
        .map_err(|e| CryptoError::KeyDerivationFailed(format!("PBKDF2 failed: {e}")))?;

        Ok(output)
    }

    /// Standard 512-bit BIP-39 seed.
    #[inline]
    pub fn derive_seed<S: AsRef<str>>(
        &self,
        words: &[S],
        passphrase: &str,
    ) -> WalletResult<Zeroizing<Vec<u8>>> {
        self.derive_bytes(words, passphrase, 512)
    }

    /// Stretch then draw one symbol per 8-byte block.
    ///
    /// Mỗi block (big-endian i64) seed một `Lcg48`, rồi `next_int(len(alphabet))`
    /// chọn symbol. Thuật toán PRNG là một phần của format, không được thay đổi.
    pub fn derive_symbols<S: AsRef<str>>(
        &self,
        words: &[S],
        passphrase: &str,
        symbol_count: usize,
        alphabet: &str,
    ) -> WalletResult<Zeroizing<String>> {
        let symbols: Vec<char> = alphabet.chars().collect();
        let bound = i32::try_from(symbols.len())
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| {
                CryptoError::KeyDerivationFailed(format!(
                    "alphabet size {} is out of range",
                    symbols.len()
                ))
            })?;

        let bytes = self.derive_bytes(words, passphrase, symbol_count * BYTES_PER_SYMBOL * 8)?;

        let mut out = Zeroizing::new(String::with_capacity(symbol_count));
        for block in bytes.chunks_exact(BYTES_PER_SYMBOL) {
            let mut seed = [0u8; BYTES_PER_SYMBOL];
            seed.copy_from_slice(block);
            let mut rng = Lcg48::new(i64::from_be_bytes(seed));
            // next_int trả về [0, bound), luôn nằm trong alphabet
            out.push(symbols[rng.next_int(bound) as usize]);
        }
        Ok(out)
    }
}

// =============================================================================
// 48-BIT LINEAR CONGRUENTIAL GENERATOR
// =============================================================================

/// Non-cryptographic 48-bit LCG (multiplier 0x5DEECE66D, addend 0xB).
///
/// Seeding scrambles the seed with the multiplier and keeps the low 48 bits.
#[derive(Debug, Clone)]
pub(crate) struct Lcg48 {
    state: u64,
}

impl Lcg48 {
    const MULTIPLIER: u64 = 0x5_DEEC_E66D;
    const ADDEND: u64 = 0xB;
    const MASK: u64 = (1 << 48) - 1;

    pub(crate) fn new(seed: i64) -> Self {
        Self {
            state: (seed as u64 ^ Self::MULTIPLIER) & Self::MASK,
        }
    }

    /// Advance and return the top `bits` (1..=32) of the state.
    fn next(&mut self, bits: u32) -> i32 {
        let bits = bits.clamp(1, 32);
        self.state = self
            .state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::ADDEND)
            & Self::MASK;
        // Với bits = 32, bit cao nhất là bit dấu
        (self.state >> (48 - bits)) as u32 as i32
    }

    /// Uniform draw in `[0, bound)`. `bound <= 0` cho 0.
    pub(crate) fn next_int(&mut self, bound: i32) -> i32 {
        if bound <= 0 {
            return 0;
        }
        if bound & bound.wrapping_neg() == bound {
            return ((bound as i64 * self.next(31) as i64) >> 31) as i32;
        }

        loop {
            let bits = self.next(31);
            let val = bits % bound;
            if bits.wrapping_sub(val).wrapping_add(bound - 1) >= 0 {
                return val;
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::mnemonic::MnemonicWords;

    const TEST_MNEMONIC: &str =
        "history suit seat regular toe valid circle public issue degree river vendor";
    const TEST_PASSPHRASE: &str = "test_pass_phrase";

    // BIP-39 vector: "abandon ... about" + "TREZOR"
    const ABANDON_ABOUT: &str =
        "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";
    const ABANDON_ABOUT_TREZOR_SEED: &str = "c55257c360c07c72029aebc1b53c05ed0362ada38ead3e3e9efa3708e53495531f09a6987599d18264c1e1c92f2cf141630c7a3c4ab7c81b2f001698e7463b04";

    fn words(phrase: &str) -> MnemonicWords {
        MnemonicWords::from_phrase(phrase)
    }

    #[test]
    fn test_bip39_seed_vector() {
        let seed = SeedDeriver::default()
            .derive_seed(words(ABANDON_ABOUT).as_slice(), "TREZOR")
            .unwrap();
        assert_eq!(hex::encode(&*seed), ABANDON_ABOUT_TREZOR_SEED);
    }

    #[test]
    fn test_derive_bytes_length() {
        let deriver = SeedDeriver::default();
        let w = words(TEST_MNEMONIC);
        assert_eq!(deriver.derive_bytes(w.as_slice(), "", 256).unwrap().len(), 32);
        assert_eq!(deriver.derive_bytes(w.as_slice(), "", 5184).unwrap().len(), 648);
    }

    #[test]
    fn test_derive_bytes_rejects_partial_bytes() {
        let w = words(TEST_MNEMONIC);
        assert!(SeedDeriver::default().derive_bytes(w.as_slice(), "", 12).is_err());
        assert!(SeedDeriver::default().derive_bytes(w.as_slice(), "", 0).is_err());
    }

    #[test]
    fn test_determinism_and_passphrase_sensitivity() {
        let deriver = SeedDeriver::default();
        let w = words(TEST_MNEMONIC);
        let a = deriver.derive_seed(w.as_slice(), TEST_PASSPHRASE).unwrap();
        let b = deriver.derive_seed(w.as_slice(), TEST_PASSPHRASE).unwrap();
        let c = deriver.derive_seed(w.as_slice(), "test_pass_phrasE").unwrap();
        assert_eq!(&*a, &*b);
        assert_ne!(&*a, &*c);
    }

    #[test]
    fn test_rounds_matter() {
        let w = words(TEST_MNEMONIC);
        let a = SeedDeriver::new(2048).derive_seed(w.as_slice(), "").unwrap();
        let b = SeedDeriver::new(2047).derive_seed(w.as_slice(), "").unwrap();
        assert_ne!(&*a, &*b);
    }

    #[test]
    fn test_symbol_seed_vector() {
        let deriver = SeedDeriver::default();
        let w = words(TEST_MNEMONIC);

        let seed = deriver
            .derive_symbols(w.as_slice(), TEST_PASSPHRASE, 81, TRYTE_ALPHABET)
            .unwrap();
        assert_eq!(
            &*seed,
            "WZGTVNXWXTJ9SBNRYWAPZW99DPZQTDDMTRXZYOX9XRMBY9VFRGNTYGAGSJSRGDLOYCINVANLXQJGHYVUG"
        );

        let seed = deriver
            .derive_symbols(w.as_slice(), "", 81, TRYTE_ALPHABET)
            .unwrap();
        assert_eq!(
            &*seed,
            "HGVZZAJQEXVFUKYRIVSVZRWMSM9SOWYUURPUYBJNNM9MKUMIENBHR9GFQRJUIRR9KINIVOEAQDKIURBWU"
        );
    }

    #[test]
    fn test_symbols_stay_in_alphabet() {
        let w = words(ABANDON_ABOUT);
        let seed = SeedDeriver::default()
            .derive_symbols(w.as_slice(), "x", 40, "ab")
            .unwrap();
        assert_eq!(seed.len(), 40);
        assert!(seed.chars().all(|c| c == 'a' || c == 'b'));
    }

    #[test]
    fn test_empty_alphabet_rejected() {
        let w = words(ABANDON_ABOUT);
        assert!(SeedDeriver::default().derive_symbols(w.as_slice(), "", 81, "").is_err());
    }

    #[test]
    fn test_lcg_reference_sequence() {
        // Reference outputs of the 48-bit LCG for seed 42
        let mut rng = Lcg48::new(42);
        assert_eq!(rng.next_int(10), 0);
        assert_eq!(rng.next_int(10), 3);
        assert_eq!(rng.next_int(10), 8);

        let mut rng = Lcg48::new(42);
        assert_eq!(rng.next(32), -1170105035);
    }

    #[test]
    fn test_lcg_out_of_range_arguments() {
        let mut rng = Lcg48::new(7);
        assert_eq!(rng.next_int(0), 0);
        assert_eq!(rng.next_int(-5), 0);

        // bits > 32 bị kẹp về 32
        let mut a = Lcg48::new(42);
        let mut b = Lcg48::new(42);
        assert_eq!(a.next(64), b.next(32));
        assert_eq!(a.next(0), b.next(1));
    }

    #[test]
    fn test_lcg_power_of_two_bound() {
        let mut rng = Lcg48::new(0);
        for _ in 0..100 {
            let v = rng.next_int(16);
            assert!((0..16).contains(&v));
        }
    }
}
