// wallet-core/src/chains/iota/kerl.rs
//
// Kerl - Keccak-384 sponge trên ternary data
//
// ┌───────────────────────────────────────────────────────────────┐
// │ absorb: 243 trits ─► 384-bit two's complement (48B) ─► Keccak │
// │ squeeze: Keccak digest (48B) ─► 243 trits                     │
// │          rồi re-seed Keccak với !digest                       │
// └───────────────────────────────────────────────────────────────┘
//
// Trit cuối (index 242) luôn bị ép về 0 ở cả hai chiều.

use crate::error::CryptoError;
use std::cmp::Ordering;
use std::sync::OnceLock;
use tiny_keccak::{Hasher, Keccak};

/// Trits per hash chunk
pub const HASH_LENGTH: usize = 243;
const BYTE_HASH_LENGTH: usize = 48;
const LIMBS: usize = BYTE_HASH_LENGTH / 4;

// =============================================================================
// 384-BIT ARITHMETIC
// =============================================================================

/// Unsigned 384-bit integer, little-endian u32 limbs, wrapping arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct U384([u32; LIMBS]);

impl U384 {
    const ZERO: Self = Self([0; LIMBS]);

    fn mul_add_small(&mut self, factor: u32, addend: u32) {
        let mut carry = addend as u64;
        for limb in self.0.iter_mut() {
            let v = *limb as u64 * factor as u64 + carry;
            *limb = v as u32;
            carry = v >> 32;
        }
    }

    /// Chia cho `divisor`, trả về phần dư
    fn div_small(&mut self, divisor: u32) -> u32 {
        let mut rem = 0u64;
        for limb in self.0.iter_mut().rev() {
            let cur = (rem << 32) | *limb as u64;
            *limb = (cur / divisor as u64) as u32;
            rem = cur % divisor as u64;
        }
        rem as u32
    }

    fn wrapping_add(self, other: Self) -> Self {
        let mut out = Self::ZERO;
        let mut carry = 0u64;
        for i in 0..LIMBS {
            let v = self.0[i] as u64 + other.0[i] as u64 + carry;
            out.0[i] = v as u32;
            carry = v >> 32;
        }
        out
    }

    fn wrapping_sub(self, other: Self) -> Self {
        let mut out = Self::ZERO;
        let mut borrow = false;
        for i in 0..LIMBS {
            let (v, b1) = self.0[i].overflowing_sub(other.0[i]);
            let (v, b2) = v.overflowing_sub(borrow as u32);
            out.0[i] = v;
            borrow = b1 || b2;
        }
        out
    }

    /// Bit dấu khi diễn giải là two's complement
    #[inline]
    fn is_negative(&self) -> bool {
        self.0[LIMBS - 1] >> 31 == 1
    }

    fn to_be_bytes(self) -> [u8; BYTE_HASH_LENGTH] {
        let mut out = [0u8; BYTE_HASH_LENGTH];
        for (i, chunk) in out.chunks_exact_mut(4).enumerate() {
            chunk.copy_from_slice(&self.0[LIMBS - 1 - i].to_be_bytes());
        }
        out
    }

    fn from_be_bytes(bytes: &[u8; BYTE_HASH_LENGTH]) -> Self {
        let mut out = Self::ZERO;
        for (i, chunk) in bytes.chunks_exact(4).enumerate() {
            out.0[LIMBS - 1 - i] = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        out
    }
}

impl PartialOrd for U384 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for U384 {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.iter().rev().cmp(other.0.iter().rev())
    }
}

/// (HALF, FULL) với FULL = 3^242 và HALF = (3^242 - 1) / 2
fn ternary_bounds() -> &'static (U384, U384) {
    static BOUNDS: OnceLock<(U384, U384)> = OnceLock::new();
    BOUNDS.get_or_init(|| {
        let mut half = U384::ZERO;
        let mut full = U384::ZERO;
        full.0[0] = 1;
        for _ in 0..HASH_LENGTH - 1 {
            half.mul_add_small(3, 1);
            full.mul_add_small(3, 0);
        }
        (half, full)
    })
}

// =============================================================================
// TRITS ⇄ BYTES
// =============================================================================

/// 243 trits → 48-byte big-endian two's complement (trit 242 bị bỏ qua)
pub(crate) fn trits_to_bytes(trits: &[i8; HASH_LENGTH]) -> [u8; BYTE_HASH_LENGTH] {
    let (half, _) = ternary_bounds();
    // Offset mỗi trit +1 để cộng dồn không dấu, rồi trừ HALF
    let mut value = U384::ZERO;
    for trit in trits[..HASH_LENGTH - 1].iter().rev() {
        value.mul_add_small(3, (trit + 1) as u32);
    }
    value.wrapping_sub(*half).to_be_bytes()
}

/// 48 bytes → 243 trits (balanced, reduced mod 3^242, trit 242 = 0)
pub(crate) fn bytes_to_trits(bytes: &[u8; BYTE_HASH_LENGTH], out: &mut [i8; HASH_LENGTH]) {
    let (half, full) = ternary_bounds();
    let value = U384::from_be_bytes(bytes);
    let negative = value.is_negative();

    let mut shifted = value.wrapping_add(*half);
    if negative {
        if shifted.is_negative() {
            shifted = shifted.wrapping_add(*full);
        }
    } else if shifted >= *full {
        shifted = shifted.wrapping_sub(*full);
    }

    for trit in out[..HASH_LENGTH - 1].iter_mut() {
        *trit = shifted.div_small(3) as i8 - 1;
    }
    out[HASH_LENGTH - 1] = 0;
}

// =============================================================================
// SPONGE
// =============================================================================

pub struct Kerl {
    keccak: Keccak,
}

impl Default for Kerl {
    fn default() -> Self {
        Self::new()
    }
}

impl Kerl {
    pub fn new() -> Self {
        Self {
            keccak: Keccak::v384(),
        }
    }

    pub fn reset(&mut self) {
        self.keccak = Keccak::v384();
    }

    /// Absorb trits theo từng chunk 243
    pub fn absorb(&mut self, trits: &[i8]) -> Result<(), CryptoError> {
        check_length(trits.len())?;
        for chunk in trits.chunks_exact(HASH_LENGTH) {
            let chunk = chunk.try_into().map_err(|_| length_error(chunk.len()))?;
            self.keccak.update(&trits_to_bytes(chunk));
        }
        Ok(())
    }

    /// Squeeze `out.len()` trits (bội số của 243)
    pub fn squeeze(&mut self, out: &mut [i8]) -> Result<(), CryptoError> {
        check_length(out.len())?;
        for chunk in out.chunks_exact_mut(HASH_LENGTH) {
            let len = chunk.len();
            let chunk: &mut [i8; HASH_LENGTH] = chunk.try_into().map_err(|_| length_error(len))?;
            let mut digest = [0u8; BYTE_HASH_LENGTH];
            std::mem::replace(&mut self.keccak, Keccak::v384()).finalize(&mut digest);
            bytes_to_trits(&digest, chunk);

            for byte in digest.iter_mut() {
                *byte = !*byte;
            }
            self.keccak.update(&digest);
        }
        Ok(())
    }

    /// One-shot: reset, absorb, squeeze 243 trits
    pub fn hash(trits: &[i8]) -> Result<[i8; HASH_LENGTH], CryptoError> {
        let mut kerl = Self::new();
        kerl.absorb(trits)?;
        let mut out = [0i8; HASH_LENGTH];
        kerl.squeeze(&mut out)?;
        Ok(out)
    }
}

fn check_length(len: usize) -> Result<(), CryptoError> {
    if len == 0 || len % HASH_LENGTH != 0 {
        return Err(length_error(len));
    }
    Ok(())
}

fn length_error(len: usize) -> CryptoError {
    CryptoError::KeyDerivationFailed(format!(
        "Kerl operates on multiples of {HASH_LENGTH} trits, got {len}"
    ))
}

#[cfg(test)]
mod tests {
    use super::super::converter::{trits_to_trytes, trytes_to_trits};
    use super::*;

    #[test]
    fn test_kerl_reference_vector() {
        let input = trytes_to_trits(
            "GYOMKVTSNHVJNCNFBBAH9AAMXLPLLLROQY99QN9DLSJUHDPBLCFFAIQXZA9BKMBJCYSFHFPXAHDWZFEIZ",
        )
        .unwrap();
        let out = Kerl::hash(&input).unwrap();
        assert_eq!(
            trits_to_trytes(&out),
            "OXJCNFHUNAHWDLKKPELTBFUCVW9KLXKOGWERKTJXQMXTKFKNWNNXYD9DMJJABSEIONOSJTTEVKVDQEWTW"
        );
    }

    #[test]
    fn test_zero_trits_are_zero_bytes() {
        assert_eq!(trits_to_bytes(&[0i8; HASH_LENGTH]), [0u8; BYTE_HASH_LENGTH]);

        let mut out = [7i8; HASH_LENGTH];
        bytes_to_trits(&[0u8; BYTE_HASH_LENGTH], &mut out);
        assert!(out.iter().all(|t| *t == 0));
    }

    #[test]
    fn test_small_values() {
        let mut trits = [0i8; HASH_LENGTH];
        trits[0] = 1;
        let bytes = trits_to_bytes(&trits);
        assert_eq!(bytes[47], 1);
        assert!(bytes[..47].iter().all(|b| *b == 0));

        trits[0] = -1;
        let bytes = trits_to_bytes(&trits);
        assert!(bytes.iter().all(|b| *b == 0xff));

        let mut back = [0i8; HASH_LENGTH];
        bytes_to_trits(&bytes, &mut back);
        assert_eq!(back, trits);
    }

    #[test]
    fn test_trits_bytes_roundtrip() {
        let mut trits = [0i8; HASH_LENGTH];
        for (i, t) in trits.iter_mut().enumerate().take(HASH_LENGTH - 1) {
            *t = (i % 3) as i8 - 1;
        }
        let mut back = [0i8; HASH_LENGTH];
        bytes_to_trits(&trits_to_bytes(&trits), &mut back);
        assert_eq!(back, trits);
    }

    #[test]
    fn test_extreme_bytes_reduce() {
        // Các giá trị ngoài [-HALF, HALF] phải được reduce mod 3^242
        for bytes in [[0x7fu8; BYTE_HASH_LENGTH], [0x80u8; BYTE_HASH_LENGTH]] {
            let mut trits = [0i8; HASH_LENGTH];
            bytes_to_trits(&bytes, &mut trits);
            assert!(trits.iter().all(|t| (-1..=1).contains(t)));
            assert_eq!(trits[HASH_LENGTH - 1], 0);
        }
    }

    #[test]
    fn test_rejects_partial_chunks() {
        let mut kerl = Kerl::new();
        assert!(kerl.absorb(&[0i8; 10]).is_err());
        assert!(kerl.squeeze(&mut [0i8; 242]).is_err());
    }
}
