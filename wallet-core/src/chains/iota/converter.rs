// wallet-core/src/chains/iota/converter.rs
//
// Balanced ternary helpers: trytes ⇄ trits
// '9' = 0, 'A'..'M' = 1..13, 'N'..'Z' = -13..-1, trits little-endian

use crate::crypto::TRYTE_ALPHABET;
use crate::error::CryptoError;

pub const TRITS_PER_TRYTE: usize = 3;

/// Trits của một tryte, little-endian
fn tryte_value_to_trits(mut value: i8) -> [i8; TRITS_PER_TRYTE] {
    let mut out = [0i8; TRITS_PER_TRYTE];
    for trit in &mut out {
        let rem = value.rem_euclid(3);
        *trit = if rem == 2 { -1 } else { rem };
        value = (value - *trit) / 3;
    }
    out
}

pub fn trytes_to_trits(trytes: &str) -> Result<Vec<i8>, CryptoError> {
    let mut trits = Vec::with_capacity(trytes.len() * TRITS_PER_TRYTE);
    for c in trytes.chars() {
        let index = TRYTE_ALPHABET.find(c).ok_or_else(|| {
            CryptoError::KeyDerivationFailed(format!("'{c}' is not a tryte character"))
        })? as i8;
        let value = if index <= 13 { index } else { index - 27 };
        trits.extend_from_slice(&tryte_value_to_trits(value));
    }
    Ok(trits)
}

/// `trits.len()` phải là bội số của 3
pub fn trits_to_trytes(trits: &[i8]) -> String {
    let alphabet = TRYTE_ALPHABET.as_bytes();
    trits
        .chunks_exact(TRITS_PER_TRYTE)
        .map(|t| {
            let value = t[0] + 3 * t[1] + 9 * t[2];
            alphabet[value.rem_euclid(27) as usize] as char
        })
        .collect()
}

/// `true` nếu `s` chỉ gồm tryte characters và có đúng `len` ký tự
pub fn is_trytes(s: &str, len: usize) -> bool {
    s.len() == len && s.bytes().all(|b| TRYTE_ALPHABET.as_bytes().contains(&b))
}

/// Cộng 1 vào số balanced ternary (little-endian), bỏ qua overflow
pub fn increment(trits: &mut [i8]) {
    for trit in trits.iter_mut() {
        *trit += 1;
        if *trit > 1 {
            *trit = -1;
        } else {
            return;
        }
    }
}
