// wallet-core/src/crypto/mnemonic.rs
//
// Mnemonic Codec - BIP-39 entropy ⇄ words
// Chuẩn: BIP-39 (11-bit word indices, SHA-256 checksum ENT/32 bits)

use crate::error::MnemonicError;
use sha2::{Digest, Sha256};
use std::fmt;
use std::sync::OnceLock;
use tracing::{debug, warn};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Bundled canonical English word list.
const ENGLISH_WORD_LIST: &str = include_str!("../../resources/bip39_english.txt");

/// SHA-256 of `resources/bip39_english.txt`, byte for byte.
const ENGLISH_WORD_LIST_SHA256: &str =
    "2f5eed53a4727b4bf8880d8f3f199efc90e58503646d9ff8eff3a2ed3b24dbda";

pub const DICTIONARY_SIZE: usize = 2048;
const BITS_PER_WORD: usize = 11;
/// Checksum bits are taken from a single SHA-256 digest.
const MAX_CHECKSUM_BITS: usize = 256;

static ENGLISH: OnceLock<Result<MnemonicCodec, MnemonicError>> = OnceLock::new();

/// Số lượng words hỗ trợ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordCount {
    /// 12 words (128-bit entropy)
    Twelve = 12,
    /// 15 words (160-bit entropy)
    Fifteen = 15,
    /// 18 words (192-bit entropy)
    Eighteen = 18,
    /// 21 words (224-bit entropy)
    TwentyOne = 21,
    /// 24 words (256-bit entropy)
    TwentyFour = 24,
}

impl WordCount {
    pub const fn from_entropy_bits(bits: usize) -> Option<Self> {
        match bits {
            128 => Some(WordCount::Twelve),
            160 => Some(WordCount::Fifteen),
            192 => Some(WordCount::Eighteen),
            224 => Some(WordCount::TwentyOne),
            256 => Some(WordCount::TwentyFour),
            _ => None,
        }
    }

    pub const fn from_len(len: usize) -> Option<Self> {
        match len {
            12 => Some(WordCount::Twelve),
            15 => Some(WordCount::Fifteen),
            18 => Some(WordCount::Eighteen),
            21 => Some(WordCount::TwentyOne),
            24 => Some(WordCount::TwentyFour),
            _ => None,
        }
    }
}

// =============================================================================
// MNEMONIC WORDS
// =============================================================================

/// Ordered mnemonic word sequence.
///
/// Không validate khi khởi tạo; dùng [`MnemonicCodec::decode`] hoặc
/// `Protocol::validate_mnemonic_words` để kiểm tra.
#[derive(Clone, PartialEq, Eq, Hash, Zeroize, ZeroizeOnDrop)]
pub struct MnemonicWords {
    words: Vec<String>,
}

// Custom Debug - KHÔNG BAO GIỜ hiển thị words
impl fmt::Debug for MnemonicWords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MnemonicWords")
            .field("word_count", &self.words.len())
            .field("words", &"[REDACTED]")
            .finish()
    }
}

impl MnemonicWords {
    pub fn new(words: Vec<String>) -> Self {
        Self { words }
    }

    /// Split a space-delimited sentence. No validation.
    pub fn from_phrase(phrase: &str) -> Self {
        MnemonicCodec::split(phrase)
    }

    #[inline]
    pub fn as_slice(&self) -> &[String] {
        &self.words
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Space-joined sentence
    ///
    /// # Warning
    /// Cẩn thận khi hiển thị hoặc log giá trị này!
    pub fn phrase(&self) -> Zeroizing<String> {
        Zeroizing::new(MnemonicCodec::join(&self.words))
    }
}

impl From<Vec<String>> for MnemonicWords {
    fn from(words: Vec<String>) -> Self {
        Self::new(words)
    }
}

// =============================================================================
// CODEC
// =============================================================================

/// Bidirectional entropy ⇄ word mapping over a verified 2048-word dictionary.
///
/// The dictionary is sorted, so lookups are binary searches.
pub struct MnemonicCodec {
    words: Vec<String>,
}

impl fmt::Debug for MnemonicCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MnemonicCodec")
            .field("words", &self.words.len())
            .finish()
    }
}

impl MnemonicCodec {
    /// Shared English codec, loaded và verify một lần cho cả process.
    pub fn english() -> Result<&'static MnemonicCodec, MnemonicError> {
        ENGLISH
            .get_or_init(|| Self::load_dictionary(ENGLISH_WORD_LIST, ENGLISH_WORD_LIST_SHA256))
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Build a codec from a raw newline-separated word list.
    ///
    /// Fails with `DictionaryCorrupt` unless the raw bytes hash to
    /// `expected_sha256` (lowercase hex), there are exactly 2048 lines, and
    /// the lines are strictly sorted.
    pub fn load_dictionary(raw: &str, expected_sha256: &str) -> Result<Self, MnemonicError> {
        let digest = hex::encode(Sha256::digest(raw.as_bytes()));
        if digest != expected_sha256 {
            warn!(expected = expected_sha256, actual = %digest, "word list digest mismatch");
            return Err(MnemonicError::DictionaryCorrupt(format!(
                "digest {digest} does not match expected {expected_sha256}"
            )));
        }

        let words: Vec<String> = raw.lines().map(str::to_owned).collect();
        if words.len() != DICTIONARY_SIZE {
            return Err(MnemonicError::DictionaryCorrupt(format!(
                "expected {DICTIONARY_SIZE} lines, found {}",
                words.len()
            )));
        }
        if words.iter().any(String::is_empty) || words.windows(2).any(|w| w[0] >= w[1]) {
            return Err(MnemonicError::DictionaryCorrupt(
                "word list is not strictly sorted".to_string(),
            ));
        }

        debug!(words = words.len(), "word list verified");
        Ok(Self { words })
    }

    // =========================================================================
    // ENCODE / DECODE
    // =========================================================================

    /// Entropy → words
    ///
    /// # Algorithm
    /// 1. checksum = SHA-256(entropy), lấy `ENT / 32` bits đầu
    /// 2. bitstream = entropy || checksum bits
    /// 3. Cắt thành nhóm 11 bits → index trong dictionary
    pub fn encode(&self, entropy: &[u8]) -> Result<MnemonicWords, MnemonicError> {
        let len = entropy.len();
        if len == 0 || len % 4 != 0 || len * 8 / 32 > MAX_CHECKSUM_BITS {
            return Err(MnemonicError::InvalidEntropyLength(len));
        }

        let checksum = Sha256::digest(entropy);
        let entropy_bits = len * 8;
        let total_bits = entropy_bits + entropy_bits / 32;

        let bit_at = |pos: usize| -> usize {
            let byte = if pos < entropy_bits {
                entropy[pos / 8]
            } else {
                checksum[(pos - entropy_bits) / 8]
            };
            ((byte >> (7 - pos % 8)) & 1) as usize
        };

        let words = (0..total_bits / BITS_PER_WORD)
            .map(|w| {
                let index = (0..BITS_PER_WORD)
                    .fold(0usize, |acc, b| (acc << 1) | bit_at(w * BITS_PER_WORD + b));
                self.words[index].clone()
            })
            .collect();

        Ok(MnemonicWords::new(words))
    }

    /// Words → entropy, verifying the embedded checksum.
    pub fn decode<S: AsRef<str>>(&self, words: &[S]) -> Result<Zeroizing<Vec<u8>>, MnemonicError> {
        let count = words.len();
        let total_bits = count * BITS_PER_WORD;
        if count == 0 || count % 3 != 0 || total_bits / 33 > MAX_CHECKSUM_BITS {
            return Err(MnemonicError::InvalidWordListSize(count));
        }

        let indices: Zeroizing<Vec<usize>> = Zeroizing::new(
            words
                .iter()
                .enumerate()
                .map(|(i, word)| {
                    self.index_of(word.as_ref())
                        .ok_or_else(|| MnemonicError::UnknownWord {
                            position: i + 1,
                            word: word.as_ref().to_string(),
                        })
                })
                .collect::<Result<Vec<usize>, _>>()?,
        );

        let checksum_bits = total_bits / 33;
        let entropy_bits = total_bits - checksum_bits;
        let index_bit = |pos: usize| -> u8 {
            ((indices[pos / BITS_PER_WORD] >> (BITS_PER_WORD - 1 - pos % BITS_PER_WORD)) & 1) as u8
        };

        let mut entropy = Zeroizing::new(vec![0u8; entropy_bits / 8]);
        for pos in 0..entropy_bits {
            entropy[pos / 8] |= index_bit(pos) << (7 - pos % 8);
        }

        let checksum = Sha256::digest(&*entropy);
        let matches = (0..checksum_bits).all(|i| {
            let expected = (checksum[i / 8] >> (7 - i % 8)) & 1;
            index_bit(entropy_bits + i) == expected
        });
        if !matches {
            return Err(MnemonicError::ChecksumMismatch);
        }

        Ok(entropy)
    }

    // =========================================================================
    // DICTIONARY ACCESS
    // =========================================================================

    #[inline]
    pub fn index_of(&self, word: &str) -> Option<usize> {
        self.words
            .binary_search_by(|candidate| candidate.as_str().cmp(word))
            .ok()
    }

    pub fn word_at(&self, index: usize) -> Option<&str> {
        self.words.get(index).map(String::as_str)
    }

    // =========================================================================
    // STRING HELPERS
    // =========================================================================

    pub fn join<S: AsRef<str>>(words: &[S]) -> String {
        words
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn split(sentence: &str) -> MnemonicWords {
        MnemonicWords::new(sentence.split_whitespace().map(str::to_owned).collect())
    }
}

// =============================================================================
// UNIT TESTS
// =============================================================================
