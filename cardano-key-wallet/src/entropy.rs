//! BIP39 entropy codec
//!
//! Converts raw entropy into a sequence of 11-bit word indices with an
//! embedded SHA-256 checksum, and back.

use alloc::vec::Vec;
use core::fmt;

use sha2::{Digest, Sha256};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{Error, Result};

/// Number of entries in a BIP39 wordlist.
pub const WORDLIST_SIZE: u16 = 2048;

/// Entropy sizes, in bytes, accepted by the codec.
pub const ENTROPY_SIZES: [usize; 5] = [16, 20, 24, 28, 32];

const BITS_PER_WORD: usize = 11;

/// Number of mnemonic words for an entropy size, if the size is valid.
pub fn word_count_for(entropy_len: usize) -> Option<usize> {
    if ENTROPY_SIZES.contains(&entropy_len) {
        Some(entropy_len * 3 / 4)
    } else {
        None
    }
}

/// Entropy size for a mnemonic word count, if the count is valid.
pub fn entropy_len_for(word_count: usize) -> Option<usize> {
    match word_count {
        12 | 15 | 18 | 21 | 24 => Some(word_count * 4 / 3),
        _ => None,
    }
}

/// Raw mnemonic entropy (128 to 256 bits)
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Entropy(Vec<u8>);

impl Entropy {
    /// Create entropy from a byte slice, checking its length
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        if word_count_for(bytes.len()).is_none() {
            return Err(Error::InvalidEntropySize(bytes.len()));
        }
        Ok(Entropy(bytes.to_vec()))
    }

    /// Generate fresh entropy for a mnemonic of `word_count` words (requires getrandom feature)
    #[cfg(feature = "getrandom")]
    pub fn generate(word_count: usize) -> Result<Self> {
        let len = entropy_len_for(word_count).ok_or(Error::InvalidWordCount(word_count))?;
        let mut bytes = alloc::vec![0u8; len];
        getrandom::getrandom(&mut bytes).map_err(|e| {
            Error::InvalidParameter(format!("Failed to generate entropy: {}", e))
        })?;
        Ok(Entropy(bytes))
    }

    /// The raw bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false, entropy has at least 16 bytes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of words in the matching mnemonic
    pub fn word_count(&self) -> usize {
        self.0.len() * 3 / 4
    }

    /// Number of checksum bits appended to the entropy
    pub fn checksum_bits(&self) -> usize {
        self.0.len() / 4
    }

    /// The checksum bits, right aligned.
    pub fn checksum(&self) -> u8 {
        checksum_of(&self.0, self.checksum_bits())
    }

    /// Encode into word indices.
    pub fn to_word_indices(&self) -> Vec<u16> {
        let mut out = alloc::vec![0u16; self.word_count()];
        self.write_indices(&mut out);
        out
    }

    /// Encode into a caller-provided buffer, returning the number of indices written.
    ///
    /// Fails with [`Error::BufferTooSmall`] when `out` cannot hold every word;
    /// nothing is written in that case.
    pub fn encode_into(&self, out: &mut [u16]) -> Result<usize> {
        let required = self.word_count();
        if out.len() < required {
            return Err(Error::BufferTooSmall {
                required,
                capacity: out.len(),
            });
        }
        self.write_indices(&mut out[..required]);
        Ok(required)
    }

    /// Decode word indices back into entropy, verifying the checksum.
    pub fn from_word_indices(indices: &[u16]) -> Result<Self> {
        let len = entropy_len_for(indices.len()).ok_or(Error::InvalidWordCount(indices.len()))?;
        if let Some(&bad) = indices.iter().find(|&&i| i >= WORDLIST_SIZE) {
            return Err(Error::InvalidWordIndex(bad));
        }

        // entropy bytes followed by one byte holding the left-aligned checksum
        let mut bits = alloc::vec![0u8; len + 1];
        for (word, &index) in indices.iter().enumerate() {
            for bit in 0..BITS_PER_WORD {
                if index & (1 << (BITS_PER_WORD - 1 - bit)) != 0 {
                    let pos = word * BITS_PER_WORD + bit;
                    bits[pos / 8] |= 1 << (7 - pos % 8);
                }
            }
        }

        let cs_bits = len / 4;
        let stored = bits[len] >> (8 - cs_bits);
        let computed = checksum_of(&bits[..len], cs_bits);
        let entropy = Entropy(bits[..len].to_vec());
        bits.zeroize();
        if stored != computed {
            return Err(Error::ChecksumMismatch);
        }
        Ok(entropy)
    }

    fn write_indices(&self, out: &mut [u16]) {
        let cs_bits = self.checksum_bits();
        let mut bits = Vec::with_capacity(self.0.len() + 1);
        bits.extend_from_slice(&self.0);
        bits.push(self.checksum() << (8 - cs_bits));

        for (word, slot) in out.iter_mut().enumerate() {
            let mut index = 0u16;
            for bit in 0..BITS_PER_WORD {
                let pos = word * BITS_PER_WORD + bit;
                index <<= 1;
                if bits[pos / 8] & (1 << (7 - pos % 8)) != 0 {
                    index |= 1;
                }
            }
            *slot = index;
        }
        bits.zeroize();
    }
}

fn checksum_of(entropy: &[u8], cs_bits: usize) -> u8 {
    let hash = Sha256::digest(entropy);
    hash[0] >> (8 - cs_bits)
}

impl AsRef<[u8]> for Entropy {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl TryFrom<&[u8]> for Entropy {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Entropy::from_slice(bytes)
    }
}

impl fmt::Debug for Entropy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entropy({} bytes)", self.0.len())
    }
}

/// Encode raw entropy into `out`, returning the number of word indices written.
///
/// # Examples
///
/// ```rust
/// use cardano_key_wallet::encode_entropy;
///
/// let mut words = [0u16; 24];
/// let written = encode_entropy(&[0u8; 16], &mut words).unwrap();
/// assert_eq!(written, 12);
/// assert_eq!(words[11], 3);
/// ```
pub fn encode_entropy(entropy: &[u8], out: &mut [u16]) -> Result<usize> {
    Entropy::from_slice(entropy)?.encode_into(out)
}
