//! BIP39 Mnemonic implementation

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use bip39::Language;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::entropy::{entropy_len_for, Entropy};
use crate::error::{Error, Result};
use crate::seed::Seed;

/// BIP39 Mnemonic phrase, held as English wordlist indices
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Mnemonic {
    indices: Vec<u16>,
}

impl Mnemonic {
    /// Build the mnemonic that encodes `entropy`
    pub fn from_entropy(entropy: &Entropy) -> Self {
        Self {
            indices: entropy.to_word_indices(),
        }
    }

    /// Build a mnemonic from raw entropy bytes
    pub fn from_entropy_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(Self::from_entropy(&Entropy::from_slice(bytes)?))
    }

    /// Generate a new random mnemonic (requires getrandom feature)
    #[cfg(feature = "getrandom")]
    pub fn generate(word_count: usize) -> Result<Self> {
        Ok(Self::from_entropy(&Entropy::generate(word_count)?))
    }

    /// Create a mnemonic from word indices, verifying count, range and checksum
    pub fn from_word_indices(indices: &[u16]) -> Result<Self> {
        Entropy::from_word_indices(indices)?;
        Ok(Self {
            indices: indices.to_vec(),
        })
    }

    /// Parse a phrase of English words separated by whitespace
    pub fn from_phrase(phrase: &str) -> Result<Self> {
        let words: Vec<&str> = phrase.split_whitespace().collect();
        if entropy_len_for(words.len()).is_none() {
            return Err(Error::InvalidWordCount(words.len()));
        }
        let mut indices = Vec::with_capacity(words.len());
        for word in words {
            let index = Language::English
                .find_word(word)
                .ok_or_else(|| Error::UnknownWord(word.into()))?;
            indices.push(index);
        }
        let mnemonic = Self::from_word_indices(&indices);
        indices.zeroize();
        mnemonic
    }

    /// Validate a phrase without keeping it
    pub fn validate(phrase: &str) -> bool {
        Self::from_phrase(phrase).is_ok()
    }

    /// The word indices
    pub fn word_indices(&self) -> &[u16] {
        &self.indices
    }

    /// Number of words
    pub fn word_count(&self) -> usize {
        self.indices.len()
    }

    /// Iterate over the English words
    pub fn words(&self) -> impl Iterator<Item = &'static str> + '_ {
        let list = Language::English.word_list();
        self.indices.iter().map(move |&i| list[i as usize])
    }

    /// The words joined by single spaces
    pub fn phrase(&self) -> String {
        let mut phrase = String::new();
        for (i, word) in self.words().enumerate() {
            if i > 0 {
                phrase.push(' ');
            }
            phrase.push_str(word);
        }
        phrase
    }

    /// Recover the entropy this mnemonic encodes
    pub fn to_entropy(&self) -> Entropy {
        Entropy::from_word_indices(&self.indices)
            .expect("indices are validated on construction")
    }

    /// Stretch the mnemonic and an optional passphrase into a seed
    pub fn to_seed(&self, passphrase: &str) -> Seed {
        Seed::from_mnemonic(self, passphrase)
    }
}

impl FromStr for Mnemonic {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_phrase(s)
    }
}

impl fmt::Debug for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Mnemonic({} words)", self.indices.len())
    }
}
