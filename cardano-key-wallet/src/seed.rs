//! Wallet seed
//!
//! A seed is a 512-bit (64 bytes) value stretched from a mnemonic and an
//! optional passphrase with PBKDF2-HMAC-SHA512, as in BIP39. Stretching is
//! delegated to the `bip39` crate.

use alloc::string::String;
use core::fmt;
use core::str::FromStr;
#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use bip39::Language;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{Error, Result};
use crate::mnemonic::Mnemonic;

/// Seed length in bytes
pub const SEED_SIZE: usize = 64;

/// A wallet seed (512 bits / 64 bytes)
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Seed([u8; SEED_SIZE]);

impl Seed {
    /// Create a new seed from bytes
    pub fn new(bytes: [u8; SEED_SIZE]) -> Self {
        Self(bytes)
    }

    /// Create a seed from a slice
    pub fn from_slice(slice: &[u8]) -> Result<Self> {
        if slice.len() != SEED_SIZE {
            return Err(Error::InvalidSeedLength(slice.len()));
        }
        let mut bytes = [0u8; SEED_SIZE];
        bytes.copy_from_slice(slice);
        Ok(Self(bytes))
    }

    /// Stretch a mnemonic and passphrase into a seed
    ///
    /// The passphrase is NFKD-normalized; the salt is `"mnemonic" + passphrase`.
    pub fn from_mnemonic(mnemonic: &Mnemonic, passphrase: &str) -> Self {
        let entropy = mnemonic.to_entropy();
        let words = bip39::Mnemonic::from_entropy_in(Language::English, entropy.as_bytes())
            .expect("entropy length is validated on construction");
        Self(words.to_seed(passphrase))
    }

    /// Get the seed as bytes
    pub fn as_bytes(&self) -> &[u8; SEED_SIZE] {
        &self.0
    }

    /// Get the seed as a byte slice
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Create a seed from hex string
    pub fn from_hex(hex_str: &str) -> Result<Self> {
        let mut bytes = [0u8; SEED_SIZE];
        hex::decode_to_slice(hex_str, &mut bytes).map_err(|e| match e {
            hex::FromHexError::InvalidStringLength | hex::FromHexError::OddLength => {
                Error::InvalidSeedLength(hex_str.len() / 2)
            }
            e => Error::InvalidParameter(format!("Invalid hex: {}", e)),
        })?;
        Ok(Self(bytes))
    }

    /// Convert to hex string
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Check if the seed is all zeros
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&b| b == 0)
    }
}

/// Derive the seed of a mnemonic with an optional passphrase
pub fn derive_seed(mnemonic: &Mnemonic, passphrase: &str) -> Seed {
    Seed::from_mnemonic(mnemonic, passphrase)
}

impl Default for Seed {
    fn default() -> Self {
        Self([0u8; SEED_SIZE])
    }
}

impl From<[u8; SEED_SIZE]> for Seed {
    fn from(bytes: [u8; SEED_SIZE]) -> Self {
        Self::new(bytes)
    }
}

impl TryFrom<&[u8]> for Seed {
    type Error = Error;

    fn try_from(slice: &[u8]) -> Result<Self> {
        Self::from_slice(slice)
    }
}

impl AsRef<[u8]> for Seed {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Seed(***)")
    }
}

impl FromStr for Seed {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

#[cfg(feature = "serde")]
impl Serialize for Seed {
    fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_bytes(&self.0)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Seed {
    fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct SeedVisitor;

        impl<'de> serde::de::Visitor<'de> for SeedVisitor {
            type Value = Seed;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a 64-byte seed")
            }

            fn visit_bytes<E>(self, v: &[u8]) -> core::result::Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Seed::from_slice(v).map_err(E::custom)
            }

            fn visit_seq<A>(self, mut seq: A) -> core::result::Result<Self::Value, A::Error>
            where
                A: serde::de::SeqAccess<'de>,
            {
                let mut bytes = [0u8; SEED_SIZE];
                for (i, byte) in bytes.iter_mut().enumerate() {
                    *byte = seq
                        .next_element()?
                        .ok_or_else(|| serde::de::Error::invalid_length(i, &self))?;
                }
                Ok(Seed(bytes))
            }
        }

        deserializer.deserialize_bytes(SeedVisitor)
    }
}
