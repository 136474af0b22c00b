//! Ed25519-BIP32 derivation primitives
//!
//! Child numbers, derivation paths and the parameters of the child key
//! derivation scheme. The scheme follows the "V2" variant of Ed25519-BIP32
//! used by Cardano wallets:
//!
//! - hardened children hash the parent extended secret, normal children hash
//!   the parent public key;
//! - the left half of the first HMAC output is multiplied by 8, truncated to
//!   28 bytes and added to the parent scalar;
//! - the right half of the second HMAC output becomes the child chain code.
//!
//! A candidate child scalar that fails the scheme's acceptance predicate is
//! not an error by itself: the step is retried with the attempt counter
//! folded into the domain tag (the "tweak"). Attempt 0 is the unmodified
//! reference derivation.

use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use curve25519_dalek::scalar::Scalar;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::error::{Error, Result};

/// Bit that marks a serialized child number as hardened.
pub const HARDENED_BIT: u32 = 0x8000_0000;

/// Upper bound on derivation attempts; the tweak is stored in the six high bits of the tag.
pub const MAX_DERIVATION_ATTEMPTS: u32 = 64;

/// Default ceiling on root key expansion attempts.
pub const DEFAULT_SEED_EXPANSION_ATTEMPTS: u32 = 1000;

/// BIP44 purpose, always hardened.
pub const BIP44_PURPOSE: u32 = 44;

/// Registered coin type for Ada, always hardened.
pub const BIP44_COIN_TYPE: u32 = 1815;

pub(crate) const TAG_HARDENED_KEY: u8 = 0x00;
pub(crate) const TAG_HARDENED_CHAIN: u8 = 0x01;
pub(crate) const TAG_NORMAL_KEY: u8 = 0x02;
pub(crate) const TAG_NORMAL_CHAIN: u8 = 0x03;

/// A child number for a derivation step
#[derive(Copy, Clone, PartialEq, Eq, Debug, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ChildNumber {
    /// Non-hardened key
    Normal {
        /// Key index, within [0, 2^31 - 1]
        index: u32,
    },
    /// Hardened key
    Hardened {
        /// Key index, within [0, 2^31 - 1]
        index: u32,
    },
}

impl ChildNumber {
    /// Create a [`Normal`] from an index, returns an error if the index is not within
    /// [0, 2^31 - 1].
    ///
    /// [`Normal`]: #variant.Normal
    pub fn from_normal_idx(index: u32) -> Result<Self> {
        if index & HARDENED_BIT == 0 {
            Ok(ChildNumber::Normal {
                index,
            })
        } else {
            Err(Error::InvalidChildNumber(index))
        }
    }

    /// Create a [`Hardened`] from an index, returns an error if the index is not within
    /// [0, 2^31 - 1].
    ///
    /// [`Hardened`]: #variant.Hardened
    pub fn from_hardened_idx(index: u32) -> Result<Self> {
        if index & HARDENED_BIT == 0 {
            Ok(ChildNumber::Hardened {
                index,
            })
        } else {
            Err(Error::InvalidChildNumber(index))
        }
    }

    /// Returns `true` if the child number is a [`Normal`] value.
    ///
    /// [`Normal`]: #variant.Normal
    pub fn is_normal(&self) -> bool {
        !self.is_hardened()
    }

    /// Returns `true` if the child number is a [`Hardened`] value.
    ///
    /// [`Hardened`]: #variant.Hardened
    pub fn is_hardened(&self) -> bool {
        matches!(self, ChildNumber::Hardened { .. })
    }

    /// The index without the hardened bit.
    pub fn index(&self) -> u32 {
        match *self {
            ChildNumber::Normal {
                index,
            }
            | ChildNumber::Hardened {
                index,
            } => index,
        }
    }

    /// Domain tags `(key, chain code)` for the given attempt.
    pub(crate) fn tags(&self, attempt: u32) -> (u8, u8) {
        let tweak = (attempt.min(MAX_DERIVATION_ATTEMPTS - 1) as u8) << 2;
        if self.is_hardened() {
            (TAG_HARDENED_KEY | tweak, TAG_HARDENED_CHAIN | tweak)
        } else {
            (TAG_NORMAL_KEY | tweak, TAG_NORMAL_CHAIN | tweak)
        }
    }
}

impl From<u32> for ChildNumber {
    fn from(number: u32) -> Self {
        if number & HARDENED_BIT != 0 {
            ChildNumber::Hardened {
                index: number ^ HARDENED_BIT,
            }
        } else {
            ChildNumber::Normal {
                index: number,
            }
        }
    }
}

impl From<ChildNumber> for u32 {
    fn from(cnum: ChildNumber) -> Self {
        match cnum {
            ChildNumber::Normal {
                index,
            } => index,
            ChildNumber::Hardened {
                index,
            } => index | HARDENED_BIT,
        }
    }
}

impl fmt::Display for ChildNumber {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ChildNumber::Hardened {
                index,
            } => write!(f, "{}'", index),
            ChildNumber::Normal {
                index,
            } => write!(f, "{}", index),
        }
    }
}

impl FromStr for ChildNumber {
    type Err = Error;

    fn from_str(inp: &str) -> Result<ChildNumber> {
        let is_hardened = inp.ends_with('\'') || inp.ends_with('h');
        let digits = if is_hardened {
            &inp[..inp.len() - 1]
        } else {
            inp
        };
        let index = digits
            .parse::<u32>()
            .map_err(|_| Error::InvalidParameter(format!("Invalid child number: {}", inp)))?;
        if is_hardened {
            ChildNumber::from_hardened_idx(index)
        } else {
            ChildNumber::from_normal_idx(index)
        }
    }
}

/// A derivation path, e.g. `m/44'/1815'/0'/0/3`
#[derive(Clone, PartialEq, Eq, Ord, PartialOrd, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DerivationPath(Vec<ChildNumber>);

impl DerivationPath {
    /// The empty path, pointing at the master key.
    pub fn master() -> Self {
        DerivationPath(Vec::new())
    }

    /// Path of the account at `index`: `m/44'/1815'/index'`.
    pub fn account(index: u32) -> Result<Self> {
        Ok(DerivationPath(vec![
            ChildNumber::from_hardened_idx(BIP44_PURPOSE)?,
            ChildNumber::from_hardened_idx(BIP44_COIN_TYPE)?,
            ChildNumber::from_hardened_idx(index)?,
        ]))
    }

    /// Returns a new path with `child` appended.
    pub fn child(&self, child: ChildNumber) -> Self {
        let mut path = self.0.clone();
        path.push(child);
        DerivationPath(path)
    }

    /// Number of derivation steps.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether this is the master path.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<ChildNumber>> for DerivationPath {
    fn from(numbers: Vec<ChildNumber>) -> Self {
        DerivationPath(numbers)
    }
}

impl<'a> From<&'a [ChildNumber]> for DerivationPath {
    fn from(numbers: &'a [ChildNumber]) -> Self {
        DerivationPath(numbers.to_vec())
    }
}

impl AsRef<[ChildNumber]> for DerivationPath {
    fn as_ref(&self) -> &[ChildNumber] {
        &self.0
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("m")?;
        for cn in self.0.iter() {
            write!(f, "/{}", cn)?;
        }
        Ok(())
    }
}

impl fmt::Debug for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl FromStr for DerivationPath {
    type Err = Error;

    fn from_str(path: &str) -> Result<DerivationPath> {
        let mut parts = path.split('/');
        if parts.next() != Some("m") {
            return Err(Error::InvalidParameter(format!("Invalid derivation path: {}", path)));
        }
        let numbers = parts.map(str::parse).collect::<Result<Vec<ChildNumber>>>()?;
        Ok(DerivationPath(numbers))
    }
}

/// Chain code (32 bytes) of an extended key
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default, Zeroize)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ChainCode([u8; 32]);

impl ChainCode {
    /// Wrap raw chain code bytes
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        ChainCode(bytes)
    }

    /// Raw bytes
    pub fn to_bytes(self) -> [u8; 32] {
        self.0
    }

    pub(crate) fn from_hmac_output(output: &[u8]) -> Self {
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&output[32..64]);
        ChainCode(bytes)
    }
}

impl From<[u8; 32]> for ChainCode {
    fn from(bytes: [u8; 32]) -> Self {
        ChainCode(bytes)
    }
}

impl AsRef<[u8]> for ChainCode {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for ChainCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ChainCode({})", hex::encode(self.0))
    }
}

/// Acceptance rule applied to every candidate child scalar.
///
/// Returning `false` makes the derivation retry with the next tweak.
pub type ScalarAcceptance = fn(candidate: &[u8; 32], child: ChildNumber) -> bool;

/// Default acceptance: the child scalar must not be a multiple of the group order.
pub fn nonzero_scalar(candidate: &[u8; 32], _child: ChildNumber) -> bool {
    Scalar::from_bytes_mod_order(*candidate) != Scalar::ZERO
}

/// Parameters of the child key derivation loop
#[derive(Clone, Copy)]
pub struct DerivationScheme {
    max_attempts: u32,
    acceptance: ScalarAcceptance,
}

impl DerivationScheme {
    /// A scheme with the given attempt ceiling, clamped to `1..=MAX_DERIVATION_ATTEMPTS`.
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.clamp(1, MAX_DERIVATION_ATTEMPTS),
            acceptance: nonzero_scalar,
        }
    }

    /// Replace the acceptance predicate.
    pub fn with_acceptance(mut self, acceptance: ScalarAcceptance) -> Self {
        self.acceptance = acceptance;
        self
    }

    /// Attempt ceiling
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub(crate) fn accepts(&self, candidate: &[u8; 32], child: ChildNumber) -> bool {
        (self.acceptance)(candidate, child)
    }
}

impl Default for DerivationScheme {
    fn default() -> Self {
        Self::new(MAX_DERIVATION_ATTEMPTS)
    }
}

impl fmt::Debug for DerivationScheme {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("DerivationScheme").field("max_attempts", &self.max_attempts).finish()
    }
}

/// `x + 8 * y[0..28]`, little-endian, wrapping at 2^256.
pub(crate) fn add_28_mul8(x: &[u8; 32], y: &[u8]) -> [u8; 32] {
    let mut carry: u16 = 0;
    let mut out = [0u8; 32];
    for i in 0..28 {
        let r = x[i] as u16 + ((y[i] as u16) << 3) + carry;
        out[i] = (r & 0xff) as u8;
        carry = r >> 8;
    }
    for i in 28..32 {
        let r = x[i] as u16 + carry;
        out[i] = (r & 0xff) as u8;
        carry = r >> 8;
    }
    out
}

/// `x + y` over 256-bit little-endian integers, wrapping.
pub(crate) fn add_256bits(x: &[u8], y: &[u8]) -> [u8; 32] {
    let mut carry: u16 = 0;
    let mut out = [0u8; 32];
    for i in 0..32 {
        let r = x[i] as u16 + y[i] as u16 + carry;
        out[i] = r as u8;
        carry = r >> 8;
    }
    out
}

impl ChildNumber {
    /// Little-endian serialization used as HMAC input.
    pub(crate) fn to_le_bytes(self) -> [u8; 4] {
        u32::from(self).to_le_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_child_number_roundtrip() {
        let normal = ChildNumber::from_normal_idx(5).unwrap();
        let hardened = ChildNumber::from_hardened_idx(5).unwrap();
        assert_eq!(u32::from(normal), 5);
        assert_eq!(u32::from(hardened), 0x8000_0005);
        assert_eq!(ChildNumber::from(0x8000_0005), hardened);
        assert_eq!(normal.to_string(), "5");
        assert_eq!(hardened.to_string(), "5'");
        assert!(ChildNumber::from_normal_idx(HARDENED_BIT).is_err());
        assert!(ChildNumber::from_hardened_idx(HARDENED_BIT | 1).is_err());
    }

    #[test]
    fn test_tags_separate_domains() {
        let normal = ChildNumber::from_normal_idx(0).unwrap();
        let hardened = ChildNumber::from_hardened_idx(0).unwrap();
        assert_eq!(normal.tags(0), (0x02, 0x03));
        assert_eq!(hardened.tags(0), (0x00, 0x01));
        assert_eq!(normal.tags(1), (0x06, 0x07));
        assert_eq!(hardened.tags(63), (0xfc, 0xfd));
    }

    #[test]
    fn test_derivation_path_parse() {
        let path: DerivationPath = "m/44'/1815'/0'/1/7".parse().unwrap();
        assert_eq!(path.len(), 5);
        assert_eq!(path.to_string(), "m/44'/1815'/0'/1/7");
        assert_eq!(DerivationPath::account(0).unwrap().to_string(), "m/44'/1815'/0'");
        assert_eq!("m/0h".parse::<DerivationPath>().unwrap().to_string(), "m/0'");
        assert!("44'/0".parse::<DerivationPath>().is_err());
        assert!("m/x".parse::<DerivationPath>().is_err());
        assert!(DerivationPath::master().is_empty());
    }

    #[test]
    fn test_add_28_mul8() {
        let x = [0u8; 32];
        let mut y = [0u8; 32];
        y[0] = 0x20;
        y[28] = 0xff; // ignored, only 28 bytes are used
        let out = add_28_mul8(&x, &y);
        assert_eq!(out[0], 0x00);
        assert_eq!(out[1], 0x01);
        assert_eq!(out[28], 0x00);

        let mut x = [0u8; 32];
        x[0] = 0xff;
        let mut y = [0u8; 32];
        y[0] = 0x01;
        let out = add_28_mul8(&x, &y);
        assert_eq!(out[0], 0x07);
        assert_eq!(out[1], 0x01);
    }

    #[test]
    fn test_add_256bits_wraps() {
        let x = [0xffu8; 32];
        let mut y = [0u8; 32];
        y[0] = 1;
        assert_eq!(add_256bits(&x, &y), [0u8; 32]);
    }

    #[test]
    fn test_scheme_clamps_attempts() {
        assert_eq!(DerivationScheme::new(0).max_attempts(), 1);
        assert_eq!(DerivationScheme::new(1000).max_attempts(), MAX_DERIVATION_ATTEMPTS);
        assert_eq!(DerivationScheme::default().max_attempts(), MAX_DERIVATION_ATTEMPTS);
    }

    #[test]
    fn test_nonzero_scalar() {
        let child = ChildNumber::from_normal_idx(0).unwrap();
        assert!(!nonzero_scalar(&[0u8; 32], child));
        assert!(nonzero_scalar(&[1u8; 32], child));
        // The group order itself reduces to zero.
        let order = Scalar::ZERO - Scalar::ONE;
        let mut l = order.to_bytes();
        l[0] += 1;
        assert!(!nonzero_scalar(&l, child));
    }
}
