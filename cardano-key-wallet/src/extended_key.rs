//! Ed25519-BIP32 extended keys
//!
//! [`XPrv`] is a 64-byte extended secret `kL ‖ kR` with its chain code and the
//! cached public key `A = kL·B`. [`XPub`] is the public half.

use alloc::string::String;
use core::fmt;

use curve25519_dalek::edwards::{CompressedEdwardsY, EdwardsPoint};
use curve25519_dalek::scalar::Scalar;
use curve25519_dalek::traits::IsIdentity;
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha512};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::derivation::{
    add_256bits, add_28_mul8, ChainCode, ChildNumber, DerivationPath, DerivationScheme,
};
use crate::error::{Error, Result};
use crate::seed::Seed;

type HmacSha512 = Hmac<Sha512>;

/// Extended secret size, `kL ‖ kR`
pub const EXTENDED_SECRET_SIZE: usize = 64;

/// Public key size
pub const PUBLIC_KEY_SIZE: usize = 32;

/// Serialized extended public key size, `A ‖ chain code`
pub const XPUB_SIZE: usize = 64;

fn hmac_sha512(key: &[u8], parts: &[&[u8]]) -> [u8; 64] {
    let mut mac = HmacSha512::new_from_slice(key).expect("HMAC accepts keys of any length");
    for part in parts {
        mac.update(part);
    }
    let mut out = [0u8; 64];
    out.copy_from_slice(&mac.finalize().into_bytes());
    out
}

fn public_from_scalar_bytes(kl: &[u8; 32]) -> [u8; PUBLIC_KEY_SIZE] {
    EdwardsPoint::mul_base(&Scalar::from_bytes_mod_order(*kl)).compress().to_bytes()
}

/// Extended private key
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct XPrv {
    extended: [u8; EXTENDED_SECRET_SIZE],
    chain_code: ChainCode,
    public: [u8; PUBLIC_KEY_SIZE],
}

impl XPrv {
    /// Expand a seed into a root key.
    ///
    /// Iteration `i` (from 1) computes `HMAC-SHA512(seed, "Root Seed Chain i")`,
    /// hashes the left half with SHA-512 and clamps it. The first candidate whose
    /// third-highest bit is clear becomes the root; its chain code is the right
    /// half of the HMAC block.
    pub fn from_seed(seed: &Seed, max_attempts: u32) -> Result<Self> {
        for i in 1..=max_attempts {
            let message = format!("Root Seed Chain {}", i);
            let mut block = hmac_sha512(seed.as_slice(), &[message.as_bytes()]);

            let mut extended = [0u8; EXTENDED_SECRET_SIZE];
            extended.copy_from_slice(&Sha512::digest(&block[..32]));
            extended[0] &= 0xf8;
            extended[31] &= 0x3f;
            extended[31] |= 0x40;

            if extended[31] & 0x20 == 0 {
                let chain_code = ChainCode::from_hmac_output(&block);
                block.zeroize();
                tracing::trace!(attempts = i, "root key expanded");
                return Ok(Self::from_parts(extended, chain_code));
            }
            block.zeroize();
            extended.zeroize();
        }
        Err(Error::SeedExpansionFailed(max_attempts))
    }

    /// Assemble a key from its extended secret and chain code
    pub fn from_parts(extended: [u8; EXTENDED_SECRET_SIZE], chain_code: ChainCode) -> Self {
        let mut kl = [0u8; 32];
        kl.copy_from_slice(&extended[..32]);
        let public = public_from_scalar_bytes(&kl);
        kl.zeroize();
        XPrv {
            extended,
            chain_code,
            public,
        }
    }

    /// Derive a child key.
    ///
    /// Each attempt folds its counter into the domain tag; the first candidate
    /// accepted by `scheme` is returned. Fails with [`Error::DerivationFailed`]
    /// once `scheme.max_attempts()` candidates have been rejected.
    pub fn derive(&self, child: ChildNumber, scheme: &DerivationScheme) -> Result<XPrv> {
        let index = child.to_le_bytes();
        let chain_code = self.chain_code.as_ref();

        for attempt in 0..scheme.max_attempts() {
            let (key_tag, chain_tag) = child.tags(attempt);
            let (mut z, i) = if child.is_hardened() {
                (
                    hmac_sha512(chain_code, &[&[key_tag], &self.extended, &index]),
                    hmac_sha512(chain_code, &[&[chain_tag], &self.extended, &index]),
                )
            } else {
                (
                    hmac_sha512(chain_code, &[&[key_tag], &self.public, &index]),
                    hmac_sha512(chain_code, &[&[chain_tag], &self.public, &index]),
                )
            };

            let mut kl = [0u8; 32];
            kl.copy_from_slice(&self.extended[..32]);
            let mut child_kl = add_28_mul8(&kl, &z[..32]);
            kl.zeroize();

            if !scheme.accepts(&child_kl, child) {
                tracing::debug!(%child, attempt, "candidate child key rejected, retrying with tweak");
                z.zeroize();
                child_kl.zeroize();
                continue;
            }

            let mut child_kr = add_256bits(&self.extended[32..], &z[32..]);
            z.zeroize();

            let mut extended = [0u8; EXTENDED_SECRET_SIZE];
            extended[..32].copy_from_slice(&child_kl);
            extended[32..].copy_from_slice(&child_kr);
            child_kl.zeroize();
            child_kr.zeroize();

            return Ok(Self::from_parts(extended, ChainCode::from_hmac_output(&i)));
        }

        Err(Error::DerivationFailed {
            child,
            attempts: scheme.max_attempts(),
        })
    }

    /// Derive along every step of `path`
    pub fn derive_path(&self, path: &DerivationPath, scheme: &DerivationScheme) -> Result<XPrv> {
        let mut key = self.clone();
        for &child in path.as_ref() {
            key = key.derive(child, scheme)?;
        }
        Ok(key)
    }

    /// The extended public key
    pub fn public(&self) -> XPub {
        XPub {
            public: self.public,
            chain_code: self.chain_code,
        }
    }

    /// The chain code
    pub fn chain_code(&self) -> ChainCode {
        self.chain_code
    }

    /// The extended secret `kL ‖ kR`
    pub fn extended_secret(&self) -> &[u8; EXTENDED_SECRET_SIZE] {
        &self.extended
    }
}

impl fmt::Debug for XPrv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "XPrv(public: {})", hex::encode(self.public))
    }
}

/// Extended public key
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct XPub {
    public: [u8; PUBLIC_KEY_SIZE],
    chain_code: ChainCode,
}

impl XPub {
    /// Parse `A ‖ chain code`, checking that `A` is a valid curve point
    pub fn from_bytes(bytes: &[u8; XPUB_SIZE]) -> Result<Self> {
        let mut public = [0u8; PUBLIC_KEY_SIZE];
        public.copy_from_slice(&bytes[..32]);
        CompressedEdwardsY(public).decompress().ok_or(Error::InvalidPublicKey)?;
        let mut chain_code = [0u8; 32];
        chain_code.copy_from_slice(&bytes[32..]);
        Ok(XPub {
            public,
            chain_code: ChainCode::from_bytes(chain_code),
        })
    }

    /// Serialize as `A ‖ chain code`
    pub fn to_bytes(&self) -> [u8; XPUB_SIZE] {
        let mut out = [0u8; XPUB_SIZE];
        out[..32].copy_from_slice(&self.public);
        out[32..].copy_from_slice(self.chain_code.as_ref());
        out
    }

    /// The compressed Edwards point `A`
    pub fn public_key(&self) -> &[u8; PUBLIC_KEY_SIZE] {
        &self.public
    }

    /// The chain code
    pub fn chain_code(&self) -> ChainCode {
        self.chain_code
    }

    /// Derive a normal child public key.
    ///
    /// Only the identity point is rejected here; a custom acceptance predicate
    /// works on private scalars and is not evaluated.
    pub fn derive(&self, child: ChildNumber, scheme: &DerivationScheme) -> Result<XPub> {
        if child.is_hardened() {
            return Err(Error::HardenedDerivationFromPublic(child));
        }
        let parent =
            CompressedEdwardsY(self.public).decompress().ok_or(Error::InvalidPublicKey)?;
        let index = child.to_le_bytes();
        let chain_code = self.chain_code.as_ref();

        for attempt in 0..scheme.max_attempts() {
            let (key_tag, chain_tag) = child.tags(attempt);
            let z = hmac_sha512(chain_code, &[&[key_tag], &self.public, &index]);
            let offset = add_28_mul8(&[0u8; 32], &z[..32]);
            let point = parent + EdwardsPoint::mul_base(&Scalar::from_bytes_mod_order(offset));
            if point.is_identity() {
                tracing::debug!(%child, attempt, "candidate child point rejected, retrying with tweak");
                continue;
            }
            let i = hmac_sha512(chain_code, &[&[chain_tag], &self.public, &index]);
            return Ok(XPub {
                public: point.compress().to_bytes(),
                chain_code: ChainCode::from_hmac_output(&i),
            });
        }

        Err(Error::DerivationFailed {
            child,
            attempts: scheme.max_attempts(),
        })
    }

    /// Hex of the serialized key
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }
}

impl fmt::Display for XPub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for XPub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "XPub({})", self.to_hex())
    }
}
