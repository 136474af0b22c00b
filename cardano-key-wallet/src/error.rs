//! Error types for the cardano-key-wallet library

use alloc::string::String;

use crate::derivation::ChildNumber;

/// Result type alias for key wallet operations
pub type Result<T> = core::result::Result<T, Error>;

/// Errors that can occur in key wallet operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Entropy length is not one of 16, 20, 24, 28 or 32 bytes
    #[error("Invalid entropy size: {0} bytes (expected 16, 20, 24, 28 or 32)")]
    InvalidEntropySize(usize),

    /// Caller-supplied buffer cannot hold the output
    #[error("Buffer too small: {required} slots required, capacity is {capacity}")]
    BufferTooSmall {
        required: usize,
        capacity: usize,
    },

    /// Mnemonic word count is not 12, 15, 18, 21 or 24
    #[error("Invalid mnemonic word count: {0}")]
    InvalidWordCount(usize),

    /// Mnemonic word index outside of the 2048-word list
    #[error("Invalid mnemonic word index: {0}")]
    InvalidWordIndex(u16),

    /// Word is not part of the wordlist
    #[error("Unknown mnemonic word: {0}")]
    UnknownWord(String),

    /// Embedded checksum does not match the entropy
    #[error("Mnemonic checksum mismatch")]
    ChecksumMismatch,

    /// Seed is not 64 bytes long
    #[error("Invalid seed length: expected 64 bytes, got {0}")]
    InvalidSeedLength(usize),

    /// Root key expansion did not produce a valid scalar
    #[error("Seed expansion failed after {0} attempts")]
    SeedExpansionFailed(u32),

    /// Child derivation exhausted its tweak budget
    #[error("Derivation of child {child} failed after {attempts} attempts")]
    DerivationFailed {
        child: ChildNumber,
        attempts: u32,
    },

    /// Index does not fit in 31 bits
    #[error("Invalid child number: {0} (must be less than 2^31)")]
    InvalidChildNumber(u32),

    /// Hardened children need the private key
    #[error("Cannot derive hardened child {0} from a public key")]
    HardenedDerivationFromPublic(ChildNumber),

    /// Bytes are not a valid Ed25519 point
    #[error("Invalid public key")]
    InvalidPublicKey,

    /// Account alias is empty
    #[error("Account alias must not be empty")]
    EmptyAlias,

    /// Address could not be decoded
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Handle refers to a released or unknown entry
    #[error("Unknown handle: {0}")]
    UnknownHandle(String),

    /// Output could not be allocated
    #[error("Allocation failed: {0}")]
    AllocationFailed(String),

    /// Invalid parameter
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl From<alloc::collections::TryReserveError> for Error {
    fn from(e: alloc::collections::TryReserveError) -> Self {
        Error::AllocationFailed(e.to_string())
    }
}

impl From<cbor_event::Error> for Error {
    fn from(e: cbor_event::Error) -> Self {
        Error::InvalidAddress(format!("malformed CBOR: {}", e))
    }
}
