//! Cardano Key Wallet Library
//!
//! This library provides the cryptographic core of a hierarchical
//! deterministic Cardano wallet: BIP39 entropy and mnemonic handling, seed
//! stretching, Ed25519-BIP32 ("V2") key derivation, accounts under
//! `m/44'/1815'/index'` and Byron bootstrap-era address encoding.

extern crate alloc;

#[cfg(test)]
mod mnemonic_tests;

pub mod account;
pub mod address;
pub mod derivation;
pub mod entropy;
pub mod error;
pub mod extended_key;
pub mod keystore;
pub mod mnemonic;
pub mod seed;
pub mod wallet;

pub use account::{Account, AddressChain};
pub use address::{encode_address, ByronAddress};
pub use cardano_network::{Network, ProtocolMagic};
pub use derivation::{ChainCode, ChildNumber, DerivationPath, DerivationScheme};
pub use entropy::{encode_entropy, Entropy};
pub use error::{Error, Result};
pub use extended_key::{XPrv, XPub};
pub use keystore::{AccountHandle, Handle, HandleTable, Keystore, WalletHandle};
pub use mnemonic::Mnemonic;
pub use seed::{derive_seed, Seed};
pub use wallet::{Wallet, WalletConfig};

/// Re-export commonly used types
pub mod prelude {
    pub use super::{
        Account, AddressChain, ByronAddress, ChildNumber, DerivationPath, Error, Keystore,
        Mnemonic, ProtocolMagic, Result, Seed, Wallet, WalletConfig, XPrv, XPub,
    };
}
