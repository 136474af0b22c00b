//! Account management
//!
//! An account is the hardened child `m/44'/1815'/index'` of a wallet. It keeps
//! its own copy of the key material together with the protocol magic and the
//! derivation scheme it inherited, so it stays usable after the wallet is
//! dropped.

pub mod address_generator;

pub use self::address_generator::AddressChain;

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use cardano_network::ProtocolMagic;

use crate::derivation::{ChildNumber, DerivationPath, DerivationScheme};
use crate::error::Result;
use crate::extended_key::{XPrv, XPub};

/// A wallet account
#[derive(Debug, Clone)]
pub struct Account {
    alias: Vec<u8>,
    index: u32,
    key: XPrv,
    protocol_magic: ProtocolMagic,
    scheme: DerivationScheme,
}

impl Account {
    pub(crate) fn new(
        alias: Vec<u8>,
        index: u32,
        key: XPrv,
        protocol_magic: ProtocolMagic,
        scheme: DerivationScheme,
    ) -> Self {
        Self {
            alias,
            index,
            key,
            protocol_magic,
            scheme,
        }
    }

    /// Caller-chosen label, kept as opaque bytes
    pub fn alias(&self) -> &[u8] {
        &self.alias
    }

    /// Hardened account index
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Full derivation path of the account key
    pub fn derivation_path(&self) -> DerivationPath {
        DerivationPath::account(self.index).expect("index was validated on creation")
    }

    /// Protocol magic used for address encoding
    pub fn protocol_magic(&self) -> ProtocolMagic {
        self.protocol_magic
    }

    /// Derivation scheme used below the account key
    pub fn derivation_scheme(&self) -> &DerivationScheme {
        &self.scheme
    }

    /// Account extended public key
    pub fn xpub(&self) -> XPub {
        self.key.public()
    }

    /// Key of the given chain, `account / chain`
    pub fn chain_key(&self, chain: AddressChain) -> Result<XPrv> {
        self.key.derive(chain.child_number(), &self.scheme)
    }

    /// Key of a single address, `account / chain / index`
    pub fn address_key(&self, chain: AddressChain, index: u32) -> Result<XPrv> {
        self.chain_key(chain)?.derive(ChildNumber::from_normal_idx(index)?, &self.scheme)
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Account {} ({}) {}",
            self.index,
            String::from_utf8_lossy(&self.alias),
            self.derivation_path()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::Seed;
    use crate::wallet::Wallet;

    fn account() -> Account {
        Wallet::from_seed(&Seed::new([6u8; 64]), ProtocolMagic::MAINNET)
            .unwrap()
            .create_account("savings", 2)
            .unwrap()
    }

    #[test]
    fn test_account_metadata() {
        let account = account();
        assert_eq!(account.derivation_path().to_string(), "m/44'/1815'/2'");
        assert_eq!(account.to_string(), "Account 2 (savings) m/44'/1815'/2'");
    }

    #[test]
    fn test_chain_keys_differ() {
        let account = account();
        let external = account.chain_key(AddressChain::External).unwrap();
        let internal = account.chain_key(AddressChain::Internal).unwrap();
        assert_ne!(external.public(), internal.public());
    }

    #[test]
    fn test_address_key_matches_public_derivation() {
        let account = account();
        let scheme = account.derivation_scheme();
        let from_public = account
            .xpub()
            .derive(AddressChain::Internal.child_number(), scheme)
            .and_then(|k| k.derive(ChildNumber::from_normal_idx(9).unwrap(), scheme))
            .unwrap();
        assert_eq!(account.address_key(AddressChain::Internal, 9).unwrap().public(), from_public);
    }
}
