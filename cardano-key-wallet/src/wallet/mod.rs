//! Cardano HD wallet
//!
//! A wallet owns the root extended key expanded from a seed, the protocol
//! magic addresses are built for, and the derivation parameters its accounts
//! inherit. Accounts are created from it and are independent values after
//! that: dropping the wallet does not invalidate them.

pub mod accounts;
pub mod config;
pub mod initialization;

pub use self::config::WalletConfig;

use alloc::string::String;
use core::fmt;

use cardano_network::ProtocolMagic;
use sha2::{Digest, Sha256};

use crate::derivation::DerivationScheme;
use crate::extended_key::{XPrv, XPub};

/// HD wallet root
#[derive(Debug, Clone)]
pub struct Wallet {
    /// Unique wallet ID (SHA256 hash of the serialized root public key)
    wallet_id: [u8; 32],
    protocol_magic: ProtocolMagic,
    config: WalletConfig,
    scheme: DerivationScheme,
    root: XPrv,
    /// Cached `m/44'/1815'`
    coin_type_key: XPrv,
}

impl Wallet {
    /// Compute wallet ID from the root public key
    pub fn compute_wallet_id(root: &XPub) -> [u8; 32] {
        let mut id = [0u8; 32];
        id.copy_from_slice(&Sha256::digest(root.to_bytes()));
        id
    }

    /// Unique wallet ID
    pub fn wallet_id(&self) -> &[u8; 32] {
        &self.wallet_id
    }

    /// Hex-encoded wallet ID
    pub fn wallet_id_hex(&self) -> String {
        hex::encode(self.wallet_id)
    }

    /// Protocol magic inherited by every account
    pub fn protocol_magic(&self) -> ProtocolMagic {
        self.protocol_magic
    }

    /// Configuration the wallet was created with
    pub fn config(&self) -> &WalletConfig {
        &self.config
    }

    /// Derivation scheme inherited by every account
    pub fn derivation_scheme(&self) -> &DerivationScheme {
        &self.scheme
    }

    /// Root extended public key
    pub fn root_public_key(&self) -> XPub {
        self.root.public()
    }

    pub(crate) fn root(&self) -> &XPrv {
        &self.root
    }
}

impl fmt::Display for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id_hex = hex::encode(&self.wallet_id[..4]);
        match self.protocol_magic.network() {
            Some(network) => write!(f, "Wallet [{}...] ({})", id_hex, network),
            None => write!(f, "Wallet [{}...] (magic {})", id_hex, self.protocol_magic),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derivation::DerivationPath;
    use crate::mnemonic::Mnemonic;
    use crate::seed::Seed;

    const ABANDON_ABOUT: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    #[test]
    fn test_wallet_from_mnemonic() {
        let mnemonic: Mnemonic = ABANDON_ABOUT.parse().unwrap();
        let wallet = Wallet::from_mnemonic(&mnemonic, "", ProtocolMagic::MAINNET).unwrap();
        let seed = mnemonic.to_seed("");
        let same = Wallet::from_seed(&seed, ProtocolMagic::MAINNET).unwrap();
        assert_eq!(wallet.wallet_id(), same.wallet_id());
        assert_eq!(wallet.root_public_key(), same.root_public_key());
    }

    #[test]
    fn test_wallet_id_is_root_hash() {
        let wallet = Wallet::from_seed(&Seed::new([9u8; 64]), ProtocolMagic::TESTNET).unwrap();
        assert_eq!(wallet.wallet_id(), &Wallet::compute_wallet_id(&wallet.root_public_key()));
        assert_eq!(wallet.wallet_id_hex().len(), 64);
    }

    #[test]
    fn test_coin_type_key_is_cached_path() {
        let wallet = Wallet::from_seed(&Seed::new([9u8; 64]), ProtocolMagic::MAINNET).unwrap();
        let path: DerivationPath = "m/44'/1815'".parse().unwrap();
        let expected = wallet.root().derive_path(&path, wallet.derivation_scheme()).unwrap();
        assert_eq!(wallet.coin_type_key.public(), expected.public());
    }

    #[test]
    fn test_wallet_display() {
        let wallet = Wallet::from_seed(&Seed::new([9u8; 64]), ProtocolMagic::MAINNET).unwrap();
        let display = wallet.to_string();
        assert!(display.starts_with("Wallet ["));
        assert!(display.ends_with("(mainnet)"));

        let custom = Wallet::from_seed(&Seed::new([9u8; 64]), ProtocolMagic::new(42)).unwrap();
        assert!(custom.to_string().ends_with("(magic 42)"));
    }
}
