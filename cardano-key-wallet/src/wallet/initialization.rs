//! Wallet initialization methods
//!
//! This module contains all methods for creating wallets.

use cardano_network::ProtocolMagic;

use super::{Wallet, WalletConfig};
use crate::derivation::{ChildNumber, DerivationScheme, BIP44_COIN_TYPE, BIP44_PURPOSE};
use crate::error::Result;
use crate::extended_key::XPrv;
use crate::mnemonic::Mnemonic;
use crate::seed::Seed;

impl Wallet {
    /// Create a wallet from a seed with the default configuration
    pub fn from_seed(seed: &Seed, protocol_magic: ProtocolMagic) -> Result<Self> {
        Self::from_seed_with_config(seed, protocol_magic, WalletConfig::default())
    }

    /// Create a wallet from raw seed bytes, which must be exactly 64 bytes long
    pub fn from_seed_bytes(seed: &[u8], protocol_magic: ProtocolMagic) -> Result<Self> {
        Self::from_seed(&Seed::from_slice(seed)?, protocol_magic)
    }

    /// Create a wallet from a mnemonic and an optional BIP39 passphrase
    pub fn from_mnemonic(
        mnemonic: &Mnemonic,
        passphrase: &str,
        protocol_magic: ProtocolMagic,
    ) -> Result<Self> {
        Self::from_seed(&mnemonic.to_seed(passphrase), protocol_magic)
    }

    /// Create a wallet with an explicit configuration
    pub fn from_seed_with_config(
        seed: &Seed,
        protocol_magic: ProtocolMagic,
        config: WalletConfig,
    ) -> Result<Self> {
        config.validate()?;
        Self::from_seed_with_scheme(seed, protocol_magic, config, config.derivation_scheme())
    }

    /// Create a wallet whose derivations use `scheme` instead of the one in `config`
    ///
    /// The scheme's acceptance rule applies to every derivation step, including
    /// the cached `m/44'/1815'` key.
    pub fn from_seed_with_scheme(
        seed: &Seed,
        protocol_magic: ProtocolMagic,
        config: WalletConfig,
        scheme: DerivationScheme,
    ) -> Result<Self> {
        config.validate()?;
        let root = XPrv::from_seed(seed, config.max_seed_expansion_attempts)?;
        let coin_type_key = root
            .derive(ChildNumber::from_hardened_idx(BIP44_PURPOSE)?, &scheme)?
            .derive(ChildNumber::from_hardened_idx(BIP44_COIN_TYPE)?, &scheme)?;
        let wallet_id = Self::compute_wallet_id(&root.public());

        tracing::debug!(
            wallet_id = %hex::encode(&wallet_id[..4]),
            protocol_magic = %protocol_magic,
            "created wallet"
        );

        Ok(Wallet {
            wallet_id,
            protocol_magic,
            config,
            scheme,
            root,
            coin_type_key,
        })
    }
}
