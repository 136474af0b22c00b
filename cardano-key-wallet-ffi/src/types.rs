//! Opaque handle types exposed over FFI

use cardano_key_wallet::{Account, Wallet};

/// Opaque wallet handle
pub struct FFIWallet {
    pub(crate) wallet: Wallet,
}

impl FFIWallet {
    /// Create a new FFI wallet handle
    pub fn new(wallet: Wallet) -> Self {
        FFIWallet {
            wallet,
        }
    }

    /// Get a reference to the inner wallet
    pub fn inner(&self) -> &Wallet {
        &self.wallet
    }
}

/// Opaque account handle
pub struct FFIAccount {
    pub(crate) account: Account,
}

impl FFIAccount {
    /// Create a new FFI account handle
    pub fn new(account: Account) -> Self {
        FFIAccount {
            account,
        }
    }

    /// Get a reference to the inner account
    pub fn inner(&self) -> &Account {
        &self.account
    }
}
