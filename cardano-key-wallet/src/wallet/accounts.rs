//! Account creation

use alloc::string::String;
use alloc::vec::Vec;

use super::Wallet;
use crate::account::Account;
use crate::derivation::ChildNumber;
use crate::error::{Error, Result};

impl Wallet {
    /// Create the account at hardened `index`, path `m/44'/1815'/index'`.
    ///
    /// The alias is any non-empty byte sequence. Creating the same index twice
    /// yields accounts with identical keys.
    pub fn create_account(&self, alias: impl Into<Vec<u8>>, index: u32) -> Result<Account> {
        let alias = alias.into();
        if alias.is_empty() {
            return Err(Error::EmptyAlias);
        }
        let child = ChildNumber::from_hardened_idx(index)?;
        let key = self.coin_type_key.derive(child, &self.scheme).map_err(|e| {
            tracing::warn!(account = index, error = %e, "account derivation failed");
            e
        })?;

        tracing::debug!(account = index, alias = %String::from_utf8_lossy(&alias), "created account");
        Ok(Account::new(alias, index, key, self.protocol_magic, self.scheme))
    }
}
