//! Address range generation
//!
//! Addresses `account / chain / i` are derived for every `i` of a range in
//! ascending order. An index whose derivation fails is skipped: the
//! successful addresses are packed densely at the front of the output and
//! the number produced is returned.

use alloc::string::String;
use alloc::vec::Vec;

#[cfg(feature = "parallel")]
use rayon::prelude::{IntoParallelIterator, ParallelIterator};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::Account;
use crate::address::encode_address;
use crate::derivation::ChildNumber;
use crate::error::{Error, Result};
use crate::extended_key::XPrv;

/// Chain selector below an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AddressChain {
    /// Receiving addresses, child 0
    External,
    /// Change addresses, child 1
    Internal,
}

impl AddressChain {
    /// Map the C-style `internal` flag to a chain
    pub fn from_internal(internal: bool) -> Self {
        if internal {
            AddressChain::Internal
        } else {
            AddressChain::External
        }
    }

    /// Child number of the chain key
    pub fn child_number(self) -> ChildNumber {
        match self {
            AddressChain::External => ChildNumber::Normal {
                index: 0,
            },
            AddressChain::Internal => ChildNumber::Normal {
                index: 1,
            },
        }
    }
}

impl Account {
    /// Derive the addresses of `[from_index, from_index + count)` on `chain`.
    ///
    /// Successful addresses are written to `out[..produced]` in ascending index
    /// order and `produced` is returned; failed indices are skipped. Fails with
    /// [`Error::BufferTooSmall`] when `out` holds fewer than `count` entries.
    pub fn generate_addresses(
        &self,
        chain: AddressChain,
        from_index: u32,
        count: usize,
        out: &mut [String],
    ) -> Result<usize> {
        if out.len() < count {
            return Err(Error::BufferTooSmall {
                required: count,
                capacity: out.len(),
            });
        }

        let results = self.derive_range(chain, from_index, count);
        let mut produced = 0;
        for address in results.into_iter().flatten() {
            out[produced] = address;
            produced += 1;
        }

        if produced < count {
            tracing::debug!(
                account = self.index,
                ?chain,
                from_index,
                count,
                produced,
                "address range generated with skipped indices"
            );
        }
        Ok(produced)
    }

    /// Like [`generate_addresses`](Self::generate_addresses), collecting into a new vector.
    pub fn addresses(&self, chain: AddressChain, from_index: u32, count: usize) -> Result<Vec<String>> {
        let mut out = Vec::new();
        out.try_reserve_exact(count)?;
        out.resize(count, String::new());
        let produced = self.generate_addresses(chain, from_index, count, &mut out)?;
        out.truncate(produced);
        Ok(out)
    }

    /// One entry per index of the range, `None` where derivation failed.
    fn derive_range(&self, chain: AddressChain, from_index: u32, count: usize) -> Vec<Option<String>> {
        let chain_key = match self.chain_key(chain) {
            Ok(key) => key,
            Err(e) => {
                tracing::warn!(account = self.index, ?chain, error = %e, "chain key derivation failed");
                return Vec::new();
            }
        };
        let first = from_index as u64;

        #[cfg(feature = "parallel")]
        let results: Vec<Option<String>> = (0..count as u64)
            .into_par_iter()
            .map(|offset| self.address_at(&chain_key, first + offset))
            .collect();
        #[cfg(not(feature = "parallel"))]
        let results: Vec<Option<String>> =
            (0..count as u64).map(|offset| self.address_at(&chain_key, first + offset)).collect();

        results
    }

    fn address_at(&self, chain_key: &XPrv, index: u64) -> Option<String> {
        let derived = u32::try_from(index)
            .map_err(|_| Error::InvalidParameter(format!("address index {} overflows", index)))
            .and_then(ChildNumber::from_normal_idx)
            .and_then(|child| chain_key.derive(child, &self.scheme));
        match derived {
            Ok(key) => Some(encode_address(&key.public(), self.protocol_magic)),
            Err(e) => {
                tracing::warn!(account = self.index, index, error = %e, "skipping address");
                None
            }
        }
    }
}
