//! Handle-based wallet store
//!
//! [`Keystore`] owns wallets and accounts and hands out [`Handle`]s to them.
//! Handles carry a generation counter: once an entry is released, every
//! handle to it (and to its slot) resolves to [`Error::UnknownHandle`]
//! instead of reaching a different entry.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;

use cardano_network::ProtocolMagic;

use crate::account::{Account, AddressChain};
use crate::entropy;
use crate::error::{Error, Result};
use crate::seed::Seed;
use crate::wallet::{Wallet, WalletConfig};

/// Typed reference to an entry of a [`HandleTable`]
pub struct Handle<T> {
    index: u32,
    generation: u32,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Handle<T> {
    /// Slot index
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Generation of the slot when the handle was issued
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Handle<T> {}

impl<T> PartialEq for Handle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && self.generation == other.generation
    }
}

impl<T> Eq for Handle<T> {}

impl<T> Hash for Handle<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
        self.generation.hash(state);
    }
}

impl<T> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle({}v{})", self.index, self.generation)
    }
}

impl<T> fmt::Display for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}

struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

/// Generational slot table
pub struct HandleTable<T> {
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
    len: usize,
}

impl<T> Default for HandleTable<T> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            len: 0,
        }
    }
}

impl<T> HandleTable<T> {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value`, reusing a released slot when one is available
    pub fn insert(&mut self, value: T) -> Result<Handle<T>> {
        let (index, generation) = match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.value = Some(value);
                (index, slot.generation)
            }
            None => {
                let index = u32::try_from(self.slots.len())
                    .map_err(|_| Error::AllocationFailed("handle table is full".into()))?;
                self.slots.try_reserve(1)?;
                self.slots.push(Slot {
                    generation: 0,
                    value: Some(value),
                });
                (index, 0)
            }
        };
        self.len += 1;
        Ok(Handle {
            index,
            generation,
            _marker: PhantomData,
        })
    }

    fn slot(&self, handle: Handle<T>) -> Option<&Slot<T>> {
        self.slots
            .get(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation && slot.value.is_some())
    }

    /// Borrow the entry behind `handle`
    pub fn get(&self, handle: Handle<T>) -> Result<&T> {
        self.slot(handle)
            .and_then(|slot| slot.value.as_ref())
            .ok_or_else(|| Error::UnknownHandle(handle.to_string()))
    }

    /// Whether `handle` refers to a live entry
    pub fn contains(&self, handle: Handle<T>) -> bool {
        self.slot(handle).is_some()
    }

    /// Release the entry behind `handle` and return it
    pub fn remove(&mut self, handle: Handle<T>) -> Result<T> {
        if !self.contains(handle) {
            return Err(Error::UnknownHandle(handle.to_string()));
        }
        let slot = &mut self.slots[handle.index as usize];
        let value = slot.value.take().ok_or_else(|| Error::UnknownHandle(handle.to_string()))?;
        // a slot whose generation would wrap is retired instead of reused
        if let Some(next) = slot.generation.checked_add(1) {
            slot.generation = next;
            self.free.push(handle.index);
        }
        self.len -= 1;
        Ok(value)
    }

    /// Number of live entries
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the table has no live entries
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<T> fmt::Debug for HandleTable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandleTable").field("len", &self.len).field("slots", &self.slots.len()).finish()
    }
}

/// Handle to a wallet in a [`Keystore`]
pub type WalletHandle = Handle<Wallet>;

/// Handle to an account in a [`Keystore`]
pub type AccountHandle = Handle<Account>;

/// Caller-owned store of wallets and accounts addressed by handles
#[derive(Debug, Default)]
pub struct Keystore {
    config: WalletConfig,
    wallets: HandleTable<Wallet>,
    accounts: HandleTable<Account>,
}

impl Keystore {
    /// Create an empty keystore with the default wallet configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty keystore whose wallets use `config`
    pub fn with_config(config: WalletConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    /// Encode raw entropy into mnemonic word indices
    pub fn encode_entropy(&self, entropy: &[u8], out: &mut [u16]) -> Result<usize> {
        entropy::encode_entropy(entropy, out)
    }

    /// Create a wallet from a 64-byte seed
    pub fn wallet_from_seed(&mut self, seed: &[u8], protocol_magic: u32) -> Result<WalletHandle> {
        let seed = Seed::from_slice(seed)?;
        let wallet =
            Wallet::from_seed_with_config(&seed, ProtocolMagic::new(protocol_magic), self.config)?;
        self.wallets.insert(wallet)
    }

    /// Borrow a wallet
    pub fn wallet(&self, handle: WalletHandle) -> Result<&Wallet> {
        self.wallets.get(handle)
    }

    /// Release a wallet; accounts created from it stay valid
    pub fn wallet_release(&mut self, handle: WalletHandle) -> Result<()> {
        self.wallets.remove(handle).map(drop)
    }

    /// Create an account of a wallet
    pub fn account_create(
        &mut self,
        wallet: WalletHandle,
        alias: impl Into<Vec<u8>>,
        index: u32,
    ) -> Result<AccountHandle> {
        let account = self.wallets.get(wallet)?.create_account(alias, index)?;
        self.accounts.insert(account)
    }

    /// Borrow an account
    pub fn account(&self, handle: AccountHandle) -> Result<&Account> {
        self.accounts.get(handle)
    }

    /// Release an account
    pub fn account_release(&mut self, handle: AccountHandle) -> Result<()> {
        self.accounts.remove(handle).map(drop)
    }

    /// Generate account addresses, see [`Account::generate_addresses`]
    pub fn generate_addresses(
        &self,
        account: AccountHandle,
        internal: bool,
        from_index: u32,
        count: usize,
        out: &mut [String],
    ) -> Result<usize> {
        self.accounts.get(account)?.generate_addresses(
            AddressChain::from_internal(internal),
            from_index,
            count,
            out,
        )
    }

    /// Number of live wallets
    pub fn wallet_count(&self) -> usize {
        self.wallets.len()
    }

    /// Number of live accounts
    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }
}
