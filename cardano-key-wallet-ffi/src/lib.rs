//! FFI bindings for the cardano-key-wallet library
//!
//! Wallets and accounts cross the boundary as opaque boxed pointers. Every
//! fallible call takes an optional `FFIError` out-parameter; strings handed
//! to the caller must be released with the matching `*_free`/`*_delete`
//! function.

pub mod account;
pub mod bip39;
pub mod error;
pub mod types;
pub mod wallet;

pub use account::{
    cardano_account_create, cardano_account_delete, cardano_account_delete_addresses,
    cardano_account_generate_addresses,
};
pub use bip39::cardano_bip39_encode;
pub use error::{error_message_free, FFIError, FFIErrorCode};
pub use types::{FFIAccount, FFIWallet};
pub use wallet::{cardano_wallet_delete, cardano_wallet_new_from_seed};
