//! Wallet creation and release

#[cfg(test)]
#[path = "wallet_tests.rs"]
mod tests;

use std::ptr;
use std::slice;

use cardano_key_wallet::{ProtocolMagic, Wallet};

use crate::error::{FFIError, FFIErrorCode};
use crate::types::FFIWallet;

/// Create a wallet from a 64-byte seed
///
/// # Safety
///
/// - `seed` must point to `seed_len` readable bytes
/// - `error` must be a valid pointer to an FFIError structure or null
/// - The returned pointer must be freed with `cardano_wallet_delete` when no longer needed
#[no_mangle]
pub unsafe extern "C" fn cardano_wallet_new_from_seed(
    seed: *const u8,
    seed_len: usize,
    protocol_magic: u32,
    error: *mut FFIError,
) -> *mut FFIWallet {
    if seed.is_null() {
        FFIError::set_error(error, FFIErrorCode::InvalidInput, "Seed is null".to_string());
        return ptr::null_mut();
    }

    let seed = unsafe { slice::from_raw_parts(seed, seed_len) };
    match Wallet::from_seed_bytes(seed, ProtocolMagic::new(protocol_magic)) {
        Ok(wallet) => {
            FFIError::set_success(error);
            Box::into_raw(Box::new(FFIWallet::new(wallet)))
        }
        Err(e) => {
            FFIError::set_wallet_error(error, e);
            ptr::null_mut()
        }
    }
}

/// Release a wallet
///
/// Accounts created from the wallet remain valid.
///
/// # Safety
///
/// - `wallet` must be a pointer returned by `cardano_wallet_new_from_seed`, or null
/// - The pointer must not be used after this call
#[no_mangle]
pub unsafe extern "C" fn cardano_wallet_delete(wallet: *mut FFIWallet) {
    if !wallet.is_null() {
        unsafe {
            let _ = Box::from_raw(wallet);
        }
    }
}
