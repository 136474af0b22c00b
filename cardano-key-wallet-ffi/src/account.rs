//! Account creation and address generation

#[cfg(test)]
#[path = "account_tests.rs"]
mod tests;

use std::ffi::{CStr, CString};
use std::os::raw::{c_char, c_int};
use std::ptr;
use std::slice;

use cardano_key_wallet::AddressChain;

use crate::error::{FFIError, FFIErrorCode};
use crate::types::{FFIAccount, FFIWallet};

/// Create the account `m/44'/1815'/index'` of a wallet
///
/// # Safety
///
/// - `wallet` must be a valid pointer to an FFIWallet
/// - `alias` must be a valid pointer to a null-terminated byte string; any encoding is accepted
/// - `error` must be a valid pointer to an FFIError structure or null
/// - The returned pointer must be freed with `cardano_account_delete` when no longer needed
#[no_mangle]
pub unsafe extern "C" fn cardano_account_create(
    wallet: *const FFIWallet,
    alias: *const c_char,
    index: u32,
    error: *mut FFIError,
) -> *mut FFIAccount {
    if wallet.is_null() || alias.is_null() {
        FFIError::set_error(error, FFIErrorCode::InvalidInput, "Null pointer provided".to_string());
        return ptr::null_mut();
    }

    let alias = unsafe { CStr::from_ptr(alias) }.to_bytes();

    let wallet = unsafe { &*wallet };
    match wallet.inner().create_account(alias, index) {
        Ok(account) => {
            FFIError::set_success(error);
            Box::into_raw(Box::new(FFIAccount::new(account)))
        }
        Err(e) => {
            FFIError::set_wallet_error(error, e);
            ptr::null_mut()
        }
    }
}

/// Release an account
///
/// # Safety
///
/// - `account` must be a pointer returned by `cardano_account_create`, or null
/// - The pointer must not be used after this call
#[no_mangle]
pub unsafe extern "C" fn cardano_account_delete(account: *mut FFIAccount) {
    if !account.is_null() {
        unsafe {
            let _ = Box::from_raw(account);
        }
    }
}

/// Generate addresses `from_index .. from_index + num_indices` of an account chain
///
/// A non-zero `internal` selects the change chain.
/// Successful addresses are written to `addresses[0..n]` in ascending index
/// order and `n` is returned; indices whose derivation fails are skipped.
/// Each written string must be released with `cardano_account_delete_addresses`.
///
/// # Safety
///
/// - `account` must be a valid pointer to an FFIAccount
/// - `addresses` must point to `num_indices` writable `char *` slots
/// - `error` must be a valid pointer to an FFIError structure or null
#[no_mangle]
pub unsafe extern "C" fn cardano_account_generate_addresses(
    account: *const FFIAccount,
    internal: c_int,
    from_index: u32,
    num_indices: usize,
    addresses: *mut *mut c_char,
    error: *mut FFIError,
) -> usize {
    if account.is_null() || (addresses.is_null() && num_indices > 0) {
        FFIError::set_error(error, FFIErrorCode::InvalidInput, "Null pointer provided".to_string());
        return 0;
    }

    let account = unsafe { &*account };
    let generated = match account.inner().addresses(
        AddressChain::from_internal(internal != 0),
        from_index,
        num_indices,
    ) {
        Ok(generated) => generated,
        Err(e) => {
            FFIError::set_wallet_error(error, e);
            return 0;
        }
    };
    if generated.is_empty() {
        FFIError::set_success(error);
        return 0;
    }

    let out = unsafe { slice::from_raw_parts_mut(addresses, num_indices) };
    let mut written = 0;
    for address in generated {
        // base58 never contains NUL
        if let Ok(c_address) = CString::new(address) {
            out[written] = c_address.into_raw();
            written += 1;
        }
    }

    FFIError::set_success(error);
    written
}

/// Free address strings written by `cardano_account_generate_addresses`
///
/// The array itself belongs to the caller; its first `count` slots are freed
/// and reset to null.
///
/// # Safety
///
/// - `addresses` must point to `count` slots filled by `cardano_account_generate_addresses`, or be null
#[no_mangle]
pub unsafe extern "C" fn cardano_account_delete_addresses(addresses: *mut *mut c_char, count: usize) {
    if !addresses.is_null() {
        unsafe {
            let slots = slice::from_raw_parts_mut(addresses, count);
            for slot in slots {
                if !slot.is_null() {
                    let _ = CString::from_raw(*slot);
                    *slot = ptr::null_mut();
                }
            }
        }
    }
}
