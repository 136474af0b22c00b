//! BIP39 entropy encoding

#[cfg(test)]
#[path = "bip39_tests.rs"]
mod tests;

use std::slice;

use crate::error::{error_code, FFIError, FFIErrorCode};

/// Encode entropy into mnemonic word indices
///
/// Writes `entropy_size * 3 / 4` indices to `mnemonic_index` and returns
/// `Success`, or returns the error code without writing anything.
///
/// # Safety
///
/// - `entropy` must point to `entropy_size` readable bytes
/// - `mnemonic_index` must point to `mnemonic_size` writable `u16` slots
/// - `error` must be a valid pointer to an FFIError structure or null
#[no_mangle]
pub unsafe extern "C" fn cardano_bip39_encode(
    entropy: *const u8,
    entropy_size: usize,
    mnemonic_index: *mut u16,
    mnemonic_size: usize,
    error: *mut FFIError,
) -> FFIErrorCode {
    if entropy.is_null() || mnemonic_index.is_null() {
        FFIError::set_error(error, FFIErrorCode::InvalidInput, "Null pointer provided".to_string());
        return FFIErrorCode::InvalidInput;
    }

    let entropy = unsafe { slice::from_raw_parts(entropy, entropy_size) };
    let out = unsafe { slice::from_raw_parts_mut(mnemonic_index, mnemonic_size) };

    match cardano_key_wallet::encode_entropy(entropy, out) {
        Ok(_) => {
            FFIError::set_success(error);
            FFIErrorCode::Success
        }
        Err(e) => {
            let code = error_code(&e);
            FFIError::set_wallet_error(error, e);
            code
        }
    }
}
