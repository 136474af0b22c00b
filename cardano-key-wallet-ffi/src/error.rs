//! Error handling for FFI interface

use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr;

/// FFI Error code
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FFIErrorCode {
    Success = 0,
    InvalidInput = 1,
    AllocationFailed = 2,
    InvalidEntropy = 3,
    InvalidMnemonic = 4,
    InvalidSeed = 5,
    DerivationFailed = 6,
    InvalidAddress = 7,
    BufferTooSmall = 8,
}

/// FFI Error structure
#[repr(C)]
pub struct FFIError {
    pub code: FFIErrorCode,
    pub message: *mut c_char,
}

impl FFIError {
    /// Create a success result
    pub fn success() -> Self {
        FFIError {
            code: FFIErrorCode::Success,
            message: ptr::null_mut(),
        }
    }

    /// Create an error with code and message
    pub fn error(code: FFIErrorCode, msg: String) -> Self {
        FFIError {
            code,
            message: CString::new(msg).unwrap_or_default().into_raw(),
        }
    }

    /// Set error on a mutable pointer if it's not null
    pub fn set_error(error_ptr: *mut FFIError, code: FFIErrorCode, msg: String) {
        if !error_ptr.is_null() {
            unsafe {
                *error_ptr = Self::error(code, msg);
            }
        }
    }

    /// Set success on a mutable pointer if it's not null
    pub fn set_success(error_ptr: *mut FFIError) {
        if !error_ptr.is_null() {
            unsafe {
                *error_ptr = Self::success();
            }
        }
    }

    /// Store a wallet error on a mutable pointer if it's not null
    pub fn set_wallet_error(error_ptr: *mut FFIError, err: cardano_key_wallet::Error) {
        if !error_ptr.is_null() {
            unsafe {
                *error_ptr = err.into();
            }
        }
    }
}

/// Free an error message
///
/// # Safety
///
/// - `message` must be a pointer returned in an `FFIError` by this library, or null
/// - The pointer must not be used after this call
#[no_mangle]
pub unsafe extern "C" fn error_message_free(message: *mut c_char) {
    if !message.is_null() {
        unsafe {
            let _ = CString::from_raw(message);
        }
    }
}

/// Error code for a wallet error
pub fn error_code(err: &cardano_key_wallet::Error) -> FFIErrorCode {
    use cardano_key_wallet::Error;

    match err {
        Error::InvalidEntropySize(_) => FFIErrorCode::InvalidEntropy,
        Error::BufferTooSmall {
            ..
        } => FFIErrorCode::BufferTooSmall,
        Error::InvalidWordCount(_)
        | Error::InvalidWordIndex(_)
        | Error::UnknownWord(_)
        | Error::ChecksumMismatch => FFIErrorCode::InvalidMnemonic,
        Error::InvalidSeedLength(_) | Error::SeedExpansionFailed(_) => FFIErrorCode::InvalidSeed,
        Error::DerivationFailed {
            ..
        }
        | Error::InvalidChildNumber(_)
        | Error::HardenedDerivationFromPublic(_) => FFIErrorCode::DerivationFailed,
        Error::InvalidAddress(_) | Error::InvalidPublicKey => FFIErrorCode::InvalidAddress,
        Error::EmptyAlias | Error::InvalidParameter(_) | Error::UnknownHandle(_) => {
            FFIErrorCode::InvalidInput
        }
        Error::AllocationFailed(_) => FFIErrorCode::AllocationFailed,
    }
}

/// Convert cardano_key_wallet::Error to FFIError
impl From<cardano_key_wallet::Error> for FFIError {
    fn from(err: cardano_key_wallet::Error) -> Self {
        FFIError::error(error_code(&err), err.to_string())
    }
}
