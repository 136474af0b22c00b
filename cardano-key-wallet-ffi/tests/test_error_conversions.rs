//! Tests for error conversions between the wallet and FFI crates

use cardano_key_wallet::{ChildNumber, Error as KeyWalletError};
use cardano_key_wallet_ffi::error::{error_message_free, FFIError, FFIErrorCode};
use assert_matches::assert_matches;
use std::ffi::CStr;

fn code_of(err: KeyWalletError) -> FFIErrorCode {
    let ffi_err: FFIError = err.into();
    let code = ffi_err.code;
    unsafe { error_message_free(ffi_err.message) };
    code
}

#[test]
fn test_key_wallet_error_to_ffi_error() {
    assert_eq!(code_of(KeyWalletError::InvalidEntropySize(3)), FFIErrorCode::InvalidEntropy);
    assert_eq!(
        code_of(KeyWalletError::BufferTooSmall {
            required: 12,
            capacity: 1
        }),
        FFIErrorCode::BufferTooSmall
    );
    assert_eq!(code_of(KeyWalletError::ChecksumMismatch), FFIErrorCode::InvalidMnemonic);
    assert_eq!(code_of(KeyWalletError::UnknownWord("x".into())), FFIErrorCode::InvalidMnemonic);
    assert_eq!(code_of(KeyWalletError::InvalidSeedLength(1)), FFIErrorCode::InvalidSeed);
    assert_eq!(code_of(KeyWalletError::SeedExpansionFailed(1000)), FFIErrorCode::InvalidSeed);
    assert_eq!(
        code_of(KeyWalletError::DerivationFailed {
            child: ChildNumber::from(5),
            attempts: 64
        }),
        FFIErrorCode::DerivationFailed
    );
    assert_eq!(code_of(KeyWalletError::InvalidAddress("x".into())), FFIErrorCode::InvalidAddress);
    assert_eq!(code_of(KeyWalletError::EmptyAlias), FFIErrorCode::InvalidInput);
    assert_eq!(code_of(KeyWalletError::AllocationFailed("x".into())), FFIErrorCode::AllocationFailed);
}

#[test]
fn test_remaining_errors_map_to_specific_codes() {
    assert_eq!(code_of(KeyWalletError::InvalidWordIndex(2048)), FFIErrorCode::InvalidMnemonic);
    assert_eq!(code_of(KeyWalletError::InvalidWordCount(13)), FFIErrorCode::InvalidMnemonic);
    assert_eq!(code_of(KeyWalletError::InvalidChildNumber(1 << 31)), FFIErrorCode::DerivationFailed);
    assert_eq!(
        code_of(KeyWalletError::HardenedDerivationFromPublic(ChildNumber::from(1 << 31))),
        FFIErrorCode::DerivationFailed
    );
    assert_eq!(code_of(KeyWalletError::InvalidPublicKey), FFIErrorCode::InvalidAddress);
    assert_eq!(code_of(KeyWalletError::InvalidParameter("x".into())), FFIErrorCode::InvalidInput);
    assert_eq!(code_of(KeyWalletError::UnknownHandle("x".into())), FFIErrorCode::InvalidInput);
}

#[test]
fn test_error_codes_are_stable() {
    assert_eq!(FFIErrorCode::Success as i32, 0);
    assert_eq!(FFIErrorCode::InvalidInput as i32, 1);
    assert_eq!(FFIErrorCode::InvalidAddress as i32, 7);
    // last code in the C enum
    assert_eq!(FFIErrorCode::BufferTooSmall as i32, 8);
}

#[test]
fn test_error_message_is_preserved() {
    let ffi_err: FFIError = KeyWalletError::InvalidSeedLength(32).into();
    let message = unsafe { CStr::from_ptr(ffi_err.message) }.to_str().unwrap().to_string();
    assert_eq!(message, "Invalid seed length: expected 64 bytes, got 32");
    unsafe { error_message_free(ffi_err.message) };
}

#[test]
fn test_success_has_no_message() {
    let ok = FFIError::success();
    assert_eq!(ok.code, FFIErrorCode::Success);
    assert!(ok.message.is_null());
}

#[test]
fn test_set_wallet_error_writes_through_pointer() {
    let mut error = FFIError::success();
    FFIError::set_wallet_error(&mut error, KeyWalletError::InvalidWordCount(13));
    assert_matches!(error.code, FFIErrorCode::InvalidMnemonic);
    assert!(!error.message.is_null());
    unsafe { error_message_free(error.message) };

    // null pointers are ignored
    FFIError::set_wallet_error(std::ptr::null_mut(), KeyWalletError::EmptyAlias);
}
