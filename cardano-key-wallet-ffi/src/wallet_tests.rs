//! Unit tests for wallet FFI module

#[cfg(test)]
mod wallet_tests {
    use crate::error::{error_message_free, FFIError, FFIErrorCode};
    use crate::wallet;
    use cardano_key_wallet::ProtocolMagic;
    use std::ptr;

    #[test]
    fn test_wallet_creation_from_seed() {
        let mut error = FFIError::success();
        let error = &mut error as *mut FFIError;

        let seed = [0x01u8; 64];

        let wallet = unsafe {
            wallet::cardano_wallet_new_from_seed(
                seed.as_ptr(),
                seed.len(),
                ProtocolMagic::MAINNET.value(),
                error,
            )
        };

        assert!(!wallet.is_null());
        assert_eq!(unsafe { (*error).code }, FFIErrorCode::Success);
        assert_eq!(unsafe { (*wallet).inner().protocol_magic() }, ProtocolMagic::MAINNET);

        // Clean up
        unsafe {
            wallet::cardano_wallet_delete(wallet);
        }
    }

    #[test]
    fn test_wallet_creation_invalid_seed_length() {
        let mut error = FFIError::success();
        let seed = [0x01u8; 32];

        let wallet = unsafe {
            wallet::cardano_wallet_new_from_seed(seed.as_ptr(), seed.len(), 1, &mut error)
        };

        assert!(wallet.is_null());
        assert_eq!(error.code, FFIErrorCode::InvalidSeed);
        unsafe { error_message_free(error.message) };
    }

    #[test]
    fn test_wallet_creation_null_seed() {
        let mut error = FFIError::success();
        let wallet = unsafe { wallet::cardano_wallet_new_from_seed(ptr::null(), 64, 1, &mut error) };
        assert!(wallet.is_null());
        assert_eq!(error.code, FFIErrorCode::InvalidInput);
        unsafe { error_message_free(error.message) };
    }

    #[test]
    fn test_wallet_delete_null() {
        // Should not crash
        unsafe {
            wallet::cardano_wallet_delete(ptr::null_mut());
        }
    }
}
