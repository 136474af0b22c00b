//! Wallet configuration
//!
//! This module defines the configuration options for wallets.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::derivation::{
    DerivationScheme, DEFAULT_SEED_EXPANSION_ATTEMPTS, MAX_DERIVATION_ATTEMPTS,
};
use crate::error::Error;

/// Wallet configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WalletConfig {
    /// Ceiling on root key expansion iterations
    pub max_seed_expansion_attempts: u32,
    /// Ceiling on tweak attempts per child derivation step
    pub max_derivation_attempts: u32,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            max_seed_expansion_attempts: DEFAULT_SEED_EXPANSION_ATTEMPTS,
            max_derivation_attempts: MAX_DERIVATION_ATTEMPTS,
        }
    }
}

impl WalletConfig {
    /// Create a new wallet configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the root key expansion ceiling
    pub fn with_max_seed_expansion_attempts(mut self, attempts: u32) -> Self {
        self.max_seed_expansion_attempts = attempts;
        self
    }

    /// Set the child derivation ceiling
    pub fn with_max_derivation_attempts(mut self, attempts: u32) -> Self {
        self.max_derivation_attempts = attempts;
        self
    }

    /// The derivation scheme for this configuration, with the default acceptance rule
    pub fn derivation_scheme(&self) -> DerivationScheme {
        DerivationScheme::new(self.max_derivation_attempts)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), Error> {
        if self.max_seed_expansion_attempts == 0 {
            return Err(Error::InvalidParameter(
                "Seed expansion attempts must be at least 1".into(),
            ));
        }
        if self.max_derivation_attempts == 0 {
            return Err(Error::InvalidParameter("Derivation attempts must be at least 1".into()));
        }
        if self.max_derivation_attempts > MAX_DERIVATION_ATTEMPTS {
            return Err(Error::InvalidParameter(format!(
                "Derivation attempts must be at most {}",
                MAX_DERIVATION_ATTEMPTS
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = WalletConfig::default();
        assert_eq!(config.max_seed_expansion_attempts, 1000);
        assert_eq!(config.max_derivation_attempts, 64);
        assert_eq!(config.derivation_scheme().max_attempts(), 64);
    }

    #[test]
    fn test_config_builder() {
        let config =
            WalletConfig::new().with_max_seed_expansion_attempts(10).with_max_derivation_attempts(3);
        assert_eq!(config.max_seed_expansion_attempts, 10);
        assert_eq!(config.max_derivation_attempts, 3);
        assert_eq!(config.derivation_scheme().max_attempts(), 3);
    }

    #[test]
    fn test_config_validation() {
        let mut config = WalletConfig::default();
        assert!(config.validate().is_ok());

        config.max_seed_expansion_attempts = 0;
        assert!(config.validate().is_err());

        config.max_seed_expansion_attempts = 1000;
        config.max_derivation_attempts = 0;
        assert!(config.validate().is_err());

        config.max_derivation_attempts = 65;
        assert!(config.validate().is_err());
    }
}
