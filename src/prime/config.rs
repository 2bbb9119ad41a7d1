// ============================================================================
// Factorizer Configuration
// Tuning knobs for trial division and wheel factorization
// ============================================================================

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Largest wheel basis the wheel cache holds (wheel size 30030).
pub const MAX_WHEEL_BASIS_SIZE: usize = 6;

/// Upper bound on the small-prime table, to keep construction cheap.
pub const MAX_TRIAL_PRIME_COUNT: usize = 10_000;

/// Configuration for a [`Factorizer`](super::Factorizer).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FactorizerConfig {
    /// Number of primes in the wheel basis (1..=6)
    pub wheel_basis_size: usize,

    /// Number of leading primes tried by plain division before the
    /// Baillie-PSW shortcut and wheel trial division
    pub trial_prime_count: usize,
}

impl FactorizerConfig {
    /// Create a configuration with the default wheel and prime table.
    pub fn new() -> Self {
        Self {
            wheel_basis_size: 4,
            trial_prime_count: 100,
        }
    }

    /// Builder method: Set the wheel basis size
    pub fn with_wheel_basis_size(mut self, size: usize) -> Self {
        self.wheel_basis_size = size;
        self
    }

    /// Builder method: Set the number of small primes tried first
    pub fn with_trial_prime_count(mut self, count: usize) -> Self {
        self.trial_prime_count = count;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.wheel_basis_size == 0 {
            return Err("Wheel basis size must be at least 1".to_string());
        }
        if self.wheel_basis_size > MAX_WHEEL_BASIS_SIZE {
            return Err(format!(
                "Wheel basis size cannot exceed {}",
                MAX_WHEEL_BASIS_SIZE
            ));
        }
        if self.trial_prime_count > MAX_TRIAL_PRIME_COUNT {
            return Err(format!(
                "Trial prime count cannot exceed {}",
                MAX_TRIAL_PRIME_COUNT
            ));
        }
        Ok(())
    }
}

impl Default for FactorizerConfig {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Preset Configurations (Factory Methods)
// ============================================================================

impl FactorizerConfig {
    /// Smallest footprint: a 2·3·5 wheel and a short prime table.
    pub fn compact() -> Self {
        Self::new()
            .with_wheel_basis_size(3)
            .with_trial_prime_count(16)
    }

    /// Largest cached wheel and a longer prime table, for inputs with
    /// many medium-sized factors.
    pub fn thorough() -> Self {
        Self::new()
            .with_wheel_basis_size(MAX_WHEEL_BASIS_SIZE)
            .with_trial_prime_count(1_000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FactorizerConfig::default();
        assert_eq!(config.wheel_basis_size, 4);
        assert_eq!(config.trial_prime_count, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = FactorizerConfig::new()
            .with_wheel_basis_size(5)
            .with_trial_prime_count(0);

        assert_eq!(config.wheel_basis_size, 5);
        assert_eq!(config.trial_prime_count, 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        assert!(FactorizerConfig::new()
            .with_wheel_basis_size(0)
            .validate()
            .is_err());
        assert!(FactorizerConfig::new()
            .with_wheel_basis_size(7)
            .validate()
            .is_err());
        assert!(FactorizerConfig::new()
            .with_trial_prime_count(MAX_TRIAL_PRIME_COUNT + 1)
            .validate()
            .is_err());
    }

    #[test]
    fn test_preset_configs() {
        assert!(FactorizerConfig::compact().validate().is_ok());
        assert!(FactorizerConfig::thorough().validate().is_ok());
        assert_eq!(FactorizerConfig::thorough().wheel_basis_size, 6);
    }
}
