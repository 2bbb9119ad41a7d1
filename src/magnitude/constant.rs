// ============================================================================
// Magnitude Constants
// Irrational basis elements such as pi
// ============================================================================

use crate::numeric::{NumericError, NumericResult};
use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An irrational basis element of a [`Magnitude`](super::Magnitude).
///
/// Constants are identified structurally by their symbol: two constants
/// with the same symbol are the same basis element, and the numeric value
/// is only consulted when a magnitude is evaluated.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MagConstant {
    symbol: Cow<'static, str>,
    value: f64,
}

impl MagConstant {
    /// The ratio of a circle's circumference to its diameter.
    pub const PI: Self = Self {
        symbol: Cow::Borrowed("pi"),
        value: std::f64::consts::PI,
    };

    /// Define a new constant.
    ///
    /// # Errors
    /// Returns `InvalidInput` for an empty symbol or a value that is not a
    /// finite positive number.
    pub fn new(symbol: impl Into<Cow<'static, str>>, value: f64) -> NumericResult<Self> {
        let symbol = symbol.into();
        if symbol.is_empty() || !value.is_finite() || value <= 0.0 {
            return Err(NumericError::InvalidInput);
        }
        Ok(Self { symbol, value })
    }

    #[inline]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    #[inline]
    pub fn value(&self) -> f64 {
        self.value
    }
}

impl PartialEq for MagConstant {
    fn eq(&self, other: &Self) -> bool {
        self.symbol == other.symbol
    }
}

impl Eq for MagConstant {}

impl Hash for MagConstant {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.symbol.hash(state);
    }
}

impl PartialOrd for MagConstant {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MagConstant {
    fn cmp(&self, other: &Self) -> Ordering {
        self.symbol.cmp(&other.symbol)
    }
}

impl fmt::Display for MagConstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pi() {
        assert_eq!(MagConstant::PI.symbol(), "pi");
        assert_eq!(MagConstant::PI.value(), std::f64::consts::PI);
        assert_eq!(MagConstant::PI.to_string(), "pi");
    }

    #[test]
    fn test_identity_is_structural() {
        let approximate_pi = MagConstant::new("pi", 3.0).unwrap();
        assert_eq!(approximate_pi, MagConstant::PI);

        let e = MagConstant::new("e", std::f64::consts::E).unwrap();
        assert_ne!(e, MagConstant::PI);
        assert!(e < MagConstant::PI);
    }

    #[test]
    fn test_invalid_constants() {
        assert_eq!(MagConstant::new("", 1.0), Err(NumericError::InvalidInput));
        assert_eq!(MagConstant::new("zero", 0.0), Err(NumericError::InvalidInput));
        assert_eq!(MagConstant::new("neg", -2.0), Err(NumericError::InvalidInput));
        assert_eq!(
            MagConstant::new("inf", f64::INFINITY),
            Err(NumericError::InvalidInput)
        );
    }
}
