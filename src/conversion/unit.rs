// ============================================================================
// Unit
// A symbol bound to a magnitude and a dimension
// ============================================================================

use super::errors::{ConversionError, ConversionResult};
use crate::dimension::Dimension;
use crate::magnitude::Magnitude;
use crate::numeric::Ratio;
use std::borrow::Cow;
use std::fmt;
use std::ops::{Div, Mul};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How a unit was introduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum UnitKind {
    /// A base unit or an alias of another unit
    Named,
    /// A magnitude times another unit, such as `km`
    Scaled,
    /// A product, quotient or power of other units
    Derived,
}

/// A unit of measurement: `magnitude * (base units of dimension)`.
///
/// Units are plain immutable values; there is no registry. Two units are
/// interchangeable when their dimensions are convertible, and the
/// conversion factor between them is the quotient of their magnitudes.
///
/// # Example
/// ```
/// use unit_algebra::conversion::Unit;
/// use unit_algebra::dimension::{BaseDimension, Dimension};
/// use unit_algebra::magnitude::Magnitude;
/// use unit_algebra::numeric::Ratio;
///
/// let metre = Unit::base("m", Dimension::base(BaseDimension::new("L")));
/// let kilo = Magnitude::integer_power(10, Ratio::integer(3)).unwrap();
/// let kilometre = Unit::scaled("km", kilo, &metre).unwrap();
/// assert!(kilometre.dimension().convertible(metre.dimension()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Unit {
    symbol: Cow<'static, str>,
    kind: UnitKind,
    magnitude: Magnitude,
    dimension: Dimension,
}

impl Unit {
    // ========================================================================
    // Construction
    // ========================================================================

    /// A named unit with magnitude one.
    pub fn base(symbol: impl Into<Cow<'static, str>>, dimension: Dimension) -> Self {
        Self {
            symbol: symbol.into(),
            kind: UnitKind::Named,
            magnitude: Magnitude::one(),
            dimension,
        }
    }

    /// `magnitude` times `reference`, with the reference's dimension.
    pub fn scaled(
        symbol: impl Into<Cow<'static, str>>,
        magnitude: Magnitude,
        reference: &Unit,
    ) -> ConversionResult<Self> {
        Ok(Self {
            symbol: symbol.into(),
            kind: UnitKind::Scaled,
            magnitude: magnitude.multiply(&reference.magnitude)?,
            dimension: reference.dimension.clone(),
        })
    }

    /// A new name for an existing unit.
    pub fn alias(symbol: impl Into<Cow<'static, str>>, target: &Unit) -> Self {
        Self {
            symbol: symbol.into(),
            kind: UnitKind::Named,
            magnitude: target.magnitude.clone(),
            dimension: target.dimension.clone(),
        }
    }

    /// Re-tag this unit with a convertible dimension, typically to give a
    /// derived unit a named quantity kind (`J` as energy rather than
    /// `N*m`).
    ///
    /// # Errors
    /// `DimensionMismatch` if the dimensions are not convertible.
    pub fn with_dimension(mut self, dimension: Dimension) -> ConversionResult<Self> {
        if !self.dimension.convertible(&dimension) {
            return Err(ConversionError::DimensionMismatch {
                from: self.dimension,
                to: dimension,
            });
        }
        self.dimension = dimension;
        Ok(self)
    }

    /// Internal constructor for algebra results and common units.
    pub(crate) fn derived(symbol: String, magnitude: Magnitude, dimension: Dimension) -> Self {
        Self {
            symbol: Cow::Owned(symbol),
            kind: UnitKind::Derived,
            magnitude,
            dimension,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn kind(&self) -> UnitKind {
        self.kind
    }

    pub fn magnitude(&self) -> &Magnitude {
        &self.magnitude
    }

    pub fn dimension(&self) -> &Dimension {
        &self.dimension
    }

    // ========================================================================
    // Algebra
    // ========================================================================

    pub fn multiply(&self, other: &Unit) -> ConversionResult<Unit> {
        Ok(Self::derived(
            format!("{}*{}", self.symbol, other.symbol),
            self.magnitude.multiply(&other.magnitude)?,
            self.dimension.multiply(&other.dimension)?,
        ))
    }

    pub fn divide(&self, other: &Unit) -> ConversionResult<Unit> {
        let symbol = if other.kind == UnitKind::Derived {
            format!("{}/({})", self.symbol, other.symbol)
        } else {
            format!("{}/{}", self.symbol, other.symbol)
        };
        Ok(Self::derived(
            symbol,
            self.magnitude.divide(&other.magnitude)?,
            self.dimension.divide(&other.dimension)?,
        ))
    }

    pub fn pow(&self, exponent: Ratio) -> ConversionResult<Unit> {
        let base = if self.kind == UnitKind::Derived {
            format!("({})", self.symbol)
        } else {
            self.symbol.to_string()
        };
        let symbol = if exponent.is_integer() {
            format!("{}^{}", base, exponent)
        } else {
            format!("{}^({})", base, exponent)
        };
        Ok(Self::derived(
            symbol,
            self.magnitude.pow(exponent)?,
            self.dimension.pow(exponent)?,
        ))
    }
}

// ============================================================================
// Trait Implementations
// ============================================================================

// Infallible operators for ergonomics (panic on exponent overflow)
impl Mul for &Unit {
    type Output = Unit;

    fn mul(self, rhs: Self) -> Self::Output {
        self.multiply(rhs).expect("Unit exponent overflow")
    }
}

impl Div for &Unit {
    type Output = Unit;

    fn div(self, rhs: Self) -> Self::Output {
        self.divide(rhs).expect("Unit exponent overflow")
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.symbol)
    }
}
