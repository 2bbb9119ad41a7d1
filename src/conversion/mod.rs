// ============================================================================
// Conversion Module
// Conversion factors between units and their application to values
// ============================================================================
//
// This module provides:
// - Unit: symbol + magnitude + dimension
// - ConversionFactor: source magnitude / target magnitude, exact or approximate
// - Conversion: a checked (source, target) pair, built once and applied to
//   any Representation
// - Free functions convert, value_cast and common_unit
//
// Dimension compatibility is checked when a Conversion is built, never while
// a value is being converted.

mod errors;
mod representation;
mod unit;

pub use errors::{ConversionError, ConversionResult};
pub use representation::Representation;
pub use unit::{Unit, UnitKind};

use crate::magnitude::{Magnitude, MagnitudeValue};
use crate::numeric::NumericResult;

/// Whether a conversion factor is an exact ratio of integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Exactness {
    Exact,
    /// Involves an irrational constant or a fractional exponent
    Approximate,
}

/// The magnitude that takes a value in one unit to the same quantity in
/// another.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConversionFactor {
    magnitude: Magnitude,
}

impl ConversionFactor {
    /// `from.magnitude / to.magnitude`.
    ///
    /// # Errors
    /// - `DimensionMismatch` if the units are not convertible
    /// - `Numeric` if the exponents overflow
    pub fn between(from: &Unit, to: &Unit) -> ConversionResult<Self> {
        if !from.dimension().convertible(to.dimension()) {
            return Err(ConversionError::DimensionMismatch {
                from: from.dimension().clone(),
                to: to.dimension().clone(),
            });
        }
        Ok(Self {
            magnitude: from.magnitude().divide(to.magnitude())?,
        })
    }

    pub fn from_magnitude(magnitude: Magnitude) -> Self {
        Self { magnitude }
    }

    pub fn magnitude(&self) -> &Magnitude {
        &self.magnitude
    }

    pub fn exactness(&self) -> Exactness {
        if self.magnitude.is_rational() {
            Exactness::Exact
        } else {
            Exactness::Approximate
        }
    }

    #[inline]
    pub fn is_exact(&self) -> bool {
        self.exactness() == Exactness::Exact
    }

    /// The factor for the opposite direction.
    pub fn inverse(&self) -> Self {
        Self {
            magnitude: self.magnitude.invert(),
        }
    }

    /// The factor evaluated in `T`.
    pub fn value<T: MagnitudeValue>(&self) -> NumericResult<T> {
        self.magnitude.to_numeric_value()
    }
}

// ============================================================================
// Conversion
// ============================================================================

/// A validated conversion from one unit to another.
///
/// # Example
/// ```
/// use unit_algebra::conversion::{Conversion, Unit};
/// use unit_algebra::dimension::{BaseDimension, Dimension};
/// use unit_algebra::magnitude::Magnitude;
/// use unit_algebra::numeric::Ratio;
///
/// let metre = Unit::base("m", Dimension::base(BaseDimension::new("L")));
/// let km = Unit::scaled("km", Magnitude::integer_power(10, Ratio::integer(3)).unwrap(), &metre)
///     .unwrap();
///
/// let to_metres = Conversion::new(&km, &metre).unwrap();
/// assert_eq!(to_metres.convert(3i32).unwrap(), 3000);
///
/// let to_km = Conversion::new(&metre, &km).unwrap();
/// assert!(to_km.convert(3500i32).is_err());
/// assert_eq!(to_km.cast(3500i32).unwrap(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    source: Unit,
    target: Unit,
    factor: ConversionFactor,
}

impl Conversion {
    /// Check that `from` and `to` are convertible and compute the factor.
    ///
    /// # Errors
    /// `DimensionMismatch` if the dimensions differ.
    pub fn new(from: &Unit, to: &Unit) -> ConversionResult<Self> {
        let factor = ConversionFactor::between(from, to)?;
        if !factor.is_exact() {
            tracing::debug!(
                from = %from,
                to = %to,
                factor = %factor.magnitude(),
                "approximate conversion factor"
            );
        }
        Ok(Self {
            source: from.clone(),
            target: to.clone(),
            factor,
        })
    }

    pub fn source(&self) -> &Unit {
        &self.source
    }

    pub fn target(&self) -> &Unit {
        &self.target
    }

    pub fn factor(&self) -> &ConversionFactor {
        &self.factor
    }

    /// The conversion in the opposite direction.
    pub fn inverse(&self) -> Self {
        Self {
            source: self.target.clone(),
            target: self.source.clone(),
            factor: self.factor.inverse(),
        }
    }

    /// Implicit conversion.
    ///
    /// # Errors
    /// `PrecisionLoss` if `R` cannot apply the factor without truncating.
    pub fn convert<R: Representation>(&self, value: R) -> ConversionResult<R> {
        value.convert_by(&self.factor)
    }

    /// Explicit conversion; truncates toward zero for integer types.
    pub fn cast<R: Representation>(&self, value: R) -> ConversionResult<R> {
        value.cast_by(&self.factor)
    }
}

/// Convert `value` from `from` to `to` without loss of precision.
pub fn convert<R: Representation>(value: R, from: &Unit, to: &Unit) -> ConversionResult<R> {
    Conversion::new(from, to)?.convert(value)
}

/// Convert `value` from `from` to `to`, truncating if needed.
pub fn value_cast<R: Representation>(value: R, from: &Unit, to: &Unit) -> ConversionResult<R> {
    Conversion::new(from, to)?.cast(value)
}

/// The unit both `a` and `b` convert to with integral factors, if their
/// dimensions unify.
///
/// Returns `a` or `b` itself when it already has that magnitude and the
/// common dimension.
pub fn common_unit(a: &Unit, b: &Unit) -> Option<Unit> {
    let dimension = a.dimension().common_dimension(b.dimension())?;
    let magnitude = a.magnitude().common_magnitude(b.magnitude());

    for unit in [a, b] {
        if unit.magnitude() == &magnitude && unit.dimension() == &dimension {
            return Some(unit.clone());
        }
    }
    Some(Unit::derived(
        format!("common({}, {})", a.symbol(), b.symbol()),
        magnitude,
        dimension,
    ))
}
