// ============================================================================
// Representation Types
// How each numeric type applies a conversion factor
// ============================================================================
//
// Two paths per type:
// - convert_by: implicit, refuses any factor the type cannot apply exactly
// - cast_by: explicit, truncates where needed
//
// Float types apply every factor approximately and share one path.

use super::errors::{ConversionError, ConversionResult};
use super::ConversionFactor;
use crate::magnitude::{MagBase, Magnitude};
use crate::numeric::{FixedPoint, NumericError};
use rust_decimal::Decimal;

/// A numeric type that unit conversions can be applied to.
pub trait Representation: Copy {
    /// Scale by `factor`, failing with `PrecisionLoss` if the result
    /// could be truncated for some input.
    fn convert_by(self, factor: &ConversionFactor) -> ConversionResult<Self>;

    /// Scale by `factor`, truncating when the factor is not exact in this
    /// type.
    fn cast_by(self, factor: &ConversionFactor) -> ConversionResult<Self> {
        self.convert_by(factor)
    }
}

// ============================================================================
// Floating Point
// ============================================================================

macro_rules! impl_float_representation {
    ($($t:ty),*) => {
        $(
            impl Representation for $t {
                fn convert_by(self, factor: &ConversionFactor) -> ConversionResult<Self> {
                    let magnitude = factor.magnitude();
                    if magnitude.is_one() {
                        return Ok(self);
                    }
                    // Multiplying or dividing by an exact integer keeps
                    // values like 1000 * 0.001 exact where possible.
                    if magnitude.is_integral() {
                        return Ok(self * magnitude.to_numeric_value::<$t>()?);
                    }
                    let inverse = magnitude.invert();
                    if inverse.is_integral() {
                        return Ok(self / inverse.to_numeric_value::<$t>()?);
                    }
                    Ok(self * magnitude.to_numeric_value::<$t>()?)
                }
            }
        )*
    };
}

impl_float_representation!(f32, f64);

// ============================================================================
// Integers
// ============================================================================

fn out_of_range(negative: bool) -> ConversionError {
    if negative {
        NumericError::Underflow.into()
    } else {
        NumericError::Overflow.into()
    }
}

/// `value * magnitude` for an integral magnitude, in `i128`.
fn integral_product(value: i128, magnitude: &Magnitude) -> ConversionResult<i128> {
    let multiplier = magnitude
        .to_numeric_value::<i128>()
        .map_err(|_| out_of_range(value < 0))?;
    value
        .checked_mul(multiplier)
        .ok_or_else(|| out_of_range(value < 0))
}

/// `value / magnitude` for an integral magnitude, truncated toward zero.
fn integral_quotient(value: i128, magnitude: &Magnitude) -> ConversionResult<i128> {
    match magnitude.to_numeric_value::<i128>() {
        Ok(divisor) => Ok(value / divisor),
        // A divisor beyond i128 exceeds every representable value.
        Err(NumericError::Overflow) => Ok(0),
        Err(err) => Err(err.into()),
    }
}

macro_rules! impl_integer_representation {
    ($(($t:ty, $u:ty)),*) => {
        $(
            impl Representation for $t {
                fn convert_by(self, factor: &ConversionFactor) -> ConversionResult<Self> {
                    let magnitude = factor.magnitude();
                    if !magnitude.is_integral() {
                        return Err(ConversionError::PrecisionLoss);
                    }
                    if self == 0 || magnitude.is_one() {
                        return Ok(self);
                    }
                    let value = i128::from(self);
                    let product = integral_product(value, magnitude)?;
                    <$t>::try_from(product).map_err(|_| out_of_range(value < 0))
                }

                fn cast_by(self, factor: &ConversionFactor) -> ConversionResult<Self> {
                    let magnitude = factor.magnitude();
                    if self == 0 || magnitude.is_one() {
                        return Ok(self);
                    }
                    if magnitude.is_integral() {
                        return self.convert_by(factor);
                    }

                    let value = i128::from(self);
                    let inverse = magnitude.invert();
                    if inverse.is_integral() {
                        let quotient = integral_quotient(value, &inverse)?;
                        return <$t>::try_from(quotient).map_err(|_| out_of_range(value < 0));
                    }

                    let ratio = magnitude.as_ratio().ok();
                    if let Some((num, den)) = ratio {
                        if let Some(product) = value.checked_mul(i128::from(num)) {
                            let quotient = product / i128::from(den);
                            return <$t>::try_from(quotient).map_err(|_| out_of_range(value < 0));
                        }
                    }

                    // Irrational factors and ratios too wide for i128 scale
                    // in fixed point: exact when the ratio fits the word,
                    // otherwise the nearest value to the float factor.
                    let exact_ratio = ratio.and_then(|(num, den)| {
                        Some((<$u>::try_from(num).ok()?, <$u>::try_from(den).ok()?))
                    });
                    let scaling = match exact_ratio {
                        Some((num, den)) => FixedPoint::<$t>::from_ratio(num, den)?,
                        None => FixedPoint::<$t>::from_f64(magnitude.to_numeric_value::<f64>()?)?,
                    };
                    Ok(scaling.checked_scale(self)?)
                }
            }
        )*
    };
}

impl_integer_representation!(
    (i8, u8),
    (i16, u16),
    (i32, u32),
    (i64, u64),
    (u8, u8),
    (u16, u16),
    (u32, u32),
    (u64, u64)
);

// ============================================================================
// Decimal
// ============================================================================

/// `value * num / den` for a rational magnitude.
fn decimal_scale(value: Decimal, magnitude: &Magnitude) -> ConversionResult<Decimal> {
    let num = magnitude.numerator().to_decimal()?;
    let den = magnitude.denominator().to_decimal()?;
    value
        .checked_mul(num)
        .and_then(|scaled| scaled.checked_div(den))
        .ok_or_else(|| out_of_range(value.is_sign_negative()))
}

/// Whether `1 / magnitude.denominator()` has a terminating decimal
/// expansion.
fn has_decimal_denominator(magnitude: &Magnitude) -> bool {
    magnitude
        .denominator()
        .terms()
        .iter()
        .all(|term| matches!(term.base, MagBase::Prime(2) | MagBase::Prime(5)))
}

impl Representation for Decimal {
    fn convert_by(self, factor: &ConversionFactor) -> ConversionResult<Self> {
        let magnitude = factor.magnitude();
        if magnitude.is_one() {
            return Ok(self);
        }
        if !magnitude.is_rational() || !has_decimal_denominator(magnitude) {
            return Err(ConversionError::PrecisionLoss);
        }
        decimal_scale(self, magnitude)
    }

    fn cast_by(self, factor: &ConversionFactor) -> ConversionResult<Self> {
        let magnitude = factor.magnitude();
        if magnitude.is_rational() {
            return decimal_scale(self, magnitude);
        }
        let multiplier = Decimal::try_from(magnitude.to_numeric_value::<f64>()?)
            .map_err(|_| NumericError::NotRepresentable)?;
        self.checked_mul(multiplier)
            .ok_or_else(|| out_of_range(self.is_sign_negative()))
    }
}
