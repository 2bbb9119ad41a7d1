// ============================================================================
// Numeric Evaluation
// Magnitude -> concrete number, for floats, integers and decimals
// ============================================================================

use super::{MagBase, MagTerm, Magnitude};
use crate::numeric::math::{checked_float_pow, checked_int_pow, root};
use crate::numeric::{NumericError, NumericResult};
use rust_decimal::Decimal;

/// A numeric type a [`Magnitude`] can be evaluated in.
pub trait MagnitudeValue: Sized {
    /// Evaluate `magnitude` in `Self`.
    ///
    /// # Errors
    /// - `NotRepresentable` if the type cannot hold this kind of value
    ///   (a fraction as an integer, an irrational as a decimal)
    /// - `Overflow` if the value is out of range
    fn from_magnitude(magnitude: &Magnitude) -> NumericResult<Self>;
}

/// Exact integer value of an integral magnitude.
fn integral_value(magnitude: &Magnitude) -> NumericResult<u128> {
    if !magnitude.is_integral() {
        return Err(NumericError::NotRepresentable);
    }
    magnitude.terms().iter().try_fold(1u128, |acc, term| {
        let MagBase::Prime(p) = term.base else {
            return Err(NumericError::NotRepresentable);
        };
        let power =
            checked_int_pow(u128::from(p), term.exponent.num() as u64).ok_or(NumericError::Overflow)?;
        acc.checked_mul(power).ok_or(NumericError::Overflow)
    })
}

/// `base^exp`, exact in `u128` for primes when it fits.
fn base_power(base: &MagBase, exp: u64) -> Option<f64> {
    let exact = match base {
        MagBase::Prime(p) => checked_int_pow(u128::from(*p), exp).map(|v| v as f64),
        MagBase::Constant(_) => None,
    };
    exact.or_else(|| checked_float_pow(base.value(), exp))
}

/// `base^exponent` for one term, split as `base^q * (base^r)^(1/den)` for
/// `|exponent| = q + r/den`, with the reciprocal taken last.
fn term_value(term: &MagTerm) -> NumericResult<f64> {
    let exponent = term.exponent;
    let den = exponent.den() as u64;
    let num = exponent.num().unsigned_abs();
    let (whole, rest) = (num / den, num % den);

    let mut value = base_power(&term.base, whole).ok_or(NumericError::Overflow)?;
    if rest != 0 {
        let fraction = match base_power(&term.base, rest) {
            Some(power) => root(power, den),
            None => root(term.base.value(), den).and_then(|r| checked_float_pow(r, rest)),
        };
        value *= fraction.ok_or(NumericError::NotRepresentable)?;
    }
    if !value.is_finite() {
        return Err(NumericError::Overflow);
    }

    Ok(if exponent.is_negative() {
        1.0 / value
    } else {
        value
    })
}

fn float_value(magnitude: &Magnitude) -> NumericResult<f64> {
    let value = magnitude
        .terms()
        .iter()
        .try_fold(1.0_f64, |acc, term| Ok(acc * term_value(term)?))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(NumericError::Overflow)
    }
}

impl MagnitudeValue for f64 {
    fn from_magnitude(magnitude: &Magnitude) -> NumericResult<Self> {
        float_value(magnitude)
    }
}

impl MagnitudeValue for f32 {
    fn from_magnitude(magnitude: &Magnitude) -> NumericResult<Self> {
        let value = float_value(magnitude)? as f32;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(NumericError::Overflow)
        }
    }
}

macro_rules! impl_integer_magnitude_value {
    ($($t:ty),*) => {
        $(
            impl MagnitudeValue for $t {
                fn from_magnitude(magnitude: &Magnitude) -> NumericResult<Self> {
                    <$t>::try_from(integral_value(magnitude)?).map_err(|_| NumericError::Overflow)
                }
            }
        )*
    };
}

impl_integer_magnitude_value!(u8, u16, u32, u64, u128, i8, i16, i32, i64, i128);

impl MagnitudeValue for Decimal {
    fn from_magnitude(magnitude: &Magnitude) -> NumericResult<Self> {
        if !magnitude.is_rational() {
            return Err(NumericError::NotRepresentable);
        }
        let num = u64::from_magnitude(&magnitude.numerator())?;
        let den = u64::from_magnitude(&magnitude.denominator())?;
        Decimal::from(num)
            .checked_div(Decimal::from(den))
            .ok_or(NumericError::Overflow)
    }
}
