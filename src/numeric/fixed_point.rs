// ============================================================================
// Fixed-Point Scaling Factor
// Symmetric fixed-point rational with N integer and N fractional bits
// ============================================================================

use super::errors::{NumericError, NumericResult};
use super::wide_int::{UnsignedWord, WideInt, Word};
use std::fmt;

/// A rational number stored as `int_repr / 2^N`, where `N = T::BITS`.
///
/// The representation is twice as wide as `T`: it holds every integer of
/// `T` exactly, as well as every scaling factor that can be applied to a
/// `T` without always under- or overflowing. It is used to scale integers
/// by non-integral magnitudes.
///
/// # Rounding
/// - Construction rounds half away from zero.
/// - [`FixedPoint::scale`] truncates toward zero, symmetrically for
///   negative inputs.
///
/// # Example
/// ```
/// use unit_algebra::numeric::FixedPoint;
///
/// let three_halves = FixedPoint::<i64>::from_ratio(3, 2).unwrap();
/// assert_eq!(three_halves.scale(10), 15);
/// assert_eq!(three_halves.scale(-3), -4);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FixedPoint<T: Word> {
    int_repr: WideInt<T>,
}

impl<T: Word> FixedPoint<T> {
    /// Number of fractional bits.
    pub const FRACTIONAL_BITS: u32 = T::BITS;

    // ========================================================================
    // Construction
    // ========================================================================

    /// Create from the raw double-width representation.
    #[inline]
    pub const fn from_raw(int_repr: WideInt<T>) -> Self {
        Self { int_repr }
    }

    /// Create from a floating-point value, rounding half away from zero.
    ///
    /// # Errors
    /// - `InvalidInput` if `value` is not finite
    /// - `Overflow` / `Underflow` if `value` is outside the integer range of `T`
    pub fn from_f64(value: f64) -> NumericResult<Self> {
        if !value.is_finite() {
            return Err(NumericError::InvalidInput);
        }
        if !T::SIGNED && value < 0.0 {
            return Err(NumericError::Underflow);
        }

        // Range is checked after rounding, which can carry into the next bit.
        let scaled = (value * 2f64.powi(Self::FRACTIONAL_BITS as i32)).round();
        let limit = 2f64.powi(2 * T::BITS as i32 - i32::from(T::SIGNED));
        if scaled >= limit {
            return Err(NumericError::Overflow);
        }
        if scaled < -limit {
            return Err(NumericError::Underflow);
        }
        Ok(Self {
            int_repr: WideInt::from_f64(scaled),
        })
    }

    /// Create `num / den` exactly, rounding the last fractional bit half
    /// away from zero.
    ///
    /// # Errors
    /// - `DivisionByZero` if `den == 0`
    /// - `Overflow` if the quotient does not fit the signed range
    pub fn from_ratio(num: T::Unsigned, den: T::Unsigned) -> NumericResult<Self> {
        let zero = <T::Unsigned as Word>::ZERO;
        if den == zero {
            return Err(NumericError::DivisionByZero);
        }

        let shifted = WideInt::<T::Unsigned>::from_hi_lo(num, zero);
        let (quotient, remainder) = shifted.div_rem_word(den)?;

        // Round half away from zero: 2r >= den, computed without overflow.
        let round_up = remainder >= den.wrapping_sub(remainder);
        let quotient = if round_up {
            quotient.checked_add(WideInt::from_unsigned_word(<T::Unsigned as Word>::ONE))?
        } else {
            quotient
        };

        let int_repr = WideInt::<T>::from_bits(quotient);
        if T::SIGNED && int_repr.is_negative() {
            return Err(NumericError::Overflow);
        }
        Ok(Self { int_repr })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// The raw double-width representation.
    #[inline]
    pub fn raw(self) -> WideInt<T> {
        self.int_repr
    }

    /// Approximate value as `f64`.
    #[inline]
    pub fn to_f64(self) -> f64 {
        self.int_repr.to_f64() / 2f64.powi(Self::FRACTIONAL_BITS as i32)
    }

    // ========================================================================
    // Scaling
    // ========================================================================

    /// Scale `value` by this factor: `(value * int_repr) >> N`, truncated
    /// toward zero.
    ///
    /// A result outside the range of `T` is a precondition violation and
    /// wraps; use [`FixedPoint::checked_scale`] when it may not fit.
    pub fn scale(self, value: T) -> T {
        let (negative, magnitude, _) = self.scale_magnitude(value);
        let result = T::from_bits(magnitude);
        if negative {
            result.wrapping_neg()
        } else {
            result
        }
    }

    /// Scale `value` by this factor, failing if the result does not fit `T`.
    ///
    /// # Errors
    /// Returns `Overflow` or `Underflow` if the scaled value is out of range.
    pub fn checked_scale(self, value: T) -> NumericResult<T> {
        let (negative, magnitude, overflowed) = self.scale_magnitude(value);
        let out_of_range = if negative {
            NumericError::Underflow
        } else {
            NumericError::Overflow
        };
        if overflowed {
            return Err(out_of_range);
        }

        let zero = <T::Unsigned as Word>::ZERO;
        if !T::SIGNED {
            return if negative && magnitude != zero {
                Err(out_of_range)
            } else {
                Ok(T::from_bits(magnitude))
            };
        }

        // Signed: |result| <= 2^(N-1) - 1, or exactly 2^(N-1) when negative.
        let sign_bit = <T::Unsigned as Word>::ONE << (T::BITS - 1);
        if magnitude < sign_bit {
            let result = T::from_bits(magnitude);
            Ok(if negative { result.wrapping_neg() } else { result })
        } else if negative && magnitude == sign_bit {
            Ok(T::MIN)
        } else {
            Err(out_of_range)
        }
    }

    /// Sign of the result, `|value| * |int_repr| >> N` as an unsigned word,
    /// and whether that magnitude overflowed a single word.
    fn scale_magnitude(self, value: T) -> (bool, T::Unsigned, bool) {
        let negative = value.is_negative() != self.int_repr.is_negative();

        let value_mag = if value.is_negative() {
            value.wrapping_neg().to_bits()
        } else {
            value.to_bits()
        };
        let repr_mag = if self.int_repr.is_negative() {
            self.int_repr.wrapping_neg().to_bits()
        } else {
            self.int_repr.to_bits()
        };

        // value * (hi * 2^N + lo) >> N == value * hi + (value * lo) >> N
        let low = WideInt::<T::Unsigned>::unsigned_product_of(value_mag, repr_mag.lo());
        let high = WideInt::<T::Unsigned>::unsigned_product_of(value_mag, repr_mag.hi());
        let (magnitude, carry) = high.lo().overflowing_add(low.hi());
        let overflowed = carry || high.hi() != <T::Unsigned as Word>::ZERO;

        (negative, magnitude, overflowed)
    }
}

impl<T: Word> fmt::Debug for FixedPoint<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FixedPoint<{}>({}, raw={:?})",
            std::any::type_name::<T>(),
            self.to_f64(),
            self.int_repr
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_ratio_exact() {
        let half = FixedPoint::<u32>::from_ratio(1, 2).unwrap();
        assert_eq!(half.raw(), WideInt::from_hi_lo(0, 0x8000_0000));
        assert_eq!(half.to_f64(), 0.5);

        let three_halves = FixedPoint::<i64>::from_ratio(3, 2).unwrap();
        assert_eq!(three_halves.raw(), WideInt::from_hi_lo(1, 1 << 63));
    }

    #[test]
    fn test_from_ratio_rounds_away_from_zero() {
        // 2/3 * 2^32 = 2863311530.67 -> 2863311531
        let two_thirds = FixedPoint::<u32>::from_ratio(2, 3).unwrap();
        assert_eq!(two_thirds.raw(), WideInt::from_hi_lo(0, 2_863_311_531));

        // 1/3 * 2^32 = 1431655765.33 -> 1431655765
        let third = FixedPoint::<u32>::from_ratio(1, 3).unwrap();
        assert_eq!(third.raw(), WideInt::from_hi_lo(0, 1_431_655_765));
    }

    #[test]
    fn test_from_ratio_errors() {
        assert_eq!(
            FixedPoint::<u32>::from_ratio(1, 0),
            Err(NumericError::DivisionByZero)
        );
        // 2^31 does not fit the integer part of i32.
        assert_eq!(
            FixedPoint::<i32>::from_ratio(1 << 31, 1),
            Err(NumericError::Overflow)
        );
    }

    #[test]
    fn test_scale_by_rational() {
        let two_thirds = FixedPoint::<i64>::from_ratio(2, 3).unwrap();
        assert_eq!(two_thirds.scale(3), 2);
        assert_eq!(two_thirds.scale(-3), -2);
        assert_eq!(two_thirds.scale(300), 200);
        assert_eq!(two_thirds.scale(1), 0);

        let three_halves = FixedPoint::<u64>::from_ratio(3, 2).unwrap();
        assert_eq!(three_halves.scale(1_000_000), 1_500_000);
    }

    #[test]
    fn test_scale_is_symmetric() {
        let factor = FixedPoint::<i32>::from_ratio(5, 7).unwrap();
        for v in [1, 7, 13, 1000, 123_456, i32::MAX] {
            assert_eq!(factor.scale(-v), -factor.scale(v));
        }
    }

    #[test]
    fn test_from_f64() {
        let x = FixedPoint::<i32>::from_f64(-1.25).unwrap();
        assert_eq!(x.to_f64(), -1.25);
        assert_eq!(x.scale(4), -5);
        assert_eq!(x.scale(-4), 5);

        assert_eq!(
            FixedPoint::<u16>::from_f64(-0.5),
            Err(NumericError::Underflow)
        );
        assert_eq!(
            FixedPoint::<i16>::from_f64(40_000.0),
            Err(NumericError::Overflow)
        );
        assert_eq!(
            FixedPoint::<i16>::from_f64(f64::NAN),
            Err(NumericError::InvalidInput)
        );
    }

    #[test]
    fn test_from_f64_rounding() {
        // 2^-9 is half of the last u8 fractional bit: rounds away from zero.
        let tiny = FixedPoint::<u8>::from_f64(2f64.powi(-9)).unwrap();
        assert_eq!(tiny.raw(), WideInt::from_hi_lo(0, 1));

        let neg_tiny = FixedPoint::<i8>::from_f64(-(2f64.powi(-9))).unwrap();
        assert_eq!(neg_tiny.raw(), WideInt::from_word(-1));
    }

    #[test]
    fn test_from_f64_rounding_carry_overflows() {
        // 255.999 * 2^8 rounds up to 2^16, one past the widest u8 value.
        assert_eq!(
            FixedPoint::<u8>::from_f64(255.999),
            Err(NumericError::Overflow)
        );
        let below = FixedPoint::<u8>::from_f64(255.998).unwrap();
        assert_eq!(below.raw(), WideInt::from_hi_lo(255, 255));

        assert_eq!(
            FixedPoint::<i8>::from_f64(127.999),
            Err(NumericError::Overflow)
        );
        let min = FixedPoint::<i8>::from_f64(-128.0).unwrap();
        assert_eq!(min.raw(), WideInt::from_hi_lo(-128, 0));
        assert_eq!(
            FixedPoint::<i8>::from_f64(-128.002),
            Err(NumericError::Underflow)
        );
    }

    #[test]
    fn test_checked_scale() {
        let three_halves = FixedPoint::<i32>::from_ratio(3, 2).unwrap();
        assert_eq!(three_halves.checked_scale(1000), Ok(1500));
        assert_eq!(
            three_halves.checked_scale(i32::MAX),
            Err(NumericError::Overflow)
        );
        assert_eq!(
            three_halves.checked_scale(i32::MIN),
            Err(NumericError::Underflow)
        );

        let half = FixedPoint::<i32>::from_ratio(1, 2).unwrap();
        assert_eq!(half.checked_scale(i32::MIN), Ok(i32::MIN / 2));

        let raw_half = FixedPoint::<u32>::from_raw(WideInt::from_hi_lo(0, 1 << 31));
        assert_eq!(raw_half.checked_scale(u32::MAX), Ok(u32::MAX / 2));
    }

    #[test]
    fn test_wide_factor_on_u64() {
        // Dyadic ratios are exact, so the product truncates nothing.
        let factor = FixedPoint::<u64>::from_ratio(1_000_000_007, 1 << 20).unwrap();
        assert_eq!(factor.scale(3 << 20), 3_000_000_021);
        assert_eq!(factor.checked_scale(u64::MAX), Err(NumericError::Overflow));
    }
}
