// ============================================================================
// Rational Exponent
// Normalized rational numbers used as exponents of magnitudes and dimensions
// ============================================================================

use super::errors::{NumericError, NumericResult};
use super::math::gcd_u128;
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A rational number `num / den` kept in lowest terms.
///
/// Invariants:
/// - `den > 0`
/// - `gcd(|num|, den) == 1`
/// - `num > i64::MIN`, so negation never overflows
/// - zero is always stored as `0 / 1`
///
/// Arithmetic is carried out in an `i128` intermediate and reduced before
/// narrowing back to `i64`, so only results that do not fit after reduction
/// report `Overflow`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawRatio"))]
pub struct Ratio {
    num: i64,
    den: i64,
}

/// Unchecked wire form, normalized through [`Ratio::new`].
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawRatio {
    num: i64,
    den: i64,
}

#[cfg(feature = "serde")]
impl TryFrom<RawRatio> for Ratio {
    type Error = NumericError;

    fn try_from(raw: RawRatio) -> NumericResult<Self> {
        Self::new(raw.num, raw.den)
    }
}

impl Ratio {
    /// Zero (0/1)
    pub const ZERO: Self = Self { num: 0, den: 1 };

    /// One (1/1)
    pub const ONE: Self = Self { num: 1, den: 1 };

    /// Minus one (-1/1)
    pub const MINUS_ONE: Self = Self { num: -1, den: 1 };

    /// One half, the exponent of a square root
    pub const HALF: Self = Self { num: 1, den: 2 };

    /// One third, the exponent of a cube root
    pub const THIRD: Self = Self { num: 1, den: 3 };

    // ========================================================================
    // Construction
    // ========================================================================

    /// Create a ratio from an integer.
    ///
    /// `i64::MIN` saturates to `-i64::MAX`.
    #[inline]
    pub const fn integer(value: i64) -> Self {
        let num = if value == i64::MIN { -i64::MAX } else { value };
        Self { num, den: 1 }
    }

    /// Create a ratio `num / den`, reducing it to lowest terms.
    ///
    /// # Errors
    /// - `DivisionByZero` if `den == 0`
    /// - `Overflow` if the reduced value does not fit `i64` components
    pub fn new(num: i64, den: i64) -> NumericResult<Self> {
        Self::reduce(num as i128, den as i128)
    }

    fn reduce(num: i128, den: i128) -> NumericResult<Self> {
        if den == 0 {
            return Err(NumericError::DivisionByZero);
        }
        if num == 0 {
            return Ok(Self::ZERO);
        }

        let g = gcd_u128(num.unsigned_abs(), den.unsigned_abs()) as i128;
        let sign = if den < 0 { -1 } else { 1 };
        let num = sign * num / g;
        let den = sign * den / g;

        match (i64::try_from(num), i64::try_from(den)) {
            (Ok(num), Ok(den)) if num != i64::MIN => Ok(Self { num, den }),
            _ => Err(if num < 0 {
                NumericError::Underflow
            } else {
                NumericError::Overflow
            }),
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Numerator (carries the sign).
    #[inline]
    pub const fn num(self) -> i64 {
        self.num
    }

    /// Denominator (always positive).
    #[inline]
    pub const fn den(self) -> i64 {
        self.den
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        self.num == 0
    }

    #[inline]
    pub const fn is_integer(self) -> bool {
        self.den == 1
    }

    #[inline]
    pub const fn is_positive(self) -> bool {
        self.num > 0
    }

    #[inline]
    pub const fn is_negative(self) -> bool {
        self.num < 0
    }

    /// Integer part, truncated toward zero.
    #[inline]
    pub const fn integer_part(self) -> i64 {
        self.num / self.den
    }

    /// Absolute value.
    #[inline]
    pub const fn abs(self) -> Self {
        Self {
            num: self.num.abs(),
            den: self.den,
        }
    }

    /// Approximate value as `f64`.
    #[inline]
    pub fn to_f64(self) -> f64 {
        self.num as f64 / self.den as f64
    }

    // ========================================================================
    // Arithmetic Operations
    // ========================================================================

    /// Checked addition.
    pub fn checked_add(self, rhs: Self) -> NumericResult<Self> {
        let num = self.num as i128 * rhs.den as i128 + rhs.num as i128 * self.den as i128;
        let den = self.den as i128 * rhs.den as i128;
        Self::reduce(num, den)
    }

    /// Checked subtraction.
    pub fn checked_sub(self, rhs: Self) -> NumericResult<Self> {
        self.checked_add(rhs.negate())
    }

    /// Checked multiplication.
    pub fn checked_mul(self, rhs: Self) -> NumericResult<Self> {
        Self::reduce(
            self.num as i128 * rhs.num as i128,
            self.den as i128 * rhs.den as i128,
        )
    }

    /// Checked division.
    ///
    /// # Errors
    /// Returns `DivisionByZero` when `rhs` is zero.
    pub fn checked_div(self, rhs: Self) -> NumericResult<Self> {
        Self::reduce(
            self.num as i128 * rhs.den as i128,
            self.den as i128 * rhs.num as i128,
        )
    }

    /// Negation; never overflows since `num > i64::MIN`.
    #[inline]
    pub const fn negate(self) -> Self {
        Self {
            num: -self.num,
            den: self.den,
        }
    }

    /// Checked reciprocal.
    pub fn checked_recip(self) -> NumericResult<Self> {
        Self::ONE.checked_div(self)
    }
}

// ============================================================================
// Trait Implementations
// ============================================================================

impl Default for Ratio {
    #[inline]
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<i64> for Ratio {
    #[inline]
    fn from(value: i64) -> Self {
        Self::integer(value)
    }
}

impl From<i32> for Ratio {
    #[inline]
    fn from(value: i32) -> Self {
        Self::integer(value as i64)
    }
}

impl PartialOrd for Ratio {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Ratio {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        // Denominators are positive, so cross-multiplication preserves order.
        (self.num as i128 * other.den as i128).cmp(&(other.num as i128 * self.den as i128))
    }
}

// Infallible operators for ergonomics (panic on overflow - use checked_* on untrusted input)
impl Add for Ratio {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        self.checked_add(rhs).expect("Ratio addition overflow")
    }
}

impl Sub for Ratio {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        self.checked_sub(rhs).expect("Ratio subtraction overflow")
    }
}

impl Mul for Ratio {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self::Output {
        self.checked_mul(rhs).expect("Ratio multiplication overflow")
    }
}

impl Div for Ratio {
    type Output = Self;

    #[inline]
    fn div(self, rhs: Self) -> Self::Output {
        self.checked_div(rhs).expect("Ratio division by zero or overflow")
    }
}

impl Neg for Ratio {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self::Output {
        self.negate()
    }
}

impl fmt::Debug for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ratio({}/{})", self.num, self.den)
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.den == 1 {
            write!(f, "{}", self.num)
        } else {
            write!(f, "{}/{}", self.num, self.den)
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
