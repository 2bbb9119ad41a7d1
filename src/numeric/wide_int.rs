// ============================================================================
// Double-Width Integer
// 2N-bit arithmetic synthesized from two N-bit native halves
// ============================================================================

use super::errors::{NumericError, NumericResult};
use std::fmt;
use std::hash::Hash;
use std::ops::{BitAnd, BitOr, Not, Shl, Shr};

mod sealed {
    pub trait Sealed {}
}

/// A native integer usable as one half of a [`WideInt`].
///
/// Implemented for `u8`, `u16`, `u32`, `u64` and their signed counterparts.
/// The trait exposes only the wrapping primitives the double-width
/// arithmetic is built from, so nothing here silently widens through a
/// bigger native type.
pub trait Word:
    sealed::Sealed + Copy + Eq + Ord + Hash + Default + fmt::Debug + fmt::Display + Send + Sync + 'static
{
    /// The unsigned integer of the same width.
    type Unsigned: UnsignedWord;

    const BITS: u32;
    const SIGNED: bool;
    const ZERO: Self;
    const ONE: Self;
    const MIN: Self;
    const MAX: Self;

    /// Reinterpret the two's-complement bits as unsigned.
    fn to_bits(self) -> Self::Unsigned;
    /// Reinterpret unsigned bits as `Self`.
    fn from_bits(bits: Self::Unsigned) -> Self;
    fn is_negative(self) -> bool;
    fn wrapping_add(self, rhs: Self) -> Self;
    fn wrapping_sub(self, rhs: Self) -> Self;
    fn wrapping_mul(self, rhs: Self) -> Self;
    fn wrapping_neg(self) -> Self;
    fn wrapping_shl(self, n: u32) -> Self;
    /// Arithmetic shift for signed types, logical for unsigned.
    fn wrapping_shr(self, n: u32) -> Self;
    fn to_f64(self) -> f64;
    /// Saturating conversion from `f64` (`as` semantics).
    fn from_f64(value: f64) -> Self;
}

/// Unsigned [`Word`]s, which carry the bit-level operations used by the
/// schoolbook multiply and the long division.
pub trait UnsignedWord:
    Word<Unsigned = Self>
    + BitAnd<Output = Self>
    + BitOr<Output = Self>
    + Not<Output = Self>
    + Shl<u32, Output = Self>
    + Shr<u32, Output = Self>
{
    fn overflowing_add(self, rhs: Self) -> (Self, bool);
    fn overflowing_sub(self, rhs: Self) -> (Self, bool);

    /// Divide the double-width value `hi:lo` by `divisor` using a native
    /// double-width type, returning `(quotient_hi, quotient_lo, remainder)`.
    ///
    /// `None` when no native type of twice the width exists.
    fn hardware_div_rem(hi: Self, lo: Self, divisor: Self) -> Option<(Self, Self, Self)>;
}

macro_rules! impl_word {
    ($t:ty, $u:ty, $signed:expr) => {
        impl sealed::Sealed for $t {}

        impl Word for $t {
            type Unsigned = $u;

            const BITS: u32 = <$t>::BITS;
            const SIGNED: bool = $signed;
            const ZERO: Self = 0;
            const ONE: Self = 1;
            const MIN: Self = <$t>::MIN;
            const MAX: Self = <$t>::MAX;

            #[inline]
            fn to_bits(self) -> $u {
                self as $u
            }

            #[inline]
            fn from_bits(bits: $u) -> Self {
                bits as $t
            }

            #[inline]
            fn is_negative(self) -> bool {
                $signed && ((self as $u) >> (<$t>::BITS - 1)) == 1
            }

            #[inline]
            fn wrapping_add(self, rhs: Self) -> Self {
                <$t>::wrapping_add(self, rhs)
            }

            #[inline]
            fn wrapping_sub(self, rhs: Self) -> Self {
                <$t>::wrapping_sub(self, rhs)
            }

            #[inline]
            fn wrapping_mul(self, rhs: Self) -> Self {
                <$t>::wrapping_mul(self, rhs)
            }

            #[inline]
            fn wrapping_neg(self) -> Self {
                <$t>::wrapping_neg(self)
            }

            #[inline]
            fn wrapping_shl(self, n: u32) -> Self {
                <$t>::wrapping_shl(self, n)
            }

            #[inline]
            fn wrapping_shr(self, n: u32) -> Self {
                <$t>::wrapping_shr(self, n)
            }

            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }

            #[inline]
            fn from_f64(value: f64) -> Self {
                value as $t
            }
        }
    };
}

macro_rules! impl_unsigned_word {
    ($u:ty, $double:ty) => {
        impl UnsignedWord for $u {
            #[inline]
            fn overflowing_add(self, rhs: Self) -> (Self, bool) {
                <$u>::overflowing_add(self, rhs)
            }

            #[inline]
            fn overflowing_sub(self, rhs: Self) -> (Self, bool) {
                <$u>::overflowing_sub(self, rhs)
            }

            #[inline]
            fn hardware_div_rem(hi: Self, lo: Self, divisor: Self) -> Option<(Self, Self, Self)> {
                let dividend = ((hi as $double) << <$u>::BITS) | lo as $double;
                let divisor = divisor as $double;
                let quotient = dividend / divisor;
                let remainder = dividend % divisor;
                Some((
                    (quotient >> <$u>::BITS) as $u,
                    quotient as $u,
                    remainder as $u,
                ))
            }
        }
    };
}

impl_word!(u8, u8, false);
impl_word!(u16, u16, false);
impl_word!(u32, u32, false);
impl_word!(u64, u64, false);
impl_word!(i8, u8, true);
impl_word!(i16, u16, true);
impl_word!(i32, u32, true);
impl_word!(i64, u64, true);

impl_unsigned_word!(u8, u16);
impl_unsigned_word!(u16, u32);
impl_unsigned_word!(u32, u64);
impl_unsigned_word!(u64, u128);

// ============================================================================
// WideInt
// ============================================================================

/// A 2N-bit integer built from an N-bit high half and an unsigned N-bit low
/// half: `value = hi * 2^N + lo`.
///
/// The high half carries the sign, so `WideInt<i64>` is a signed 128-bit
/// integer and `WideInt<u64>` an unsigned one. Field order makes the derived
/// `Ord` compare the signed high halves first and the unsigned low halves
/// second, which is the numeric order.
///
/// Operations prefixed `wrapping_` are modular in 2N bits. Leaving the 2N-bit
/// range is a precondition violation for them; use the `checked_` helpers
/// when the result is not known to fit.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct WideInt<T: Word> {
    hi: T,
    lo: T::Unsigned,
}

impl<T: Word> WideInt<T> {
    /// Total width in bits.
    pub const BITS: u32 = 2 * T::BITS;

    // ========================================================================
    // Construction
    // ========================================================================

    /// Create from explicit halves.
    #[inline]
    pub const fn from_hi_lo(hi: T, lo: T::Unsigned) -> Self {
        Self { hi, lo }
    }

    /// Zero.
    #[inline]
    pub fn zero() -> Self {
        Self {
            hi: T::ZERO,
            lo: <T::Unsigned as Word>::ZERO,
        }
    }

    /// Largest representable value.
    #[inline]
    pub fn max_value() -> Self {
        Self {
            hi: T::MAX,
            lo: <T::Unsigned as Word>::MAX,
        }
    }

    /// Smallest representable value.
    #[inline]
    pub fn min_value() -> Self {
        Self {
            hi: T::MIN,
            lo: <T::Unsigned as Word>::ZERO,
        }
    }

    /// Sign-extend a native value into the high half.
    #[inline]
    pub fn from_word(value: T) -> Self {
        let hi = if value.is_negative() {
            T::ZERO.wrapping_sub(T::ONE)
        } else {
            T::ZERO
        };
        Self {
            hi,
            lo: value.to_bits(),
        }
    }

    /// Zero-extend an unsigned native value.
    #[inline]
    pub fn from_unsigned_word(value: T::Unsigned) -> Self {
        Self {
            hi: T::ZERO,
            lo: value,
        }
    }

    /// Create from a finite `f64`, truncating toward zero.
    ///
    /// Values outside the 2N-bit range saturate per half and are a
    /// precondition violation.
    pub fn from_f64(value: f64) -> Self {
        let scale = half_scale::<T>();
        let magnitude = value.abs().trunc();
        let hi = (magnitude / scale).floor();
        // Exact: `hi * scale` only clears the low bits of `magnitude`.
        let rem = magnitude - hi * scale;
        let unsigned = WideInt::<T::Unsigned> {
            hi: <T::Unsigned as Word>::from_f64(hi),
            lo: <T::Unsigned as Word>::from_f64(rem),
        };
        let bits = if value < 0.0 {
            unsigned.wrapping_neg()
        } else {
            unsigned
        };
        Self::from_bits(bits)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[inline]
    pub fn hi(self) -> T {
        self.hi
    }

    #[inline]
    pub fn lo(self) -> T::Unsigned {
        self.lo
    }

    #[inline]
    pub fn is_negative(self) -> bool {
        self.hi.is_negative()
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self == Self::zero()
    }

    /// Reinterpret as an unsigned double-width integer.
    #[inline]
    pub fn to_bits(self) -> WideInt<T::Unsigned> {
        WideInt {
            hi: self.hi.to_bits(),
            lo: self.lo,
        }
    }

    /// Reinterpret unsigned double-width bits.
    #[inline]
    pub fn from_bits(bits: WideInt<T::Unsigned>) -> Self {
        Self {
            hi: T::from_bits(bits.hi),
            lo: bits.lo,
        }
    }

    /// The low N bits as `T` (modular narrowing).
    #[inline]
    pub fn truncate(self) -> T {
        T::from_bits(self.lo)
    }

    /// Narrow to `T`, failing if the value does not fit.
    pub fn checked_to_word(self) -> NumericResult<T> {
        let narrowed = T::from_bits(self.lo);
        if Self::from_word(narrowed) == self {
            Ok(narrowed)
        } else if self.is_negative() {
            Err(NumericError::Underflow)
        } else {
            Err(NumericError::Overflow)
        }
    }

    /// Approximate value as `f64`.
    pub fn to_f64(self) -> f64 {
        if self.is_negative() {
            let magnitude = self.wrapping_neg().to_bits();
            -(magnitude.hi.to_f64() * half_scale::<T>() + magnitude.lo.to_f64())
        } else {
            self.hi.to_f64() * half_scale::<T>() + self.lo.to_f64()
        }
    }

    // ========================================================================
    // Arithmetic Operations
    // ========================================================================

    /// Modular addition.
    #[inline]
    pub fn wrapping_add(self, rhs: Self) -> Self {
        let (lo, carry) = self.lo.overflowing_add(rhs.lo);
        let carry = if carry { T::ONE } else { T::ZERO };
        Self {
            hi: self.hi.wrapping_add(rhs.hi).wrapping_add(carry),
            lo,
        }
    }

    /// Modular subtraction.
    #[inline]
    pub fn wrapping_sub(self, rhs: Self) -> Self {
        let (lo, borrow) = self.lo.overflowing_sub(rhs.lo);
        let borrow = if borrow { T::ONE } else { T::ZERO };
        Self {
            hi: self.hi.wrapping_sub(rhs.hi).wrapping_sub(borrow),
            lo,
        }
    }

    /// Modular negation.
    #[inline]
    pub fn wrapping_neg(self) -> Self {
        Self::zero().wrapping_sub(self)
    }

    /// Add a native value (sign-extended).
    #[inline]
    pub fn wrapping_add_word(self, rhs: T) -> Self {
        self.wrapping_add(Self::from_word(rhs))
    }

    /// Subtract a native value (sign-extended).
    #[inline]
    pub fn wrapping_sub_word(self, rhs: T) -> Self {
        self.wrapping_sub(Self::from_word(rhs))
    }

    /// Checked addition.
    pub fn checked_add(self, rhs: Self) -> NumericResult<Self> {
        let sum = self.wrapping_add(rhs);
        let overflowed = if T::SIGNED {
            self.is_negative() == rhs.is_negative() && sum.is_negative() != self.is_negative()
        } else {
            sum < self
        };
        if !overflowed {
            Ok(sum)
        } else if T::SIGNED && self.is_negative() {
            Err(NumericError::Underflow)
        } else {
            Err(NumericError::Overflow)
        }
    }

    /// Modular multiplication by another double-width value.
    ///
    /// Two's-complement products agree with unsigned products modulo 2^(2N),
    /// so the signed case needs no special handling.
    pub fn wrapping_mul(self, rhs: Self) -> Self {
        let lhs = self.to_bits();
        let rhs = rhs.to_bits();
        let low = WideInt::<T::Unsigned>::unsigned_product_of(lhs.lo, rhs.lo);
        let cross = lhs.hi.wrapping_mul(rhs.lo).wrapping_add(lhs.lo.wrapping_mul(rhs.hi));
        Self::from_bits(WideInt {
            hi: low.hi.wrapping_add(cross),
            lo: low.lo,
        })
    }

    /// Modular multiplication by a native value (sign-extended).
    #[inline]
    pub fn wrapping_mul_word(self, rhs: T) -> Self {
        self.wrapping_mul(Self::from_word(rhs))
    }

    /// Exact double-width product of an N-bit value and an unsigned N-bit value.
    ///
    /// At least one operand is unsigned, so the product always fits 2N bits.
    pub fn wide_product_of(lhs: T, rhs: T::Unsigned) -> Self {
        let product = WideInt::<T::Unsigned>::unsigned_product_of(lhs.to_bits(), rhs);
        // A negative lhs was read as lhs + 2^N; remove the extra rhs * 2^N.
        let hi = if lhs.is_negative() {
            product.hi.wrapping_sub(rhs)
        } else {
            product.hi
        };
        Self {
            hi: T::from_bits(hi),
            lo: product.lo,
        }
    }

    /// Left shift by `n < 2N` bits (modular).
    pub fn shl(self, n: u32) -> Self {
        debug_assert!(n < Self::BITS);
        let bits = T::BITS;
        if n == 0 {
            return self;
        }
        let hi = self.hi.to_bits();
        if n >= bits {
            Self {
                hi: T::from_bits(self.lo << (n - bits)),
                lo: <T::Unsigned as Word>::ZERO,
            }
        } else {
            Self {
                hi: T::from_bits((hi << n) | (self.lo >> (bits - n))),
                lo: self.lo << n,
            }
        }
    }

    /// Right shift by `n < 2N` bits; arithmetic when `T` is signed.
    pub fn shr(self, n: u32) -> Self {
        debug_assert!(n < Self::BITS);
        let bits = T::BITS;
        if n == 0 {
            return self;
        }
        if n >= bits {
            let fill = if self.is_negative() {
                T::ZERO.wrapping_sub(T::ONE)
            } else {
                T::ZERO
            };
            Self {
                hi: fill,
                lo: self.hi.wrapping_shr(n - bits).to_bits(),
            }
        } else {
            Self {
                hi: self.hi.wrapping_shr(n),
                lo: (self.lo >> n) | (self.hi.to_bits() << (bits - n)),
            }
        }
    }
}

// ============================================================================
// Unsigned-only Operations
// ============================================================================

impl<U: UnsignedWord> WideInt<U> {
    /// Exact double-width product of two unsigned N-bit values.
    ///
    /// Schoolbook multiplication on N/2-bit limbs: every partial product
    /// fits N bits, and the middle column sum stays below 2^(N/2 + 2).
    pub fn unsigned_product_of(lhs: U, rhs: U) -> Self {
        let half = U::BITS / 2;
        let mask = U::MAX >> half;

        let l0 = lhs & mask;
        let l1 = lhs >> half;
        let r0 = rhs & mask;
        let r1 = rhs >> half;

        let t00 = l0.wrapping_mul(r0);
        let t01 = l0.wrapping_mul(r1);
        let t10 = l1.wrapping_mul(r0);
        let t11 = l1.wrapping_mul(r1);

        let mid = (t00 >> half)
            .wrapping_add(t01 & mask)
            .wrapping_add(t10 & mask);

        let lo = (t00 & mask) | ((mid & mask) << half);
        let hi = t11
            .wrapping_add(t01 >> half)
            .wrapping_add(t10 >> half)
            .wrapping_add(mid >> half);

        Self { hi, lo }
    }

    /// Quotient and remainder of division by a single-width divisor.
    ///
    /// Uses a native double-width division when one exists, unless the
    /// `portable-division` feature forces the bit-serial fallback.
    ///
    /// # Errors
    /// Returns `DivisionByZero` when `divisor == 0`.
    pub fn div_rem_word(self, divisor: U) -> NumericResult<(Self, U)> {
        if divisor == U::ZERO {
            return Err(NumericError::DivisionByZero);
        }

        #[cfg(not(feature = "portable-division"))]
        if let Some((q_hi, q_lo, rem)) = U::hardware_div_rem(self.hi, self.lo, divisor) {
            return Ok((Self { hi: q_hi, lo: q_lo }, rem));
        }

        Ok(self.long_div_rem(divisor))
    }

    /// Bit-serial shift-and-subtract division, O(2N) steps.
    ///
    /// Precondition: `divisor != 0`.
    pub fn long_div_rem(self, divisor: U) -> (Self, U) {
        debug_assert!(divisor != U::ZERO);
        let bits = U::BITS;
        let top = bits - 1;

        let mut q_hi = U::ZERO;
        let mut q_lo = U::ZERO;
        let mut rem = U::ZERO;

        for i in (0..2 * bits).rev() {
            let bit = if i >= bits {
                (self.hi >> (i - bits)) & U::ONE
            } else {
                (self.lo >> i) & U::ONE
            };

            // `rem < divisor` before the shift, so the true value 2*rem + bit
            // needs at most one extra bit, tracked in `carry`.
            let carry = (rem >> top) == U::ONE;
            rem = (rem << 1) | bit;

            if carry || rem >= divisor {
                rem = rem.wrapping_sub(divisor);
                if i >= bits {
                    q_hi = q_hi | (U::ONE << (i - bits));
                } else {
                    q_lo = q_lo | (U::ONE << i);
                }
            }
        }

        (Self { hi: q_hi, lo: q_lo }, rem)
    }
}

/// 2^N as `f64`.
#[inline]
fn half_scale<T: Word>() -> f64 {
    2f64.powi(T::BITS as i32)
}

// ============================================================================
// Display and Debug
// ============================================================================

impl<T: Word> fmt::Debug for WideInt<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WideInt(hi={}, lo={})", self.hi, self.lo)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::quickcheck;

    fn as_u64(v: WideInt<u32>) -> u64 {
        ((v.hi() as u64) << 32) | v.lo() as u64
    }

    fn as_i64(v: WideInt<i32>) -> i64 {
        ((v.hi() as i64) << 32) | v.lo() as i64
    }

    fn as_u128(v: WideInt<u64>) -> u128 {
        ((v.hi() as u128) << 64) | v.lo() as u128
    }

    fn as_i128(v: WideInt<i64>) -> i128 {
        ((v.hi() as i128) << 64) | v.lo() as i128
    }

    /// Values clustered around the interesting bit boundaries.
    fn edge_values_u32() -> Vec<u32> {
        let mut values = Vec::new();
        for msb in 0u32..4 {
            let base = msb << 30;
            for corr in [-2i64, -1, 0, 1, 2] {
                values.push((base as i64 + corr) as u32);
            }
        }
        values
    }

    #[test]
    fn test_from_word_sign_extends() {
        assert_eq!(as_i64(WideInt::from_word(-1i32)), -1);
        assert_eq!(as_i64(WideInt::from_word(i32::MIN)), i32::MIN as i64);
        assert_eq!(as_u64(WideInt::from_word(u32::MAX)), u32::MAX as u64);
        assert!(WideInt::from_word(-5i64).is_negative());
    }

    #[test]
    fn test_add_sub_edges() {
        for &hi in &edge_values_u32() {
            for &lo in &edge_values_u32() {
                for &rhs in &edge_values_u32() {
                    let lhs = WideInt::<u32>::from_hi_lo(hi, lo);
                    let reference = as_u64(lhs);
                    assert_eq!(
                        as_u64(lhs.wrapping_add_word(rhs)),
                        reference.wrapping_add(rhs as u64)
                    );
                    assert_eq!(
                        as_u64(lhs.wrapping_sub_word(rhs)),
                        reference.wrapping_sub(rhs as u64)
                    );

                    let signed = WideInt::<i32>::from_hi_lo(hi as i32, lo);
                    let reference = as_i64(signed);
                    assert_eq!(
                        as_i64(signed.wrapping_add_word(rhs as i32)),
                        reference.wrapping_add(rhs as i32 as i64)
                    );
                    assert_eq!(
                        as_i64(signed.wrapping_sub_word(rhs as i32)),
                        reference.wrapping_sub(rhs as i32 as i64)
                    );
                }
            }
        }
    }

    #[test]
    fn test_multiplication_edges() {
        for &a in &edge_values_u32() {
            for &b in &edge_values_u32() {
                assert_eq!(
                    as_u64(WideInt::<u32>::unsigned_product_of(a, b)),
                    a as u64 * b as u64
                );
                assert_eq!(
                    as_i64(WideInt::<i32>::wide_product_of(a as i32, b)),
                    a as i32 as i64 * b as i64
                );

                let wide = WideInt::<i32>::from_hi_lo(a as i32, b);
                assert_eq!(
                    as_i64(wide.wrapping_mul_word(b as i32)),
                    as_i64(wide).wrapping_mul(b as i32 as i64)
                );
            }
        }
    }

    #[test]
    fn test_product_extremes_u64() {
        let p = WideInt::<u64>::unsigned_product_of(u64::MAX, u64::MAX);
        assert_eq!(as_u128(p), u64::MAX as u128 * u64::MAX as u128);

        let p = WideInt::<i64>::wide_product_of(i64::MIN, u64::MAX);
        assert_eq!(as_i128(p), i64::MIN as i128 * u64::MAX as i128);
    }

    #[test]
    fn test_shifts() {
        let v = WideInt::<u32>::from_hi_lo(0x1234_5678, 0x9abc_def0);
        let reference = as_u64(v);
        for n in 0..64 {
            assert_eq!(as_u64(v.shl(n)), reference << n, "shl {}", n);
            assert_eq!(as_u64(v.shr(n)), reference >> n, "shr {}", n);
        }

        let neg = WideInt::<i32>::from_word(-12345);
        for n in 0..64 {
            assert_eq!(as_i64(neg.shr(n)), -12345i64 >> n, "sar {}", n);
        }
    }

    #[test]
    fn test_ordering_matches_numeric_order() {
        let a = WideInt::<i64>::from_word(-1);
        let b = WideInt::<i64>::from_word(0);
        let c = WideInt::<i64>::from_hi_lo(0, u64::MAX);
        let d = WideInt::<i64>::from_hi_lo(1, 0);
        assert!(a < b && b < c && c < d);
        assert!(WideInt::<i64>::min_value() < a);
        assert!(d < WideInt::<i64>::max_value());
    }

    #[test]
    fn test_checked_to_word() {
        assert_eq!(WideInt::<i32>::from_word(-7).checked_to_word(), Ok(-7));
        assert_eq!(
            WideInt::<i32>::from_hi_lo(0, 0x8000_0000).checked_to_word(),
            Err(NumericError::Overflow)
        );
        assert_eq!(
            WideInt::<i32>::from_hi_lo(-2, 0).checked_to_word(),
            Err(NumericError::Underflow)
        );
        assert_eq!(
            WideInt::<u32>::from_hi_lo(1, 0).checked_to_word(),
            Err(NumericError::Overflow)
        );
    }

    #[test]
    fn test_checked_add() {
        let max = WideInt::<u32>::max_value();
        assert_eq!(
            max.checked_add(WideInt::from_word(1)),
            Err(NumericError::Overflow)
        );
        let min = WideInt::<i32>::min_value();
        assert_eq!(
            min.checked_add(WideInt::from_word(-1)),
            Err(NumericError::Underflow)
        );
        assert_eq!(
            as_i64(WideInt::<i32>::from_word(-3).checked_add(WideInt::from_word(5)).unwrap()),
            2
        );
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(
            WideInt::<u64>::from_word(10).div_rem_word(0),
            Err(NumericError::DivisionByZero)
        );
    }

    #[test]
    fn test_long_division_matches_hardware() {
        let n = WideInt::<u64>::from_hi_lo(0xdead_beef_0bad_f00d, 0x0123_4567_89ab_cdef);
        for d in [1u64, 2, 3, 10, 0xffff_ffff, u64::MAX, 0x8000_0000_0000_0001] {
            let (q, r) = n.long_div_rem(d);
            let (hq, hr) = n.div_rem_word(d).unwrap();
            assert_eq!(q, hq);
            assert_eq!(r, hr);
            assert_eq!(as_u128(q) * d as u128 + r as u128, as_u128(n));
        }
    }

    #[test]
    fn test_f64_round_trip() {
        let v = WideInt::<i64>::from_f64(-3.0 * 2f64.powi(70));
        assert_eq!(as_i128(v), -3i128 << 70);
        assert_eq!(v.to_f64(), -3.0 * 2f64.powi(70));

        let small = WideInt::<i32>::from_f64(-3.0);
        assert_eq!(as_i64(small), -3);

        let unsigned = WideInt::<u32>::from_f64(12345678901.0);
        assert_eq!(as_u64(unsigned), 12345678901);
    }

    quickcheck! {
        fn prop_unsigned_product_u64(a: u64, b: u64) -> bool {
            as_u128(WideInt::<u64>::unsigned_product_of(a, b)) == a as u128 * b as u128
        }

        fn prop_signed_product_i64(a: i64, b: u64) -> bool {
            as_i128(WideInt::<i64>::wide_product_of(a, b)) == a as i128 * b as i128
        }

        fn prop_long_division_u64(hi: u64, lo: u64, d: u64) -> bool {
            let d = d.max(1);
            let n = WideInt::<u64>::from_hi_lo(hi, lo);
            let (q, r) = n.long_div_rem(d);
            r < d && as_u128(q).wrapping_mul(d as u128).wrapping_add(r as u128) == as_u128(n)
                && as_u128(q) == as_u128(n) / d as u128
        }

        fn prop_long_division_u32(hi: u32, lo: u32, d: u32) -> bool {
            let d = d.max(1);
            let n = WideInt::<u32>::from_hi_lo(hi, lo);
            let (q, r) = n.long_div_rem(d);
            as_u64(q) == as_u64(n) / d as u64 && r as u64 == as_u64(n) % d as u64
        }

        fn prop_wrapping_mul_i64(a: i64, b: i64, c: i64) -> bool {
            let wide = WideInt::<i64>::wide_product_of(a, b as u64);
            as_i128(wide.wrapping_mul_word(c)) == as_i128(wide).wrapping_mul(c as i128)
        }
    }
}
