// ============================================================================
// Integer and Floating-Point Helpers
// Overflow-checked powers, roots and greatest common divisors
// ============================================================================

/// Greatest common divisor of two `u64` values (`gcd(0, 0) == 0`).
#[inline]
pub const fn gcd_u64(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

/// Greatest common divisor of two `u128` values (`gcd(0, 0) == 0`).
#[inline]
pub const fn gcd_u128(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

/// Raise `base` to `exp` by repeated squaring, returning `None` on overflow.
pub fn checked_int_pow(mut base: u128, mut exp: u64) -> Option<u128> {
    let mut result: u128 = 1;
    while exp > 0 {
        if exp % 2 == 1 {
            result = result.checked_mul(base)?;
        }
        exp /= 2;
        if exp > 0 {
            base = base.checked_mul(base)?;
        }
    }
    Some(result)
}

/// Raise a finite `base` to a non-negative integer power, returning `None`
/// if the result is not finite.
pub fn checked_float_pow(mut base: f64, mut exp: u64) -> Option<f64> {
    let mut result = 1.0_f64;
    while exp > 0 {
        if exp % 2 == 1 {
            result *= base;
            if !result.is_finite() {
                return None;
            }
        }
        exp /= 2;
        if exp > 0 {
            base *= base;
            if !base.is_finite() {
                return None;
            }
        }
    }
    Some(result)
}

/// The `n`-th root of `x`.
///
/// Only odd roots of negative numbers are defined; the zeroth root is not.
/// The search keeps `lo^n < x < hi^n` and bisects until the midpoint stops
/// moving, then returns whichever bound lands closer to `x`. A midpoint
/// whose power is not finite counts as too big.
pub fn root(x: f64, n: u64) -> Option<f64> {
    if n == 0 || x.is_nan() {
        return None;
    }
    if n == 1 {
        return Some(x);
    }

    if x < 0.0 {
        if n % 2 == 0 {
            return None;
        }
        return root(-x, n).map(|r| -r);
    }

    if x == 0.0 || x == 1.0 {
        return Some(x);
    }

    if x < 1.0 {
        return root(1.0 / x, n).map(|r| 1.0 / r);
    }

    let mut lo = 1.0_f64;
    let mut hi = x;

    while lo < hi {
        let mid = lo + (hi - lo) / 2.0;
        if mid == lo || mid == hi {
            break;
        }
        match checked_float_pow(mid, n) {
            Some(value) if value == x => return Some(mid),
            Some(value) if value < x => lo = mid,
            _ => hi = mid,
        }
    }

    let lo_diff = x - checked_float_pow(lo, n)?;
    match checked_float_pow(hi, n) {
        Some(power) if power - x <= lo_diff => Some(hi),
        _ => Some(lo),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gcd() {
        assert_eq!(gcd_u64(12, 18), 6);
        assert_eq!(gcd_u64(0, 7), 7);
        assert_eq!(gcd_u64(7, 0), 7);
        assert_eq!(gcd_u128(1 << 100, 1 << 64), 1 << 64);
    }

    #[test]
    fn test_checked_int_pow() {
        assert_eq!(checked_int_pow(2, 10), Some(1024));
        assert_eq!(checked_int_pow(10, 0), Some(1));
        assert_eq!(checked_int_pow(2, 127), Some(1u128 << 127));
        assert_eq!(checked_int_pow(2, 128), None);
        assert_eq!(checked_int_pow(10, 38), Some(10u128.pow(38)));
        assert_eq!(checked_int_pow(10, 39), None);
    }

    #[test]
    fn test_checked_float_pow() {
        assert_eq!(checked_float_pow(3.0, 4), Some(81.0));
        assert_eq!(checked_float_pow(10.0, 400), None);
    }

    #[test]
    fn test_root_exact() {
        assert_eq!(root(4.0, 2), Some(2.0));
        assert_eq!(root(27.0, 3), Some(3.0));
        assert_eq!(root(-8.0, 3), Some(-2.0));
        assert_eq!(root(0.25, 2), Some(0.5));
        assert_eq!(root(5.0, 1), Some(5.0));
    }

    #[test]
    fn test_root_undefined() {
        assert_eq!(root(4.0, 0), None);
        assert_eq!(root(-4.0, 2), None);
    }

    #[test]
    fn test_root_near_float_max() {
        let r = root(1e300, 2).unwrap();
        assert!((r / 1e150 - 1.0).abs() < 1e-15);

        let r = root(f64::MAX, 2).unwrap();
        assert!((r / f64::MAX.sqrt() - 1.0).abs() < 1e-15);

        let r = root(1e300, 3).unwrap();
        assert!((r / 1e100 - 1.0).abs() < 1e-15);
    }

    #[test]
    fn test_root_irrational() {
        let r = root(2.0, 2).unwrap();
        assert!((r - std::f64::consts::SQRT_2).abs() < 1e-15);
    }
}
