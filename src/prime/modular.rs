// ============================================================================
// Modular Arithmetic
// Overflow-free arithmetic modulo a 64-bit integer
// ============================================================================
//
// Every operation takes operands already reduced modulo `n` and never
// forms an intermediate wider than 64 bits, except `mul_mod`, which goes
// through the exact 128-bit product of `WideInt<u64>`.

use crate::numeric::WideInt;

/// `(a + b) % n`.
///
/// Preconditions: `a < n`, `b < n`, `n > 0`.
#[inline]
pub fn add_mod(a: u64, b: u64, n: u64) -> u64 {
    debug_assert!(a < n && b < n && n > 0);
    if a >= n - b {
        a - (n - b)
    } else {
        a + b
    }
}

/// `(a - b) % n`.
///
/// Preconditions: `a < n`, `b < n`, `n > 0`.
#[inline]
pub fn sub_mod(a: u64, b: u64, n: u64) -> u64 {
    debug_assert!(a < n && b < n && n > 0);
    if a >= b {
        a - b
    } else {
        n - (b - a)
    }
}

/// `(a * b) % n`.
///
/// Preconditions: `a < n`, `b < n`, `n > 0`.
#[inline]
pub fn mul_mod(a: u64, b: u64, n: u64) -> u64 {
    debug_assert!(a < n && b < n && n > 0);
    if let Some(product) = a.checked_mul(b) {
        return product % n;
    }
    WideInt::<u64>::unsigned_product_of(a, b)
        .div_rem_word(n)
        .map_or(0, |(_, rem)| rem)
}

/// `(a / 2) % n` for odd `n`: the `x` in `[0, n)` with `2x ≡ a (mod n)`.
///
/// Preconditions: `a < n`, `n` odd.
#[inline]
pub fn half_mod_odd(a: u64, n: u64) -> u64 {
    debug_assert!(a < n && n % 2 == 1);
    a / 2 + if a % 2 == 0 { 0 } else { n / 2 + 1 }
}

/// `(base ^ exp) % n` by square-and-multiply.
///
/// Precondition: `n > 0`.
pub fn pow_mod(base: u64, mut exp: u64, n: u64) -> u64 {
    debug_assert!(n > 0);
    let mut result = 1 % n;
    let mut base = base % n;

    while exp > 0 {
        if exp % 2 == 1 {
            result = mul_mod(result, base, n);
        }
        exp /= 2;
        base = mul_mod(base, base, n);
    }

    result
}

/// `n = 2^power_of_two * odd_remainder`, with `odd_remainder` odd.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberDecomposition {
    pub power_of_two: u32,
    pub odd_remainder: u64,
}

/// Factor all powers of two out of a positive `n`.
///
/// Precondition: `n > 0`.
#[inline]
pub fn decompose(n: u64) -> NumberDecomposition {
    debug_assert!(n > 0);
    let power_of_two = n.trailing_zeros();
    NumberDecomposition {
        power_of_two,
        odd_remainder: n >> power_of_two,
    }
}
