// ============================================================================
// Primality Tests
// Trial division, Miller-Rabin, strong Lucas and Baillie-PSW
// ============================================================================
//
// The Baillie-PSW combination (Miller-Rabin base 2 plus a strong Lucas test
// with Selfridge parameters) has no known pseudoprime, and is proven
// correct below 2^64, so it is used as an exact primality test here.

use super::modular::{add_mod, decompose, half_mod_odd, mul_mod, pow_mod, sub_mod};
use crate::numeric::math::gcd_u64;
use arrayvec::ArrayVec;

// ============================================================================
// Reference Test
// ============================================================================

/// Primality by trial division: 2, then every odd number up to `sqrt(n)`.
///
/// Slow but obviously correct; used to validate the faster tests.
pub fn trial_division_is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    if n % 2 == 0 {
        return n == 2;
    }
    let mut f = 3u64;
    while f <= n / f {
        if n % f == 0 {
            return false;
        }
        f += 2;
    }
    true
}

// ============================================================================
// Miller-Rabin
// ============================================================================

/// Miller-Rabin strong probable-prime test of `n` to base `a`.
///
/// Preconditions: `a >= 2`, `n >= a + 2`, `n` odd.
pub fn miller_rabin_probable_prime(a: u64, n: u64) -> bool {
    debug_assert!(a >= 2);
    debug_assert!(n >= a + 2);
    debug_assert!(n % 2 == 1);

    let decomposition = decompose(n - 1);
    let mut x = pow_mod(a, decomposition.odd_remainder, n);
    if x == 1 {
        return true;
    }

    let minus_one = n - 1;
    for _ in 0..decomposition.power_of_two {
        if x == minus_one {
            return true;
        }
        x = mul_mod(x, x, n);
    }

    false
}

// ============================================================================
// Jacobi Symbol
// ============================================================================

/// The Jacobi symbol `(a/n)` for odd positive `n`, in `{-1, 0, 1}`.
///
/// Computed with the reduction rules:
/// - `(a/1) = 1`
/// - `(a/n) = 0` when `a` and `n` share a factor
/// - `(a/n) = (a mod n / n)`
/// - `(2a/n) = (a/n)` if `n ≡ ±1 (mod 8)`, else `-(a/n)`
/// - for odd coprime `a`, `n`: `(a/n) = (n/a)`, negated when both are `3 (mod 4)`
/// - `(-1/n) = 1` if `n ≡ 1 (mod 4)`, else `-1`
///
/// Precondition: `n` odd.
pub fn jacobi_symbol(raw_a: i64, n: u64) -> i32 {
    debug_assert!(n % 2 == 1);
    if n == 1 {
        return 1;
    }

    let mut n = n;
    let mut result = if raw_a >= 0 || n % 4 == 1 { 1 } else { -1 };
    let mut a = raw_a.unsigned_abs() % n;

    while a != 0 {
        let sign_for_even = if n % 8 == 1 || n % 8 == 7 { 1 } else { -1 };
        while a % 2 == 0 {
            a /= 2;
            result *= sign_for_even;
        }

        if a == 1 {
            return result;
        }

        if gcd_u64(a, n) != 1 {
            return 0;
        }

        // Both odd, positive and coprime: flip and reduce.
        if n % 4 == 3 && a % 4 == 3 {
            result = -result;
        }
        let new_a = n % a;
        n = a;
        a = new_a;
    }

    0
}

/// Whether `n` is the square of an integer (0 and 1 included).
pub fn is_perfect_square(n: u64) -> bool {
    if n < 2 {
        return true;
    }

    // Newton iteration on the integer square root, decreasing monotonically.
    let mut prev = n / 2;
    loop {
        let curr = (prev + n / prev) / 2;
        if curr.checked_mul(curr) == Some(n) {
            return true;
        }
        if curr >= prev {
            return false;
        }
        prev = curr;
    }
}

// ============================================================================
// Strong Lucas
// ============================================================================

/// The `D` parameter of the strong Lucas test, walked through Selfridge's
/// sequence `5, -7, 9, -11, ...`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LucasDParameter {
    pub magnitude: u64,
    pub positive: bool,
}

impl LucasDParameter {
    /// The next candidate in the sequence.
    #[inline]
    pub fn successor(self) -> Self {
        Self {
            magnitude: self.magnitude + 2,
            positive: !self.positive,
        }
    }

    #[inline]
    pub fn as_int(self) -> i64 {
        let d = self.magnitude as i64;
        if self.positive {
            d
        } else {
            -d
        }
    }
}

impl Default for LucasDParameter {
    fn default() -> Self {
        Self {
            magnitude: 5,
            positive: true,
        }
    }
}

/// The first `D` in `5, -7, 9, -11, ...` with `(D/n) = -1`.
///
/// Precondition: `n` is odd and not a perfect square (otherwise no such
/// `D` exists and the search does not terminate).
pub fn find_first_d_with_jacobi_symbol_neg_one(n: u64) -> LucasDParameter {
    debug_assert!(!is_perfect_square(n));
    let mut d = LucasDParameter::default();
    while jacobi_symbol(d.as_int(), n) != -1 {
        d = d.successor();
    }
    d
}

/// `(U_k, V_k) mod n` of the Lucas sequence with `P = 1`, `Q = (1 - D) / 4`.
///
/// The default is the element at `k = 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LucasSequenceElement {
    pub u: u64,
    pub v: u64,
}

impl Default for LucasSequenceElement {
    fn default() -> Self {
        Self { u: 1, v: 1 }
    }
}

/// Element at index `2k` from the element at `k`.
fn double_strong_lucas_index(
    element: LucasSequenceElement,
    n: u64,
    d: LucasDParameter,
) -> LucasSequenceElement {
    let LucasSequenceElement { u, v } = element;

    let v_squared = mul_mod(v, v, n);
    let d_u_squared = mul_mod(d.magnitude % n, mul_mod(u, u, n), n);
    let new_v = if d.positive {
        add_mod(v_squared, d_u_squared, n)
    } else {
        sub_mod(v_squared, d_u_squared, n)
    };

    LucasSequenceElement {
        u: mul_mod(u, v, n),
        v: half_mod_odd(new_v, n),
    }
}

/// Element at index `k + 1` from the element at `k`.
fn increment_strong_lucas_index(
    element: LucasSequenceElement,
    n: u64,
    d: LucasDParameter,
) -> LucasSequenceElement {
    let LucasSequenceElement { u, v } = element;

    let new_u = half_mod_odd(add_mod(u, v, n), n);

    let d_u = mul_mod(d.magnitude % n, u, n);
    let new_v = if d.positive {
        add_mod(v, d_u, n)
    } else {
        sub_mod(v, d_u, n)
    };

    LucasSequenceElement {
        u: new_u,
        v: half_mod_odd(new_v, n),
    }
}

/// The element at index `i >= 1`, by binary ladder over the bits of `i`
/// below the leading one.
fn find_strong_lucas_element(
    mut i: u64,
    n: u64,
    d: LucasDParameter,
) -> LucasSequenceElement {
    let mut bits = ArrayVec::<bool, 64>::new();
    while i > 1 {
        bits.push(i & 1 == 1);
        i >>= 1;
    }

    let mut element = LucasSequenceElement::default();
    while let Some(bit) = bits.pop() {
        element = double_strong_lucas_index(element, n, d);
        if bit {
            element = increment_strong_lucas_index(element, n, d);
        }
    }
    element
}

/// Strong Lucas probable-prime test with Selfridge parameters.
///
/// Preconditions: `n >= 2`, `n` odd.
pub fn strong_lucas_probable_prime(n: u64) -> bool {
    debug_assert!(n >= 2);
    debug_assert!(n % 2 == 1);

    if is_perfect_square(n) {
        return false;
    }

    let d = find_first_d_with_jacobi_symbol_neg_one(n);

    // n + 1 = 2^s * d; for n = 2^64 - 1 that is 2^64 itself.
    let (s, odd) = match n.checked_add(1) {
        Some(n_plus_one) => {
            let decomposition = decompose(n_plus_one);
            (decomposition.power_of_two, decomposition.odd_remainder)
        },
        None => (u64::BITS, 1),
    };

    let mut element = find_strong_lucas_element(odd, n, d);
    if element.u == 0 {
        return true;
    }

    for _ in 0..s {
        if element.v == 0 {
            return true;
        }
        element = double_strong_lucas_index(element, n, d);
    }

    false
}

// ============================================================================
// Baillie-PSW
// ============================================================================

/// Baillie-PSW primality test; exact for every `u64`.
pub fn baillie_psw_probable_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    if n < 4 {
        return true;
    }
    if n % 2 == 0 {
        return false;
    }

    miller_rabin_probable_prime(2, n) && strong_lucas_probable_prime(n)
}

// ============================================================================
// Tests
// ============================================================================
