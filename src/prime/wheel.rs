// ============================================================================
// Wheel Factorization
// Trial division that skips multiples of the first few primes
// ============================================================================
//
// A wheel with basis {p1..pK} only tries candidates coprime to
// W = p1 * ... * pK. The fraction of integers tried shrinks slowly with K
// while the residue table grows quickly:
//
//   K | residues | candidates tried
//   --+----------+-----------------
//   1 |        1 | 50.0 %
//   2 |        2 | 33.3 %
//   3 |        8 | 26.7 %
//   4 |       48 | 22.9 %
//   5 |      480 | 20.8 %
//   6 |     5760 | 19.2 %

use super::config::MAX_WHEEL_BASIS_SIZE;
use super::primality::trial_division_is_prime;
use std::sync::OnceLock;

/// Wheel factorizer over a basis of the first `K` primes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WheelFactorizer {
    basis: Vec<u64>,
    wheel_size: u64,
    coprimes_in_first_wheel: Vec<u64>,
}

impl WheelFactorizer {
    /// Precompute a wheel over the first `basis_size` primes.
    ///
    /// A basis size of zero is treated as one. The residue table has
    /// `prod(p - 1)` entries, so sizes beyond 6 or 7 get expensive;
    /// [`wheel`] caches sizes up to [`MAX_WHEEL_BASIS_SIZE`].
    pub fn new(basis_size: usize) -> Self {
        let basis = first_primes_by_trial_division(basis_size.max(1));
        let wheel_size: u64 = basis.iter().product();
        let coprimes_in_first_wheel = (0..wheel_size)
            .filter(|i| basis.iter().all(|p| i % p != 0))
            .collect();

        Self {
            basis,
            wheel_size,
            coprimes_in_first_wheel,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// The first `K` primes.
    pub fn basis(&self) -> &[u64] {
        &self.basis
    }

    /// Product of the basis primes.
    pub fn wheel_size(&self) -> u64 {
        self.wheel_size
    }

    /// Every residue in `[0, W)` coprime to every basis prime, ascending.
    ///
    /// Starts at 1 and includes composites such as 121 for `K = 4`.
    pub fn coprimes_in_first_wheel(&self) -> &[u64] {
        &self.coprimes_in_first_wheel
    }

    // ========================================================================
    // Factorization
    // ========================================================================

    /// Smallest prime factor of `n`, or `n` itself when `n` is prime or 1.
    ///
    /// Tries the basis primes, then the first wheel's residues past 1, then
    /// `offset + residue` for each later turn of the wheel, stopping as soon
    /// as the candidate exceeds `sqrt(n)`.
    pub fn find_first_factor(&self, n: u64) -> u64 {
        let first_wheel = self.coprimes_in_first_wheel.iter().skip(1).copied();
        if let Some(k) = self
            .basis
            .iter()
            .copied()
            .chain(first_wheel)
            .find_map(|k| first_factor_maybe(n, k))
        {
            return k;
        }

        let mut offset = self.wheel_size;
        while offset < n {
            if let Some(k) = self
                .coprimes_in_first_wheel
                .iter()
                .find_map(|&p| first_factor_maybe(n, offset + p))
            {
                return k;
            }
            offset += self.wheel_size;
        }
        n
    }

    /// Whether `n` is prime.
    pub fn is_prime(&self, n: u64) -> bool {
        n > 1 && self.find_first_factor(n) == n
    }
}

/// `Some(k)` when `k` divides `n`, `Some(n)` when `k` passed `sqrt(n)`.
///
/// Precondition: no integer in `[2, k)` divides `n`.
#[inline]
fn first_factor_maybe(n: u64, k: u64) -> Option<u64> {
    if n % k == 0 {
        Some(k)
    } else if k > n / k {
        Some(n)
    } else {
        None
    }
}

fn first_primes_by_trial_division(count: usize) -> Vec<u64> {
    let mut primes = Vec::with_capacity(count);
    let mut candidate = 2u64;
    while primes.len() < count {
        if trial_division_is_prime(candidate) {
            primes.push(candidate);
        }
        candidate += 1;
    }
    primes
}

// ============================================================================
// Wheel Cache
// ============================================================================

#[allow(clippy::declare_interior_mutable_const)]
const EMPTY_SLOT: OnceLock<WheelFactorizer> = OnceLock::new();
static WHEELS: [OnceLock<WheelFactorizer>; MAX_WHEEL_BASIS_SIZE] = [EMPTY_SLOT; MAX_WHEEL_BASIS_SIZE];

/// Shared wheel for `basis_size` in `1..=MAX_WHEEL_BASIS_SIZE`, built on
/// first use and immutable afterwards.
///
/// Returns `None` for sizes outside that range.
pub fn wheel(basis_size: usize) -> Option<&'static WheelFactorizer> {
    (1..=MAX_WHEEL_BASIS_SIZE)
        .contains(&basis_size)
        .then(|| cached_wheel(basis_size))
}

/// Shared wheel with `basis_size` clamped into the cached range.
pub(super) fn cached_wheel(basis_size: usize) -> &'static WheelFactorizer {
    let basis_size = basis_size.clamp(1, MAX_WHEEL_BASIS_SIZE);
    WHEELS[basis_size - 1].get_or_init(|| WheelFactorizer::new(basis_size))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coprime_counts() {
        let counts: Vec<usize> = (1..=5)
            .map(|k| WheelFactorizer::new(k).coprimes_in_first_wheel().len())
            .collect();
        assert_eq!(counts, vec![1, 2, 8, 48, 480]);
    }

    #[test]
    fn test_coprimes_for_basis_three() {
        let wheel = WheelFactorizer::new(3);
        assert_eq!(wheel.basis(), &[2, 3, 5]);
        assert_eq!(wheel.wheel_size(), 30);
        assert_eq!(
            wheel.coprimes_in_first_wheel(),
            &[1, 7, 11, 13, 17, 19, 23, 29]
        );
    }

    #[test]
    fn test_residues_include_composites() {
        let wheel = WheelFactorizer::new(4);
        assert!(wheel.coprimes_in_first_wheel().contains(&121));
        assert!(wheel.coprimes_in_first_wheel().contains(&143));
    }

    #[test]
    fn test_find_first_factor() {
        let wheel = WheelFactorizer::new(3);
        assert_eq!(wheel.find_first_factor(1), 1);
        assert_eq!(wheel.find_first_factor(2), 2);
        assert_eq!(wheel.find_first_factor(15), 3);
        assert_eq!(wheel.find_first_factor(49), 7);
        assert_eq!(wheel.find_first_factor(31 * 37), 31);
        assert_eq!(wheel.find_first_factor(101), 101);
        assert_eq!(wheel.find_first_factor(1_000_003 * 1_000_033), 1_000_003);
    }

    #[test]
    fn test_is_prime_matches_trial_division() {
        for k in 1..=5 {
            let wheel = WheelFactorizer::new(k);
            for n in 0..2_000 {
                assert_eq!(wheel.is_prime(n), trial_division_is_prime(n), "K={} n={}", k, n);
            }
        }
    }

    #[test]
    fn test_square_of_prime_past_first_wheel() {
        // 109561 = 331^2, and 331 lies beyond the first wheel of 210.
        let wheel = WheelFactorizer::new(4);
        assert_eq!(wheel.is_prime(109_561), trial_division_is_prime(109_561));
        assert_eq!(wheel.find_first_factor(109_561), 331);
    }

    #[test]
    fn test_wheel_cache() {
        let first = wheel(4).unwrap();
        let second = wheel(4).unwrap();
        assert!(std::ptr::eq(first, second));
        assert_eq!(first.wheel_size(), 210);
        assert_eq!(wheel(6).unwrap().coprimes_in_first_wheel().len(), 5760);

        assert!(wheel(0).is_none());
        assert!(wheel(MAX_WHEEL_BASIS_SIZE + 1).is_none());
    }
}
