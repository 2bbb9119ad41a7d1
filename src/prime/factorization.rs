// ============================================================================
// Factorization
// Smallest-factor search and prime factorization of 64-bit integers
// ============================================================================

use super::config::FactorizerConfig;
use super::primality::baillie_psw_probable_prime;
use super::wheel::{cached_wheel, WheelFactorizer};
use std::iter::FusedIterator;
use std::sync::OnceLock;

/// The first `count` primes, found with Baillie-PSW.
pub fn first_n_primes(count: usize) -> Vec<u64> {
    let mut primes = Vec::with_capacity(count);
    let mut candidate = 2u64;
    while primes.len() < count {
        if baillie_psw_probable_prime(candidate) {
            primes.push(candidate);
        }
        candidate += 1;
    }
    primes
}

/// Number of times `factor` divides `n`.
///
/// Returns 0 when `n == 0` or `factor < 2`, where the count is unbounded or
/// meaningless.
pub fn multiplicity(factor: u64, mut n: u64) -> u32 {
    if n == 0 || factor < 2 {
        return 0;
    }
    let mut count = 0;
    while n % factor == 0 {
        n /= factor;
        count += 1;
    }
    count
}

/// `n / base^pow`.
///
/// Precondition: `base^pow` divides `n`.
pub fn remove_power(base: u64, pow: u32, mut n: u64) -> u64 {
    for _ in 0..pow {
        debug_assert!(base != 0 && n % base == 0);
        n /= base;
    }
    n
}

// ============================================================================
// Factorizer
// ============================================================================

/// Finds prime factors of `u64` values.
///
/// The search runs in three stages:
/// 1. plain division by a table of the first few primes,
/// 2. a Baillie-PSW check that returns early for primes,
/// 3. wheel trial division for composites with only large factors.
#[derive(Debug, Clone)]
pub struct Factorizer {
    config: FactorizerConfig,
    small_primes: Vec<u64>,
    wheel: &'static WheelFactorizer,
}

impl Factorizer {
    /// Build a factorizer from a validated configuration.
    pub fn new(config: FactorizerConfig) -> Result<Self, String> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: FactorizerConfig) -> Self {
        Self {
            small_primes: first_n_primes(config.trial_prime_count),
            wheel: cached_wheel(config.wheel_basis_size),
            config,
        }
    }

    pub fn config(&self) -> &FactorizerConfig {
        &self.config
    }

    /// The primes tried by plain division.
    pub fn small_primes(&self) -> &[u64] {
        &self.small_primes
    }

    pub fn wheel(&self) -> &'static WheelFactorizer {
        self.wheel
    }

    /// Smallest prime factor of `n`; `n` itself when `n` is prime.
    ///
    /// 0 and 1 have no prime factors and are returned unchanged.
    pub fn find_first_factor(&self, n: u64) -> u64 {
        if n < 2 {
            return n;
        }

        for &p in &self.small_primes {
            if n % p == 0 {
                return p;
            }
            if p > n / p {
                return n;
            }
        }

        if baillie_psw_probable_prime(n) {
            return n;
        }

        tracing::trace!(n, "composite with no small factor, using wheel trial division");
        self.wheel.find_first_factor(n)
    }

    /// Whether `n` is prime.
    pub fn is_prime(&self, n: u64) -> bool {
        baillie_psw_probable_prime(n)
    }

    /// Prime factorization of `n` as `(prime, multiplicity)` pairs in
    /// ascending prime order. Empty for 0 and 1.
    pub fn factorize_candidates(&self, n: u64) -> PrimeFactors<'_> {
        PrimeFactors {
            factorizer: self,
            remaining: n,
        }
    }
}

impl Default for Factorizer {
    fn default() -> Self {
        Self::from_valid_config(FactorizerConfig::default())
    }
}

/// Iterator over the prime factorization of a number.
#[derive(Debug, Clone)]
pub struct PrimeFactors<'a> {
    factorizer: &'a Factorizer,
    remaining: u64,
}

impl Iterator for PrimeFactors<'_> {
    type Item = (u64, u32);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining < 2 {
            return None;
        }
        let prime = self.factorizer.find_first_factor(self.remaining);
        let count = multiplicity(prime, self.remaining);
        self.remaining = remove_power(prime, count, self.remaining);
        Some((prime, count))
    }
}

impl FusedIterator for PrimeFactors<'_> {}

// ============================================================================
// Shared Factorizer
// ============================================================================

static DEFAULT_FACTORIZER: OnceLock<Factorizer> = OnceLock::new();

/// The process-wide factorizer with the default configuration.
pub fn default_factorizer() -> &'static Factorizer {
    DEFAULT_FACTORIZER.get_or_init(Factorizer::default)
}

/// Whether `n` is prime.
pub fn is_prime(n: u64) -> bool {
    default_factorizer().is_prime(n)
}

/// Smallest prime factor of `n` using the default factorizer.
pub fn find_first_factor(n: u64) -> u64 {
    default_factorizer().find_first_factor(n)
}

/// Prime factorization of `n` using the default factorizer.
pub fn factorize_candidates(n: u64) -> PrimeFactors<'static> {
    default_factorizer().factorize_candidates(n)
}
