// ============================================================================
// Prime Module
// Primality testing and factorization of 64-bit integers
// ============================================================================
//
// This module provides:
// - Modular arithmetic that never overflows 64 bits
// - Miller-Rabin, strong Lucas and Baillie-PSW primality tests
// - WheelFactorizer with a shared, build-once cache per basis size
// - Factorizer: small-prime table + Baillie-PSW + wheel trial division

pub mod config;
pub mod modular;
pub mod primality;
mod factorization;
mod wheel;

pub use config::FactorizerConfig;
pub use factorization::{
    default_factorizer, factorize_candidates, find_first_factor, first_n_primes, is_prime,
    multiplicity, remove_power, Factorizer, PrimeFactors,
};
pub use primality::{
    baillie_psw_probable_prime, is_perfect_square, jacobi_symbol, miller_rabin_probable_prime,
    strong_lucas_probable_prime, trial_division_is_prime,
};
pub use wheel::{wheel, WheelFactorizer};
