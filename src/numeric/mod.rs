// ============================================================================
// Numeric Module
// Exact and double-width arithmetic used by the unit algebra
// ============================================================================
//
// This module provides:
// - Ratio: normalized rational exponents
// - WideInt<T>: 2N-bit integers built from two native N-bit halves
// - FixedPoint<T>: N.N fixed-point factors for scaling integers
// - NumericError: Error types for arithmetic operations
//
// Design principles:
// - Checked operations return Result; wrapping ones document their domain
// - No silent widening through a larger native type
// - Scaling truncates symmetrically toward zero

mod errors;
pub mod math;
mod fixed_point;
mod ratio;
mod wide_int;

pub use errors::{NumericError, NumericResult};
pub use fixed_point::FixedPoint;
pub use ratio::Ratio;
pub use wide_int::{UnsignedWord, WideInt, Word};
