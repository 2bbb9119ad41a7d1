// ============================================================================
// Magnitude Module
// Exact positive scale factors as products of prime and constant powers
// ============================================================================
//
// A magnitude is a sorted list of (base, rational exponent) terms:
//
//   792       = 2^3 * 3^2 * 11
//   5/8       = 2^-3 * 5
//   sqrt(2)*pi = 2^(1/2) * pi
//
// Invariants kept by every constructor and operation:
// - exponents are non-zero
// - prime bases come first, in ascending order, then constants by symbol
// - at most one term per base
// - values are immutable; the algebra returns new magnitudes

pub mod constant;
mod value;

pub use constant::MagConstant;
pub use value::MagnitudeValue;

use crate::numeric::{NumericError, NumericResult, Ratio};
use crate::prime::{factorize_candidates, is_prime};
use rust_decimal::Decimal;
use smallvec::{smallvec, SmallVec};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Div, Mul};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Basis Elements
// ============================================================================

/// A basis element of a magnitude.
///
/// The derived order lists every prime before every constant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MagBase {
    /// A prime number
    Prime(u64),
    /// An irrational constant such as pi
    Constant(MagConstant),
}

impl MagBase {
    /// A prime base.
    ///
    /// # Errors
    /// Returns `InvalidInput` if `p` is not prime.
    pub fn prime(p: u64) -> NumericResult<Self> {
        if is_prime(p) {
            Ok(MagBase::Prime(p))
        } else {
            Err(NumericError::InvalidInput)
        }
    }

    /// Approximate value of the base.
    pub fn value(&self) -> f64 {
        match self {
            MagBase::Prime(p) => *p as f64,
            MagBase::Constant(c) => c.value(),
        }
    }

    fn validate(&self) -> NumericResult<()> {
        match self {
            MagBase::Prime(p) if !is_prime(*p) => Err(NumericError::InvalidInput),
            _ => Ok(()),
        }
    }
}

impl fmt::Display for MagBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MagBase::Prime(p) => write!(f, "{}", p),
            MagBase::Constant(c) => write!(f, "{}", c),
        }
    }
}

/// One `base^exponent` factor of a magnitude.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MagTerm {
    pub base: MagBase,
    pub exponent: Ratio,
}

impl MagTerm {
    pub fn new(base: MagBase, exponent: Ratio) -> Self {
        Self { base, exponent }
    }
}

impl fmt::Display for MagTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.exponent == Ratio::ONE {
            write!(f, "{}", self.base)
        } else if self.exponent.is_integer() {
            write!(f, "{}^{}", self.base, self.exponent)
        } else {
            write!(f, "{}^({})", self.base, self.exponent)
        }
    }
}

type Terms = SmallVec<[MagTerm; 4]>;

// ============================================================================
// Magnitude
// ============================================================================

/// A positive real number stored exactly as a product of prime and
/// constant powers with rational exponents.
///
/// Equality is structural: two magnitudes are equal iff their canonical
/// term lists are identical, which for this representation is the same as
/// numeric equality.
///
/// # Example
/// ```
/// use unit_algebra::magnitude::Magnitude;
/// use unit_algebra::numeric::Ratio;
///
/// let kilo = Magnitude::integer_power(10, Ratio::integer(3)).unwrap();
/// let milli = kilo.invert();
/// assert!(kilo.multiply(&milli).unwrap().is_one());
/// assert_eq!(kilo.to_string(), "2^3 * 5^3");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawMagnitude"))]
pub struct Magnitude {
    terms: Terms,
}

/// Unchecked wire form, canonicalized through [`Magnitude::from_terms`].
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawMagnitude {
    terms: Vec<MagTerm>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawMagnitude> for Magnitude {
    type Error = NumericError;

    fn try_from(raw: RawMagnitude) -> NumericResult<Self> {
        Self::from_terms(raw.terms)
    }
}

impl Magnitude {
    // ========================================================================
    // Construction
    // ========================================================================

    /// The magnitude 1 (no terms).
    pub fn one() -> Self {
        Self {
            terms: SmallVec::new(),
        }
    }

    /// The magnitude of a positive integer, factored into primes.
    ///
    /// # Errors
    /// Returns `InvalidInput` for zero, which is not a scale factor.
    pub fn from_integer(n: u64) -> NumericResult<Self> {
        if n == 0 {
            return Err(NumericError::InvalidInput);
        }
        let terms = factorize_candidates(n)
            .map(|(prime, count)| MagTerm::new(MagBase::Prime(prime), Ratio::from(count as i64)))
            .collect();
        Ok(Self { terms })
    }

    /// The magnitude `num / den`.
    ///
    /// # Errors
    /// - `DivisionByZero` if `den == 0`
    /// - `InvalidInput` if `num == 0`
    pub fn from_ratio(num: u64, den: u64) -> NumericResult<Self> {
        if den == 0 {
            return Err(NumericError::DivisionByZero);
        }
        Self::from_integer(num)?.divide(&Self::from_integer(den)?)
    }

    /// `base^exponent` for a single basis element.
    ///
    /// # Errors
    /// Returns `InvalidInput` if a prime base is not actually prime.
    pub fn power_of(base: MagBase, exponent: Ratio) -> NumericResult<Self> {
        base.validate()?;
        if exponent.is_zero() {
            return Ok(Self::one());
        }
        Ok(Self {
            terms: smallvec![MagTerm::new(base, exponent)],
        })
    }

    /// `base^exponent` for any positive integer base, e.g. `10^3`.
    pub fn integer_power(base: u64, exponent: Ratio) -> NumericResult<Self> {
        Self::from_integer(base)?.pow(exponent)
    }

    /// The magnitude of a single constant.
    pub fn constant(constant: MagConstant) -> Self {
        Self {
            terms: smallvec![MagTerm::new(MagBase::Constant(constant), Ratio::ONE)],
        }
    }

    /// The magnitude pi.
    pub fn pi() -> Self {
        Self::constant(MagConstant::PI)
    }

    /// Build a magnitude from arbitrary terms: sorts them, merges repeated
    /// bases and drops zero exponents.
    ///
    /// # Errors
    /// - `InvalidInput` if a prime base is not prime
    /// - `Overflow` / `Underflow` if merged exponents overflow
    pub fn from_terms<I>(terms: I) -> NumericResult<Self>
    where
        I: IntoIterator<Item = MagTerm>,
    {
        let mut terms: Vec<MagTerm> = terms.into_iter().collect();
        for term in &terms {
            term.base.validate()?;
        }
        terms.sort_by(|a, b| a.base.cmp(&b.base));

        let mut merged = Terms::with_capacity(terms.len());
        for term in terms {
            match merged.last_mut() {
                Some(last) if last.base == term.base => {
                    last.exponent = last.exponent.checked_add(term.exponent)?;
                },
                _ => merged.push(term),
            }
        }
        merged.retain(|term| !term.exponent.is_zero());

        Ok(Self { terms: merged })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// The canonical terms, sorted by base.
    #[inline]
    pub fn terms(&self) -> &[MagTerm] {
        &self.terms
    }

    /// Exponent of `base` in this magnitude (zero when absent).
    pub fn get_power(&self, base: &MagBase) -> Ratio {
        self.terms
            .iter()
            .find(|term| &term.base == base)
            .map_or(Ratio::ZERO, |term| term.exponent)
    }

    // ========================================================================
    // Algebra
    // ========================================================================

    /// Product of two magnitudes: a sorted merge summing shared exponents.
    pub fn multiply(&self, other: &Self) -> NumericResult<Self> {
        if self.is_one() {
            return Ok(other.clone());
        }
        if other.is_one() {
            return Ok(self.clone());
        }

        let (lhs, rhs) = (&self.terms, &other.terms);
        let mut terms = Terms::with_capacity(lhs.len() + rhs.len());
        let (mut i, mut j) = (0, 0);

        while i < lhs.len() && j < rhs.len() {
            match lhs[i].base.cmp(&rhs[j].base) {
                Ordering::Less => {
                    terms.push(lhs[i].clone());
                    i += 1;
                },
                Ordering::Greater => {
                    terms.push(rhs[j].clone());
                    j += 1;
                },
                Ordering::Equal => {
                    let exponent = lhs[i].exponent.checked_add(rhs[j].exponent)?;
                    if !exponent.is_zero() {
                        terms.push(MagTerm::new(lhs[i].base.clone(), exponent));
                    }
                    i += 1;
                    j += 1;
                },
            }
        }
        terms.extend(lhs[i..].iter().cloned());
        terms.extend(rhs[j..].iter().cloned());

        Ok(Self { terms })
    }

    /// Reciprocal: every exponent negated.
    pub fn invert(&self) -> Self {
        Self {
            terms: self
                .terms
                .iter()
                .map(|term| MagTerm::new(term.base.clone(), term.exponent.negate()))
                .collect(),
        }
    }

    /// Quotient: `self * other^-1`.
    pub fn divide(&self, other: &Self) -> NumericResult<Self> {
        self.multiply(&other.invert())
    }

    /// Rational power: every exponent multiplied by `exponent`.
    ///
    /// `pow(0)` is one.
    pub fn pow(&self, exponent: Ratio) -> NumericResult<Self> {
        if exponent.is_zero() {
            return Ok(Self::one());
        }
        let terms = self
            .terms
            .iter()
            .map(|term| {
                term.exponent
                    .checked_mul(exponent)
                    .map(|e| MagTerm::new(term.base.clone(), e))
            })
            .collect::<NumericResult<Terms>>()?;
        Ok(Self { terms })
    }

    pub fn sqrt(&self) -> NumericResult<Self> {
        self.pow(Ratio::HALF)
    }

    pub fn cbrt(&self) -> NumericResult<Self> {
        self.pow(Ratio::THIRD)
    }

    /// Structural equality (same as `==`).
    #[inline]
    pub fn equals(&self, other: &Self) -> bool {
        self == other
    }

    // ========================================================================
    // Predicates
    // ========================================================================

    /// Whether this is exactly 1.
    #[inline]
    pub fn is_one(&self) -> bool {
        self.terms.is_empty()
    }

    /// Whether this is a ratio of integers: prime bases with integer
    /// exponents only.
    pub fn is_rational(&self) -> bool {
        self.terms
            .iter()
            .all(|term| matches!(term.base, MagBase::Prime(_)) && term.exponent.is_integer())
    }

    /// Whether this is a positive integer.
    pub fn is_integral(&self) -> bool {
        self.is_rational() && self.terms.iter().all(|term| term.exponent.is_positive())
    }

    /// Whether every exponent is a positive integer, whatever the base.
    pub fn is_positive_integral_power(&self) -> bool {
        self.terms
            .iter()
            .all(|term| term.exponent.is_integer() && term.exponent.is_positive())
    }

    // ========================================================================
    // Decomposition
    // ========================================================================

    /// The largest integer that divides this magnitude: each prime raised
    /// to the integer part of its positive exponent.
    pub fn numerator(&self) -> Self {
        Self {
            terms: self
                .terms
                .iter()
                .filter(|term| matches!(term.base, MagBase::Prime(_)))
                .filter_map(|term| {
                    let whole = term.exponent.integer_part();
                    (whole > 0).then(|| MagTerm::new(term.base.clone(), Ratio::integer(whole)))
                })
                .collect(),
        }
    }

    /// The numerator of the reciprocal.
    pub fn denominator(&self) -> Self {
        Self {
            terms: self
                .terms
                .iter()
                .filter(|term| matches!(term.base, MagBase::Prime(_)))
                .filter_map(|term| {
                    let whole = -term.exponent.integer_part();
                    (whole > 0).then(|| MagTerm::new(term.base.clone(), Ratio::integer(whole)))
                })
                .collect(),
        }
    }

    /// `(numerator, denominator)` as integers for a rational magnitude.
    ///
    /// # Errors
    /// - `NotRepresentable` if the magnitude is irrational
    /// - `Overflow` if either part does not fit `u64`
    pub fn as_ratio(&self) -> NumericResult<(u64, u64)> {
        if !self.is_rational() {
            return Err(NumericError::NotRepresentable);
        }
        Ok((
            self.numerator().to_numeric_value::<u64>()?,
            self.denominator().to_numeric_value::<u64>()?,
        ))
    }

    /// The largest integer power of ten that can be factored out: the
    /// integer part of whichever of the 2 and 5 exponents is smaller in
    /// absolute value, when both have the same sign. Zero otherwise.
    pub fn extract_power_of_10(&self) -> i64 {
        let power_of_2 = self.get_power(&MagBase::Prime(2));
        let power_of_5 = self.get_power(&MagBase::Prime(5));

        let same_sign = (power_of_2.is_positive() && power_of_5.is_positive())
            || (power_of_2.is_negative() && power_of_5.is_negative());
        if !same_sign {
            return 0;
        }

        if power_of_2.abs() < power_of_5.abs() {
            power_of_2.integer_part()
        } else {
            power_of_5.integer_part()
        }
    }

    /// Only the prime terms.
    pub fn remove_constants(&self) -> Self {
        Self {
            terms: self
                .terms
                .iter()
                .filter(|term| matches!(term.base, MagBase::Prime(_)))
                .cloned()
                .collect(),
        }
    }

    /// The largest magnitude `C` such that `self / C` and `other / C` have
    /// only positive exponents: the minimum exponent per base, with absent
    /// bases counting as zero.
    ///
    /// For rational magnitudes this is the largest `C` of which both inputs
    /// are integer multiples.
    pub fn common_magnitude(&self, other: &Self) -> Self {
        let (lhs, rhs) = (&self.terms, &other.terms);
        let mut terms = Terms::new();
        let (mut i, mut j) = (0, 0);

        let negative_only = |term: &MagTerm| term.exponent.is_negative().then(|| term.clone());

        while i < lhs.len() && j < rhs.len() {
            match lhs[i].base.cmp(&rhs[j].base) {
                Ordering::Less => {
                    terms.extend(negative_only(&lhs[i]));
                    i += 1;
                },
                Ordering::Greater => {
                    terms.extend(negative_only(&rhs[j]));
                    j += 1;
                },
                Ordering::Equal => {
                    let lower = if rhs[j].exponent < lhs[i].exponent {
                        &rhs[j]
                    } else {
                        &lhs[i]
                    };
                    terms.push(lower.clone());
                    i += 1;
                    j += 1;
                },
            }
        }
        terms.extend(lhs[i..].iter().filter_map(negative_only));
        terms.extend(rhs[j..].iter().filter_map(negative_only));

        Self { terms }
    }

    // ========================================================================
    // Numeric Evaluation
    // ========================================================================

    /// Evaluate in the numeric type `T`.
    ///
    /// Integer targets require [`is_integral`](Self::is_integral); float
    /// targets evaluate integer powers and roots separately per term.
    pub fn to_numeric_value<T: MagnitudeValue>(&self) -> NumericResult<T> {
        T::from_magnitude(self)
    }

    /// Evaluate as a `Decimal`.
    ///
    /// Exact when the denominator has no prime factors other than 2 and 5;
    /// other rationals round to `Decimal` precision.
    ///
    /// # Errors
    /// `NotRepresentable` for irrational magnitudes.
    pub fn to_decimal(&self) -> NumericResult<Decimal> {
        self.to_numeric_value::<Decimal>()
    }
}

/// Free-function form of [`Magnitude::common_magnitude`].
pub fn common_magnitude(a: &Magnitude, b: &Magnitude) -> Magnitude {
    a.common_magnitude(b)
}

// ============================================================================
// Trait Implementations
// ============================================================================

// Infallible operators for ergonomics (panic on exponent overflow - use the methods on untrusted input)
impl Mul for &Magnitude {
    type Output = Magnitude;

    fn mul(self, rhs: Self) -> Self::Output {
        self.multiply(rhs).expect("Magnitude exponent overflow")
    }
}

impl Mul for Magnitude {
    type Output = Magnitude;

    fn mul(self, rhs: Self) -> Self::Output {
        &self * &rhs
    }
}

impl Div for &Magnitude {
    type Output = Magnitude;

    fn div(self, rhs: Self) -> Self::Output {
        self.divide(rhs).expect("Magnitude exponent overflow")
    }
}

impl Div for Magnitude {
    type Output = Magnitude;

    fn div(self, rhs: Self) -> Self::Output {
        &self / &rhs
    }
}

impl fmt::Display for Magnitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_one() {
            return f.write_str("1");
        }
        for (i, term) in self.terms.iter().enumerate() {
            if i > 0 {
                f.write_str(" * ")?;
            }
            write!(f, "{}", term)?;
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
