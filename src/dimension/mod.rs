// ============================================================================
// Dimension Module
// Exponent vectors over named base dimensions
// ============================================================================
//
// A dimension is a sorted list of (base dimension, rational exponent) pairs,
// optionally tagged with the name of a quantity kind:
//
//   length / time            -> L*T^-1        (anonymous)
//   velocity                 -> L*T^-1        (named "velocity")
//
// Two relations are defined:
// - equality: same kind name and same exponents
// - convertibility: same exponents, whatever the kind names
//
// Algebra results are always anonymous; naming a result is an explicit step.

use crate::numeric::{NumericResult, Ratio};
use smallvec::{smallvec, SmallVec};
use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Div, Mul};

#[cfg(feature = "serde")]
use crate::numeric::NumericError;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A named base dimension such as length (`L`) or time (`T`).
///
/// Ordered by symbol, which fixes the canonical order of dimension terms.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BaseDimension {
    symbol: Cow<'static, str>,
}

impl BaseDimension {
    pub fn new(symbol: impl Into<Cow<'static, str>>) -> Self {
        Self {
            symbol: symbol.into(),
        }
    }

    #[inline]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }
}

impl fmt::Display for BaseDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.symbol)
    }
}

type Exponents = SmallVec<[(BaseDimension, Ratio); 4]>;

/// The physical dimension of a unit or quantity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawDimension"))]
pub struct Dimension {
    name: Option<Cow<'static, str>>,
    exponents: Exponents,
}

/// Unchecked wire form, canonicalized through [`Dimension::from_exponents`].
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawDimension {
    name: Option<Cow<'static, str>>,
    exponents: Vec<(BaseDimension, Ratio)>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawDimension> for Dimension {
    type Error = NumericError;

    fn try_from(raw: RawDimension) -> NumericResult<Self> {
        let dimension = Self::from_exponents(raw.exponents)?;
        Ok(match raw.name {
            Some(name) => dimension.named(name),
            None => dimension,
        })
    }
}

impl Dimension {
    // ========================================================================
    // Construction
    // ========================================================================

    /// The anonymous dimensionless dimension.
    pub fn one() -> Self {
        Self::default()
    }

    /// A single base dimension to the first power.
    pub fn base(base: BaseDimension) -> Self {
        Self {
            name: None,
            exponents: smallvec![(base, Ratio::ONE)],
        }
    }

    /// Build from arbitrary `(base, exponent)` pairs: sorted, repeated bases
    /// merged and zero exponents dropped.
    ///
    /// # Errors
    /// Returns `Overflow` / `Underflow` if merged exponents overflow.
    pub fn from_exponents<I>(exponents: I) -> NumericResult<Self>
    where
        I: IntoIterator<Item = (BaseDimension, Ratio)>,
    {
        let mut pairs: Vec<(BaseDimension, Ratio)> = exponents.into_iter().collect();
        pairs.sort_by(|a, b| a.0.cmp(&b.0));

        let mut merged = Exponents::with_capacity(pairs.len());
        for (base, exponent) in pairs {
            match merged.last_mut() {
                Some((last, sum)) if *last == base => *sum = sum.checked_add(exponent)?,
                _ => merged.push((base, exponent)),
            }
        }
        merged.retain(|(_, exponent)| !exponent.is_zero());

        Ok(Self {
            name: None,
            exponents: merged,
        })
    }

    /// Tag this dimension with a quantity kind name.
    pub fn named(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// The same exponents without a kind name.
    pub fn anonymous(&self) -> Self {
        Self {
            name: None,
            exponents: self.exponents.clone(),
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Canonical `(base, exponent)` pairs, sorted by base symbol.
    pub fn exponents(&self) -> &[(BaseDimension, Ratio)] {
        &self.exponents
    }

    /// Exponent of `base` (zero when absent).
    pub fn exponent(&self, base: &BaseDimension) -> Ratio {
        self.exponents
            .iter()
            .find(|(b, _)| b == base)
            .map_or(Ratio::ZERO, |(_, e)| *e)
    }

    pub fn is_dimensionless(&self) -> bool {
        self.exponents.is_empty()
    }

    // ========================================================================
    // Algebra
    // ========================================================================

    /// Product: exponents of shared bases summed, zeros removed.
    pub fn multiply(&self, other: &Self) -> NumericResult<Self> {
        let (lhs, rhs) = (&self.exponents, &other.exponents);
        let mut exponents = Exponents::with_capacity(lhs.len() + rhs.len());
        let (mut i, mut j) = (0, 0);

        while i < lhs.len() && j < rhs.len() {
            match lhs[i].0.cmp(&rhs[j].0) {
                Ordering::Less => {
                    exponents.push(lhs[i].clone());
                    i += 1;
                },
                Ordering::Greater => {
                    exponents.push(rhs[j].clone());
                    j += 1;
                },
                Ordering::Equal => {
                    let sum = lhs[i].1.checked_add(rhs[j].1)?;
                    if !sum.is_zero() {
                        exponents.push((lhs[i].0.clone(), sum));
                    }
                    i += 1;
                    j += 1;
                },
            }
        }
        exponents.extend(lhs[i..].iter().cloned());
        exponents.extend(rhs[j..].iter().cloned());

        Ok(Self {
            name: None,
            exponents,
        })
    }

    /// Reciprocal dimension.
    pub fn inverse(&self) -> Self {
        Self {
            name: None,
            exponents: self
                .exponents
                .iter()
                .map(|(base, exponent)| (base.clone(), exponent.negate()))
                .collect(),
        }
    }

    pub fn divide(&self, other: &Self) -> NumericResult<Self> {
        self.multiply(&other.inverse())
    }

    /// Every exponent multiplied by `exponent`; `pow(0)` is dimensionless.
    pub fn pow(&self, exponent: Ratio) -> NumericResult<Self> {
        if exponent.is_zero() {
            return Ok(Self::one());
        }
        let exponents = self
            .exponents
            .iter()
            .map(|(base, e)| e.checked_mul(exponent).map(|e| (base.clone(), e)))
            .collect::<NumericResult<Exponents>>()?;
        Ok(Self {
            name: None,
            exponents,
        })
    }

    pub fn sqrt(&self) -> NumericResult<Self> {
        self.pow(Ratio::HALF)
    }

    // ========================================================================
    // Relations
    // ========================================================================

    /// Same kind and same exponents.
    #[inline]
    pub fn equals(&self, other: &Self) -> bool {
        self == other
    }

    /// Same exponents: values convert between the two numerically, even if
    /// they denote different kinds.
    #[inline]
    pub fn convertible(&self, other: &Self) -> bool {
        self.exponents == other.exponents
    }

    /// The dimension two operands can be unified to without an explicit
    /// cast:
    /// - equal dimensions unify to themselves
    /// - convertible ones where at most one is named unify to the named one
    /// - two different names, or different exponents, do not unify
    pub fn common_dimension(&self, other: &Self) -> Option<Self> {
        if self == other {
            return Some(self.clone());
        }
        if !self.convertible(other) {
            return None;
        }
        match (&self.name, &other.name) {
            (Some(_), Some(_)) => None,
            (None, Some(_)) => Some(other.clone()),
            _ => Some(self.clone()),
        }
    }
}

/// Free-function form of [`Dimension::common_dimension`].
pub fn common_dimension(a: &Dimension, b: &Dimension) -> Option<Dimension> {
    a.common_dimension(b)
}

// ============================================================================
// Trait Implementations
// ============================================================================

// Infallible operators for ergonomics (panic on exponent overflow)
impl Mul for &Dimension {
    type Output = Dimension;

    fn mul(self, rhs: Self) -> Self::Output {
        self.multiply(rhs).expect("Dimension exponent overflow")
    }
}

impl Div for &Dimension {
    type Output = Dimension;

    fn div(self, rhs: Self) -> Self::Output {
        self.divide(rhs).expect("Dimension exponent overflow")
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.name {
            return f.write_str(name);
        }
        if self.exponents.is_empty() {
            return f.write_str("1");
        }
        for (i, (base, exponent)) in self.exponents.iter().enumerate() {
            if i > 0 {
                f.write_str("*")?;
            }
            if *exponent == Ratio::ONE {
                write!(f, "{}", base)?;
            } else if exponent.is_integer() {
                write!(f, "{}^{}", base, exponent)?;
            } else {
                write!(f, "{}^({})", base, exponent)?;
            }
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn length() -> Dimension {
        Dimension::base(BaseDimension::new("L"))
    }

    fn time() -> Dimension {
        Dimension::base(BaseDimension::new("T"))
    }

    fn mass() -> Dimension {
        Dimension::base(BaseDimension::new("M"))
    }

    fn energy_exponents() -> Dimension {
        let velocity = &length() / &time();
        &mass() * &(&velocity * &velocity)
    }

    #[test]
    fn test_base_and_one() {
        assert!(Dimension::one().is_dimensionless());
        assert!(!length().is_dimensionless());
        assert_eq!(length().exponent(&BaseDimension::new("L")), Ratio::ONE);
        assert_eq!(length().exponent(&BaseDimension::new("T")), Ratio::ZERO);
    }

    #[test]
    fn test_algebra_canonicalizes() {
        let area = &length() * &length();
        assert_eq!(area.exponents(), &[(BaseDimension::new("L"), Ratio::integer(2))]);

        assert!((&length() / &length()).is_dimensionless());

        let velocity = &length() / &time();
        assert_eq!(
            velocity.exponents(),
            &[
                (BaseDimension::new("L"), Ratio::ONE),
                (BaseDimension::new("T"), Ratio::MINUS_ONE),
            ]
        );
        assert_eq!(area.sqrt().unwrap(), length());
        assert!(length().pow(Ratio::ZERO).unwrap().is_dimensionless());
    }

    #[test]
    fn test_from_exponents() {
        let d = Dimension::from_exponents(vec![
            (BaseDimension::new("T"), Ratio::integer(-2)),
            (BaseDimension::new("L"), Ratio::ONE),
            (BaseDimension::new("M"), Ratio::ONE),
            (BaseDimension::new("L"), Ratio::ONE),
            (BaseDimension::new("I"), Ratio::ZERO),
        ])
        .unwrap();
        assert_eq!(d, energy_exponents());
    }

    #[test]
    fn test_velocity_convertible_not_equal() {
        let length_per_time = &length() / &time();
        let velocity = length_per_time.clone().named("velocity");

        assert!(length_per_time.convertible(&velocity));
        assert!(!length_per_time.equals(&velocity));
        assert_eq!(
            length_per_time.common_dimension(&velocity),
            Some(velocity.clone())
        );
        assert_eq!(common_dimension(&velocity, &length_per_time), Some(velocity));
    }

    #[test]
    fn test_energy_and_torque() {
        let energy = energy_exponents().named("energy");
        let torque = energy_exponents().named("torque");

        assert!(energy.convertible(&torque));
        assert!(!energy.equals(&torque));
        assert_eq!(energy.common_dimension(&torque), None);
        assert_eq!(energy.common_dimension(&energy), Some(energy.clone()));
    }

    #[test]
    fn test_not_convertible() {
        assert!(!length().convertible(&time()));
        assert_eq!(length().common_dimension(&time()), None);
    }

    #[test]
    fn test_algebra_drops_names() {
        let velocity = (&length() / &time()).named("velocity");
        let product = &velocity * &time();
        assert_eq!(product.name(), None);
        assert!(product.equals(&length()));
        assert_eq!(velocity.anonymous(), &length() / &time());
    }

    #[test]
    fn test_display() {
        assert_eq!(Dimension::one().to_string(), "1");
        assert_eq!((&length() / &time()).to_string(), "L*T^-1");
        assert_eq!(energy_exponents().to_string(), "L^2*M*T^-2");
        assert_eq!(length().sqrt().unwrap().to_string(), "L^(1/2)");
        assert_eq!(
            (&length() / &time()).named("velocity").to_string(),
            "velocity"
        );
    }

    fn arb_dimension() -> impl Strategy<Value = Dimension> {
        (-3i64..=3, -3i64..=3, -3i64..=3).prop_map(|(l, m, t)| {
            Dimension::from_exponents(vec![
                (BaseDimension::new("L"), Ratio::integer(l)),
                (BaseDimension::new("M"), Ratio::integer(m)),
                (BaseDimension::new("T"), Ratio::integer(t)),
            ])
            .unwrap()
        })
    }

    proptest! {
        #[test]
        fn prop_times_inverse_is_dimensionless(a in arb_dimension()) {
            prop_assert!(a.multiply(&a.inverse()).unwrap().is_dimensionless());
        }

        #[test]
        fn prop_multiply_then_divide(a in arb_dimension(), b in arb_dimension()) {
            prop_assert_eq!(a.multiply(&b).unwrap().divide(&b).unwrap(), a);
        }

        #[test]
        fn prop_convertible_is_symmetric(a in arb_dimension(), b in arb_dimension()) {
            prop_assert_eq!(a.convertible(&b), b.convertible(&a));
        }
    }
}
