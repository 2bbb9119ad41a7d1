// ============================================================================
// Unit Algebra Library
// Exact magnitude and dimension algebra for unit conversion
// ============================================================================

//! # Unit Algebra
//!
//! The core of a units library: exact scale factors, dimensional analysis
//! and the conversion glue between them.
//!
//! ## Features
//!
//! - **Exact magnitudes** as products of prime powers with rational exponents,
//!   plus irrational constants such as pi
//! - **Dimension algebra** with separate equality and convertibility relations
//! - **Deterministic 64-bit primality** (Baillie-PSW) and wheel factorization
//! - **Double-width and fixed-point arithmetic** for scaling integers without
//!   overflow or rounding bias
//! - **Checked conversions**: dimension mismatches are rejected up front and
//!   lossy conversions require an explicit cast
//!
//! ## Example
//!
//! ```rust
//! use unit_algebra::prelude::*;
//!
//! let length = Dimension::base(BaseDimension::new("L"));
//! let metre = Unit::base("m", length);
//! let kilo = Magnitude::integer_power(10, Ratio::integer(3)).unwrap();
//! let kilometre = Unit::scaled("km", kilo, &metre).unwrap();
//!
//! // Exact conversions go through the implicit path
//! assert_eq!(convert(1i32, &kilometre, &metre).unwrap(), 1000);
//! assert_eq!(convert(1000.0f64, &metre, &kilometre).unwrap(), 1.0);
//!
//! // Truncating ones must be explicit
//! assert!(convert(1500i32, &metre, &kilometre).is_err());
//! assert_eq!(value_cast(1500i32, &metre, &kilometre).unwrap(), 1);
//! ```

pub mod conversion;
pub mod dimension;
pub mod magnitude;
pub mod numeric;
pub mod prime;

// Re-exports for convenience
pub mod prelude {
    pub use crate::conversion::{
        common_unit, convert, value_cast, Conversion, ConversionError, ConversionFactor,
        ConversionResult, Exactness, Representation, Unit, UnitKind,
    };
    pub use crate::dimension::{common_dimension, BaseDimension, Dimension};
    pub use crate::magnitude::{common_magnitude, MagBase, MagConstant, MagTerm, Magnitude};
    pub use crate::numeric::{NumericError, NumericResult, Ratio};
    pub use crate::prime::{factorize_candidates, is_prime};
}

#[cfg(test)]
mod integration_tests {
    use super::prelude::*;
    use rust_decimal::Decimal;

    struct Si {
        metre: Unit,
        second: Unit,
        kilogram: Unit,
    }

    fn si() -> Si {
        Si {
            metre: Unit::base("m", Dimension::base(BaseDimension::new("L"))),
            second: Unit::base("s", Dimension::base(BaseDimension::new("T"))),
            kilogram: Unit::base("kg", Dimension::base(BaseDimension::new("M"))),
        }
    }

    fn prefixed(symbol: &'static str, power: i64, unit: &Unit) -> Unit {
        Unit::scaled(symbol, Magnitude::integer_power(10, Ratio::integer(power)).unwrap(), unit)
            .unwrap()
    }

    #[test]
    fn test_prefix_conversions() {
        let si = si();
        let km = prefixed("km", 3, &si.metre);
        let mm = prefixed("mm", -3, &si.metre);

        assert_eq!(convert(1i64, &km, &si.metre), Ok(1000));
        assert_eq!(convert(1000.0f64, &si.metre, &km), Ok(1.0));
        assert_eq!(convert(1i64, &km, &mm), Ok(1_000_000));

        let metres = convert(2000.0f64, &mm, &si.metre).unwrap();
        assert_eq!(convert(metres, &si.metre, &mm), Ok(2000.0));

        let metres = convert(Decimal::from(2000), &mm, &si.metre).unwrap();
        assert_eq!(convert(metres, &si.metre, &mm), Ok(Decimal::from(2000)));
    }

    #[test]
    fn test_derived_unit_conversion() {
        let si = si();
        let km = prefixed("km", 3, &si.metre);
        let hour = Unit::scaled("h", Magnitude::from_integer(3600).unwrap(), &si.second).unwrap();

        let km_per_hour = &km / &hour;
        let m_per_s = &si.metre / &si.second;

        // 36 km/h = 10 m/s; the factor 5/18 is exact but not integral.
        assert_eq!(
            ConversionFactor::between(&km_per_hour, &m_per_s)
                .unwrap()
                .magnitude()
                .as_ratio(),
            Ok((5, 18))
        );
        assert_eq!(convert(36i32, &km_per_hour, &m_per_s), Err(ConversionError::PrecisionLoss));
        assert_eq!(value_cast(36i32, &km_per_hour, &m_per_s), Ok(10));
        assert_eq!(convert(10i32, &m_per_s, &km_per_hour), Err(ConversionError::PrecisionLoss));
        assert_eq!(value_cast(10i32, &m_per_s, &km_per_hour), Ok(36));
    }

    #[test]
    fn test_velocity_kind() {
        let si = si();
        let length_per_time = si.metre.dimension() / si.second.dimension();
        let velocity = length_per_time.clone().named("velocity");

        assert!(length_per_time.convertible(&velocity));
        assert!(!length_per_time.equals(&velocity));
        assert_eq!(common_dimension(&length_per_time, &velocity), Some(velocity));
    }

    #[test]
    fn test_energy_and_torque() {
        let si = si();
        let newton = (&si.kilogram * &(&si.metre / &(&si.second * &si.second)))
            .with_dimension(
                (si.kilogram.dimension()
                    * &(si.metre.dimension()
                        / &(si.second.dimension() * si.second.dimension())))
                    .named("force"),
            )
            .unwrap();

        let force_times_length = newton.dimension() * si.metre.dimension();
        let length_times_force = si.metre.dimension() * newton.dimension();
        let energy = force_times_length.named("energy");
        let torque = length_times_force.named("torque");

        assert!(energy.convertible(&torque));
        assert!(!energy.equals(&torque));
        assert_eq!(common_dimension(&energy, &torque), None);

        let joule = Unit::alias("J", &(&newton * &si.metre))
            .with_dimension(energy)
            .unwrap();
        let newton_metre = Unit::alias("N*m", &(&newton * &si.metre))
            .with_dimension(torque)
            .unwrap();

        // Numerically convertible, but no implicit common unit.
        assert_eq!(convert(5.0f64, &joule, &newton_metre), Ok(5.0));
        assert_eq!(common_unit(&joule, &newton_metre), None);
    }

    #[test]
    fn test_mismatch_rejected() {
        let si = si();
        assert!(matches!(
            Conversion::new(&si.metre, &si.kilogram),
            Err(ConversionError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_magnitudes_from_factorization() {
        let magnitude = Magnitude::from_integer(792).unwrap();
        let factors: Vec<_> = factorize_candidates(792).collect();
        assert_eq!(magnitude.terms().len(), factors.len());
        for (term, (prime, count)) in magnitude.terms().iter().zip(factors) {
            assert_eq!(term.base, MagBase::prime(prime).unwrap());
            assert_eq!(term.exponent, Ratio::integer(i64::from(count)));
        }
        assert!(is_prime(18_446_744_073_709_551_557));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_round_trip() {
        let velocity = Dimension::from_exponents(vec![
            (BaseDimension::new("L"), Ratio::ONE),
            (BaseDimension::new("T"), Ratio::MINUS_ONE),
        ])
        .unwrap()
        .named("velocity");
        let json = serde_json::to_string(&velocity).unwrap();
        let back: Dimension = serde_json::from_str(&json).unwrap();
        assert_eq!(back, velocity);

        let magnitude = Magnitude::pi()
            .multiply(&Magnitude::from_ratio(1, 180).unwrap())
            .unwrap();
        let json = serde_json::to_string(&magnitude).unwrap();
        let back: Magnitude = serde_json::from_str(&json).unwrap();
        assert_eq!(back, magnitude);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_rejects_non_canonical_payloads() {
        assert!(serde_json::from_str::<Ratio>(r#"{"num":1,"den":0}"#).is_err());
        let half: Ratio = serde_json::from_str(r#"{"num":-2,"den":-4}"#).unwrap();
        assert_eq!(half, Ratio::HALF);

        // Composite bases are refused, whatever the exponent.
        let composite = r#"{"terms":[{"base":{"Prime":4},"exponent":{"num":0,"den":1}}]}"#;
        assert!(serde_json::from_str::<Magnitude>(composite).is_err());

        // Zero exponents vanish and repeated bases merge.
        let zero = r#"{"terms":[{"base":{"Prime":3},"exponent":{"num":0,"den":1}}]}"#;
        let one: Magnitude = serde_json::from_str(zero).unwrap();
        assert!(one.is_one());
        let split = r#"{"terms":[
            {"base":{"Prime":5},"exponent":{"num":1,"den":1}},
            {"base":{"Prime":2},"exponent":{"num":1,"den":1}},
            {"base":{"Prime":5},"exponent":{"num":1,"den":1}}
        ]}"#;
        let fifty: Magnitude = serde_json::from_str(split).unwrap();
        assert_eq!(fifty, Magnitude::from_integer(50).unwrap());

        let unsorted = r#"{"name":"velocity","exponents":[
            [{"symbol":"T"},{"num":-1,"den":1}],
            [{"symbol":"L"},{"num":1,"den":1}],
            [{"symbol":"M"},{"num":0,"den":1}]
        ]}"#;
        let velocity: Dimension = serde_json::from_str(unsorted).unwrap();
        let expected = Dimension::from_exponents(vec![
            (BaseDimension::new("L"), Ratio::ONE),
            (BaseDimension::new("T"), Ratio::MINUS_ONE),
        ])
        .unwrap()
        .named("velocity");
        assert_eq!(velocity, expected);
    }
}
