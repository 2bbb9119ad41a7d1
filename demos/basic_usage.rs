// ============================================================================
// Basic Usage Example
// ============================================================================

use rust_decimal::Decimal;
use unit_algebra::prelude::*;

fn main() {
    #[cfg(feature = "logging")]
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("=== Unit Algebra Example ===\n");

    // Base dimensions and units
    let length = Dimension::base(BaseDimension::new("L"));
    let time = Dimension::base(BaseDimension::new("T"));
    let metre = Unit::base("m", length);
    let second = Unit::base("s", time);

    // Scaled units carry exact magnitudes
    let kilo = Magnitude::integer_power(10, Ratio::integer(3)).unwrap();
    let km = Unit::scaled("km", kilo, &metre).unwrap();
    let hour = Unit::scaled("h", Magnitude::from_integer(3600).unwrap(), &second).unwrap();

    println!("{} = {} {}", km, km.magnitude(), metre);
    println!("{} = {} {}\n", hour, hour.magnitude(), second);

    // Derived units
    let km_per_hour = &km / &hour;
    let m_per_s = &metre / &second;
    let conversion = Conversion::new(&km_per_hour, &m_per_s).unwrap();
    println!(
        "{} -> {}: factor {} ({:?})",
        km_per_hour,
        m_per_s,
        conversion.factor().magnitude(),
        conversion.factor().exactness()
    );

    println!("  36.0 {} = {:?} {}", km_per_hour, conversion.convert(36.0f64), m_per_s);
    println!(
        "  36.0 {} = {:?} {}",
        km_per_hour,
        conversion.convert(Decimal::from(36)),
        m_per_s
    );
    println!("  36 {} (implicit) = {:?}", km_per_hour, conversion.convert(36i32));
    println!(
        "  36 {} (cast) = {:?} {}\n",
        km_per_hour,
        conversion.cast(36i32),
        m_per_s
    );

    // Irrational factors are approximate
    let radian = Unit::base("rad", Dimension::one());
    let degree = Unit::scaled(
        "deg",
        Magnitude::pi()
            .divide(&Magnitude::from_integer(180).unwrap())
            .unwrap(),
        &radian,
    )
    .unwrap();
    println!("90 {} = {:?} {}", degree, convert(90.0f64, &degree, &radian), radian);

    // Kinds: velocity is convertible to, but not equal to, length/time
    let velocity = m_per_s.dimension().clone().named("velocity");
    println!(
        "\n{} convertible to {}: {}",
        m_per_s.dimension(),
        velocity,
        m_per_s.dimension().convertible(&velocity)
    );
    println!(
        "{} equal to {}: {}",
        m_per_s.dimension(),
        velocity,
        m_per_s.dimension().equals(&velocity)
    );

    // Mismatched dimensions are rejected before any value is converted
    match Conversion::new(&metre, &second) {
        Ok(_) => println!("unexpected conversion"),
        Err(err) => println!("\n{}", err),
    }

    // Primality backing magnitude canonicalization
    let n = 18_446_744_073_709_551_557u64;
    println!("\nis_prime({}) = {}", n, is_prime(n));
    let factors: Vec<_> = factorize_candidates(3600).collect();
    println!("3600 = {:?}", factors);
}
