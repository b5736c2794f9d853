use tracing::trace;

use crate::error::{FuzzyError, Result};
use crate::math::interp;
use crate::terms::{AirTemperature, Membership, SoilMoisture, Term};

/// Evaluates every term's membership function of `K` at `value`.
///
/// Values outside the universe never fail here; they saturate the outermost
/// terms. Range checks belong to [`validate`].
pub fn fuzzify<K: Term>(value: f64) -> Membership<K> {
    let mut membership = Membership::new();

    for term in K::ALL {
        membership.set(term, interp(value, term.points()));
    }

    trace!(variable = K::VARIABLE, value, %membership, "fuzzified");

    membership
}

/// Rejects non-finite crisp values, and values outside the universe of a
/// bounded variable.
pub fn validate<K: Term>(value: f64) -> Result<f64> {
    let (min, max) = if K::BOUNDED {
        (*K::UNIVERSE.start(), *K::UNIVERSE.end())
    } else {
        (f64::MIN, f64::MAX)
    };

    if !value.is_finite() || !(min..=max).contains(&value) {
        return Err(FuzzyError::InvalidInputRange {
            variable: K::VARIABLE,
            value,
            min,
            max,
        });
    }

    Ok(value)
}

pub fn fuzzify_air_temperature(value: f64) -> Membership<AirTemperature> {
    fuzzify(value)
}

/// The caller must have checked `0 <= value <= 100`, see [`validate`].
pub fn fuzzify_soil_moisture(value: f64) -> Membership<SoilMoisture> {
    fuzzify(value)
}

#[test]
fn test_air_temperature_terms() {
    assert_eq!(fuzzify_air_temperature(15.).to_array(), [Some(0.), Some(1.), Some(0.)]);
    assert_eq!(fuzzify_air_temperature(0.).to_array(), [Some(1.), Some(0.), Some(0.)]);
    assert_eq!(fuzzify_air_temperature(30.).to_array(), [Some(0.), Some(0.), Some(1.)]);
    assert_eq!(fuzzify_air_temperature(7.5).to_array(), [Some(0.5), Some(0.5), Some(0.)]);
    assert_eq!(fuzzify_air_temperature(22.5).to_array(), [Some(0.), Some(0.5), Some(0.5)]);
}

#[test]
fn test_air_temperature_saturates() {
    assert_eq!(fuzzify_air_temperature(-40.).to_array(), [Some(1.), Some(0.), Some(0.)]);
    assert_eq!(fuzzify_air_temperature(45.).to_array(), [Some(0.), Some(0.), Some(1.)]);
}

#[test]
fn test_soil_moisture_terms() {
    assert_eq!(fuzzify_soil_moisture(50.).to_array(), [Some(0.), Some(1.), Some(0.)]);
    assert_eq!(fuzzify_soil_moisture(25.).to_array(), [Some(1.), Some(0.), Some(0.)]);
    assert_eq!(fuzzify_soil_moisture(10.).to_array(), [Some(1.), Some(0.), Some(0.)]);
    assert_eq!(fuzzify_soil_moisture(37.5).to_array(), [Some(0.5), Some(0.5), Some(0.)]);
    assert_eq!(fuzzify_soil_moisture(100.).to_array(), [Some(0.), Some(0.), Some(1.)]);
}

#[test]
fn test_degrees_stay_in_unit_interval() {
    for i in 0..=300 {
        let x = f64::from(i) / 10.;

        for (_, degree) in fuzzify_air_temperature(x).iter() {
            let degree = degree.unwrap();
            assert!((0. ..=1.).contains(&degree), "air_temperature({x}) = {degree}");
        }
    }

    for i in 0..=1000 {
        let x = f64::from(i) / 10.;

        for (_, degree) in fuzzify_soil_moisture(x).iter() {
            let degree = degree.unwrap();
            assert!((0. ..=1.).contains(&degree), "soil_moisture({x}) = {degree}");
        }
    }
}

#[test]
fn test_fuzzify_is_pure() {
    assert_eq!(fuzzify_soil_moisture(63.), fuzzify_soil_moisture(63.));
    assert_eq!(fuzzify_air_temperature(-3.), fuzzify_air_temperature(-3.));
}

#[test]
fn test_validate() {
    assert_eq!(validate::<SoilMoisture>(0.), Ok(0.));
    assert_eq!(validate::<SoilMoisture>(100.), Ok(100.));
    assert_eq!(validate::<AirTemperature>(-273.), Ok(-273.));
    assert_eq!(
        validate::<SoilMoisture>(101.),
        Err(FuzzyError::InvalidInputRange {
            variable: "soil_moisture",
            value: 101.,
            min: 0.,
            max: 100.,
        })
    );
    assert!(validate::<SoilMoisture>(-1.).is_err());
    assert!(validate::<SoilMoisture>(f64::NAN).is_err());
}

#[test]
fn test_validate_rejects_non_finite() {
    for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        assert!(matches!(
            validate::<AirTemperature>(value),
            Err(FuzzyError::InvalidInputRange {
                variable: "air_temperature",
                ..
            })
        ));
    }

    assert_eq!(validate::<AirTemperature>(1e6), Ok(1e6));
}
