use crate::error::Result;
use crate::terms::{AirTemperature, SoilMoisture};
use crate::variable::validate;

/// A pair of crisp readings that passed the boundary range checks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Inputs {
    air_temperature: f64,
    soil_moisture: f64,
}

impl Inputs {
    pub fn new(air_temperature: f64, soil_moisture: f64) -> Result<Self> {
        Ok(Inputs {
            air_temperature: validate::<AirTemperature>(air_temperature)?,
            soil_moisture: validate::<SoilMoisture>(soil_moisture)?,
        })
    }

    pub fn air_temperature(&self) -> f64 {
        self.air_temperature
    }

    pub fn soil_moisture(&self) -> f64 {
        self.soil_moisture
    }
}

#[test]
fn test_soil_moisture_range() {
    use crate::error::FuzzyError;

    assert!(Inputs::new(-30., 0.).is_ok());
    assert!(Inputs::new(45., 100.).is_ok());
    assert!(matches!(
        Inputs::new(20., -1.),
        Err(FuzzyError::InvalidInputRange { value, .. }) if value == -1.
    ));
    assert!(matches!(
        Inputs::new(20., 101.),
        Err(FuzzyError::InvalidInputRange { value, .. }) if value == 101.
    ));
}

#[test]
fn test_non_finite_air_temperature() {
    use crate::error::FuzzyError;

    assert!(matches!(
        Inputs::new(f64::NAN, 50.),
        Err(FuzzyError::InvalidInputRange {
            variable: "air_temperature",
            ..
        })
    ));
    assert!(Inputs::new(f64::INFINITY, 50.).is_err());
}
