use crate::terms::{AirTemperature, Membership, NeededWater, SoilMoisture};

/// Everything one pipeline run produced, intermediate vectors included.
#[derive(Clone, Debug, PartialEq)]
pub struct Outputs {
    air_temperature: Membership<AirTemperature>,
    soil_moisture: Membership<SoilMoisture>,
    needed_water: Membership<NeededWater>,
    crisp: f64,
}

impl Outputs {
    pub(crate) fn new(
        air_temperature: Membership<AirTemperature>,
        soil_moisture: Membership<SoilMoisture>,
        needed_water: Membership<NeededWater>,
        crisp: f64,
    ) -> Self {
        Self {
            air_temperature,
            soil_moisture,
            needed_water,
            crisp,
        }
    }

    pub fn air_temperature(&self) -> &Membership<AirTemperature> {
        &self.air_temperature
    }

    pub fn soil_moisture(&self) -> &Membership<SoilMoisture> {
        &self.soil_moisture
    }

    pub fn needed_water(&self) -> &Membership<NeededWater> {
        &self.needed_water
    }

    /// Defuzzificated amount of water on the [0, 100] scale
    pub fn crisp(&self) -> f64 {
        self.crisp
    }
}
