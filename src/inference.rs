use tracing::debug;

use crate::error::Result;
use crate::inputs::Inputs;
use crate::ops::*;
use crate::outputs::Outputs;
use crate::rules::Rules;
use crate::terms::{AirTemperature, Membership, NeededWater, SoilMoisture, Term};
use crate::variable::fuzzify;

/// Fuzzification, rule inference and defuzzification for one rule base.
///
/// Holds no per-run state; [`eval`](Self::eval) can be called concurrently
/// from several threads.
#[derive(Clone, Debug)]
pub struct MamdaniInference {
    and_op: AndOp,
    or_op: OrOp,
    prod_link: ProductionLink,
    defuzz_op: DefuzzificationOp,
    rules: Rules,
}

impl MamdaniInference {
    pub fn new(
        and_op: AndOp,
        or_op: OrOp,
        prod_link: ProductionLink,
        defuzz_op: DefuzzificationOp,
        rules: Rules,
    ) -> Self {
        Self {
            and_op,
            or_op,
            prod_link,
            defuzz_op,
            rules,
        }
    }

    /// The irrigation rules with min/max connectives, MIN aggregation across
    /// rules and vertex-mean defuzzification.
    pub fn irrigation() -> Result<Self> {
        Ok(Self::new(
            AndOp::Min,
            OrOp::Max,
            ProductionLink::Min,
            DefuzzificationOp::VertexMean,
            Rules::irrigation()?,
        ))
    }

    pub fn with_defuzzification(mut self, defuzz_op: DefuzzificationOp) -> Self {
        self.defuzz_op = defuzz_op;
        self
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Evaluates every rule and aggregates rules sharing a consequence with
    /// the production link. Terms no rule concludes stay unset.
    pub fn infer(
        &self,
        air_temperature: &Membership<AirTemperature>,
        soil_moisture: &Membership<SoilMoisture>,
    ) -> Result<Membership<NeededWater>> {
        let mut needed_water = Membership::new();

        for rule in self.rules.iter() {
            let degree = rule
                .antecedent
                .evaluate(air_temperature, soil_moisture, self.and_op, self.or_op)?;
            let term = rule.consequence;

            debug!(%rule, degree, "rule evaluated");

            let aggregated = match needed_water.get(term) {
                None => degree,
                Some(current) => self.prod_link.call(current, degree),
            };

            needed_water.set(term, aggregated);
        }

        debug!(%needed_water, "inferred {}", NeededWater::VARIABLE);

        Ok(needed_water)
    }

    pub fn defuzzify(&self, needed_water: &Membership<NeededWater>) -> Result<f64> {
        let crisp = self.defuzz_op.call(needed_water)?;

        debug!(method = ?self.defuzz_op, crisp, "defuzzified {}", NeededWater::VARIABLE);

        Ok(crisp)
    }

    pub fn eval(&self, inputs: &Inputs) -> Result<Outputs> {
        let air_temperature = fuzzify::<AirTemperature>(inputs.air_temperature());
        let soil_moisture = fuzzify::<SoilMoisture>(inputs.soil_moisture());
        let needed_water = self.infer(&air_temperature, &soil_moisture)?;
        let crisp = self.defuzzify(&needed_water)?;

        Ok(Outputs::new(air_temperature, soil_moisture, needed_water, crisp))
    }
}

/// Runs the irrigation rules over already fuzzified inputs.
pub fn infer_needed_water(
    air_temperature: &Membership<AirTemperature>,
    soil_moisture: &Membership<SoilMoisture>,
) -> Result<Membership<NeededWater>> {
    MamdaniInference::irrigation()?.infer(air_temperature, soil_moisture)
}

/// Vertex-mean defuzzification of an inferred `needed_water` vector.
pub fn defuzzify_needed_water(needed_water: &Membership<NeededWater>) -> Result<f64> {
    DefuzzificationOp::VertexMean.call(needed_water)
}

#[test]
fn test_warm_and_medium() {
    let model = MamdaniInference::irrigation().unwrap();
    let outputs = model.eval(&Inputs::new(15., 50.).unwrap()).unwrap();

    assert_eq!(outputs.air_temperature().to_array(), [Some(0.), Some(1.), Some(0.)]);
    assert_eq!(outputs.soil_moisture().to_array(), [Some(0.), Some(1.), Some(0.)]);
    assert_eq!(outputs.needed_water().to_array(), [Some(0.), Some(1.), Some(0.)]);
    assert_eq!(outputs.crisp(), 50.);
}

#[test]
fn test_cold_and_wet() {
    let model = MamdaniInference::irrigation().unwrap();
    let outputs = model.eval(&Inputs::new(0., 100.).unwrap()).unwrap();

    assert_eq!(outputs.air_temperature().to_array(), [Some(1.), Some(0.), Some(0.)]);
    assert_eq!(outputs.soil_moisture().to_array(), [Some(0.), Some(0.), Some(1.)]);
    assert_eq!(outputs.needed_water().to_array(), [Some(1.), Some(0.), Some(0.)]);
    assert_eq!(outputs.crisp(), 18.75);
}

#[test]
fn test_hot_and_dry() {
    let model = MamdaniInference::irrigation().unwrap();
    let outputs = model.eval(&Inputs::new(30., 0.).unwrap()).unwrap();

    assert_eq!(outputs.needed_water().to_array(), [Some(0.), Some(0.), Some(1.)]);
    assert_eq!(outputs.crisp(), 81.25);
}

#[test]
fn test_mixed_degrees() {
    // air 20: [0, 2/3, 1/3]; soil 40: [0.4, 0.6, 0]
    // much = max(1/3, 0.4), medium = min(2/3, 0.6)
    let model = MamdaniInference::irrigation().unwrap();
    let outputs = model.eval(&Inputs::new(20., 40.).unwrap()).unwrap();
    let needed_water = outputs.needed_water().to_array();

    assert_eq!(needed_water[0], Some(0.));
    assert!((needed_water[1].unwrap() - 0.6).abs() < 1e-12);
    assert!((needed_water[2].unwrap() - 0.4).abs() < 1e-12);
    // medium (25 + 40 + 60 + 75) / 4 = 50, much (50 + 60 + 100 + 100) / 4 = 77.5
    assert!((outputs.crisp() - 127.5).abs() < 1e-9, "{}", outputs.crisp());

    let weighted = model
        .clone()
        .with_defuzzification(DefuzzificationOp::WeightedVertexMean)
        .eval(&Inputs::new(20., 40.).unwrap())
        .unwrap();

    assert!((weighted.crisp() - 61.).abs() < 1e-9, "{}", weighted.crisp());
}

#[test]
fn test_vertex_mean_can_leave_universe() {
    // 77.5% is barely wet, and nothing else fires at 15 degrees
    let model = MamdaniInference::irrigation().unwrap();
    let outputs = model.eval(&Inputs::new(15., 77.5).unwrap()).unwrap();

    assert_eq!(outputs.needed_water().to_array(), [Some(0.1), Some(0.), Some(0.)]);
    // (0 + 0 + 47.5 + 50) / 4 / 0.1
    assert!((outputs.crisp() - 243.75).abs() < 1e-9, "{}", outputs.crisp());
}

#[test]
fn test_no_rule_fires() {
    use crate::error::FuzzyError;

    // soil at 75 is neither dry, medium nor wet; 15 degrees is neither cold nor hot
    let model = MamdaniInference::irrigation().unwrap();

    assert_eq!(
        model.eval(&Inputs::new(15., 75.).unwrap()),
        Err(FuzzyError::UndefinedDefuzzification {
            variable: "needed_water",
        })
    );
}

#[test]
fn test_min_aggregation_across_rules() {
    use crate::dsl::is;

    let mut rules = Rules::new();

    rules.add(is(AirTemperature::Cold), NeededWater::Little).unwrap();
    rules.add(is(SoilMoisture::Wet), NeededWater::Little).unwrap();

    let air = Membership::from_degrees([0.8, 0.2, 0.]);
    let soil = Membership::from_degrees([0., 0.7, 0.3]);

    let model = MamdaniInference::new(
        AndOp::Min,
        OrOp::Max,
        ProductionLink::Min,
        DefuzzificationOp::VertexMean,
        rules.clone(),
    );
    let needed_water = model.infer(&air, &soil).unwrap();

    assert_eq!(needed_water.to_array(), [Some(0.3), None, None]);

    let model = MamdaniInference::new(
        AndOp::Min,
        OrOp::Max,
        ProductionLink::Max,
        DefuzzificationOp::VertexMean,
        rules,
    );

    assert_eq!(model.infer(&air, &soil).unwrap().to_array(), [Some(0.8), None, None]);
}

#[test]
fn test_aggregate_never_exceeds_any_rule() {
    let model = MamdaniInference::irrigation().unwrap();

    for temperature in (-5..=35).step_by(5) {
        for moisture in (0..=100).step_by(5) {
            let air = fuzzify::<AirTemperature>(f64::from(temperature));
            let soil = fuzzify::<SoilMoisture>(f64::from(moisture));
            let inferred = model.infer(&air, &soil).unwrap();

            for rule in model.rules().iter() {
                let degree = rule
                    .antecedent()
                    .evaluate(&air, &soil, AndOp::Min, OrOp::Max)
                    .unwrap();

                assert!(inferred.degree(rule.consequence()) <= degree);
            }
        }
    }
}

#[test]
fn test_crisp_stays_in_universe() {
    use crate::error::FuzzyError;

    for defuzz_op in [DefuzzificationOp::WeightedVertexMean, DefuzzificationOp::Cog] {
        let model = MamdaniInference::irrigation().unwrap().with_defuzzification(defuzz_op);

        for temperature in -10..=40 {
            for moisture in (0..=100).step_by(5) {
                let inputs = Inputs::new(f64::from(temperature), f64::from(moisture)).unwrap();

                match model.eval(&inputs) {
                    Ok(outputs) => assert!(
                        (0. ..=100.).contains(&outputs.crisp()),
                        "{defuzz_op:?} at ({temperature}, {moisture}) gave {}",
                        outputs.crisp()
                    ),
                    Err(err) => assert!(matches!(err, FuzzyError::UndefinedDefuzzification { .. })),
                }
            }
        }
    }
}

#[test]
fn test_free_functions_match_model() {
    use crate::variable::{fuzzify_air_temperature, fuzzify_soil_moisture};

    let air = fuzzify_air_temperature(0.);
    let soil = fuzzify_soil_moisture(100.);
    let needed_water = infer_needed_water(&air, &soil).unwrap();

    assert_eq!(needed_water.to_array(), [Some(1.), Some(0.), Some(0.)]);
    assert_eq!(defuzzify_needed_water(&needed_water), Ok(18.75));
}
