use fuzzy_irrigation::{
    defuzzify_needed_water, fuzzify_air_temperature, fuzzify_soil_moisture, infer_needed_water, is,
    AirTemperature, DefuzzificationOp, FuzzyError, Inputs, MamdaniInference, Membership, NeededWater,
    Rules, SoilMoisture,
};

#[test]
fn test_pipeline_step_by_step() {
    let air = fuzzify_air_temperature(15.);
    let soil = fuzzify_soil_moisture(50.);

    assert_eq!(air.to_string(), "[0, 1, 0]");
    assert_eq!(soil.to_string(), "[0, 1, 0]");

    let needed_water = infer_needed_water(&air, &soil).unwrap();

    assert_eq!(needed_water.to_string(), "[0, 1, 0]");
    assert_eq!(defuzzify_needed_water(&needed_water), Ok(50.));
}

#[test]
fn test_partial_activation() {
    // 7.5 degrees is half cold and half warm; 37.5% is half dry and half medium
    let model = MamdaniInference::irrigation().unwrap();
    let outputs = model.eval(&Inputs::new(7.5, 37.5).unwrap()).unwrap();

    assert_eq!(outputs.needed_water().to_array(), [Some(0.5), Some(0.5), Some(0.5)]);

    // little (0 + 0 + 37.5 + 50) / 4, medium 50, much (50 + 62.5 + 100 + 100) / 4
    let expected = (21.875 + 50. + 78.125) / 1.5;

    assert!((outputs.crisp() - expected).abs() < 1e-12);
    assert!((outputs.crisp() - 100.).abs() < 1e-12);
}

#[test]
fn test_out_of_range_soil_moisture_never_reaches_the_model() {
    for soil_moisture in [-1., 101.] {
        assert!(matches!(
            Inputs::new(20., soil_moisture),
            Err(FuzzyError::InvalidInputRange {
                variable: "soil_moisture",
                ..
            })
        ));
    }
}

#[test]
fn test_rule_without_consequence_term_leaves_it_unset() {
    let mut rules = Rules::new();

    rules.add(is(AirTemperature::Hot).or(is(SoilMoisture::Dry)), NeededWater::Much).unwrap();

    let model = MamdaniInference::new(
        Default::default(),
        Default::default(),
        Default::default(),
        DefuzzificationOp::VertexMean,
        rules,
    );
    let outputs = model.eval(&Inputs::new(30., 10.).unwrap()).unwrap();

    assert_eq!(outputs.needed_water().to_array(), [None, None, Some(1.)]);
    assert_eq!(outputs.crisp(), 81.25);
}

#[test]
fn test_zero_degree_term_still_counts_as_set() {
    let needed_water = Membership::<NeededWater>::from_degrees([0., 0.25, 0.]);

    // medium at 0.25: (25 + 31.25 + 68.75 + 75) / 4 = 50, over a total of 0.25
    assert_eq!(defuzzify_needed_water(&needed_water), Ok(200.));
    assert_eq!(DefuzzificationOp::WeightedVertexMean.call(&needed_water), Ok(50.));
    assert!(needed_water.is_set(NeededWater::Little));
}
