use std::fmt;

use crate::dsl::{is, Expr};
use crate::error::{FuzzyError, Result};
use crate::ops::{AndOp, OrOp};
use crate::terms::{AirTemperature, InputTerm, Membership, NeededWater, SoilMoisture, Term};

/// The premise shapes a rule may take: one condition, or two joined by a
/// single connective.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Antecedent {
    Is(InputTerm),
    And(InputTerm, InputTerm),
    Or(InputTerm, InputTerm),
}

impl Antecedent {
    fn compile(premise: &Expr) -> std::result::Result<Self, &'static str> {
        fn connectives(expr: &Expr) -> (bool, bool) {
            match expr {
                Expr::Is(_) => (false, false),
                Expr::And(exprs) | Expr::Or(exprs) => {
                    let own = (matches!(expr, Expr::And(_)), matches!(expr, Expr::Or(_)));

                    exprs
                        .iter()
                        .map(connectives)
                        .fold(own, |(and, or), (and2, or2)| (and || and2, or || or2))
                },
            }
        }

        let (has_and, has_or) = connectives(premise);

        if has_and && has_or {
            return Err("AND and OR cannot be mixed");
        }

        match *premise.propositions().as_slice() {
            [] => Err("a premise needs at least one condition"),
            [term] => Ok(Self::Is(term)),
            [lhs, rhs] if has_or => Ok(Self::Or(lhs, rhs)),
            // only an AND node can hold two conditions here
            [lhs, rhs] => Ok(Self::And(lhs, rhs)),
            _ => Err("a premise has at most two conditions"),
        }
    }

    pub fn evaluate(
        &self,
        air_temperature: &Membership<AirTemperature>,
        soil_moisture: &Membership<SoilMoisture>,
        and_op: AndOp,
        or_op: OrOp,
    ) -> Result<f64> {
        let degree = |term: InputTerm| {
            term.degree(air_temperature, soil_moisture)
                .ok_or(FuzzyError::UnsetMembership {
                    variable: term.variable(),
                    term: term.name(),
                })
        };

        Ok(match *self {
            Self::Is(term) => degree(term)?,
            Self::And(lhs, rhs) => and_op.call(degree(lhs)?, degree(rhs)?),
            Self::Or(lhs, rhs) => or_op.call(degree(lhs)?, degree(rhs)?),
        })
    }
}

impl fmt::Display for Antecedent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Is(term) => write!(f, "{term}"),
            Self::And(lhs, rhs) => write!(f, "{lhs} AND {rhs}"),
            Self::Or(lhs, rhs) => write!(f, "{lhs} OR {rhs}"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Rule {
    pub(crate) antecedent: Antecedent,
    pub(crate) consequence: NeededWater,
}

impl Rule {
    /// Fails with [`FuzzyError::MalformedRule`] when the premise has more
    /// than two conditions or mixes AND with OR.
    pub fn new(premise: Expr, consequence: NeededWater) -> Result<Self> {
        let antecedent = Antecedent::compile(&premise).map_err(|reason| FuzzyError::MalformedRule {
            rule: format!(
                "IF {premise} THEN {} IS {}",
                NeededWater::VARIABLE,
                consequence.name()
            ),
            reason,
        })?;

        Ok(Rule {
            antecedent,
            consequence,
        })
    }

    pub fn antecedent(&self) -> &Antecedent {
        &self.antecedent
    }

    pub fn consequence(&self) -> NeededWater {
        self.consequence
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "IF {} THEN {} IS {}",
            self.antecedent,
            NeededWater::VARIABLE,
            self.consequence.name()
        )
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Rules(pub(crate) Vec<Rule>);

impl Rules {
    pub fn new() -> Self {
        Rules(Vec::new())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Rules(Vec::with_capacity(capacity))
    }

    /// The three irrigation rules
    pub fn irrigation() -> Result<Self> {
        let mut rules = Rules::with_capacity(3);

        rules.add(
            is(AirTemperature::Cold).or(is(SoilMoisture::Wet)),
            NeededWater::Little,
        )?;
        rules.add(
            is(AirTemperature::Hot).or(is(SoilMoisture::Dry)),
            NeededWater::Much,
        )?;
        rules.add(
            is(AirTemperature::Warm).and(is(SoilMoisture::Medium)),
            NeededWater::Medium,
        )?;

        Ok(rules)
    }

    pub fn add(&mut self, premise: Expr, consequence: NeededWater) -> Result<()> {
        self.0.push(Rule::new(premise, consequence)?);

        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[test]
fn test_irrigation_rules_text() {
    let rules = Rules::irrigation().unwrap();
    let text: Vec<String> = rules.iter().map(ToString::to_string).collect();

    assert_eq!(
        text,
        vec![
            "IF air_temperature IS cold OR soil_moisture IS wet THEN needed_water IS little",
            "IF air_temperature IS hot OR soil_moisture IS dry THEN needed_water IS much",
            "IF air_temperature IS warm AND soil_moisture IS medium THEN needed_water IS medium",
        ]
    );
}

#[test]
fn test_malformed_rules() {
    let three = Rule::new(
        is(AirTemperature::Hot)
            .and(is(SoilMoisture::Dry))
            .and(is(AirTemperature::Warm)),
        NeededWater::Much,
    );

    assert_eq!(
        three,
        Err(FuzzyError::MalformedRule {
            rule: "IF (air_temperature IS hot AND soil_moisture IS dry) AND air_temperature IS warm \
                   THEN needed_water IS much"
                .into(),
            reason: "a premise has at most two conditions",
        })
    );

    let mixed = Rule::new(
        is(AirTemperature::Hot).and(is(SoilMoisture::Dry)).or(is(SoilMoisture::Wet)),
        NeededWater::Much,
    );

    assert!(matches!(
        mixed,
        Err(FuzzyError::MalformedRule {
            reason: "AND and OR cannot be mixed",
            ..
        })
    ));
    assert!(Rule::new(Expr::Or(Vec::new()), NeededWater::Little).is_err());
}

#[test]
fn test_single_condition_passes_through() {
    let rule = Rule::new(is(SoilMoisture::Medium), NeededWater::Medium).unwrap();
    let air = Membership::from_degrees([0., 0., 0.]);
    let soil = Membership::from_degrees([0.2, 0.6, 0.]);

    assert_eq!(rule.antecedent(), &Antecedent::Is(SoilMoisture::Medium.into()));
    assert_eq!(rule.antecedent().evaluate(&air, &soil, AndOp::Min, OrOp::Max), Ok(0.6));
}

#[test]
fn test_and_or_use_their_operators() {
    let air = Membership::from_degrees([0.25, 0.75, 0.]);
    let soil = Membership::from_degrees([0., 0.5, 0.5]);
    let and = Antecedent::And(AirTemperature::Warm.into(), SoilMoisture::Medium.into());
    let or = Antecedent::Or(AirTemperature::Cold.into(), SoilMoisture::Wet.into());

    assert_eq!(and.evaluate(&air, &soil, AndOp::Min, OrOp::Max), Ok(0.5));
    assert_eq!(and.evaluate(&air, &soil, AndOp::Prod, OrOp::Max), Ok(0.375));
    assert_eq!(or.evaluate(&air, &soil, AndOp::Min, OrOp::Max), Ok(0.5));
    assert_eq!(or.evaluate(&air, &soil, AndOp::Min, OrOp::ProbOr), Ok(0.625));
}

#[test]
fn test_unset_input_degree_is_reported() {
    let air = Membership::new();
    let soil = Membership::from_degrees([0., 1., 0.]);
    let and = Antecedent::And(AirTemperature::Warm.into(), SoilMoisture::Medium.into());

    assert_eq!(
        and.evaluate(&air, &soil, AndOp::Min, OrOp::Max),
        Err(FuzzyError::UnsetMembership {
            variable: "air_temperature",
            term: "warm",
        })
    );
}
