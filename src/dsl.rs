use std::fmt;

use crate::terms::InputTerm;

/// A free-form rule premise built with [`is`], [`Expr::and`] and [`Expr::or`].
///
/// Any tree can be built here; [`Rule::new`](crate::rules::Rule::new) decides
/// whether it fits the supported grammar.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Is(InputTerm),
    And(Vec<Expr>),
    Or(Vec<Expr>),
}

/// `variable IS term`
pub fn is(term: impl Into<InputTerm>) -> Expr {
    Expr::Is(term.into())
}

impl Expr {
    pub fn and(self, rhs: Expr) -> Self {
        Expr::And(vec![self, rhs])
    }

    pub fn or(self, rhs: Expr) -> Self {
        Expr::Or(vec![self, rhs])
    }

    /// Every atomic condition, left to right
    pub fn propositions(&self) -> Vec<InputTerm> {
        let mut props = Vec::new();

        fn parse(expr: &Expr, out: &mut Vec<InputTerm>) {
            match expr {
                Expr::Is(term) => out.push(*term),
                Expr::And(exprs) | Expr::Or(exprs) => {
                    for expr in exprs {
                        parse(expr, out);
                    }
                },
            }
        }

        parse(self, &mut props);

        props
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (exprs, connective) = match self {
            Expr::Is(term) => return write!(f, "{term}"),
            Expr::And(exprs) => (exprs, " AND "),
            Expr::Or(exprs) => (exprs, " OR "),
        };

        for (i, expr) in exprs.iter().enumerate() {
            if i > 0 {
                f.write_str(connective)?;
            }

            match expr {
                Expr::Is(_) => write!(f, "{expr}")?,
                _ => write!(f, "({expr})")?,
            }
        }

        Ok(())
    }
}

#[test]
fn test_propositions_and_display() {
    use crate::terms::{AirTemperature, SoilMoisture};

    let expr = is(AirTemperature::Hot)
        .and(is(SoilMoisture::Dry))
        .or(is(SoilMoisture::Medium));

    assert_eq!(
        expr.propositions(),
        vec![
            InputTerm::AirTemperature(AirTemperature::Hot),
            InputTerm::SoilMoisture(SoilMoisture::Dry),
            InputTerm::SoilMoisture(SoilMoisture::Medium),
        ]
    );
    assert_eq!(
        expr.to_string(),
        "(air_temperature IS hot AND soil_moisture IS dry) OR soil_moisture IS medium"
    );
}
