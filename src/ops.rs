use num::Float;

use crate::defuzz;
use crate::error::Result;
use crate::terms::{Membership, NeededWater};

/// And operator method for combining the two conditions of a rule premise.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum AndOp {
    #[default]
    Min,
    Prod,
    BoundedProd,
    DrasticProd,
}

impl AndOp {
    pub fn call<F: Float>(self, u: F, v: F) -> F {
        match self {
            Self::Min => F::min(u, v),
            Self::Prod => u * v,
            Self::BoundedProd => F::max(F::zero(), u + v - F::one()),
            Self::DrasticProd => {
                if v == F::one() {
                    u
                } else if u == F::one() {
                    v
                } else {
                    F::zero()
                }
            },
        }
    }
}

/// Or operator method for combining the two conditions of a rule premise.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum OrOp {
    #[default]
    Max,
    ProbOr,
    BoundedSum,
    DrasticSum,
}

impl OrOp {
    pub fn call<F: Float>(self, u: F, v: F) -> F {
        match self {
            Self::Max => F::max(u, v),
            Self::ProbOr => u + v - u * v,
            Self::BoundedSum => F::min(F::one(), u + v),
            Self::DrasticSum => {
                if v == F::zero() {
                    u
                } else if u == F::zero() {
                    v
                } else {
                    F::one()
                }
            },
        }
    }
}

/// Method for combining several rules that share a consequence term.
///
/// `Min` is the irrigation pipeline's policy; `Max` is the textbook Mamdani
/// choice.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ProductionLink {
    #[default]
    Min,
    Max,
}

impl ProductionLink {
    pub fn call<F: Float>(self, u: F, v: F) -> F {
        match self {
            Self::Min => F::min(u, v),
            Self::Max => F::max(u, v),
        }
    }
}

/// Method for defuzzificating the inferred membership vector.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum DefuzzificationOp {
    /// Sum of each term shape's vertex centroid over the sum of degrees
    #[default]
    VertexMean,
    /// Degree-weighted mean of each term shape's vertex centroid
    WeightedVertexMean,
    /// Center of gravity of the max-aggregated clipped term shapes
    Cog,
}

impl DefuzzificationOp {
    pub fn call(self, membership: &Membership<NeededWater>) -> Result<f64> {
        match self {
            Self::VertexMean => defuzz::vertex_mean(membership),
            Self::WeightedVertexMean => defuzz::weighted_vertex_mean(membership),
            Self::Cog => defuzz::center_of_gravity(membership),
        }
    }
}

#[test]
fn test_and_ops() {
    assert_eq!(AndOp::Min.call(0.25, 0.5), 0.25);
    assert_eq!(AndOp::Prod.call(0.5, 0.5), 0.25);
    assert_eq!(AndOp::BoundedProd.call(0.25, 0.5), 0.);
    assert_eq!(AndOp::BoundedProd.call(0.75, 0.5), 0.25);
    assert_eq!(AndOp::DrasticProd.call(0.3, 1.), 0.3);
    assert_eq!(AndOp::DrasticProd.call(1., 0.7), 0.7);
    assert_eq!(AndOp::DrasticProd.call(0.9, 0.9), 0.);
}

#[test]
fn test_or_ops() {
    assert_eq!(OrOp::Max.call(0.25, 0.5), 0.5);
    assert_eq!(OrOp::ProbOr.call(0.5, 0.5), 0.75);
    assert_eq!(OrOp::BoundedSum.call(0.75, 0.5), 1.);
    assert_eq!(OrOp::DrasticSum.call(0.3, 0.), 0.3);
    assert_eq!(OrOp::DrasticSum.call(0., 0.7), 0.7);
    assert_eq!(OrOp::DrasticSum.call(0.1, 0.1), 1.);
}

#[test]
fn test_production_link() {
    assert_eq!(ProductionLink::Min.call(0.2, 0.8), 0.2);
    assert_eq!(ProductionLink::Max.call(0.2, 0.8), 0.8);
}
