//! Fuzzy-logic irrigation advice.
//!
//! Air temperature and soil moisture readings are fuzzified against three
//! linguistic terms each, run through three fixed rules, and the inferred
//! `needed_water` terms are defuzzified into one amount on a 0 to 100 scale.
//!
//! ```
//! use fuzzy_irrigation::{Inputs, MamdaniInference};
//!
//! let model = MamdaniInference::irrigation()?;
//! let outputs = model.eval(&Inputs::new(0., 100.)?)?;
//!
//! assert_eq!(outputs.crisp(), 18.75);
//! # Ok::<(), fuzzy_irrigation::FuzzyError>(())
//! ```

mod defuzz;
mod dsl;
mod error;
mod inference;
mod inputs;
mod linspace;
mod math;
mod ops;
mod outputs;
mod rules;
mod terms;
mod variable;

pub use dsl::{is, Expr};
pub use error::{FuzzyError, Result};
pub use inference::{defuzzify_needed_water, infer_needed_water, MamdaniInference};
pub use inputs::Inputs;
pub use ops::{AndOp, DefuzzificationOp, OrOp, ProductionLink};
pub use outputs::Outputs;
pub use rules::{Antecedent, Rule, Rules};
pub use terms::{AirTemperature, InputTerm, Membership, NeededWater, SoilMoisture, Term};
pub use variable::{fuzzify, fuzzify_air_temperature, fuzzify_soil_moisture, validate};
