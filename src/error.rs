use thiserror::Error;

/// Every way the irrigation pipeline can fail.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum FuzzyError {
    #[error("invalid {variable} value {value}: expected a value within {min}..={max}")]
    InvalidInputRange {
        variable: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("malformed rule `{rule}`: {reason}")]
    MalformedRule { rule: String, reason: &'static str },

    #[error("{variable} IS {term} has no membership degree")]
    UnsetMembership {
        variable: &'static str,
        term: &'static str,
    },

    #[error("cannot defuzzify {variable}: every term has a membership degree of zero")]
    UndefinedDefuzzification { variable: &'static str },
}

pub type Result<T> = std::result::Result<T, FuzzyError>;
