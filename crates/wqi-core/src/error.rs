use thiserror::Error;

use crate::measurement::Parameter;

/// Raised when a measurement fails the plausibility gate. Carries every
/// offending parameter, in input order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("please enter valid values for all parameters (rejected: {})", join_keys(.rejected))]
pub struct ValidationError {
    pub rejected: Vec<Parameter>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown quality category: {0}")]
pub struct UnknownCategory(pub String);

fn join_keys(params: &[Parameter]) -> String {
    params
        .iter()
        .map(|p| p.key())
        .collect::<Vec<_>>()
        .join(", ")
}
