use thiserror::Error;

use crate::network::variables::Variable;

/// Errors raised while building the network or answering a query.
///
/// None of them is fatal: a failed query leaves the evaluator usable.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InferenceError {
    /// A CPT row does not sum to 1 within tolerance.
    #[error("malformed table for {variable}: row {row} sums to {sum}")]
    MalformedTable {
        variable: Variable,
        row: String,
        sum: f64,
    },

    /// A CPT entry is negative, NaN or infinite.
    #[error("malformed table for {variable}: row {row} holds invalid probability {value}")]
    InvalidProbability {
        variable: Variable,
        row: String,
        value: f64,
    },

    #[error("table for {variable} has shape {got:?}, expected {expected:?}")]
    ShapeMismatch {
        variable: Variable,
        expected: (usize, usize),
        got: (usize, usize),
    },

    #[error("value {value} is outside the domain of {variable} (size {domain_size})")]
    OutOfDomain {
        variable: Variable,
        value: usize,
        domain_size: usize,
    },

    #[error("no value given for {parent}, a parent of {variable}")]
    MissingParent { variable: Variable, parent: Variable },

    /// The evidence has zero marginal probability.
    #[error("undefined (division by zero): P({evidence}) = 0")]
    DegenerateConditioning { evidence: String },

    #[error("invalid query: {0}")]
    InvalidQuery(String),

    #[error("unknown scenario: {0}")]
    UnknownScenario(String),
}
