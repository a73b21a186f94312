#[macro_use]
pub mod common;
pub mod inference;
pub mod network;
pub mod scenarios;

pub use common::InferenceError;
pub use inference::{Answer, EvaluatorOptions, Query, QueryEvaluator, SummationScope};
pub use network::{NetworkConfig, NetworkModel, Variable};
