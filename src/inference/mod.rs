pub mod distribution;
pub mod evaluator;
pub mod query;
pub mod shortcuts;

pub use distribution::Distribution;
pub use evaluator::{EvaluatorOptions, Evaluation, QueryEvaluator, Strategy, SummationScope};
pub use query::{Answer, Query};
