pub mod errors;
pub mod interface;
#[macro_use]
pub mod logging;
pub mod report;
pub mod setup;

// Re-export key types
pub use errors::InferenceError;
pub use interface::{Question, QuestionSet};
pub use report::Report;
