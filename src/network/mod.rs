pub mod assignment;
pub mod cpt;
pub mod model;
pub mod topology;
pub mod variables;

/// Tolerance for row sums and zero checks.
pub const PROBABILITY_TOLERANCE: f64 = 1e-9;

pub use assignment::Assignment;
pub use cpt::ConditionalTable;
pub use model::{NetworkConfig, NetworkModel};
pub use topology::Topology;
pub use variables::{DValue, GValue, LValue, Outcome, RValue, SValue, State, Variable};
