use serde::{Deserialize, Serialize};
use std::fmt;

use crate::common::errors::InferenceError;

/// The five random variables of the network, declared in topological order.
///
/// S and D are roots, R depends on S, G depends on S and D, L depends on G.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Variable {
    S,
    D,
    R,
    G,
    L,
}

impl Variable {
    pub const COUNT: usize = 5;
    pub const ALL: [Variable; Variable::COUNT] =
        [Variable::S, Variable::D, Variable::R, Variable::G, Variable::L];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Number of values the variable can take. Never changes.
    pub fn domain_size(self) -> usize {
        match self {
            Variable::G => 3,
            _ => 2,
        }
    }

    /// Parents in the network graph, in declaration order.
    pub fn parents(self) -> &'static [Variable] {
        match self {
            Variable::S | Variable::D => &[],
            Variable::R => &[Variable::S],
            Variable::G => &[Variable::S, Variable::D],
            Variable::L => &[Variable::G],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Variable::S => "S",
            Variable::D => "D",
            Variable::R => "R",
            Variable::G => "G",
            Variable::L => "L",
        }
    }

    /// Lower-case label of one of the variable's values, e.g. `g2`.
    pub fn value_label(self, index: usize) -> String {
        format!("{}{}", self.name().to_lowercase(), index)
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A variable fixed to one of its values.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct State {
    variable: Variable,
    index: usize,
}

impl State {
    /// Builds a state from a raw value index, rejecting indices outside the domain.
    pub fn new(variable: Variable, index: usize) -> Result<State, InferenceError> {
        if index >= variable.domain_size() {
            return Err(InferenceError::OutOfDomain {
                variable,
                value: index,
                domain_size: variable.domain_size(),
            });
        }
        Ok(State { variable, index })
    }

    /// For indices already checked against the domain.
    pub(crate) fn from_valid(variable: Variable, index: usize) -> State {
        debug_assert!(index < variable.domain_size());
        State { variable, index }
    }

    pub fn variable(&self) -> Variable {
        self.variable
    }

    pub fn index(&self) -> usize {
        self.index
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.variable, self.variable.value_label(self.index))
    }
}

/// A named value of one particular variable.
pub trait Outcome: Copy + fmt::Debug {
    const VARIABLE: Variable;

    fn index(self) -> usize;

    fn state(self) -> State {
        State {
            variable: Self::VARIABLE,
            index: self.index(),
        }
    }
}

macro_rules! outcomes {
    ($name:ident for $variable:ident { $($value:ident = $index:expr),+ $(,)? }) => {
        #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
        pub enum $name {
            $($value),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$value),+];
        }

        impl Outcome for $name {
            const VARIABLE: Variable = Variable::$variable;

            fn index(self) -> usize {
                match self {
                    $($name::$value => $index),+
                }
            }
        }

        impl From<$name> for State {
            fn from(outcome: $name) -> State {
                outcome.state()
            }
        }
    };
}

outcomes!(SValue for S { S0 = 0, S1 = 1 });
outcomes!(DValue for D { D0 = 0, D1 = 1 });
outcomes!(RValue for R { R0 = 0, R1 = 1 });
outcomes!(GValue for G { G0 = 0, G1 = 1, G2 = 2 });
outcomes!(LValue for L { L0 = 0, L1 = 1 });
