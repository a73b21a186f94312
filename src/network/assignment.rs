use std::fmt;

use crate::common::errors::InferenceError;
use crate::network::variables::{State, Variable};

/// A partial assignment of values to variables.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Assignment {
    slots: [Option<usize>; Variable::COUNT],
}

impl Assignment {
    pub fn empty() -> Assignment {
        Assignment::default()
    }

    pub fn from_states(states: &[State]) -> Result<Assignment, InferenceError> {
        let mut assignment = Assignment::empty();
        for state in states {
            assignment.fix(*state)?;
        }
        Ok(assignment)
    }

    pub fn get(&self, variable: Variable) -> Option<usize> {
        self.slots[variable.index()]
    }

    pub fn is_fixed(&self, variable: Variable) -> bool {
        self.slots[variable.index()].is_some()
    }

    /// Fixes a variable. Fixing it again to the same value is a no-op, to a
    /// different value is an error.
    pub fn fix(&mut self, state: State) -> Result<(), InferenceError> {
        let slot = &mut self.slots[state.variable().index()];
        match *slot {
            Some(existing) if existing != state.index() => Err(InferenceError::InvalidQuery(format!(
                "{} is fixed to both {} and {}",
                state.variable(),
                state.variable().value_label(existing),
                state.variable().value_label(state.index()),
            ))),
            _ => {
                *slot = Some(state.index());
                Ok(())
            }
        }
    }

    pub fn with(mut self, state: State) -> Result<Assignment, InferenceError> {
        self.fix(state)?;
        Ok(self)
    }

    pub fn states(&self) -> Vec<State> {
        Variable::ALL
            .iter()
            .filter_map(|variable| {
                self.get(*variable)
                    .map(|index| State::from_valid(*variable, index))
            })
            .collect()
    }

    pub fn fixed_variables(&self) -> Vec<Variable> {
        Variable::ALL
            .iter()
            .copied()
            .filter(|variable| self.is_fixed(*variable))
            .collect()
    }

    /// Enumerates every full assignment agreeing with this one. Variables
    /// outside `scope` are neither enumerated nor meaningful in the output
    /// (they stay at index 0).
    pub fn completions(&self, scope: &[bool; Variable::COUNT]) -> Completions {
        let mut current = [0; Variable::COUNT];
        for variable in Variable::ALL {
            if let Some(index) = self.get(variable) {
                current[variable.index()] = index;
            }
        }
        Completions {
            fixed: *self,
            scope: *scope,
            current,
            exhausted: false,
        }
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let states: Vec<String> = self.states().iter().map(|s| s.to_string()).collect();
        write!(f, "{}", states.join(", "))
    }
}

/// Odometer over the free in-scope variables of an assignment, last
/// variable varying fastest.
pub struct Completions {
    fixed: Assignment,
    scope: [bool; Variable::COUNT],
    current: [usize; Variable::COUNT],
    exhausted: bool,
}

impl Iterator for Completions {
    type Item = [usize; Variable::COUNT];

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        let item = self.current;
        self.exhausted = true;
        for variable in Variable::ALL.iter().rev() {
            let i = variable.index();
            if !self.scope[i] || self.fixed.is_fixed(*variable) {
                continue;
            }
            self.current[i] += 1;
            if self.current[i] < variable.domain_size() {
                self.exhausted = false;
                break;
            }
            self.current[i] = 0;
        }
        Some(item)
    }
}
