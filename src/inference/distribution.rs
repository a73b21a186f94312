use ndarray::{Array1, ArrayD, IxDyn};
use std::fmt;

use crate::network::variables::{Outcome, Variable};

/// A probability table over one or more target variables, one axis per
/// variable in query order.
#[derive(Clone, Debug, PartialEq)]
pub struct Distribution {
    variables: Vec<Variable>,
    values: ArrayD<f64>,
}

impl Distribution {
    pub fn zeros(variables: Vec<Variable>) -> Distribution {
        let shape: Vec<usize> = variables.iter().map(|v| v.domain_size()).collect();
        Distribution {
            variables,
            values: ArrayD::zeros(IxDyn(&shape)),
        }
    }

    pub fn single(variable: Variable, values: Array1<f64>) -> Distribution {
        Distribution {
            variables: vec![variable],
            values: values.into_dyn(),
        }
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn values(&self) -> &ArrayD<f64> {
        &self.values
    }

    /// Probability at one combination of target values.
    pub fn probability(&self, indices: &[usize]) -> Option<f64> {
        if indices.len() != self.variables.len() {
            return None;
        }
        self.values.get(IxDyn(indices)).copied()
    }

    /// Probability of a named value, for a single-variable distribution.
    pub fn of<O: Outcome>(&self, outcome: O) -> Option<f64> {
        if self.variables != [O::VARIABLE] {
            return None;
        }
        self.probability(&[outcome.index()])
    }

    pub(crate) fn set(&mut self, indices: &[usize], value: f64) {
        self.values[IxDyn(indices)] = value;
    }

    pub fn total(&self) -> f64 {
        self.values.sum()
    }

    pub fn scaled(&self, factor: f64) -> Distribution {
        Distribution {
            variables: self.variables.clone(),
            values: &self.values * factor,
        }
    }

    /// Largest elementwise difference, or infinity when the tables are over
    /// different variables.
    pub fn max_difference(&self, other: &Distribution) -> f64 {
        if self.variables != other.variables {
            return f64::INFINITY;
        }
        self.values
            .iter()
            .zip(other.values.iter())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max)
    }

    pub fn approx_eq(&self, other: &Distribution, tolerance: f64) -> bool {
        self.max_difference(other) <= tolerance
    }

    /// Values in row-major order over the target axes.
    pub fn to_vec(&self) -> Vec<f64> {
        self.values.iter().copied().collect()
    }

    /// Human readable labels of each entry, matching `to_vec` order.
    pub fn labels(&self) -> Vec<String> {
        self.values
            .indexed_iter()
            .map(|(index, _)| {
                self.variables
                    .iter()
                    .enumerate()
                    .map(|(axis, variable)| variable.value_label(index[axis]))
                    .collect::<Vec<_>>()
                    .join(",")
            })
            .collect()
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values: Vec<String> = self.values.iter().map(|p| format!("{:.6}", p)).collect();
        if self.variables.len() == 1 {
            return write!(f, "[{}]", values.join(", "));
        }
        let entries: Vec<String> = self
            .labels()
            .into_iter()
            .zip(values)
            .map(|(label, value)| format!("{}: {}", label, value))
            .collect();
        write!(f, "{{{}}}", entries.join(", "))
    }
}
