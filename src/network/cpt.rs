use ndarray::{Array2, ArrayView1};

use super::PROBABILITY_TOLERANCE;
use crate::common::errors::InferenceError;
use crate::network::variables::Variable;

/// P(variable | parents) as a 2-D table.
///
/// Rows are parent configurations, encoded row-major over the parents in
/// declaration order (so for G the row is `s * 2 + d`). Columns are the
/// variable's own values. Every table uses this `[parents][own]` layout.
#[derive(Clone, Debug, PartialEq)]
pub struct ConditionalTable {
    variable: Variable,
    table: Array2<f64>,
}

impl ConditionalTable {
    /// Validates shape, entries and row sums before accepting the table.
    pub fn new(variable: Variable, table: Array2<f64>) -> Result<ConditionalTable, InferenceError> {
        let expected = (parent_configurations(variable), variable.domain_size());
        if table.dim() != expected {
            return Err(InferenceError::ShapeMismatch {
                variable,
                expected,
                got: table.dim(),
            });
        }
        for (row_index, row) in table.outer_iter().enumerate() {
            if let Some(value) = row.iter().find(|p| !p.is_finite() || **p < 0.0) {
                return Err(InferenceError::InvalidProbability {
                    variable,
                    row: row_label(variable, row_index),
                    value: *value,
                });
            }
            let sum = row.sum();
            if (sum - 1.0).abs() > PROBABILITY_TOLERANCE {
                return Err(InferenceError::MalformedTable {
                    variable,
                    row: row_label(variable, row_index),
                    sum,
                });
            }
        }
        Ok(ConditionalTable { variable, table })
    }

    pub fn from_rows(variable: Variable, rows: Vec<Vec<f64>>) -> Result<ConditionalTable, InferenceError> {
        let columns = variable.domain_size();
        let row_count = rows.len();
        if let Some(bad) = rows.iter().find(|row| row.len() != columns) {
            return Err(InferenceError::ShapeMismatch {
                variable,
                expected: (parent_configurations(variable), columns),
                got: (row_count, bad.len()),
            });
        }
        let flat: Vec<f64> = rows.into_iter().flatten().collect();
        let table = Array2::from_shape_vec((row_count, columns), flat).map_err(|_| {
            InferenceError::ShapeMismatch {
                variable,
                expected: (parent_configurations(variable), columns),
                got: (row_count, columns),
            }
        })?;
        ConditionalTable::new(variable, table)
    }

    pub fn variable(&self) -> Variable {
        self.variable
    }

    pub fn table(&self) -> &Array2<f64> {
        &self.table
    }

    /// Row index for parent values given in the parents' declaration order.
    pub fn row_index(&self, parent_values: &[usize]) -> Result<usize, InferenceError> {
        let parents = self.variable.parents();
        if parent_values.len() != parents.len() {
            return Err(InferenceError::InvalidQuery(format!(
                "{} has {} parents, got {} values",
                self.variable,
                parents.len(),
                parent_values.len()
            )));
        }
        let mut row = 0;
        for (parent, value) in parents.iter().zip(parent_values) {
            if *value >= parent.domain_size() {
                return Err(InferenceError::OutOfDomain {
                    variable: *parent,
                    value: *value,
                    domain_size: parent.domain_size(),
                });
            }
            row = row * parent.domain_size() + value;
        }
        Ok(row)
    }

    pub fn row(&self, parent_values: &[usize]) -> Result<ArrayView1<'_, f64>, InferenceError> {
        let row = self.row_index(parent_values)?;
        Ok(self.table.row(row))
    }

    /// The factor's value on a full assignment. Indices are trusted.
    pub(crate) fn factor(&self, full: &[usize; Variable::COUNT]) -> f64 {
        let mut row = 0;
        for parent in self.variable.parents() {
            row = row * parent.domain_size() + full[parent.index()];
        }
        self.table[[row, full[self.variable.index()]]]
    }
}

fn parent_configurations(variable: Variable) -> usize {
    variable.parents().iter().map(|p| p.domain_size()).product()
}

fn row_label(variable: Variable, mut row_index: usize) -> String {
    let parents = variable.parents();
    if parents.is_empty() {
        return "prior".to_string();
    }
    let mut labels = vec![String::new(); parents.len()];
    for (slot, parent) in parents.iter().enumerate().rev() {
        labels[slot] = parent.value_label(row_index % parent.domain_size());
        row_index /= parent.domain_size();
    }
    format!("({})", labels.join(", "))
}
