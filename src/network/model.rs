use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::common::errors::InferenceError;
use crate::inference::distribution::Distribution;
use crate::network::assignment::Assignment;
use crate::network::cpt::ConditionalTable;
use crate::network::topology::Topology;
use crate::network::variables::Variable;

/// The five tables as plain nested vectors, every one laid out
/// `[parent values..][own value]`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// P(S), indexed `[s]`.
    pub p_s: Vec<f64>,
    /// P(D), indexed `[d]`.
    pub p_d: Vec<f64>,
    /// P(R|S), indexed `[s][r]`.
    pub p_r_given_s: Vec<Vec<f64>>,
    /// P(G|S,D), indexed `[s][d][g]`.
    pub p_g_given_sd: Vec<Vec<Vec<f64>>>,
    /// P(L|G), indexed `[g][l]`.
    pub p_l_given_g: Vec<Vec<f64>>,
}

impl Default for NetworkConfig {
    /// The coursework tables.
    fn default() -> Self {
        NetworkConfig {
            p_s: vec![0.2, 0.8],
            p_d: vec![0.9, 0.1],
            p_r_given_s: vec![vec![0.9, 0.1], vec![0.2, 0.8]],
            p_g_given_sd: vec![
                vec![vec![0.5, 0.3, 0.2], vec![0.9, 0.08, 0.02]],
                vec![vec![0.1, 0.2, 0.7], vec![0.3, 0.4, 0.3]],
            ],
            p_l_given_g: vec![vec![0.9, 0.1], vec![0.6, 0.4], vec![0.01, 0.99]],
        }
    }
}

/// Holds the validated CPTs. Read-only once built.
#[derive(Clone, Debug, PartialEq)]
pub struct NetworkModel {
    tables: Vec<ConditionalTable>,
    topology: Topology,
}

impl NetworkModel {
    pub fn new(config: &NetworkConfig) -> Result<NetworkModel, InferenceError> {
        check_parent_nesting(&config.p_g_given_sd)?;
        let tables = vec![
            ConditionalTable::from_rows(Variable::S, vec![config.p_s.clone()])?,
            ConditionalTable::from_rows(Variable::D, vec![config.p_d.clone()])?,
            ConditionalTable::from_rows(Variable::R, config.p_r_given_s.clone())?,
            ConditionalTable::from_rows(
                Variable::G,
                config.p_g_given_sd.iter().flatten().cloned().collect(),
            )?,
            ConditionalTable::from_rows(Variable::L, config.p_l_given_g.clone())?,
        ];
        Ok(NetworkModel {
            tables,
            topology: Topology::network(),
        })
    }

    pub fn new_shared(config: &NetworkConfig) -> Result<Arc<NetworkModel>, InferenceError> {
        Ok(Arc::new(NetworkModel::new(config)?))
    }

    pub fn domain_size(&self, variable: Variable) -> usize {
        variable.domain_size()
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn table(&self, variable: Variable) -> &ConditionalTable {
        &self.tables[variable.index()]
    }

    /// P(variable | parents) for the parent values found in `parents`.
    /// Values of non-parent variables are ignored.
    pub fn cpt_lookup(
        &self,
        variable: Variable,
        parents: &Assignment,
    ) -> Result<Distribution, InferenceError> {
        let parent_values = variable
            .parents()
            .iter()
            .map(|parent| {
                parents.get(*parent).ok_or(InferenceError::MissingParent {
                    variable,
                    parent: *parent,
                })
            })
            .collect::<Result<Vec<usize>, InferenceError>>()?;
        let row = self.table(variable).row(&parent_values)?;
        Ok(Distribution::single(variable, Array1::from(row.to_vec())))
    }

    /// Product of the factors of the in-scope variables on a full
    /// assignment, leaving out the factor of `truncated`.
    pub(crate) fn joint_term(
        &self,
        full: &[usize; Variable::COUNT],
        scope: &[bool; Variable::COUNT],
        truncated: Option<Variable>,
    ) -> f64 {
        self.tables
            .iter()
            .filter(|table| scope[table.variable().index()] && Some(table.variable()) != truncated)
            .map(|table| table.factor(full))
            .product()
    }
}

/// P(G|S,D) must be nested `[s][d]`; flattening alone only checks the row count.
fn check_parent_nesting(p_g_given_sd: &[Vec<Vec<f64>>]) -> Result<(), InferenceError> {
    let expected = (Variable::S.domain_size(), Variable::D.domain_size());
    let mismatch = |got| InferenceError::ShapeMismatch {
        variable: Variable::G,
        expected,
        got,
    };
    if p_g_given_sd.len() != expected.0 {
        let inner = p_g_given_sd.first().map_or(0, |rows| rows.len());
        return Err(mismatch((p_g_given_sd.len(), inner)));
    }
    match p_g_given_sd.iter().find(|rows| rows.len() != expected.1) {
        Some(rows) => Err(mismatch((expected.0, rows.len()))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::variables::{DValue, GValue, Outcome, SValue};

    #[test]
    fn test_default_config_builds() {
        let network = NetworkModel::new(&NetworkConfig::default()).unwrap();
        assert_eq!(network.domain_size(Variable::G), 3);
        assert_eq!(network.table(Variable::L).table().dim(), (3, 2));
    }

    #[test]
    fn test_cpt_lookup() {
        let network = NetworkModel::new(&NetworkConfig::default()).unwrap();
        let parents = Assignment::empty()
            .with(SValue::S1.state())
            .unwrap()
            .with(DValue::D0.state())
            .unwrap();
        let p_g = network.cpt_lookup(Variable::G, &parents).unwrap();
        assert_eq!(p_g.to_vec(), vec![0.1, 0.2, 0.7]);

        let p_l = network
            .cpt_lookup(Variable::L, &Assignment::empty().with(GValue::G2.state()).unwrap())
            .unwrap();
        assert_eq!(p_l.to_vec(), vec![0.01, 0.99]);
    }

    #[test]
    fn test_cpt_lookup_requires_parents() {
        let network = NetworkModel::new(&NetworkConfig::default()).unwrap();
        let only_s = Assignment::empty().with(SValue::S0.state()).unwrap();
        assert_eq!(
            network.cpt_lookup(Variable::G, &only_s).unwrap_err(),
            InferenceError::MissingParent {
                variable: Variable::G,
                parent: Variable::D
            }
        );
        assert_eq!(
            network.cpt_lookup(Variable::S, &Assignment::empty()).unwrap().to_vec(),
            vec![0.2, 0.8]
        );
    }

    #[test]
    fn test_malformed_config_rejected() {
        let mut config = NetworkConfig::default();
        config.p_l_given_g[1] = vec![0.6, 0.6];
        assert!(matches!(
            NetworkModel::new(&config),
            Err(InferenceError::MalformedTable { variable: Variable::L, .. })
        ));
    }

    #[test]
    fn test_misnested_parent_table_rejected() {
        let rows = NetworkConfig::default()
            .p_g_given_sd
            .into_iter()
            .flatten()
            .collect::<Vec<_>>();
        let mut config = NetworkConfig::default();
        config.p_g_given_sd = vec![rows.clone()];
        assert_eq!(
            NetworkModel::new(&config).unwrap_err(),
            InferenceError::ShapeMismatch {
                variable: Variable::G,
                expected: (2, 2),
                got: (1, 4),
            }
        );

        config.p_g_given_sd = vec![rows[..1].to_vec(), rows[1..].to_vec()];
        assert_eq!(
            NetworkModel::new(&config).unwrap_err(),
            InferenceError::ShapeMismatch {
                variable: Variable::G,
                expected: (2, 2),
                got: (2, 1),
            }
        );
    }
}
