use std::collections::HashSet;
use std::fmt;

use crate::common::errors::InferenceError;
use crate::inference::distribution::Distribution;
use crate::network::assignment::Assignment;
use crate::network::variables::{State, Variable};

/// P(targets | evidence) or P(targets | evidence, do(X=x)).
///
/// Built with `marginal` or `probability_of`, then refined with `given`
/// and `intervene`. Consistency is checked by `validate` when evaluated.
#[derive(Clone, Debug, PartialEq)]
pub struct Query {
    targets: Vec<Variable>,
    evidence: Vec<State>,
    intervention: Option<State>,
    focus: Option<State>,
}

impl Query {
    pub fn marginal(targets: impl IntoIterator<Item = Variable>) -> Query {
        Query {
            targets: targets.into_iter().collect(),
            evidence: Vec::new(),
            intervention: None,
            focus: None,
        }
    }

    /// Scalar query for one value of one variable, e.g. P(G=g1 | L=l1).
    pub fn probability_of(state: impl Into<State>) -> Query {
        let state = state.into();
        Query {
            focus: Some(state),
            ..Query::marginal([state.variable()])
        }
    }

    pub fn given(mut self, state: impl Into<State>) -> Query {
        self.evidence.push(state.into());
        self
    }

    /// Replaces any earlier intervention; only one is supported.
    pub fn intervene(mut self, state: impl Into<State>) -> Query {
        self.intervention = Some(state.into());
        self
    }

    pub fn targets(&self) -> &[Variable] {
        &self.targets
    }

    pub fn evidence(&self) -> &[State] {
        &self.evidence
    }

    pub fn evidence_variables(&self) -> Vec<Variable> {
        self.evidence.iter().map(|s| s.variable()).collect()
    }

    pub fn intervention(&self) -> Option<State> {
        self.intervention
    }

    pub fn focus(&self) -> Option<State> {
        self.focus
    }

    /// Everything held fixed while summing: evidence plus the intervention.
    pub fn fixed(&self) -> Result<Assignment, InferenceError> {
        let mut fixed = Assignment::from_states(&self.evidence)?;
        if let Some(intervention) = self.intervention {
            fixed.fix(intervention)?;
        }
        Ok(fixed)
    }

    pub fn validate(&self) -> Result<(), InferenceError> {
        if self.targets.is_empty() {
            return Err(InferenceError::InvalidQuery("no target variable".to_string()));
        }
        let mut seen = HashSet::new();
        if let Some(duplicate) = self.targets.iter().find(|t| !seen.insert(**t)) {
            return Err(InferenceError::InvalidQuery(format!(
                "{} appears twice among the targets",
                duplicate
            )));
        }
        Assignment::from_states(&self.evidence)?;
        let evidence_variables = self.evidence_variables();
        if let Some(target) = self.targets.iter().find(|t| evidence_variables.contains(*t)) {
            return Err(InferenceError::InvalidQuery(format!(
                "{} is both a target and evidence",
                target
            )));
        }
        if let Some(intervention) = self.intervention {
            let variable = intervention.variable();
            if self.targets.contains(&variable) {
                return Err(InferenceError::InvalidQuery(format!(
                    "{} is both a target and intervened on",
                    variable
                )));
            }
            if evidence_variables.contains(&variable) {
                return Err(InferenceError::InvalidQuery(format!(
                    "{} is both observed and intervened on",
                    variable
                )));
            }
        }
        if let Some(focus) = self.focus {
            if self.targets != [focus.variable()] {
                return Err(InferenceError::InvalidQuery(format!(
                    "focus {} must be the single target",
                    focus
                )));
            }
        }
        Ok(())
    }

    /// The conditioning part of the notation, e.g. `R=r1, do(G=g2)`.
    pub fn conditions_label(&self) -> String {
        let mut conditions: Vec<String> = self.evidence.iter().map(|s| s.to_string()).collect();
        if let Some(intervention) = self.intervention {
            conditions.push(format!("do({})", intervention));
        }
        conditions.join(", ")
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let head = match self.focus {
            Some(focus) => focus.to_string(),
            None => self
                .targets
                .iter()
                .map(|t| t.name())
                .collect::<Vec<_>>()
                .join(","),
        };
        let conditions = self.conditions_label();
        if conditions.is_empty() {
            write!(f, "P({})", head)
        } else {
            write!(f, "P({} | {})", head, conditions)
        }
    }
}

/// A query's answer: a scalar for focused queries, a table otherwise.
#[derive(Clone, Debug, PartialEq)]
pub enum Answer {
    Distribution(Distribution),
    Scalar(f64),
}

impl Answer {
    pub fn values(&self) -> Vec<f64> {
        match self {
            Answer::Distribution(distribution) => distribution.to_vec(),
            Answer::Scalar(p) => vec![*p],
        }
    }

    pub fn distribution(&self) -> Option<&Distribution> {
        match self {
            Answer::Distribution(distribution) => Some(distribution),
            Answer::Scalar(_) => None,
        }
    }

    pub fn scalar(&self) -> Option<f64> {
        match self {
            Answer::Scalar(p) => Some(*p),
            Answer::Distribution(_) => None,
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::Distribution(distribution) => write!(f, "{}", distribution),
            Answer::Scalar(p) => write!(f, "{:.6}", p),
        }
    }
}
