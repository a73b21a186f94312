use clap::ValueEnum;
use log::{debug, trace};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::common::errors::InferenceError;
use crate::inference::distribution::Distribution;
use crate::inference::query::{Answer, Query};
use crate::inference::shortcuts;
use crate::network::assignment::Assignment;
use crate::network::model::NetworkModel;
use crate::network::variables::{State, Variable};
use crate::network::PROBABILITY_TOLERANCE;

/// Which variables a summation runs over.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SummationScope {
    /// Every variable of the network.
    FullJoint,

    /// Only ancestors of the targets, evidence and intervention. The other
    /// variables are barren: their factors sum to 1.
    Ancestral,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct EvaluatorOptions {
    pub scope: SummationScope,
    pub use_shortcuts: bool,
}

impl Default for EvaluatorOptions {
    fn default() -> Self {
        EvaluatorOptions {
            scope: SummationScope::FullJoint,
            use_shortcuts: true,
        }
    }
}

/// How an evaluation was carried out.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    Summation,
    MarginalShortcut,
}

/// Everything computed for one query.
#[derive(Clone, Debug, PartialEq)]
pub struct Evaluation {
    pub query: Query,
    pub answer: Answer,
    /// P(targets | conditions).
    pub distribution: Distribution,
    /// P(targets, evidence), before normalization.
    pub joint: Distribution,
    /// P(evidence), in the mutilated model for do-queries.
    pub evidence_probability: f64,
    pub strategy: Strategy,
}

/// Answers queries by enumerating the factored joint of a `NetworkModel`.
///
/// Single-variable marginals are computed once at construction and reused
/// whenever a query reduces to one of them.
pub struct QueryEvaluator {
    network: Arc<NetworkModel>,
    options: EvaluatorOptions,
    marginals: Vec<Distribution>,
}

impl QueryEvaluator {
    pub fn new(
        network: Arc<NetworkModel>,
        options: EvaluatorOptions,
    ) -> Result<QueryEvaluator, InferenceError> {
        let mut evaluator = QueryEvaluator {
            network,
            options,
            marginals: Vec::new(),
        };
        let marginals = Variable::ALL
            .iter()
            .map(|variable| {
                evaluator
                    .summation(&Query::marginal([*variable]))
                    .map(|evaluation| evaluation.distribution)
            })
            .collect::<Result<Vec<_>, _>>()?;
        evaluator.marginals = marginals;
        Ok(evaluator)
    }

    pub fn new_shared(
        network: Arc<NetworkModel>,
        options: EvaluatorOptions,
    ) -> Result<Arc<QueryEvaluator>, InferenceError> {
        Ok(Arc::new(QueryEvaluator::new(network, options)?))
    }

    pub fn network(&self) -> &Arc<NetworkModel> {
        &self.network
    }

    pub fn options(&self) -> EvaluatorOptions {
        self.options
    }

    /// The precomputed P(variable).
    pub fn marginal(&self, variable: Variable) -> &Distribution {
        &self.marginals[variable.index()]
    }

    pub fn evaluate(&self, query: &Query) -> Result<Answer, InferenceError> {
        Ok(self.evaluate_detailed(query)?.answer)
    }

    pub fn evaluate_detailed(&self, query: &Query) -> Result<Evaluation, InferenceError> {
        query.validate()?;
        if self.options.use_shortcuts
            && shortcuts::reduces_to_marginal(self.network.topology(), query)
        {
            return self.shortcut(query);
        }
        self.summation(query)
    }

    /// Like `evaluate_detailed`, but always sums.
    pub fn evaluate_by_summation(&self, query: &Query) -> Result<Evaluation, InferenceError> {
        query.validate()?;
        self.summation(query)
    }

    /// Evaluates independent queries in parallel, keeping their order.
    pub fn evaluate_batch(&self, queries: &[Query]) -> Vec<Result<Evaluation, InferenceError>> {
        queries
            .par_iter()
            .map(|query| self.evaluate_detailed(query))
            .collect()
    }

    /// P(event) in the unmodified network.
    pub fn probability(&self, event: &Assignment) -> f64 {
        let scope = self.scope_for(&event.fixed_variables(), None);
        self.sum_joint(event, &scope, None)
    }

    /// Sum of the joint over every full assignment. 1 for valid tables.
    pub fn total_mass(&self) -> f64 {
        self.sum_joint(&Assignment::empty(), &[true; Variable::COUNT], None)
    }

    fn summation(&self, query: &Query) -> Result<Evaluation, InferenceError> {
        let fixed = query.fixed()?;
        let truncated = query.intervention().map(|state| state.variable());
        let mut relevant = query.targets().to_vec();
        relevant.extend(fixed.fixed_variables());
        let scope = self.scope_for(&relevant, truncated);
        let evidence_probability = self.evidence_probability(query, &fixed, &scope, truncated)?;

        let mut target_scope = [false; Variable::COUNT];
        for target in query.targets() {
            target_scope[target.index()] = true;
        }
        let mut joint = Distribution::zeros(query.targets().to_vec());
        for combination in Assignment::empty().completions(&target_scope) {
            let indices: Vec<usize> = query
                .targets()
                .iter()
                .map(|target| combination[target.index()])
                .collect();
            let mut event = fixed;
            for (target, index) in query.targets().iter().zip(&indices) {
                event.fix(State::new(*target, *index)?)?;
            }
            let term = self.sum_joint(&event, &scope, truncated);
            trace!("{}: P({}) = {}", query, event, term);
            joint.set(&indices, term);
        }

        let distribution = joint.scaled(1.0 / evidence_probability);
        debug!("{} = {} by summation", query, distribution);
        Ok(Evaluation {
            query: query.clone(),
            answer: answer_for(query, &distribution)?,
            distribution,
            joint,
            evidence_probability,
            strategy: Strategy::Summation,
        })
    }

    fn shortcut(&self, query: &Query) -> Result<Evaluation, InferenceError> {
        let target = query.targets()[0];
        let fixed = query.fixed()?;
        let truncated = query.intervention().map(|state| state.variable());
        let scope = self.scope_for(&fixed.fixed_variables(), truncated);
        let evidence_probability = self.evidence_probability(query, &fixed, &scope, truncated)?;

        let distribution = self.marginal(target).clone();
        debug!("{} reduces to P({}) = {}", query, target, distribution);
        Ok(Evaluation {
            query: query.clone(),
            answer: answer_for(query, &distribution)?,
            joint: distribution.scaled(evidence_probability),
            distribution,
            evidence_probability,
            strategy: Strategy::MarginalShortcut,
        })
    }

    fn evidence_probability(
        &self,
        query: &Query,
        fixed: &Assignment,
        scope: &[bool; Variable::COUNT],
        truncated: Option<Variable>,
    ) -> Result<f64, InferenceError> {
        let probability = self.sum_joint(fixed, scope, truncated);
        if probability.abs() <= PROBABILITY_TOLERANCE {
            return Err(InferenceError::DegenerateConditioning {
                evidence: query.conditions_label(),
            });
        }
        Ok(probability)
    }

    fn scope_for(
        &self,
        relevant: &[Variable],
        truncated: Option<Variable>,
    ) -> [bool; Variable::COUNT] {
        match self.options.scope {
            SummationScope::FullJoint => [true; Variable::COUNT],
            SummationScope::Ancestral => {
                let topology = match truncated {
                    Some(intervened) => self.network.topology().mutilated(intervened),
                    None => self.network.topology().clone(),
                };
                let closure = topology.ancestors_of(relevant);
                std::array::from_fn(|i| closure.contains(&Variable::ALL[i]))
            }
        }
    }

    fn sum_joint(
        &self,
        fixed: &Assignment,
        scope: &[bool; Variable::COUNT],
        truncated: Option<Variable>,
    ) -> f64 {
        fixed
            .completions(scope)
            .map(|full| self.network.joint_term(&full, scope, truncated))
            .sum()
    }
}

fn answer_for(query: &Query, distribution: &Distribution) -> Result<Answer, InferenceError> {
    match query.focus() {
        None => Ok(Answer::Distribution(distribution.clone())),
        Some(focus) => distribution
            .probability(&[focus.index()])
            .map(Answer::Scalar)
            .ok_or_else(|| InferenceError::InvalidQuery(format!("{} is not a target", focus))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::model::NetworkConfig;
    use crate::network::variables::{GValue, Outcome, RValue, SValue};

    fn evaluator(scope: SummationScope) -> QueryEvaluator {
        let network = NetworkModel::new_shared(&NetworkConfig::default()).unwrap();
        QueryEvaluator::new(
            network,
            EvaluatorOptions {
                scope,
                use_shortcuts: true,
            },
        )
        .unwrap()
    }

    #[test]
    fn test_shared_evaluator_across_threads() {
        let network = NetworkModel::new_shared(&NetworkConfig::default()).unwrap();
        let shared = QueryEvaluator::new_shared(network, EvaluatorOptions::default()).unwrap();
        let handles: Vec<_> = GValue::ALL
            .iter()
            .map(|g| {
                let evaluator = Arc::clone(&shared);
                let query = Query::marginal([Variable::R]).given(*g);
                std::thread::spawn(move || evaluator.evaluate(&query).unwrap().values())
            })
            .collect();
        for (g, handle) in GValue::ALL.iter().zip(handles) {
            let expected = shared.evaluate(&Query::marginal([Variable::R]).given(*g)).unwrap();
            assert_eq!(handle.join().unwrap(), expected.values());
        }
    }

    #[test]
    fn test_precomputed_marginals() {
        let evaluator = evaluator(SummationScope::FullJoint);
        let p_r = evaluator.marginal(Variable::R);
        assert!((p_r.of(RValue::R1).unwrap() - 0.66).abs() < 1e-12);
        for variable in Variable::ALL {
            assert!((evaluator.marginal(variable).total() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_probability_of_event() {
        let evaluator = evaluator(SummationScope::Ancestral);
        let event = Assignment::empty()
            .with(RValue::R1.state())
            .unwrap()
            .with(SValue::S0.state())
            .unwrap();
        assert!((evaluator.probability(&event) - 0.02).abs() < 1e-12);
    }

    #[test]
    fn test_scalar_answer() {
        let evaluator = evaluator(SummationScope::FullJoint);
        let answer = evaluator.evaluate(&Query::probability_of(GValue::G2)).unwrap();
        assert!((answer.scalar().unwrap() - 0.5644).abs() < 1e-9);
    }

    #[test]
    fn test_ancestral_scope_prunes() {
        let evaluator = evaluator(SummationScope::Ancestral);
        let scope = evaluator.scope_for(&[Variable::R], None);
        assert_eq!(scope, [true, false, true, false, false]);
        let scope = evaluator.scope_for(&[Variable::R, Variable::G], Some(Variable::G));
        assert_eq!(scope, [true, false, true, true, false]);
    }
}
