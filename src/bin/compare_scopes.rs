use anyhow::{Result, bail};
use exactbayes::common::logging::init_logging;
use exactbayes::inference::{EvaluatorOptions, QueryEvaluator, SummationScope};
use exactbayes::network::{NetworkConfig, NetworkModel, PROBABILITY_TOLERANCE};
use exactbayes::scenarios::QuestionSetFactory;
use exactbayes::{print_green, print_red};
use log::info;

/// Answers every known question by plain summation over the full joint and
/// over the ancestral scope, and fails when the two disagree.
fn main() -> Result<()> {
    init_logging();
    let network = NetworkModel::new_shared(&NetworkConfig::default())?;
    let evaluator_with = |scope| {
        QueryEvaluator::new(
            network.clone(),
            EvaluatorOptions {
                scope,
                use_shortcuts: false,
            },
        )
    };
    let full = evaluator_with(SummationScope::FullJoint)?;
    let ancestral = evaluator_with(SummationScope::Ancestral)?;

    let mut disagreements = 0;
    for name in QuestionSetFactory::NAMES {
        let questions = QuestionSetFactory::new_shared(name)?.questions();
        info!("comparing {} questions of '{}'", questions.len(), name);
        for question in questions {
            let by_full = full.evaluate_by_summation(&question.query)?;
            let by_ancestral = ancestral.evaluate_by_summation(&question.query)?;
            let difference = by_full.distribution.max_difference(&by_ancestral.distribution);
            if difference > PROBABILITY_TOLERANCE {
                disagreements += 1;
                print_red!("{}: {} vs {} (|diff| = {:e})", question.query, by_full.answer, by_ancestral.answer, difference);
            } else {
                print_green!("{}: {}", question.query, by_full.answer);
            }
        }
    }
    if disagreements > 0 {
        bail!("{} question(s) disagree between scopes", disagreements);
    }
    Ok(())
}
