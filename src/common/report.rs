use anyhow::{Context, Result};
use colored::{ColoredString, Colorize};
use log::{info, warn};
use serde::Serialize;
use std::fs;

use super::interface::{Question, QuestionSet};
use super::setup::OutputFormat;
use crate::inference::evaluator::{QueryEvaluator, Strategy, SummationScope};
use crate::inference::query::{Answer, Query};
use crate::network::PROBABILITY_TOLERANCE;

/// One answered (or failed) question.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReportEntry {
    pub label: String,
    pub query: String,
    /// Entry labels such as `g0` or `r1,g2`, parallel to `values`.
    pub states: Vec<String>,
    pub values: Vec<f64>,
    pub scalar: bool,
    pub evidence_probability: Option<f64>,
    pub strategy: Option<Strategy>,
    pub reference: Option<String>,
    pub matches_reference: Option<bool>,
    pub error: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Report {
    pub scenario: String,
    pub scope: SummationScope,
    pub entries: Vec<ReportEntry>,
}

impl Report {
    /// Answers every question of `set`. Failures are recorded per entry.
    pub fn build(set: &dyn QuestionSet, evaluator: &QueryEvaluator) -> Report {
        let questions = set.questions();
        let queries: Vec<Query> = questions.iter().map(|q| q.query.clone()).collect();
        let evaluations = evaluator.evaluate_batch(&queries);
        let entries = questions
            .iter()
            .zip(evaluations)
            .map(|(question, evaluation)| match evaluation {
                Ok(evaluation) => {
                    let (states, scalar) = match &evaluation.answer {
                        Answer::Distribution(distribution) => (distribution.labels(), false),
                        Answer::Scalar(_) => (Vec::new(), true),
                    };
                    ReportEntry {
                        label: question.label.clone(),
                        query: question.query.to_string(),
                        states,
                        values: evaluation.answer.values(),
                        scalar,
                        evidence_probability: Some(evaluation.evidence_probability),
                        strategy: Some(evaluation.strategy),
                        reference: question.reference.as_ref().map(|r| r.to_string()),
                        matches_reference: compare_with_reference(question, &evaluation.answer, evaluator),
                        error: None,
                    }
                }
                Err(e) => {
                    warn!("{} failed: {}", question.query, e);
                    ReportEntry {
                        label: question.label.clone(),
                        query: question.query.to_string(),
                        states: Vec::new(),
                        values: Vec::new(),
                        scalar: false,
                        evidence_probability: None,
                        strategy: None,
                        reference: question.reference.as_ref().map(|r| r.to_string()),
                        matches_reference: None,
                        error: Some(e.to_string()),
                    }
                }
            })
            .collect();
        info!("answered {} questions of '{}'", questions.len(), set.name());
        Report {
            scenario: set.name().to_string(),
            scope: evaluator.options().scope,
            entries,
        }
    }

    pub fn failures(&self) -> usize {
        self.entries.iter().filter(|e| e.error.is_some()).count()
    }

    pub fn mismatches(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.matches_reference == Some(false))
            .count()
    }

    /// Banner printed above a text report. JSON output carries none so it
    /// stays parseable.
    pub fn heading(&self, format: OutputFormat) -> Option<String> {
        match format {
            OutputFormat::Text => Some(format!("===== {} ({:?}) =====", self.scenario, self.scope)),
            OutputFormat::Json => None,
        }
    }

    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Text => Ok(self.render_text()),
            OutputFormat::Json => self.to_json(),
        }
    }

    pub fn render_text(&self) -> String {
        self.render_text_styled(true)
    }

    fn render_text_styled(&self, styled: bool) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            out.push_str(&format!(
                "\n----- {}) {} -----\n",
                entry.label,
                paint(&entry.query, styled, |s| s.bold())
            ));
            if let Some(error) = &entry.error {
                out.push_str(&format!("\t{}\n", paint(error, styled, |s| s.red())));
                continue;
            }
            let values = if entry.scalar {
                format!("{:.6}", entry.values[0])
            } else {
                let cells: Vec<String> = entry
                    .states
                    .iter()
                    .zip(&entry.values)
                    .map(|(state, value)| format!("{}: {:.6}", state, value))
                    .collect();
                format!("[{}]", cells.join(", "))
            };
            out.push_str(&format!("\t{} = {}\n", entry.query, paint(&values, styled, |s| s.green())));
            if entry.strategy == Some(Strategy::MarginalShortcut) {
                out.push_str(&format!(
                    "\t{}\n",
                    paint("(reduces to the target's marginal)", styled, |s| s.dimmed())
                ));
            }
            if let (Some(reference), Some(matches)) = (&entry.reference, entry.matches_reference) {
                let verdict = if matches {
                    paint("matches", styled, |s| s.green())
                } else {
                    paint("differs from", styled, |s| s.yellow())
                };
                out.push_str(&format!("\t{} {}\n", verdict, reference));
            }
        }
        out
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize report")
    }

    pub fn write_to_file(&self, path: &str, format: OutputFormat) -> Result<()> {
        let rendered = match format {
            OutputFormat::Text => self.render_text_styled(false),
            OutputFormat::Json => self.to_json()?,
        };
        fs::write(path, rendered).with_context(|| format!("Failed to write report to {}", path))?;
        info!("report written to {}", path);
        Ok(())
    }
}

fn compare_with_reference(
    question: &Question,
    answer: &Answer,
    evaluator: &QueryEvaluator,
) -> Option<bool> {
    let reference = question.reference.as_ref()?;
    let expected = match evaluator.evaluate(reference) {
        Ok(expected) => expected,
        Err(e) => {
            warn!("reference {} for {} failed: {}", reference, question.query, e);
            return Some(false);
        }
    };
    let (got, expected) = (answer.values(), expected.values());
    Some(
        got.len() == expected.len()
            && got
                .iter()
                .zip(&expected)
                .all(|(a, b)| (a - b).abs() <= PROBABILITY_TOLERANCE),
    )
}

fn paint(text: &str, styled: bool, style: fn(&str) -> ColoredString) -> String {
    if styled {
        style(text).to_string()
    } else {
        text.to_string()
    }
}
