use crate::common::interface::{Question, QuestionSet};
use crate::inference::query::Query;
use crate::network::variables::{DValue, GValue, LValue, RValue, SValue, Variable};

/// Questions a) to p) of the five-variable network exercise.
pub struct Coursework {}

impl QuestionSet for Coursework {
    fn name(&self) -> &str {
        "coursework"
    }

    fn questions(&self) -> Vec<Question> {
        let g = || Query::marginal([Variable::G]);
        let r = || Query::marginal([Variable::R]);
        vec![
            Question::new("a", g()),
            Question::new("b", g().given(RValue::R1)),
            Question::new("c", g().given(RValue::R0)),
            Question::new("d", g().given(RValue::R1).given(SValue::S0)),
            Question::new("e", g().given(RValue::R0).given(SValue::S0))
                .expecting_same_as(g().given(RValue::R1).given(SValue::S0)),
            Question::new("f", r().given(DValue::D1)).expecting_same_as(r()),
            Question::new("g", r().given(DValue::D0)).expecting_same_as(r()),
            Question::new("h", r().given(DValue::D1).given(GValue::G2)),
            Question::new("i", r().given(DValue::D0).given(GValue::G2)),
            Question::new("j", r().given(DValue::D1).given(LValue::L1)),
            Question::new("k", r().given(DValue::D0).given(LValue::L1)),
            Question::new("l", r().intervene(GValue::G2)).expecting_same_as(r()),
            Question::new("m", r().given(GValue::G2)),
            Question::new("n", r()),
            Question::new("o", g().intervene(LValue::L1)).expecting_same_as(g()),
            Question::new("p", Query::probability_of(GValue::G1).given(LValue::L1)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_questions_are_valid() {
        let questions = Coursework {}.questions();
        assert_eq!(questions.len(), 16);
        for question in questions {
            question.query.validate().unwrap();
            if let Some(reference) = question.reference {
                reference.validate().unwrap();
            }
        }
    }
}
