use crate::common::interface::{Question, QuestionSet};
use crate::inference::query::Query;
use crate::network::variables::{DValue, GValue, LValue, Outcome, RValue, SValue, Variable};

/// Independence and intervention checks, each against the query it should
/// agree with.
pub struct IndependenceChecks {}

impl QuestionSet for IndependenceChecks {
    fn name(&self) -> &str {
        "independence"
    }

    fn questions(&self) -> Vec<Question> {
        let g = || Query::marginal([Variable::G]);
        let r = || Query::marginal([Variable::R]);
        let mut questions = Vec::new();
        for d in DValue::ALL {
            questions.push(
                Question::new(&format!("R indep D, {}", d.state()), r().given(*d))
                    .expecting_same_as(r()),
            );
        }
        for value in GValue::ALL {
            questions.push(
                Question::new(&format!("do(G) leaves R, {}", value.state()), r().intervene(*value))
                    .expecting_same_as(r()),
            );
        }
        for l in LValue::ALL {
            questions.push(
                Question::new(&format!("do(L) leaves G, {}", l.state()), g().intervene(*l))
                    .expecting_same_as(g()),
            );
        }
        for s in SValue::ALL {
            questions.push(
                Question::new(
                    &format!("G indep R given {}", s.state()),
                    g().given(RValue::R0).given(*s),
                )
                .expecting_same_as(g().given(RValue::R1).given(*s)),
            );
        }
        questions.push(
            Question::new("G indep R given S, D", g().given(RValue::R1).given(SValue::S1).given(DValue::D0))
                .expecting_same_as(g().given(SValue::S1).given(DValue::D0)),
        );
        questions.push(
            Question::new("L indep S given G", Query::marginal([Variable::L]).given(GValue::G1).given(SValue::S0))
                .expecting_same_as(Query::marginal([Variable::L]).given(GValue::G1)),
        );
        questions
    }
}
