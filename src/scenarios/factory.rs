use std::rc::Rc;

use crate::common::errors::InferenceError;
use crate::common::interface::QuestionSet;

use super::{coursework::Coursework, independence::IndependenceChecks};

pub struct QuestionSetFactory;

impl QuestionSetFactory {
    pub const NAMES: [&'static str; 2] = ["coursework", "independence"];

    pub fn new_shared(name: &str) -> Result<Rc<dyn QuestionSet>, InferenceError> {
        match name {
            "coursework" => Ok(Rc::new(Coursework {})),
            "independence" => Ok(Rc::new(IndependenceChecks {})),
            _ => Err(InferenceError::UnknownScenario(name.to_string())),
        }
    }
}
