use crate::inference::query::Query;

/// A labeled, predetermined query.
#[derive(Clone, Debug, PartialEq)]
pub struct Question {
    pub label: String,
    pub query: Query,
    /// A query expected to give the same answer, for independence checks.
    pub reference: Option<Query>,
}

impl Question {
    pub fn new(label: &str, query: Query) -> Question {
        Question {
            label: label.to_string(),
            query,
            reference: None,
        }
    }

    pub fn expecting_same_as(mut self, reference: Query) -> Question {
        self.reference = Some(reference);
        self
    }
}

/// A named, fixed list of questions to put to the network.
pub trait QuestionSet {
    fn name(&self) -> &str;

    fn questions(&self) -> Vec<Question>;
}
