pub mod coursework;
pub mod factory;
pub mod independence;

pub use factory::QuestionSetFactory;
