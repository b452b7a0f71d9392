mod service;
pub mod validate;

pub use service::QuizService;
pub use validate::{default_question_set, validate_question_set};
