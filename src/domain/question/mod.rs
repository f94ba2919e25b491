//! Question bank domain

mod entity;
mod query;
mod repository;

pub use entity::{Classification, Mark, Question, QuestionId};
pub use query::{QuestionFilter, QuestionQuery};
pub use repository::QuestionRepository;
