//! Exam domain - an exam sitting and the question paper generated for it

mod entity;
mod repository;

pub use entity::{Exam, ExamId};
pub use repository::ExamRepository;
