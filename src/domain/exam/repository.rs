//! Exam repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{Exam, ExamId};
use crate::domain::question::QuestionId;
use crate::domain::DomainError;

#[async_trait]
pub trait ExamRepository: Send + Sync + Debug {
    async fn get(&self, id: &ExamId) -> Result<Option<Exam>, DomainError>;

    async fn create(&self, exam: Exam) -> Result<Exam, DomainError>;

    /// Binds a question to the exam; returns false if it was already bound
    async fn add_question(
        &self,
        exam_id: &ExamId,
        question_id: &QuestionId,
    ) -> Result<bool, DomainError>;

    /// Records the URL of the generated question paper
    async fn attach_paper(&self, exam_id: &ExamId, url: &str) -> Result<Exam, DomainError>;
}
