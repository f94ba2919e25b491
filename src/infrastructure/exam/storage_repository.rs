//! Storage-backed exam repository

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::exam::{Exam, ExamId, ExamRepository};
use crate::domain::question::QuestionId;
use crate::domain::storage::Storage;
use crate::domain::DomainError;

#[derive(Debug)]
pub struct StorageExamRepository {
    storage: Arc<dyn Storage<Exam>>,
}

impl StorageExamRepository {
    pub fn new(storage: Arc<dyn Storage<Exam>>) -> Self {
        Self { storage }
    }

    async fn get_required(&self, id: &ExamId) -> Result<Exam, DomainError> {
        self.storage
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Exam '{}' not found", id)))
    }
}

#[async_trait]
impl ExamRepository for StorageExamRepository {
    async fn get(&self, id: &ExamId) -> Result<Option<Exam>, DomainError> {
        self.storage.get(id).await
    }

    async fn create(&self, exam: Exam) -> Result<Exam, DomainError> {
        self.storage.create(exam).await
    }

    async fn add_question(
        &self,
        exam_id: &ExamId,
        question_id: &QuestionId,
    ) -> Result<bool, DomainError> {
        let mut exam = self.get_required(exam_id).await?;

        if !exam.add_question(question_id.clone()) {
            return Ok(false);
        }

        self.storage.update(exam).await?;
        Ok(true)
    }

    async fn attach_paper(&self, exam_id: &ExamId, url: &str) -> Result<Exam, DomainError> {
        let mut exam = self.get_required(exam_id).await?;
        exam.set_question_paper(url);
        self.storage.update(exam).await
    }
}
