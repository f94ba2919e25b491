//! Storage-backed question repository

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::question::{Question, QuestionId, QuestionQuery, QuestionRepository};
use crate::domain::storage::Storage;
use crate::domain::subject::SubjectId;
use crate::domain::DomainError;
use crate::infrastructure::storage::SUBJECT_FIELD;

#[derive(Debug)]
pub struct StorageQuestionRepository {
    storage: Arc<dyn Storage<Question>>,
}

impl StorageQuestionRepository {
    pub fn new(storage: Arc<dyn Storage<Question>>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl QuestionRepository for StorageQuestionRepository {
    async fn get(&self, id: &QuestionId) -> Result<Option<Question>, DomainError> {
        self.storage.get(id).await
    }

    async fn create(&self, question: Question) -> Result<Question, DomainError> {
        self.storage.create(question).await
    }

    async fn find(&self, query: &QuestionQuery) -> Result<Vec<Question>, DomainError> {
        let candidates = self.list_by_subject(&query.subject_id).await?;
        Ok(candidates.into_iter().filter(|q| query.matches(q)).collect())
    }

    async fn list_by_subject(&self, subject_id: &SubjectId) -> Result<Vec<Question>, DomainError> {
        self.storage
            .list_by_field(SUBJECT_FIELD, subject_id.as_str())
            .await
    }
}
