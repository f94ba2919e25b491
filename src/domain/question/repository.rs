//! Question repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{Question, QuestionId};
use super::query::QuestionQuery;
use crate::domain::subject::SubjectId;
use crate::domain::DomainError;

#[async_trait]
pub trait QuestionRepository: Send + Sync + Debug {
    async fn get(&self, id: &QuestionId) -> Result<Option<Question>, DomainError>;

    async fn create(&self, question: Question) -> Result<Question, DomainError>;

    /// Questions matching the query, in insertion order
    async fn find(&self, query: &QuestionQuery) -> Result<Vec<Question>, DomainError>;

    async fn list_by_subject(&self, subject_id: &SubjectId) -> Result<Vec<Question>, DomainError>;
}
