//! Subject repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{Subject, SubjectId};
use crate::domain::DomainError;

#[async_trait]
pub trait SubjectRepository: Send + Sync + Debug {
    async fn get(&self, id: &SubjectId) -> Result<Option<Subject>, DomainError>;

    async fn get_by_code(&self, code: &str) -> Result<Option<Subject>, DomainError>;

    async fn create(&self, subject: Subject) -> Result<Subject, DomainError>;

    async fn update(&self, subject: Subject) -> Result<Subject, DomainError>;

    async fn list(&self) -> Result<Vec<Subject>, DomainError>;
}
