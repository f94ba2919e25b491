//! Resource repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{Resource, ResourceCategory, ResourceId};
use crate::domain::subject::SubjectId;
use crate::domain::DomainError;

#[async_trait]
pub trait ResourceRepository: Send + Sync + Debug {
    async fn get(&self, id: &ResourceId) -> Result<Option<Resource>, DomainError>;

    async fn create(&self, resource: Resource) -> Result<Resource, DomainError>;

    async fn list_by_subject(&self, subject_id: &SubjectId) -> Result<Vec<Resource>, DomainError>;

    async fn list_by_category(
        &self,
        category: ResourceCategory,
    ) -> Result<Vec<Resource>, DomainError>;

    /// Resources whose title contains `query`, ignoring case
    async fn search_title(&self, query: &str) -> Result<Vec<Resource>, DomainError>;
}
