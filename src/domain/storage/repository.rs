//! Storage trait definition

use std::fmt::Debug;

use async_trait::async_trait;

use crate::domain::DomainError;

use super::entity::StorageEntity;

/// Generic storage trait for the entities of the department service
///
/// Implementations must return `list` results in insertion order; question
/// pools handed to the sampler are read through it.
#[async_trait]
pub trait Storage<E>: Send + Sync + Debug
where
    E: StorageEntity + 'static,
{
    /// Retrieves an entity by its key
    async fn get(&self, key: &E::Key) -> Result<Option<E>, DomainError>;

    /// Retrieves all entities in insertion order
    async fn list(&self) -> Result<Vec<E>, DomainError>;

    /// Creates a new entity, returns error if already exists
    async fn create(&self, entity: E) -> Result<E, DomainError>;

    /// Updates an existing entity, returns error if not found
    async fn update(&self, entity: E) -> Result<E, DomainError>;

    /// Checks if an entity exists by its key
    async fn exists(&self, key: &E::Key) -> Result<bool, DomainError> {
        Ok(self.get(key).await?.is_some())
    }

    /// Returns the count of entities
    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.list().await?.len())
    }

    /// Retrieves, in insertion order, the entities whose top-level string
    /// field `field` equals `value`
    async fn list_by_field(&self, field: &str, value: &str) -> Result<Vec<E>, DomainError> {
        let mut matched = Vec::new();

        for entity in self.list().await? {
            let data = serde_json::to_value(&entity)
                .map_err(|e| DomainError::storage(format!("Failed to serialize entity: {}", e)))?;
            if data.get(field).and_then(|v| v.as_str()) == Some(value) {
                matched.push(entity);
            }
        }

        Ok(matched)
    }
}
