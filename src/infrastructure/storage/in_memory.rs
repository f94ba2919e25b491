//! In-memory storage implementation

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::storage::{Storage, StorageEntity, StorageKey};
use crate::domain::DomainError;

#[derive(Debug)]
struct Entries<E> {
    by_key: HashMap<String, E>,
    order: Vec<String>,
}

/// Thread-safe in-memory storage that keeps insertion order
///
/// Useful for testing and development. Data is lost when the process terminates.
#[derive(Debug)]
pub struct InMemoryStorage<E>
where
    E: StorageEntity,
{
    entries: RwLock<Entries<E>>,
}

impl<E> Default for InMemoryStorage<E>
where
    E: StorageEntity,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<E> InMemoryStorage<E>
where
    E: StorageEntity,
{
    /// Creates a new empty in-memory storage
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Entries {
                by_key: HashMap::new(),
                order: Vec::new(),
            }),
        }
    }

    /// Creates storage pre-populated with entities; later duplicates replace earlier ones
    pub fn with_entities(entities: Vec<E>) -> Self {
        let mut by_key = HashMap::new();
        let mut order = Vec::new();

        for entity in entities {
            let key = entity.key().as_str().to_string();
            if by_key.insert(key.clone(), entity).is_none() {
                order.push(key);
            }
        }

        Self {
            entries: RwLock::new(Entries { by_key, order }),
        }
    }
}

#[async_trait]
impl<E> Storage<E> for InMemoryStorage<E>
where
    E: StorageEntity + 'static,
{
    async fn get(&self, key: &E::Key) -> Result<Option<E>, DomainError> {
        let entries = self.entries.read().map_err(|e| {
            DomainError::storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(entries.by_key.get(key.as_str()).cloned())
    }

    async fn list(&self) -> Result<Vec<E>, DomainError> {
        let entries = self.entries.read().map_err(|e| {
            DomainError::storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(entries
            .order
            .iter()
            .filter_map(|key| entries.by_key.get(key).cloned())
            .collect())
    }

    async fn create(&self, entity: E) -> Result<E, DomainError> {
        let key = entity.key().as_str().to_string();
        let mut entries = self.entries.write().map_err(|e| {
            DomainError::storage(format!("Failed to acquire write lock: {}", e))
        })?;

        if entries.by_key.contains_key(&key) {
            return Err(DomainError::conflict(format!(
                "Entity with key '{}' already exists",
                key
            )));
        }

        entries.order.push(key.clone());
        entries.by_key.insert(key, entity.clone());
        Ok(entity)
    }

    async fn update(&self, entity: E) -> Result<E, DomainError> {
        let key = entity.key().as_str().to_string();
        let mut entries = self.entries.write().map_err(|e| {
            DomainError::storage(format!("Failed to acquire write lock: {}", e))
        })?;

        match entries.by_key.get_mut(&key) {
            Some(slot) => {
                *slot = entity.clone();
                Ok(entity)
            }
            None => Err(DomainError::not_found(format!(
                "Entity with key '{}' not found",
                key
            ))),
        }
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let entries = self.entries.read().map_err(|e| {
            DomainError::storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(entries.order.len())
    }

    async fn exists(&self, key: &E::Key) -> Result<bool, DomainError> {
        let entries = self.entries.read().map_err(|e| {
            DomainError::storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(entries.by_key.contains_key(key.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    crate::entity_id!(
        /// Key of the storage test entity
        NoteId
    );

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Note {
        id: NoteId,
        body: String,
    }

    impl StorageEntity for Note {
        type Key = NoteId;

        fn key(&self) -> &Self::Key {
            &self.id
        }
    }

    fn note(body: &str) -> Note {
        Note {
            id: NoteId::generate(),
            body: body.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let storage: InMemoryStorage<Note> = InMemoryStorage::new();
        let n = note("first");

        storage.create(n.clone()).await.unwrap();

        assert_eq!(storage.get(&n.id).await.unwrap(), Some(n));
    }

    #[tokio::test]
    async fn test_list_by_field_keeps_order() {
        let storage: InMemoryStorage<Note> = InMemoryStorage::new();
        for body in ["keep", "drop", "keep"] {
            storage.create(note(body)).await.unwrap();
        }

        let kept = storage.list_by_field("body", "keep").await.unwrap();
        let all = storage.list().await.unwrap();

        assert_eq!(kept, vec![all[0].clone(), all[2].clone()]);
        assert!(storage.list_by_field("missing", "keep").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_conflict() {
        let storage: InMemoryStorage<Note> = InMemoryStorage::new();
        let n = note("first");

        storage.create(n.clone()).await.unwrap();
        let result = storage.create(n).await;

        assert!(matches!(result, Err(DomainError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_update_keeps_position() {
        let storage: InMemoryStorage<Note> = InMemoryStorage::new();
        let a = note("a");
        let b = note("b");
        storage.create(a.clone()).await.unwrap();
        storage.create(b.clone()).await.unwrap();

        let mut changed = a.clone();
        changed.body = "a2".into();
        storage.update(changed).await.unwrap();

        let bodies: Vec<_> = storage.list().await.unwrap().into_iter().map(|n| n.body).collect();
        assert_eq!(bodies, vec!["a2", "b"]);
    }

    #[tokio::test]
    async fn test_update_not_found() {
        let storage: InMemoryStorage<Note> = InMemoryStorage::new();
        let result = storage.update(note("ghost")).await;

        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_list_in_insertion_order() {
        let storage: InMemoryStorage<Note> = InMemoryStorage::new();
        for body in ["q1", "q2", "q3", "q4", "q5"] {
            storage.create(note(body)).await.unwrap();
        }

        let bodies: Vec<_> = storage.list().await.unwrap().into_iter().map(|n| n.body).collect();
        assert_eq!(bodies, vec!["q1", "q2", "q3", "q4", "q5"]);
        assert_eq!(storage.count().await.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_with_entities() {
        let a = note("a");
        let storage = InMemoryStorage::with_entities(vec![a.clone(), note("b")]);

        assert_eq!(storage.count().await.unwrap(), 2);
        assert!(storage.exists(&a.id).await.unwrap());
    }
}
