//! Storage-backed subject repository

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::storage::Storage;
use crate::domain::subject::{Subject, SubjectId, SubjectRepository};
use crate::domain::DomainError;

#[derive(Debug)]
pub struct StorageSubjectRepository {
    storage: Arc<dyn Storage<Subject>>,
}

impl StorageSubjectRepository {
    pub fn new(storage: Arc<dyn Storage<Subject>>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl SubjectRepository for StorageSubjectRepository {
    async fn get(&self, id: &SubjectId) -> Result<Option<Subject>, DomainError> {
        self.storage.get(id).await
    }

    async fn get_by_code(&self, code: &str) -> Result<Option<Subject>, DomainError> {
        let all = self.storage.list().await?;
        Ok(all.into_iter().find(|s| s.code() == code))
    }

    async fn create(&self, subject: Subject) -> Result<Subject, DomainError> {
        if self.get_by_code(subject.code()).await?.is_some() {
            return Err(DomainError::conflict("Subject Code already exists"));
        }

        self.storage.create(subject).await
    }

    async fn update(&self, subject: Subject) -> Result<Subject, DomainError> {
        self.storage.update(subject).await
    }

    async fn list(&self) -> Result<Vec<Subject>, DomainError> {
        self.storage.list().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::InMemoryStorage;

    fn create_repo() -> StorageSubjectRepository {
        StorageSubjectRepository::new(Arc::new(InMemoryStorage::<Subject>::new()))
    }

    #[tokio::test]
    async fn test_duplicate_code_conflicts() {
        let repo = create_repo();
        repo.create(Subject::new("CS201", "Data Structures", "CSE"))
            .await
            .unwrap();

        let result = repo
            .create(Subject::new("CS201", "Another Name", "CSE"))
            .await;

        match result {
            Err(DomainError::Conflict { message }) => {
                assert_eq!(message, "Subject Code already exists")
            }
            other => panic!("expected conflict, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_get_by_code() {
        let repo = create_repo();
        let created = repo
            .create(Subject::new("EC301", "Signals", "ECE"))
            .await
            .unwrap();

        let found = repo.get_by_code("EC301").await.unwrap().unwrap();
        assert_eq!(found.id(), created.id());
        assert!(repo.get_by_code("EC999").await.unwrap().is_none());
    }
}
