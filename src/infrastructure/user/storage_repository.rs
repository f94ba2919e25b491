//! Storage-backed user repository

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::storage::Storage;
use crate::domain::user::{User, UserId, UserRepository};
use crate::domain::DomainError;

#[derive(Debug)]
pub struct StorageUserRepository {
    storage: Arc<dyn Storage<User>>,
}

impl StorageUserRepository {
    pub fn new(storage: Arc<dyn Storage<User>>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl UserRepository for StorageUserRepository {
    async fn get(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        self.storage.get(id).await
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let all = self.storage.list().await?;
        Ok(all.into_iter().find(|u| u.username() == username))
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        if self.username_exists(user.username()).await? {
            return Err(DomainError::conflict("Username already in use"));
        }

        self.storage.create(user).await
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        self.storage.update(user).await
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        self.storage.list().await
    }
}
