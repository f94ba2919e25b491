//! Storage factory for runtime backend selection

use std::sync::Arc;

use sqlx::postgres::PgPool;
use tracing::info;

use crate::domain::storage::{Storage, StorageEntity};
use crate::domain::DomainError;

use super::in_memory::InMemoryStorage;
use super::postgres::{PostgresConfig, PostgresStorage};

/// Supported storage backends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageType {
    /// In-memory storage (for testing/development)
    InMemory,
    /// PostgreSQL storage
    Postgres,
}

impl StorageType {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "memory" | "inmemory" | "in-memory" | "in_memory" => Some(Self::InMemory),
            "postgres" | "postgresql" | "pg" => Some(Self::Postgres),
            _ => None,
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone)]
pub enum StorageConfig {
    InMemory,
    Postgres(PostgresConfig),
}

impl StorageConfig {
    pub fn in_memory() -> Self {
        Self::InMemory
    }

    pub fn postgres(config: PostgresConfig) -> Self {
        Self::Postgres(config)
    }

    pub fn storage_type(&self) -> StorageType {
        match self {
            Self::InMemory => StorageType::InMemory,
            Self::Postgres(_) => StorageType::Postgres,
        }
    }
}

#[derive(Debug, Clone)]
enum Backend {
    InMemory,
    Postgres(PgPool),
}

/// Creates one storage per entity table on a shared backend
#[derive(Debug, Clone)]
pub struct StorageFactory {
    backend: Backend,
}

impl StorageFactory {
    /// Opens the backend; for PostgreSQL this connects the shared pool
    pub async fn connect(config: &StorageConfig) -> Result<Self, DomainError> {
        let backend = match config {
            StorageConfig::InMemory => Backend::InMemory,
            StorageConfig::Postgres(pg_config) => Backend::Postgres(pg_config.connect().await?),
        };

        info!(backend = ?config.storage_type(), "Storage backend ready");

        Ok(Self { backend })
    }

    pub fn in_memory() -> Self {
        Self {
            backend: Backend::InMemory,
        }
    }

    pub fn storage_type(&self) -> StorageType {
        match self.backend {
            Backend::InMemory => StorageType::InMemory,
            Backend::Postgres(_) => StorageType::Postgres,
        }
    }

    /// Creates a storage for `E`, creating its table when backed by PostgreSQL
    pub async fn create<E>(&self, table_name: &str) -> Result<Arc<dyn Storage<E>>, DomainError>
    where
        E: StorageEntity + 'static,
    {
        match &self.backend {
            Backend::InMemory => Ok(Arc::new(InMemoryStorage::<E>::new())),
            Backend::Postgres(pool) => {
                let storage = PostgresStorage::<E>::new(pool.clone(), table_name);
                storage.ensure_table().await?;
                Ok(Arc::new(storage))
            }
        }
    }

    /// Like `create`, also indexing `field` for `Storage::list_by_field`
    pub async fn create_indexed<E>(
        &self,
        table_name: &str,
        field: &str,
    ) -> Result<Arc<dyn Storage<E>>, DomainError>
    where
        E: StorageEntity + 'static,
    {
        match &self.backend {
            Backend::InMemory => Ok(Arc::new(InMemoryStorage::<E>::new())),
            Backend::Postgres(pool) => {
                let storage = PostgresStorage::<E>::new(pool.clone(), table_name);
                storage.ensure_table().await?;
                storage.ensure_index(field).await?;
                Ok(Arc::new(storage))
            }
        }
    }
}
