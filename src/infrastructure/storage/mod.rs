//! Storage infrastructure - Storage implementations

mod factory;
mod in_memory;
mod postgres;

pub use factory::{StorageConfig, StorageFactory, StorageType};
pub use in_memory::InMemoryStorage;
pub use postgres::{PostgresConfig, PostgresStorage};

/// Serialized field naming the owning subject of questions, exams and resources
pub const SUBJECT_FIELD: &str = "subject_id";
