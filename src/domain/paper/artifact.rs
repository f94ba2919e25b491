//! Artifact store seam

use async_trait::async_trait;
use std::fmt::Debug;

use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Persists generated documents and hands back their public URL path
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ArtifactStore: Send + Sync + Debug {
    /// Stores `bytes` as `file_name` (suffixed if the name is taken) and
    /// returns the URL path it is served under
    async fn store(&self, file_name: &str, bytes: Vec<u8>) -> Result<String, DomainError>;
}
