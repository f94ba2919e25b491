//! Artifact store on the local media directory

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use rand::distributions::Alphanumeric;
use rand::Rng;
use tokio::io::AsyncWriteExt;
use tracing::info;

use crate::domain::paper::ArtifactStore;
use crate::domain::DomainError;

/// Subdirectory of the media root holding question papers
pub const PAPER_DIR: &str = "question_papers";
/// Subdirectory of the media root holding uploaded teaching resources
pub const RESOURCE_DIR: &str = "resources";
const SUFFIX_LEN: usize = 7;

/// Writes files under `<media_root>/<subdirectory>/`, served at
/// `<url_prefix>/<subdirectory>/`. The subdirectory defaults to
/// `question_papers`.
#[derive(Debug, Clone)]
pub struct LocalArtifactStore {
    media_root: PathBuf,
    url_prefix: String,
    subdirectory: String,
}

impl LocalArtifactStore {
    pub fn new(media_root: impl Into<PathBuf>, url_prefix: impl Into<String>) -> Self {
        Self {
            media_root: media_root.into(),
            url_prefix: url_prefix.into(),
            subdirectory: PAPER_DIR.to_string(),
        }
    }

    pub fn with_subdirectory(mut self, subdirectory: impl Into<String>) -> Self {
        self.subdirectory = subdirectory.into();
        self
    }

    pub fn directory(&self) -> PathBuf {
        self.media_root.join(&self.subdirectory)
    }

    fn url_for(&self, file_name: &str) -> String {
        format!(
            "{}/{}/{}",
            self.url_prefix.trim_end_matches('/'),
            self.subdirectory,
            file_name
        )
    }
}

/// `name.ext` -> `name_<7 alphanumerics>.ext`
fn suffixed(file_name: &str) -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SUFFIX_LEN)
        .map(char::from)
        .collect();

    let path = Path::new(file_name);
    match (
        path.file_stem().and_then(|s| s.to_str()),
        path.extension().and_then(|s| s.to_str()),
    ) {
        (Some(stem), Some(ext)) => format!("{}_{}.{}", stem, suffix, ext),
        _ => format!("{}_{}", file_name, suffix),
    }
}

#[async_trait]
impl ArtifactStore for LocalArtifactStore {
    async fn store(&self, file_name: &str, bytes: Vec<u8>) -> Result<String, DomainError> {
        if Path::new(file_name).file_name().and_then(|n| n.to_str()) != Some(file_name) {
            return Err(DomainError::storage(format!(
                "Invalid artifact name '{}'",
                file_name
            )));
        }

        let directory = self.directory();
        tokio::fs::create_dir_all(&directory)
            .await
            .map_err(|e| DomainError::storage(format!("Cannot create media directory: {}", e)))?;

        let mut name = file_name.to_string();
        loop {
            let path = directory.join(&name);
            let opened = tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await;

            match opened {
                Ok(mut file) => {
                    file.write_all(&bytes).await.map_err(|e| {
                        DomainError::storage(format!("Cannot write '{}': {}", path.display(), e))
                    })?;
                    file.flush().await.map_err(|e| {
                        DomainError::storage(format!("Cannot write '{}': {}", path.display(), e))
                    })?;
                    break;
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => name = suffixed(file_name),
                Err(e) => {
                    return Err(DomainError::storage(format!(
                        "Cannot create '{}': {}",
                        path.display(),
                        e
                    )));
                }
            }
        }

        let url = self.url_for(&name);
        info!(file = %name, size = bytes.len(), url = %url, "Stored artifact");

        Ok(url)
    }
}
