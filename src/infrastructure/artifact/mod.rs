//! Generated document storage

mod local;

pub use local::{LocalArtifactStore, PAPER_DIR, RESOURCE_DIR};
