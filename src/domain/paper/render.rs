//! Document renderer seam

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use super::layout::PaperDocument;
use crate::domain::DomainError;

/// Output format of a generated question paper
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    #[default]
    Docx,
    Tex,
    Pdf,
}

impl DocumentFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "docx" | "word" => Some(Self::Docx),
            "tex" | "latex" => Some(Self::Tex),
            "pdf" => Some(Self::Pdf),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Docx => "docx",
            Self::Tex => "tex",
            Self::Pdf => "pdf",
        }
    }
}

/// Turns a laid-out paper into file bytes
#[async_trait]
pub trait DocumentRenderer: Send + Sync + Debug {
    fn format(&self) -> DocumentFormat;

    /// `stem` is the artifact file name without extension
    async fn render(&self, document: &PaperDocument, stem: &str) -> Result<Vec<u8>, DomainError>;
}
