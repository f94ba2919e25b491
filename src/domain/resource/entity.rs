//! Resource entity and categories

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::storage::StorageEntity;
use crate::domain::subject::SubjectId;
use crate::domain::user::UserId;

crate::entity_id!(
    /// Resource identifier
    ResourceId
);

const FALLBACK_FILE_NAME: &str = "resource";

/// Kind of teaching material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceCategory {
    Presentation,
    PaperPublication,
    SubjectNote,
    ProjectThesis,
    SeminarReport,
    PreviousQuestionPaper,
}

impl ResourceCategory {
    pub const ALL: [ResourceCategory; 6] = [
        Self::Presentation,
        Self::PaperPublication,
        Self::SubjectNote,
        Self::ProjectThesis,
        Self::SeminarReport,
        Self::PreviousQuestionPaper,
    ];

    /// Accepts the slug or the display label in any case, with spaces or
    /// underscores between words (`Paper_Publication`, `paper publication`)
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_lowercase().replace(' ', "_");
        Self::ALL.into_iter().find(|c| c.as_str() == normalized)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Presentation => "presentation",
            Self::PaperPublication => "paper_publication",
            Self::SubjectNote => "subject_note",
            Self::ProjectThesis => "project_thesis",
            Self::SeminarReport => "seminar_report",
            Self::PreviousQuestionPaper => "previous_question_paper",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Presentation => "Presentation",
            Self::PaperPublication => "Paper Publication",
            Self::SubjectNote => "Subject Note",
            Self::ProjectThesis => "Project Thesis",
            Self::SeminarReport => "Seminar Report",
            Self::PreviousQuestionPaper => "Previous Question Paper",
        }
    }
}

impl std::fmt::Display for ResourceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Name an uploaded file is stored under: the last path component, with
/// every character outside `[A-Za-z0-9._-]` replaced by `_` and leading dots
/// removed
pub fn stored_file_name(original: &str) -> String {
    let base = original.rsplit(['/', '\\']).next().unwrap_or_default();

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        FALLBACK_FILE_NAME.to_string()
    } else {
        cleaned.to_string()
    }
}

/// A file uploaded to a subject
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    id: ResourceId,
    title: String,
    category: ResourceCategory,
    subject_id: SubjectId,
    uploader_id: UserId,
    /// Public URL of the stored file
    url: String,
    size: u64,
    created_at: DateTime<Utc>,
}

impl Resource {
    pub fn new(
        title: impl Into<String>,
        category: ResourceCategory,
        subject_id: SubjectId,
        uploader_id: UserId,
        url: impl Into<String>,
        size: u64,
    ) -> Self {
        Self {
            id: ResourceId::generate(),
            title: title.into(),
            category,
            subject_id,
            uploader_id,
            url: url.into(),
            size,
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> &ResourceId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn category(&self) -> ResourceCategory {
        self.category
    }

    pub fn subject_id(&self) -> &SubjectId {
        &self.subject_id
    }

    pub fn uploader_id(&self) -> &UserId {
        &self.uploader_id
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl StorageEntity for Resource {
    type Key = ResourceId;

    fn key(&self) -> &Self::Key {
        &self.id
    }
}
