//! Question entity and classification values

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::storage::StorageEntity;
use crate::domain::subject::SubjectId;

crate::entity_id!(
    /// Question identifier
    QuestionId
);

/// Point value of a question; may be fractional
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Mark(f64);

impl Mark {
    pub fn new(value: f64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// Parses a mark as typed in a form or spreadsheet cell
    pub fn parse(value: &str) -> Option<Self> {
        value
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(Self)
    }
}

impl std::fmt::Display for Mark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.fract() == 0.0 {
            write!(f, "{}", self.0 as i64)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// How a question is categorised inside its subject's bank
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "scheme", rename_all = "lowercase")]
pub enum Classification {
    #[serde(rename = "mark")]
    Marked { mark: Mark },
    #[serde(rename = "part")]
    Sectioned {
        part: String,
        co: String,
        level: String,
    },
}

/// A single question from a subject's question bank
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    id: QuestionId,
    subject_id: SubjectId,
    text: String,
    module: String,
    classification: Classification,
    created_at: DateTime<Utc>,
}

impl Question {
    pub fn new(
        subject_id: SubjectId,
        text: impl Into<String>,
        module: impl Into<String>,
        classification: Classification,
    ) -> Self {
        Self {
            id: QuestionId::generate(),
            subject_id,
            text: text.into(),
            module: module.into(),
            classification,
            created_at: Utc::now(),
        }
    }

    pub fn marked(
        subject_id: SubjectId,
        text: impl Into<String>,
        module: impl Into<String>,
        mark: Mark,
    ) -> Self {
        Self::new(subject_id, text, module, Classification::Marked { mark })
    }

    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    pub fn subject_id(&self) -> &SubjectId {
        &self.subject_id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn classification(&self) -> &Classification {
        &self.classification
    }

    pub fn mark(&self) -> Option<Mark> {
        match &self.classification {
            Classification::Marked { mark } => Some(*mark),
            Classification::Sectioned { .. } => None,
        }
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl StorageEntity for Question {
    type Key = QuestionId;

    fn key(&self) -> &Self::Key {
        &self.id
    }
}
