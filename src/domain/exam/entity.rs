//! Exam entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::question::QuestionId;
use crate::domain::storage::StorageEntity;
use crate::domain::subject::SubjectId;

crate::entity_id!(
    /// Exam identifier
    ExamId
);

/// An exam with its bound questions and generated paper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exam {
    id: ExamId,
    name: String,
    total_marks: u32,
    time: String,
    subject_id: SubjectId,
    #[serde(default)]
    question_ids: Vec<QuestionId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    question_paper: Option<String>,
    created_at: DateTime<Utc>,
}

impl Exam {
    pub fn new(
        subject_id: SubjectId,
        name: impl Into<String>,
        total_marks: u32,
        time: impl Into<String>,
    ) -> Self {
        Self {
            id: ExamId::generate(),
            name: name.into(),
            total_marks,
            time: time.into(),
            subject_id,
            question_ids: Vec::new(),
            question_paper: None,
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> &ExamId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn total_marks(&self) -> u32 {
        self.total_marks
    }

    pub fn time(&self) -> &str {
        &self.time
    }

    pub fn subject_id(&self) -> &SubjectId {
        &self.subject_id
    }

    /// Bound questions in the order they were first added
    pub fn question_ids(&self) -> &[QuestionId] {
        &self.question_ids
    }

    pub fn question_paper(&self) -> Option<&str> {
        self.question_paper.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Binds a question; returns false if it was already bound
    pub fn add_question(&mut self, question_id: QuestionId) -> bool {
        if self.question_ids.contains(&question_id) {
            return false;
        }
        self.question_ids.push(question_id);
        true
    }

    pub fn set_question_paper(&mut self, url: impl Into<String>) {
        self.question_paper = Some(url.into());
    }
}

impl StorageEntity for Exam {
    type Key = ExamId;

    fn key(&self) -> &Self::Key {
        &self.id
    }
}
