//! Question store queries

use serde::{Deserialize, Serialize};

use super::entity::{Classification, Mark, Question};
use crate::domain::subject::SubjectId;

/// Classifier constraint of a query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionFilter {
    Mark(Mark),
    Part { part: String, level: String },
}

/// Selects the questions of one subject and module matching a classifier
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionQuery {
    pub subject_id: SubjectId,
    pub module: String,
    pub filter: QuestionFilter,
}

impl QuestionQuery {
    pub fn new(subject_id: SubjectId, module: impl Into<String>, filter: QuestionFilter) -> Self {
        Self {
            subject_id,
            module: module.into(),
            filter,
        }
    }

    pub fn matches(&self, question: &Question) -> bool {
        if question.subject_id() != &self.subject_id || question.module() != self.module {
            return false;
        }

        match (&self.filter, question.classification()) {
            (QuestionFilter::Mark(wanted), Classification::Marked { mark }) => wanted == mark,
            (
                QuestionFilter::Part { part, level },
                Classification::Sectioned {
                    part: q_part,
                    level: q_level,
                    ..
                },
            ) => part == q_part && level == q_level,
            _ => false,
        }
    }
}
