//! Per-upload ingestion report

use serde::Serialize;

use crate::domain::question::QuestionId;
use crate::domain::subject::SubjectId;

/// What happened to one spreadsheet row
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum RowOutcome {
    Ingested { row: usize, question_id: QuestionId },
    Skipped { row: usize, reason: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct IngestionReport {
    pub subject_id: SubjectId,
    pub created: usize,
    pub skipped: usize,
    pub rows: Vec<RowOutcome>,
}

impl IngestionReport {
    pub fn new(subject_id: SubjectId) -> Self {
        Self {
            subject_id,
            created: 0,
            skipped: 0,
            rows: Vec::new(),
        }
    }

    /// `row` is 1-based, as shown by spreadsheet programs
    pub fn ingested(&mut self, row: usize, question_id: QuestionId) {
        self.created += 1;
        self.rows.push(RowOutcome::Ingested { row, question_id });
    }

    pub fn skipped(&mut self, row: usize, reason: impl Into<String>) {
        self.skipped += 1;
        self.rows.push(RowOutcome::Skipped {
            row,
            reason: reason.into(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_follow_outcomes() {
        let mut report = IngestionReport::new(SubjectId::generate());
        report.ingested(1, QuestionId::generate());
        report.skipped(2, "mark 'abc' is not a number");
        report.ingested(3, QuestionId::generate());

        assert_eq!(report.created, 2);
        assert_eq!(report.skipped, 1);
        assert_eq!(
            report.rows[1],
            RowOutcome::Skipped {
                row: 2,
                reason: "mark 'abc' is not a number".into()
            }
        );
    }
}
