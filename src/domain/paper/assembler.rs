//! Section assembly and exam binding

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use super::selection::{Section, SectionedSelection, CANONICAL_SECTIONS};
use crate::domain::exam::{ExamId, ExamRepository};
use crate::domain::DomainError;

/// Whether anything was selected for the paper
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AssemblyStatus {
    Empty,
    Populated,
}

impl AssemblyStatus {
    /// Numeric form reported to clients (0 or 1)
    pub fn as_flag(&self) -> u8 {
        match self {
            Self::Empty => 0,
            Self::Populated => 1,
        }
    }
}

/// Sections in print order, ready for rendering
#[derive(Debug, Clone, Serialize)]
pub struct AssembledPaper {
    pub sections: Vec<Section>,
    pub status: AssemblyStatus,
    /// Questions newly bound to the exam
    pub bound: usize,
}

impl AssembledPaper {
    pub fn section(&self, label: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.label == label)
    }
}

#[derive(Debug, Clone)]
pub struct SectionAssembler {
    exams: Arc<dyn ExamRepository>,
}

impl SectionAssembler {
    pub fn new(exams: Arc<dyn ExamRepository>) -> Self {
        Self { exams }
    }

    /// Binds every selected question to the exam and orders the sections:
    /// Part A, Part B, Part C (always present), then other labels as first seen.
    pub async fn assemble(
        &self,
        exam_id: &ExamId,
        selection: SectionedSelection,
    ) -> Result<AssembledPaper, DomainError> {
        let status = if selection.is_empty() {
            AssemblyStatus::Empty
        } else {
            AssemblyStatus::Populated
        };

        let mut bound = 0;
        for section in selection.sections() {
            for question in &section.questions {
                if self.exams.add_question(exam_id, question.id()).await? {
                    bound += 1;
                }
            }
        }

        let mut remaining = selection.into_sections();
        let mut sections = Vec::with_capacity(remaining.len().max(CANONICAL_SECTIONS.len()));

        for label in CANONICAL_SECTIONS {
            match remaining.iter().position(|s| s.label == label) {
                Some(index) => sections.push(remaining.remove(index)),
                None => sections.push(Section::new(label)),
            }
        }
        sections.extend(remaining);

        info!(exam_id = %exam_id, bound, status = ?status, "Assembled question paper");

        Ok(AssembledPaper {
            sections,
            status,
            bound,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::exam::Exam;
    use crate::domain::question::{Mark, Question};
    use crate::domain::subject::SubjectId;
    use crate::infrastructure::exam::StorageExamRepository;
    use crate::infrastructure::storage::InMemoryStorage;

    async fn setup() -> (Arc<dyn ExamRepository>, Exam) {
        let repo: Arc<dyn ExamRepository> = Arc::new(StorageExamRepository::new(Arc::new(
            InMemoryStorage::<Exam>::new(),
        )));
        let exam = repo
            .create(Exam::new(SubjectId::generate(), "Series Test", 50, "2 Hours"))
            .await
            .unwrap();
        (repo, exam)
    }

    fn question(text: &str) -> Question {
        Question::marked(SubjectId::generate(), text, "Trees", Mark::new(3.0))
    }

    #[tokio::test]
    async fn test_canonical_order_and_extra_sections() {
        let (repo, exam) = setup().await;
        let assembler = SectionAssembler::new(repo);

        let mut selection = SectionedSelection::new();
        selection.extend("Part D", vec![question("d")]);
        selection.extend("Part B", vec![question("b")]);

        let paper = assembler.assemble(exam.id(), selection).await.unwrap();
        let labels: Vec<_> = paper.sections.iter().map(|s| s.label.as_str()).collect();

        assert_eq!(labels, vec!["Part A", "Part B", "Part C", "Part D"]);
        assert!(paper.section("Part A").unwrap().is_empty());
        assert_eq!(paper.status, AssemblyStatus::Populated);
        assert_eq!(paper.status.as_flag(), 1);
    }

    #[tokio::test]
    async fn test_binding_is_idempotent() {
        let (repo, exam) = setup().await;
        let assembler = SectionAssembler::new(repo.clone());

        let shared = question("shared");
        let mut selection = SectionedSelection::new();
        selection.extend("Part A", vec![shared.clone(), question("other")]);
        selection.extend("Part B", vec![shared.clone()]);

        let paper = assembler.assemble(exam.id(), selection).await.unwrap();
        assert_eq!(paper.bound, 2);

        let stored = repo.get(exam.id()).await.unwrap().unwrap();
        assert_eq!(stored.question_ids().len(), 2);
        assert_eq!(&stored.question_ids()[0], shared.id());
    }

    #[tokio::test]
    async fn test_empty_selection_reports_empty_status() {
        let (repo, exam) = setup().await;
        let assembler = SectionAssembler::new(repo);

        let paper = assembler
            .assemble(exam.id(), SectionedSelection::new())
            .await
            .unwrap();

        assert_eq!(paper.status.as_flag(), 0);
        assert_eq!(paper.sections.len(), 3);
    }
}
