//! Classification schemes
//!
//! A scheme decides how a criterion turns into a question store query and
//! which exam section its questions land in. Subjects pick one scheme for
//! their bank; a generation request may override it.

use std::fmt::Debug;

use super::criterion::{Classifier, Criterion};
use super::selection::{PART_A, PART_B, PART_C};
use crate::domain::question::{QuestionFilter, QuestionQuery};
use crate::domain::subject::{SchemeKind, SubjectId};
use crate::domain::DomainError;

/// Lowest mark that lands in Part C
pub const PART_C_MIN_MARK: f64 = 7.0;
/// Lowest mark that lands in Part B
pub const PART_B_MIN_MARK: f64 = 5.0;

pub trait ClassificationScheme: Send + Sync + Debug {
    fn kind(&self) -> SchemeKind;

    /// Builds the store query for a criterion of this scheme
    fn query(
        &self,
        subject_id: &SubjectId,
        criterion: &Criterion,
    ) -> Result<QuestionQuery, DomainError>;

    /// Section the criterion's questions belong to
    fn section_label(&self, criterion: &Criterion) -> Result<String, DomainError>;
}

fn mismatch(kind: SchemeKind, criterion: &Criterion) -> DomainError {
    DomainError::validation(format!(
        "Criterion for module '{}' does not use the {} scheme",
        criterion.module, kind
    ))
}

/// Sections by mark thresholds
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkScheme;

impl ClassificationScheme for MarkScheme {
    fn kind(&self) -> SchemeKind {
        SchemeKind::Mark
    }

    fn query(
        &self,
        subject_id: &SubjectId,
        criterion: &Criterion,
    ) -> Result<QuestionQuery, DomainError> {
        match &criterion.classifier {
            Classifier::Mark(mark) => Ok(QuestionQuery::new(
                subject_id.clone(),
                criterion.module.clone(),
                QuestionFilter::Mark(*mark),
            )),
            Classifier::Part { .. } => Err(mismatch(self.kind(), criterion)),
        }
    }

    fn section_label(&self, criterion: &Criterion) -> Result<String, DomainError> {
        match &criterion.classifier {
            Classifier::Mark(mark) if mark.value() >= PART_C_MIN_MARK => Ok(PART_C.to_string()),
            Classifier::Mark(mark) if mark.value() >= PART_B_MIN_MARK => Ok(PART_B.to_string()),
            Classifier::Mark(_) => Ok(PART_A.to_string()),
            Classifier::Part { .. } => Err(mismatch(self.kind(), criterion)),
        }
    }
}

/// Sections named by the question's own part code
#[derive(Debug, Clone, Copy, Default)]
pub struct PartScheme;

impl ClassificationScheme for PartScheme {
    fn kind(&self) -> SchemeKind {
        SchemeKind::Part
    }

    fn query(
        &self,
        subject_id: &SubjectId,
        criterion: &Criterion,
    ) -> Result<QuestionQuery, DomainError> {
        match &criterion.classifier {
            Classifier::Part { part, level } => Ok(QuestionQuery::new(
                subject_id.clone(),
                criterion.module.clone(),
                QuestionFilter::Part {
                    part: part.clone(),
                    level: level.clone(),
                },
            )),
            Classifier::Mark(_) => Err(mismatch(self.kind(), criterion)),
        }
    }

    fn section_label(&self, criterion: &Criterion) -> Result<String, DomainError> {
        match &criterion.classifier {
            Classifier::Part { part, .. } => Ok(format!("Part {}", part)),
            Classifier::Mark(_) => Err(mismatch(self.kind(), criterion)),
        }
    }
}

static MARK_SCHEME: MarkScheme = MarkScheme;
static PART_SCHEME: PartScheme = PartScheme;

/// Scheme implementation for a scheme kind
pub fn scheme_for(kind: SchemeKind) -> &'static dyn ClassificationScheme {
    match kind {
        SchemeKind::Mark => &MARK_SCHEME,
        SchemeKind::Part => &PART_SCHEME,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::question::Mark;

    fn label(mark: f64) -> String {
        MarkScheme
            .section_label(&Criterion::by_mark("Trees", Mark::new(mark), 1))
            .unwrap()
    }

    #[test]
    fn test_mark_thresholds() {
        assert_eq!(label(7.0), "Part C");
        assert_eq!(label(7.5), "Part C");
        assert_eq!(label(15.0), "Part C");
        assert_eq!(label(5.0), "Part B");
        assert_eq!(label(6.5), "Part B");
        assert_eq!(label(3.0), "Part A");
        assert_eq!(label(0.5), "Part A");
    }

    #[test]
    fn test_part_label() {
        let criterion = Criterion::by_part("Memory", "D", "L1", 2);
        assert_eq!(PartScheme.section_label(&criterion).unwrap(), "Part D");
    }

    #[test]
    fn test_part_query_carries_level() {
        let subject = SubjectId::generate();
        let criterion = Criterion::by_part("Memory", "B", "L2", 2);
        let query = PartScheme.query(&subject, &criterion).unwrap();

        assert_eq!(query.module, "Memory");
        assert_eq!(
            query.filter,
            QuestionFilter::Part {
                part: "B".into(),
                level: "L2".into()
            }
        );
    }

    #[test]
    fn test_classifier_mismatch_is_validation_error() {
        let subject = SubjectId::generate();
        let part_criterion = Criterion::by_part("Memory", "B", "L2", 2);
        let mark_criterion = Criterion::by_mark("Memory", Mark::new(5.0), 2);

        assert!(matches!(
            MarkScheme.query(&subject, &part_criterion),
            Err(DomainError::Validation { .. })
        ));
        assert!(matches!(
            PartScheme.section_label(&mark_criterion),
            Err(DomainError::Validation { .. })
        ));
    }

    #[test]
    fn test_scheme_for() {
        assert_eq!(scheme_for(SchemeKind::Mark).kind(), SchemeKind::Mark);
        assert_eq!(scheme_for(SchemeKind::Part).kind(), SchemeKind::Part);
    }
}
