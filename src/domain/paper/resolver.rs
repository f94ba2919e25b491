//! Criteria resolution: query, sample, group

use std::sync::Arc;

use rand::Rng;
use tracing::debug;

use super::criterion::Criterion;
use super::sampler::sample;
use super::scheme::ClassificationScheme;
use super::selection::SectionedSelection;
use crate::domain::question::QuestionRepository;
use crate::domain::subject::SubjectId;
use crate::domain::DomainError;

/// Turns criteria into a sectioned selection of sampled questions
#[derive(Debug, Clone)]
pub struct CriteriaResolver {
    questions: Arc<dyn QuestionRepository>,
}

impl CriteriaResolver {
    pub fn new(questions: Arc<dyn QuestionRepository>) -> Self {
        Self { questions }
    }

    /// Fails when any criterion does not fit the scheme, without touching
    /// the question store
    pub fn check(
        &self,
        subject_id: &SubjectId,
        scheme: &dyn ClassificationScheme,
        criteria: &[Criterion],
    ) -> Result<(), DomainError> {
        for criterion in criteria {
            scheme.query(subject_id, criterion)?;
            scheme.section_label(criterion)?;
        }

        Ok(())
    }

    /// Processes criteria in order. A criterion with no candidates yields
    /// an empty contribution; questions are not deduplicated across criteria.
    pub async fn resolve<R>(
        &self,
        subject_id: &SubjectId,
        scheme: &dyn ClassificationScheme,
        criteria: &[Criterion],
        rng: &mut R,
    ) -> Result<SectionedSelection, DomainError>
    where
        R: Rng + Send,
    {
        let mut selection = SectionedSelection::new();

        for criterion in criteria {
            let query = scheme.query(subject_id, criterion)?;
            let label = scheme.section_label(criterion)?;
            let pool = self.questions.find(&query).await?;
            let pool_size = pool.len();
            let picked = sample(pool, criterion.count, rng);

            debug!(
                module = %criterion.module,
                section = %label,
                requested = criterion.count,
                pool_size,
                picked = picked.len(),
                "Resolved criterion"
            );

            selection.extend(&label, picked);
        }

        Ok(selection)
    }
}
