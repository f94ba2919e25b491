//! Paper service - question paper generation

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::info;

use super::subject_service::SUBJECT_NOT_FOUND;
use crate::domain::exam::{Exam, ExamId, ExamRepository};
use crate::domain::paper::{
    artifact_stem, scheme_for, ArtifactStore, CriteriaResolver, Criterion, DocumentRenderer,
    PaperDocument, SectionAssembler, WrapRule,
};
use crate::domain::subject::{SchemeKind, SubjectId, SubjectRepository};
use crate::domain::DomainError;

pub const NO_QUESTIONS_CHOSEN: &str = "Choose some questions.";

#[derive(Debug, Clone)]
pub struct PaperSettings {
    pub institution: String,
    pub wrap: WrapRule,
    /// Fixed sampling seed; entropy when unset
    pub seed: Option<u64>,
}

impl Default for PaperSettings {
    fn default() -> Self {
        Self {
            institution: "Department of Computer Science".to_string(),
            wrap: WrapRule::default(),
            seed: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GeneratePaperRequest {
    pub exam_name: String,
    pub total_marks: u32,
    pub time: String,
    pub scheme: Option<SchemeKind>,
    pub criteria: Vec<Criterion>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GeneratedPaper {
    pub exam_id: ExamId,
    /// 1 when at least one question was selected
    pub status: u8,
    pub url: String,
}

#[derive(Debug)]
pub struct PaperService {
    subjects: Arc<dyn SubjectRepository>,
    exams: Arc<dyn ExamRepository>,
    resolver: CriteriaResolver,
    assembler: SectionAssembler,
    renderer: Arc<dyn DocumentRenderer>,
    artifacts: Arc<dyn ArtifactStore>,
    settings: PaperSettings,
}

impl PaperService {
    pub fn new(
        subjects: Arc<dyn SubjectRepository>,
        exams: Arc<dyn ExamRepository>,
        resolver: CriteriaResolver,
        renderer: Arc<dyn DocumentRenderer>,
        artifacts: Arc<dyn ArtifactStore>,
        settings: PaperSettings,
    ) -> Self {
        Self {
            subjects,
            assembler: SectionAssembler::new(Arc::clone(&exams)),
            exams,
            resolver,
            renderer,
            artifacts,
            settings,
        }
    }

    fn rng(&self) -> StdRng {
        match self.settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Creates an exam, samples its questions, renders the paper and stores it.
    /// An empty selection still produces a document.
    pub async fn generate(
        &self,
        subject_id: &SubjectId,
        request: GeneratePaperRequest,
    ) -> Result<GeneratedPaper, DomainError> {
        if request.criteria.is_empty() {
            return Err(DomainError::validation(NO_QUESTIONS_CHOSEN));
        }

        let subject = self
            .subjects
            .get(subject_id)
            .await?
            .ok_or_else(|| DomainError::not_found(SUBJECT_NOT_FOUND))?;

        let scheme = scheme_for(request.scheme.unwrap_or(subject.scheme()));
        self.resolver.check(subject_id, scheme, &request.criteria)?;

        let exam = self
            .exams
            .create(Exam::new(
                subject_id.clone(),
                request.exam_name,
                request.total_marks,
                request.time,
            ))
            .await?;

        info!(
            subject_id = %subject_id,
            exam_id = %exam.id(),
            scheme = %scheme.kind(),
            criteria = request.criteria.len(),
            "Generating question paper"
        );

        let mut rng = self.rng();
        let selection = self
            .resolver
            .resolve(subject_id, scheme, &request.criteria, &mut rng)
            .await?;
        let paper = self.assembler.assemble(exam.id(), selection).await?;

        let document = PaperDocument::compose(
            &self.settings.institution,
            &subject,
            &exam,
            &paper,
            self.settings.wrap,
        );
        let stem = artifact_stem(subject.name(), chrono::Local::now().date_naive());
        let bytes = self.renderer.render(&document, &stem).await?;

        let file_name = format!("{}.{}", stem, self.renderer.format().extension());
        let url = self.artifacts.store(&file_name, bytes).await?;
        let exam = self.exams.attach_paper(exam.id(), &url).await?;

        info!(exam_id = %exam.id(), url = %url, items = document.item_count(), "Question paper ready");

        Ok(GeneratedPaper {
            exam_id: exam.id().clone(),
            status: paper.status.as_flag(),
            url,
        })
    }

    /// An exam of the given subject
    pub async fn get_exam(
        &self,
        subject_id: &SubjectId,
        exam_id: &ExamId,
    ) -> Result<Exam, DomainError> {
        self.exams
            .get(exam_id)
            .await?
            .filter(|exam| exam.subject_id() == subject_id)
            .ok_or_else(|| DomainError::not_found(format!("Exam '{}' not found", exam_id)))
    }
}
