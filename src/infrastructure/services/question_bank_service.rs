//! Question bank service - spreadsheet upload and ingestion

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, warn};

use super::subject_service::SUBJECT_NOT_FOUND;
use crate::domain::ingestion::{extract_row, IngestionReport, SheetRow, SkipReason, SpreadsheetReader};
use crate::domain::question::{Question, QuestionRepository};
use crate::domain::subject::{SchemeKind, SubjectId, SubjectRepository};
use crate::domain::DomainError;

const BAD_FILE: &str = "Some problem with the file";
const SCRATCH_FILE: &str = "qb.xlsx";

#[derive(Debug)]
pub struct QuestionBankService {
    subjects: Arc<dyn SubjectRepository>,
    questions: Arc<dyn QuestionRepository>,
    reader: Arc<dyn SpreadsheetReader>,
    scratch_dir: PathBuf,
}

impl QuestionBankService {
    pub fn new(
        subjects: Arc<dyn SubjectRepository>,
        questions: Arc<dyn QuestionRepository>,
        reader: Arc<dyn SpreadsheetReader>,
        scratch_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            subjects,
            questions,
            reader,
            scratch_dir: scratch_dir.into(),
        }
    }

    /// Ingests an uploaded workbook into the subject's question bank.
    ///
    /// The upload goes through a single scratch path, so concurrent uploads
    /// overwrite each other's file.
    pub async fn upload(
        &self,
        subject_id: &SubjectId,
        scheme: Option<SchemeKind>,
        bytes: Vec<u8>,
    ) -> Result<IngestionReport, DomainError> {
        let subject = self
            .subjects
            .get(subject_id)
            .await?
            .ok_or_else(|| DomainError::not_found(SUBJECT_NOT_FOUND))?;
        let scheme = scheme.unwrap_or(subject.scheme());

        info!(subject_id = %subject_id, scheme = %scheme, size = bytes.len(), "Uploading question bank");

        let path = self.scratch_dir.join(SCRATCH_FILE);
        tokio::fs::write(&path, &bytes).await.map_err(|e| {
            warn!(path = %path.display(), error = %e, "Could not write scratch workbook");
            DomainError::ingestion(BAD_FILE)
        })?;

        let reader = Arc::clone(&self.reader);
        let rows = tokio::task::spawn_blocking(move || reader.read_first_sheet(&path))
            .await
            .map_err(|e| DomainError::internal(format!("Spreadsheet reader failed: {}", e)))?
            .map_err(|e| {
                warn!(error = %e, "Could not read uploaded workbook");
                DomainError::ingestion(BAD_FILE)
            })?;

        self.ingest_rows(subject_id, scheme, rows).await
    }

    /// One store write per extracted row; failures are recorded, never fatal
    pub async fn ingest_rows(
        &self,
        subject_id: &SubjectId,
        scheme: SchemeKind,
        rows: Vec<SheetRow>,
    ) -> Result<IngestionReport, DomainError> {
        let mut report = IngestionReport::new(subject_id.clone());

        for row in rows {
            let extracted = match extract_row(scheme, &row.cells) {
                Ok(extracted) => extracted,
                Err(reason) => {
                    warn!(row = row.number, reason = %reason, "Skipping row");
                    report.skipped(row.number, reason.to_string());
                    continue;
                }
            };

            let question = Question::new(
                subject_id.clone(),
                extracted.text,
                extracted.module,
                extracted.classification,
            );

            match self.questions.create(question).await {
                Ok(question) => report.ingested(row.number, question.id().clone()),
                Err(e) => {
                    let reason = SkipReason::StoreFailed(e.to_string());
                    warn!(row = row.number, reason = %reason, "Skipping row");
                    report.skipped(row.number, reason.to_string());
                }
            }
        }

        info!(
            subject_id = %subject_id,
            created = report.created,
            skipped = report.skipped,
            "Ingested question bank"
        );

        Ok(report)
    }
}
