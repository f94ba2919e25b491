//! Question bank upload endpoint

use axum::extract::{Multipart, Path, State};
use tracing::{debug, warn};

use super::parse_subject_id;
use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::ingestion::IngestionReport;
use crate::domain::subject::SchemeKind;
use crate::domain::DomainError;

const FILE_FIELD: &str = "qbfile";
const SCHEME_FIELD: &str = "scheme";

fn bad_upload(reason: impl std::fmt::Display) -> ApiError {
    warn!(reason = %reason, "Rejected question bank upload");
    ApiError::from(DomainError::ingestion(reason.to_string()))
}

/// POST /subjects/{subject_id}/question-bank
///
/// Multipart form with the workbook in `qbfile` and an optional `scheme`
/// overriding the subject's classification scheme.
pub async fn upload_question_bank(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(subject_id): Path<String>,
    mut multipart: Multipart,
) -> Result<Json<IngestionReport>, ApiError> {
    let subject_id = parse_subject_id(&subject_id)?;

    let mut file = None;
    let mut scheme = None;

    while let Some(field) = multipart.next_field().await.map_err(bad_upload)? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some(FILE_FIELD) => file = Some(field.bytes().await.map_err(bad_upload)?),
            Some(SCHEME_FIELD) => {
                let raw = field.text().await.map_err(bad_upload)?;
                if !raw.trim().is_empty() {
                    scheme = Some(SchemeKind::parse(&raw).ok_or_else(|| {
                        ApiError::bad_request(format!("Unknown scheme '{}'", raw.trim()))
                            .with_param(SCHEME_FIELD)
                    })?);
                }
            }
            _ => {}
        }
    }

    let file = file.ok_or_else(|| bad_upload("missing qbfile field"))?;
    debug!(subject_id = %subject_id, user_id = %user.id(), size = file.len(), "Question bank received");

    let report = state
        .question_bank_service
        .upload(&subject_id, scheme, file.to_vec())
        .await?;

    Ok(Json(report))
}
