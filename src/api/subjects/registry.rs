//! Subject registry, subscription and staff roster endpoints

use axum::{
    extract::{rejection::FormRejection, Path, State},
    http::StatusCode,
    Form,
};
use serde::Deserialize;
use tracing::{debug, warn};

use super::parse_subject_id;
use crate::api::middleware::{MaybeUser, RequireUser};
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::subject::{SchemeKind, Subject};
use crate::infrastructure::services::{CreateSubjectRequest, DepartmentStaff, SubjectView};

const STAFF_FIELD: &str = "staff";

#[derive(Debug, Deserialize)]
pub struct CreateSubjectApiRequest {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub credit: u32,
    #[serde(default)]
    pub course: String,
    #[serde(default)]
    pub semester: u32,
    /// `mark` (default) or `part`
    #[serde(default)]
    pub scheme: Option<String>,
}

/// POST /subjects
pub async fn create_subject(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(request): Json<CreateSubjectApiRequest>,
) -> Result<(StatusCode, Json<Subject>), ApiError> {
    debug!(code = %request.code, user_id = %user.id(), "Creating subject");

    let scheme = match request.scheme.as_deref() {
        None | Some("") => None,
        Some(raw) => Some(SchemeKind::parse(raw).ok_or_else(|| {
            ApiError::bad_request(format!("Unknown scheme '{}'", raw)).with_param("scheme")
        })?),
    };

    let subject = state
        .subject_service
        .create(
            &user,
            CreateSubjectRequest {
                code: request.code,
                name: request.name,
                credit: request.credit,
                course: request.course,
                semester: request.semester,
                scheme,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(subject)))
}

/// GET /subjects/mine
///
/// Teaching staff get the subjects they teach, everyone else their
/// subscriptions.
pub async fn my_subjects(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<Json<Vec<Subject>>, ApiError> {
    let subjects = state.subject_service.my_subjects(&user).await?;
    Ok(Json(subjects))
}

/// GET /subjects/{subject_id}
pub async fn view_subject(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Path(subject_id): Path<String>,
) -> Result<Json<SubjectView>, ApiError> {
    let subject_id = parse_subject_id(&subject_id)?;
    let view = state.subject_service.view(&subject_id, user.as_ref()).await?;

    Ok(Json(view))
}

/// POST /subjects/{subject_id}
pub async fn reject_view_post() -> ApiError {
    ApiError::method_not_allowed("POST Method not supported.")
}

/// POST /subjects/{subject_id}/subscribe
pub async fn subscribe(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(subject_id): Path<String>,
) -> Result<Json<Subject>, ApiError> {
    let subject_id = parse_subject_id(&subject_id)?;
    let subject = state.subject_service.subscribe(&user, &subject_id).await?;

    Ok(Json(subject))
}

/// POST /subjects/{subject_id}/unsubscribe
pub async fn unsubscribe(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(subject_id): Path<String>,
) -> Result<Json<Subject>, ApiError> {
    let subject_id = parse_subject_id(&subject_id)?;
    let subject = state.subject_service.unsubscribe(&user, &subject_id).await?;

    Ok(Json(subject))
}

/// GET /subjects/{subject_id}/staff/candidates
pub async fn staff_candidates(
    State(state): State<AppState>,
    RequireUser(_user): RequireUser,
    Path(subject_id): Path<String>,
) -> Result<Json<Vec<DepartmentStaff>>, ApiError> {
    let subject_id = parse_subject_id(&subject_id)?;
    // 404 for an unknown subject before listing anyone
    state.subject_service.view(&subject_id, None).await?;

    Ok(Json(state.subject_service.staff_candidates().await?))
}

/// Selected staff ids from a urlencoded `staff=<id>&staff=<id>` body.
/// An unreadable body selects nobody, which the service rejects after its
/// HOD check.
fn staff_selection(form: Result<Form<Vec<(String, String)>>, FormRejection>) -> Vec<String> {
    match form {
        Ok(Form(fields)) => fields
            .into_iter()
            .filter(|(name, _)| name == STAFF_FIELD)
            .map(|(_, value)| value)
            .collect(),
        Err(rejection) => {
            warn!(error = %rejection, "Unreadable staff form");
            Vec::new()
        }
    }
}

/// POST /subjects/{subject_id}/staff/assign
pub async fn assign_staff(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(subject_id): Path<String>,
    form: Result<Form<Vec<(String, String)>>, FormRejection>,
) -> Result<Json<Subject>, ApiError> {
    let subject_id = parse_subject_id(&subject_id)?;
    let staff = staff_selection(form);
    debug!(subject_id = %subject_id, count = staff.len(), "Assigning staff");

    let subject = state
        .subject_service
        .assign_staff(&user, &subject_id, &staff)
        .await?;

    Ok(Json(subject))
}

/// POST /subjects/{subject_id}/staff/remove
pub async fn remove_staff(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(subject_id): Path<String>,
    form: Result<Form<Vec<(String, String)>>, FormRejection>,
) -> Result<Json<Subject>, ApiError> {
    let subject_id = parse_subject_id(&subject_id)?;
    let staff = staff_selection(form);
    debug!(subject_id = %subject_id, count = staff.len(), "Removing staff");

    let subject = state
        .subject_service
        .remove_staff(&user, &subject_id, &staff)
        .await?;

    Ok(Json(subject))
}
