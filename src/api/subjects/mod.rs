//! Subject endpoints: registry, roster, question bank and papers

pub mod papers;
pub mod question_bank;
pub mod registry;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use super::state::AppState;
use super::types::ApiError;
use crate::domain::subject::SubjectId;
use crate::infrastructure::services::SUBJECT_NOT_FOUND;

/// Largest accepted question bank upload
const UPLOAD_LIMIT_BYTES: usize = 10 * 1024 * 1024;

/// Create the subject router
pub fn create_subjects_router() -> Router<AppState> {
    Router::new()
        .route("/", post(registry::create_subject))
        .route("/mine", get(registry::my_subjects))
        .route(
            "/{subject_id}",
            get(registry::view_subject).post(registry::reject_view_post),
        )
        .route("/{subject_id}/subscribe", post(registry::subscribe))
        .route("/{subject_id}/unsubscribe", post(registry::unsubscribe))
        .route("/{subject_id}/staff/candidates", get(registry::staff_candidates))
        .route("/{subject_id}/staff/assign", post(registry::assign_staff))
        .route("/{subject_id}/staff/remove", post(registry::remove_staff))
        .route(
            "/{subject_id}/question-bank",
            post(question_bank::upload_question_bank).layer(DefaultBodyLimit::max(UPLOAD_LIMIT_BYTES)),
        )
        .route("/{subject_id}/papers", post(papers::generate_paper))
        .route("/{subject_id}/exams/{exam_id}", get(papers::get_exam))
}

/// A subject id that does not parse names no subject
pub(crate) fn parse_subject_id(raw: &str) -> Result<SubjectId, ApiError> {
    SubjectId::parse(raw).map_err(|_| ApiError::not_found(SUBJECT_NOT_FOUND))
}
