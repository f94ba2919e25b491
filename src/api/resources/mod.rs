//! Teaching resource endpoints

use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use tracing::{debug, warn};

use super::middleware::RequireUser;
use super::state::AppState;
use super::types::{ApiError, Json};
use crate::domain::resource::{Resource, ResourceCategory, ResourceId};
use crate::domain::subject::SubjectId;
use crate::infrastructure::services::{
    CategoryInfo, CategoryListing, NewResource, SearchResults, RESOURCE_NOT_FOUND,
    SUBJECT_NOT_FOUND,
};

/// Largest accepted resource upload
const UPLOAD_LIMIT_BYTES: usize = 50 * 1024 * 1024;

const TITLE_FIELD: &str = "title";
const CATEGORY_FIELD: &str = "category";
const SUBJECT_FIELD: &str = "subject";
const FILE_FIELD: &str = "resourcefile";

pub fn create_resources_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(upload_resource).layer(DefaultBodyLimit::max(UPLOAD_LIMIT_BYTES)),
        )
        .route("/types", get(list_categories))
        .route("/types/{type_name}", get(list_by_type))
        .route("/search", get(search))
        .route("/{resource_id}", get(get_resource))
}

fn bad_upload(reason: impl std::fmt::Display) -> ApiError {
    warn!(reason = %reason, "Rejected resource upload");
    ApiError::bad_request(format!("Invalid resource upload: {}", reason))
}

fn missing(field: &'static str) -> ApiError {
    ApiError::bad_request(format!("Missing field '{}'", field)).with_param(field)
}

/// POST /resources
///
/// Multipart form with `title`, `category`, `subject` (subject id) and the
/// file in `resourcefile`.
pub async fn upload_resource(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<Resource>), ApiError> {
    let mut title = None;
    let mut category = None;
    let mut subject_id = None;
    let mut file = None;

    while let Some(field) = multipart.next_field().await.map_err(bad_upload)? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some(TITLE_FIELD) => title = Some(field.text().await.map_err(bad_upload)?),
            Some(CATEGORY_FIELD) => {
                let raw = field.text().await.map_err(bad_upload)?;
                category = Some(ResourceCategory::parse(&raw).ok_or_else(|| {
                    ApiError::bad_request(format!("Unknown resource category '{}'", raw.trim()))
                        .with_param(CATEGORY_FIELD)
                })?);
            }
            Some(SUBJECT_FIELD) => {
                let raw = field.text().await.map_err(bad_upload)?;
                subject_id = Some(
                    SubjectId::parse(&raw).map_err(|_| ApiError::not_found(SUBJECT_NOT_FOUND))?,
                );
            }
            Some(FILE_FIELD) => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await.map_err(bad_upload)?;
                file = Some((file_name, bytes));
            }
            _ => {}
        }
    }

    let (file_name, bytes) = file.ok_or_else(|| missing(FILE_FIELD))?;
    let request = NewResource {
        title: title.ok_or_else(|| missing(TITLE_FIELD))?,
        category: category.ok_or_else(|| missing(CATEGORY_FIELD))?,
        subject_id: subject_id.ok_or_else(|| missing(SUBJECT_FIELD))?,
        file_name,
        bytes: bytes.to_vec(),
    };

    debug!(user_id = %user.id(), subject_id = %request.subject_id, size = request.bytes.len(), "Resource received");

    let resource = state.resource_service.upload(&user, request).await?;

    Ok((StatusCode::CREATED, Json(resource)))
}

/// GET /resources/{resource_id}
pub async fn get_resource(
    State(state): State<AppState>,
    Path(resource_id): Path<String>,
) -> Result<Json<Resource>, ApiError> {
    let id = ResourceId::parse(&resource_id).map_err(|_| ApiError::not_found(RESOURCE_NOT_FOUND))?;
    let resource = state.resource_service.get(&id).await?;

    Ok(Json(resource))
}

/// GET /resources/types
pub async fn list_categories(State(state): State<AppState>) -> Json<Vec<CategoryInfo>> {
    Json(state.resource_service.categories())
}

/// GET /resources/types/{type_name}
pub async fn list_by_type(
    State(state): State<AppState>,
    Path(type_name): Path<String>,
) -> Result<Json<CategoryListing>, ApiError> {
    let listing = state.resource_service.list_by_type(&type_name).await?;
    Ok(Json(listing))
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub query: String,
}

/// GET /resources/search?query=...
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResults>, ApiError> {
    let results = state.resource_service.search(&params.query).await?;
    Ok(Json(results))
}
