//! Authentication API endpoints
//!
//! Sign-up, sign-in and current-user lookup for JWT bearer authentication.

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Router,
};
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::user::{User, UserRole};
use crate::infrastructure::user::CreateUserRequest;

/// Create the authentication router
pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/sign-up", post(sign_up))
        .route("/sign-in", post(sign_in))
        .route("/me", get(get_current_user))
}

#[derive(Debug, Deserialize)]
pub struct SignUpRequest {
    pub username: String,
    pub password: String,
    pub name: String,
    pub department: String,
    /// Defaults to `student`
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserResponse,
    pub expires_at: String,
}

/// User response (safe to expose)
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub name: String,
    pub role: UserRole,
    pub department: String,
    pub created_at: String,
    pub last_login_at: Option<String>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            username: user.username().to_string(),
            name: user.name().to_string(),
            role: user.role(),
            department: user.department().to_string(),
            created_at: user.created_at().to_rfc3339(),
            last_login_at: user.last_login_at().map(|t| t.to_rfc3339()),
        }
    }
}

fn issue_token(state: &AppState, user: &User) -> Result<AuthResponse, ApiError> {
    let token = state.jwt_service.generate(user)?;
    let expires_at = Utc::now() + Duration::hours(state.jwt_service.expiration_hours() as i64);

    Ok(AuthResponse {
        token,
        user: UserResponse::from(user),
        expires_at: expires_at.to_rfc3339(),
    })
}

/// POST /auth/sign-up
pub async fn sign_up(
    State(state): State<AppState>,
    Json(request): Json<SignUpRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    debug!(username = %request.username, "Signing up");

    let role = match request.role.as_deref() {
        None | Some("") => UserRole::default(),
        Some(raw) => UserRole::parse(raw)
            .ok_or_else(|| ApiError::bad_request(format!("Unknown role '{}'", raw)).with_param("role"))?,
    };

    let user = state
        .user_service
        .sign_up(CreateUserRequest {
            username: request.username,
            password: request.password,
            name: request.name,
            department: request.department,
            role,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(issue_token(&state, &user)?)))
}

/// POST /auth/sign-in
pub async fn sign_in(
    State(state): State<AppState>,
    Json(request): Json<SignInRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    debug!(username = %request.username, "Signing in");

    let user = state
        .user_service
        .authenticate(&request.username, &request.password)
        .await?;

    Ok(Json(issue_token(&state, &user)?))
}

/// GET /auth/me
pub async fn get_current_user(RequireUser(user): RequireUser) -> Json<UserResponse> {
    Json(UserResponse::from(&user))
}
