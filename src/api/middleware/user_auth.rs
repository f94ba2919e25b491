//! Request-scoped actor extractors backed by JWT bearer tokens

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::user::{User, UserId};

/// Extractor that requires a valid JWT token
///
/// Extracts the JWT token from:
/// - Authorization header: `Bearer <jwt_token>`
#[derive(Debug, Clone)]
pub struct RequireUser(pub User);

/// Extractor for endpoints that also serve anonymous callers.
/// A missing or invalid token yields `None`.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<User>);

impl FromRequestParts<AppState> for RequireUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_jwt_token(&parts.headers)?;

        debug!("Validating JWT token");

        let user = resolve_user(&token, state).await?;
        Ok(RequireUser(user))
    }
}

impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = match extract_jwt_token(&parts.headers) {
            Ok(token) => resolve_user(&token, state).await.ok(),
            Err(_) => None,
        };

        Ok(MaybeUser(user))
    }
}

async fn resolve_user(token: &str, state: &AppState) -> Result<User, ApiError> {
    let claims = state.jwt_service.validate(token)?;

    let user_id = UserId::parse(claims.user_id())
        .map_err(|_| ApiError::unauthorized("Invalid token subject"))?;

    state
        .user_service
        .get(&user_id)
        .await?
        .ok_or_else(|| ApiError::unauthorized("User not found"))
}

/// Extract JWT token from Authorization header
pub fn extract_jwt_token(headers: &HeaderMap) -> Result<String, ApiError> {
    if let Some(auth_header) = headers.get(header::AUTHORIZATION) {
        let auth_str = auth_header
            .to_str()
            .map_err(|_| ApiError::bad_request("Invalid Authorization header encoding"))?;

        if let Some(token) = auth_str.strip_prefix("Bearer ") {
            return Ok(token.trim().to_string());
        }
    }

    Err(ApiError::unauthorized(
        "Authentication required. Provide JWT token via 'Authorization: Bearer <token>' header",
    ))
}
