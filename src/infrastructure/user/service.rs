//! User service for sign-up, sign-in and account provisioning

use std::sync::Arc;

use tracing::info;

use crate::domain::user::{
    validate_full_name, validate_password, validate_username, User, UserId, UserRepository,
    UserRole,
};
use crate::domain::DomainError;

use super::password::PasswordHasher;

const BAD_CREDENTIALS: &str = "Incorrect username or password";

/// Request for creating a new user
#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    pub name: String,
    pub department: String,
    pub role: UserRole,
}

#[derive(Debug)]
pub struct UserService<R: UserRepository, H: PasswordHasher> {
    repository: Arc<R>,
    hasher: Arc<H>,
}

impl<R: UserRepository, H: PasswordHasher> UserService<R, H> {
    pub fn new(repository: Arc<R>, hasher: Arc<H>) -> Self {
        Self { repository, hasher }
    }

    /// Self sign-up; only student, faculty and lab staff roles may be chosen
    pub async fn sign_up(&self, request: CreateUserRequest) -> Result<User, DomainError> {
        if !request.role.is_self_assignable() {
            return Err(DomainError::validation(format!(
                "The '{}' role cannot be chosen at sign-up",
                request.role
            )));
        }

        self.create(request).await
    }

    /// Creates an account with any role (used for provisioning)
    pub async fn create(&self, request: CreateUserRequest) -> Result<User, DomainError> {
        validate_username(&request.username).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_password(&request.password).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_full_name(&request.name).map_err(|e| DomainError::validation(e.to_string()))?;

        let department = request.department.trim();
        if department.is_empty() {
            return Err(DomainError::validation("Department cannot be empty"));
        }

        if self.repository.username_exists(&request.username).await? {
            return Err(DomainError::conflict("Username already in use"));
        }

        let password_hash = self.hasher.hash(&request.password)?;
        let user = User::new(
            &request.username,
            request.name.trim(),
            password_hash,
            request.role,
            department,
        );

        let user = self.repository.create(user).await?;
        info!(user_id = %user.id(), role = %user.role(), "Created user");

        Ok(user)
    }

    /// Verifies credentials; unknown users and wrong passwords fail alike
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<User, DomainError> {
        let mut user = self
            .repository
            .get_by_username(username)
            .await?
            .ok_or_else(|| DomainError::unauthorized(BAD_CREDENTIALS))?;

        if !self.hasher.verify(password, user.password_hash()) {
            return Err(DomainError::unauthorized(BAD_CREDENTIALS));
        }

        user.record_login();
        self.repository.update(user).await
    }

    pub async fn get(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        self.repository.get(id).await
    }

    pub async fn get_required(&self, id: &UserId) -> Result<User, DomainError> {
        self.get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("User '{}' not found", id)))
    }

    pub async fn list(&self) -> Result<Vec<User>, DomainError> {
        self.repository.list().await
    }
}
