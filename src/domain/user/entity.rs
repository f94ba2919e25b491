//! User entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::storage::StorageEntity;

crate::entity_id!(
    /// User identifier
    UserId
);

/// Role a user holds in the department
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    Student,
    Faculty,
    Labstaff,
    Hod,
    Administrator,
}

impl UserRole {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "student" => Some(Self::Student),
            "faculty" | "teacher" => Some(Self::Faculty),
            "labstaff" | "lab-staff" | "lab_staff" => Some(Self::Labstaff),
            "hod" => Some(Self::Hod),
            "administrator" | "admin" => Some(Self::Administrator),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Faculty => "faculty",
            Self::Labstaff => "labstaff",
            Self::Hod => "hod",
            Self::Administrator => "administrator",
        }
    }

    /// Roles that may be put on a subject's staff roster
    pub fn is_teaching(&self) -> bool {
        matches!(self, Self::Faculty | Self::Hod)
    }

    /// Roles a visitor may pick for themselves at sign-up
    pub fn is_self_assignable(&self) -> bool {
        matches!(self, Self::Student | Self::Faculty | Self::Labstaff)
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    username: String,
    name: String,
    /// Argon2 password hash; API responses never include it
    password_hash: String,
    role: UserRole,
    department: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_login_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn new(
        username: impl Into<String>,
        name: impl Into<String>,
        password_hash: impl Into<String>,
        role: UserRole,
        department: impl Into<String>,
    ) -> Self {
        let now = Utc::now();

        Self {
            id: UserId::generate(),
            username: username.into(),
            name: name.into(),
            password_hash: password_hash.into(),
            role,
            department: department.into(),
            created_at: now,
            updated_at: now,
            last_login_at: None,
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn role(&self) -> UserRole {
        self.role
    }

    pub fn department(&self) -> &str {
        &self.department
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn last_login_at(&self) -> Option<DateTime<Utc>> {
        self.last_login_at
    }

    /// HOD of the given department
    pub fn is_hod_of(&self, department: &str) -> bool {
        self.role == UserRole::Hod && self.department == department
    }

    pub fn record_login(&mut self) {
        self.last_login_at = Some(Utc::now());
        self.updated_at = Utc::now();
    }
}

impl StorageEntity for User {
    type Key = UserId;

    fn key(&self) -> &Self::Key {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parsing() {
        assert_eq!(UserRole::parse("HOD"), Some(UserRole::Hod));
        assert_eq!(UserRole::parse("teacher"), Some(UserRole::Faculty));
        assert_eq!(UserRole::parse(" labstaff "), Some(UserRole::Labstaff));
        assert_eq!(UserRole::parse("principal"), None);
    }

    #[test]
    fn test_teaching_roles() {
        assert!(UserRole::Faculty.is_teaching());
        assert!(UserRole::Hod.is_teaching());
        assert!(!UserRole::Student.is_teaching());
        assert!(!UserRole::Labstaff.is_teaching());
    }

    #[test]
    fn test_self_assignable_roles() {
        assert!(UserRole::Student.is_self_assignable());
        assert!(!UserRole::Hod.is_self_assignable());
        assert!(!UserRole::Administrator.is_self_assignable());
    }

    #[test]
    fn test_is_hod_of_requires_matching_department() {
        let hod = User::new("hod-cs", "Head", "hash", UserRole::Hod, "CSE");
        assert!(hod.is_hod_of("CSE"));
        assert!(!hod.is_hod_of("ECE"));

        let faculty = User::new("fac", "Faculty", "hash", UserRole::Faculty, "CSE");
        assert!(!faculty.is_hod_of("CSE"));
    }

    #[test]
    fn test_record_login() {
        let mut user = User::new("student1", "Student", "hash", UserRole::Student, "CSE");
        assert!(user.last_login_at().is_none());
        user.record_login();
        assert!(user.last_login_at().is_some());
    }
}
