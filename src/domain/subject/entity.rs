//! Subject entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::storage::StorageEntity;
use crate::domain::user::UserId;

crate::entity_id!(
    /// Subject identifier
    SubjectId
);

/// Which classification the subject's question bank is organised by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SchemeKind {
    /// Questions carry a mark; sections are derived from mark thresholds
    #[default]
    Mark,
    /// Questions carry an explicit part, course outcome and level
    Part,
}

impl SchemeKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "mark" | "marks" => Some(Self::Mark),
            "part" | "parts" => Some(Self::Part),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mark => "mark",
            Self::Part => "part",
        }
    }
}

impl std::fmt::Display for SchemeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A course subject owned by a department
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    id: SubjectId,
    code: String,
    name: String,
    credit: u32,
    course: String,
    semester: u32,
    department: String,
    #[serde(default)]
    scheme: SchemeKind,
    #[serde(default)]
    staff: Vec<UserId>,
    #[serde(default)]
    students: Vec<UserId>,
    created_at: DateTime<Utc>,
}

impl Subject {
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        department: impl Into<String>,
    ) -> Self {
        Self {
            id: SubjectId::generate(),
            code: code.into(),
            name: name.into(),
            credit: 0,
            course: String::new(),
            semester: 0,
            department: department.into(),
            scheme: SchemeKind::default(),
            staff: Vec::new(),
            students: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn with_credit(mut self, credit: u32) -> Self {
        self.credit = credit;
        self
    }

    pub fn with_course(mut self, course: impl Into<String>) -> Self {
        self.course = course.into();
        self
    }

    pub fn with_semester(mut self, semester: u32) -> Self {
        self.semester = semester;
        self
    }

    pub fn with_scheme(mut self, scheme: SchemeKind) -> Self {
        self.scheme = scheme;
        self
    }

    pub fn id(&self) -> &SubjectId {
        &self.id
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn credit(&self) -> u32 {
        self.credit
    }

    pub fn course(&self) -> &str {
        &self.course
    }

    pub fn semester(&self) -> u32 {
        self.semester
    }

    pub fn department(&self) -> &str {
        &self.department
    }

    pub fn scheme(&self) -> SchemeKind {
        self.scheme
    }

    pub fn staff(&self) -> &[UserId] {
        &self.staff
    }

    pub fn students(&self) -> &[UserId] {
        &self.students
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn has_staff(&self) -> bool {
        !self.staff.is_empty()
    }

    pub fn is_staff(&self, user_id: &UserId) -> bool {
        self.staff.contains(user_id)
    }

    pub fn is_subscribed(&self, user_id: &UserId) -> bool {
        self.students.contains(user_id)
    }

    /// Returns false when the user was already subscribed
    pub fn subscribe(&mut self, user_id: UserId) -> bool {
        if self.is_subscribed(&user_id) {
            return false;
        }
        self.students.push(user_id);
        true
    }

    /// Returns false when the user was not subscribed
    pub fn unsubscribe(&mut self, user_id: &UserId) -> bool {
        let before = self.students.len();
        self.students.retain(|id| id != user_id);
        before != self.students.len()
    }

    /// Adds users to the roster, ignoring those already on it
    pub fn add_staff(&mut self, ids: impl IntoIterator<Item = UserId>) {
        for id in ids {
            if !self.staff.contains(&id) {
                self.staff.push(id);
            }
        }
    }

    pub fn remove_staff(&mut self, ids: &[UserId]) {
        self.staff.retain(|id| !ids.contains(id));
    }
}

impl StorageEntity for Subject {
    type Key = SubjectId;

    fn key(&self) -> &Self::Key {
        &self.id
    }
}
