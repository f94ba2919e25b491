//! Subject service - registry, subscriptions and staff roster

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::domain::resource::{Resource, ResourceRepository};
use crate::domain::subject::{SchemeKind, Subject, SubjectId, SubjectRepository};
use crate::domain::user::{User, UserId, UserRepository, UserRole};
use crate::domain::DomainError;

pub const SUBJECT_NOT_FOUND: &str = "The subject you requested does not exist.";
const NOT_HOD: &str = "You are not an HOD";
const NOT_SUBSCRIBED: &str = "You are not subscribed to this subject.";
const MALFORMED_STAFF_FORM: &str = "Something went wrong.";
pub const NO_SUBJECTS: &str = "You are not subscribed to any subjects";

#[derive(Debug, Clone)]
pub struct CreateSubjectRequest {
    pub code: String,
    pub name: String,
    pub credit: u32,
    pub course: String,
    pub semester: u32,
    pub scheme: Option<SchemeKind>,
}

/// Public view of a staff member
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StaffMember {
    pub id: UserId,
    pub username: String,
    pub name: String,
    pub role: UserRole,
    pub department: String,
}

impl From<&User> for StaffMember {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().clone(),
            username: user.username().to_string(),
            name: user.name().to_string(),
            role: user.role(),
            department: user.department().to_string(),
        }
    }
}

/// A subject as seen by a particular viewer
#[derive(Debug, Clone, Serialize)]
pub struct SubjectView {
    pub subject: Subject,
    pub staff: Vec<StaffMember>,
    pub resource_list: Vec<Resource>,
    pub subscribed: bool,
    pub is_hod: bool,
    pub is_staff: bool,
    pub has_staff: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct DepartmentStaff {
    pub department: String,
    pub staff: Vec<StaffMember>,
}

#[derive(Debug)]
pub struct SubjectService {
    subjects: Arc<dyn SubjectRepository>,
    users: Arc<dyn UserRepository>,
    resources: Arc<dyn ResourceRepository>,
}

impl SubjectService {
    pub fn new(
        subjects: Arc<dyn SubjectRepository>,
        users: Arc<dyn UserRepository>,
        resources: Arc<dyn ResourceRepository>,
    ) -> Self {
        Self {
            subjects,
            users,
            resources,
        }
    }

    pub async fn get_required(&self, id: &SubjectId) -> Result<Subject, DomainError> {
        self.subjects
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(SUBJECT_NOT_FOUND))
    }

    /// Creates a subject in the actor's department
    pub async fn create(
        &self,
        actor: &User,
        request: CreateSubjectRequest,
    ) -> Result<Subject, DomainError> {
        let code = request.code.trim();
        let name = request.name.trim();

        if code.is_empty() || name.is_empty() {
            return Err(DomainError::validation("Subject code and name are required"));
        }

        let subject = Subject::new(code, name, actor.department())
            .with_credit(request.credit)
            .with_course(request.course.trim())
            .with_semester(request.semester)
            .with_scheme(request.scheme.unwrap_or_default());

        let subject = self.subjects.create(subject).await?;
        info!(subject_id = %subject.id(), code = %subject.code(), "Created subject");

        Ok(subject)
    }

    pub async fn view(
        &self,
        id: &SubjectId,
        actor: Option<&User>,
    ) -> Result<SubjectView, DomainError> {
        let subject = self.get_required(id).await?;

        let mut staff = Vec::with_capacity(subject.staff().len());
        for staff_id in subject.staff() {
            if let Some(user) = self.users.get(staff_id).await? {
                staff.push(StaffMember::from(&user));
            }
        }

        let resource_list = self.resources.list_by_subject(id).await?;

        let (subscribed, is_hod, is_staff) = match actor {
            Some(user) => (
                subject.is_subscribed(user.id()),
                user.is_hod_of(subject.department()),
                subject.is_staff(user.id()),
            ),
            None => (false, false, false),
        };

        Ok(SubjectView {
            has_staff: subject.has_staff(),
            subject,
            staff,
            resource_list,
            subscribed,
            is_hod,
            is_staff,
        })
    }

    /// Subjects a user teaches, or for everyone else the subjects they
    /// subscribed to
    pub async fn my_subjects(&self, actor: &User) -> Result<Vec<Subject>, DomainError> {
        let teaching = actor.role().is_teaching();
        let subjects: Vec<Subject> = self
            .subjects
            .list()
            .await?
            .into_iter()
            .filter(|s| {
                if teaching {
                    s.is_staff(actor.id())
                } else {
                    s.is_subscribed(actor.id())
                }
            })
            .collect();

        if subjects.is_empty() {
            return Err(DomainError::not_found(NO_SUBJECTS));
        }

        Ok(subjects)
    }

    pub async fn subscribe(&self, actor: &User, id: &SubjectId) -> Result<Subject, DomainError> {
        let mut subject = self.get_required(id).await?;

        if !subject.subscribe(actor.id().clone()) {
            return Ok(subject);
        }

        info!(subject_id = %id, user_id = %actor.id(), "Subscribed to subject");
        self.subjects.update(subject).await
    }

    pub async fn unsubscribe(&self, actor: &User, id: &SubjectId) -> Result<Subject, DomainError> {
        let mut subject = self.get_required(id).await?;

        if !subject.unsubscribe(actor.id()) {
            return Err(DomainError::forbidden(NOT_SUBSCRIBED));
        }

        info!(subject_id = %id, user_id = %actor.id(), "Unsubscribed from subject");
        self.subjects.update(subject).await
    }

    /// Resolves a staff selection; every id must name teaching staff
    async fn resolve_staff(&self, staff_ids: &[String]) -> Result<Vec<UserId>, DomainError> {
        if staff_ids.is_empty() {
            return Err(DomainError::internal(MALFORMED_STAFF_FORM));
        }

        let mut resolved = Vec::with_capacity(staff_ids.len());
        for raw in staff_ids {
            let id = UserId::parse(raw).map_err(|_| DomainError::internal(MALFORMED_STAFF_FORM))?;
            match self.users.get(&id).await? {
                Some(user) if user.role().is_teaching() => resolved.push(id),
                _ => return Err(DomainError::internal(MALFORMED_STAFF_FORM)),
            }
        }

        Ok(resolved)
    }

    fn require_hod(actor: &User, subject: &Subject) -> Result<(), DomainError> {
        if actor.is_hod_of(subject.department()) {
            Ok(())
        } else {
            Err(DomainError::forbidden(NOT_HOD))
        }
    }

    pub async fn assign_staff(
        &self,
        actor: &User,
        id: &SubjectId,
        staff_ids: &[String],
    ) -> Result<Subject, DomainError> {
        let mut subject = self.get_required(id).await?;
        Self::require_hod(actor, &subject)?;

        let staff = self.resolve_staff(staff_ids).await?;
        info!(subject_id = %id, count = staff.len(), "Assigning staff");

        subject.add_staff(staff);
        self.subjects.update(subject).await
    }

    pub async fn remove_staff(
        &self,
        actor: &User,
        id: &SubjectId,
        staff_ids: &[String],
    ) -> Result<Subject, DomainError> {
        let mut subject = self.get_required(id).await?;
        Self::require_hod(actor, &subject)?;

        let staff = self.resolve_staff(staff_ids).await?;
        info!(subject_id = %id, count = staff.len(), "Removing staff");

        subject.remove_staff(&staff);
        self.subjects.update(subject).await
    }

    /// Teaching staff of every department, departments in name order
    pub async fn staff_candidates(&self) -> Result<Vec<DepartmentStaff>, DomainError> {
        let mut grouped: BTreeMap<String, Vec<StaffMember>> = BTreeMap::new();

        for user in self.users.list().await? {
            if user.role().is_teaching() {
                grouped
                    .entry(user.department().to_string())
                    .or_default()
                    .push(StaffMember::from(&user));
            }
        }

        Ok(grouped
            .into_iter()
            .map(|(department, staff)| DepartmentStaff { department, staff })
            .collect())
    }
}
