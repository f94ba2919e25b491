//! Application state for shared services

use std::sync::Arc;

use crate::domain::exam::{Exam, ExamId};
use crate::domain::ingestion::IngestionReport;
use crate::domain::resource::{Resource, ResourceId};
use crate::domain::subject::{SchemeKind, Subject, SubjectId};
use crate::domain::user::{User, UserId, UserRepository};
use crate::domain::DomainError;
use crate::infrastructure::auth::JwtGenerator;
use crate::infrastructure::services::{
    CategoryInfo, CategoryListing, CreateSubjectRequest, DepartmentStaff, GeneratePaperRequest,
    GeneratedPaper, NewResource, PaperService, QuestionBankService, ResourceService,
    SearchResults, SubjectService, SubjectView,
};
use crate::infrastructure::user::{CreateUserRequest, PasswordHasher, UserService};

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait>,
    pub jwt_service: Arc<dyn JwtGenerator>,
    pub subject_service: Arc<dyn SubjectServiceTrait>,
    pub question_bank_service: Arc<dyn QuestionBankServiceTrait>,
    pub paper_service: Arc<dyn PaperServiceTrait>,
    pub resource_service: Arc<dyn ResourceServiceTrait>,
}

/// Trait for user service operations
#[async_trait::async_trait]
pub trait UserServiceTrait: Send + Sync {
    async fn get(&self, id: &UserId) -> Result<Option<User>, DomainError>;
    async fn sign_up(&self, request: CreateUserRequest) -> Result<User, DomainError>;
    async fn authenticate(&self, username: &str, password: &str) -> Result<User, DomainError>;
}

/// Trait for subject registry operations
#[async_trait::async_trait]
pub trait SubjectServiceTrait: Send + Sync {
    async fn create(&self, actor: &User, request: CreateSubjectRequest)
        -> Result<Subject, DomainError>;
    async fn view(&self, id: &SubjectId, actor: Option<&User>) -> Result<SubjectView, DomainError>;
    async fn my_subjects(&self, actor: &User) -> Result<Vec<Subject>, DomainError>;
    async fn subscribe(&self, actor: &User, id: &SubjectId) -> Result<Subject, DomainError>;
    async fn unsubscribe(&self, actor: &User, id: &SubjectId) -> Result<Subject, DomainError>;
    async fn assign_staff(
        &self,
        actor: &User,
        id: &SubjectId,
        staff_ids: &[String],
    ) -> Result<Subject, DomainError>;
    async fn remove_staff(
        &self,
        actor: &User,
        id: &SubjectId,
        staff_ids: &[String],
    ) -> Result<Subject, DomainError>;
    async fn staff_candidates(&self) -> Result<Vec<DepartmentStaff>, DomainError>;
}

/// Trait for question bank uploads
#[async_trait::async_trait]
pub trait QuestionBankServiceTrait: Send + Sync {
    async fn upload(
        &self,
        subject_id: &SubjectId,
        scheme: Option<SchemeKind>,
        bytes: Vec<u8>,
    ) -> Result<IngestionReport, DomainError>;
}

/// Trait for question paper generation
#[async_trait::async_trait]
pub trait PaperServiceTrait: Send + Sync {
    async fn generate(
        &self,
        subject_id: &SubjectId,
        request: GeneratePaperRequest,
    ) -> Result<GeneratedPaper, DomainError>;
    async fn get_exam(&self, subject_id: &SubjectId, exam_id: &ExamId)
        -> Result<Exam, DomainError>;
}

/// Trait for teaching resource operations
#[async_trait::async_trait]
pub trait ResourceServiceTrait: Send + Sync {
    fn categories(&self) -> Vec<CategoryInfo>;
    async fn upload(&self, actor: &User, request: NewResource) -> Result<Resource, DomainError>;
    async fn get(&self, id: &ResourceId) -> Result<Resource, DomainError>;
    async fn list_by_type(&self, type_name: &str) -> Result<CategoryListing, DomainError>;
    async fn search(&self, query: &str) -> Result<SearchResults, DomainError>;
}

// Implement traits for the actual services

#[async_trait::async_trait]
impl<R, H> UserServiceTrait for UserService<R, H>
where
    R: UserRepository + 'static,
    H: PasswordHasher + 'static,
{
    async fn get(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        UserService::get(self, id).await
    }

    async fn sign_up(&self, request: CreateUserRequest) -> Result<User, DomainError> {
        UserService::sign_up(self, request).await
    }

    async fn authenticate(&self, username: &str, password: &str) -> Result<User, DomainError> {
        UserService::authenticate(self, username, password).await
    }
}

#[async_trait::async_trait]
impl SubjectServiceTrait for SubjectService {
    async fn create(
        &self,
        actor: &User,
        request: CreateSubjectRequest,
    ) -> Result<Subject, DomainError> {
        SubjectService::create(self, actor, request).await
    }

    async fn view(&self, id: &SubjectId, actor: Option<&User>) -> Result<SubjectView, DomainError> {
        SubjectService::view(self, id, actor).await
    }

    async fn my_subjects(&self, actor: &User) -> Result<Vec<Subject>, DomainError> {
        SubjectService::my_subjects(self, actor).await
    }

    async fn subscribe(&self, actor: &User, id: &SubjectId) -> Result<Subject, DomainError> {
        SubjectService::subscribe(self, actor, id).await
    }

    async fn unsubscribe(&self, actor: &User, id: &SubjectId) -> Result<Subject, DomainError> {
        SubjectService::unsubscribe(self, actor, id).await
    }

    async fn assign_staff(
        &self,
        actor: &User,
        id: &SubjectId,
        staff_ids: &[String],
    ) -> Result<Subject, DomainError> {
        SubjectService::assign_staff(self, actor, id, staff_ids).await
    }

    async fn remove_staff(
        &self,
        actor: &User,
        id: &SubjectId,
        staff_ids: &[String],
    ) -> Result<Subject, DomainError> {
        SubjectService::remove_staff(self, actor, id, staff_ids).await
    }

    async fn staff_candidates(&self) -> Result<Vec<DepartmentStaff>, DomainError> {
        SubjectService::staff_candidates(self).await
    }
}

#[async_trait::async_trait]
impl QuestionBankServiceTrait for QuestionBankService {
    async fn upload(
        &self,
        subject_id: &SubjectId,
        scheme: Option<SchemeKind>,
        bytes: Vec<u8>,
    ) -> Result<IngestionReport, DomainError> {
        QuestionBankService::upload(self, subject_id, scheme, bytes).await
    }
}

#[async_trait::async_trait]
impl PaperServiceTrait for PaperService {
    async fn generate(
        &self,
        subject_id: &SubjectId,
        request: GeneratePaperRequest,
    ) -> Result<GeneratedPaper, DomainError> {
        PaperService::generate(self, subject_id, request).await
    }

    async fn get_exam(
        &self,
        subject_id: &SubjectId,
        exam_id: &ExamId,
    ) -> Result<Exam, DomainError> {
        PaperService::get_exam(self, subject_id, exam_id).await
    }
}

#[async_trait::async_trait]
impl ResourceServiceTrait for ResourceService {
    fn categories(&self) -> Vec<CategoryInfo> {
        ResourceService::categories(self)
    }

    async fn upload(&self, actor: &User, request: NewResource) -> Result<Resource, DomainError> {
        ResourceService::upload(self, actor, request).await
    }

    async fn get(&self, id: &ResourceId) -> Result<Resource, DomainError> {
        ResourceService::get(self, id).await
    }

    async fn list_by_type(&self, type_name: &str) -> Result<CategoryListing, DomainError> {
        ResourceService::list_by_type(self, type_name).await
    }

    async fn search(&self, query: &str) -> Result<SearchResults, DomainError> {
        ResourceService::search(self, query).await
    }
}
