//! Infrastructure services

mod paper_service;
mod question_bank_service;
mod resource_service;
mod subject_service;

pub use paper_service::{
    GeneratePaperRequest, GeneratedPaper, PaperService, PaperSettings, NO_QUESTIONS_CHOSEN,
};
pub use question_bank_service::QuestionBankService;
pub use resource_service::{
    CategoryInfo, CategoryListing, NewResource, ResourceService, SearchResults,
    NO_RESOURCES_IN_CATEGORY, NO_SEARCH_RESULTS, RESOURCE_NOT_FOUND,
};
pub use subject_service::{
    CreateSubjectRequest, DepartmentStaff, StaffMember, SubjectService, SubjectView, NO_SUBJECTS,
    SUBJECT_NOT_FOUND,
};
