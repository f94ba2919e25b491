//! Domain layer - Core business logic and entities

pub mod error;
pub mod exam;
pub mod ingestion;
pub mod paper;
pub mod question;
pub mod resource;
pub mod storage;
pub mod subject;
pub mod user;

pub use error::DomainError;
pub use exam::{Exam, ExamId, ExamRepository};
pub use ingestion::{Cell, IngestionReport, RowOutcome, SheetRow, SkipReason, SpreadsheetReader};
pub use paper::{
    ArtifactStore, AssembledPaper, AssemblyStatus, ClassificationScheme, Classifier, Criterion,
    CriteriaResolver, DocumentFormat, DocumentRenderer, PaperDocument, SectionAssembler,
    SectionedSelection, WrapRule,
};
pub use question::{Classification, Mark, Question, QuestionId, QuestionQuery, QuestionRepository};
pub use resource::{Resource, ResourceCategory, ResourceId, ResourceRepository};
pub use storage::{Storage, StorageEntity, StorageKey};
pub use subject::{SchemeKind, Subject, SubjectId, SubjectRepository};
pub use user::{User, UserId, UserRepository, UserRole};
