//! Subject domain - course subjects, their staff roster and subscribers

mod entity;
mod repository;

pub use entity::{SchemeKind, Subject, SubjectId};
pub use repository::SubjectRepository;
