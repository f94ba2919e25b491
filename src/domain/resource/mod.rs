//! Teaching resources - files shared under a subject

mod entity;
mod repository;

pub use entity::{stored_file_name, Resource, ResourceCategory, ResourceId};
pub use repository::ResourceRepository;
