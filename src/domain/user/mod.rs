//! User domain
//!
//! Department members who sign in, subscribe to subjects and, for teaching
//! staff, manage rosters and generate question papers.

mod entity;
mod repository;
mod validation;

pub use entity::{User, UserId, UserRole};
pub use repository::UserRepository;
pub use validation::{
    validate_full_name, validate_password, validate_username, UserValidationError,
};
