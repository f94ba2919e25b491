//! User infrastructure: Argon2 hashing, storage-backed repository and service

mod password;
mod service;
mod storage_repository;

pub use password::{Argon2Hasher, PasswordHasher};
pub use service::{CreateUserRequest, UserService};
pub use storage_repository::StorageUserRepository;
