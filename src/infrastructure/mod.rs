//! Infrastructure layer - storage, rendering, ingestion and service implementations

pub mod artifact;
pub mod auth;
pub mod exam;
pub mod ingestion;
pub mod logging;
pub mod question;
pub mod render;
pub mod resource;
pub mod services;
pub mod storage;
pub mod subject;
pub mod user;
