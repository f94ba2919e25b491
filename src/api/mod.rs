//! API layer - HTTP endpoints and middleware

pub mod auth;
pub mod health;
pub mod middleware;
pub mod resources;
pub mod router;
pub mod state;
pub mod subjects;
pub mod types;

pub use middleware::{MaybeUser, RequireUser};
pub use router::{create_router, create_router_with_state};
pub use state::AppState;
