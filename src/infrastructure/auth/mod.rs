//! Authentication infrastructure - signed bearer tokens

mod jwt;

pub use jwt::{JwtClaims, JwtConfig, JwtGenerator, JwtService};
