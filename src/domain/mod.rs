//! Domain layer - Core entities and errors

pub mod auth;
pub mod error;

pub use auth::JwtData;
pub use error::DomainError;
