//! Ingestion Authenticator
//!
//! Claims model for the authenticator of a data-ingestion server:
//! - `JwtData`, the claims decoded from a verified access token
//! - JSON conversion in both directions
//! - Layered configuration and `tracing` setup

pub mod config;
pub mod domain;
pub mod infrastructure;

pub use crate::config::AppConfig;
pub use domain::{DomainError, JwtData};
pub use infrastructure::init_logging;
