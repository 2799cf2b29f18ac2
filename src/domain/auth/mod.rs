//! Authentication domain
//!
//! Claims decoded from verified access tokens.

mod jwt_data;

pub use jwt_data::JwtData;
