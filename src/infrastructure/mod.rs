//! Infrastructure layer - Process-wide setup

pub mod logging;

pub use logging::init_logging;
