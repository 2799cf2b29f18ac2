use tracing_subscriber::{
    filter::ParseError,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::config::{LogFormat, LoggingConfig};

const FALLBACK_LEVEL: &str = "info";

/// Install the global subscriber.
///
/// `RUST_LOG` takes precedence over the configured level. Returns `false` when a
/// subscriber was already installed.
pub fn init_logging(config: &LoggingConfig) -> bool {
    let (filter, invalid_level) = match EnvFilter::try_from_default_env() {
        Ok(filter) => (filter, None),
        Err(_) => env_filter(config),
    };

    let registry = tracing_subscriber::registry().with(filter);
    let installed = match config.format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_span_events(FmtSpan::CLOSE))
            .try_init(),
        LogFormat::Pretty => registry
            .with(fmt::layer().pretty().with_target(true))
            .try_init(),
    }
    .is_ok();

    if installed {
        tracing::info!(level = %config.level, format = ?config.format, "logging initialized");
        if let Some(e) = invalid_level {
            tracing::warn!(error = %e, "invalid log level, using {}", FALLBACK_LEVEL);
        }
    }

    installed
}

/// Filter for the configured level; an unparsable level falls back to `info`.
fn env_filter(config: &LoggingConfig) -> (EnvFilter, Option<ParseError>) {
    match EnvFilter::try_new(&config.level) {
        Ok(filter) => (filter, None),
        Err(e) => (EnvFilter::new(FALLBACK_LEVEL), Some(e)),
    }
}
