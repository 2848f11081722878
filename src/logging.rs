use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Level used when `RUST_LOG` is unset or invalid
pub const DEFAULT_FILTER: &str = "warn";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("tracing subscriber already initialized")]
    SubscriberAlreadySet,
}

/// Install the global subscriber. Respects `RUST_LOG`, defaulting to `warn`.
/// Writes to stderr, keeping stdout for the rendered rows.
pub fn init() -> Result<(), LoggingError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init()
        .map_err(|_| LoggingError::SubscriberAlreadySet)
}
