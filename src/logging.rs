//! Tracing subscriber setup.
//!
//! Logs go to stderr so stdout stays clean for answers.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::{QaError, Result};

/// Install the global subscriber.
///
/// `log_level` takes precedence over `RUST_LOG`; with neither set the
/// filter defaults to `info`.
pub fn init_logging(log_level: Option<&str>) -> Result<()> {
    let env_filter = match log_level {
        Some(level) => EnvFilter::try_new(level),
        None => EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info")),
    }
    .map_err(|e| QaError::Config(format!("Invalid log filter: {}", e)))?;

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_ansi(std::env::var_os("NO_COLOR").is_none());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| QaError::Config(format!("Failed to init logging: {}", e)))?;

    Ok(())
}

