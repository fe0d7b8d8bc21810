//! Tracing subscriber setup.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::CoreError;

/// Installs a global fmt subscriber.
///
/// `RUST_LOG` takes precedence; otherwise `level` applies to the botkit
/// crates and everything else stays at `warn`.
pub fn init_tracing(level: &str) -> Result<(), CoreError> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| {
        EnvFilter::try_new(format!(
            "warn,botkit_core={level},botkit_fetch={level},botkit_clients={level}"
        ))
    });
    let filter = filter.map_err(|e| CoreError::Logging(e.to_string()))?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .try_init()
        .map_err(|e| CoreError::Logging(e.to_string()))
}
