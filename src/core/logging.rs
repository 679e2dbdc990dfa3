//! Tracing subscriber setup
//!
//! Log lines go to stderr so stdout stays clean for FEN, move lists and JSON
//! events. `RUST_LOG` takes precedence over the configured level.

use super::error::{AppError, AppResult};
use tracing_subscriber::EnvFilter;

/// Install the global fmt subscriber
///
/// Fails if a global subscriber is already installed.
pub fn init_logging(default_level: &str) -> AppResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| AppError::Logging {
            message: format!("invalid log level {default_level:?}: {e}"),
        })?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| AppError::Logging {
            message: e.to_string(),
        })
}
