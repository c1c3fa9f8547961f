//! Tracing subscriber setup

use crate::error::{ProcessingError, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber, writing to stderr so stdout stays free
/// for progress output.
///
/// `RUST_LOG` wins over `default_level` when it is set. Calling this again
/// after a subscriber exists is a no-op.
pub fn init_logging(default_level: &str) -> Result<()> {
    if tracing::dispatcher::has_been_set() {
        return Ok(());
    }

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_level).map_err(|e| ProcessingError::LoggingError {
            message: format!("invalid log level {:?}: {}", default_level, e),
        })?,
    };

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();

    match installed {
        Ok(()) => Ok(()),
        // Lost a race with another thread installing its own
        Err(_) if tracing::dispatcher::has_been_set() => Ok(()),
        Err(e) => Err(ProcessingError::LoggingError {
            message: format!("cannot install log subscriber: {}", e),
        }),
    }
}
