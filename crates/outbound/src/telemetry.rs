//! Process-wide logging setup.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::{LogFormat, LoggingConfig};
use crate::error::{OutboundError, Result};

/// Installs the global `tracing` subscriber and routes `log` records into it.
///
/// `RUST_LOG` wins over `config.level` when set. Fails, rather than
/// panicking, if a global subscriber or logger is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    let registry = tracing_subscriber::registry().with(filter);

    let installed = match config.format {
        LogFormat::Text => {
            tracing::subscriber::set_global_default(registry.with(fmt::layer().with_target(true)))
        }
        LogFormat::Json => {
            tracing::subscriber::set_global_default(registry.with(fmt::layer().json()))
        }
    };
    installed.map_err(|e| OutboundError::Telemetry(e.to_string()))?;

    tracing_log::LogTracer::init().map_err(|e| OutboundError::Telemetry(e.to_string()))?;
    log::debug!("Logging initialized ({:?})", config.format);
    Ok(())
}
