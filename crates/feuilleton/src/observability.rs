//! Tracing subscriber setup.

use crate::LoggingConfig;
use feuilleton_error::{ConfigError, FeuilletonError, FeuilletonResult};
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level. `verbose` raises
/// the configured level to `debug`.
///
/// # Errors
///
/// Returns an error for an unparsable filter directive or when a global
/// subscriber is already installed.
pub fn init_logging(config: &LoggingConfig, verbose: bool) -> FeuilletonResult<()> {
    let level = if verbose { "debug" } else { config.level().as_str() };

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|e| {
            FeuilletonError::from(ConfigError::new(format!(
                "Invalid log filter '{}': {}",
                level, e
            )))
        })?;

    let fmt_layer = if *config.json() {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_level(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_level(true)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| {
            FeuilletonError::from(ConfigError::new(format!(
                "Failed to install tracing subscriber: {}",
                e
            )))
        })
}
