//! Log configuration.

use std::str::FromStr;

use evalbot_config::Config;
use evalbot_sentry::sentry;
use thiserror::Error;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_error::ErrorLayer;
use tracing_log::LogTracer;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter};
use tracing_tree::HierarchicalLayer;

const DEFAULT_ENV_CONFIG: &str = "info,sqlx=error,evalbot=debug";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error(
        "Could not set tracing global default subscriber,\n  caused by: {}",
        source
    )]
    TracingSetGlobalDefaultError {
        source: tracing::dispatcher::SetGlobalDefaultError,
    },
    #[error("Could not initialize tracing log tracer,\n  caused by: {}", source)]
    TracingLogTracerError { source: tracing_log::log::SetLoggerError },
    #[error(
        "Wrong env filter configuration: {}\n  caused by: {}",
        configuration,
        source
    )]
    EnvFilterConfigurationError {
        source: tracing_subscriber::filter::ParseError,
        configuration: String,
    },
}

fn build_env_filter(log_config: String) -> Result<EnvFilter, LoggingError> {
    EnvFilter::from_str(&log_config).map_err(|e| LoggingError::EnvFilterConfigurationError {
        source: e,
        configuration: log_config,
    })
}

/// Configure logging.
pub fn configure_logging(config: &Config) -> Result<(), LoggingError> {
    LogTracer::init().map_err(|e| LoggingError::TracingLogTracerError { source: e })?;

    let log_config = std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_ENV_CONFIG.to_string());
    let app_name = concat!(env!("CARGO_PKG_NAME"), "-", env!("CARGO_PKG_VERSION")).to_string();
    let use_bunyan = config.logging.use_bunyan;

    let filter_layer = build_env_filter(log_config)?;
    let hierarchical_layer = (!use_bunyan).then(|| {
        HierarchicalLayer::new(2)
            .with_targets(true)
            .with_bracketed_fields(true)
    });
    let error_layer = ErrorLayer::default();
    let json_storage_layer = use_bunyan.then_some(JsonStorageLayer);
    let bunyan_layer = use_bunyan.then(|| BunyanFormattingLayer::new(app_name, std::io::stdout));

    let subscriber = tracing_subscriber::registry()
        .with(error_layer)
        .with(hierarchical_layer)
        .with(filter_layer)
        .with(json_storage_layer)
        .with(bunyan_layer)
        .with(sentry::integrations::tracing::layer());

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| LoggingError::TracingSetGlobalDefaultError { source: e })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_filter() {
        assert!(build_env_filter(DEFAULT_ENV_CONFIG.into()).is_ok());
        assert!(matches!(
            build_env_filter("info,sqlx=notalevel".into()),
            Err(LoggingError::EnvFilterConfigurationError { .. })
        ));
    }
}
