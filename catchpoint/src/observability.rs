//! Logging, error reporting and metrics for the command line tool.

use crate::config::{Config, LoggingConfig, MetricsConfig};
use metrics_exporter_statsd::{StatsdBuilder, StatsdError};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const DEFAULT_LEVEL: &str = "info";
const METRICS_PREFIX: &str = "catchpoint";

#[derive(thiserror::Error, Debug)]
pub enum ObservabilityError {
    #[error("invalid log filter: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),
    #[error("could not build statsd exporter: {0}")]
    Statsd(#[from] StatsdError),
    #[error("a metrics recorder is already installed")]
    RecorderInstalled,
}

/// Keeps the sentry client alive until the command finishes, so queued
/// events are flushed on drop.
pub struct Guard {
    _sentry: Option<sentry::ClientInitGuard>,
}

pub fn init(config: &Config) -> Result<Guard, ObservabilityError> {
    let logging = config.logging.clone().unwrap_or_default();
    let sentry_guard = logging.sentry_dsn.as_deref().map(init_sentry);

    tracing_subscriber::registry()
        .with(filter(&logging)?)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_guard.is_some().then(sentry::integrations::tracing::layer))
        .init();

    if let Some(metrics) = &config.metrics {
        init_metrics(metrics)?;
    }

    Ok(Guard {
        _sentry: sentry_guard,
    })
}

fn filter(logging: &LoggingConfig) -> Result<EnvFilter, ObservabilityError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    let level = logging.level.as_deref().unwrap_or(DEFAULT_LEVEL);
    Ok(EnvFilter::builder().parse(level)?)
}

fn init_sentry(dsn: &str) -> sentry::ClientInitGuard {
    sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    ))
}

fn init_metrics(config: &MetricsConfig) -> Result<(), ObservabilityError> {
    let recorder = StatsdBuilder::from(config.statsd_host.clone(), config.statsd_port)
        .build(Some(METRICS_PREFIX))?;
    metrics::set_global_recorder(recorder).map_err(|_| ObservabilityError::RecorderInstalled)?;

    shared::metrics_defs::describe_all(catchpoint_api::metrics_defs::ALL_METRICS);
    shared::metrics_defs::describe_all(catchpoint_provider::metrics_defs::ALL_METRICS);

    tracing::debug!(
        statsd_host = %config.statsd_host,
        statsd_port = config.statsd_port,
        "metrics enabled"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn configured_level_is_used() {
        let logging = LoggingConfig {
            level: Some("catchpoint_provider=debug".into()),
            ..Default::default()
        };
        // RUST_LOG is not set under the test runner unless the caller sets it.
        if std::env::var("RUST_LOG").is_err() {
            let filter = filter(&logging).expect("valid filter");
            assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
        }
    }

    #[test]
    fn bad_level_is_an_error() {
        let logging = LoggingConfig {
            level: Some("catchpoint=loud".into()),
            ..Default::default()
        };
        if std::env::var("RUST_LOG").is_err() {
            assert!(matches!(filter(&logging), Err(ObservabilityError::Filter(_))));
        }
    }
}
