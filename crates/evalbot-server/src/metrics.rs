use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use lazy_static::lazy_static;
use prometheus::IntCounter;

use crate::{Result, ServerError};

lazy_static! {
    pub static ref GITHUB_API_CALLS: IntCounter =
        IntCounter::new("github_api_calls", "GitHub API calls")
            .expect("github_api_calls counter should be valid");
}

pub(crate) fn build_metrics_handler() -> Result<PrometheusMetrics> {
    let prometheus = PrometheusMetricsBuilder::new("api")
        .endpoint("/metrics")
        .build()
        .map_err(|e| ServerError::MetricsError {
            message: e.to_string(),
        })?;

    setup_process_metrics(&prometheus)?;
    register(&prometheus, Box::new(GITHUB_API_CALLS.clone()))?;

    Ok(prometheus)
}

fn register(metrics: &PrometheusMetrics, collector: Box<dyn prometheus::core::Collector>) -> Result<()> {
    metrics
        .registry
        .register(collector)
        .map_err(|e| ServerError::MetricsError {
            message: e.to_string(),
        })
}

#[cfg(unix)]
fn setup_process_metrics(metrics: &PrometheusMetrics) -> Result<()> {
    use prometheus::process_collector::ProcessCollector;

    register(metrics, Box::new(ProcessCollector::for_self()))
}

#[cfg(not(unix))]
fn setup_process_metrics(_metrics: &PrometheusMetrics) -> Result<()> {
    tracing::warn!("Process metrics are only supported on Unix.");
    Ok(())
}
