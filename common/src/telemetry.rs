// Telemetry module for structured logging and metrics

use crate::config::LogFormat;
use anyhow::Result;
use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

pub const REQUESTS_TOTAL: &str = "ptlist_requests_total";
pub const POINTS_HISTOGRAM: &str = "ptlist_points";

/// Initialize structured logging
///
/// `RUST_LOG` takes precedence over `log_level` when set. JSON output carries
/// the current span and target so request spans from the HTTP layer show up
/// on every event.
pub fn init_logging(log_level: &str, format: LogFormat) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .map_err(|e| anyhow::anyhow!("Failed to create env filter: {}", e))?;

    let layer = match format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(false)
            .with_target(true)
            .with_filter(env_filter)
            .boxed(),
        LogFormat::Text => fmt::layer()
            .with_target(true)
            .with_filter(env_filter)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing subscriber: {}", e))?;

    tracing::info!(
        log_level = log_level,
        log_format = ?format,
        "Structured logging initialized"
    );

    Ok(())
}

/// Install the Prometheus recorder and describe the service metrics
///
/// The returned handle renders the exposition text for `GET /metrics`.
pub fn init_metrics() -> Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install Prometheus recorder: {}", e))?;

    describe_counter!(REQUESTS_TOTAL, "Total number of timestamp list requests");
    describe_histogram!(
        POINTS_HISTOGRAM,
        "Number of invocation points returned per request"
    );

    tracing::info!("Prometheus metrics recorder installed");

    Ok(handle)
}

/// Outcome label of a list request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    Success,
    ClientError,
    ServerError,
}

impl RequestOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            RequestOutcome::Success => "success",
            RequestOutcome::ClientError => "client_error",
            RequestOutcome::ServerError => "server_error",
        }
    }
}

#[inline]
pub fn record_request(outcome: RequestOutcome) {
    counter!(REQUESTS_TOTAL, "outcome" => outcome.as_str()).increment(1);
}

#[inline]
pub fn record_points(points: usize) {
    histogram!(POINTS_HISTOGRAM).record(points as f64);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_installs_once() {
        init_logging("info", LogFormat::Text).unwrap();
        // Global subscriber is already set
        assert!(init_logging("debug", LogFormat::Json).is_err());
    }

    #[test]
    fn test_metrics_recording_without_recorder() {
        record_request(RequestOutcome::Success);
        record_request(RequestOutcome::ClientError);
        record_points(5);
    }

    #[test]
    fn test_outcome_labels() {
        assert_eq!(RequestOutcome::Success.as_str(), "success");
        assert_eq!(RequestOutcome::ClientError.as_str(), "client_error");
        assert_eq!(RequestOutcome::ServerError.as_str(), "server_error");
    }
}
