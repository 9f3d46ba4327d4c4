use std::fmt;
use std::sync::Arc;

use common::config::Settings;
use common::service::PeriodicTaskService;
use metrics_exporter_prometheus::PrometheusHandle;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Settings>,
    pub service: Arc<dyn PeriodicTaskService>,
    /// `None` when metrics are disabled in the configuration
    pub metrics_handle: Option<PrometheusHandle>,
}

impl AppState {
    /// Create a new AppState instance
    pub fn new(
        config: Settings,
        service: Arc<dyn PeriodicTaskService>,
        metrics_handle: Option<PrometheusHandle>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            service,
            metrics_handle,
        }
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("metrics_enabled", &self.metrics_handle.is_some())
            .finish_non_exhaustive()
    }
}
