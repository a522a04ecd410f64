//! Application state for Axum handlers.

use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;

use crate::config::AppConfig;
use crate::service::{SubjectService, UserService};
use crate::storage::traits::Storage;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Storage backend.
    pub storage: Arc<dyn Storage>,
    /// Subject service.
    pub subject_service: Arc<SubjectService>,
    /// User service.
    pub user_service: Arc<UserService>,
    /// Installed Prometheus recorder, if any.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create a new application state.
    pub fn new(config: Arc<AppConfig>, storage: Arc<dyn Storage>) -> Self {
        let subject_service = Arc::new(SubjectService::new(Arc::clone(&storage)));
        let user_service = Arc::new(UserService::new(Arc::clone(&storage)));

        Self {
            config,
            storage,
            subject_service,
            user_service,
            metrics: None,
        }
    }

    /// Attach an installed Prometheus recorder.
    #[must_use]
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}
