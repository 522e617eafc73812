use crate::observability::AppMetrics;
use crate::services::bmi::BmiService;
use std::sync::Arc;

/// Application state shared by the invocation handlers
#[derive(Clone)]
pub struct AppState {
    /// BMI service handling each invocation
    pub bmi_service: Arc<dyn BmiService>,
    /// Request and invocation counters
    pub metrics: Arc<AppMetrics>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("bmi_service", &"Arc<dyn BmiService>")
            .field("metrics", &self.metrics)
            .finish()
    }
}

impl AppState {
    /// Create new application state
    pub fn new(bmi_service: Box<dyn BmiService>, metrics: Arc<AppMetrics>) -> Self {
        Self {
            bmi_service: Arc::from(bmi_service),
            metrics,
        }
    }
}
