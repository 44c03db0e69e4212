use std::sync::Arc;

use crate::telemetry::TelemetryStore;

use super::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<TelemetryStore>,
}
