//! Application state for dependency injection.

use std::sync::Arc;

use crate::clients::StudentBackend;
use crate::config::GatewayConfig;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub students: Arc<dyn StudentBackend>,
    pub config: GatewayConfig,
}

impl AppState {
    /// Create new app state.
    pub fn new(students: Arc<dyn StudentBackend>, config: GatewayConfig) -> Self {
        Self { students, config }
    }
}
