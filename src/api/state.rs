use std::sync::Arc;

use crate::registry::TeamRegistry;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<TeamRegistry>,
}

impl AppState {
    pub fn new(registry: Arc<TeamRegistry>) -> Self {
        Self { registry }
    }
}
