//! Shared state for the dashboard router.

use std::sync::Arc;

use crate::backend::Backend;
use crate::config::DashboardConfig;

/// Immutable per-process context handed to every handler.
#[derive(Clone)]
pub struct ApiContext {
    pub backend: Arc<dyn Backend>,
    pub config: Arc<DashboardConfig>,
}

impl ApiContext {
    pub fn new(backend: Arc<dyn Backend>, config: DashboardConfig) -> Self {
        Self {
            backend,
            config: Arc::new(config),
        }
    }

    pub fn backend(&self) -> &dyn Backend {
        self.backend.as_ref()
    }
}
