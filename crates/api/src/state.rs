//! Shared application state.

use risk_sim_simulation::{EngineConfig, MonteCarloEngine};
use std::sync::Arc;

/// State shared by all request handlers.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Engine used for every simulation request.
    pub engine: Arc<MonteCarloEngine>,
}

impl AppState {
    /// Creates state around an engine built from `config`.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            engine: Arc::new(MonteCarloEngine::new(config)),
        }
    }
}
