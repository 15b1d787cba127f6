use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::CompletionService;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Completion port. `LlmClient` in production, a stub in tests.
    pub completion: Arc<dyn CompletionService>,
    pub config: Config,
}
