use std::sync::Arc;

use crate::llm_client::TextGenerator;
use crate::wizard::store::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionStore,
    /// Text generation backend. `LlmClient` in production.
    pub generator: Arc<dyn TextGenerator>,
}
