use std::sync::Arc;

use crate::llm_client::CompletionBackend;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable completion backend. Production wires the Groq client; tests
    /// swap in a canned backend.
    pub llm: Arc<dyn CompletionBackend>,
}
