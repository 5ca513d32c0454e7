use std::time::Duration;

use crate::generation::client::GenerationClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub generator: GenerationClient,
    /// Pause between consecutive calls of a full-document run.
    pub document_call_delay: Duration,
}
