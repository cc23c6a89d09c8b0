use std::sync::Arc;

use kiosk_core::SessionStore;
use kiosk_inference::RetrievalPipeline;
use kiosk_ingest::IngestPipeline;

/// Shared application state; every collaborator is injected at startup.
pub struct AppState {
    pub ingest: IngestPipeline,
    pub retrieval: RetrievalPipeline,
    pub sessions: Arc<dyn SessionStore>,
}
