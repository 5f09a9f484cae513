//! Shared application state.

use crate::db::IngestDbManager;
use crate::extraction::GeminiClient;

/// State shared across request handlers.
///
/// Built once in `main` and handed to the router behind an `Arc`; the store
/// handle and extractor client are injected here rather than reached through
/// globals, so tests can construct their own instances.
pub struct AppState {
    pub extractor: GeminiClient,
    pub ingest_db: IngestDbManager,
}
