use std::sync::Arc;

use crate::catalog::RetrievalContext;
use crate::config::Config;
use crate::llm_client::{Embedder, TextGenerator};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Catalog, documents and embedding index. Built once at startup, read-only afterwards.
    pub retrieval: Arc<RetrievalContext>,
    /// Query embedding backend. Default: `LlmClient` (Gemini `embedContent`).
    pub embedder: Arc<dyn Embedder>,
    /// Text generation backend for page extraction and recommendation selection.
    pub generator: Arc<dyn TextGenerator>,
    /// Client for fetching job-posting pages.
    pub http: reqwest::Client,
    pub config: Config,
}
