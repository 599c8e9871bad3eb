//! Shared test utilities: catalog fixtures, fake model backends and a ready `AppState`.

pub mod fakes;
pub mod fixtures;

use std::collections::HashMap;
use std::sync::Arc;

use crate::catalog::RetrievalContext;
use crate::config::Config;
use crate::llm_client::{Embedder, TextGenerator};
use crate::state::AppState;

use fakes::KeywordEmbedder;
use fixtures::{keyword_embeddings, sample_catalog};

pub fn test_config() -> Config {
    let vars: HashMap<&str, &str> = HashMap::from([
        ("GEMINI_API_KEY", "test-key"),
        ("EMBED_RETRY_DELAY_SECS", "0"),
    ]);
    Config::from_lookup(|key| vars.get(key).map(|v| v.to_string())).unwrap()
}

/// State over the sample catalog with keyword embeddings and the given generator.
pub fn test_state(generator: Arc<dyn TextGenerator>) -> AppState {
    test_state_with(generator, Arc::new(KeywordEmbedder))
}

pub fn test_state_with(generator: Arc<dyn TextGenerator>, embedder: Arc<dyn Embedder>) -> AppState {
    let catalog = sample_catalog();
    let embeddings = keyword_embeddings(&catalog);
    let retrieval = RetrievalContext::from_parts(catalog, &embeddings).unwrap();

    AppState {
        retrieval: Arc::new(retrieval),
        embedder,
        generator,
        http: reqwest::Client::new(),
        config: test_config(),
    }
}
