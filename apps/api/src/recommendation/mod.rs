// Recommendation pipeline
// Implements: URL detection, page extraction, retrieval context, model selection, reconciliation.
// All model calls go through the llm_client traits; nothing here talks to Gemini directly.

pub mod assembler;
pub mod generator;
pub mod handlers;
pub mod page_extractor;
pub mod pipeline;
pub mod prompts;
pub mod query;
