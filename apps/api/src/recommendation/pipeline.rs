//! Recommendation pipeline.
//!
//! Flow: query → (URL? page extraction, falling back to the raw query) → embed with retry →
//!       nearest documents → context → model selection → decode → catalog reconciliation.
//!
//! Holds no state between requests; everything shared comes read-only from `AppState`.

use tracing::{debug, info};

use crate::catalog::record::name_from_document;
use crate::errors::AppError;
use crate::llm_client::retry::{with_retry, RetryPolicy};
use crate::models::assessment::Assessment;
use crate::recommendation::assembler::assemble;
use crate::recommendation::generator::generate_recommendations;
use crate::recommendation::page_extractor::extract_job_description;
use crate::recommendation::query::extract_url;
use crate::state::AppState;

pub async fn recommend(state: &AppState, query: &str) -> Result<Vec<Assessment>, AppError> {
    // Step 1: Resolve the text to embed
    let description = match extract_url(query) {
        Some(url) => {
            info!("Query contains a URL; extracting job description from {url}");
            extract_job_description(&state.http, state.generator.as_ref(), url)
                .await
                .unwrap_or_else(|| query.to_string())
        }
        None => query.to_string(),
    };

    // Step 2: Embed with bounded retry
    let policy = RetryPolicy::new(
        state.config.embed_max_attempts,
        state.config.embed_retry_delay,
    );
    let embedder = state.embedder.as_ref();
    let text = description.as_str();
    let query_embedding = with_retry(policy, "Query embedding", move || embedder.embed(text))
        .await
        .map_err(|e| AppError::Embedding(e.to_string()))?;

    // Step 3: Nearest documents become the model's context
    let indices = state
        .retrieval
        .nearest(&query_embedding, state.config.top_k_indexes)
        .map_err(|e| AppError::Internal(e.into()))?;
    let documents = state.retrieval.documents();
    debug!(
        "Retrieved: {:?}",
        indices
            .iter()
            .filter_map(|&i| name_from_document(&documents[i]))
            .collect::<Vec<_>>()
    );
    let context = state.retrieval.context_for(&indices);

    // Step 4: Model selection; malformed output degrades to no candidates
    let candidates = generate_recommendations(
        state.generator.as_ref(),
        query,
        &context,
        state.config.top_k,
    )
    .await?
    .into_candidates();

    // Step 5: Reconcile against the catalog
    let assessments = assemble(
        candidates,
        &state.retrieval.catalog,
        &state.config.catalog_base_url,
    );

    info!(
        "Recommended {} assessments from {} context documents",
        assessments.len(),
        indices.len()
    );
    Ok(assessments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fakes::{
        FailingEmbedder, FailingGenerator, RecordingEmbedder, ScriptedGenerator, SequencedGenerator,
    };
    use crate::test_utils::{test_state, test_state_with};
    use httpmock::prelude::*;
    use std::sync::atomic::Ordering;
    use std::sync::Arc;

    const JAVA_EE: &str = "Java Platform Enterprise Edition 7 (Java EE 7)";

    #[tokio::test]
    async fn test_end_to_end_java_query() {
        let generator = Arc::new(ScriptedGenerator::new(
            r#"```json
[{"Exam Name": ["Java Platform Enterprise Edition 7 (Java EE 7)"], "Duration": ["30 minutes"]}]
```"#,
        ));
        let state = test_state(generator.clone());

        let result = recommend(&state, "Java developer, 30 minutes max").await.unwrap();

        assert_eq!(result.len(), 1);
        let record = state.retrieval.catalog.find_by_name(JAVA_EE).unwrap();
        assert_eq!(result[0].name, JAVA_EE);
        assert_eq!(result[0].duration, "30 minutes");
        assert_eq!(result[0].adaptive_support, record.adaptive_support);
        assert_eq!(result[0].remote_support, record.remote_support);
        assert_eq!(result[0].test_type, vec![record.test_type.clone()]);
        assert_eq!(result[0].url, record.url);

        // The prompt carries the raw query and the retrieved documents, nearest first.
        let prompts = generator.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Java developer, 30 minutes max"));
        let java_pos = prompts[0].find(&format!("Assessment Name: {JAVA_EE}")).unwrap();
        let opq_pos = prompts[0]
            .find("Assessment Name: Occupational Personality Questionnaire OPQ32r")
            .unwrap();
        assert!(java_pos < opq_pos);
    }

    #[tokio::test]
    async fn test_context_is_limited_to_top_k_indexes() {
        let generator = Arc::new(ScriptedGenerator::new("[]"));
        let mut state = test_state(generator.clone());
        state.config.top_k_indexes = 2;

        recommend(&state, "Java developer").await.unwrap();

        let prompt = &generator.prompts()[0];
        assert_eq!(prompt.matches("Assessment Name: ").count(), 2);
    }

    #[tokio::test]
    async fn test_malformed_generator_output_yields_empty_list() {
        let generator = Arc::new(ScriptedGenerator::new(
            r#"[{"Exam Name": ["Java Platform Enterprise Edition 7 (Java EE 7)"], "Dura"#,
        ));
        let state = test_state(generator);

        let result = recommend(&state, "Java developer").await.unwrap();
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_generation_failure_propagates() {
        let state = test_state(Arc::new(FailingGenerator));
        let err = recommend(&state, "Java developer").await.unwrap_err();
        assert!(matches!(err, AppError::Llm(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_embedding_failure_after_retries_propagates() {
        let embedder = Arc::new(FailingEmbedder::default());
        let mut state = test_state_with(Arc::new(ScriptedGenerator::new("[]")), embedder.clone());
        state.config.embed_retry_delay = std::time::Duration::from_secs(5);

        let err = recommend(&state, "Java developer").await.unwrap_err();

        assert!(matches!(err, AppError::Embedding(_)));
        assert_eq!(embedder.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_job_url_embeds_extracted_description_and_prompts_with_query() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/jobs/7");
                then.status(200)
                    .header("content-type", "text/html")
                    .body("<html><body><h1>Data Analyst</h1><p>SQL and numerical reporting.</p></body></html>");
            })
            .await;
        let generator = Arc::new(SequencedGenerator::new(&[
            r#"{"Extracted Job Description": "SQL numerical analyst"}"#,
            r#"[{"Exam Name": ["Verify - Numerical Ability"], "Duration": ["18 minutes"]}]"#,
        ]));
        let embedder = Arc::new(RecordingEmbedder::default());
        let state = test_state_with(generator.clone(), embedder.clone());
        let query = format!("Assessments for {}", server.url("/jobs/7"));

        let result = recommend(&state, &query).await.unwrap();

        assert_eq!(embedder.inputs(), vec!["SQL numerical analyst".to_string()]);
        let prompts = generator.prompts();
        assert_eq!(prompts.len(), 2);
        assert!(prompts[0].contains("SQL and numerical reporting."));
        assert!(prompts[1].contains(&query));
        assert!(!prompts[1].contains("SQL numerical analyst"));
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "Verify - Numerical Ability");
    }

    #[tokio::test]
    async fn test_unreachable_job_url_falls_back_to_query() {
        let generator = Arc::new(ScriptedGenerator::new("[]"));
        let state = test_state(generator.clone());
        let query = "Assess candidates for http://127.0.0.1:9/jobs/java";

        let result = recommend(&state, query).await.unwrap();

        assert!(result.is_empty());
        // Only the recommendation call reached the model, with the original query.
        let prompts = generator.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains(query));
    }
}
