//! Page Extractor: turns a job-posting URL into a job description.
//!
//! Flow: fetch HTML → strip to visible text → model isolates responsibilities/requirements →
//! strict JSON decode. Every failure degrades to `None`; the caller falls back to the raw query.

use reqwest::Client;
use scraper::Html;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::llm_client::{extract_fenced_block, LlmError, TextGenerator};
use crate::recommendation::prompts::{JD_EXTRACT_PROMPT_TEMPLATE, JD_EXTRACT_SYSTEM};

/// Page text beyond this many characters is dropped before prompting.
const MAX_PAGE_CHARS: usize = 30_000;

/// Elements whose text is never visible.
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template", "head"];

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("page returned status {0}")]
    Status(u16),

    #[error("page has no visible text")]
    EmptyPage,

    #[error("model call failed: {0}")]
    Llm(#[from] LlmError),

    #[error("model output is not the expected JSON object: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("model returned an empty job description")]
    EmptyDescription,
}

#[derive(Debug, Deserialize)]
struct ExtractedJobDescription {
    #[serde(rename = "Extracted Job Description")]
    job_description: String,
}

/// Fetches `url` and asks the model for its job description.
/// Returns `None` on any failure.
pub async fn extract_job_description(
    http: &Client,
    generator: &dyn TextGenerator,
    url: &str,
) -> Option<String> {
    match try_extract(http, generator, url).await {
        Ok(description) => {
            info!(
                "Extracted {} char job description from {url}",
                description.chars().count()
            );
            Some(description)
        }
        Err(e) => {
            warn!("Job description extraction failed for {url}: {e}");
            None
        }
    }
}

async fn try_extract(
    http: &Client,
    generator: &dyn TextGenerator,
    url: &str,
) -> Result<String, ExtractionError> {
    let response = http.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(ExtractionError::Status(status.as_u16()));
    }
    let html = response.text().await?;

    let page_text = truncate_chars(html_to_text(&html), MAX_PAGE_CHARS);
    if page_text.is_empty() {
        return Err(ExtractionError::EmptyPage);
    }
    debug!("Fetched {url}: {} chars of visible text", page_text.len());

    let prompt = JD_EXTRACT_PROMPT_TEMPLATE.replace("{page_text}", &page_text);
    let raw = generator.generate(&prompt, JD_EXTRACT_SYSTEM).await?;
    parse_extraction(&raw)
}

/// Visible text of an HTML document: hidden elements dropped, whitespace collapsed to
/// single spaces.
pub fn html_to_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut words: Vec<&str> = Vec::new();

    for node in document.root_element().descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|el| HIDDEN_ELEMENTS.contains(&el.name()))
        });
        if !hidden {
            words.extend(text.split_whitespace());
        }
    }

    words.join(" ")
}

/// Strict decode of the model's `{"Extracted Job Description": ...}` reply.
/// The reply is only ever parsed as JSON.
fn parse_extraction(raw: &str) -> Result<String, ExtractionError> {
    let parsed: ExtractedJobDescription = serde_json::from_str(extract_fenced_block(raw))?;
    let description = parsed.job_description.trim();
    if description.is_empty() {
        return Err(ExtractionError::EmptyDescription);
    }
    Ok(description.to_string())
}

fn truncate_chars(text: String, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => text[..cut].to_string(),
        None => text,
    }
}
