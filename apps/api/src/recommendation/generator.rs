//! Response Generator: asks the model to pick assessments from the retrieved context.
//!
//! The model's reply goes through a strict schema decode. A reply that does not decode is
//! `GeneratorOutput::Malformed`, which the pipeline treats as "no recommendations".

use serde::{Deserialize, Deserializer};
use tracing::{debug, warn};

use crate::errors::AppError;
use crate::llm_client::prompts::GROUNDING_INSTRUCTION;
use crate::llm_client::{extract_fenced_block, TextGenerator};
use crate::recommendation::prompts::{RECOMMEND_PROMPT_TEMPLATE, RECOMMEND_SYSTEM};

/// One group proposed by the model: exam names with positionally aligned durations.
/// Several names in one group form a combination suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RecommendationCandidate {
    #[serde(rename = "Exam Name", deserialize_with = "one_or_many")]
    pub exam_names: Vec<String>,
    #[serde(rename = "Duration", default, deserialize_with = "one_or_many")]
    pub durations: Vec<String>,
}

/// Result of decoding the model's reply.
#[derive(Debug, Clone, PartialEq)]
pub enum GeneratorOutput {
    Parsed(Vec<RecommendationCandidate>),
    Malformed(String),
}

impl GeneratorOutput {
    /// Malformed output degrades to an empty candidate list.
    pub fn into_candidates(self) -> Vec<RecommendationCandidate> {
        match self {
            GeneratorOutput::Parsed(candidates) => candidates,
            GeneratorOutput::Malformed(reason) => {
                warn!("Discarding malformed recommendation output: {reason}");
                Vec::new()
            }
        }
    }
}

/// Accepts `"x"` or `["x", "y"]`.
fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(value) => vec![value],
        OneOrMany::Many(values) => values,
    })
}

/// Fills the recommendation prompt with the retrieved context and the user's query.
pub fn build_prompt(query: &str, context: &str, top_k: usize) -> String {
    RECOMMEND_PROMPT_TEMPLATE
        .replace("{grounding_instruction}", GROUNDING_INSTRUCTION)
        .replace("{context}", context)
        .replace("{top_k}", &top_k.to_string())
        .replace("{query}", query)
}

/// Decodes the model's reply: the first complete fenced block if present, else the whole text,
/// must be a JSON array of candidate objects.
pub fn parse_output(raw: &str) -> GeneratorOutput {
    let body = extract_fenced_block(raw);
    match serde_json::from_str::<Vec<RecommendationCandidate>>(body) {
        Ok(candidates) => GeneratorOutput::Parsed(candidates),
        Err(e) => GeneratorOutput::Malformed(format!(
            "{e} (output began with {:?})",
            body.chars().take(80).collect::<String>()
        )),
    }
}

/// Calls the model once. A failed call is not retried and surfaces as `AppError::Llm`.
pub async fn generate_recommendations(
    generator: &dyn TextGenerator,
    query: &str,
    context: &str,
    top_k: usize,
) -> Result<GeneratorOutput, AppError> {
    let prompt = build_prompt(query, context, top_k);
    debug!("Recommendation prompt: {} chars", prompt.len());

    let raw = generator
        .generate(&prompt, RECOMMEND_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Recommendation generation failed: {e}")))?;

    Ok(parse_output(&raw))
}
