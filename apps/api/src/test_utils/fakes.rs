//! In-process stand-ins for the Gemini seams.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::llm_client::{Embedder, LlmError, TextGenerator};

const KEYWORDS: [&str; 6] = ["java", "numerical", "personality", "sql", "developer", "sales"];

/// Bag-of-keywords embedder. One dimension per keyword plus a constant bias, L2-normalized.
pub struct KeywordEmbedder;

impl KeywordEmbedder {
    pub const DIMENSION: usize = KEYWORDS.len() + 1;

    pub fn vector(text: &str) -> Vec<f32> {
        let lower = text.to_lowercase();
        let mut v: Vec<f32> = KEYWORDS
            .iter()
            .map(|k| if lower.contains(k) { 1.0 } else { 0.0 })
            .collect();
        v.push(1.0);
        let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        v.iter().map(|x| x / norm).collect()
    }
}

#[async_trait]
impl Embedder for KeywordEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, LlmError> {
        Ok(Self::vector(text))
    }
}

/// `KeywordEmbedder` that records every text it was asked to embed.
#[derive(Default)]
pub struct RecordingEmbedder {
    inputs: Mutex<Vec<String>>,
}

impl RecordingEmbedder {
    pub fn inputs(&self) -> Vec<String> {
        self.inputs.lock().unwrap().clone()
    }
}

#[async_trait]
impl Embedder for RecordingEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, LlmError> {
        self.inputs.lock().unwrap().push(text.to_string());
        Ok(KeywordEmbedder::vector(text))
    }
}

/// Always fails with a 503 and counts attempts.
#[derive(Default)]
pub struct FailingEmbedder {
    pub calls: AtomicU32,
}

#[async_trait]
impl Embedder for FailingEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(LlmError::Api {
            status: 503,
            message: "model overloaded".to_string(),
        })
    }
}

/// Returns the same canned response for every call and records the prompts it saw.
pub struct ScriptedGenerator {
    response: String,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, prompt: &str, _system: &str) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(self.response.clone())
    }
}

/// Returns its replies in order, one per call, repeating the last one when exhausted.
pub struct SequencedGenerator {
    replies: Vec<String>,
    prompts: Mutex<Vec<String>>,
}

impl SequencedGenerator {
    pub fn new(replies: &[&str]) -> Self {
        Self {
            replies: replies.iter().map(|r| r.to_string()).collect(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for SequencedGenerator {
    async fn generate(&self, prompt: &str, _system: &str) -> Result<String, LlmError> {
        let mut prompts = self.prompts.lock().unwrap();
        prompts.push(prompt.to_string());
        let i = (prompts.len() - 1).min(self.replies.len().saturating_sub(1));
        self.replies.get(i).cloned().ok_or(LlmError::EmptyContent)
    }
}

pub struct FailingGenerator;

#[async_trait]
impl TextGenerator for FailingGenerator {
    async fn generate(&self, _prompt: &str, _system: &str) -> Result<String, LlmError> {
        Err(LlmError::EmptyContent)
    }
}
