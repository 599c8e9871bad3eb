use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_CATALOG_BASE_URL: &str = "https://www.shl.com/solutions/products/product-catalog/";

/// Application configuration loaded from environment variables.
/// Startup fails if the API key is missing or a numeric variable does not parse.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub gemini_base_url: String,
    pub embedding_model: String,
    pub generation_model: String,
    pub catalog_path: PathBuf,
    pub embeddings_path: PathBuf,
    /// Generic catalog root used as the URL of placeholder assessments.
    pub catalog_base_url: String,
    /// Maximum number of assessments the model is asked to return.
    pub top_k: usize,
    /// Number of nearest documents passed to the model as context.
    pub top_k_indexes: usize,
    pub embed_max_attempts: u32,
    pub embed_retry_delay: Duration,
    pub http_timeout: Duration,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup. `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let gemini_api_key = lookup("GEMINI_API_KEY")
            .or_else(|| lookup("API_KEY"))
            .filter(|key| !key.trim().is_empty())
            .context("Required environment variable 'GEMINI_API_KEY' is not set")?;

        let string_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Config {
            gemini_api_key,
            gemini_base_url: string_or("GEMINI_BASE_URL", DEFAULT_GEMINI_BASE_URL),
            embedding_model: string_or("EMBEDDING_MODEL", "embedding-001"),
            generation_model: string_or("GENERATION_MODEL", "gemini-2.0-flash-001"),
            catalog_path: PathBuf::from(string_or("CATALOG_PATH", "shl_assessments_full.csv")),
            embeddings_path: PathBuf::from(string_or(
                "EMBEDDINGS_PATH",
                "shl_gemini_embeddings.json",
            )),
            catalog_base_url: string_or("CATALOG_BASE_URL", DEFAULT_CATALOG_BASE_URL),
            top_k: parse_or(&lookup, "TOP_K", 10)?,
            top_k_indexes: parse_or(&lookup, "TOP_K_INDEXES", 30)?,
            embed_max_attempts: parse_or(&lookup, "EMBED_MAX_ATTEMPTS", 3)?,
            embed_retry_delay: Duration::from_secs(parse_or(
                &lookup,
                "EMBED_RETRY_DELAY_SECS",
                5,
            )?),
            http_timeout: Duration::from_secs(parse_or(&lookup, "HTTP_TIMEOUT_SECS", 120)?),
            port: parse_or(&lookup, "PORT", 8080)?,
            rust_log: string_or("RUST_LOG", "info"),
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        None => Ok(default),
    }
}
