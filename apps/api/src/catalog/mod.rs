// Catalog + embedding index: the read-only retrieval state built once at startup.
// Everything here is immutable after `RetrievalContext::load` returns.

pub mod embed_job;
pub mod index;
pub mod record;
pub mod store;

use std::path::Path;

use thiserror::Error;
use tracing::info;

use crate::catalog::index::{verify_alignment, EmbeddingIndex, EmbeddingsFile};
use crate::catalog::store::Catalog;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog '{path}': {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("Catalog contains no assessments")]
    Empty,
}

#[derive(Debug, Error)]
pub enum IndexError {
    #[error("Failed to read embeddings '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode embeddings '{path}': {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Embedding matrix is empty")]
    Empty,

    #[error("Embedding dimension is zero")]
    ZeroDimension,

    #[error("Embedding row {row} has {got} dims, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        got: usize,
    },

    #[error("Catalog has {documents} documents but the embedding matrix has {rows} rows; regenerate both together")]
    RowCountMismatch { documents: usize, rows: usize },

    #[error("Embedding file was built from a different catalog (hash {expected}, catalog hashes to {actual}); regenerate both together")]
    HashMismatch { expected: String, actual: String },

    #[error("Query vector has {got} dims, index expects {expected}")]
    QueryDimension { expected: usize, got: usize },
}

/// Catalog, rendered documents and their embedding index, row-aligned.
/// Shared by all requests through `Arc`; never mutated after construction.
#[derive(Debug)]
pub struct RetrievalContext {
    pub catalog: Catalog,
    documents: Vec<String>,
    index: EmbeddingIndex,
}

impl RetrievalContext {
    /// Loads both static artifacts and refuses to build if they are not aligned.
    pub fn load(catalog_path: &Path, embeddings_path: &Path) -> anyhow::Result<Self> {
        use anyhow::Context;

        let catalog = Catalog::load(catalog_path)?;
        info!("Loaded {} catalog records from {}", catalog.len(), catalog_path.display());

        let embeddings = EmbeddingsFile::read(embeddings_path)?;
        let context = Self::from_parts(catalog, &embeddings).with_context(|| {
            format!(
                "'{}' does not match '{}'",
                embeddings_path.display(),
                catalog_path.display()
            )
        })?;
        info!(
            "Built embedding index: {} rows x {} dims",
            context.index.len(),
            context.index.dimension()
        );
        Ok(context)
    }

    pub fn from_parts(catalog: Catalog, embeddings: &EmbeddingsFile) -> Result<Self, IndexError> {
        let documents = catalog.documents();
        verify_alignment(embeddings, &documents)?;
        let index = EmbeddingIndex::build(&embeddings.vectors)?;
        Ok(Self {
            catalog,
            documents,
            index,
        })
    }

    pub fn documents(&self) -> &[String] {
        &self.documents
    }

    /// Indices of the `k` documents nearest to `query`, nearest first.
    pub fn nearest(&self, query: &[f32], k: usize) -> Result<Vec<usize>, IndexError> {
        self.index.search(query, k)
    }

    /// Joins the documents at `indices` with a blank line, in the given order.
    pub fn context_for(&self, indices: &[usize]) -> String {
        indices
            .iter()
            .filter_map(|&i| self.documents.get(i).map(String::as_str))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
