//! Offline job that regenerates the embedding file from the catalog.
//!
//! The output is stamped with the SHA-256 of the rendered documents, so the server refuses
//! to start if the catalog is later edited without re-running this job.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::catalog::index::{documents_sha256, EmbeddingsFile};
use crate::catalog::store::Catalog;
use crate::llm_client::retry::{with_retry, RetryPolicy};
use crate::llm_client::Embedder;

/// Embeds every catalog document, in row order, with the same retry policy as query embedding.
pub async fn build_embeddings(
    catalog: &Catalog,
    embedder: &dyn Embedder,
    policy: RetryPolicy,
    model: Option<String>,
) -> Result<EmbeddingsFile> {
    let documents = catalog.documents();
    let mut vectors: Vec<Vec<f32>> = Vec::with_capacity(documents.len());

    for (i, doc) in documents.iter().enumerate() {
        let vector = with_retry(policy, "Document embedding", move || embedder.embed(doc))
            .await
            .with_context(|| format!("Failed to embed catalog row {}", i + 1))?;

        if let Some(first) = vectors.first().map(Vec::len) {
            anyhow::ensure!(
                vector.len() == first,
                "Embedding for row {} has {} dims, earlier rows have {}",
                i + 1,
                vector.len(),
                first
            );
        }
        vectors.push(vector);

        if (i + 1) % 25 == 0 {
            info!("Embedded {}/{} documents", i + 1, documents.len());
        }
    }

    Ok(EmbeddingsFile {
        model,
        catalog_sha256: Some(documents_sha256(&documents)),
        dimension: vectors.first().map_or(0, Vec::len),
        vectors,
    })
}

/// Loads the catalog, embeds it and writes the embedding file to `output`.
pub async fn run(
    catalog_path: &Path,
    output: &Path,
    embedder: &dyn Embedder,
    policy: RetryPolicy,
    model: Option<String>,
) -> Result<()> {
    let catalog = Catalog::load(catalog_path)?;
    info!(
        "Embedding {} catalog documents from {}",
        catalog.len(),
        catalog_path.display()
    );

    let file = build_embeddings(&catalog, embedder, policy, model).await?;
    file.write(output)?;

    info!(
        "Wrote {} x {} embeddings to {}",
        file.vectors.len(),
        file.dimension,
        output.display()
    );
    Ok(())
}
