//! Flat Euclidean nearest-neighbor index over the precomputed document embeddings.

use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::warn;

use crate::catalog::IndexError;

/// On-disk embedding matrix. Rows are aligned 1:1 with the rendered catalog documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingsFile {
    /// Embedding model that produced the vectors.
    #[serde(default)]
    pub model: Option<String>,
    /// SHA-256 of the rendered documents the vectors were computed from.
    #[serde(default)]
    pub catalog_sha256: Option<String>,
    pub dimension: usize,
    pub vectors: Vec<Vec<f32>>,
}

/// Accepts the versioned object format and the legacy bare matrix.
#[derive(Deserialize)]
#[serde(untagged)]
enum EmbeddingsFormat {
    Versioned(EmbeddingsFile),
    Bare(Vec<Vec<f32>>),
}

impl EmbeddingsFile {
    pub fn read(path: &Path) -> Result<Self, IndexError> {
        let data = std::fs::read(path).map_err(|source| IndexError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_slice(&data).map_err(|source| IndexError::Decode {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn from_slice(data: &[u8]) -> Result<Self, serde_json::Error> {
        Ok(match serde_json::from_slice::<EmbeddingsFormat>(data)? {
            EmbeddingsFormat::Versioned(file) => file,
            EmbeddingsFormat::Bare(vectors) => EmbeddingsFile {
                model: None,
                catalog_sha256: None,
                dimension: vectors.first().map_or(0, Vec::len),
                vectors,
            },
        })
    }

    pub fn write(&self, path: &Path) -> Result<(), IndexError> {
        let data = serde_json::to_vec(self).map_err(|source| IndexError::Decode {
            path: path.display().to_string(),
            source,
        })?;
        std::fs::write(path, data).map_err(|source| IndexError::Io {
            path: path.display().to_string(),
            source,
        })
    }
}

/// Content hash binding an embedding file to the documents it was built from.
pub fn documents_sha256(documents: &[String]) -> String {
    let mut hasher = Sha256::new();
    for doc in documents {
        hasher.update(doc.as_bytes());
        // Separator so ["ab", "c"] and ["a", "bc"] hash differently.
        hasher.update([0u8]);
    }
    hex::encode(hasher.finalize())
}

/// Checks that an embedding file belongs to `documents`: equal row count, a uniform non-zero
/// dimension, and a matching content hash when the file carries one.
pub fn verify_alignment(file: &EmbeddingsFile, documents: &[String]) -> Result<(), IndexError> {
    if file.vectors.is_empty() {
        return Err(IndexError::Empty);
    }
    if file.vectors.len() != documents.len() {
        return Err(IndexError::RowCountMismatch {
            documents: documents.len(),
            rows: file.vectors.len(),
        });
    }
    if file.dimension == 0 {
        return Err(IndexError::ZeroDimension);
    }
    if let Some((row, v)) = file
        .vectors
        .iter()
        .enumerate()
        .find(|(_, v)| v.len() != file.dimension)
    {
        return Err(IndexError::RaggedRow {
            row,
            expected: file.dimension,
            got: v.len(),
        });
    }

    match &file.catalog_sha256 {
        Some(expected) => {
            let actual = documents_sha256(documents);
            if !expected.eq_ignore_ascii_case(&actual) {
                return Err(IndexError::HashMismatch {
                    expected: expected.clone(),
                    actual,
                });
            }
        }
        None => warn!(
            "Embedding file has no catalog hash; only row count and dimension were verified"
        ),
    }

    Ok(())
}

/// Exact (brute-force) L2 index. Built once, read-only afterwards.
#[derive(Debug, Clone)]
pub struct EmbeddingIndex {
    dimension: usize,
    /// Row-major matrix, `len = rows * dimension`.
    data: Vec<f32>,
}

impl EmbeddingIndex {
    pub fn build(vectors: &[Vec<f32>]) -> Result<Self, IndexError> {
        let dimension = vectors.first().map(Vec::len).ok_or(IndexError::Empty)?;
        if dimension == 0 {
            return Err(IndexError::ZeroDimension);
        }
        let mut data = Vec::with_capacity(vectors.len() * dimension);
        for (row, v) in vectors.iter().enumerate() {
            if v.len() != dimension {
                return Err(IndexError::RaggedRow {
                    row,
                    expected: dimension,
                    got: v.len(),
                });
            }
            data.extend_from_slice(v);
        }
        Ok(Self { dimension, data })
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn len(&self) -> usize {
        self.data.len() / self.dimension
    }

    /// Returns up to `k` row indices, nearest first by Euclidean distance.
    /// Exact ties keep insertion order. `k` larger than the index returns every row.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<usize>, IndexError> {
        if query.len() != self.dimension {
            return Err(IndexError::QueryDimension {
                expected: self.dimension,
                got: query.len(),
            });
        }

        let mut scored: Vec<(f32, usize)> = self
            .data
            .chunks_exact(self.dimension)
            .enumerate()
            .map(|(i, row)| (squared_l2(row, query), i))
            .collect();

        // Stable sort: equal distances stay in row order.
        scored.sort_by(|a, b| a.0.total_cmp(&b.0));
        scored.truncate(k);

        Ok(scored.into_iter().map(|(_, i)| i).collect())
    }
}

fn squared_l2(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b)
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}
