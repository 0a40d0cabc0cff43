//! Runtime settings for the retrieval layer, read from environment variables.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::errors::RetrievalError;

/// Embedding identity and dimensionality used for both index build and query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// Embedding model identifier (e.g., "text-embedding-3-small").
    pub model: String,
    /// Embedding vector dimensionality (1536 for text-embedding-3-small).
    pub dim: usize,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            model: "text-embedding-3-small".to_string(),
            dim: 1536,
        }
    }
}

/// Top-level runtime configuration for retrieval.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// gRPC URL for Qdrant (e.g., "http://localhost:6334").
    pub qdrant_url: String,
    /// Embedding identity; must match what the partitions were built with.
    pub embedding: EmbeddingConfig,
    /// Default number of neighbors per query.
    pub top_k: usize,
    /// Batch size for index-build upserts.
    pub batch_size: usize,
    /// Categorized corpus CSV (index-build input).
    pub corpus_csv: PathBuf,
}

impl RetrievalConfig {
    /// Builds configuration from environment variables.
    ///
    /// Environment variables used:
    /// - `QDRANT_URL` (default: "http://localhost:6334")
    /// - `EMBEDDING_MODEL` (default: "text-embedding-3-small")
    /// - `EMBEDDING_DIM` (default: 1536)
    /// - `FAQ_TOP_K` (default: 5)
    /// - `QDRANT_BATCH_SIZE` (default: 64)
    /// - `FAQ_CSV_PATH` (default: `data/all_categorized_questions.csv`)
    ///
    /// # Errors
    /// Returns [`RetrievalError::InvalidConfig`] when a bound is violated
    /// (zero dimension or top-k).
    pub fn from_env() -> Result<Self, RetrievalError> {
        let embedding = EmbeddingConfig {
            model: std::env::var("EMBEDDING_MODEL")
                .unwrap_or_else(|_| "text-embedding-3-small".into()),
            dim: read_usize_env("EMBEDDING_DIM").unwrap_or(1536),
        };

        let cfg = Self {
            qdrant_url: std::env::var("QDRANT_URL")
                .unwrap_or_else(|_| "http://localhost:6334".into()),
            embedding,
            top_k: read_usize_env("FAQ_TOP_K").unwrap_or(5),
            batch_size: read_usize_env("QDRANT_BATCH_SIZE").unwrap_or(64),
            corpus_csv: std::env::var("FAQ_CSV_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data/all_categorized_questions.csv")),
        };

        if cfg.embedding.dim == 0 {
            return Err(RetrievalError::InvalidConfig(
                "EMBEDDING_DIM must be > 0".into(),
            ));
        }
        if cfg.top_k == 0 {
            return Err(RetrievalError::InvalidConfig("FAQ_TOP_K must be > 0".into()));
        }

        Ok(cfg)
    }
}

fn read_usize_env(key: &str) -> Option<usize> {
    std::env::var(key).ok().and_then(|v| v.parse::<usize>().ok())
}
