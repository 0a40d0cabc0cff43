//! Unified error type for retrieval operations.

use thiserror::Error;

/// Top-level error for the `faq-retrieval` crate.
#[derive(Debug, Error)]
pub enum RetrievalError {
    /// A category's collection does not exist. This is a configuration or
    /// bootstrap defect (the six partitions are expected before serving),
    /// not a normal runtime condition.
    #[error("collection not found: {0}")]
    CollectionNotFound(String),

    /// The embedding call failed; the caller must short-circuit rather than
    /// search with a missing vector.
    #[error("embedding unavailable: {0}")]
    Embedding(String),

    /// Qdrant transport/server errors (wrapped).
    #[error("qdrant error: {0}")]
    Qdrant(String),

    /// Invalid or unsupported configuration.
    #[error("invalid retrieval config: {0}")]
    InvalidConfig(String),

    /// A partition was built with a different embedding model than the one
    /// configured for queries; distances across models are meaningless.
    #[error(
        "embedding model mismatch in {collection}: indexed with {indexed}, configured {configured}"
    )]
    ModelMismatch {
        collection: String,
        indexed: String,
        configured: String,
    },
}
