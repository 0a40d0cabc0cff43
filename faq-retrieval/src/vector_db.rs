//! Qdrant helpers: connection lifecycle, collection reset, batched upserts,
//! and top-K search using the modern `qdrant_client` API.
//!
//! Keeps the vector-store concerns isolated:
//! - Connect to Qdrant over gRPC (`qdrant_client::Qdrant`).
//! - Recreate a collection (drop → create) with the right dim/metric.
//! - Upsert points in batches (numeric ids + dense vector + payload).
//! - Perform k-NN search within one collection.
//!
//! This module does not read CSVs or create embeddings — only DB I/O.

use qdrant_client::qdrant::{
    CreateCollectionBuilder, Distance, PointStruct, ScoredPoint, ScrollPointsBuilder,
    SearchPointsBuilder, UpsertPointsBuilder, VectorParamsBuilder,
};
use qdrant_client::{Payload, Qdrant};
use serde_json::json;

use crate::config::RetrievalConfig;
use crate::errors::RetrievalError;

/// Payload stored with every indexed question.
///
/// `question_id` is the join key against the answer corpus;
/// `embedding_model` tags the partition with the model that produced its
/// vectors so mismatched queries can be refused.
#[derive(Debug, Clone)]
pub(crate) struct QuestionPayload {
    pub question_id: String,
    pub question: String,
    pub embedding_model: String,
}

/// Establish a gRPC connection to Qdrant using `cfg.qdrant_url`.
///
/// This call does not touch any collections.
///
/// # Errors
/// Returns `RetrievalError::Qdrant` if the client cannot be constructed.
pub(crate) fn connect(cfg: &RetrievalConfig) -> Result<Qdrant, RetrievalError> {
    Qdrant::from_url(&cfg.qdrant_url)
        .build()
        .map_err(|e| RetrievalError::Qdrant(format!("client build: {e}")))
}

/// Whether the named collection exists.
pub(crate) async fn collection_exists(
    client: &Qdrant,
    collection: &str,
) -> Result<bool, RetrievalError> {
    client
        .collection_exists(collection)
        .await
        .map_err(|e| RetrievalError::Qdrant(format!("collection_exists: {e}")))
}

/// Drop the collection (if present) and create a new one with the configured
/// vector size and cosine distance. Guarantees a clean partition and prevents
/// stale vectors from an earlier build.
///
/// # Errors
/// Returns `RetrievalError::Qdrant` on transport/server failures when creating.
pub(crate) async fn reset_collection(
    client: &Qdrant,
    cfg: &RetrievalConfig,
    collection: &str,
) -> Result<(), RetrievalError> {
    // Best-effort delete: ignore errors (e.g., not found) to keep idempotency.
    let _ = client.delete_collection(collection).await;

    client
        .create_collection(
            CreateCollectionBuilder::new(collection).vectors_config(VectorParamsBuilder::new(
                cfg.embedding.dim as u64,
                Distance::Cosine,
            )),
        )
        .await
        .map_err(|e| RetrievalError::Qdrant(format!("create_collection: {e}")))?;

    Ok(())
}

fn payload_to_qdrant(payload: &QuestionPayload) -> Result<Payload, RetrievalError> {
    let as_json = json!({
        "question_id": payload.question_id,
        "question": payload.question,
        "embedding_model": payload.embedding_model,
    });
    as_json
        .try_into()
        .map_err(|e| RetrievalError::Qdrant(format!("payload convert: {e}")))
}

/// Upsert a batch of points: `(question_id, vector, payload)`.
///
/// The vector length must equal `cfg.embedding.dim`. Returns the number of
/// upserted points.
///
/// # Errors
/// - `InvalidConfig` if any vector has the wrong dimensionality.
/// - `Qdrant` on transport/server errors.
pub(crate) async fn upsert_batch(
    client: &Qdrant,
    cfg: &RetrievalConfig,
    collection: &str,
    batch: Vec<(u64, Vec<f32>, QuestionPayload)>,
) -> Result<usize, RetrievalError> {
    if batch.is_empty() {
        return Ok(0);
    }

    let dim = cfg.embedding.dim;
    let mut points: Vec<PointStruct> = Vec::with_capacity(batch.len());

    for (id, vector, payload) in batch {
        if vector.len() != dim {
            return Err(RetrievalError::InvalidConfig(format!(
                "vector length {} != EMBEDDING_DIM {} for id {}",
                vector.len(),
                dim,
                id
            )));
        }

        let q_payload = payload_to_qdrant(&payload)?;
        points.push(PointStruct::new(id, vector, q_payload));
    }

    let point_len = points.len();

    client
        .upsert_points(UpsertPointsBuilder::new(collection, points).wait(true))
        .await
        .map_err(|e| RetrievalError::Qdrant(format!("upsert_points: {e}")))?;

    Ok(point_len)
}

/// Run k-NN search for a query vector within one collection, payload included.
///
/// # Errors
/// - `InvalidConfig` if the query vector length mismatches `EMBEDDING_DIM`.
/// - `Qdrant` on transport/server errors.
pub(crate) async fn search_top_k(
    client: &Qdrant,
    cfg: &RetrievalConfig,
    collection: &str,
    query_vec: Vec<f32>,
    k: usize,
) -> Result<Vec<ScoredPoint>, RetrievalError> {
    if query_vec.len() != cfg.embedding.dim {
        return Err(RetrievalError::InvalidConfig(format!(
            "query vector length {} != EMBEDDING_DIM {}",
            query_vec.len(),
            cfg.embedding.dim
        )));
    }

    let builder = SearchPointsBuilder::new(collection, query_vec, k as u64).with_payload(true);

    let resp = client
        .search_points(builder)
        .await
        .map_err(|e| RetrievalError::Qdrant(format!("search_points: {e}")))?;

    Ok(resp.result)
}

/// Reads the `embedding_model` tag from one stored point, if the collection
/// holds any points.
pub(crate) async fn sample_embedding_model(
    client: &Qdrant,
    collection: &str,
) -> Result<Option<String>, RetrievalError> {
    let resp = client
        .scroll(
            ScrollPointsBuilder::new(collection)
                .limit(1)
                .with_payload(true),
        )
        .await
        .map_err(|e| RetrievalError::Qdrant(format!("scroll: {e}")))?;

    let model = resp.result.into_iter().next().and_then(|point| {
        point
            .payload
            .get("embedding_model")
            .and_then(|v| v.clone().into_json().as_str().map(str::to_owned))
    });

    Ok(model)
}
