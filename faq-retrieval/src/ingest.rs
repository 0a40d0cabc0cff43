//! Offline index build: corpus CSV → six category partitions.
//!
//! Recreates each collection (drop → create), embeds every question with the
//! same prefix the query path uses, and upserts points carrying the
//! `{question_id, question, embedding_model}` payload. This is an operator
//! action, not part of the serving path.

use std::collections::HashMap;
use std::time::Instant;

use answer_store::{AnswerStore, QuestionRecord};
use serde::Serialize;
use tracing::{info, warn};

use crate::category::FaqCategory;
use crate::errors::RetrievalError;
use crate::retrieve::{EMBED_PREFIX, FaqRetriever};
use crate::vector_db::{self, QuestionPayload};

/// Outcome of a full index build.
#[derive(Debug, Clone, Serialize)]
pub struct IndexStats {
    /// Points written across all partitions.
    pub indexed: usize,
    /// Corpus rows skipped (unknown category label).
    pub skipped: usize,
    /// Wall-clock duration of the build.
    pub duration_ms: u128,
}

impl FaqRetriever {
    /// Rebuilds all six partitions from the loaded answer corpus.
    ///
    /// Rows whose category label does not parse are skipped and counted.
    /// Every partition is recreated even when it receives no rows, so the
    /// serving-time invariant (six collections exist) holds after a build.
    ///
    /// # Errors
    /// - [`RetrievalError::InvalidConfig`] when the corpus is empty.
    /// - [`RetrievalError::Embedding`] when an embedding call fails.
    /// - [`RetrievalError::Qdrant`] on collection/upsert failures.
    pub async fn build_index(&self, store: &AnswerStore) -> Result<IndexStats, RetrievalError> {
        if store.is_empty() {
            return Err(RetrievalError::InvalidConfig(
                "answer corpus is empty; nothing to index".into(),
            ));
        }

        info!(records = store.len(), "index build: start");
        let started = Instant::now();

        let mut by_category: HashMap<FaqCategory, Vec<&QuestionRecord>> = HashMap::new();
        let mut skipped = 0usize;

        for record in store.records() {
            match FaqCategory::from_label(&record.category) {
                Some(category) => by_category.entry(category).or_default().push(record),
                None => {
                    skipped += 1;
                    warn!(id = record.id, label = %record.category, "unknown category label, skipping row");
                }
            }
        }

        let mut indexed = 0usize;

        for category in FaqCategory::ALL {
            let collection = category.collection_name();
            let rows = by_category.remove(&category).unwrap_or_default();

            vector_db::reset_collection(&self.client, &self.cfg, collection).await?;
            info!(collection, rows = rows.len(), "partition recreated");

            for chunk in rows.chunks(self.cfg.batch_size) {
                let mut batch = Vec::with_capacity(chunk.len());

                for record in chunk {
                    let vector = self
                        .embedder
                        .embeddings(&format!("{EMBED_PREFIX}{}", record.question))
                        .await
                        .map_err(|e| RetrievalError::Embedding(e.to_string()))?;

                    batch.push((
                        record.id,
                        vector,
                        QuestionPayload {
                            question_id: record.id.to_string(),
                            question: record.question.clone(),
                            embedding_model: self.cfg.embedding.model.clone(),
                        },
                    ));
                }

                indexed +=
                    vector_db::upsert_batch(&self.client, &self.cfg, collection, batch).await?;
            }
        }

        let stats = IndexStats {
            indexed,
            skipped,
            duration_ms: started.elapsed().as_millis(),
        };

        info!(
            indexed = stats.indexed,
            skipped = stats.skipped,
            duration_ms = stats.duration_ms,
            "index build: finished"
        );

        Ok(stats)
    }
}
