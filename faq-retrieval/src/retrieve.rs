//! Query path: embed the question, search one category partition, and map
//! scored points into join-ready hits.

use std::sync::Arc;

use ai_llm_service::OpenAiService;
use qdrant_client::Qdrant;
use qdrant_client::qdrant::ScoredPoint;
use qdrant_client::qdrant::point_id::PointIdOptions;
use tracing::{info, warn};

use crate::category::FaqCategory;
use crate::config::RetrievalConfig;
use crate::errors::RetrievalError;
use crate::vector_db;

/// Prefix applied to question text before embedding, both at index-build time
/// and at query time. The two sides must match for distances to mean anything.
pub(crate) const EMBED_PREFIX: &str = "질문: ";

/// One retrieved neighbor, ready for the answer-store join.
#[derive(Debug, Clone)]
pub struct RetrievedQuestion {
    /// Question id as stored in the partition payload (string-typed there).
    pub id: String,
    /// Original question text.
    pub question: String,
    /// Cosine distance to the query (0.0 = identical direction); results are
    /// ordered by non-decreasing distance.
    pub distance: f32,
}

/// Handle over the Qdrant partitions plus the embedding profile.
///
/// Constructed once at bootstrap and shared read-only; no write path exists
/// at serving time apart from the explicit [`FaqRetriever::build_index`]
/// operator action.
pub struct FaqRetriever {
    pub(crate) client: Qdrant,
    pub(crate) cfg: RetrievalConfig,
    pub(crate) embedder: Arc<OpenAiService>,
}

impl FaqRetriever {
    /// Connects to Qdrant with the given config and embedding service.
    ///
    /// # Errors
    /// Returns `RetrievalError::Qdrant` if the client cannot be constructed.
    pub fn new(
        cfg: RetrievalConfig,
        embedder: Arc<OpenAiService>,
    ) -> Result<Self, RetrievalError> {
        let client = vector_db::connect(&cfg)?;
        Ok(Self {
            client,
            cfg,
            embedder,
        })
    }

    /// The configured default neighbor count.
    pub fn top_k(&self) -> usize {
        self.cfg.top_k
    }

    /// Embeds `text` and returns up to `k` nearest questions from the
    /// category's partition, nearest first.
    ///
    /// # Errors
    /// - [`RetrievalError::CollectionNotFound`] when the partition is absent
    ///   (bootstrap defect).
    /// - [`RetrievalError::Embedding`] when the embedding call fails; the
    ///   pipeline short-circuits instead of searching with a missing vector.
    /// - [`RetrievalError::Qdrant`] on search transport/server errors.
    pub async fn search(
        &self,
        category: FaqCategory,
        text: &str,
        k: usize,
    ) -> Result<Vec<RetrievedQuestion>, RetrievalError> {
        let collection = category.collection_name();

        if !vector_db::collection_exists(&self.client, collection).await? {
            return Err(RetrievalError::CollectionNotFound(collection.to_string()));
        }

        let query_vec = self
            .embedder
            .embeddings(&format!("{EMBED_PREFIX}{text}"))
            .await
            .map_err(|e| RetrievalError::Embedding(e.to_string()))?;

        let points =
            vector_db::search_top_k(&self.client, &self.cfg, collection, query_vec, k).await?;

        let hits = hits_from_scored_points(points);

        info!(
            collection,
            hits = hits.len(),
            k,
            "faq search completed"
        );

        Ok(hits)
    }

    /// Checks every partition's `embedding_model` tag against the configured
    /// model. Run at bootstrap: partitions are immutable afterwards, so this
    /// is the interface boundary for the model-identity invariant.
    ///
    /// Missing or empty partitions only log a warning (the operator may be
    /// about to rebuild them); a tag mismatch is a hard error.
    ///
    /// # Errors
    /// Returns [`RetrievalError::ModelMismatch`] naming the first mismatched
    /// partition.
    pub async fn verify_partitions(&self) -> Result<(), RetrievalError> {
        for category in FaqCategory::ALL {
            let collection = category.collection_name();

            if !vector_db::collection_exists(&self.client, collection).await? {
                warn!(collection, "partition missing; run the index build");
                continue;
            }

            match vector_db::sample_embedding_model(&self.client, collection).await? {
                Some(indexed) if indexed != self.cfg.embedding.model => {
                    return Err(RetrievalError::ModelMismatch {
                        collection: collection.to_string(),
                        indexed,
                        configured: self.cfg.embedding.model.clone(),
                    });
                }
                Some(_) => {}
                None => warn!(collection, "partition is empty"),
            }
        }
        Ok(())
    }
}

/// Maps scored points into hits ordered by non-decreasing distance.
///
/// The backend reports cosine similarity; hits expose
/// `distance = 1.0 - similarity` so nearest-first means ascending values.
/// Payload fields are extracted best-effort: a missing `question_id` falls
/// back to the point id.
pub(crate) fn hits_from_scored_points(points: Vec<ScoredPoint>) -> Vec<RetrievedQuestion> {
    let mut hits: Vec<RetrievedQuestion> = points
        .into_iter()
        .map(|sp| {
            let point_id = match sp.id.as_ref().and_then(|pid| pid.point_id_options.as_ref()) {
                Some(PointIdOptions::Num(n)) => n.to_string(),
                Some(PointIdOptions::Uuid(u)) => u.clone(),
                None => String::new(),
            };

            let mut id = point_id;
            let mut question = String::new();

            if let Some(v) = sp.payload.get("question_id") {
                if let Some(s) = v.clone().into_json().as_str() {
                    id = s.to_owned();
                }
            }
            if let Some(v) = sp.payload.get("question") {
                if let Some(s) = v.clone().into_json().as_str() {
                    question = s.to_owned();
                }
            }

            RetrievedQuestion {
                id,
                question,
                distance: 1.0 - sp.score,
            }
        })
        .collect();

    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    hits
}

/// Renders hits as a numbered question-example block for prompt assembly:
/// `1. [ID: <id>] <question>` per line.
pub fn format_questions(hits: &[RetrievedQuestion]) -> String {
    hits.iter()
        .enumerate()
        .map(|(i, h)| format!("{}. [ID: {}] {}", i + 1, h.id, h.question))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use qdrant_client::qdrant::value::Kind;
    use qdrant_client::qdrant::{PointId, Value};
    use std::collections::HashMap;

    fn scored(id: u64, question: &str, score: f32) -> ScoredPoint {
        let mut payload = HashMap::new();
        payload.insert(
            "question_id".to_string(),
            Value {
                kind: Some(Kind::StringValue(id.to_string())),
            },
        );
        payload.insert(
            "question".to_string(),
            Value {
                kind: Some(Kind::StringValue(question.to_string())),
            },
        );
        ScoredPoint {
            id: Some(PointId {
                point_id_options: Some(PointIdOptions::Num(id)),
            }),
            payload,
            score,
            ..Default::default()
        }
    }

    #[test]
    fn hits_are_ordered_by_nondecreasing_distance() {
        let points = vec![
            scored(2, "두번째 질문", 0.80),
            scored(1, "첫번째 질문", 0.95),
            scored(3, "세번째 질문", 0.40),
        ];
        let hits = hits_from_scored_points(points);
        assert_eq!(hits.len(), 3);
        assert_eq!(hits[0].id, "1");
        assert!(hits.windows(2).all(|w| w[0].distance <= w[1].distance));
    }

    #[test]
    fn payload_question_id_wins_over_point_id() {
        let mut point = scored(5, "질문", 0.9);
        point.payload.insert(
            "question_id".to_string(),
            Value {
                kind: Some(Kind::StringValue("42".to_string())),
            },
        );
        let hits = hits_from_scored_points(vec![point]);
        assert_eq!(hits[0].id, "42");
    }

    #[test]
    fn missing_payload_falls_back_to_point_id() {
        let point = ScoredPoint {
            id: Some(PointId {
                point_id_options: Some(PointIdOptions::Num(7)),
            }),
            score: 0.5,
            ..Default::default()
        };
        let hits = hits_from_scored_points(vec![point]);
        assert_eq!(hits[0].id, "7");
        assert_eq!(hits[0].question, "");
    }

    #[test]
    fn format_questions_numbers_in_order() {
        let hits = vec![
            RetrievedQuestion {
                id: "1".into(),
                question: "회원가입은 어떻게 하나요?".into(),
                distance: 0.1,
            },
            RetrievedQuestion {
                id: "2".into(),
                question: "탈퇴는 어떻게 하나요?".into(),
                distance: 0.2,
            },
        ];
        let block = format_questions(&hits);
        assert_eq!(
            block,
            "1. [ID: 1] 회원가입은 어떻게 하나요?\n2. [ID: 2] 탈퇴는 어떻게 하나요?"
        );
    }

    #[test]
    fn format_questions_empty_is_empty() {
        assert_eq!(format_questions(&[]), "");
    }
}
