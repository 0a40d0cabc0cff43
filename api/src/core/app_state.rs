//! Shared state for all HTTP handlers, built once at process start.

use std::error::Error;
use std::sync::Arc;

use ai_llm_service::{HealthService, LlmModelConfig, LlmSettings, OpenAiService};
use answer_store::AnswerStore;
use chat_core::ChatDeps;
use faq_retrieval::{FaqRetriever, RetrievalConfig};
use tracing::{error, info};

/// Read-only handles shared across requests. No write path exists after
/// construction, so handlers need no locking.
pub struct AppState {
    /// Pipeline dependencies (router/synthesis LLMs, retriever, corpus).
    pub deps: ChatDeps,
    /// Endpoint prober for the health route.
    pub health: HealthService,
    /// Config the health probe reports on.
    pub health_target: LlmModelConfig,
}

impl AppState {
    /// Builds all shared handles from the environment.
    ///
    /// A missing or unreadable answer corpus degrades to an empty store with
    /// an operator log rather than failing startup; a partition built with
    /// the wrong embedding model does fail startup, since every query against
    /// it would be silently meaningless.
    pub async fn from_env() -> Result<Self, Box<dyn Error>> {
        let llm = LlmSettings::from_env()?;
        let router_llm = Arc::new(OpenAiService::new(llm.router.clone())?);
        let synthesis_llm = Arc::new(OpenAiService::new(llm.synthesis)?);
        let embedding_llm = Arc::new(OpenAiService::new(llm.embedding)?);

        let retrieval_cfg = RetrievalConfig::from_env()?;

        let store = match AnswerStore::load(&retrieval_cfg.corpus_csv) {
            Ok(store) => store,
            Err(e) => {
                error!(
                    error = %e,
                    path = %retrieval_cfg.corpus_csv.display(),
                    "answer corpus unavailable; serving with an empty store"
                );
                AnswerStore::empty()
            }
        };

        let retriever = Arc::new(FaqRetriever::new(retrieval_cfg, embedding_llm)?);
        retriever.verify_partitions().await?;

        info!(corpus_records = store.len(), "app state initialized");

        Ok(Self {
            deps: ChatDeps {
                router_llm,
                synthesis_llm,
                retriever,
                store: Arc::new(store),
            },
            health: HealthService::new(Some(10))?,
            health_target: llm.router,
        })
    }
}
