use sqlx::PgPool;

use crate::llm_client::GeminiClient;
use crate::vector_index::VectorIndexClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// `None` when DATABASE_URL is not configured — history endpoints return
    /// empty lists and chat skips persistence.
    pub db: Option<PgPool>,
    pub llm: GeminiClient,
    pub vectors: VectorIndexClient,
}
