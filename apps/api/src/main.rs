mod config;
mod db;
mod errors;
mod history;
mod llm_client;
mod models;
mod rag;
mod routes;
mod state;
mod vector_index;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_optional_pool;
use crate::llm_client::GeminiClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::vector_index::VectorIndexClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (aborts on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CareerPath API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL (optional — history features degrade without it)
    let db = create_optional_pool(config.database_url.as_deref()).await?;

    // Initialize Gemini client (generation + embeddings)
    let llm = GeminiClient::new(
        config.google_api_key.clone(),
        config.embedding_model.clone(),
        config.generation_model.clone(),
    );
    info!(
        "Gemini client initialized (generation: {}, embeddings: {})",
        config.generation_model, config.embedding_model
    );

    // Initialize vector index client
    let vectors = VectorIndexClient::new(
        config.qdrant_url.clone(),
        config.qdrant_api_key.clone(),
        config.vector_collection.clone(),
    );
    info!(
        "Vector index client initialized (collection: {})",
        config.vector_collection
    );

    // Build app state
    let state = AppState { db, llm, vectors };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
