pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::history;
use crate::rag;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health::health_handler))
        .route(
            "/api/upload_resume",
            post(rag::handlers::handle_upload_resume),
        )
        .route("/api/chat", post(rag::handlers::handle_chat))
        .route("/api/roadmap", post(rag::handlers::handle_roadmap))
        .route(
            "/api/history/:user_id",
            get(history::handlers::handle_history),
        )
        .route(
            "/api/messages/:conversation_id",
            get(history::handlers::handle_messages),
        )
        .with_state(state)
}
