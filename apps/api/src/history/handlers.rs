//! Read-only projections over the conversation store.
//!
//! Both endpoints degrade to an empty list — never an error — when
//! persistence is disabled or a read fails.

use axum::extract::{Path, State};
use axum::Json;
use tracing::warn;
use uuid::Uuid;

use crate::history::store::{list_conversations, list_messages};
use crate::models::conversation::{ConversationSummary, MessageRow};
use crate::state::AppState;

/// GET /api/history/:user_id
///
/// The most recent turn per conversation, newest first.
pub async fn handle_history(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Json<Vec<ConversationSummary>> {
    let Some(pool) = &state.db else {
        return Json(Vec::new());
    };
    match list_conversations(pool, &user_id).await {
        Ok(conversations) => Json(conversations),
        Err(e) => {
            warn!("failed to list conversations for {user_id}: {e}");
            Json(Vec::new())
        }
    }
}

/// GET /api/messages/:conversation_id
pub async fn handle_messages(
    State(state): State<AppState>,
    Path(conversation_id): Path<Uuid>,
) -> Json<Vec<MessageRow>> {
    let Some(pool) = &state.db else {
        return Json(Vec::new());
    };
    match list_messages(pool, conversation_id).await {
        Ok(messages) => Json(messages),
        Err(e) => {
            warn!("failed to list messages for {conversation_id}: {e}");
            Json(Vec::new())
        }
    }
}
