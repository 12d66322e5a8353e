use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// History listing entry: the most recent turn's metadata per conversation,
/// derived at read time — there is no separate conversations table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ConversationSummary {
    pub id: Uuid,
    pub title: String,
    pub last_updated: DateTime<Utc>,
}

/// Projection returned by the message-listing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MessageRow {
    pub sender: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}
