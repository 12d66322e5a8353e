//! Conversation store queries.
//!
//! Turns are append-only; listings are reconstructed at read time rather
//! than kept in a separate conversations table.

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::conversation::{ConversationSummary, MessageRow};

const TITLE_MAX_CHARS: usize = 60;

/// Appends the user and model turns of one chat exchange — exactly two rows,
/// user first. Order within a conversation is `created_at`, serial id as the
/// tiebreaker.
pub async fn record_exchange(
    pool: &PgPool,
    user_id: &str,
    conversation_id: Uuid,
    user_message: &str,
    model_message: &str,
) -> sqlx::Result<()> {
    let title = derive_title(user_message);

    sqlx::query(
        "INSERT INTO conversation_turns (user_id, conversation_id, sender, message, title)
         VALUES ($1, $2, 'user', $3, $4)",
    )
    .bind(user_id)
    .bind(conversation_id)
    .bind(user_message)
    .bind(&title)
    .execute(pool)
    .await?;

    sqlx::query(
        "INSERT INTO conversation_turns (user_id, conversation_id, sender, message, title)
         VALUES ($1, $2, 'model', $3, $4)",
    )
    .bind(user_id)
    .bind(conversation_id)
    .bind(model_message)
    .bind(&title)
    .execute(pool)
    .await?;

    Ok(())
}

/// Most recent turn per conversation for one user, newest conversation first.
pub async fn list_conversations(
    pool: &PgPool,
    user_id: &str,
) -> sqlx::Result<Vec<ConversationSummary>> {
    sqlx::query_as::<_, ConversationSummary>(
        r#"
        SELECT id, title, last_updated FROM (
            SELECT DISTINCT ON (conversation_id)
                conversation_id AS id, title, created_at AS last_updated
            FROM conversation_turns
            WHERE user_id = $1
            ORDER BY conversation_id, created_at DESC, id DESC
        ) latest
        ORDER BY last_updated DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// All turns of one conversation in chronological order.
pub async fn list_messages(
    pool: &PgPool,
    conversation_id: Uuid,
) -> sqlx::Result<Vec<MessageRow>> {
    sqlx::query_as::<_, MessageRow>(
        "SELECT sender, message, created_at FROM conversation_turns
         WHERE conversation_id = $1
         ORDER BY created_at ASC, id ASC",
    )
    .bind(conversation_id)
    .fetch_all(pool)
    .await
}

/// Conversation title shown in history listings: the first line of the
/// user's message, truncated on a char boundary.
fn derive_title(message: &str) -> String {
    let first_line = message.trim().lines().next().unwrap_or("").trim();
    if first_line.is_empty() {
        return "Conversation".to_string();
    }
    if first_line.chars().count() <= TITLE_MAX_CHARS {
        return first_line.to_string();
    }
    let truncated: String = first_line.chars().take(TITLE_MAX_CHARS).collect();
    format!("{}…", truncated.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_short_message_kept_verbatim() {
        assert_eq!(derive_title("How do I become a data engineer?"),
                   "How do I become a data engineer?");
    }

    #[test]
    fn test_title_empty_message_falls_back() {
        assert_eq!(derive_title(""), "Conversation");
        assert_eq!(derive_title("   \n  "), "Conversation");
    }

    #[test]
    fn test_title_uses_first_line_only() {
        assert_eq!(derive_title("First line\nsecond line"), "First line");
    }

    #[test]
    fn test_title_truncates_long_message() {
        let message = "x".repeat(200);
        let title = derive_title(&message);
        assert_eq!(title.chars().count(), TITLE_MAX_CHARS + 1);
        assert!(title.ends_with('…'));
    }

    #[test]
    fn test_title_truncation_is_char_safe() {
        let message = "é".repeat(100);
        let title = derive_title(&message);
        assert_eq!(title.chars().count(), TITLE_MAX_CHARS + 1);
    }
}
