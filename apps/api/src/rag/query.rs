//! Retrieval-augmented chat pipeline: embed the question, search the user's
//! vectors, assemble the prompt, generate.

use serde::Deserialize;
use tracing::debug;

use crate::errors::AppError;
use crate::llm_client::{GeminiClient, LlmError};
use crate::rag::join_context;
use crate::rag::prompts::{CHAT_PROMPT_TEMPLATE, CHAT_SYSTEM};
use crate::vector_index::{VectorError, VectorIndexClient};

/// Resume chunks retrieved per question.
const TOP_K: usize = 5;
/// Conversational sampling temperature.
const TEMPERATURE: f32 = 0.7;
/// Only the most recent turns are replayed into the prompt.
const HISTORY_WINDOW: usize = 4;

/// One prior turn of the conversation, oldest first in the request payload.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryTurn {
    pub role: String,
    pub content: String,
}

/// Answers `question` grounded in the owner's resume vectors.
/// Without an `owner_id` the search runs unfiltered (anonymous mode).
pub async fn answer_question(
    llm: &GeminiClient,
    vectors: &VectorIndexClient,
    question: &str,
    history: &[HistoryTurn],
    owner_id: Option<&str>,
) -> Result<String, AppError> {
    let embedding = llm
        .embed(question)
        .await
        .map_err(|e| AppError::Generation(format!("question embedding failed: {e}")))?;

    let hits = vectors
        .search(&embedding, TOP_K, owner_id)
        .await
        .map_err(vector_to_generation)?;
    debug!(
        "retrieved {} chunks (top score: {:.4})",
        hits.len(),
        hits.first().map(|h| h.score).unwrap_or(0.0)
    );

    let context = join_context(&hits);
    let prompt = build_chat_prompt(history, &context, question);

    llm.generate(&prompt, CHAT_SYSTEM, TEMPERATURE)
        .await
        .map_err(|e| match e {
            // Degraded answer, not an infrastructure fault
            LlmError::EmptyContent => {
                AppError::Generation("model returned an empty answer".to_string())
            }
            other => AppError::Generation(format!("generation failed: {other}")),
        })
}

fn build_chat_prompt(history: &[HistoryTurn], context: &str, question: &str) -> String {
    let start = history.len().saturating_sub(HISTORY_WINDOW);
    let rendered: Vec<String> = history[start..]
        .iter()
        .map(|turn| format!("{}: {}", turn.role.to_uppercase(), turn.content))
        .collect();
    let history_block = if rendered.is_empty() {
        "(no prior turns)".to_string()
    } else {
        rendered.join("\n")
    };

    CHAT_PROMPT_TEMPLATE
        .replace("{history}", &history_block)
        .replace("{context}", context)
        .replace("{question}", question)
}

fn vector_to_generation(e: VectorError) -> AppError {
    match e {
        VectorError::Unreachable(msg) => AppError::VectorUnavailable(msg),
        other => AppError::Generation(format!("vector search failed: {other}")),
    }
}
