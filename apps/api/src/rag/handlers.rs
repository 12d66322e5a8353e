//! Axum route handlers for upload, chat, and roadmap.

use axum::extract::{Multipart, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::history::store::record_exchange;
use crate::rag::ingest::ingest_resume;
use crate::rag::query::{answer_question, HistoryTurn};
use crate::rag::roadmap::{build_roadmap, RoadmapPlan};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub chunks_processed: usize,
    pub filename: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub history: Vec<HistoryTurn>,
    pub user_id: Option<String>,
    pub conversation_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub conversation_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct RoadmapRequest {
    pub target_role: String,
    pub user_id: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/upload_resume
///
/// Receives a resume PDF and runs the ingestion pipeline. The upload is
/// spooled to a scoped temporary file that is removed on every exit path.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let owner_id = headers
        .get("user-id")
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(String::from)
        .ok_or(AppError::Unauthorized)?;

    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field
            .file_name()
            .map(String::from)
            .ok_or_else(|| AppError::Validation("uploaded file has no filename".to_string()))?;
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("failed to read upload: {e}")))?;
        upload = Some((filename, data));
        break;
    }
    let (filename, data) =
        upload.ok_or_else(|| AppError::Validation("missing 'file' field".to_string()))?;

    if !is_pdf_filename(&filename) {
        return Err(AppError::Validation(
            "Invalid file type. Please upload a PDF.".to_string(),
        ));
    }

    // NamedTempFile removes the file on drop — success, error, or panic.
    let temp = NamedTempFile::new().map_err(|e| AppError::Internal(anyhow::anyhow!(e)))?;
    tokio::fs::write(temp.path(), &data)
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e)))?;

    let chunks_processed = ingest_resume(&state.llm, &state.vectors, temp.path(), &owner_id).await?;
    info!("Indexed '{filename}' for owner {owner_id}: {chunks_processed} chunks");

    Ok(Json(UploadResponse {
        status: "success",
        message: "Resume successfully indexed",
        chunks_processed,
        filename,
    }))
}

/// POST /api/chat
///
/// Answers a question grounded in the caller's resume vectors, then appends
/// the exchange to the conversation store when persistence is available.
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    if request.message.trim().is_empty() {
        return Err(AppError::Validation("message cannot be empty".to_string()));
    }

    let answer = answer_question(
        &state.llm,
        &state.vectors,
        &request.message,
        &request.history,
        request.user_id.as_deref(),
    )
    .await?;

    let conversation_id = request.conversation_id.unwrap_or_else(Uuid::new_v4);

    // Persistence is best-effort: a failed write never degrades the answer.
    if let (Some(pool), Some(user_id)) = (&state.db, request.user_id.as_deref()) {
        if let Err(e) =
            record_exchange(pool, user_id, conversation_id, &request.message, &answer).await
        {
            warn!("failed to persist conversation turns: {e}");
        }
    }

    Ok(Json(ChatResponse {
        response: answer,
        conversation_id,
    }))
}

/// POST /api/roadmap
pub async fn handle_roadmap(
    State(state): State<AppState>,
    Json(request): Json<RoadmapRequest>,
) -> Result<Json<RoadmapPlan>, AppError> {
    if request.target_role.trim().is_empty() {
        return Err(AppError::Validation(
            "target_role cannot be empty".to_string(),
        ));
    }

    let plan = build_roadmap(
        &state.llm,
        &state.vectors,
        &request.target_role,
        request.user_id.as_deref(),
    )
    .await?;

    Ok(Json(plan))
}

fn is_pdf_filename(name: &str) -> bool {
    std::path::Path::new(name)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_filename_accepted() {
        assert!(is_pdf_filename("resume.pdf"));
    }

    #[test]
    fn test_pdf_filename_case_insensitive() {
        assert!(is_pdf_filename("Resume.PDF"));
    }

    #[test]
    fn test_docx_rejected() {
        assert!(!is_pdf_filename("report.docx"));
    }

    #[test]
    fn test_no_extension_rejected() {
        assert!(!is_pdf_filename("resume"));
        assert!(!is_pdf_filename("resume.pdf.exe"));
    }

    #[test]
    fn test_chat_request_defaults() {
        let request: ChatRequest = serde_json::from_str(r#"{"message": "hi"}"#).unwrap();
        assert!(request.history.is_empty());
        assert!(request.user_id.is_none());
        assert!(request.conversation_id.is_none());
    }

    #[test]
    fn test_chat_request_full_payload() {
        let request: ChatRequest = serde_json::from_str(
            r#"{
                "message": "What should I learn next?",
                "history": [{"role": "user", "content": "hello"}],
                "user_id": "alice",
                "conversation_id": "00000000-0000-0000-0000-000000000001"
            }"#,
        )
        .unwrap();
        assert_eq!(request.history.len(), 1);
        assert_eq!(request.user_id.as_deref(), Some("alice"));
    }
}
