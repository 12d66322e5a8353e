//! Resume ingestion pipeline: PDF → chunks → embeddings → tagged upsert.
//!
//! No partial success: any failed stage aborts the whole call, and nothing
//! is retried here. Re-ingesting the same file produces a second, independent
//! set of vectors.

use std::path::Path;

use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::llm_client::GeminiClient;
use crate::rag::chunker::split_text;
use crate::vector_index::{Point, VectorError, VectorIndexClient};

/// Extracts, chunks, embeds, and upserts one resume for `owner_id`.
/// Every stored vector carries the owner tag in its payload.
/// Returns the number of chunks produced.
pub async fn ingest_resume(
    llm: &GeminiClient,
    vectors: &VectorIndexClient,
    file_path: &Path,
    owner_id: &str,
) -> Result<usize, AppError> {
    let path = file_path.to_path_buf();
    // pdf-extract is CPU-bound; keep it off the async runtime threads.
    let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text(&path))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e)))?
        .map_err(|e| AppError::Ingestion(format!("failed to extract PDF text: {e}")))?;

    let chunks = split_text(&text);
    if chunks.is_empty() {
        return Err(AppError::Ingestion(
            "no text could be extracted from the document".to_string(),
        ));
    }
    info!("Split resume into {} chunks", chunks.len());

    let mut points = Vec::with_capacity(chunks.len());
    for (index, chunk) in chunks.iter().enumerate() {
        let embedding = llm
            .embed(chunk)
            .await
            .map_err(|e| AppError::Ingestion(format!("embedding failed: {e}")))?;
        points.push(Point {
            id: Uuid::new_v4(),
            vector: embedding,
            payload: json!({
                "owner_id": owner_id,
                "text": chunk,
                "chunk_index": index,
            }),
        });
    }

    vectors
        .ensure_collection(points[0].vector.len())
        .await
        .map_err(vector_to_ingestion)?;
    vectors.upsert(points).await.map_err(vector_to_ingestion)?;

    info!("Ingested {} vectors for owner {owner_id}", chunks.len());
    Ok(chunks.len())
}

fn vector_to_ingestion(e: VectorError) -> AppError {
    match e {
        VectorError::Unreachable(msg) => AppError::VectorUnavailable(msg),
        other => AppError::Ingestion(format!("vector upsert failed: {other}")),
    }
}
