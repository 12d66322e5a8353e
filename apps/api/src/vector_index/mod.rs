//! Qdrant REST client — upsert and owner-filtered similarity search.
//!
//! Single attempt per request: an unreachable backend must surface
//! immediately as a 503, not after a backoff window.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

const DISTANCE: &str = "Cosine";

#[derive(Debug, Error)]
pub enum VectorError {
    /// The backend could not be reached at all (connect/timeout). Maps to 503.
    #[error("vector backend unreachable: {0}")]
    Unreachable(String),

    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

fn transport_error(e: reqwest::Error) -> VectorError {
    if e.is_connect() || e.is_timeout() {
        VectorError::Unreachable(e.to_string())
    } else {
        VectorError::Http(e)
    }
}

/// A vector plus its metadata payload, ready for upsert.
/// The payload always carries `owner_id` and the chunk `text`.
#[derive(Debug, Serialize)]
pub struct Point {
    pub id: Uuid,
    pub vector: Vec<f32>,
    pub payload: serde_json::Value,
}

/// A search hit with its similarity score and stored payload.
#[derive(Debug, Deserialize)]
pub struct ScoredPoint {
    pub score: f32,
    #[serde(default)]
    pub payload: serde_json::Value,
}

impl ScoredPoint {
    pub fn text(&self) -> Option<&str> {
        self.payload.get("text").and_then(|v| v.as_str())
    }
}

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    vector: &'a [f32],
    limit: usize,
    with_payload: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    filter: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    result: Vec<ScoredPoint>,
}

/// Exact-match filter restricting hits to a single owner's vectors.
fn owner_filter(owner_id: &str) -> serde_json::Value {
    json!({
        "must": [
            { "key": "owner_id", "match": { "value": owner_id } }
        ]
    })
}

/// Client for the Qdrant points API, scoped to one collection.
#[derive(Clone)]
pub struct VectorIndexClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    collection: String,
}

impl VectorIndexClient {
    pub fn new(base_url: String, api_key: Option<String>, collection: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to build HTTP client"),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            collection,
        }
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let mut builder = self
            .client
            .request(method, format!("{}{}", self.base_url, path));
        if let Some(key) = &self.api_key {
            builder = builder.header("api-key", key);
        }
        builder
    }

    /// Creates the collection if it does not exist yet.
    /// `vector_size` comes from the first embedding of an ingestion run.
    pub async fn ensure_collection(&self, vector_size: usize) -> Result<(), VectorError> {
        let path = format!("/collections/{}", self.collection);

        let response = self
            .request(reqwest::Method::GET, &path)
            .send()
            .await
            .map_err(transport_error)?;
        if response.status().is_success() {
            return Ok(());
        }
        if response.status().as_u16() != 404 {
            return Err(api_error(response).await);
        }

        debug!(
            "Creating vector collection '{}' (size {vector_size})",
            self.collection
        );
        let body = json!({
            "vectors": { "size": vector_size, "distance": DISTANCE }
        });
        let response = self
            .request(reqwest::Method::PUT, &path)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;
        // 409: another request created it between our check and this call
        if response.status().is_success() || response.status().as_u16() == 409 {
            Ok(())
        } else {
            Err(api_error(response).await)
        }
    }

    /// Upserts points into the collection, waiting for them to be indexed.
    pub async fn upsert(&self, points: Vec<Point>) -> Result<(), VectorError> {
        let path = format!("/collections/{}/points?wait=true", self.collection);
        let response = self
            .request(reqwest::Method::PUT, &path)
            .json(&json!({ "points": points }))
            .send()
            .await
            .map_err(transport_error)?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(api_error(response).await)
        }
    }

    /// Nearest-neighbor search. When `owner_id` is given, candidates are
    /// restricted to that owner's vectors; when it is not, the search runs
    /// unfiltered — the documented anonymous mode.
    pub async fn search(
        &self,
        vector: &[f32],
        limit: usize,
        owner_id: Option<&str>,
    ) -> Result<Vec<ScoredPoint>, VectorError> {
        if owner_id.is_none() {
            debug!("running unfiltered vector search (no owner id supplied)");
        }
        let request = SearchRequest {
            vector,
            limit,
            with_payload: true,
            filter: owner_id.map(owner_filter),
        };

        let path = format!("/collections/{}/points/search", self.collection);
        let response = self
            .request(reqwest::Method::POST, &path)
            .json(&request)
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let parsed: SearchResponse = response.json().await.map_err(VectorError::Http)?;
        Ok(parsed.result)
    }
}

async fn api_error(response: reqwest::Response) -> VectorError {
    let status = response.status().as_u16();
    let message = response.text().await.unwrap_or_default();
    VectorError::Api { status, message }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_filter_shape() {
        let filter = owner_filter("alice");
        assert_eq!(filter["must"][0]["key"], "owner_id");
        assert_eq!(filter["must"][0]["match"]["value"], "alice");
    }

    #[test]
    fn test_search_request_omits_filter_when_unfiltered() {
        let request = SearchRequest {
            vector: &[0.1, 0.2],
            limit: 5,
            with_payload: true,
            filter: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("filter").is_none());
        assert_eq!(json["limit"], 5);
    }

    #[test]
    fn test_search_request_includes_owner_filter() {
        let request = SearchRequest {
            vector: &[0.1],
            limit: 6,
            with_payload: true,
            filter: Some(owner_filter("bob")),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["filter"]["must"][0]["match"]["value"], "bob");
    }

    #[test]
    fn test_point_serializes_payload() {
        let point = Point {
            id: Uuid::nil(),
            vector: vec![1.0],
            payload: json!({"owner_id": "alice", "text": "chunk", "chunk_index": 0}),
        };
        let json = serde_json::to_value(&point).unwrap();
        assert_eq!(json["payload"]["owner_id"], "alice");
        assert_eq!(json["payload"]["chunk_index"], 0);
    }

    #[test]
    fn test_scored_point_text_extraction() {
        let hit: ScoredPoint =
            serde_json::from_str(r#"{"score": 0.9, "payload": {"text": "some chunk"}}"#).unwrap();
        assert_eq!(hit.text(), Some("some chunk"));
    }

    #[test]
    fn test_scored_point_missing_payload() {
        let hit: ScoredPoint = serde_json::from_str(r#"{"score": 0.1}"#).unwrap();
        assert!(hit.text().is_none());
    }
}
