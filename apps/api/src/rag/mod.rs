//! Retrieval-augmented generation over per-user resume vectors.

pub mod chunker;
pub mod handlers;
pub mod ingest;
pub mod prompts;
pub mod query;
pub mod roadmap;

use crate::vector_index::ScoredPoint;

/// Concatenates retrieved chunk texts into the CONTEXT block of a prompt.
pub(crate) fn join_context(hits: &[ScoredPoint]) -> String {
    let texts: Vec<&str> = hits.iter().filter_map(ScoredPoint::text).collect();
    if texts.is_empty() {
        "No resume content has been indexed for this user yet.".to_string()
    } else {
        texts.join("\n\n")
    }
}
