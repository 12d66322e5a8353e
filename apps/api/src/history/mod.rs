//! Conversation persistence — append-only turn log and its read projections.

pub mod handlers;
pub mod store;
