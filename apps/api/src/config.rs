use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Required variables abort startup; optional ones fall back to defaults.
#[derive(Debug, Clone)]
pub struct Config {
    pub google_api_key: String,
    pub qdrant_url: String,
    pub qdrant_api_key: Option<String>,
    pub vector_collection: String,
    /// Absent DATABASE_URL disables conversation persistence entirely.
    pub database_url: Option<String>,
    pub embedding_model: String,
    pub generation_model: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            google_api_key: require_env("GOOGLE_API_KEY")?,
            qdrant_url: require_env("QDRANT_URL")?,
            qdrant_api_key: optional_env("QDRANT_API_KEY"),
            vector_collection: optional_env("VECTOR_COLLECTION")
                .unwrap_or_else(|| "careerpath-ai".to_string()),
            database_url: optional_env("DATABASE_URL"),
            embedding_model: optional_env("EMBEDDING_MODEL")
                .unwrap_or_else(|| "models/embedding-001".to_string()),
            generation_model: optional_env("GENERATION_MODEL")
                .unwrap_or_else(|| "gemini-2.0-flash".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
