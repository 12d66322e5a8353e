use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

/// Creates a PostgreSQL pool when a DATABASE_URL is configured.
/// Returns `None` when it is not — the conversation store is optional and
/// every caller must degrade gracefully without it.
pub async fn create_optional_pool(database_url: Option<&str>) -> Result<Option<PgPool>> {
    let Some(url) = database_url else {
        info!("DATABASE_URL not set; conversation persistence disabled");
        return Ok(None);
    };

    info!("Connecting to PostgreSQL...");
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(url)
        .await?;

    info!("PostgreSQL connection pool established");
    Ok(Some(pool))
}
