//! CLI command implementations.

pub mod guests;
pub mod migrate;
pub mod seed;

use secrecy::SecretString;
use sqlx::SqlitePool;

/// Connect to the site database using the same env lookup as the server.
///
/// # Errors
///
/// Returns an error if no database URL is configured or the connection
/// fails.
pub async fn connect() -> Result<SqlitePool, Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("SITE_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| "SITE_DATABASE_URL not set")?;

    tracing::info!("Connecting to site database...");
    let pool = soiree_site::db::create_pool(&database_url).await?;
    Ok(pool)
}
