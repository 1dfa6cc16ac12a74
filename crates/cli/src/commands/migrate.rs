//! Database migration command.

/// Run the site database migrations.
///
/// # Errors
///
/// Returns an error if the connection or any migration fails.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let pool = super::connect().await?;

    tracing::info!("Running site migrations...");
    soiree_site::db::run_migrations(&pool).await?;

    tracing::info!("Site migrations complete!");
    Ok(())
}
