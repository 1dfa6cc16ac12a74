//! Database access for the site's `SQLite` store.
//!
//! # Tables
//!
//! - `guests` - guest registrations and their approval state
//! - `tower_sessions` - admin session storage (created by the session store)
//!
//! # Migrations
//!
//! Migrations are embedded from `crates/site/migrations/` and run via:
//! ```bash
//! cargo run -p soiree-cli -- migrate
//! ```
//! They are not run implicitly at server startup.

use std::str::FromStr;
use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use thiserror::Error;

pub mod guests;

pub use guests::GuestRepository;

/// Errors from repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// A guest with the same email is already registered. The unique index
    /// on `guests.email` is the authoritative source of this error.
    #[error("this email is already registered")]
    DuplicateEmail,

    /// The targeted guest record does not exist.
    #[error("guest not found")]
    NotFound,

    /// The database rejected or failed the operation.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A stored value no longer parses into its domain type.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

/// Create a `SQLite` connection pool with sensible defaults.
///
/// The database file is created if missing. In-memory databases
/// (`sqlite::memory:`) are private to each connection, so those pools are
/// capped at a single connection to keep every query on the same data.
///
/// # Errors
///
/// Returns `sqlx::Error` if the URL is invalid or the connection cannot be
/// established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<SqlitePool, sqlx::Error> {
    let url = database_url.expose_secret();
    let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

    let max_connections = if url.contains(":memory:") { 1 } else { 5 };

    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await
}

/// Run the embedded migrations against `pool`.
///
/// # Errors
///
/// Returns a `MigrateError` if any migration fails to apply.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
