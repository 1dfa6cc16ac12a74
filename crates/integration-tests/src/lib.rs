//! Shared helpers for Soiree integration tests.

#![cfg_attr(not(test), forbid(unsafe_code))]

use secrecy::SecretString;
use sqlx::SqlitePool;

/// Create a migrated in-memory database.
///
/// In-memory `SQLite` databases are private to their connection, so the
/// pool helper caps these at a single connection; every query in a test
/// sees the same data.
///
/// # Panics
///
/// Panics if the pool cannot be created or migrations fail - there is no
/// point continuing a test without a database.
pub async fn test_pool() -> SqlitePool {
    let url = SecretString::from("sqlite::memory:");
    let pool = soiree_site::db::create_pool(&url)
        .await
        .expect("failed to create in-memory pool");
    soiree_site::db::run_migrations(&pool)
        .await
        .expect("failed to run migrations");
    pool
}
