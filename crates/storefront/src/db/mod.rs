//! Database operations for the storefront `SQLite` store.
//!
//! ## Tables
//!
//! - `user` - Registered customers (unique username and email, Argon2 hash)
//! - `visit` - Booked appointment slots
//! - `tower_sessions` - Session storage, created by the session store itself
//!
//! Orders are not stored here; they live in the JSON ledger
//! (see [`crate::services::ledger`]).
//!
//! # Migrations
//!
//! Migrations are stored in `crates/storefront/migrations/`, embedded at
//! compile time, and run on startup or via:
//! ```bash
//! cargo run -p nutribook-cli -- migrate
//! ```

pub mod users;
pub mod visits;

use std::str::FromStr;
use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::SqlitePool;
use sqlx::migrate::{MigrateError, Migrator};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use thiserror::Error;

pub use users::UserRepository;
pub use visits::VisitRepository;

/// Embedded storefront migrations.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Constraint violation (e.g., unique username).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `SQLite` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the URL is invalid or the database cannot be opened.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url.expose_secret())?
        .create_if_missing(true)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await
}

/// Create a private in-memory database with migrations applied.
///
/// Each call returns an isolated database; the pool is capped at a single
/// connection because every `SQLite` memory connection is its own database.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the pool cannot be created or
/// migrations fail.
pub async fn create_memory_pool() -> Result<SqlitePool, RepositoryError> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true))
        .await?;
    run_migrations(&pool).await?;
    Ok(pool)
}

/// Apply all pending migrations.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if a migration fails.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), RepositoryError> {
    MIGRATOR.run(pool).await.map_err(|e| match e {
        MigrateError::Execute(err) => RepositoryError::Database(err),
        other => RepositoryError::Database(sqlx::Error::Migrate(Box::new(other))),
    })
}

/// Map a unique-constraint violation to `RepositoryError::Conflict`.
fn conflict_on_unique(err: sqlx::Error, what: &str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = err
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict(format!("{what} already exists"));
    }
    RepositoryError::Database(err)
}
