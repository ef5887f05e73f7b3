//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! nb-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `STOREFRONT_DATABASE_URL` - `SQLite` connection string, falls back to
//!   `DATABASE_URL`, then `sqlite://nutribook.db?mode=rwc`
//!
//! The storefront also applies these migrations on startup; this command is
//! for preparing a database ahead of a deploy.

use sqlx::SqlitePool;

use nutribook_storefront::{config::database_url_from_env, db};

use super::CliError;

/// Rows in sqlx's bookkeeping table; 0 before the first run creates it.
async fn recorded_migrations(pool: &SqlitePool) -> i64 {
    sqlx::query_as::<_, (i64,)>("SELECT COUNT(*) FROM _sqlx_migrations")
        .fetch_one(pool)
        .await
        .map_or(0, |(count,)| count)
}

/// Run storefront database migrations.
///
/// # Errors
///
/// Returns `CliError` if the database cannot be opened or a migration fails.
pub async fn storefront() -> Result<(), CliError> {
    tracing::info!("Connecting to storefront database...");
    let pool = db::create_pool(&database_url_from_env()).await?;

    let before = recorded_migrations(&pool).await;
    tracing::info!("Running storefront migrations...");
    db::run_migrations(&pool).await?;
    let applied = recorded_migrations(&pool).await - before;

    tracing::info!(applied, "Storefront migrations complete");
    pool.close().await;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_recorded_migrations_is_zero_before_first_run() {
        let pool = SqlitePool::connect("sqlite::memory:").await.unwrap();
        assert_eq!(recorded_migrations(&pool).await, 0);
    }

    #[tokio::test]
    async fn test_recorded_migrations_counts_applied() {
        let pool = db::create_memory_pool().await.unwrap();
        let expected = i64::try_from(db::MIGRATOR.iter().count()).unwrap();
        assert_eq!(recorded_migrations(&pool).await, expected);

        db::run_migrations(&pool).await.unwrap();
        assert_eq!(recorded_migrations(&pool).await, expected);
    }
}
