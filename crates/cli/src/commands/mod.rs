//! CLI subcommands.

pub mod migrate;
pub mod orders;

use thiserror::Error;

/// Errors a subcommand can fail with.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migration(#[from] nutribook_storefront::db::RepositoryError),

    #[error("output error: {0}")]
    Json(#[from] serde_json::Error),
}
