//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::StorefrontConfig;
use crate::services::OrderLedger;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    pool: SqlitePool,
    ledger: OrderLedger,
}

impl AppState {
    /// Create a new application state.
    ///
    /// The order ledger is opened at `config.orders_path`.
    #[must_use]
    pub fn new(config: StorefrontConfig, pool: SqlitePool) -> Self {
        let ledger = OrderLedger::new(config.orders_path.clone());

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                ledger,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.inner.pool
    }

    /// Get a reference to the order ledger.
    #[must_use]
    pub fn ledger(&self) -> &OrderLedger {
        &self.inner.ledger
    }
}
