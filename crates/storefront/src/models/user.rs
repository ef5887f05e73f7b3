//! User domain types.
//!
//! These types represent validated domain objects separate from database row types.

use chrono::{DateTime, Utc};

use nutribook_core::{Email, UserId};

/// A registered shop customer (domain type).
///
/// The password hash is deliberately absent; it is only ever read by
/// [`crate::db::UserRepository::get_password_hash`].
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Unique login name.
    pub username: String,
    /// Unique email address.
    pub email: Email,
    /// When the account was registered.
    pub created_at: DateTime<Utc>,
}
