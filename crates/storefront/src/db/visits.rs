//! Visit repository for appointment bookings.

use sqlx::SqlitePool;

use nutribook_core::UserId;

use super::RepositoryError;
use crate::models::Visit;

/// Repository for visit database operations.
pub struct VisitRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> VisitRepository<'a> {
    /// Create a new visit repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Find the visit occupying a slot, if any.
    ///
    /// Dates and times are compared as the exact strings stored.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_slot(
        &self,
        date: &str,
        time: &str,
    ) -> Result<Option<Visit>, RepositoryError> {
        let visit = sqlx::query_as::<_, Visit>(
            r"
            SELECT id, user_id, date, time, status
            FROM visit
            WHERE date = ? AND time = ?
            ORDER BY id
            LIMIT 1
            ",
        )
        .bind(date)
        .bind(time)
        .fetch_optional(self.pool)
        .await?;

        Ok(visit)
    }

    /// Insert a new scheduled visit.
    ///
    /// Does not check whether the slot is free; see
    /// [`crate::services::booking::BookingService::book`].
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails (including an
    /// unknown `user_id`, which violates the foreign key).
    pub async fn create(
        &self,
        user_id: UserId,
        date: &str,
        time: &str,
    ) -> Result<Visit, RepositoryError> {
        let visit = sqlx::query_as::<_, Visit>(
            r"
            INSERT INTO visit (user_id, date, time)
            VALUES (?, ?, ?)
            RETURNING id, user_id, date, time, status
            ",
        )
        .bind(user_id)
        .bind(date)
        .bind(time)
        .fetch_one(self.pool)
        .await?;

        Ok(visit)
    }

    /// List a user's visits, soonest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Visit>, RepositoryError> {
        let visits = sqlx::query_as::<_, Visit>(
            r"
            SELECT id, user_id, date, time, status
            FROM visit
            WHERE user_id = ?
            ORDER BY date, time
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(visits)
    }
}
