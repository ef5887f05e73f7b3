//! Appointment booking against the visit calendar.
//!
//! Availability is recomputed on every request from the weekday rules in
//! [`nutribook_core::schedule`] minus the slots already present in `visit`.
//!
//! [`BookingService::book`] is a lookup followed by an insert with no
//! transaction around them. Two requests for the same free slot that
//! interleave between the two statements can both succeed; the `visit`
//! table carries no unique index on `(date, time)` to stop them.

use sqlx::SqlitePool;
use thiserror::Error;
use tracing::{instrument, warn};

use nutribook_core::{SlotError, UserId, candidate_slots, parse_date};

use crate::db::{RepositoryError, VisitRepository};
use crate::models::Visit;

/// Errors that can occur while listing or booking slots.
#[derive(Debug, Error)]
pub enum BookingError {
    /// The requested date is not `YYYY-MM-DD`.
    #[error(transparent)]
    InvalidDate(#[from] SlotError),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Result of a booking attempt.
#[derive(Debug)]
pub enum BookingOutcome {
    /// The slot was free and now belongs to the user.
    Booked(Visit),
    /// Another visit already occupies the slot; nothing was written.
    SlotTaken,
}

/// Booking service.
pub struct BookingService<'a> {
    visits: VisitRepository<'a>,
}

impl<'a> BookingService<'a> {
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self {
            visits: VisitRepository::new(pool),
        }
    }

    /// Free `HH:00` slots for a date, ascending.
    ///
    /// # Errors
    ///
    /// Returns `BookingError::InvalidDate` for a malformed date and
    /// `BookingError::Repository` if a slot lookup fails.
    pub async fn available_slots(&self, date: &str) -> Result<Vec<String>, BookingError> {
        let day = parse_date(date)?;

        let mut free = Vec::new();
        for slot in candidate_slots(day) {
            if self.visits.find_by_slot(date, &slot).await?.is_none() {
                free.push(slot);
            }
        }
        Ok(free)
    }

    /// Reserve `(date, time)` for a user if nobody holds it yet.
    ///
    /// The strings are stored as given; they are not checked against the
    /// weekday rules.
    ///
    /// # Errors
    ///
    /// Returns `BookingError::Repository` if the lookup or insert fails.
    #[instrument(skip(self))]
    pub async fn book(
        &self,
        user_id: UserId,
        date: &str,
        time: &str,
    ) -> Result<BookingOutcome, BookingError> {
        if self.visits.find_by_slot(date, time).await?.is_some() {
            warn!(date, time, "Slot already booked");
            return Ok(BookingOutcome::SlotTaken);
        }

        let visit = self.visits.create(user_id, date, time).await?;
        tracing::info!(visit_id = %visit.id, "Visit booked");
        Ok(BookingOutcome::Booked(visit))
    }

    /// All visits of a user, soonest first.
    ///
    /// # Errors
    ///
    /// Returns `BookingError::Repository` if the query fails.
    pub async fn visits_for(&self, user_id: UserId) -> Result<Vec<Visit>, BookingError> {
        Ok(self.visits.list_for_user(user_id).await?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use nutribook_core::Email;

    use super::*;
    use crate::db::{UserRepository, create_memory_pool};

    async fn setup() -> (SqlitePool, UserId) {
        let pool = create_memory_pool().await.unwrap();
        let email = Email::parse("anna@example.com").unwrap();
        let id = UserRepository::new(&pool)
            .create("anna", &email, "hash")
            .await
            .unwrap()
            .id;
        (pool, id)
    }

    #[tokio::test]
    async fn test_sunday_has_no_slots() {
        let (pool, _) = setup().await;
        let booking = BookingService::new(&pool);
        assert!(booking.available_slots("2024-05-19").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_saturday_slots_shrink_after_booking() {
        let (pool, anna) = setup().await;
        let booking = BookingService::new(&pool);

        assert_eq!(
            booking.available_slots("2024-05-18").await.unwrap(),
            ["11:00", "12:00"]
        );

        let outcome = booking.book(anna, "2024-05-18", "11:00").await.unwrap();
        assert!(matches!(outcome, BookingOutcome::Booked(_)));

        assert_eq!(
            booking.available_slots("2024-05-18").await.unwrap(),
            ["12:00"]
        );
    }

    #[tokio::test]
    async fn test_weekday_slots_exclude_booked() {
        let (pool, anna) = setup().await;
        let booking = BookingService::new(&pool);
        booking.book(anna, "2024-05-13", "13:00").await.unwrap();
        booking.book(anna, "2024-05-13", "18:00").await.unwrap();

        assert_eq!(
            booking.available_slots("2024-05-13").await.unwrap(),
            ["10:00", "11:00", "12:00", "16:00", "17:00"]
        );
        // Other days are unaffected.
        assert_eq!(booking.available_slots("2024-05-14").await.unwrap().len(), 7);
    }

    #[tokio::test]
    async fn test_double_booking_is_rejected() {
        let (pool, anna) = setup().await;
        let email = Email::parse("bob@example.com").unwrap();
        let bob = UserRepository::new(&pool)
            .create("bob", &email, "hash")
            .await
            .unwrap()
            .id;
        let booking = BookingService::new(&pool);

        booking.book(anna, "2024-05-18", "12:00").await.unwrap();
        let second = booking.book(bob, "2024-05-18", "12:00").await.unwrap();

        assert!(matches!(second, BookingOutcome::SlotTaken));
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM visit")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
        assert!(booking.visits_for(bob).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_off_hours_time_is_accepted() {
        let (pool, anna) = setup().await;
        let booking = BookingService::new(&pool);

        let outcome = booking.book(anna, "2024-05-19", "09:30").await.unwrap();
        assert!(matches!(outcome, BookingOutcome::Booked(ref v) if v.time == "09:30"));
    }

    #[tokio::test]
    async fn test_malformed_date_is_invalid() {
        let (pool, _) = setup().await;
        let booking = BookingService::new(&pool);
        assert!(matches!(
            booking.available_slots("18-05-2024").await,
            Err(BookingError::InvalidDate(_))
        ));
    }
}
