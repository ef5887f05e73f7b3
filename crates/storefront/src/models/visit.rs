//! Booked visit domain type.

use nutribook_core::{UserId, VisitId, VisitStatus};

/// A reservation of one `(date, time)` slot by one user.
///
/// `date` and `time` are kept as the strings the customer submitted
/// (`YYYY-MM-DD` / `HH:MM`), which is also how slot lookups compare them.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Visit {
    pub id: VisitId,
    pub user_id: UserId,
    pub date: String,
    pub time: String,
    pub status: VisitStatus,
}
