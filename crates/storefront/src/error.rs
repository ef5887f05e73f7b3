//! Unified error handling with Sentry integration.
//!
//! Foreseeable failures (taken slots, duplicate usernames, unknown products)
//! never reach this type; handlers turn them into flash messages. `AppError`
//! covers what is left: bad input that cannot be rendered and
//! infrastructure failures.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::{AuthError, BookingError, LedgerError};

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Slot listing or booking failed.
    #[error("Booking error: {0}")]
    Booking(#[from] BookingError),

    /// Writing the order ledger failed.
    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    /// Reading or writing the session failed.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),
}

impl AppError {
    /// Only a malformed date is the caller's fault; everything else that gets
    /// this far is ours.
    const fn status(&self) -> StatusCode {
        match self {
            Self::Booking(BookingError::InvalidDate(_)) => StatusCode::BAD_REQUEST,
            Self::Database(_)
            | Self::Auth(_)
            | Self::Booking(_)
            | Self::Ledger(_)
            | Self::Session(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        // Don't expose internal error details to clients
        let message = match &self {
            _ if status.is_server_error() => "Internal server error".to_string(),
            Self::Booking(BookingError::InvalidDate(e)) => e.to_string(),
            _ => self.to_string(),
        };

        (status, message).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Set the Sentry user context after login.
pub fn set_sentry_user(user_id: &impl ToString, username: &str) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user_id.to_string()),
            username: Some(username.to_string()),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context on logout.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

#[cfg(test)]
mod tests {
    use nutribook_core::parse_date;

    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::Auth(AuthError::PasswordHash);
        assert!(err.to_string().starts_with("Auth error: "));
    }

    #[test]
    fn test_malformed_date_is_bad_request() {
        let Err(slot_err) = parse_date("2024-13-40") else {
            panic!("date should not parse");
        };
        let err = AppError::Booking(BookingError::InvalidDate(slot_err));
        assert_eq!(status_of(err), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_infrastructure_failures_are_server_errors() {
        assert_eq!(
            status_of(AppError::Auth(AuthError::PasswordHash)),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(AppError::Database(RepositoryError::DataCorruption(
                "bad email".to_string()
            ))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
