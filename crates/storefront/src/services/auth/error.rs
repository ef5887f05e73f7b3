//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur during registration and login.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] nutribook_core::EmailError),

    /// Username missing or too long.
    #[error("invalid username: {0}")]
    InvalidUsername(String),

    /// Wrong password or unknown username.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Username already registered.
    #[error("username already taken")]
    UsernameTaken,

    /// Email already registered.
    #[error("email already registered")]
    EmailTaken,

    /// Password too weak or invalid.
    #[error("password validation failed: {0}")]
    WeakPassword(String),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}

impl AuthError {
    /// Message safe to show the customer in a flash.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidEmail(e) => format!("Invalid email: {e}."),
            Self::InvalidUsername(reason) => format!("Invalid username: {reason}."),
            Self::InvalidCredentials => "Invalid username or password.".to_string(),
            Self::UsernameTaken => "That username is already taken.".to_string(),
            Self::EmailTaken => "That email is already registered.".to_string(),
            Self::WeakPassword(reason) => format!("{reason}."),
            Self::Repository(_) | Self::PasswordHash => {
                "Something went wrong. Please try again.".to_string()
            }
        }
    }
}
