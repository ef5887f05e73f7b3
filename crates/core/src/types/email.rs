//! Email address type for account registration.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing an [`Email`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    /// The input is empty after trimming.
    #[error("email cannot be empty")]
    Empty,
    /// The input is longer than the `user.email` column allows.
    #[error("email must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input does not contain exactly one @ symbol.
    #[error("email must contain exactly one @ symbol")]
    BadAtSymbol,
    /// The mailbox (before @) is empty.
    #[error("email mailbox cannot be empty")]
    EmptyMailbox,
    /// The domain (after @) is empty or has no dot.
    #[error("email domain must look like example.com")]
    BadDomain,
}

/// A registered customer's email address.
///
/// Surrounding whitespace is trimmed and the domain is lowercased, so the
/// unique index on `user.email` compares addresses the way people expect.
///
/// ```
/// use nutribook_core::Email;
///
/// let email = Email::parse("  Anna@Example.PL ").unwrap();
/// assert_eq!(email.as_str(), "Anna@example.pl");
///
/// assert!(Email::parse("anna").is_err());
/// assert!(Email::parse("anna@localhost").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Maximum stored length (the width of the `user.email` column).
    pub const MAX_LENGTH: usize = 120;

    /// Parse and normalize an `Email`.
    ///
    /// # Errors
    ///
    /// Returns an [`EmailError`] describing the first rule the input breaks.
    pub fn parse(s: &str) -> Result<Self, EmailError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(EmailError::Empty);
        }
        if s.len() > Self::MAX_LENGTH {
            return Err(EmailError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        let (mailbox, domain) = s.split_once('@').ok_or(EmailError::BadAtSymbol)?;
        if domain.contains('@') {
            return Err(EmailError::BadAtSymbol);
        }
        if mailbox.is_empty() {
            return Err(EmailError::EmptyMailbox);
        }
        if domain.is_empty() || !domain.contains('.') || domain.ends_with('.') {
            return Err(EmailError::BadDomain);
        }

        Ok(Self(format!("{mailbox}@{}", domain.to_lowercase())))
    }

    /// Returns the email address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Email {
    type Err = EmailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_common_addresses() {
        assert!(Email::parse("anna@example.com").is_ok());
        assert!(Email::parse("anna.nowak+diet@mail.example.pl").is_ok());
        assert!(Email::parse("a@b.c").is_ok());
    }

    #[test]
    fn test_parse_trims_and_lowercases_domain() {
        let email = Email::parse("  Anna@Example.COM\n").unwrap();
        assert_eq!(email.as_str(), "Anna@example.com");
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert_eq!(Email::parse("   "), Err(EmailError::Empty));
    }

    #[test]
    fn test_parse_rejects_too_long() {
        let long = format!("{}@example.com", "a".repeat(120));
        assert!(matches!(
            Email::parse(&long),
            Err(EmailError::TooLong { max: 120 })
        ));
    }

    #[test]
    fn test_parse_rejects_bad_at_usage() {
        assert_eq!(Email::parse("no-at-symbol"), Err(EmailError::BadAtSymbol));
        assert_eq!(Email::parse("a@b@c.com"), Err(EmailError::BadAtSymbol));
        assert_eq!(Email::parse("@example.com"), Err(EmailError::EmptyMailbox));
    }

    #[test]
    fn test_parse_rejects_bad_domain() {
        assert_eq!(Email::parse("anna@"), Err(EmailError::BadDomain));
        assert_eq!(Email::parse("anna@localhost"), Err(EmailError::BadDomain));
        assert_eq!(Email::parse("anna@example."), Err(EmailError::BadDomain));
    }

    #[test]
    fn test_serde_is_transparent() {
        let email = Email::parse("anna@example.com").unwrap();
        assert_eq!(
            serde_json::to_string(&email).unwrap(),
            "\"anna@example.com\""
        );
    }
}
