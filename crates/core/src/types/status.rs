//! Status enums for booked visits.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a booked visit.
///
/// Only `Scheduled` is ever written by the storefront; the other values
/// exist so rows edited by hand still decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "sqlite", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlite", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum VisitStatus {
    #[default]
    Scheduled,
    Completed,
    Cancelled,
}

impl VisitStatus {
    /// Database and display representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for VisitStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for VisitStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(Self::Scheduled),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(format!("invalid visit status: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_scheduled() {
        assert_eq!(VisitStatus::default(), VisitStatus::Scheduled);
    }

    #[test]
    fn test_parse_roundtrip() {
        for status in [
            VisitStatus::Scheduled,
            VisitStatus::Completed,
            VisitStatus::Cancelled,
        ] {
            assert_eq!(status.as_str().parse::<VisitStatus>(), Ok(status));
        }
        assert!("booked".parse::<VisitStatus>().is_err());
    }
}
