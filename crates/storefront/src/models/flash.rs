//! One-shot notices shown on the next rendered page.
//!
//! Handlers push a message before redirecting; the next page drains the
//! queue from the session and renders it. This is how every user-facing
//! failure (taken slot, duplicate username, missing product) is reported.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::models::session_keys;

/// Severity, mapped to a CSS class in `base.html`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Info,
    Warning,
    Danger,
}

impl FlashLevel {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Danger => "danger",
        }
    }
}

/// A queued notice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

impl Flash {
    /// CSS class for templates.
    #[must_use]
    pub const fn class(&self) -> &'static str {
        self.level.as_str()
    }
}

/// Queue a notice for the next page render.
///
/// Session failures are logged and swallowed: losing a notice must never
/// fail the request that produced it.
pub async fn push(session: &Session, level: FlashLevel, message: impl Into<String>) {
    let mut flashes: Vec<Flash> = session
        .get(session_keys::FLASHES)
        .await
        .ok()
        .flatten()
        .unwrap_or_default();
    flashes.push(Flash {
        level,
        message: message.into(),
    });

    if let Err(e) = session.insert(session_keys::FLASHES, flashes).await {
        tracing::error!("Failed to queue flash message: {e}");
    }
}

/// Drain all queued notices.
pub async fn take(session: &Session) -> Vec<Flash> {
    match session.remove::<Vec<Flash>>(session_keys::FLASHES).await {
        Ok(flashes) => flashes.unwrap_or_default(),
        Err(e) => {
            tracing::error!("Failed to read flash messages: {e}");
            Vec::new()
        }
    }
}
