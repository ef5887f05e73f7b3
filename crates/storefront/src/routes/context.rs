//! Per-page layout data shared by every template.

use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};
use tower_sessions::Session;

use nutribook_core::Cart;

use crate::middleware::OptionalAuth;
use crate::models::{CurrentUser, Flash, flash, session_keys};

/// What `base.html` needs: who is logged in, pending notices, cart size.
///
/// Extracting this drains the flash queue, so take it only in handlers that
/// render a page.
#[derive(Debug, Default)]
pub struct PageContext {
    pub user: Option<CurrentUser>,
    pub flashes: Vec<Flash>,
    pub cart_count: usize,
}

impl PageContext {
    /// Build the context for `user`, draining the session's flash queue.
    pub async fn new(user: Option<CurrentUser>, session: &Session) -> Self {
        let cart_count = session
            .get::<Cart>(session_keys::CART)
            .await
            .ok()
            .flatten()
            .map_or(0, |cart| cart.len());
        let flashes = flash::take(session).await;

        Self {
            user,
            flashes,
            cart_count,
        }
    }
}

impl<S> FromRequestParts<S> for PageContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Ok(OptionalAuth(user)) = OptionalAuth::from_request_parts(parts, state).await;

        match parts.extensions.get::<Session>() {
            Some(session) => Ok(Self::new(user, session).await),
            None => Ok(Self {
                user,
                ..Self::default()
            }),
        }
    }
}
