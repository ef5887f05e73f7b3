//! Authentication extractors.
//!
//! The logged-in user lives in the session under
//! [`session_keys::CURRENT_USER`]; these extractors read it back.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::models::{CurrentUser, FlashLevel, flash, session_keys};

/// Extractor that requires a logged-in user.
///
/// Anonymous requests are redirected to `/login` with a warning flash.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(user): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", user.username)
/// }
/// ```
pub struct RequireAuth(pub CurrentUser);

/// Rejection for [`RequireAuth`].
#[derive(Debug)]
pub enum AuthRejection {
    /// Not logged in.
    RedirectToLogin,
    /// No session layer in front of the handler (a wiring bug).
    MissingSession,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to("/login").into_response(),
            Self::MissingSession => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        }
    }
}

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(AuthRejection::MissingSession)?;

        let user = session
            .get::<CurrentUser>(session_keys::CURRENT_USER)
            .await
            .ok()
            .flatten();

        match user {
            Some(user) => Ok(Self(user)),
            None => {
                tracing::debug!(path = %parts.uri.path(), "Login required");
                flash::push(session, FlashLevel::Warning, "Login required.").await;
                Err(AuthRejection::RedirectToLogin)
            }
        }
    }
}

/// Extractor that optionally gets the current user.
///
/// Never rejects; used by pages that render differently for guests.
pub struct OptionalAuth(pub Option<CurrentUser>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = match parts.extensions.get::<Session>() {
            Some(session) => session
                .get::<CurrentUser>(session_keys::CURRENT_USER)
                .await
                .ok()
                .flatten(),
            None => None,
        };

        Ok(Self(user))
    }
}

/// Store the logged-in user in the session.
///
/// The session ID is cycled first so a pre-login cookie cannot be reused.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_user(
    session: &Session,
    user: &CurrentUser,
) -> Result<(), tower_sessions::session::Error> {
    session.cycle_id().await?;
    session.insert(session_keys::CURRENT_USER, user).await
}

/// Forget the logged-in user and their cart (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_user(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<CurrentUser>(session_keys::CURRENT_USER)
        .await?;
    session
        .remove::<serde_json::Value>(session_keys::CART)
        .await?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use axum::http::Request;
    use nutribook_core::UserId;
    use tower_sessions::MemoryStore;

    use super::*;

    fn parts_with(session: Option<Session>) -> Parts {
        let (mut parts, ()) = Request::builder().uri("/cart").body(()).unwrap().into_parts();
        if let Some(session) = session {
            parts.extensions.insert(session);
        }
        parts
    }

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    #[tokio::test]
    async fn test_require_auth_redirects_guest_with_flash() {
        let session = session();
        let mut parts = parts_with(Some(session.clone()));

        let result = RequireAuth::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(AuthRejection::RedirectToLogin)));

        let flashes = flash::take(&session).await;
        assert_eq!(flashes.len(), 1);
        assert_eq!(flashes.first().unwrap().level, FlashLevel::Warning);
    }

    #[tokio::test]
    async fn test_require_auth_accepts_logged_in_user() {
        let session = session();
        let user = CurrentUser {
            id: UserId::new(7),
            username: "anna".to_string(),
        };
        set_current_user(&session, &user).await.unwrap();
        let mut parts = parts_with(Some(session));

        let RequireAuth(found) = RequireAuth::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(found, user);
    }

    #[tokio::test]
    async fn test_optional_auth_without_session_is_none() {
        let mut parts = parts_with(None);
        let OptionalAuth(user) = OptionalAuth::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert!(user.is_none());
    }

    #[tokio::test]
    async fn test_clear_current_user_logs_out() {
        let session = session();
        let user = CurrentUser {
            id: UserId::new(1),
            username: "anna".to_string(),
        };
        set_current_user(&session, &user).await.unwrap();
        clear_current_user(&session).await.unwrap();

        let mut parts = parts_with(Some(session));
        let OptionalAuth(found) = OptionalAuth::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert!(found.is_none());
    }
}
