//! Registration, login and logout.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{self, AppError, clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::{RequireAuth, clear_current_user, set_current_user};
use crate::models::{CurrentUser, FlashLevel, flash};
use crate::routes::PageContext;
use crate::services::{AuthError, AuthService};
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
///
/// Missing fields deserialize as empty strings and fail validation instead
/// of rejecting the request.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

// =============================================================================
// Templates
// =============================================================================

#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub page: PageContext,
}

#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub page: PageContext,
}

/// Whether an auth failure is the customer's fault (shown as a flash) or
/// ours (surfaced as a 500).
const fn is_user_error(err: &AuthError) -> bool {
    !matches!(err, AuthError::Repository(_) | AuthError::PasswordHash)
}

// =============================================================================
// Registration
// =============================================================================

pub async fn register_page(page: PageContext) -> impl IntoResponse {
    RegisterTemplate { page }
}

/// Create an account, then send the customer to the login form.
#[instrument(skip(state, session, form), fields(username = %form.username))]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> error::Result<Redirect> {
    match AuthService::new(state.pool())
        .register(&form.username, &form.email, &form.password)
        .await
    {
        Ok(user) => {
            tracing::info!(user_id = %user.id, "User registered");
            flash::push(
                &session,
                FlashLevel::Success,
                "Account created! You can log in now.",
            )
            .await;
            Ok(Redirect::to("/login"))
        }
        Err(e) if is_user_error(&e) => {
            tracing::warn!("Registration rejected: {e}");
            flash::push(&session, FlashLevel::Danger, e.user_message()).await;
            Ok(Redirect::to("/register"))
        }
        Err(e) => Err(AppError::Auth(e)),
    }
}

// =============================================================================
// Login / Logout
// =============================================================================

pub async fn login_page(page: PageContext) -> impl IntoResponse {
    LoginTemplate { page }
}

/// Check credentials and start the session.
#[instrument(skip(state, session, form), fields(username = %form.username))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> error::Result<Redirect> {
    let user = match AuthService::new(state.pool())
        .login(&form.username, &form.password)
        .await
    {
        Ok(user) => user,
        Err(e) if is_user_error(&e) => {
            tracing::warn!("Login failed: {e}");
            flash::push(&session, FlashLevel::Danger, e.user_message()).await;
            return Ok(Redirect::to("/login"));
        }
        Err(e) => return Err(AppError::Auth(e)),
    };

    set_current_user(&session, &CurrentUser::from(&user)).await?;
    set_sentry_user(&user.id, &user.username);
    tracing::info!(user_id = %user.id, "User logged in");

    flash::push(
        &session,
        FlashLevel::Success,
        format!("Welcome back, {}!", user.username),
    )
    .await;
    Ok(Redirect::to("/shop"))
}

/// End the session.
#[instrument(skip_all)]
pub async fn logout(RequireAuth(user): RequireAuth, session: Session) -> error::Result<Redirect> {
    clear_current_user(&session).await?;
    clear_sentry_user();
    tracing::info!(user_id = %user.id, "User logged out");

    flash::push(&session, FlashLevel::Info, "You have been logged out.").await;
    Ok(Redirect::to("/"))
}
