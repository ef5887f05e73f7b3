//! Nutribook storefront library.
//!
//! Shop, cart, order ledger and appointment booking served with axum. The
//! binary in `main.rs` adds Sentry and rate limiting around [`router`];
//! tests drive [`app`] in-process.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

use axum::{Router, http::Request};
use tower_http::{services::ServeDir, trace::TraceLayer};
use tower_sessions::SessionStore;

use crate::middleware::rate_limit::RateLimiterLayer;
use crate::state::AppState;

/// Build the full router with an optional login/registration rate limiter.
///
/// Layers (outermost first): trace span, request ID, security headers,
/// session.
pub fn router<Store>(state: AppState, store: Store, limiter: Option<RateLimiterLayer>) -> Router
where
    Store: SessionStore + Clone,
{
    let session_layer = middleware::create_session_layer(store, state.config());
    let static_dir = ServeDir::new(&state.config().static_dir);

    Router::new()
        .merge(routes::routes(limiter))
        .nest_service("/static", static_dir)
        .layer(session_layer)
        .layer(axum::middleware::from_fn(
            middleware::security_headers_middleware,
        ))
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = tracing::field::Empty,
                )
            }),
        )
        .with_state(state)
}

/// Build the router without rate limiting.
pub fn app<Store>(state: AppState, store: Store) -> Router
where
    Store: SessionStore + Clone,
{
    router(state, store, None)
}
