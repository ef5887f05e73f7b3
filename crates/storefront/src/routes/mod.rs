//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                            - Landing page
//! GET  /shop                        - Product catalog
//! GET  /about                       - About page
//! GET  /health                      - Liveness check
//! GET  /health/ready                - Readiness check (database)
//!
//! # Auth
//! GET  /register, POST /register    - Registration form / action
//! GET  /login, POST /login          - Login form / action
//! GET  /logout                      - Logout (requires auth)
//!
//! # Cart (requires auth)
//! GET  /add_to_cart/{product_id}    - Append a product
//! GET  /cart                        - Cart page
//! GET  /remove_from_cart/{index}    - Remove a line by position
//! GET  /checkout                    - Write the order ledger, empty the cart
//! GET  /account                     - Orders and visits
//!
//! # Visits
//! GET  /visit, POST /visit          - Free slots for ?date=YYYY-MM-DD
//! POST /book_visit                  - Book a slot (requires auth)
//! ```

pub mod account;
pub mod auth;
pub mod cart;
mod context;
pub mod pages;
pub mod visit;

pub use context::PageContext;

use axum::{
    Router,
    routing::{get, post},
};

use crate::middleware::rate_limit::RateLimiterLayer;
use crate::state::AppState;

/// Create the auth routes; `limiter` guards the two form POSTs.
pub fn auth_routes(limiter: Option<RateLimiterLayer>) -> Router<AppState> {
    let (login_post, register_post) = match limiter {
        Some(limiter) => (
            post(auth::login).layer(limiter.clone()),
            post(auth::register).layer(limiter),
        ),
        None => (post(auth::login), post(auth::register)),
    };

    Router::new()
        .route("/login", get(auth::login_page).merge(login_post))
        .route("/register", get(auth::register_page).merge(register_post))
        .route("/logout", get(auth::logout))
}

/// Create the cart and account routes.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/add_to_cart/{product_id}", get(cart::add_to_cart))
        .route("/cart", get(cart::show))
        .route("/remove_from_cart/{index}", get(cart::remove_from_cart))
        .route("/checkout", get(cart::checkout))
        .route("/account", get(account::index))
}

/// Create all routes for the storefront.
pub fn routes(limiter: Option<RateLimiterLayer>) -> Router<AppState> {
    Router::new()
        .route("/", get(pages::index))
        .route("/shop", get(pages::shop))
        .route("/about", get(pages::about))
        .route("/health", get(pages::health))
        .route("/health/ready", get(pages::readiness))
        .route("/visit", get(visit::show).post(visit::show))
        .route("/book_visit", post(visit::book))
        .merge(auth_routes(limiter))
        .merge(cart_routes())
}
