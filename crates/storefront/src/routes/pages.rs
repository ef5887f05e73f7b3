//! Public pages: landing, shop, about, and health checks.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, http::StatusCode, response::IntoResponse};
use tracing::instrument;

use nutribook_core::{Product, catalog};

use crate::filters;
use crate::routes::PageContext;
use crate::state::AppState;

/// Landing page template.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub page: PageContext,
}

/// Shop page template.
#[derive(Template, WebTemplate)]
#[template(path = "shop.html")]
pub struct ShopTemplate {
    pub page: PageContext,
    pub products: &'static [Product],
}

/// About page template.
#[derive(Template, WebTemplate)]
#[template(path = "about.html")]
pub struct AboutTemplate {
    pub page: PageContext,
}

pub async fn index(page: PageContext) -> impl IntoResponse {
    IndexTemplate { page }
}

/// List the whole catalog.
#[instrument(skip(page))]
pub async fn shop(page: PageContext) -> impl IntoResponse {
    ShopTemplate {
        page,
        products: catalog(),
    }
}

pub async fn about(page: PageContext) -> impl IntoResponse {
    AboutTemplate { page }
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
pub async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable if the database is not reachable.
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    match sqlx::query("SELECT 1").fetch_one(state.pool()).await {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            tracing::warn!("Readiness probe failed: {e}");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
