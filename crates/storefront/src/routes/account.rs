//! Account page: the user's orders and visits.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use nutribook_core::Order;

use crate::error;
use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::Visit;
use crate::routes::PageContext;
use crate::services::BookingService;
use crate::state::AppState;

/// Account overview page template.
#[derive(Template, WebTemplate)]
#[template(path = "account.html")]
pub struct AccountTemplate {
    pub page: PageContext,
    pub username: String,
    pub orders: Vec<Order>,
    pub visits: Vec<Visit>,
}

/// Orders filed under the username, plus booked visits.
#[instrument(skip(state, user, page), fields(username = %user.username))]
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    page: PageContext,
) -> error::Result<AccountTemplate> {
    let orders = state.ledger().orders_for(&user.username).await;
    let visits = BookingService::new(state.pool()).visits_for(user.id).await?;

    Ok(AccountTemplate {
        page,
        username: user.username,
        orders,
        visits,
    })
}
