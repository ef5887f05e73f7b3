//! Session cart and checkout.
//!
//! The cart is a [`Cart`] stored under [`session_keys::CART`]. All routes
//! here require a logged-in user.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect},
};
use tower_sessions::Session;
use tracing::instrument;

use nutribook_core::{Cart, CartItem, Order, Price, ProductId, find_product};

use crate::error;
use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::{FlashLevel, flash, session_keys};
use crate::routes::PageContext;
use crate::state::AppState;

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart.html")]
pub struct CartTemplate {
    pub page: PageContext,
    pub items: Vec<CartItem>,
    pub total: Price,
}

async fn load_cart(session: &Session) -> Result<Cart, tower_sessions::session::Error> {
    Ok(session
        .get::<Cart>(session_keys::CART)
        .await?
        .unwrap_or_default())
}

async fn save_cart(session: &Session, cart: &Cart) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CART, cart).await
}

/// Append a catalog product to the cart.
///
/// The id is taken as text so that a segment that is not a number, or does
/// not fit in an `i64`, is reported like any other unknown product.
#[instrument(skip(session, _user))]
pub async fn add_to_cart(
    RequireAuth(_user): RequireAuth,
    session: Session,
    Path(product_id): Path<String>,
) -> error::Result<Redirect> {
    let product = product_id
        .parse::<i64>()
        .ok()
        .and_then(|id| find_product(ProductId::new(id)));
    let Some(product) = product else {
        tracing::warn!("Unknown product requested");
        flash::push(&session, FlashLevel::Danger, "That product does not exist.").await;
        return Ok(Redirect::to("/shop"));
    };

    let mut cart = load_cart(&session).await?;
    cart.add(CartItem::from(product));
    save_cart(&session, &cart).await?;

    flash::push(
        &session,
        FlashLevel::Success,
        format!("Added \"{}\" to the cart!", product.name),
    )
    .await;
    Ok(Redirect::to("/shop"))
}

/// Show cart lines and the total.
pub async fn show(
    RequireAuth(_user): RequireAuth,
    session: Session,
    page: PageContext,
) -> error::Result<CartTemplate> {
    let cart = load_cart(&session).await?;

    Ok(CartTemplate {
        page,
        total: cart.total(),
        items: cart.items().to_vec(),
    })
}

/// Remove the line at `index`; an index past the end, or one that is not a
/// number at all, changes nothing.
#[instrument(skip(session, _user))]
pub async fn remove_from_cart(
    RequireAuth(_user): RequireAuth,
    session: Session,
    Path(index): Path<String>,
) -> error::Result<Redirect> {
    let mut cart = load_cart(&session).await?;
    let removed = index.parse::<usize>().ok().and_then(|i| cart.remove(i));

    if let Some(removed) = removed {
        save_cart(&session, &cart).await?;
        flash::push(
            &session,
            FlashLevel::Info,
            format!("Removed \"{}\" from the cart.", removed.name),
        )
        .await;
    }

    Ok(Redirect::to("/cart"))
}

/// Write the cart to the order ledger and empty it.
#[instrument(skip(state, session, user), fields(username = %user.username))]
pub async fn checkout(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
) -> error::Result<impl IntoResponse> {
    let cart = load_cart(&session).await?;

    if cart.is_empty() {
        flash::push(&session, FlashLevel::Warning, "Your cart is empty!").await;
        return Ok(Redirect::to("/shop"));
    }

    let order = Order::from_cart(&user.username, &cart);
    let total = order.total;
    state.ledger().append(order).await?;
    session.remove::<Cart>(session_keys::CART).await?;
    tracing::info!(items = cart.len(), %total, "Order recorded");

    flash::push(
        &session,
        FlashLevel::Success,
        "Order submitted! A payment and delivery link has been sent to your email.",
    )
    .await;
    Ok(Redirect::to("/"))
}
