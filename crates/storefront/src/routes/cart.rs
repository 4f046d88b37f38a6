//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! The cart itself lives in the shopper's session as a serialized snapshot;
//! every handler opens a store over it, hydrates, mutates, and flushes.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{AppendHeaders, IntoResponse, Response},
};
use serde::Deserialize;
use titan_cart::{CartLine, CartStore};
use titan_core::{Price, ProductId};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::AppError;
use crate::filters;
use crate::session_cart::{SessionMedium, commit_cart, open_cart};
use crate::state::AppState;

/// Cart item display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub id: String,
    pub title: String,
    pub image: String,
    pub quantity: u32,
    /// Quantity for the decrement control. At quantity 1 this posts 0,
    /// which the store ignores - matching the reference behavior where
    /// the minus button bottoms out instead of removing the line.
    pub quantity_minus_one: u32,
    pub quantity_plus_one: u32,
    pub price: String,
    pub line_price: String,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub tax: String,
    pub total: String,
    pub item_count: u32,
}

impl CartView {
    /// Create an empty cart.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            subtotal: "$0.00".to_string(),
            tax: "$0.00".to_string(),
            total: "$0.00".to_string(),
            item_count: 0,
        }
    }

    /// Build the display cart from a hydrated store.
    #[must_use]
    pub fn from_store(store: &CartStore<SessionMedium>, state: &AppState) -> Self {
        let totals = store.totals(state.config().tax_rate);

        Self {
            items: store.items().iter().map(CartItemView::from).collect(),
            subtotal: totals.subtotal.display(),
            tax: totals.tax.display(),
            total: totals.total.display(),
            item_count: store.quantity_total(),
        }
    }
}

impl From<&CartLine> for CartItemView {
    fn from(line: &CartLine) -> Self {
        Self {
            id: line.id.to_string(),
            title: line.title.clone(),
            image: line.image.clone(),
            quantity: line.quantity,
            quantity_minus_one: line.quantity.saturating_sub(1),
            quantity_plus_one: line.quantity.saturating_add(1),
            price: line.price.display(),
            line_price: Price::new(line.line_total()).display(),
        }
    }
}

// =============================================================================
// Forms
// =============================================================================

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: String,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: String,
    pub quantity: u32,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display cart page.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    let store = open_cart(&session).await;

    CartShowTemplate {
        cart: CartView::from_store(&store, &state),
    }
}

/// Add item to cart (HTMX).
///
/// Increments the existing line or appends a new one with quantity 1.
/// Returns the count badge with an HTMX trigger so other fragments can
/// refresh themselves.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Result<Response, AppError> {
    let product_id = ProductId::new(form.product_id);
    let Some(product) = state.catalog().get(&product_id) else {
        return Err(AppError::NotFound(format!("product {product_id}")));
    };

    let mut store = open_cart(&session).await;
    store.add_to_cart(&product.to_cart_product());
    let count = store.quantity_total();
    commit_cart(store, &session).await?;

    Ok((
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartCountTemplate { count },
    )
        .into_response())
}

/// Update cart item quantity (HTMX).
///
/// A requested quantity of 0 reaches the store and is ignored there -
/// the line keeps its prior quantity.
#[instrument(skip(state, session))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<UpdateCartForm>,
) -> Result<Response, AppError> {
    let mut store = open_cart(&session).await;
    store.update_quantity(&ProductId::new(form.product_id), form.quantity);
    let cart = CartView::from_store(&store, &state);
    commit_cart(store, &session).await?;

    Ok((
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate { cart },
    )
        .into_response())
}

/// Remove item from cart (HTMX).
#[instrument(skip(state, session))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<Response, AppError> {
    let mut store = open_cart(&session).await;
    store.remove_from_cart(&ProductId::new(form.product_id));
    let cart = CartView::from_store(&store, &state);
    commit_cart(store, &session).await?;

    Ok((
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate { cart },
    )
        .into_response())
}

/// Get cart count badge (HTMX).
#[instrument(skip(session))]
pub async fn count(session: Session) -> impl IntoResponse {
    let store = open_cart(&session).await;

    CartCountTemplate {
        count: store.quantity_total(),
    }
}
