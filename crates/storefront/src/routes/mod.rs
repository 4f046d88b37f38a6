//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                  - Landing page (marketing sections + product grid)
//! GET  /health            - Health check
//!
//! # Cart (HTMX fragments)
//! GET  /cart              - Cart page
//! POST /cart/add          - Add product (returns count badge, triggers cart-updated)
//! POST /cart/update       - Update quantity (returns cart_items fragment)
//! POST /cart/remove       - Remove item (returns cart_items fragment)
//! GET  /cart/count        - Cart count badge (fragment)
//!
//! # Checkout
//! GET  /checkout          - Billing form and order review
//! POST /checkout          - Place order: clear the cart, redirect to confirmation
//! GET  /confirmation      - Order confirmation with a generated order number
//! ```

pub mod cart;
pub mod checkout;
pub mod home;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Landing page
        .route("/", get(home::home))
        // Cart routes
        .nest("/cart", cart_routes())
        // Checkout flow
        .route("/checkout", get(checkout::show).post(checkout::place))
        .route("/confirmation", get(checkout::confirmation))
}
