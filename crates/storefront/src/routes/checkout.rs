//! Checkout and confirmation route handlers.
//!
//! There is no payment processing and no order persistence: placing an
//! order clears the cart and redirects to a confirmation screen with a
//! freshly generated order number. The billing form exists for the page
//! flow only and is deliberately not validated server-side.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use rand::Rng;
use serde::Deserialize;
use titan_core::OrderNumber;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::AppError;
use crate::filters;
use crate::routes::cart::CartView;
use crate::session_cart::{commit_cart, open_cart};
use crate::state::AppState;

/// Length of a generated order number.
const ORDER_NUMBER_LEN: usize = 9;

/// Checkout form data.
///
/// Collected for the page flow; not validated or stored (non-goal).
#[derive(Debug, Deserialize)]
pub struct CheckoutForm {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub postal_code: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub payment_method: String,
}

/// Checkout page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/show.html")]
pub struct CheckoutTemplate {
    pub cart: CartView,
}

/// Order confirmation template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/confirmation.html")]
pub struct ConfirmationTemplate {
    pub order_number: String,
}

/// Display the checkout page.
///
/// An empty cart has nothing to check out: redirect home, as the
/// original storefront does.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> Response {
    let store = open_cart(&session).await;
    if store.items().is_empty() {
        return Redirect::to("/").into_response();
    }

    CheckoutTemplate {
        cart: CartView::from_store(&store, &state),
    }
    .into_response()
}

/// Place the order: clear the cart and move on to confirmation.
#[instrument(skip(session, form))]
pub async fn place(
    session: Session,
    Form(form): Form<CheckoutForm>,
) -> Result<Response, AppError> {
    let mut store = open_cart(&session).await;
    if store.items().is_empty() {
        return Ok(Redirect::to("/").into_response());
    }

    tracing::info!(
        lines = store.items().len(),
        units = store.quantity_total(),
        payment_method = %form.payment_method,
        "order placed, clearing cart"
    );

    store.clear_cart();
    commit_cart(store, &session).await?;

    Ok(Redirect::to("/confirmation").into_response())
}

/// Display the order confirmation screen.
///
/// The order number is generated at render time and nowhere persisted -
/// reloading shows a new one. (Reference behavior; orders have no
/// server-side existence at all.)
#[instrument]
pub async fn confirmation() -> impl IntoResponse {
    ConfirmationTemplate {
        order_number: generate_order_number().to_string(),
    }
}

/// Generate a random 9-character, uppercase base-36 order number.
fn generate_order_number() -> OrderNumber {
    let mut rng = rand::rng();
    let digits: String = (0..ORDER_NUMBER_LEN)
        .map(|_| {
            let digit = rng.random_range(0..36u32);
            char::from_digit(digit, 36)
                .unwrap_or('0')
                .to_ascii_uppercase()
        })
        .collect();

    OrderNumber::new(digits)
}
