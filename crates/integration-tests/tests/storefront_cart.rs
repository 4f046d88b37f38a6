//! End-to-end cart flow tests against the in-process storefront router.
//!
//! The cart lives in the shopper's session, so every test drives the flow
//! through a [`TestClient`] that carries the session cookie between
//! requests - add, count, update, remove, checkout, confirmation.

use axum::http::StatusCode;
use titan_integration_tests::TestClient;

// ============================================================================
// Pages
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let mut client = TestClient::new();
    let response = client.get("/health").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, "ok");
}

#[tokio::test]
async fn test_landing_page_lists_catalog_products() {
    let mut client = TestClient::new();
    let response = client.get("/").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Meridian Chronograph"));
    assert!(response.body.contains("$12400.00"));
    assert!(response.body.contains("Eclipse Tourbillon"));
}

#[tokio::test]
async fn test_cart_page_starts_empty() {
    let mut client = TestClient::new();
    let response = client.get("/cart").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Your cart is empty."));
}

// ============================================================================
// Cart operations
// ============================================================================

#[tokio::test]
async fn test_add_to_cart_increments_count_badge() {
    let mut client = TestClient::new();

    let response = client
        .post_form("/cart/add", "product_id=meridian-chronograph")
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body.trim(), "1");

    // Re-adding the same product increments the same line.
    let response = client
        .post_form("/cart/add", "product_id=meridian-chronograph")
        .await;
    assert_eq!(response.body.trim(), "2");

    let response = client.get("/cart/count").await;
    assert_eq!(response.body.trim(), "2");
}

#[tokio::test]
async fn test_add_unknown_product_is_not_found() {
    let mut client = TestClient::new();

    let response = client.post_form("/cart/add", "product_id=ghost-watch").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    // Nothing was added.
    let response = client.get("/cart/count").await;
    assert_eq!(response.body.trim(), "0");
}

#[tokio::test]
async fn test_cart_page_shows_lines_and_totals() {
    let mut client = TestClient::new();
    client
        .post_form("/cart/add", "product_id=meridian-chronograph")
        .await;
    client
        .post_form("/cart/add", "product_id=meridian-chronograph")
        .await;

    let response = client.get("/cart").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Meridian Chronograph"));
    // 2 x $12400: subtotal 24800, 10% tax 2480, total 27280.
    assert!(response.body.contains("$24800.00"));
    assert!(response.body.contains("$2480.00"));
    assert!(response.body.contains("$27280.00"));
}

#[tokio::test]
async fn test_update_quantity_sets_exact_value() {
    let mut client = TestClient::new();
    client.post_form("/cart/add", "product_id=atlas-gmt").await;

    let response = client
        .post_form("/cart/update", "product_id=atlas-gmt&quantity=3")
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("class=\"quantity\">3</span>"));

    let response = client.get("/cart/count").await;
    assert_eq!(response.body.trim(), "3");
}

#[tokio::test]
async fn test_update_quantity_to_zero_is_ignored() {
    let mut client = TestClient::new();
    client.post_form("/cart/add", "product_id=atlas-gmt").await;
    client.post_form("/cart/add", "product_id=atlas-gmt").await;

    let response = client
        .post_form("/cart/update", "product_id=atlas-gmt&quantity=0")
        .await;
    assert_eq!(response.status, StatusCode::OK);
    // The line keeps its prior quantity.
    assert!(response.body.contains("class=\"quantity\">2</span>"));
}

#[tokio::test]
async fn test_remove_from_cart() {
    let mut client = TestClient::new();
    client
        .post_form("/cart/add", "product_id=solstice-automatic")
        .await;
    client.post_form("/cart/add", "product_id=atlas-gmt").await;

    let response = client
        .post_form("/cart/remove", "product_id=solstice-automatic")
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(!response.body.contains("Solstice Automatic"));
    assert!(response.body.contains("Atlas GMT"));
}

#[tokio::test]
async fn test_remove_absent_product_is_noop() {
    let mut client = TestClient::new();
    client.post_form("/cart/add", "product_id=atlas-gmt").await;

    let response = client
        .post_form("/cart/remove", "product_id=ghost-watch")
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Atlas GMT"));
}

// ============================================================================
// Checkout flow
// ============================================================================

#[tokio::test]
async fn test_checkout_with_empty_cart_redirects_home() {
    let mut client = TestClient::new();

    let response = client.get("/checkout").await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location.as_deref(), Some("/"));
}

#[tokio::test]
async fn test_checkout_page_reviews_the_order() {
    let mut client = TestClient::new();
    client
        .post_form("/cart/add", "product_id=eclipse-tourbillon")
        .await;

    let response = client.get("/checkout").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Billing Details"));
    assert!(response.body.contains("Eclipse Tourbillon"));
    // $42000 + 10% tax.
    assert!(response.body.contains("$46200.00"));
}

#[tokio::test]
async fn test_placing_order_clears_cart_and_redirects_to_confirmation() {
    let mut client = TestClient::new();
    client
        .post_form("/cart/add", "product_id=meridian-chronograph")
        .await;

    let response = client
        .post_form(
            "/checkout",
            "full_name=Jane+Doe&email=jane%40example.com&payment_method=card",
        )
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location.as_deref(), Some("/confirmation"));

    // The cart is empty afterwards; checkout itself is unreachable again.
    let response = client.get("/cart").await;
    assert!(response.body.contains("Your cart is empty."));

    let response = client.get("/checkout").await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_confirmation_page_shows_generated_order_number() {
    let mut client = TestClient::new();
    let response = client.get("/confirmation").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Order Confirmed"));

    // A 9-character uppercase base-36 order number, e.g. "#X7K2M9QW4".
    let order_number = response
        .body
        .split("class=\"order-number\">#")
        .nth(1)
        .and_then(|rest| rest.get(..9))
        .expect("order number present");
    assert!(
        order_number
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase())
    );
}
