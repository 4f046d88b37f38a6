//! Integration tests for the Titan storefront.
//!
//! The storefront has no database and no external services, so the tests
//! drive the real production router in-process via `tower::ServiceExt`
//! instead of standing up a server. [`TestClient`] carries the session
//! cookie between requests the way a browser would, which is what makes
//! the cart flow testable end-to-end: the cart lives in the session.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p titan-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::Path;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use rust_decimal::Decimal;
use titan_storefront::catalog::Catalog;
use titan_storefront::config::StorefrontConfig;
use titan_storefront::state::AppState;
use tower::ServiceExt;

/// A response as the tests want to see it.
pub struct TestResponse {
    pub status: StatusCode,
    pub location: Option<String>,
    pub body: String,
}

/// In-process client over the storefront router, carrying the session
/// cookie across requests like a browser.
pub struct TestClient {
    app: Router,
    cookie: Option<String>,
}

impl TestClient {
    /// Build a client over a fresh storefront with the real catalog.
    #[must_use]
    pub fn new() -> Self {
        let config = StorefrontConfig {
            host: "127.0.0.1".parse().expect("valid host"),
            port: 0,
            base_url: "http://localhost:3000".to_string(),
            content_dir: content_dir(),
            tax_rate: Decimal::new(10, 2),
            sentry_dsn: None,
        };
        let catalog = Catalog::load(&config.content_dir).expect("catalog loads");
        assert!(!catalog.is_empty(), "test catalog must not be empty");

        Self {
            app: titan_storefront::app(AppState::new(config, catalog)),
            cookie: None,
        }
    }

    /// Perform a GET request.
    pub async fn get(&mut self, uri: &str) -> TestResponse {
        let request = self
            .request_builder(uri)
            .method("GET")
            .body(Body::empty())
            .expect("valid request");
        self.execute(request).await
    }

    /// Perform a POST with a form-urlencoded body.
    pub async fn post_form(&mut self, uri: &str, form: &str) -> TestResponse {
        let request = self
            .request_builder(uri)
            .method("POST")
            .header(
                header::CONTENT_TYPE,
                "application/x-www-form-urlencoded",
            )
            .body(Body::from(form.to_string()))
            .expect("valid request");
        self.execute(request).await
    }

    fn request_builder(&self, uri: &str) -> axum::http::request::Builder {
        let mut builder = Request::builder().uri(uri);
        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie.clone());
        }
        builder
    }

    async fn execute(&mut self, request: Request<Body>) -> TestResponse {
        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        // Adopt any session cookie the response hands out.
        if let Some(set_cookie) = response.headers().get(header::SET_COOKIE)
            && let Ok(raw) = set_cookie.to_str()
        {
            let pair = raw.split_once(';').map_or(raw, |(pair, _)| pair);
            self.cookie = Some(pair.to_string());
        }

        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(ToString::to_string);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body is readable");

        TestResponse {
            status,
            location,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }
}

impl Default for TestClient {
    fn default() -> Self {
        Self::new()
    }
}

/// The storefront's real content directory, relative to this crate.
fn content_dir() -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("storefront")
        .join("content")
}
