//! Landing page route handler.
//!
//! One marketing page: hero, story, the product grid with add-to-cart
//! buttons, and the contact footer. All content is static or comes from
//! the markdown catalog; the only dynamic element is the cart badge.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use crate::catalog::CatalogProduct;
use crate::filters;
use crate::state::AppState;

/// Product display data for templates.
#[derive(Clone)]
pub struct ProductView {
    pub id: String,
    pub title: String,
    pub price: String,
    pub image: String,
    pub tagline: Option<String>,
    pub description_html: String,
}

impl From<&CatalogProduct> for ProductView {
    fn from(product: &CatalogProduct) -> Self {
        Self {
            id: product.id.to_string(),
            title: product.title.clone(),
            price: product.price.display(),
            image: product.image.clone(),
            tagline: product.tagline.clone(),
            description_html: product.description_html.clone(),
        }
    }
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    /// Products for the collection grid.
    pub products: Vec<ProductView>,
}

/// Display the landing page.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> impl IntoResponse {
    let products = state.catalog().all().iter().map(ProductView::from).collect();

    HomeTemplate { products }
}
