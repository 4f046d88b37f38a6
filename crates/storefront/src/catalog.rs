//! The markdown-backed product catalog.
//!
//! Products are markdown files with YAML frontmatter under
//! `content/products/`, loaded once at startup. The frontmatter carries
//! the catalog facts (id, title, price, image); the body is the product
//! description, rendered to HTML.
//!
//! ```markdown
//! ---
//! id: meridian-chronograph
//! title: Meridian Chronograph
//! price: 12400
//! image: /static/images/products/meridian-chronograph.jpg
//! ---
//!
//! Hand-finished 42mm chronograph...
//! ```

use std::path::Path;
use std::sync::Arc;

use comrak::{Options, markdown_to_html};
use gray_matter::{Matter, ParsedEntity, engine::YAML};
use rust_decimal::Decimal;
use serde::Deserialize;
use titan_core::{Price, ProductId};

/// Frontmatter metadata for a catalog product.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductMeta {
    pub id: String,
    pub title: String,
    pub price: Decimal,
    pub image: String,
    #[serde(default)]
    pub tagline: Option<String>,
    /// Grid ordering; lower comes first. Falls back to id order.
    #[serde(default)]
    pub position: Option<u32>,
}

/// A loaded catalog product with its rendered description.
#[derive(Debug, Clone)]
pub struct CatalogProduct {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    pub image: String,
    pub tagline: Option<String>,
    pub description_html: String,
    position: Option<u32>,
}

impl CatalogProduct {
    /// The catalog fact the cart store operates on.
    #[must_use]
    pub fn to_cart_product(&self) -> titan_cart::Product {
        titan_cart::Product {
            id: self.id.clone(),
            image: self.image.clone(),
            title: self.title.clone(),
            price: self.price,
        }
    }
}

/// Catalog store that holds all loaded products in memory.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Arc<Vec<CatalogProduct>>,
}

impl Catalog {
    /// Load all products from the content directory.
    ///
    /// Files that fail to parse are logged and skipped, so one bad
    /// product file cannot take down the storefront.
    ///
    /// # Errors
    ///
    /// Returns an error if the products directory cannot be read.
    pub fn load(content_dir: &Path) -> Result<Self, CatalogError> {
        let dir = content_dir.join("products");
        let mut products = Vec::new();

        if !dir.exists() {
            tracing::warn!("Products directory does not exist: {:?}", dir);
            return Ok(Self {
                products: Arc::new(products),
            });
        }

        let entries = std::fs::read_dir(&dir).map_err(|e| CatalogError::Io(e.to_string()))?;

        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "md") {
                match Self::load_product(&path) {
                    Ok(product) => {
                        tracing::info!("Loaded product: {}", product.id);
                        products.push(product);
                    }
                    Err(e) => {
                        tracing::error!("Failed to load product {:?}: {}", path, e);
                    }
                }
            }
        }

        // Stable grid order: explicit position first, then id.
        products.sort_by(|a, b| {
            let a_key = (a.position.unwrap_or(u32::MAX), a.id.clone());
            let b_key = (b.position.unwrap_or(u32::MAX), b.id.clone());
            a_key.cmp(&b_key)
        });

        Ok(Self {
            products: Arc::new(products),
        })
    }

    /// Load a single product from a markdown file.
    fn load_product(path: &Path) -> Result<CatalogProduct, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|e| CatalogError::Io(e.to_string()))?;
        parse_product(&content)
    }

    /// Get a product by id.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&CatalogProduct> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// All products in grid order.
    #[must_use]
    pub fn all(&self) -> &[CatalogProduct] {
        &self.products
    }

    /// Number of products in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// Parse a product from raw markdown with YAML frontmatter.
fn parse_product(content: &str) -> Result<CatalogProduct, CatalogError> {
    let matter = Matter::<YAML>::new();
    let parsed: ParsedEntity<ProductMeta> = matter
        .parse(content)
        .map_err(|e| CatalogError::Parse(format!("Failed to parse frontmatter: {e}")))?;
    let meta = parsed
        .data
        .ok_or_else(|| CatalogError::Parse("Missing frontmatter".to_string()))?;

    if meta.price.is_sign_negative() {
        return Err(CatalogError::Parse(format!(
            "Product {} has a negative price",
            meta.id
        )));
    }

    let description_html = render_markdown(&parsed.content);

    Ok(CatalogProduct {
        id: ProductId::new(meta.id),
        title: meta.title,
        price: Price::new(meta.price),
        image: meta.image,
        tagline: meta.tagline,
        description_html,
        position: meta.position,
    })
}

/// Render markdown to HTML with GitHub Flavored Markdown support.
fn render_markdown(content: &str) -> String {
    let mut options = Options::default();

    // Enable GFM extensions
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;

    markdown_to_html(content, &options)
}

/// Catalog loading errors.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const RAW: &str = "---\n\
id: meridian-chronograph\n\
title: Meridian Chronograph\n\
price: 12400\n\
image: /static/images/products/meridian-chronograph.jpg\n\
tagline: Precision in motion\n\
---\n\
\n\
A hand-finished 42mm chronograph with a *column-wheel* movement.\n";

    #[test]
    fn test_parse_product_frontmatter() {
        let product = parse_product(RAW).unwrap();
        assert_eq!(product.id, ProductId::new("meridian-chronograph"));
        assert_eq!(product.title, "Meridian Chronograph");
        assert_eq!(product.price, Price::from_dollars(12400));
        assert_eq!(product.tagline.as_deref(), Some("Precision in motion"));
    }

    #[test]
    fn test_parse_product_renders_description() {
        let product = parse_product(RAW).unwrap();
        assert!(product.description_html.contains("<em>column-wheel</em>"));
    }

    #[test]
    fn test_parse_product_missing_frontmatter() {
        assert!(matches!(
            parse_product("just a description, no frontmatter"),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn test_parse_product_rejects_negative_price() {
        let raw = "---\nid: p\ntitle: P\nprice: -5\nimage: /x.jpg\n---\nbody\n";
        assert!(matches!(parse_product(raw), Err(CatalogError::Parse(_))));
    }

    #[test]
    fn test_to_cart_product_carries_catalog_facts() {
        let product = parse_product(RAW).unwrap();
        let cart_product = product.to_cart_product();
        assert_eq!(cart_product.id, product.id);
        assert_eq!(cart_product.price, product.price);
        assert_eq!(cart_product.title, product.title);
    }
}
