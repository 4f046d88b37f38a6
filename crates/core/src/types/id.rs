//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing identifiers from different entity types. Titan
//! identifiers are human-readable string handles (e.g.
//! `meridian-chronograph`), so the wrappers are `String`-backed.

/// Macro to define a type-safe, string-backed ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<String>` and `From<&str>` implementations
/// - `Display` and `AsRef<str>` implementations
///
/// # Example
///
/// ```rust
/// # use titan_core::define_id;
/// define_id!(ProductId);
/// define_id!(OrderNumber);
///
/// let product_id = ProductId::new("meridian-chronograph");
/// let order_number = OrderNumber::new("X7K2M9QW4");
///
/// // These are different types, so this won't compile:
/// // let _: ProductId = order_number;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from anything string-like.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper, returning the underlying `String`.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

// Define standard entity IDs
define_id!(ProductId);
define_id!(OrderNumber);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_id_roundtrip() {
        let id = ProductId::new("meridian-chronograph");
        assert_eq!(id.as_str(), "meridian-chronograph");
        assert_eq!(id.to_string(), "meridian-chronograph");
        assert_eq!(ProductId::from("meridian-chronograph"), id);
    }

    #[test]
    fn test_id_serde_transparent() {
        let id = ProductId::new("atlas-gmt");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"atlas-gmt\"");

        let back: ProductId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_order_number_display() {
        let number = OrderNumber::new("X7K2M9QW4");
        assert_eq!(format!("#{number}"), "#X7K2M9QW4");
    }
}
