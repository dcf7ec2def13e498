//! Catalog entities consumed by the search functions.
//!
//! Field names follow the storefront JSON payloads (`camelCase`). Everything
//! except `id`, `name`, `category` and `price` is optional on the wire so a
//! partially filled product from the inventory sync still decodes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Product code, unique within the catalog
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    /// Display name
    pub name: String,
    /// Category label
    pub category: String,
    /// Brand name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    /// Current price
    pub price: f64,
    /// Price before discount
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    /// Units in stock
    #[serde(default)]
    pub stock: u32,
    /// Availability flag as reported by the inventory
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
    /// Sale unit ("un", "kg", ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Average rating (0-5)
    #[serde(default)]
    pub rating: f64,
    /// Number of reviews
    #[serde(default)]
    pub reviews: u32,
    /// Free-form tags
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Long description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// When the product entered the catalog
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Discount percentage of the applied promotion
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<f64>,
    /// Artwork of the applied promotion
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promotion_image: Option<String>,
}

fn default_in_stock() -> bool {
    true
}

impl Product {
    /// Create a product with the required fields and defaults for the rest.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        price: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            brand: None,
            price,
            original_price: None,
            stock: 0,
            in_stock: true,
            unit: None,
            image: None,
            rating: 0.0,
            reviews: 0,
            tags: Vec::new(),
            description: None,
            created_at: None,
            discount: None,
            promotion_image: None,
        }
    }

    /// Set the brand
    #[must_use]
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    /// Set the pre-discount price
    #[must_use]
    pub fn with_original_price(mut self, price: f64) -> Self {
        self.original_price = Some(price);
        self
    }

    /// Set the rating
    #[must_use]
    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = rating;
        self
    }

    /// Set the creation timestamp
    #[must_use]
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Whether the product is currently discounted.
    #[must_use]
    pub fn is_on_sale(&self) -> bool {
        self.original_price.is_some_and(|original| original > self.price)
    }
}

/// One row of the best-seller reference list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestSellerEntry {
    /// Product description as printed in the sales report
    #[serde(rename = "nome")]
    pub name: String,
}

impl BestSellerEntry {
    /// Create an entry
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A price promotion attached to a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Promotion {
    /// Promotion identifier
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
    /// Product this promotion applies to
    #[serde(deserialize_with = "string_or_number")]
    pub product_id: String,
    /// Product name at the time the promotion was created
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    /// Promotional price
    pub new_price: f64,
    /// Reference price shown struck through
    pub original_price: f64,
    /// Discount percentage
    #[serde(default)]
    pub discount: f64,
    /// Only active promotions are applied
    #[serde(default)]
    pub is_active: bool,
    /// Optional promotional artwork
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// End of the promotion; open-ended when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<DateTime<Utc>>,
}

impl Promotion {
    /// Whether the promotion applies at time `now`.
    #[must_use]
    pub fn is_current_at(&self, now: DateTime<Utc>) -> bool {
        self.is_active && self.valid_until.is_none_or(|until| until >= now)
    }
}

/// Accept identifiers sent either as JSON strings or numbers.
///
/// The Java backend serializes numeric ids; the admin screens send strings.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Int(n) => n.to_string(),
        Id::Float(n) => n.to_string(),
    })
}

/// Decode a JSON product array.
///
/// # Errors
/// Returns [`crate::SearchError::InvalidPayload`] when the JSON does not
/// match the product schema.
pub fn parse_products(json: &str) -> crate::Result<Vec<Product>> {
    Ok(serde_json::from_str(json)?)
}

/// Decode a JSON best-seller array (`[{"nome": ...}]`).
///
/// # Errors
/// Returns [`crate::SearchError::InvalidPayload`] on malformed JSON.
pub fn parse_best_sellers_json(json: &str) -> crate::Result<Vec<BestSellerEntry>> {
    Ok(serde_json::from_str(json)?)
}
