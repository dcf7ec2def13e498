//! Catalog tab filters.

use crate::model::Product;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Rating threshold for the "top rated" tab.
pub const TOP_RATED_MIN: f64 = 4.5;

/// How far back "new arrivals" reaches.
pub const NEW_ARRIVAL_DAYS: i64 = 30;

/// Which slice of the catalog is shown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "name")]
pub enum CatalogFilter {
    /// Everything
    #[default]
    All,
    /// Original price above current price
    OnSale,
    /// Rating at or above [`TOP_RATED_MIN`]
    TopRated,
    /// Created within [`NEW_ARRIVAL_DAYS`]
    NewArrivals,
    /// Exact category label
    Category(String),
}

impl CatalogFilter {
    /// Whether a product passes the filter at time `now`.
    ///
    /// Products without a creation date count as new, matching how the
    /// storefront treated them.
    #[must_use]
    pub fn matches_at(&self, product: &Product, now: DateTime<Utc>) -> bool {
        match self {
            Self::All => true,
            Self::OnSale => product.is_on_sale(),
            Self::TopRated => product.rating >= TOP_RATED_MIN,
            Self::NewArrivals => {
                let cutoff = now - Duration::days(NEW_ARRIVAL_DAYS);
                product.created_at.is_none_or(|created| created > cutoff)
            }
            Self::Category(name) => product.category == *name,
        }
    }

    /// [`CatalogFilter::matches_at`] using the current time.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        self.matches_at(product, Utc::now())
    }

    /// Keep only products passing the filter, in order.
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        let now = Utc::now();
        products.iter().filter(|p| self.matches_at(p, now)).collect()
    }
}

impl fmt::Display for CatalogFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::OnSale => write!(f, "on-sale"),
            Self::TopRated => write!(f, "top-rated"),
            Self::NewArrivals => write!(f, "new"),
            Self::Category(name) => write!(f, "category:{name}"),
        }
    }
}

impl FromStr for CatalogFilter {
    type Err = std::convert::Infallible;

    /// Parses the CLI spelling; anything unrecognised is a category name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            "" | "all" => Self::All,
            "on-sale" | "sale" => Self::OnSale,
            "top-rated" => Self::TopRated,
            "new" => Self::NewArrivals,
            other => Self::Category(other.strip_prefix("category:").unwrap_or(other).to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_on_sale() {
        let sale = Product::new("1", "Óleo", "Mercearia", 7.0).with_original_price(9.0);
        let full = Product::new("2", "Óleo", "Mercearia", 9.0).with_original_price(9.0);
        assert!(CatalogFilter::OnSale.matches_at(&sale, now()));
        assert!(!CatalogFilter::OnSale.matches_at(&full, now()));
    }

    #[test]
    fn test_top_rated() {
        let good = Product::new("1", "Café", "Bebidas", 10.0).with_rating(4.5);
        let meh = Product::new("2", "Chá", "Bebidas", 10.0).with_rating(4.4);
        assert!(CatalogFilter::TopRated.matches_at(&good, now()));
        assert!(!CatalogFilter::TopRated.matches_at(&meh, now()));
    }

    #[test]
    fn test_new_arrivals() {
        let fresh = Product::new("1", "A", "B", 1.0).with_created_at(now() - Duration::days(3));
        let old = Product::new("2", "A", "B", 1.0).with_created_at(now() - Duration::days(45));
        let undated = Product::new("3", "A", "B", 1.0);
        assert!(CatalogFilter::NewArrivals.matches_at(&fresh, now()));
        assert!(!CatalogFilter::NewArrivals.matches_at(&old, now()));
        assert!(CatalogFilter::NewArrivals.matches_at(&undated, now()));
    }

    #[test]
    fn test_category_and_parse() {
        let p = Product::new("1", "Detergente", "Limpeza", 2.5);
        assert!("Limpeza".parse::<CatalogFilter>().unwrap().matches_at(&p, now()));
        assert!(!"category:Bebidas".parse::<CatalogFilter>().unwrap().matches_at(&p, now()));
        assert_eq!("all".parse::<CatalogFilter>().unwrap(), CatalogFilter::All);
        assert_eq!("sale".parse::<CatalogFilter>().unwrap(), CatalogFilter::OnSale);
        assert_eq!(CatalogFilter::TopRated.to_string(), "top-rated");
    }
}
