//! Catalog search for the Guanabara storefront.
//!
//! This crate provides:
//! - Accent- and case-insensitive text normalization
//! - Smart search (exact, word prefix and fuzzy candidate sets, `#code` lookup)
//! - Best-seller relevance ordering
//! - Catalog filters, promotion overlay and header suggestions
//! - Fixed-size pagination
//!
//! Everything here is pure and synchronous. Large catalogs are scanned with
//! rayon when the `parallel` feature is on; the `wasm` feature exposes JSON
//! bindings for the browser.
//!
//! ```
//! use storefront_search::{Product, ReferenceList, SmartSearch};
//!
//! let products = vec![
//!     Product::new("101", "Arroz Integral 5kg", "Mercearia", 27.9),
//!     Product::new("102", "Feijão Carioca 1kg", "Mercearia", 8.5),
//! ];
//! let results = SmartSearch::new(ReferenceList::default()).search("arros", &products);
//! assert_eq!(results[0].id, "101");
//! ```

pub mod best_sellers;
mod error;
mod filter;
mod fuzzy;
mod model;
mod normalize;
mod pagination;
mod promotions;
mod relevance;
mod smart;
mod suggest;
mod view;

#[cfg(feature = "wasm")]
mod wasm;

pub use error::{Result, SearchError};
pub use filter::{CatalogFilter, NEW_ARRIVAL_DAYS, TOP_RATED_MIN};
pub use fuzzy::{FuzzyMode, fuzzy_matches, levenshtein_distance, similar_words};
pub use model::{BestSellerEntry, Product, Promotion, parse_best_sellers_json, parse_products};
pub use normalize::{normalize, normalize_opt, words};
pub use pagination::{
    DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS, Page, PageSize, clamp_page, paginate, total_pages,
};
pub use promotions::{apply_promotions, apply_promotions_at};
pub use relevance::{PRIORITY_OTHER, PRIORITY_REFERENCED, ReferenceList, compare_names};
pub use smart::{CODE_MARKER, MatchFlags, SearchQuery, SmartSearch, smart_search};
pub use suggest::{DEFAULT_SUGGESTION_LIMIT, MIN_QUERY_CHARS, SuggestionRank, suggest};
pub use view::{CatalogQuery, CatalogView, PageInfo};
