//! WASM bindings for the storefront catalog.
//!
//! Payloads cross the boundary as JSON strings. Malformed input yields an
//! empty JSON array rather than a JS exception, so the page keeps rendering.

use crate::best_sellers;
use crate::model::{parse_best_sellers_json, parse_products};
use crate::pagination::{Page, PageSize};
use crate::relevance::ReferenceList;
use crate::smart::SmartSearch;
use wasm_bindgen::prelude::*;

/// Normalize text for comparison (lowercase, no accents or punctuation).
#[wasm_bindgen]
pub fn normalize(text: &str) -> String {
    crate::normalize(text)
}

/// Run a smart search.
///
/// # Arguments
/// * `query` - Search box contents (`#` prefix for code lookup)
/// * `products_json` - JSON array of products
/// * `best_sellers` - Either the JSON `[{"nome": ...}]` list or the raw
///   `;`-separated sales report; empty for no ranking hint
///
/// # Returns
/// JSON array of matching products, best sellers first
#[wasm_bindgen]
pub fn smart_search_json(query: &str, products_json: &str, best_sellers: &str) -> String {
    let Ok(products) = parse_products(products_json) else {
        return "[]".to_string();
    };

    let entries = if best_sellers.trim_start().starts_with('[') {
        parse_best_sellers_json(best_sellers).unwrap_or_default()
    } else {
        best_sellers::parse_report(best_sellers)
    };

    let results = SmartSearch::new(ReferenceList::from_entries(&entries)).search(query, &products);
    serde_json::to_string(&results).unwrap_or_else(|_| "[]".to_string())
}

/// Slice a JSON array into one page.
///
/// # Returns
/// JSON object with `items`, `page`, `page_size`, `total_items` and
/// `total_pages`; unsupported page sizes fall back to the default
#[wasm_bindgen]
pub fn paginate_json(items_json: &str, page: usize, page_size: usize) -> String {
    let items: Vec<serde_json::Value> = serde_json::from_str(items_json).unwrap_or_default();
    let size = PageSize::new(page_size).unwrap_or_default();
    let page = Page::navigate(&items, page, size);
    serde_json::to_string(&page).unwrap_or_else(|_| "{}".to_string())
}
