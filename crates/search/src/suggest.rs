//! Live search suggestions for the header dropdown.

use crate::model::Product;
use crate::normalize::{normalize, normalize_opt};

/// Default number of suggestions shown.
pub const DEFAULT_SUGGESTION_LIMIT: usize = 8;

/// Queries shorter than this (in characters, trimmed) get no suggestions.
pub const MIN_QUERY_CHARS: usize = 2;

/// Suggestion tiers, best first.
///
/// A name prefix always wins; a brand match breaks ties. Name substring and
/// category hits carry no weight of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SuggestionRank {
    /// Name starts with the query and the brand contains it
    NamePrefixAndBrand = 0,
    /// Name starts with the query
    NamePrefix = 1,
    /// Brand contains the query
    Brand = 2,
    /// Name or category contains the query
    Other = 3,
}

/// Rank a product for a normalized query, or `None` if it does not match.
pub fn rank(product: &Product, query: &str) -> Option<SuggestionRank> {
    let name = normalize(&product.name);
    let brand = normalize_opt(product.brand.as_deref()).contains(query);

    let rank = match (name.starts_with(query), brand) {
        (true, true) => SuggestionRank::NamePrefixAndBrand,
        (true, false) => SuggestionRank::NamePrefix,
        (false, true) => SuggestionRank::Brand,
        (false, false) if name.contains(query) || normalize(&product.category).contains(query) => {
            SuggestionRank::Other
        }
        (false, false) => return None,
    };
    Some(rank)
}

/// Suggestions for a partially typed query.
///
/// Matches name, brand or category; ranks by [`SuggestionRank`], keeping
/// catalog order within a tier.
pub fn suggest<'a>(query: &str, products: &'a [Product], limit: usize) -> Vec<&'a Product> {
    let trimmed = query.trim();
    if trimmed.chars().count() < MIN_QUERY_CHARS {
        return Vec::new();
    }
    let query = normalize(trimmed);
    if query.is_empty() {
        return Vec::new();
    }

    let mut ranked: Vec<(SuggestionRank, &Product)> = products
        .iter()
        .filter_map(|p| rank(p, &query).map(|r| (r, p)))
        .collect();
    ranked.sort_by_key(|(r, _)| *r);
    ranked.into_iter().take(limit).map(|(_, p)| p).collect()
}
