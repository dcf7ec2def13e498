//! Smart product search.
//!
//! A query is answered in two ways:
//!
//! - `#<code>` looks products up by identifier substring.
//! - Anything else is matched against normalized product names through three
//!   candidate sets (exact substring, word prefix, fuzzy), which are unioned,
//!   de-duplicated by identifier and ranked with a [`ReferenceList`].

use crate::fuzzy::{fuzzy_matches, FuzzyMode};
use crate::model::Product;
use crate::normalize::{normalize, words};
use crate::relevance::ReferenceList;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Marker that switches a query to code lookup.
pub const CODE_MARKER: char = '#';

/// Product lists above this size are scanned in parallel.
#[cfg(feature = "parallel")]
const PARALLEL_THRESHOLD: usize = 2_000;

/// How a query should be interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchQuery {
    /// Nothing to search for
    Empty,
    /// Identifier substring lookup (`#123`)
    Code(String),
    /// Free-text name search, already normalized
    Text(String),
}

impl SearchQuery {
    /// Classify a raw query.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if let Some(code) = trimmed.strip_prefix(CODE_MARKER) {
            let code = code.trim();
            return if code.is_empty() {
                Self::Empty
            } else {
                Self::Code(code.to_string())
            };
        }

        let normalized = normalize(trimmed);
        if normalized.is_empty() {
            Self::Empty
        } else {
            Self::Text(normalized)
        }
    }

    /// Whether this is a free-text search (which bypasses pagination).
    #[must_use]
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }
}

/// Which candidate sets a product landed in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchFlags {
    /// Normalized name contains the normalized query
    pub exact: bool,
    /// Some name word starts with the normalized query
    pub prefix: bool,
    /// Fuzzy word similarity
    pub fuzzy: bool,
}

impl MatchFlags {
    /// Evaluate a normalized name against a normalized query.
    pub fn evaluate(name: &str, query: &str, query_words: &[&str], mode: FuzzyMode) -> Self {
        let name_words: Vec<&str> = words(name).collect();
        Self {
            exact: name.contains(query),
            prefix: name_words.iter().any(|w| w.starts_with(query)),
            fuzzy: fuzzy_matches(query_words, &name_words, mode),
        }
    }

    /// Whether the product matched at all.
    #[must_use]
    pub fn any(self) -> bool {
        self.exact || self.prefix || self.fuzzy
    }
}

/// Configured search engine.
///
/// Holds the reference list and fuzzy strategy; searching is a pure function
/// of the query and product slice.
#[derive(Debug, Clone, Default)]
pub struct SmartSearch {
    reference: ReferenceList,
    fuzzy: FuzzyMode,
}

impl SmartSearch {
    /// Create a searcher ranking with the given reference list.
    pub fn new(reference: ReferenceList) -> Self {
        Self {
            reference,
            fuzzy: FuzzyMode::default(),
        }
    }

    /// Use a different fuzzy strategy
    #[must_use]
    pub fn with_fuzzy(mut self, mode: FuzzyMode) -> Self {
        self.fuzzy = mode;
        self
    }

    /// Reference list used for ranking
    #[must_use]
    pub fn reference(&self) -> &ReferenceList {
        &self.reference
    }

    /// Fuzzy strategy in use
    #[must_use]
    pub fn fuzzy_mode(&self) -> FuzzyMode {
        self.fuzzy
    }

    /// Run a search.
    ///
    /// Returns a subset of `products` with unique identifiers. Code lookups
    /// keep catalog order; text searches are ranked.
    pub fn search<'a>(&self, raw_query: &str, products: &'a [Product]) -> Vec<&'a Product> {
        let candidates: Vec<&'a Product> = products.iter().collect();
        self.search_in(raw_query, &candidates)
    }

    /// [`SmartSearch::search`] over an already selected set of products.
    pub fn search_in<'a>(&self, raw_query: &str, products: &[&'a Product]) -> Vec<&'a Product> {
        let results = match SearchQuery::parse(raw_query) {
            SearchQuery::Empty => Vec::new(),
            SearchQuery::Code(code) => {
                dedup_by_id(products.iter().copied().filter(|p| p.id.contains(&code)))
            }
            SearchQuery::Text(query) => self.text_search(&query, products),
        };

        tracing::debug!(
            query = raw_query,
            candidates = products.len(),
            results = results.len(),
            "smart search"
        );

        results
    }

    fn text_search<'a>(&self, query: &str, products: &[&'a Product]) -> Vec<&'a Product> {
        let query_words: Vec<&str> = words(query).collect();
        let flags = self.evaluate_all(query, &query_words, products);

        // Union in set order: exact, then prefix, then fuzzy
        let exact = flags.iter().filter(|(_, f)| f.exact).map(|(p, _)| *p);
        let prefix = flags.iter().filter(|(_, f)| f.prefix).map(|(p, _)| *p);
        let fuzzy = flags.iter().filter(|(_, f)| f.fuzzy).map(|(p, _)| *p);

        let mut results = dedup_by_id(exact.chain(prefix).chain(fuzzy));
        self.reference.sort(&mut results);
        results
    }

    #[cfg(feature = "parallel")]
    fn evaluate_all<'a>(
        &self,
        query: &str,
        query_words: &[&str],
        products: &[&'a Product],
    ) -> Vec<(&'a Product, MatchFlags)> {
        use rayon::prelude::*;

        if products.len() < PARALLEL_THRESHOLD {
            return self.evaluate_sequential(query, query_words, products);
        }

        products
            .par_iter()
            .map(|&p| (p, MatchFlags::evaluate(&normalize(&p.name), query, query_words, self.fuzzy)))
            .filter(|(_, f)| f.any())
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn evaluate_all<'a>(
        &self,
        query: &str,
        query_words: &[&str],
        products: &[&'a Product],
    ) -> Vec<(&'a Product, MatchFlags)> {
        self.evaluate_sequential(query, query_words, products)
    }

    fn evaluate_sequential<'a>(
        &self,
        query: &str,
        query_words: &[&str],
        products: &[&'a Product],
    ) -> Vec<(&'a Product, MatchFlags)> {
        products
            .iter()
            .map(|&p| (p, MatchFlags::evaluate(&normalize(&p.name), query, query_words, self.fuzzy)))
            .filter(|(_, f)| f.any())
            .collect()
    }
}

/// Keep the first product for each identifier.
fn dedup_by_id<'a>(products: impl Iterator<Item = &'a Product>) -> Vec<&'a Product> {
    let mut seen = HashSet::new();
    products.filter(|&p| seen.insert(p.id.as_str())).collect()
}

/// Search with the default fuzzy strategy.
///
/// Convenience wrapper over [`SmartSearch::search`] that clones the results.
pub fn smart_search(query: &str, products: &[Product], reference: &ReferenceList) -> Vec<Product> {
    SmartSearch::new(reference.clone())
        .search(query, products)
        .into_iter()
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn product(id: &str, name: &str) -> Product {
        Product::new(id, name, "Mercearia", 9.9)
    }

    fn catalog() -> Vec<Product> {
        vec![
            product("101", "Arroz Integral 5kg"),
            product("102", "Feijão Carioca 1kg"),
            product("103", "Açúcar Refinado União"),
            product("123a", "Leite Integral Piracanjuba"),
            product("456", "Café Pilão 500g"),
        ]
    }

    fn ids(results: &[&Product]) -> Vec<String> {
        results.iter().map(|p| p.id.clone()).collect()
    }

    #[test]
    fn test_query_parse() {
        assert_eq!(SearchQuery::parse(""), SearchQuery::Empty);
        assert_eq!(SearchQuery::parse("  #  "), SearchQuery::Empty);
        assert_eq!(SearchQuery::parse("?!"), SearchQuery::Empty);
        assert_eq!(SearchQuery::parse("#123"), SearchQuery::Code("123".into()));
        assert_eq!(SearchQuery::parse(" Açúcar "), SearchQuery::Text("acucar".into()));
    }

    #[test]
    fn test_empty_query_returns_nothing() {
        let products = catalog();
        assert!(SmartSearch::default().search("", &products).is_empty());
        assert!(SmartSearch::default().search("   ", &products).is_empty());
    }

    #[test]
    fn test_empty_catalog_returns_nothing() {
        assert!(SmartSearch::default().search("arroz", &[]).is_empty());
    }

    #[test]
    fn test_code_lookup_is_substring() {
        let products = vec![product("123a", "Leite"), product("456", "Café")];
        let results = SmartSearch::default().search("#123", &products);
        assert_eq!(ids(&results), vec!["123a"]);
    }

    #[test]
    fn test_typo_found_by_fuzzy() {
        let products = catalog();
        let results = SmartSearch::default().search("arros", &products);
        assert!(ids(&results).contains(&"101".to_string()));
    }

    #[test]
    fn test_multi_word_fuzzy_needs_every_word() {
        let products = catalog();
        // "integral" alone would also pull in the milk
        let results = SmartSearch::default().search("arros integral", &products);
        assert_eq!(ids(&results), vec!["101"]);

        let results = SmartSearch::default().search("arros chocolate", &products);
        assert!(results.is_empty());
    }

    #[test]
    fn test_accent_insensitive_exact() {
        let products = catalog();
        let results = SmartSearch::default().search("acucar", &products);
        assert_eq!(ids(&results), vec!["103"]);
    }

    #[test]
    fn test_prefix_word() {
        let flags = MatchFlags::evaluate("feijao carioca 1kg", "car", &["car"], FuzzyMode::Heuristic);
        assert!(flags.prefix);
        assert!(flags.exact);
    }

    #[test]
    fn test_best_sellers_rank_first() {
        let products = catalog();
        let reference = ReferenceList::from_names(["LEITE INTEGRAL PIRACANJUBA"]);
        let results = SmartSearch::new(reference).search("integral", &products);
        assert_eq!(ids(&results), vec!["123a", "101"]);
    }

    #[test]
    fn test_alphabetical_without_reference() {
        let products = catalog();
        let results = SmartSearch::default().search("integral", &products);
        assert_eq!(ids(&results), vec!["101", "123a"]);
    }

    #[test]
    fn test_duplicate_ids_first_wins() {
        let products = vec![product("1", "Sal Refinado"), product("1", "Sal Grosso")];
        let results = SmartSearch::default().search("sal", &products);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Sal Refinado");
    }

    #[test]
    fn test_edit_distance_mode_is_stricter() {
        let products = catalog();
        let strict = SmartSearch::default().with_fuzzy(FuzzyMode::EditDistance { max_distance: 1 });
        assert!(strict.search("x", &products).is_empty());
        assert!(!SmartSearch::default().search("x", &products).is_empty());
        assert_eq!(ids(&strict.search("arros", &products)), vec!["101"]);
    }

    #[test]
    fn test_smart_search_wrapper_clones() {
        let products = catalog();
        let results = smart_search("cafe", &products, &ReferenceList::default());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "456");
    }

    fn arb_products() -> impl Strategy<Value = Vec<Product>> {
        prop::collection::vec(("[0-9]{1,3}", "[A-Za-zÀ-ú ]{0,24}"), 0..40).prop_map(|rows| {
            rows.into_iter().map(|(id, name)| product(&id, &name)).collect()
        })
    }

    proptest! {
        #[test]
        fn prop_results_are_unique_subset(products in arb_products(), query in "[a-z#0-9 ]{0,8}") {
            let results = SmartSearch::default().search(&query, &products);
            let mut seen = HashSet::new();
            for r in &results {
                prop_assert!(products.iter().any(|p| p == *r));
                prop_assert!(seen.insert(r.id.clone()));
            }
        }

        #[test]
        fn prop_empty_catalog(query in ".{0,12}") {
            prop_assert!(SmartSearch::default().search(&query, &[]).is_empty());
        }

        #[test]
        fn prop_substring_always_found(products in arb_products(), start in 0usize..24, len in 1usize..6) {
            prop_assume!(!products.is_empty());
            let target = &products[0];
            let chars: Vec<char> = target.name.chars().collect();
            prop_assume!(start + len <= chars.len());
            let query: String = chars[start..start + len].iter().collect();
            prop_assume!(!normalize(&query).is_empty());
            prop_assume!(!query.trim_start().starts_with(CODE_MARKER));
            // Only well-formed substrings of the normalized name qualify
            prop_assume!(normalize(&target.name).contains(&normalize(&query)));

            let results = SmartSearch::default().search(&query, &products);
            prop_assert!(results.iter().any(|p| p.id == target.id));
        }

        #[test]
        fn prop_referenced_sort_first(products in arb_products(), query in "[a-z]{1,3}") {
            let reference = ReferenceList::from_names(
                products.iter().take(3).map(|p| p.name.as_str()),
            );
            let searcher = SmartSearch::new(reference.clone());
            let results = searcher.search(&query, &products);
            let mut seen_other = false;
            for r in results {
                if reference.contains(r) {
                    prop_assert!(!seen_other);
                } else {
                    seen_other = true;
                }
            }
        }
    }
}
