//! Best-seller relevance ordering.
//!
//! Results are ranked by a single signal: whether the product shows up in the
//! best-seller reference list. Ties fall back to alphabetical order of the
//! name, compared accent-insensitively.

use crate::model::{BestSellerEntry, Product};
use crate::normalize::normalize;
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::collections::HashSet;

/// Priority assigned to products found in the reference list.
pub const PRIORITY_REFERENCED: u8 = 0;
/// Priority assigned to every other product.
pub const PRIORITY_OTHER: u8 = 1;

/// Normalized best-seller names used for ranking.
#[derive(Debug, Clone, Default)]
pub struct ReferenceList {
    names: Vec<String>,
    exact: HashSet<String>,
}

impl ReferenceList {
    /// Build from report entries.
    ///
    /// The report lists best sellers in ascending sales order, so entries are
    /// reversed before use. Entries that normalize to nothing are skipped.
    pub fn from_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = &'a BestSellerEntry>,
        I::IntoIter: DoubleEndedIterator,
    {
        Self::from_names(entries.into_iter().rev().map(|e| e.name.as_str()))
    }

    /// Build from names in priority order (no reversal).
    pub fn from_names<'a, I>(names: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let names: Vec<String> = names
            .into_iter()
            .map(normalize)
            .filter(|n| !n.is_empty())
            .collect();
        let exact = names.iter().cloned().collect();
        Self { names, exact }
    }

    /// Number of usable entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the list has no usable entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Normalized names in priority order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Whether an already-normalized product name is referenced.
    ///
    /// Matches on equality or substring in either direction, since report
    /// descriptions and catalog names are often truncated differently.
    #[must_use]
    pub fn contains_normalized(&self, name: &str) -> bool {
        if name.is_empty() {
            return false;
        }
        self.exact.contains(name)
            || self
                .names
                .iter()
                .any(|entry| name.contains(entry.as_str()) || entry.contains(name))
    }

    /// Whether a raw (unnormalized) name is referenced.
    #[must_use]
    pub fn contains_name(&self, name: &str) -> bool {
        self.contains_normalized(&normalize(name))
    }

    /// Whether a product is referenced.
    #[must_use]
    pub fn contains(&self, product: &Product) -> bool {
        self.contains_name(&product.name)
    }

    /// Ranking priority of a product (lower sorts first).
    #[must_use]
    pub fn priority(&self, product: &Product) -> u8 {
        if self.contains(product) {
            PRIORITY_REFERENCED
        } else {
            PRIORITY_OTHER
        }
    }

    /// Comparator: referenced products first, then by name.
    #[must_use]
    pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
        self.priority(a)
            .cmp(&self.priority(b))
            .then_with(|| compare_names(&a.name, &b.name))
    }

    /// Sort products in place by [`ReferenceList::compare`].
    ///
    /// The sort is stable and computes each product's key once.
    pub fn sort<P: Borrow<Product>>(&self, products: &mut [P]) {
        products.sort_by_cached_key(|p| {
            let p = p.borrow();
            let normalized = normalize(&p.name);
            let priority = if self.contains_normalized(&normalized) {
                PRIORITY_REFERENCED
            } else {
                PRIORITY_OTHER
            };
            (priority, normalized, p.name.clone())
        });
    }
}

/// Alphabetical name comparison ignoring case and accents.
///
/// Names that normalize equally are ordered by their raw text so the order is
/// total.
#[must_use]
pub fn compare_names(a: &str, b: &str) -> Ordering {
    normalize(a).cmp(&normalize(b)).then_with(|| a.cmp(b))
}
