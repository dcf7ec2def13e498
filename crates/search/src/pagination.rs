//! Fixed-size catalog pages.
//!
//! Pages are 1-indexed. Page size is one of [`PAGE_SIZE_OPTIONS`].

use crate::error::{Result, SearchError};
use serde::{Deserialize, Serialize};

/// Page sizes offered by the catalog.
pub const PAGE_SIZE_OPTIONS: [usize; 4] = [12, 24, 48, 96];

/// Default page size.
pub const DEFAULT_PAGE_SIZE: usize = 24;

/// A validated page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct PageSize(usize);

impl PageSize {
    /// Validate against [`PAGE_SIZE_OPTIONS`].
    ///
    /// # Errors
    /// Returns [`SearchError::UnsupportedPageSize`] for any other value.
    pub fn new(size: usize) -> Result<Self> {
        if PAGE_SIZE_OPTIONS.contains(&size) {
            Ok(Self(size))
        } else {
            Err(SearchError::UnsupportedPageSize(size))
        }
    }

    /// Raw size
    #[must_use]
    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self(DEFAULT_PAGE_SIZE)
    }
}

impl TryFrom<usize> for PageSize {
    type Error = SearchError;

    fn try_from(size: usize) -> Result<Self> {
        Self::new(size)
    }
}

impl From<PageSize> for usize {
    fn from(size: PageSize) -> Self {
        size.0
    }
}

/// Number of pages needed for `len` items (`ceil(len / size)`).
#[must_use]
pub fn total_pages(len: usize, size: usize) -> usize {
    if size == 0 { 0 } else { len.div_ceil(size) }
}

/// Clamp a requested page into `[1, total_pages]`.
///
/// An empty list still has a page 1 to land on.
#[must_use]
pub fn clamp_page(requested: usize, total_pages: usize) -> usize {
    requested.clamp(1, total_pages.max(1))
}

/// Items `[(page - 1) * size, page * size)` of `items`.
///
/// Out-of-range pages yield an empty slice; page 0 is treated as page 1.
#[must_use]
pub fn paginate<T>(items: &[T], page: usize, size: usize) -> &[T] {
    if size == 0 {
        return &[];
    }
    let start = page.max(1).saturating_sub(1).saturating_mul(size);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(size).min(items.len());
    &items[start..end]
}

/// One page of results with navigation metadata.
#[derive(Debug, Clone, Serialize)]
pub struct Page<'a, T> {
    /// Items on this page
    pub items: &'a [T],
    /// Current page (1-indexed, clamped)
    pub page: usize,
    /// Page size
    pub page_size: usize,
    /// Total number of items across all pages
    pub total_items: usize,
    /// Total number of pages
    pub total_pages: usize,
}

impl<'a, T> Page<'a, T> {
    /// Build the page a navigation request lands on.
    ///
    /// The requested page is clamped, so asking for page 99 of a 3-page list
    /// shows page 3.
    pub fn navigate(items: &'a [T], requested: usize, size: PageSize) -> Self {
        let size = size.get();
        let total = total_pages(items.len(), size);
        let page = clamp_page(requested, total);
        Self {
            items: paginate(items, page, size),
            page,
            page_size: size,
            total_items: items.len(),
            total_pages: total,
        }
    }

    /// Whether a following page exists
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Whether a preceding page exists
    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// Zero-based index of the first item on this page
    #[must_use]
    pub fn offset(&self) -> usize {
        (self.page - 1) * self.page_size
    }
}
