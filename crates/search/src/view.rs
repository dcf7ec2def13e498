//! The catalog page pipeline: filter, search, order, paginate.

use crate::filter::CatalogFilter;
use crate::model::Product;
use crate::pagination::{Page, PageSize};
use crate::smart::{SearchQuery, SmartSearch};
use serde::{Deserialize, Serialize};

/// What the shopper asked to see.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogQuery {
    /// Active tab
    pub filter: CatalogFilter,
    /// Search box contents
    pub search: String,
    /// Requested page (1-indexed)
    pub page: usize,
    /// Items per page
    pub page_size: PageSize,
}

impl CatalogQuery {
    /// Query for a page of the unfiltered catalog
    pub fn page(page: usize, page_size: PageSize) -> Self {
        Self {
            page,
            page_size,
            ..Self::default()
        }
    }

    /// Set the search text
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// Set the tab filter
    #[must_use]
    pub fn with_filter(mut self, filter: CatalogFilter) -> Self {
        self.filter = filter;
        self
    }
}

/// Pagination metadata of a rendered view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    /// Current page after clamping
    pub page: usize,
    /// Items per page
    pub page_size: usize,
    /// Items across all pages
    pub total_items: usize,
    /// Number of pages
    pub total_pages: usize,
}

impl<T> From<&Page<'_, T>> for PageInfo {
    fn from(page: &Page<'_, T>) -> Self {
        Self {
            page: page.page,
            page_size: page.page_size,
            total_items: page.total_items,
            total_pages: page.total_pages,
        }
    }
}

/// Products to render for a [`CatalogQuery`].
#[derive(Debug, Clone, Serialize)]
pub struct CatalogView<'a> {
    /// Products in display order
    pub items: Vec<&'a Product>,
    /// Matches before pagination
    pub total_matches: usize,
    /// Page metadata; `None` while a text search shows every match
    pub pagination: Option<PageInfo>,
}

impl<'a> CatalogView<'a> {
    /// Build the view.
    ///
    /// The filter narrows the catalog first. A non-empty search then runs
    /// over the filtered products; free-text results are shown in full,
    /// without pagination. Browsing (and code lookup) is paginated, and
    /// browsing puts referenced products first when a reference list is
    /// loaded.
    pub fn build(engine: &SmartSearch, products: &'a [Product], query: &CatalogQuery) -> Self {
        let filtered = query.filter.apply(products);
        let parsed = SearchQuery::parse(&query.search);

        let selected = match &parsed {
            SearchQuery::Empty => {
                let mut browse = filtered;
                if !engine.reference().is_empty() {
                    engine.reference().sort(&mut browse);
                }
                browse
            }
            _ => engine.search_in(&query.search, &filtered),
        };

        let total_matches = selected.len();
        if parsed.is_text() {
            tracing::debug!(matches = total_matches, "search active, pagination bypassed");
            return Self {
                items: selected,
                total_matches,
                pagination: None,
            };
        }

        let page = Page::navigate(&selected, query.page, query.page_size);
        let pagination = Some(PageInfo::from(&page));
        let items = page.items.to_vec();
        Self {
            items,
            total_matches,
            pagination,
        }
    }
}
