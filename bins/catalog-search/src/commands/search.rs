//! Search command - smart search over an exported catalog

use super::{Catalog, page_size, render_view};
use crate::CatalogArgs;
use anyhow::Result;
use storefront_cli::OutputFormat;
use storefront_core::config::Config;
use storefront_search::{CatalogFilter, CatalogQuery, CatalogView, FuzzyMode, PageSize, SearchQuery, SmartSearch};
use storefront_telemetry::{Event, Timer, metrics};

/// Flags shaping one search
pub struct SearchOptions {
    pub filter: CatalogFilter,
    pub fuzzy: FuzzyMode,
    pub page: usize,
    pub page_size: Option<usize>,
}

/// Run a search
pub fn run(config: &Config, args: &CatalogArgs, query: &str, options: &SearchOptions, format: OutputFormat) -> Result<()> {
    // Text results are never paged, so only code lookups need a page size
    let size = match SearchQuery::parse(query) {
        SearchQuery::Empty => {
            return Err(storefront_core::Error::validation("search query is empty")
                .with_suggestion("use `catalog-search page` to browse the catalog")
                .into());
        }
        SearchQuery::Code(_) => page_size(config, options.page_size)?,
        SearchQuery::Text(_) => PageSize::default(),
    };

    let catalog = Catalog::load(args, config)?;
    let engine = SmartSearch::new(catalog.reference).with_fuzzy(options.fuzzy);
    let catalog_query = CatalogQuery::page(options.page, size)
        .with_search(query)
        .with_filter(options.filter.clone());

    let timer = Timer::start("search.query_ms");
    let view = CatalogView::build(&engine, &catalog.products, &catalog_query);
    timer.stop();

    metrics().increment("search.queries");
    if view.items.is_empty() {
        metrics().increment("search.empty_results");
    }
    Event::new(
        "search",
        serde_json::json!({ "query": query, "matches": view.total_matches }),
    )
    .log();

    render_view(
        &format!("Results for \"{query}\""),
        query,
        options.filter.to_string(),
        &view,
        format,
    )
}
