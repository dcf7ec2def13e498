//! Page command - browse the catalog one page at a time

use super::{Catalog, page_size, render_view};
use crate::CatalogArgs;
use anyhow::Result;
use storefront_cli::OutputFormat;
use storefront_core::config::Config;
use storefront_search::{CatalogFilter, CatalogQuery, CatalogView, SmartSearch};
use storefront_telemetry::metrics;

/// Show page `page` of the (filtered) catalog, best sellers first
pub fn run(
    config: &Config,
    args: &CatalogArgs,
    page: usize,
    requested_size: Option<usize>,
    filter: &CatalogFilter,
    format: OutputFormat,
) -> Result<()> {
    let size = page_size(config, requested_size)?;
    let catalog = Catalog::load(args, config)?;
    let engine = SmartSearch::new(catalog.reference);

    let query = CatalogQuery::page(page, size).with_filter(filter.clone());
    let view = CatalogView::build(&engine, &catalog.products, &query);
    metrics().increment("page.views");

    render_view(&format!("Catalog ({filter})"), "", filter.to_string(), &view, format)
}
