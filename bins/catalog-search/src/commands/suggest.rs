//! Suggest command - header suggestions for partial input

use super::Catalog;
use crate::CatalogArgs;
use anyhow::Result;
use serde::Serialize;
use storefront_cli::{OutputFormat, Status, output::print_json};
use storefront_core::config::Config;
use storefront_search::{MIN_QUERY_CHARS, Product, suggest};
use storefront_telemetry::metrics;

#[derive(Serialize)]
struct SuggestOutput<'a> {
    query: &'a str,
    suggestions: Vec<&'a Product>,
}

/// Show suggestions for `query`
pub fn run(config: &Config, args: &CatalogArgs, query: &str, limit: Option<usize>, format: OutputFormat) -> Result<()> {
    let catalog = Catalog::load(args, config)?;
    let limit = limit.unwrap_or(config.schema.search.suggestion_limit);
    let suggestions = suggest(query, &catalog.products, limit);
    metrics().increment("suggest.queries");

    if format.is_json() {
        print_json(&SuggestOutput { query, suggestions })?;
        return Ok(());
    }

    if query.trim().chars().count() < MIN_QUERY_CHARS {
        Status::warning(&format!("Type at least {MIN_QUERY_CHARS} characters for suggestions"));
        return Ok(());
    }
    if suggestions.is_empty() {
        Status::warning("No suggestions");
        return Ok(());
    }

    for (i, product) in suggestions.iter().enumerate() {
        Status::product(i + 1, product);
    }
    Ok(())
}
