//! Fetch command - load the live catalog from the storefront

use super::render_view;
use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use std::path::Path;
use std::sync::Arc;
use storefront_api_client::{CatalogLoader, CatalogState, ClientConfig, SourceOutcome, StorefrontClient};
use storefront_cli::{OutputFormat, Status, output::print_json, progress};
use storefront_core::config::Config;
use storefront_search::{CatalogQuery, CatalogView};
use storefront_telemetry::{Timer, metrics};

/// Fetch products, best sellers and promotions in one round
pub async fn run(
    config: &Config,
    base_url: Option<String>,
    output: Option<&Path>,
    query: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let mut client_config = ClientConfig::from_settings(&config.schema.api).map_err(storefront_core::Error::from)?;
    if let Some(url) = base_url {
        client_config = client_config.with_base_url(url);
    }
    let client = StorefrontClient::with_config(client_config).map_err(storefront_core::Error::from)?;
    let state = Arc::new(CatalogState::new());

    let spinner = progress::spinner(&format!("Fetching catalog from {}", client.base_url()));
    let timer = Timer::start("fetch.round_ms");
    let report = CatalogLoader::new(client, Arc::clone(&state)).load().await;
    let elapsed = timer.stop();
    metrics().increment("fetch.rounds");

    if report.is_complete() {
        progress::finish_success(&spinner, "Catalog fetched");
    } else {
        progress::finish_warning(&spinner, "Catalog fetched with missing data");
    }

    let products = state.priced_products();

    if let Some(path) = output {
        let json = serde_json::to_string_pretty(&products)?;
        std::fs::write(path, json)
            .map_err(storefront_core::Error::from)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    if let Some(query) = query {
        let engine = state.searcher(super::fuzzy_mode(&config.schema.search, None, None));
        let view = CatalogView::build(&engine, &products, &CatalogQuery::default().with_search(query));
        return render_view(&format!("Results for \"{query}\""), query, "all".to_string(), &view, format);
    }

    if format.is_json() {
        print_json(&report)?;
        return Ok(());
    }

    Status::header("Catalog fetch");
    for (name, outcome) in [
        ("Products", &report.products),
        ("Best sellers", &report.best_sellers),
        ("Promotions", &report.promotions),
    ] {
        let line = match outcome {
            SourceOutcome::Loaded { count } => format!("{} ({count})", "✓ Loaded".green()),
            SourceOutcome::Degraded { error } => format!("{} {}", "⚠ Empty".yellow(), error.dimmed()),
            SourceOutcome::Stale => "⚠ Stale".yellow().to_string(),
        };
        println!("  {name:<14}{line}");
    }
    println!();
    Status::info(&format!(
        "Generation {} in {}",
        report.generation,
        storefront_cli::format_duration(elapsed)
    ));
    if let Some(path) = output {
        Status::success(&format!("Wrote {} products to {}", products.len(), path.display()));
    }
    Ok(())
}
