//! CLI command implementations

pub mod config;
pub mod fetch;
pub mod page;
pub mod search;
pub mod suggest;

use crate::{CatalogArgs, FuzzyArg};
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;
use storefront_api_client::Payload;
use storefront_cli::{OutputFormat, Status, format_count, output::print_json};
use storefront_core::config::{Config, FuzzyStrategy, SearchSettings};
use storefront_search::{
    BestSellerEntry, CatalogView, FuzzyMode, PageSize, Product, Promotion, ReferenceList, SearchError,
    apply_promotions, best_sellers, parse_best_sellers_json,
};
use storefront_telemetry::Timer;
use tracing::debug;

/// Products and ranking read from disk
pub struct Catalog {
    pub products: Vec<Product>,
    pub reference: ReferenceList,
}

impl Catalog {
    /// Read the files named on the command line.
    ///
    /// Without `--best-sellers`, the report named by `search.best_sellers_report`
    /// is used when configured.
    pub fn load(args: &CatalogArgs, config: &Config) -> Result<Self> {
        let _timer = Timer::start("catalog.load_ms");

        let raw = read(&args.products)?;
        let mut products = decode_products(&raw)
            .with_context(|| format!("Failed to parse products from {}", args.products.display()))?;

        if let Some(path) = &args.promotions {
            let promotions: Vec<Promotion> = serde_json::from_str(&read(path)?)
                .map_err(SearchError::from)
                .with_context(|| format!("Failed to parse promotions from {}", path.display()))?;
            products = apply_promotions(&products, &promotions);
        }

        let report = args
            .best_sellers
            .as_deref()
            .or_else(|| config.schema.search.best_sellers_report.as_deref().map(Path::new));
        let entries = match report {
            Some(path) => read_best_sellers(path)?,
            None => Vec::new(),
        };
        let reference = ReferenceList::from_entries(&entries);

        debug!(
            products = products.len(),
            best_sellers = reference.len(),
            "catalog loaded"
        );
        Ok(Self { products, reference })
    }
}

/// Accept both a bare array and the `{ success, data, error }` envelope
fn decode_products(raw: &str) -> Result<Vec<Product>, storefront_core::Error> {
    let payload: Payload<Vec<Product>> = serde_json::from_str(raw)?;
    Ok(payload.into_result()?)
}

fn read_best_sellers(path: &Path) -> Result<Vec<BestSellerEntry>> {
    let raw = read(path)?;
    let entries = if raw.trim_start().starts_with('[') {
        parse_best_sellers_json(&raw)
    } else {
        best_sellers::try_parse_report(&raw)
    };
    entries.with_context(|| format!("Failed to read best sellers from {}", path.display()))
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| {
        let err = if e.kind() == std::io::ErrorKind::NotFound {
            storefront_core::Error::file_not_found(path)
        } else {
            storefront_core::Error::from(e).with_context(path.display().to_string())
        };
        err.into()
    })
}

/// Resolve the fuzzy strategy: flags first, then `[search]` settings.
pub fn fuzzy_mode(settings: &SearchSettings, flag: Option<FuzzyArg>, max_distance: Option<usize>) -> FuzzyMode {
    let strategy = match flag {
        Some(FuzzyArg::Heuristic) => FuzzyStrategy::Heuristic,
        Some(FuzzyArg::EditDistance) => FuzzyStrategy::EditDistance,
        None => settings.fuzzy,
    };

    match strategy {
        FuzzyStrategy::Heuristic => FuzzyMode::Heuristic,
        FuzzyStrategy::EditDistance => FuzzyMode::EditDistance {
            max_distance: max_distance.unwrap_or(settings.max_edit_distance),
        },
    }
}

/// Page size from the flag or `[pagination].default_page_size`
pub fn page_size(config: &Config, requested: Option<usize>) -> Result<PageSize> {
    let pagination = &config.schema.pagination;
    let size = requested.unwrap_or(pagination.default_page_size);

    if !pagination.page_size_options.contains(&size) {
        return Err(storefront_core::Error::new(
            storefront_core::ErrorCode::InvalidPageSize,
            format!("page size {size} is not one of {:?}", pagination.page_size_options),
        )
        .into());
    }
    Ok(PageSize::new(size)?)
}

#[derive(Serialize)]
struct ViewOutput<'a> {
    query: &'a str,
    filter: String,
    #[serde(flatten)]
    view: &'a CatalogView<'a>,
}

/// Print a catalog view in the requested format
pub fn render_view(title: &str, query: &str, filter: String, view: &CatalogView<'_>, format: OutputFormat) -> Result<()> {
    if format.is_json() {
        print_json(&ViewOutput { query, filter, view })?;
        return Ok(());
    }

    Status::header(title);
    if view.items.is_empty() {
        Status::warning("No products found");
        return Ok(());
    }

    let offset = view.pagination.map_or(0, |info| (info.page - 1) * info.page_size);
    for (i, product) in view.items.iter().enumerate() {
        Status::product(offset + i + 1, product);
    }

    println!();
    match view.pagination {
        Some(info) => Status::info(&format!(
            "Page {}/{} ({})",
            info.page,
            info.total_pages.max(1),
            format_count(info.total_items, "product", "products")
        )),
        None => Status::info(&format_count(view.total_matches, "match", "matches")),
    }
    Ok(())
}
