//! catalog-search - storefront catalog search from the terminal
//!
//! Runs the storefront's smart search, header suggestions and catalog
//! pagination over exported product files, or fetches the live catalog.

use clap::{Args, Parser, Subcommand, ValueEnum};
use owo_colors::OwoColorize;
use std::path::PathBuf;
use std::process::ExitCode;
use storefront_cli::OutputFormat;
use storefront_core::config::Config;
use storefront_telemetry::{LogFormat, TelemetryConfig, metrics};

mod commands;

/// Storefront catalog search, suggestions and pagination
#[derive(Parser)]
#[command(name = "catalog-search")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Configuration file (defaults to .storefront.toml lookup)
    #[arg(short, long, global = true, env = "STOREFRONT_CONFIG")]
    config: Option<PathBuf>,

    /// Print collected metrics as JSON on stderr when done
    #[arg(long, global = true)]
    metrics: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Where catalog data is read from
#[derive(Args, Debug, Clone)]
pub struct CatalogArgs {
    /// Product list (JSON array or `{ success, data }` envelope)
    #[arg(short, long)]
    pub products: PathBuf,

    /// Best-seller ranking (`;`-separated sales report or JSON `[{"nome": ...}]`)
    #[arg(short, long)]
    pub best_sellers: Option<PathBuf>,

    /// Promotions to apply before searching (JSON)
    #[arg(long)]
    pub promotions: Option<PathBuf>,
}

/// Fuzzy matching strategy override
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FuzzyArg {
    /// Stem and shared-prefix heuristic
    Heuristic,
    /// Bounded edit distance
    EditDistance,
}

#[derive(Subcommand)]
enum Commands {
    /// Search products by name, or by code with `#<code>`
    Search {
        /// Search text
        query: String,

        #[command(flatten)]
        catalog: CatalogArgs,

        /// Catalog tab: all, on-sale, top-rated, new or a category name
        #[arg(long, default_value = "all")]
        filter: String,

        /// Fuzzy strategy (overrides the config file)
        #[arg(long, value_enum)]
        fuzzy: Option<FuzzyArg>,

        /// Largest edit distance for the edit-distance strategy
        #[arg(long)]
        max_distance: Option<usize>,

        /// Page shown for `#code` lookups
        #[arg(long, default_value = "1")]
        page: usize,

        /// Items per page for `#code` lookups
        #[arg(long)]
        page_size: Option<usize>,
    },

    /// Show header suggestions for partial input
    Suggest {
        /// Partial search text
        query: String,

        #[command(flatten)]
        catalog: CatalogArgs,

        /// Maximum suggestions
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Browse one page of the catalog
    Page {
        #[command(flatten)]
        catalog: CatalogArgs,

        /// Page number (1-indexed)
        #[arg(default_value = "1")]
        page: usize,

        /// Items per page (12, 24, 48 or 96)
        #[arg(short = 's', long)]
        page_size: Option<usize>,

        /// Catalog tab: all, on-sale, top-rated, new or a category name
        #[arg(long, default_value = "all")]
        filter: String,
    },

    /// Fetch products, best sellers and promotions from the storefront
    Fetch {
        /// Storefront base URL (overrides config and STOREFRONT_API_URL)
        #[arg(long)]
        base_url: Option<String>,

        /// Write the priced product list to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Search the fetched catalog
        #[arg(short, long)]
        query: Option<String>,
    },

    /// Show the resolved configuration
    Config,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let telemetry = if cli.verbose {
        TelemetryConfig::verbose()
    } else {
        TelemetryConfig::default()
    };
    let log_format = if cli.format.is_json() { LogFormat::Json } else { LogFormat::Compact };
    if let Err(e) = storefront_telemetry::init_with_config(telemetry.with_format(log_format)) {
        eprintln!("{} {}", "Warning:".yellow().bold(), e);
    }

    let result = run(cli.command, cli.config, cli.format).await;

    if cli.metrics {
        eprintln!("{}", metrics().export_json());
    }

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            storefront_cli::print_error(&e, cli.format);
            storefront_cli::exit_code_for(&e)
        }
    }
}

async fn run(command: Commands, config_path: Option<PathBuf>, format: OutputFormat) -> anyhow::Result<()> {
    let config = Config::load(config_path.as_deref())?;

    match command {
        Commands::Search {
            query,
            catalog,
            filter,
            fuzzy,
            max_distance,
            page,
            page_size,
        } => {
            let options = commands::search::SearchOptions {
                filter: filter.parse()?,
                fuzzy: commands::fuzzy_mode(&config.schema.search, fuzzy, max_distance),
                page,
                page_size,
            };
            commands::search::run(&config, &catalog, &query, &options, format)
        }

        Commands::Suggest { query, catalog, limit } => {
            commands::suggest::run(&config, &catalog, &query, limit, format)
        }

        Commands::Page {
            catalog,
            page,
            page_size,
            filter,
        } => commands::page::run(&config, &catalog, page, page_size, &filter.parse()?, format),

        Commands::Fetch { base_url, output, query } => {
            commands::fetch::run(&config, base_url, output.as_deref(), query.as_deref(), format).await
        }

        Commands::Config => commands::config::run(&config, format),
    }
}
