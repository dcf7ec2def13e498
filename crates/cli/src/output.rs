//! Terminal output utilities
//!
//! Provides consistent formatting for CLI output.

use owo_colors::OwoColorize;
use serde::Serialize;
use std::process::ExitCode;
use storefront_core::{ErrorCode, ErrorReport};
use storefront_search::{Product, SearchError};

/// How command results are written to stdout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Colored, human-readable lines
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

impl OutputFormat {
    /// Whether results are JSON
    #[must_use]
    pub fn is_json(self) -> bool {
        self == Self::Json
    }
}

/// Print a value as pretty JSON on stdout
///
/// # Errors
/// Fails when the value cannot be serialized.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Status message helpers
pub struct Status;

impl Status {
    /// Print a success message
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Print an error message
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Print a warning message
    pub fn warning(message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print an info message
    pub fn info(message: &str) {
        println!("{} {}", "ℹ".blue(), message);
    }

    /// Print a header
    pub fn header(message: &str) {
        println!();
        println!("{}", message.bold());
        println!("{}", "─".repeat(message.chars().count()));
    }

    /// Print one product as a result row
    pub fn product(position: usize, product: &Product) {
        let price = if product.is_on_sale() {
            format!(
                "{} {}",
                format_price(product.price).green().bold(),
                format_price(product.original_price.unwrap_or(product.price))
                    .dimmed()
                    .strikethrough()
            )
        } else {
            format_price(product.price)
        };

        println!(
            "{:>3}. {} {}  {}  {}",
            position,
            format!("#{}", product.id).dimmed(),
            product.name.bold(),
            product.category.cyan(),
            price
        );
    }
}

/// Format a price the way the storefront shows it (`R$ 1.234,50`)
#[must_use]
pub fn format_price(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}R$ {grouped},{:02}", cents % 100)
}

/// Format a duration for display
#[must_use]
pub fn format_duration(duration: std::time::Duration) -> String {
    let secs = duration.as_secs_f32();
    if secs < 1.0 {
        format!("{:.0}ms", secs * 1000.0)
    } else if secs < 60.0 {
        format!("{secs:.1}s")
    } else {
        let mins = (secs / 60.0).floor();
        let remaining_secs = secs % 60.0;
        format!("{mins}m {remaining_secs:.0}s")
    }
}

/// Format a count with singular/plural
#[must_use]
pub fn format_count(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}

/// Exit code for an error bubbling out of a command.
///
/// Core errors carry their own category; search input errors are data or
/// validation failures; anything else is a generic failure.
#[must_use]
pub fn exit_code_for(err: &anyhow::Error) -> ExitCode {
    ExitCode::from(u8::try_from(exit_status(err)).unwrap_or(1))
}

/// Numeric status behind [`exit_code_for`]
#[must_use]
pub fn exit_status(err: &anyhow::Error) -> i32 {
    error_report(err).code.exit_code()
}

/// Serializable report for an error bubbling out of a command.
///
/// Context added on the way up is kept in the report's `context`.
#[must_use]
pub fn error_report(err: &anyhow::Error) -> ErrorReport {
    if let Some(core) = err.downcast_ref::<storefront_core::Error>() {
        let mut report = core.to_report();
        if report.context.is_none() && err.chain().count() > 1 {
            report.context = Some(err.to_string());
        }
        return report;
    }

    let message = format!("{err:#}");
    let core = match err.downcast_ref::<SearchError>() {
        Some(SearchError::UnsupportedPageSize(_)) => storefront_core::Error::validation(message),
        Some(_) => storefront_core::Error::data(message),
        None => storefront_core::Error::new(ErrorCode::Unknown, message),
    };
    core.to_report()
}

/// Print an error on stderr: a red line, or an [`ErrorReport`] as JSON
pub fn print_error(err: &anyhow::Error, format: OutputFormat) {
    if format.is_json() {
        match serde_json::to_string_pretty(&error_report(err)) {
            Ok(json) => eprintln!("{json}"),
            Err(_) => eprintln!("{err:#}"),
        }
    } else {
        eprintln!("{} {:#}", "Error:".red().bold(), err);
    }
}
