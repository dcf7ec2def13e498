//! Terminal helpers shared by storefront command-line tools
//!
//! - Output format selection and JSON printing
//! - Status lines, product rows and price formatting
//! - Spinners for network work
//! - Exit codes derived from core error categories

#![warn(missing_docs)]

pub mod output;
pub mod progress;

pub use output::{
    OutputFormat, Status, error_report, exit_code_for, exit_status, format_count, format_duration, format_price,
    print_error,
};
