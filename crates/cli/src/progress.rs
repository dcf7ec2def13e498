//! Progress indicators
//!
//! Spinners for network work. They draw on stderr and stay hidden when
//! stderr is not a terminal, so piped output is never polluted.

use console::Term;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Create a spinner for indeterminate progress
pub fn spinner(message: &str) -> ProgressBar {
    if !Term::stderr().is_term() {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// Finish a spinner with a success message
pub fn finish_success(pb: &ProgressBar, message: &str) {
    pb.finish_with_message(format!("✓ {message}"));
}

/// Finish a spinner with a warning message
pub fn finish_warning(pb: &ProgressBar, message: &str) {
    pb.finish_with_message(format!("⚠ {message}"));
}
