//! Error types for the search crate.

use thiserror::Error;

/// Result type alias for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors raised while loading search inputs.
///
/// The search and ranking functions themselves never fail; these only come
/// from parsing product payloads or best-seller reports.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Product or promotion payload could not be decoded
    #[error("Invalid catalog payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),

    /// Best-seller report is missing its name column
    #[error("Best-seller report has no description column (header: {header:?})")]
    MissingNameColumn {
        /// Header line as read
        header: String,
    },

    /// Page size outside the supported options
    #[error("Unsupported page size {0}")]
    UnsupportedPageSize(usize),
}
