//! Reader for the ABC sales report that feeds the best-seller list.
//!
//! The report is a `;`-separated export whose header row has a description
//! column (`Descrição`, `DESCRICAO`, ...). Only that column is used.

use crate::error::{Result, SearchError};
use crate::model::BestSellerEntry;

/// Field separator used by the report export.
pub const FIELD_SEPARATOR: char = ';';

/// Parse a sales report, failing when no description column exists.
///
/// Blank lines are dropped, the first remaining line is the header and rows
/// with an empty description are skipped.
///
/// # Errors
/// Returns [`SearchError::MissingNameColumn`] when no header field contains
/// `descri` (case-insensitive).
pub fn try_parse_report(content: &str) -> Result<Vec<BestSellerEntry>> {
    let mut lines = content.lines().filter(|line| !line.trim().is_empty());

    let Some(header) = lines.next() else {
        return Ok(Vec::new());
    };

    let column = header
        .split(FIELD_SEPARATOR)
        .position(|field| field.to_lowercase().contains("descri"))
        .ok_or_else(|| SearchError::MissingNameColumn {
            header: header.to_string(),
        })?;

    Ok(lines
        .filter_map(|line| line.split(FIELD_SEPARATOR).nth(column))
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(BestSellerEntry::new)
        .collect())
}

/// Parse a sales report, degrading to an empty list on a malformed header.
pub fn parse_report(content: &str) -> Vec<BestSellerEntry> {
    try_parse_report(content).unwrap_or_else(|err| {
        tracing::warn!(error = %err, "ignoring unreadable best-seller report");
        Vec::new()
    })
}
