//! Configuration schema definitions

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Root configuration schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct StorefrontConfig {
    /// Search behaviour
    #[serde(default)]
    pub search: SearchSettings,

    /// Catalog paging
    #[serde(default)]
    pub pagination: PaginationSettings,

    /// Backend API
    #[serde(default)]
    pub api: ApiSettings,
}

impl StorefrontConfig {
    /// Check every section.
    ///
    /// # Errors
    /// Returns an [`crate::ErrorCode::InvalidConfigValue`] error naming the
    /// first offending key.
    pub fn validate(&self) -> Result<()> {
        self.search.validate()?;
        self.pagination.validate()?;
        self.api.validate()
    }
}

/// How approximate word matches are decided
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FuzzyStrategy {
    /// Stem/prefix similarity heuristic
    #[default]
    Heuristic,
    /// Bounded Levenshtein distance
    EditDistance,
}

/// `[search]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchSettings {
    /// Fuzzy matching strategy
    #[serde(default)]
    pub fuzzy: FuzzyStrategy,

    /// Largest edit distance accepted by the edit-distance strategy
    #[serde(default = "default_max_edit_distance")]
    pub max_edit_distance: usize,

    /// Number of header suggestions shown
    #[serde(default = "default_suggestion_limit")]
    pub suggestion_limit: usize,

    /// Best-seller report read when no `--best-sellers` flag is given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_sellers_report: Option<String>,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            fuzzy: FuzzyStrategy::default(),
            max_edit_distance: default_max_edit_distance(),
            suggestion_limit: default_suggestion_limit(),
            best_sellers_report: None,
        }
    }
}

impl SearchSettings {
    fn validate(&self) -> Result<()> {
        if self.fuzzy == FuzzyStrategy::EditDistance && self.max_edit_distance == 0 {
            return Err(Error::invalid_config(
                "search.max_edit_distance",
                "must be at least 1 with the edit_distance strategy",
            ));
        }
        if self.suggestion_limit == 0 {
            return Err(Error::invalid_config("search.suggestion_limit", "must be at least 1"));
        }
        Ok(())
    }
}

fn default_max_edit_distance() -> usize {
    1
}

fn default_suggestion_limit() -> usize {
    8
}

/// Page sizes the catalog grid can lay out
pub const SUPPORTED_PAGE_SIZES: [usize; 4] = [12, 24, 48, 96];

/// `[pagination]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginationSettings {
    /// Page sizes offered to the shopper
    #[serde(default = "default_page_size_options")]
    pub page_size_options: Vec<usize>,

    /// Page size used when none is requested
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,
}

impl Default for PaginationSettings {
    fn default() -> Self {
        Self {
            page_size_options: default_page_size_options(),
            default_page_size: default_page_size(),
        }
    }
}

impl PaginationSettings {
    fn validate(&self) -> Result<()> {
        if self.page_size_options.is_empty() {
            return Err(Error::invalid_config(
                "pagination.page_size_options",
                "must list at least one size",
            ));
        }
        if let Some(size) = self
            .page_size_options
            .iter()
            .find(|size| !SUPPORTED_PAGE_SIZES.contains(size))
        {
            return Err(Error::invalid_config(
                "pagination.page_size_options",
                format!("{size} is not one of {SUPPORTED_PAGE_SIZES:?}"),
            ));
        }
        if !self.page_size_options.contains(&self.default_page_size) {
            return Err(Error::invalid_config(
                "pagination.default_page_size",
                format!(
                    "{} is not one of {:?}",
                    self.default_page_size, self.page_size_options
                ),
            ));
        }
        Ok(())
    }
}

fn default_page_size_options() -> Vec<usize> {
    SUPPORTED_PAGE_SIZES.to_vec()
}

fn default_page_size() -> usize {
    24
}

/// `[api]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Storefront base URL; the environment wins when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Product list path
    #[serde(default = "default_products_path")]
    pub products_path: String,

    /// Best-seller list path
    #[serde(default = "default_best_sellers_path")]
    pub best_sellers_path: String,

    /// Active promotions path
    #[serde(default = "default_promotions_path")]
    pub promotions_path: String,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: default_timeout_secs(),
            products_path: default_products_path(),
            best_sellers_path: default_best_sellers_path(),
            promotions_path: default_promotions_path(),
        }
    }
}

impl ApiSettings {
    fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            return Err(Error::invalid_config("api.timeout_secs", "must be at least 1"));
        }
        if let Some(url) = &self.base_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(Error::invalid_config(
                    "api.base_url",
                    "must start with http:// or https://",
                ));
            }
        }
        Ok(())
    }
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_products_path() -> String {
    "api/products".to_string()
}

fn default_best_sellers_path() -> String {
    "api/mais-vendidos".to_string()
}

fn default_promotions_path() -> String {
    "api/admin/product-promotions".to_string()
}
