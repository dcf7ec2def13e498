//! Configuration file loading

use super::schema::StorefrontConfig;
use crate::error::{Error, Result, ResultExt};
use std::path::{Path, PathBuf};

/// Locations searched, in order, when no path is given
pub const CONFIG_CANDIDATES: [&str; 3] = [
    ".storefront.toml",
    "storefront.toml",
    ".config/storefront.toml",
];

/// Loaded configuration and where it came from
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Parsed settings
    pub schema: StorefrontConfig,
    /// File the settings were read from, if any
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a file path or the standard locations.
    ///
    /// Falls back to defaults when no file is found. An explicit path that
    /// does not exist is an error.
    ///
    /// # Errors
    /// Fails when the file cannot be read, parsed or validated.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_from(path, Path::new("."))
    }

    /// [`Config::load`] resolving the standard locations under `root`.
    ///
    /// # Errors
    /// Same as [`Config::load`].
    pub fn load_from(path: Option<&Path>, root: &Path) -> Result<Self> {
        let config_path = match path {
            Some(p) if !p.exists() => return Err(Error::config_not_found(p)),
            Some(p) => Some(p.to_path_buf()),
            None => find_config_file(root),
        };

        let schema = match &config_path {
            Some(p) => load_config_file(p)?,
            None => StorefrontConfig::default(),
        };
        schema
            .validate()
            .context(format!("Invalid configuration in {}", describe_path(config_path.as_deref())))?;

        tracing::debug!(path = %describe_path(config_path.as_deref()), "configuration loaded");

        Ok(Self {
            schema,
            path: config_path,
        })
    }
}

fn describe_path(path: Option<&Path>) -> String {
    path.map_or_else(|| "<defaults>".to_string(), |p| p.display().to_string())
}

/// Find configuration file in standard locations
fn find_config_file(root: &Path) -> Option<PathBuf> {
    CONFIG_CANDIDATES
        .iter()
        .map(|candidate| root.join(candidate))
        .find(|candidate| candidate.is_file())
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &Path) -> Result<StorefrontConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(Error::from)
        .context(format!("Failed to read config file {}", path.display()))?;

    toml::from_str(&content)
        .map_err(Error::from)
        .context(format!("Failed to parse config file {}", path.display()))
}
