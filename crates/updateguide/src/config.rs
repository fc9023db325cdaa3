//! Configuration management for updateguide.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "updateguide";

/// Default catalog file name.
const CATALOG_FILE_NAME: &str = "catalog.json";

/// Query parameter the page reads the preselected board from.
pub const DEFAULT_QUERY_PARAM: &str = "board";

/// Number of entries the search box shows at most.
pub const DEFAULT_MAX_SUGGESTIONS: usize = 8;

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `UPDATEGUIDE_`, `__` between sections)
/// 2. TOML config file at `~/.config/updateguide/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Catalog configuration.
    pub catalog: CatalogConfig,
    /// Page output configuration.
    pub page: PageConfig,
    /// Search box configuration.
    pub search: SearchConfig,
}

/// How repeated board names are treated at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Keep the first record with a given name, warn about the rest.
    #[default]
    First,
    /// Refuse to load a catalog with repeated names.
    Error,
}

/// Catalog-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Path to the catalog JSON file.
    /// Defaults to `~/.local/share/updateguide/catalog.json`
    pub path: Option<PathBuf>,
    /// Abort loading on the first malformed record instead of skipping it.
    pub strict: bool,
    /// Treatment of repeated board names.
    pub duplicates: DuplicatePolicy,
}

/// Page output configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Site base URL prepended to firmware links (may be empty).
    pub base_url: String,
    /// Directory under the base URL that holds firmware files.
    pub firmware_dir: String,
    /// Query parameter carrying a preselected board name.
    pub query_param: String,
}

/// Search box configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Maximum number of suggestions returned.
    pub max_suggestions: usize,
    /// Sort suggestions alphabetically instead of catalog order.
    pub sort: bool,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            firmware_dir: "firmware".to_string(),
            query_param: DEFAULT_QUERY_PARAM.to_string(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
            sort: true,
        }
    }
}

impl Config {
    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("UPDATEGUIDE_").split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.page.query_param.is_empty() {
            return Err(Error::ConfigValidation {
                message: "page.query_param must not be empty".to_string(),
            });
        }

        if self.page.query_param.contains(['=', '&', '#', '?']) {
            return Err(Error::ConfigValidation {
                message: format!(
                    "page.query_param contains a reserved character: {}",
                    self.page.query_param
                ),
            });
        }

        if self.page.firmware_dir.is_empty() {
            return Err(Error::ConfigValidation {
                message: "page.firmware_dir must not be empty".to_string(),
            });
        }

        if self.search.max_suggestions == 0 {
            return Err(Error::ConfigValidation {
                message: "search.max_suggestions must be greater than 0".to_string(),
            });
        }

        Ok(())
    }

    /// Get the catalog path, resolving defaults if not set.
    #[must_use]
    pub fn catalog_path(&self) -> PathBuf {
        self.catalog
            .path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(CATALOG_FILE_NAME))
    }

    /// Build the public URL of a firmware file.
    #[must_use]
    pub fn firmware_url(&self, file_name: &str) -> String {
        format!(
            "{}/{}/{}",
            self.page.base_url.trim_end_matches('/'),
            self.page.firmware_dir.trim_matches('/'),
            file_name
        )
    }
}
