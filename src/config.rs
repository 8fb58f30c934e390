//! Run configuration.
//!
//! Handles loading, validating, and merging the `pixcrawl.toml` file. Stock
//! defaults are the base layer; a user file only needs the keys it wants to
//! override.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [search]
//! endpoint = "https://api.pexels.com/v1/search"
//! per_page = 15             # Results requested per page (1-80)
//! quota = 35                # Processed images to collect per run (1-1000)
//! page_delay_ms = 1000      # Pause between page requests
//! timeout_secs = 30         # HTTP timeout for search and image downloads
//!
//! [translate]
//! endpoint = "https://translate.googleapis.com/translate_a/single"
//! source_lang = "ko"
//! target_lang = "en"
//!
//! [compression]
//! max_size_kb = 200         # Soft JPEG size budget per image
//! ```
//!
//! The Pexels API key is never read from this file. It comes from the
//! `PEXELS_API_KEY` environment variable, see [`api_key_from_env`].
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Environment variable holding the search API credential.
pub const API_KEY_ENV: &str = "PEXELS_API_KEY";

/// Largest accepted `search.quota`.
pub const MAX_QUOTA: usize = 1000;

/// Default config file name looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "pixcrawl.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
    #[error("PEXELS_API_KEY is not set")]
    MissingApiKey,
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Search API endpoint and pagination settings.
    pub search: SearchConfig,
    /// Translation endpoint and language pair.
    pub translate: TranslateConfig,
    /// Recompression budget.
    pub compression: CompressionConfig,
}

impl Config {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=80).contains(&self.search.per_page) {
            return Err(ConfigError::Validation(
                "search.per_page must be 1-80".into(),
            ));
        }
        if !(1..=MAX_QUOTA).contains(&self.search.quota) {
            return Err(ConfigError::Validation(format!(
                "search.quota must be 1-{MAX_QUOTA}"
            )));
        }
        if self.search.endpoint.trim().is_empty() {
            return Err(ConfigError::Validation(
                "search.endpoint must not be empty".into(),
            ));
        }
        if self.translate.endpoint.trim().is_empty() {
            return Err(ConfigError::Validation(
                "translate.endpoint must not be empty".into(),
            ));
        }
        if self.translate.source_lang.trim().is_empty()
            || self.translate.target_lang.trim().is_empty()
        {
            return Err(ConfigError::Validation(
                "translate language codes must not be empty".into(),
            ));
        }
        if self.compression.max_size_kb == 0 {
            return Err(ConfigError::Validation(
                "compression.max_size_kb must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Search API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    pub endpoint: String,
    pub per_page: u32,
    pub quota: usize,
    pub page_delay_ms: u64,
    pub timeout_secs: u64,
}

impl SearchConfig {
    pub fn page_delay(&self) -> Duration {
        Duration::from_millis(self.page_delay_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.pexels.com/v1/search".to_string(),
            per_page: 15,
            quota: 35,
            page_delay_ms: 1000,
            timeout_secs: 30,
        }
    }
}

/// Translation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TranslateConfig {
    pub endpoint: String,
    pub source_lang: String,
    pub target_lang: String,
}

impl Default for TranslateConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://translate.googleapis.com/translate_a/single".to_string(),
            source_lang: "ko".to_string(),
            target_lang: "en".to_string(),
        }
    }
}

/// Recompression settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompressionConfig {
    /// Soft size budget per image, in KiB.
    pub max_size_kb: u32,
}

impl CompressionConfig {
    pub fn budget_bytes(&self) -> usize {
        self.max_size_kb as usize * 1024
    }
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self { max_size_kb: 200 }
    }
}

/// Read the API key from [`API_KEY_ENV`]. Blank values count as missing.
pub fn api_key_from_env() -> Result<String, ConfigError> {
    std::env::var(API_KEY_ENV)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::MissingApiKey)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(Config::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// Tables merge key-by-key; any other overlay value replaces the base value.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto the stock defaults, then deserialize and validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<Config, ConfigError> {
    let base = stock_defaults_value();
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: Config = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `path`, falling back to stock defaults when it is absent.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    resolve_config(load_raw_config(path)?)
}

/// Returns a fully-commented stock config with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# pixcrawl configuration
# ======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.
#
# The Pexels API key is read from the PEXELS_API_KEY environment variable,
# never from this file.

# ---------------------------------------------------------------------------
# Photo search
# ---------------------------------------------------------------------------
[search]
# Search endpoint. Must accept query, page and per_page parameters.
endpoint = "https://api.pexels.com/v1/search"

# Results requested per page (1-80).
per_page = 15

# Number of processed images to collect per run (1-1000).
quota = 35

# Pause between page requests, in milliseconds.
page_delay_ms = 1000

# HTTP timeout for search requests and image downloads, in seconds.
timeout_secs = 30

# ---------------------------------------------------------------------------
# Keyword translation
# ---------------------------------------------------------------------------
[translate]
endpoint = "https://translate.googleapis.com/translate_a/single"

# Language the keyword is typed in, and the language the search API expects.
source_lang = "ko"
target_lang = "en"

# ---------------------------------------------------------------------------
# Recompression
# ---------------------------------------------------------------------------
[compression]
# Soft size budget per image in KiB. JPEG quality steps down from 85 by 5
# until the image fits or quality reaches 20.
max_size_kb = 200
"##
}
