//! Site configuration management.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Main configuration structure for Brewdex.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Site-wide settings.
    pub site: SiteConfig,

    /// Build settings.
    #[serde(default)]
    pub build: BuildConfig,

    /// RSS feed settings.
    #[serde(default)]
    pub feed: FeedConfig,
}

/// Site-wide configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Site title.
    pub title: String,

    /// Site origin used for absolute URLs (e.g. "https://example.com").
    pub base_url: String,

    /// Site description for meta tags and the feed channel.
    #[serde(default)]
    pub description: Option<String>,

    /// Site author name.
    #[serde(default)]
    pub author: Option<String>,

    /// Plain-text contributors file; first line is a header and skipped.
    #[serde(default)]
    pub contributors_file: Option<String>,
}

/// Build configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Output directory for the generated site.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Directory holding one YAML file per product.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Directory of static assets copied verbatim into the output root.
    #[serde(default = "default_static_dir")]
    pub static_dir: String,

    /// Directory of template overrides.
    #[serde(default = "default_templates_dir")]
    pub templates_dir: String,

    /// Whether to include draft records.
    #[serde(default)]
    pub drafts: bool,
}

/// RSS feed configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Whether the feed is generated.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Maximum number of items in the feed.
    #[serde(default = "default_feed_limit")]
    pub limit: usize,
}

// Default value functions
fn default_output_dir() -> String {
    "output".to_string()
}

fn default_data_dir() -> String {
    "data".to_string()
}

fn default_static_dir() -> String {
    "static".to_string()
}

fn default_templates_dir() -> String {
    "templates".to_string()
}

fn default_true() -> bool {
    true
}

fn default_feed_limit() -> usize {
    20
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            data_dir: default_data_dir(),
            static_dir: default_static_dir(),
            templates_dir: default_templates_dir(),
            drafts: false,
        }
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            limit: default_feed_limit(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            CoreError::config_with_source(
                format!("Failed to parse config file: {}", path.display()),
                e,
            )
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration using the config crate for more flexibility.
    ///
    /// Layers `BREWDEX__`-prefixed environment variables on top of the file.
    pub fn load_with_env(path: &Path) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(config::Environment::with_prefix("BREWDEX").separator("__"))
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<()> {
        if self.site.title.is_empty() {
            return Err(CoreError::config("site.title cannot be empty"));
        }

        if self.site.base_url.is_empty() {
            return Err(CoreError::config("site.base_url cannot be empty"));
        }

        if self.site.base_url.ends_with('/') {
            tracing::warn!("site.base_url should not have a trailing slash");
        }

        Ok(())
    }

    /// Get the full URL for an output-relative path.
    pub fn url_for(&self, path: &str) -> String {
        let base = self.site.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }
}
