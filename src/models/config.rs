//! Application configuration structures.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};
use crate::models::ProductType;
use crate::utils::url::normalize_project_name;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Target Scrapbox project
    #[serde(default)]
    pub scrapbox: ScrapboxConfig,

    /// HTTP client behavior
    #[serde(default)]
    pub http: HttpConfig,

    /// User templates keyed by product type. `None` when the table is absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scrapbox_formats: Option<ScrapboxFormats>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)?;
        config.scrapbox.project_name = normalize_project_name(&config.scrapbox.project_name);
        Ok(config)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.http.user_agent.trim().is_empty() {
            return Err(AppError::validation("http.user_agent is empty"));
        }
        if self.http.timeout_secs == 0 {
            return Err(AppError::validation("http.timeout_secs must be > 0"));
        }
        if self.http.max_concurrent == 0 {
            return Err(AppError::validation("http.max_concurrent must be > 0"));
        }
        if !(1..=100).contains(&self.scrapbox.search_limit) {
            return Err(AppError::validation(
                "scrapbox.search_limit must be between 1 and 100",
            ));
        }
        Url::parse(&self.scrapbox.base_url).map_err(|e| {
            AppError::validation(format!(
                "scrapbox.base_url '{}' is not a URL: {e}",
                self.scrapbox.base_url
            ))
        })?;
        if let Some(formats) = &self.scrapbox_formats {
            formats.validate()?;
        }
        Ok(())
    }
}

/// Scrapbox project settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapboxConfig {
    /// Project to search and create pages in
    #[serde(default)]
    pub project_name: String,

    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// Maximum number of pages returned by one search
    #[serde(default = "defaults::search_limit")]
    pub search_limit: u32,
}

impl Default for ScrapboxConfig {
    fn default() -> Self {
        Self {
            project_name: String::new(),
            base_url: defaults::base_url(),
            search_limit: defaults::search_limit(),
        }
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Maximum concurrent requests
    #[serde(default = "defaults::max_concurrent")]
    pub max_concurrent: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            max_concurrent: defaults::max_concurrent(),
        }
    }
}

/// User-defined body templates, keyed by product type name.
///
/// Keys are kept as strings so that a stray key is reported by
/// [`Config::validate`] instead of failing the whole load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScrapboxFormats(BTreeMap<String, String>);

impl ScrapboxFormats {
    pub fn get(&self, kind: ProductType) -> Option<&str> {
        self.0.get(kind.as_str()).map(String::as_str)
    }

    pub fn insert(&mut self, kind: ProductType, template: impl Into<String>) {
        self.0.insert(kind.as_str().to_string(), template.into());
    }

    /// Every key must name a product type.
    pub fn validate(&self) -> Result<()> {
        for key in self.0.keys() {
            key.parse::<ProductType>().map_err(|_| {
                AppError::validation(format!("scrapbox_formats.{key} is not a product type"))
            })?;
        }
        Ok(())
    }
}

mod defaults {
    pub fn base_url() -> String {
        "https://scrapbox.io".into()
    }
    pub fn search_limit() -> u32 {
        30
    }

    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; unibar/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn max_concurrent() -> usize {
        4
    }
}
