// src/error.rs

//! Unified error handling for the unibar library.

use std::fmt;

use thiserror::Error;

/// Result type alias for unibar operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization failed
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// CSS selector parsing failed
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// A product record received across a process boundary was malformed
    #[error("Revival error: {0}")]
    Revival(String),

    /// No scraper could extract a product from the page
    #[error("Not a supported product page: {url}")]
    UnsupportedPage { url: String },

    /// Scrapbox search failed
    #[error("Search error for project '{project}': {message}")]
    Search { project: String, message: String },
}

impl AppError {
    /// Create a selector parsing error.
    pub fn selector(selector: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Selector {
            selector: selector.into(),
            message: message.to_string(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a revival error.
    pub fn revival(message: impl Into<String>) -> Self {
        Self::Revival(message.into())
    }

    /// Create an unsupported page error.
    pub fn unsupported_page(url: impl Into<String>) -> Self {
        Self::UnsupportedPage { url: url.into() }
    }

    /// Create a search error with context.
    pub fn search(project: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Search {
            project: project.into(),
            message: message.to_string(),
        }
    }
}
