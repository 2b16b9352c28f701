//! Storage abstractions for user templates.
//!
//! Page bodies are rendered from templates the user saved per product type.
//! The store is read once per rendered body, so the backend is behind an
//! async trait.

pub mod local;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::ScrapboxFormats;

// Re-export for convenience
pub use local::FileFormatStore;

/// Trait for template storage backends.
#[async_trait]
pub trait FormatStore: Send + Sync {
    /// Load the saved templates. `Ok(None)` means nothing was ever saved.
    async fn scrapbox_formats(&self) -> Result<Option<ScrapboxFormats>>;
}

/// Templates that are already in memory, e.g. from a loaded config.
#[derive(Debug, Clone, Default)]
pub struct MemoryFormatStore {
    formats: Option<ScrapboxFormats>,
}

impl MemoryFormatStore {
    pub fn new(formats: Option<ScrapboxFormats>) -> Self {
        Self { formats }
    }
}

#[async_trait]
impl FormatStore for MemoryFormatStore {
    async fn scrapbox_formats(&self) -> Result<Option<ScrapboxFormats>> {
        Ok(self.formats.clone())
    }
}
