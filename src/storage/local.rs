//! Local filesystem template store.
//!
//! Reads the `[scrapbox_formats]` table of a TOML file, normally the same
//! file the rest of the configuration lives in.

use std::path::PathBuf;

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::models::ScrapboxFormats;
use crate::storage::FormatStore;

/// File-backed template store.
#[derive(Debug, Clone)]
pub struct FileFormatStore {
    path: PathBuf,
}

#[derive(Deserialize)]
struct FormatsFile {
    #[serde(default)]
    scrapbox_formats: Option<ScrapboxFormats>,
}

impl FileFormatStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read the file, returning None if it doesn't exist.
    async fn read_text(&self) -> Result<Option<String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }
}

#[async_trait]
impl FormatStore for FileFormatStore {
    async fn scrapbox_formats(&self) -> Result<Option<ScrapboxFormats>> {
        let Some(text) = self.read_text().await? else {
            log::debug!("No template file at {:?}", self.path);
            return Ok(None);
        };
        let file: FormatsFile = toml::from_str(&text)?;
        Ok(file.scrapbox_formats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProductType;

    #[tokio::test]
    async fn test_missing_file_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileFormatStore::new(dir.path().join("unibar.toml"));
        assert_eq!(store.scrapbox_formats().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_file_without_table_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("unibar.toml");
        tokio::fs::write(&path, "[scrapbox]\nproject_name = \"books\"\n")
            .await
            .unwrap();
        let store = FileFormatStore::new(&path);
        assert_eq!(store.scrapbox_formats().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_reads_saved_templates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("unibar.toml");
        tokio::fs::write(&path, "[scrapbox_formats]\nbook = \"{title} {label}\"\n")
            .await
            .unwrap();
        let formats = FileFormatStore::new(&path)
            .scrapbox_formats()
            .await
            .unwrap()
            .unwrap();
        assert_eq!(formats.get(ProductType::Book), Some("{title} {label}"));
        assert_eq!(formats.get(ProductType::Asmr), None);
    }

    #[tokio::test]
    async fn test_unreadable_file_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("unibar.toml");
        tokio::fs::write(&path, "[scrapbox_formats\n").await.unwrap();
        let result = FileFormatStore::new(&path).scrapbox_formats().await;
        assert!(matches!(result, Err(AppError::Toml(_))));

        // A directory cannot be read as a file.
        let result = FileFormatStore::new(dir.path()).scrapbox_formats().await;
        assert!(matches!(result, Err(AppError::Io(_))));
    }
}
