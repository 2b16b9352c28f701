//! Scrapbox search results.

use serde::{Deserialize, Serialize};

/// One page returned by a project search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScrapboxPage {
    pub title: String,
    pub page_url: String,
    pub image: Option<String>,
    /// Matched lines joined by newlines
    pub description: String,
}

/// Outcome of a full-text search in one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub count: u64,
    pub project_name: String,
    pub search_query: String,
    pub pages: Vec<ScrapboxPage>,
}

/// What to offer the user for a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "result", rename_all = "camelCase")]
pub enum CheckOutcome {
    /// At least one page already mentions the product
    ExistsPage(SearchResult),
    /// Nothing found; a new page should be created
    CreatePage(SearchResult),
}

impl CheckOutcome {
    pub fn from_result(result: SearchResult) -> Self {
        if result.count >= 1 {
            CheckOutcome::ExistsPage(result)
        } else {
            CheckOutcome::CreatePage(result)
        }
    }

    pub fn result(&self) -> &SearchResult {
        match self {
            CheckOutcome::ExistsPage(result) | CheckOutcome::CreatePage(result) => result,
        }
    }

    pub fn exists(&self) -> bool {
        matches!(self, CheckOutcome::ExistsPage(_))
    }
}

/// Raw JSON body of the search endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub project_name: String,
    #[serde(default)]
    pub search_query: String,
    #[serde(default)]
    pub pages: Vec<SearchResponsePage>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SearchResponsePage {
    pub title: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub lines: Vec<String>,
}
