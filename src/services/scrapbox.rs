// src/services/scrapbox.rs

//! Scrapbox project search and page-creation links.

use reqwest::Client;
use url::Url;
use url::form_urlencoded::byte_serialize;

use crate::error::{AppError, Result};
use crate::models::{CheckOutcome, Product, ScrapboxConfig, ScrapboxPage, SearchResponse, SearchResult};
use crate::utils::url::page_url;

/// Percent-encode a query component, spaces as `%20`.
fn encode_component(text: &str) -> String {
    byte_serialize(text.as_bytes()).collect::<String>().replace('+', "%20")
}

/// Full-text search endpoint for `query` in `project`.
pub fn search_url(base: &str, project: &str, query: &str, limit: u32) -> Result<Url> {
    let mut url = Url::parse(base)?;
    url.path_segments_mut()
        .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
        .pop_if_empty()
        .extend(["api", "pages", project, "search", "query"]);
    url.set_query(Some(&format!(
        "skip=0&sort=updated&limit={limit}&q={}",
        encode_component(query)
    )));
    Ok(url)
}

/// Link that opens a new page titled after `product` with `body` prefilled.
pub fn create_page_url(base: &str, project: &str, product: &Product, body: &str) -> Result<Url> {
    let mut url = page_url(base, project, product.title())?;
    url.set_query(Some(&format!("body={}", encode_component(body))));
    Ok(url)
}

fn into_search_result(response: SearchResponse, base: &str, project: &str) -> Result<SearchResult> {
    let pages = response
        .pages
        .into_iter()
        .map(|page| {
            Ok(ScrapboxPage {
                page_url: page_url(base, project, &page.title)?.to_string(),
                title: page.title,
                image: page.image.filter(|image| !image.is_empty()),
                description: page.lines.join("\n"),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(SearchResult {
        count: response.count,
        project_name: response.project_name,
        search_query: response.search_query,
        pages,
    })
}

/// Client for one Scrapbox instance.
#[derive(Debug, Clone)]
pub struct ScrapboxClient {
    client: Client,
    base_url: String,
    search_limit: u32,
}

impl ScrapboxClient {
    pub fn new(client: Client, config: &ScrapboxConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            search_limit: config.search_limit,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Search `project` for `query`.
    pub async fn search(&self, project: &str, query: &str) -> Result<SearchResult> {
        let url = search_url(&self.base_url, project, query, self.search_limit)?;
        log::debug!("Searching {project} for {query:?}");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| AppError::search(project, e.to_string()))?;
        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| AppError::search(project, format!("invalid response: {e}")))?;

        let result = into_search_result(body, &self.base_url, project)?;
        log::info!("{} page(s) in {project} for {query:?}", result.count);
        Ok(result)
    }

    /// Search for the product's search key and decide what to offer.
    pub async fn check(&self, project: &str, product: &Product) -> Result<CheckOutcome> {
        let result = self.search(project, &product.title_for_search()).await?;
        Ok(CheckOutcome::from_result(result))
    }
}
