// src/pipeline/check.rs

//! Single product page: load, scrape, search, offer.

use std::path::Path;

use reqwest::Client;
use serde::Serialize;

use crate::error::{AppError, Result};
use crate::models::{CheckOutcome, Config, Product};
use crate::scrapers::{self, Document, SiteRoute};
use crate::services::{ScrapboxClient, create_page_url};
use crate::storage::FormatStore;
use crate::utils::http::fetch_text;

/// Result of checking one product against the wiki.
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub product: Product,
    pub outcome: CheckOutcome,
    /// Present when no page mentions the product yet
    pub create_page_url: Option<String>,
}

/// Parse `url` from a saved HTML file, or fetch it when no file is given.
pub async fn load_document(client: &Client, url: &str, html: Option<&Path>) -> Result<Document> {
    let body = match html {
        Some(path) => {
            log::debug!("Reading {url} from {}", path.display());
            tokio::fs::read_to_string(path).await?
        }
        None => {
            log::debug!("Fetching {url}");
            fetch_text(client, url).await?
        }
    };
    Ok(Document::parse(url, &body))
}

/// Route and scrape a product page.
pub fn scrape_product(doc: &Document) -> Result<Product> {
    let route = SiteRoute::detect(doc.url())
        .filter(|route| !route.is_cart())
        .ok_or_else(|| AppError::unsupported_page(doc.url()))?;
    let record = scrapers::scrape(route, doc).ok_or_else(|| {
        log::warn!("{route} scraper found no product on {}", doc.url());
        AppError::unsupported_page(doc.url())
    })?;
    Ok(record.into_product())
}

/// The configured project, or a config error when it is unset.
pub fn project_name(config: &Config) -> Result<&str> {
    let project = config.scrapbox.project_name.as_str();
    if project.is_empty() {
        return Err(AppError::config(
            "scrapbox.project_name is not set; add it to the config file",
        ));
    }
    Ok(project)
}

/// Search the wiki for `product` and build the create-page link when needed.
pub async fn check_product(
    scrapbox: &ScrapboxClient,
    project: &str,
    store: &dyn FormatStore,
    product: Product,
) -> Result<CheckReport> {
    let outcome = scrapbox.check(project, &product).await?;

    let create_page_url = if outcome.exists() {
        None
    } else {
        let body = product.create_scrapbox_body_string(store).await?;
        Some(create_page_url(scrapbox.base_url(), project, &product, &body)?.to_string())
    };

    Ok(CheckReport {
        product,
        outcome,
        create_page_url,
    })
}

/// Load, scrape and check one product page.
pub async fn run_check(
    config: &Config,
    client: &Client,
    store: &dyn FormatStore,
    url: &str,
    html: Option<&Path>,
) -> Result<CheckReport> {
    let project = project_name(config)?;
    let doc = load_document(client, url, html).await?;
    let product = scrape_product(&doc)?;
    log::info!("{} ({}): {}", product.service(), product.product_type(), product.title());

    let scrapbox = ScrapboxClient::new(client.clone(), &config.scrapbox);
    check_product(&scrapbox, project, store, product).await
}
