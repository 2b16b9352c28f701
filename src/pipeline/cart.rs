// src/pipeline/cart.rs

//! Cart pages: check every listed item against the wiki.

use std::path::Path;

use futures::stream::{self, StreamExt};
use reqwest::Client;
use serde::Serialize;

use super::check::{CheckReport, check_product, load_document, project_name};
use crate::error::{AppError, Result};
use crate::models::Config;
use crate::scrapers::{self, CartItem, SiteRoute};
use crate::services::ScrapboxClient;
use crate::storage::FormatStore;

/// Per-item outcome. A failed search does not abort the others.
#[derive(Debug, Clone, Serialize)]
pub struct CartCheck {
    pub item: CartItem,
    pub report: Option<CheckReport>,
    pub error: Option<String>,
}

/// Summary of a cart run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CartOutcome {
    pub checks: Vec<CartCheck>,
    pub owned: usize,
    pub failures: usize,
}

/// Check `items` concurrently, at most `concurrency` searches at a time.
/// Results keep the cart order.
pub async fn check_items(
    scrapbox: &ScrapboxClient,
    project: &str,
    store: &dyn FormatStore,
    items: Vec<CartItem>,
    concurrency: usize,
) -> CartOutcome {
    let mut indexed: Vec<(usize, CartCheck)> = stream::iter(items.into_iter().enumerate())
        .map(|(index, item)| async move {
            let product = item.clone().into_product();
            let check = match check_product(scrapbox, project, store, product).await {
                Ok(report) => CartCheck {
                    item,
                    report: Some(report),
                    error: None,
                },
                Err(e) => {
                    log::warn!("Check failed for {:?}: {e}", item.title);
                    CartCheck {
                        item,
                        report: None,
                        error: Some(e.to_string()),
                    }
                }
            };
            (index, check)
        })
        .buffer_unordered(concurrency.max(1))
        .collect()
        .await;
    indexed.sort_by_key(|(index, _)| *index);

    let checks: Vec<CartCheck> = indexed.into_iter().map(|(_, check)| check).collect();
    let owned = checks
        .iter()
        .filter(|c| c.report.as_ref().is_some_and(|r| r.outcome.exists()))
        .count();
    let failures = checks.iter().filter(|c| c.error.is_some()).count();

    CartOutcome {
        checks,
        owned,
        failures,
    }
}

/// Load a cart page and check its items.
pub async fn run_cart(
    config: &Config,
    client: &Client,
    store: &dyn FormatStore,
    url: &str,
    html: Option<&Path>,
) -> Result<CartOutcome> {
    let project = project_name(config)?;
    let route = SiteRoute::detect(url)
        .filter(SiteRoute::is_cart)
        .ok_or_else(|| AppError::unsupported_page(url))?;

    let doc = load_document(client, url, html).await?;
    let items = scrapers::scrape_cart(route, &doc);
    log::info!("{} item(s) in {route}", items.len());

    let scrapbox = ScrapboxClient::new(client.clone(), &config.scrapbox);
    let outcome = check_items(&scrapbox, project, store, items, config.http.max_concurrent).await;
    log::info!(
        "{} of {} item(s) already in {project}, {} failed",
        outcome.owned,
        outcome.checks.len(),
        outcome.failures
    );
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ScrapboxConfig;
    use crate::scrapers::CartKind;
    use crate::storage::MemoryFormatStore;

    fn item(title: &str) -> CartItem {
        CartItem {
            kind: CartKind::DmmBasket,
            url: "https://www.dmm.co.jp/dc/doujin/-/basket/".into(),
            title: title.into(),
            maker: None,
        }
    }

    #[tokio::test]
    async fn test_failures_are_collected_in_cart_order() {
        // Nothing listens on port 9, so every search fails fast.
        let config = ScrapboxConfig {
            base_url: "http://127.0.0.1:9".into(),
            ..ScrapboxConfig::default()
        };
        let scrapbox = ScrapboxClient::new(Client::new(), &config);
        let store = MemoryFormatStore::default();

        let items = vec![item("一"), item("二"), item("三")];
        let outcome = check_items(&scrapbox, "books", &store, items, 2).await;

        let titles: Vec<&str> = outcome.checks.iter().map(|c| c.item.title.as_str()).collect();
        assert_eq!(titles, ["一", "二", "三"]);
        assert_eq!(outcome.failures, 3);
        assert_eq!(outcome.owned, 0);
        assert!(outcome.checks.iter().all(|c| c.report.is_none()));
    }

    #[tokio::test]
    async fn test_product_page_is_not_a_cart() {
        let mut config = Config::default();
        config.scrapbox.project_name = "books".into();
        let store = MemoryFormatStore::default();

        let result = run_cart(
            &config,
            &Client::new(),
            &store,
            "https://www.amazon.co.jp/dp/4758069778/",
            None,
        )
        .await;
        assert!(matches!(result, Err(AppError::UnsupportedPage { .. })));
    }
}
