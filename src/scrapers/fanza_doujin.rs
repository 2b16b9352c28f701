//! FANZA doujin pages.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;

use super::dom::{Document, select_first, text_of};
use crate::models::{Doujinshi, Product, ProductBase, Service};
use crate::utils::date::{parse_numeric_date, parse_release_date};
use crate::utils::text::non_empty;

const TITLE_SELECTORS: &[&str] = &[
    ".productTitle__txt",
    "h1.productTitle",
    "h1[data-testid='title']",
    "h1",
    ".title",
    ".product-title",
    "[data-testid='product-title']",
    ".page-header h1",
];

const CIRCLE_SELECTORS: &[&str] = &[
    ".circleName__txt",
    ".circle-name",
    ".maker a",
    "[data-testid='circle-name']",
    ".product-maker",
];

static ANNOTATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"【.*】").expect("annotation regex"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FanzaDoujinRecord {
    pub url: String,
    pub title: String,
    pub circle_name: Option<String>,
    pub authors: Vec<String>,
    pub published_at: Option<NaiveDate>,
}

impl FanzaDoujinRecord {
    pub fn into_product(self) -> Product {
        let base = ProductBase::new(
            Service::FanzaDoujin,
            &self.title,
            self.authors,
            self.url,
            self.published_at,
        );
        Doujinshi::make(base, self.circle_name, None).into()
    }
}

/// Text of the `.informationList__txt` next to the heading `label`.
fn information(doc: &Document, label: &str) -> Option<String> {
    doc.select_all(".productInformation__item")
        .into_iter()
        .find(|item| {
            select_first(*item, ".informationList__ttl").is_some_and(|ttl| text_of(ttl) == label)
        })
        .and_then(|item| select_first(item, ".informationList__txt"))
        .and_then(|txt| non_empty(&text_of(txt)))
}

/// Scrape a FANZA doujin page. `None` when no title can be found.
pub fn scrape(doc: &Document) -> Option<FanzaDoujinRecord> {
    let raw_title = doc.first_text(TITLE_SELECTORS)?;
    let title = ANNOTATION.replace(&raw_title, "").trim().to_string();
    if title.is_empty() {
        return None;
    }

    let circle_name = doc.first_text(CIRCLE_SELECTORS);
    if circle_name.is_none() {
        log::debug!("No circle name on {}", doc.url());
    }

    Some(FanzaDoujinRecord {
        url: doc.url().to_string(),
        title,
        circle_name,
        authors: information(doc, "作者").into_iter().collect(),
        published_at: information(doc, "配信開始日")
            .and_then(|text| parse_release_date("FANZA doujin", &text, parse_numeric_date)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://www.dmm.co.jp/dc/doujin/-/detail/=/cid=d_000001/";

    #[test]
    fn test_doujin_page() {
        let html = r#"
            <h1 class="productTitle"><span class="productTitle__txt">【新作】同人作品【30%OFF】</span></h1>
            <div class="circleName"><a class="circleName__txt">サークルC</a></div>
            <ul>
              <li class="productInformation__item">
                <p class="informationList__ttl">配信開始日</p>
                <p class="informationList__txt">2024/02/29 16:00</p>
              </li>
              <li class="productInformation__item">
                <p class="informationList__ttl">作者</p>
                <p class="informationList__txt">作者C</p>
              </li>
            </ul>
        "#;
        let record = scrape(&Document::parse(URL, html)).unwrap();
        assert_eq!(record.title, "同人作品");
        assert_eq!(record.circle_name.as_deref(), Some("サークルC"));
        assert_eq!(record.authors, ["作者C"]);
        assert_eq!(record.published_at, NaiveDate::from_ymd_opt(2024, 2, 29));

        let product = record.into_product();
        let Product::Doujinshi(doujinshi) = &product else {
            panic!("expected a doujinshi, got {product:?}");
        };
        assert_eq!(doujinshi.circle_name(), Some("サークルC"));
        assert_eq!(doujinshi.event_name(), None);
    }

    #[test]
    fn test_fallback_selectors() {
        let html = r#"
            <h1>作品名</h1>
            <div class="maker"><a href="/m">メーカーD</a></div>
        "#;
        let record = scrape(&Document::parse(URL, html)).unwrap();
        assert_eq!(record.title, "作品名");
        assert_eq!(record.circle_name.as_deref(), Some("メーカーD"));
        assert!(record.authors.is_empty());
        assert_eq!(record.published_at, None);
    }

    #[test]
    fn test_no_title_is_none() {
        assert!(scrape(&Document::parse(URL, "<div>nothing</div>")).is_none());
    }
}
