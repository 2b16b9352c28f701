//! FANZA video pages.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use scraper::ElementRef;
use serde::Serialize;

use super::dom::{
    Document, is_tag, link_or_span_text, names_in, select_all, select_first, table_rows, text_of,
};
use crate::models::{Film, Product, ProductBase, Service};
use crate::utils::date::{parse_numeric_date, parse_release_date};
use crate::utils::text::non_empty;

const TITLE_SELECTORS: &[&str] = &[
    "h1.font-semibold span",
    "h1.font-semibold",
    "h1[data-testid='title']",
    "h1",
    ".productTitle__txt",
    "[data-testid='content-title']",
    ".page-header h1",
];

const TABLE_SELECTORS: &[&str] = &[
    "table.text-xs.shrink",
    "table.product-info",
    "table[data-testid='product-details']",
    ".product-details table",
    "table",
    ".work-outline table",
    "div[role='table']",
];

static ANNOTATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"【.*】").expect("annotation regex"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FanzaVideoRecord {
    pub url: String,
    pub title: String,
    pub actors: Vec<String>,
    pub director: Option<String>,
    pub label: Option<String>,
    pub published_at: Option<NaiveDate>,
    pub id: Option<String>,
}

impl FanzaVideoRecord {
    pub fn into_product(self) -> Product {
        let base = ProductBase::new(
            Service::FanzaVideo,
            &self.title,
            self.actors,
            self.url,
            self.published_at,
        );
        Film::make(base, self.director, self.label, self.id).into()
    }
}

/// Only real tables, or elements that declare the table role, count.
fn find_table(doc: &Document) -> Option<ElementRef<'_>> {
    TABLE_SELECTORS.iter().find_map(|css| {
        doc.select_first(css)
            .filter(|el| is_tag(*el, "table") || el.value().attr("role") == Some("table"))
    })
}

/// The `td` of the first row whose `th` contains `key`.
fn cell_by_key<'a>(table: ElementRef<'a>, key: &str) -> Option<ElementRef<'a>> {
    let rows = if is_tag(table, "table") {
        table_rows(table)
    } else {
        select_all(table, "[role='row'], tr")
    };
    rows.into_iter().find_map(|row| {
        let th = select_first(row, "th")?;
        let td = select_first(row, "td")?;
        text_of(th).contains(key).then_some(td)
    })
}

fn value_by_key(table: ElementRef<'_>, key: &str) -> Option<String> {
    cell_by_key(table, key).and_then(|td| non_empty(&link_or_span_text(td)))
}

/// Scrape a FANZA video page. Requires a title and a product table.
pub fn scrape(doc: &Document) -> Option<FanzaVideoRecord> {
    let raw_title = doc.first_text(TITLE_SELECTORS)?;
    let title = ANNOTATION.replace(&raw_title, "").trim().to_string();
    if title.is_empty() {
        return None;
    }

    let Some(table) = find_table(doc) else {
        log::debug!("No product table on {}", doc.url());
        return None;
    };

    let published_at = value_by_key(table, "配信開始日")
        .and_then(|text| parse_release_date("FANZA video", &text, parse_numeric_date));

    Some(FanzaVideoRecord {
        url: doc.url().to_string(),
        title,
        actors: cell_by_key(table, "出演者")
            .map(|td| names_in(td, &[',', '、']))
            .unwrap_or_default(),
        director: value_by_key(table, "監督"),
        label: value_by_key(table, "レーベル"),
        published_at,
        id: value_by_key(table, "メーカー品番").or_else(|| value_by_key(table, "配信品番")),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://video.dmm.co.jp/av/content/?id=abc00123";

    const HTML: &str = r#"
        <h1 class="font-semibold"><span>作品タイトル【独占】</span></h1>
        <table class="text-xs shrink">
          <tr><th>配信開始日：</th><td>2024/03/01</td></tr>
          <tr><th>出演者：</th><td><a>女優A</a>、<a>女優B</a></td></tr>
          <tr><th>監督：</th><td><a>監督A</a></td></tr>
          <tr><th>レーベル：</th><td><span>レーベルA</span></td></tr>
          <tr><th>配信品番：</th><td>abc00123</td></tr>
          <tr><th>メーカー品番：</th><td>ABC-123</td></tr>
        </table>
    "#;

    #[test]
    fn test_video_page() {
        let record = scrape(&Document::parse(URL, HTML)).unwrap();
        assert_eq!(record.title, "作品タイトル");
        assert_eq!(record.actors, ["女優A", "女優B"]);
        assert_eq!(record.director.as_deref(), Some("監督A"));
        assert_eq!(record.label.as_deref(), Some("レーベルA"));
        assert_eq!(record.published_at, NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(record.id.as_deref(), Some("ABC-123"));

        let product = record.into_product();
        assert_eq!(product.authors(), ["女優A", "女優B"]);
    }

    #[test]
    fn test_distribution_number_is_fallback_id() {
        let html = HTML.replace("メーカー品番", "備考");
        let record = scrape(&Document::parse(URL, &html)).unwrap();
        assert_eq!(record.id.as_deref(), Some("abc00123"));
    }

    #[test]
    fn test_plain_actor_list_is_split() {
        let html = r#"
            <h1>作品</h1>
            <table><tr><th>出演者</th><td>女優A, 女優B</td></tr></table>
        "#;
        let record = scrape(&Document::parse(URL, html)).unwrap();
        assert_eq!(record.actors, ["女優A", "女優B"]);
        assert_eq!(record.director, None);
        assert_eq!(record.published_at, None);
    }

    #[test]
    fn test_missing_table_is_none() {
        assert!(scrape(&Document::parse(URL, "<h1>作品</h1>")).is_none());
    }
}
