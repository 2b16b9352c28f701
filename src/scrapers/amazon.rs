//! Amazon.co.jp book pages.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;

use super::dom::{Document, row_cells, text_of};
use crate::models::{Book, Product, ProductBase, Service};
use crate::utils::date::{parse_date, parse_release_date};
use crate::utils::text::{dedup_preserving_order, non_empty, normalize_whitespace};

const TITLE_SELECTORS: &[&str] = &[
    "#productTitle",
    "#title",
    "h1.product-title",
    "h1 span#productTitle",
    "[data-testid='product-title']",
    ".product-title",
    "h1",
];

const DETAIL_SELECTORS: &[&str] = &[
    "#detailBullets_feature_div li",
    "#feature-bullets li",
    "#productDetails_feature_div li",
    ".feature li",
    "[data-testid='product-details'] li",
    ".product-details li",
    "#productDetails li",
];

const DETAIL_TABLE_ROWS: &str = "#productDetails_detailBullets_sections1 tr";

const AUTHOR_SELECTORS: &[&str] = &[
    "[href*='ref=dp_byline_cont_book']",
    ".author a",
    "#bylineInfo a",
    ".a-color-secondary a",
    "[data-testid='author-link']",
    ".author-name",
    ".by-author a",
];

const PUBLISHER_LABELS: &[&str] = &["出版社", "Publisher"];
const DATE_LABELS: &[&str] = &["発売日", "Publication date"];

// Amazon pads the colon with bidi marks.
static PUBLISHER_WITH_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:出版社|Publisher)[\s\u{200E}\u{200F}]*[:|][\s\u{200E}\u{200F}]*([^(;]+?)\s*[(;]")
        .expect("publisher regex")
});
static PUBLISHER_ONLY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:出版社|Publisher)[\s\u{200E}\u{200F}]*[:|][\s\u{200E}\u{200F}]*(.+)$")
        .expect("publisher fallback regex")
});
static RELEASE_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:発売日|Publication date)[\s\u{200E}\u{200F}]*[:|][\s\u{200E}\u{200F}]*(.+)$")
        .expect("release date regex")
});
static PAREN_CONTENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([^)]*)\)").expect("paren regex"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AmazonRecord {
    pub url: String,
    pub title: String,
    pub authors: Vec<String>,
    pub publisher: Option<String>,
    pub published_at: Option<NaiveDate>,
}

impl AmazonRecord {
    pub fn into_product(self) -> Product {
        let base = ProductBase::new(
            Service::Amazon,
            &self.title,
            self.authors,
            self.url,
            self.published_at,
        );
        Book::make(base, self.publisher, None).into()
    }
}

/// One line of the product details block, as `label: value` text.
struct DetailLine {
    text: String,
}

impl DetailLine {
    fn mentions(&self, labels: &[&str]) -> bool {
        labels.iter().any(|label| self.text.contains(label))
    }
}

fn detail_lines(doc: &Document) -> Vec<DetailLine> {
    for css in DETAIL_SELECTORS {
        let items = doc.select_all(css);
        if !items.is_empty() {
            log::debug!("Amazon details from {css}");
            return items
                .into_iter()
                .map(|el| DetailLine {
                    text: normalize_whitespace(&text_of(el)),
                })
                .collect();
        }
    }

    // The table layout has the label and value in separate cells.
    doc.select_all(DETAIL_TABLE_ROWS)
        .into_iter()
        .filter_map(|row| {
            let cells = row_cells(row);
            let label = text_of(*cells.first()?);
            let value = text_of(*cells.get(1)?);
            Some(DetailLine {
                text: format!("{label} : {value}"),
            })
        })
        .collect()
}

fn extract_publisher(lines: &[DetailLine]) -> Option<String> {
    let line = lines.iter().find(|l| l.mentions(PUBLISHER_LABELS))?;
    PUBLISHER_WITH_DATE
        .captures(&line.text)
        .or_else(|| PUBLISHER_ONLY.captures(&line.text))
        .and_then(|caps| non_empty(&caps[1]))
}

fn extract_date(lines: &[DetailLine]) -> Option<NaiveDate> {
    if let Some(line) = lines.iter().find(|l| l.mentions(DATE_LABELS)) {
        return parse_release_date("Amazon", &line.text, |text| {
            RELEASE_DATE
                .captures(text)
                .and_then(|caps| parse_date(&caps[1]))
        });
    }

    // Older pages only print the date next to the publisher.
    let line = lines.iter().find(|l| l.mentions(PUBLISHER_LABELS))?;
    PAREN_CONTENT
        .captures_iter(&line.text)
        .find_map(|caps| parse_date(&caps[1]))
}

fn extract_authors(doc: &Document) -> Vec<String> {
    for css in AUTHOR_SELECTORS {
        let names: Vec<String> = doc
            .select_all(css)
            .into_iter()
            .map(text_of)
            .filter(|name| name.chars().count() > 1)
            .collect();
        if !names.is_empty() {
            log::debug!("Amazon authors from {css}");
            return dedup_preserving_order(names);
        }
    }
    Vec::new()
}

/// Scrape an Amazon product page. `None` when no title can be found.
pub fn scrape(doc: &Document) -> Option<AmazonRecord> {
    let title = doc.first_text(TITLE_SELECTORS)?;
    let lines = detail_lines(doc);

    Some(AmazonRecord {
        url: doc.url().to_string(),
        title,
        authors: extract_authors(doc),
        publisher: extract_publisher(&lines),
        published_at: extract_date(&lines),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://www.amazon.co.jp/dp/B000000000";

    #[test]
    fn test_bullet_layout() {
        let html = r#"
            <span id="productTitle"> 葬送のフリーレン（１） (少年サンデーコミックス) </span>
            <div id="bylineInfo">
              <a href="/x?ref=dp_byline_cont_book_1">山田鐘人</a>
              <a href="/y?ref=dp_byline_cont_book_2">アベツカサ</a>
              <a href="/x?ref=dp_byline_cont_book_1">山田鐘人</a>
            </div>
            <div id="detailBullets_feature_div"><ul>
              <li><span>出版社 &rlm; : &lrm; 小学館 (2020/8/18)</span></li>
              <li><span>発売日 &rlm; : &lrm; 2020/8/18</span></li>
              <li><span>言語 &rlm; : &lrm; 日本語</span></li>
            </ul></div>
        "#;
        let record = scrape(&Document::parse(URL, html)).unwrap();
        assert_eq!(record.title, "葬送のフリーレン（１） (少年サンデーコミックス)");
        assert_eq!(record.authors, ["山田鐘人", "アベツカサ"]);
        assert_eq!(record.publisher.as_deref(), Some("小学館"));
        assert_eq!(record.published_at, NaiveDate::from_ymd_opt(2020, 8, 18));

        let product = record.into_product();
        assert_eq!(product.title(), "葬送のフリーレン（1） (少年サンデーコミックス)");
        assert!(matches!(product, Product::Book(_)));
    }

    #[test]
    fn test_table_layout_and_english_labels() {
        let html = r#"
            <h1><span id="title">Some Book</span></h1>
            <span class="author"><a href="/a">A</a><a href="/b">Jane Doe</a></span>
            <table id="productDetails_detailBullets_sections1">
              <tr><th>Publisher</th><td>Example Press; 1st edition (May 20, 2021)</td></tr>
            </table>
        "#;
        let record = scrape(&Document::parse(URL, html)).unwrap();
        assert_eq!(record.title, "Some Book");
        assert_eq!(record.authors, ["Jane Doe"]);
        assert_eq!(record.publisher.as_deref(), Some("Example Press"));
        assert_eq!(record.published_at, NaiveDate::from_ymd_opt(2021, 5, 20));
    }

    #[test]
    fn test_missing_details_are_absent() {
        let html = r#"<span id="productTitle">Title</span>"#;
        let record = scrape(&Document::parse(URL, html)).unwrap();
        assert!(record.authors.is_empty());
        assert_eq!(record.publisher, None);
        assert_eq!(record.published_at, None);
    }

    #[test]
    fn test_no_title_is_none() {
        let html = r#"<div id="productTitle">  </div><p>nothing</p>"#;
        assert!(scrape(&Document::parse(URL, html)).is_none());
    }
}
