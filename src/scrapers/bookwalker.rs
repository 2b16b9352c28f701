//! BOOK☆WALKER book pages.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::{Captures, Regex};
use serde::Serialize;

use super::dom::{Document, is_tag, link_text, next_element_sibling, text_of};
use crate::models::{Book, Product, ProductBase, Service};
use crate::title::PROTECTED_BRACKET_TITLE;
use crate::utils::date::{parse_numeric_date, parse_release_date};
use crate::utils::text::{dedup_preserving_order, non_empty, split_names};

static LENTICULAR_GROUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"【.*?】").expect("lenticular bracket regex"));
static ROLE_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*[(（][^)）]*[)）]\s*").expect("role suffix regex"));

const AUTHOR_SEPARATORS: &[char] = &[',', '、', '・'];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookWalkerRecord {
    pub url: String,
    pub title: String,
    pub authors: Vec<String>,
    pub publisher: Option<String>,
    pub label: Option<String>,
    pub published_at: Option<NaiveDate>,
}

impl BookWalkerRecord {
    pub fn into_product(self) -> Product {
        let base = ProductBase::new(
            Service::BookWalker,
            &self.title,
            self.authors,
            self.url,
            self.published_at,
        );
        Book::make(base, self.publisher, self.label).into()
    }
}

/// Drop edition annotations such as 【コミック版】 but keep bracketed titles.
fn strip_annotations(title: &str) -> String {
    LENTICULAR_GROUP
        .replace_all(title, |caps: &Captures| {
            if &caps[0] == PROTECTED_BRACKET_TITLE {
                caps[0].to_string()
            } else {
                String::new()
            }
        })
        .trim()
        .to_string()
}

/// Value shown next to a label: the `dd` after a matching `dt`, or failing
/// that the next sibling of any element reading exactly `label`.
fn info_by_label(doc: &Document, label: &str) -> Option<String> {
    let from_definition = doc
        .select_all("dt")
        .into_iter()
        .filter(|dt| text_of(*dt) == label)
        .find_map(|dt| next_element_sibling(dt).filter(|dd| is_tag(*dd, "dd")));

    let value = match from_definition {
        Some(dd) => dd,
        None => doc
            .select_all("*")
            .into_iter()
            .filter(|el| text_of(*el) == label)
            .find_map(next_element_sibling)?,
    };
    non_empty(&link_text(value))
}

fn parse_authors(text: &str) -> Vec<String> {
    let names = split_names(text, AUTHOR_SEPARATORS)
        .into_iter()
        .map(|name| ROLE_SUFFIX.replace_all(&name, "").trim().to_string())
        .filter(|name| !name.is_empty())
        .collect();
    dedup_preserving_order(names)
}

/// Scrape a BOOK☆WALKER detail page. `None` without an `h1`.
pub fn scrape(doc: &Document) -> Option<BookWalkerRecord> {
    let heading = doc.select_first("h1")?;
    let title = strip_annotations(&text_of(heading));

    let published_at = info_by_label(doc, "配信開始日")
        .and_then(|text| parse_release_date("BOOK☆WALKER", &text, parse_numeric_date));

    Some(BookWalkerRecord {
        url: doc.url().to_string(),
        title,
        authors: info_by_label(doc, "著者")
            .map(|text| parse_authors(&text))
            .unwrap_or_default(),
        publisher: info_by_label(doc, "出版社"),
        label: info_by_label(doc, "レーベル"),
        published_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://bookwalker.jp/de12345678-1234-1234-1234-123456789abc/";

    #[test]
    fn test_definition_list_layout() {
        let html = r#"
            <h1>【推しの子】 1【コミック版】</h1>
            <dl>
              <dt>著者</dt>
              <dd>赤坂アカ（原作）、横槍メンゴ（作画）、赤坂アカ</dd>
              <dt>出版社</dt>
              <dd><a href="/company/1">集英社</a></dd>
              <dt>レーベル</dt>
              <dd><a href="/label/1">ヤングジャンプコミックスDIGITAL</a></dd>
              <dt>配信開始日</dt>
              <dd>２０２０/０７/１７</dd>
            </dl>
        "#;
        let record = scrape(&Document::parse(URL, html)).unwrap();
        assert_eq!(record.title, "【推しの子】 1");
        assert_eq!(record.authors, ["赤坂アカ", "横槍メンゴ"]);
        assert_eq!(record.publisher.as_deref(), Some("集英社"));
        assert_eq!(record.label.as_deref(), Some("ヤングジャンプコミックスDIGITAL"));
        assert_eq!(record.published_at, NaiveDate::from_ymd_opt(2020, 7, 17));
    }

    #[test]
    fn test_sibling_fallback_layout() {
        let html = r#"
            <h1>作品名【期間限定】</h1>
            <div class="info">
              <span>出版社</span><span><a href="/p">出版社A</a></span>
              <span>配信開始日</span><span>2021/1/5</span>
            </div>
        "#;
        let record = scrape(&Document::parse(URL, html)).unwrap();
        assert_eq!(record.title, "作品名");
        assert_eq!(record.publisher.as_deref(), Some("出版社A"));
        assert_eq!(record.label, None);
        assert!(record.authors.is_empty());
        assert_eq!(record.published_at, NaiveDate::from_ymd_opt(2021, 1, 5));
    }

    #[test]
    fn test_no_heading_is_none() {
        assert!(scrape(&Document::parse(URL, "<p>no title</p>")).is_none());
    }
}
