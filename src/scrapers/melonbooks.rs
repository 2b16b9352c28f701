//! Melonbooks item pages.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;

use super::dom::{Document, row_text, text_of};
use crate::models::{Doujinshi, Product, ProductBase, Service};
use crate::utils::date::{parse_numeric_date, parse_release_date};
use crate::utils::text::{non_empty, split_names};

const TITLE: &str = "#contents > div.item-page > div.item-header > h1";
const TABLE_BODY: &str = "#contents > div.item-page table > tbody";

static WORK_COUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(作品数:\d+\)").expect("work count regex"));
static FAVORITE_BUTTON: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*お気に入り作家に登録する").expect("favorite button regex"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MelonbooksRecord {
    pub url: String,
    pub title: String,
    pub authors: Vec<String>,
    pub circle_name: Option<String>,
    pub genres: Vec<String>,
    pub event_name: Option<String>,
    pub published_at: Option<NaiveDate>,
}

impl MelonbooksRecord {
    pub fn into_product(self) -> Product {
        let base = ProductBase::new(
            Service::Melonbooks,
            &self.title,
            self.authors,
            self.url,
            self.published_at,
        );
        Doujinshi::make(base, self.circle_name, self.event_name).into()
    }
}

/// Scrape a Melonbooks item page. Title and detail table are required.
pub fn scrape(doc: &Document) -> Option<MelonbooksRecord> {
    let title = text_of(doc.select_first(TITLE)?);
    let table = doc.select_first(TABLE_BODY)?;

    let circle_name = row_text(table, "サークル名")
        .and_then(|raw| non_empty(&WORK_COUNT.replace(&raw, "")));
    let author = row_text(table, "作家名")
        .and_then(|raw| non_empty(&FAVORITE_BUTTON.replace(&raw, "")));

    Some(MelonbooksRecord {
        url: doc.url().to_string(),
        title,
        authors: author.into_iter().collect(),
        circle_name,
        genres: row_text(table, "ジャンル")
            .map(|text| split_names(&text, &[',']))
            .unwrap_or_default(),
        event_name: row_text(table, "イベント").and_then(|text| non_empty(&text)),
        published_at: row_text(table, "発行日")
            .and_then(|text| parse_release_date("Melonbooks", &text, parse_numeric_date)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://www.melonbooks.co.jp/detail/detail.php?product_id=1";

    const HTML: &str = r#"
        <div id="contents">
          <div class="item-page">
            <div class="item-header"><h1>同人誌タイトル</h1></div>
            <div class="item-detail">
              <table>
                <tbody>
                  <tr><th>サークル名</th><td><a>サークルM</a> (作品数:42)</td></tr>
                  <tr><th>作家名</th><td><a>作家M</a>
お気に入り作家に登録する</td></tr>
                  <tr><th>ジャンル</th><td>オリジナル, ファンタジー</td></tr>
                  <tr><th>イベント</th><td>コミックマーケット102</td></tr>
                  <tr><th>発行日</th><td>2023/08/13</td></tr>
                </tbody>
              </table>
            </div>
          </div>
        </div>
    "#;

    #[test]
    fn test_item_page() {
        let record = scrape(&Document::parse(URL, HTML)).unwrap();
        assert_eq!(record.title, "同人誌タイトル");
        assert_eq!(record.circle_name.as_deref(), Some("サークルM"));
        assert_eq!(record.authors, ["作家M"]);
        assert_eq!(record.genres, ["オリジナル", "ファンタジー"]);
        assert_eq!(record.event_name.as_deref(), Some("コミックマーケット102"));
        assert_eq!(record.published_at, NaiveDate::from_ymd_opt(2023, 8, 13));
        assert!(matches!(record.into_product(), Product::Doujinshi(_)));
    }

    #[test]
    fn test_missing_table_is_none() {
        let html = r#"
            <div id="contents"><div class="item-page">
              <div class="item-header"><h1>同人誌タイトル</h1></div>
            </div></div>
        "#;
        assert!(scrape(&Document::parse(URL, html)).is_none());
    }

    #[test]
    fn test_missing_title_is_none() {
        let html = HTML.replace("item-header", "x");
        assert!(scrape(&Document::parse(URL, &html)).is_none());
    }
}
