//! Toranoana item pages.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;

use super::dom::{Document, row_cells, row_text, select_all, table_rows, text_of};
use crate::models::{Doujinshi, Product, ProductBase, Service};
use crate::utils::date::{parse_numeric_date, parse_release_date};
use crate::utils::text::non_empty;

const TITLE: &str = ".product-detail-desc-title span";
const CIRCLE: &str = ".sub-circle .sub-p";
const AUTHOR: &str = ".sub-name .sub-p";
const DETAIL_TABLE: &str = ".product-detail-spec-table";
const GENRE: &str = ".js-product-detail-spec-genre";
const ALERT_BUTTON: &str = "入荷アラートを設定";
const DATE_LABELS: &[&str] = &["発行日", "発売日", "頒布日"];

static EVENT_DATE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}/\d{2}/\d{2}").expect("event date regex"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToranoanaRecord {
    pub url: String,
    pub title: String,
    pub authors: Vec<String>,
    pub circle_name: Option<String>,
    pub genres: Vec<String>,
    pub main_characters: Vec<String>,
    pub event_name: Option<String>,
    pub published_at: Option<NaiveDate>,
}

impl ToranoanaRecord {
    pub fn into_product(self) -> Product {
        let base = ProductBase::new(
            Service::Toranoana,
            &self.title,
            self.authors,
            self.url,
            self.published_at,
        );
        Doujinshi::make(base, self.circle_name, self.event_name).into()
    }
}

/// Scrape a Toranoana item page. Title and detail table are required.
pub fn scrape(doc: &Document) -> Option<ToranoanaRecord> {
    let title = text_of(doc.select_first(TITLE)?);
    let table = doc.select_first(DETAIL_TABLE)?;

    // Genres live in the second cell of the third row.
    let genres = table_rows(table)
        .get(2)
        .and_then(|row| row_cells(*row).get(1).copied())
        .map(|cell| {
            select_all(cell, GENRE)
                .into_iter()
                .map(text_of)
                .filter(|genre| !genre.is_empty() && genre != ALERT_BUTTON)
                .collect()
        })
        .unwrap_or_default();

    let event_name = row_text(table, "初出イベント")
        .and_then(|text| non_empty(&EVENT_DATE_PREFIX.replace(&text, "")));

    let published_at = DATE_LABELS
        .iter()
        .find_map(|label| row_text(table, label).and_then(|text| non_empty(&text)))
        .and_then(|text| parse_release_date("Toranoana", &text, parse_numeric_date));

    Some(ToranoanaRecord {
        url: doc.url().to_string(),
        title,
        authors: doc.first_text(&[AUTHOR]).into_iter().collect(),
        circle_name: doc.first_text(&[CIRCLE]),
        genres,
        main_characters: row_text(table, "メインキャラ")
            .map(|text| text.split(' ').filter(|s| !s.is_empty()).map(str::to_string).collect())
            .unwrap_or_default(),
        event_name,
        published_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://ec.toranoana.jp/tora_r/ec/item/040031000001/";

    const HTML: &str = r#"
        <div class="product-detail-desc-title"><span>虎の穴タイトル</span></div>
        <div class="sub-circle"><span class="sub-p">サークルT</span></div>
        <div class="sub-name"><span class="sub-p">作家T</span></div>
        <table class="product-detail-spec-table">
          <tr><td>サークル</td><td>サークルT</td></tr>
          <tr><td>作家</td><td>作家T</td></tr>
          <tr><td>ジャンル</td><td>
            <a class="js-product-detail-spec-genre">オリジナル</a>
            <a class="js-product-detail-spec-genre">入荷アラートを設定</a>
            <a class="js-product-detail-spec-genre">ファンタジー</a>
          </td></tr>
          <tr><td>メインキャラ</td><td>キャラA キャラB</td></tr>
          <tr><td>初出イベント</td><td>2023/12/30 コミックマーケット103</td></tr>
          <tr><td>発行日</td><td>2023/12/30</td></tr>
        </table>
    "#;

    #[test]
    fn test_item_page() {
        let record = scrape(&Document::parse(URL, HTML)).unwrap();
        assert_eq!(record.title, "虎の穴タイトル");
        assert_eq!(record.authors, ["作家T"]);
        assert_eq!(record.circle_name.as_deref(), Some("サークルT"));
        assert_eq!(record.genres, ["オリジナル", "ファンタジー"]);
        assert_eq!(record.main_characters, ["キャラA", "キャラB"]);
        assert_eq!(record.event_name.as_deref(), Some("コミックマーケット103"));
        assert_eq!(record.published_at, NaiveDate::from_ymd_opt(2023, 12, 30));

        let Product::Doujinshi(doujinshi) = record.into_product() else {
            panic!("expected a doujinshi");
        };
        assert_eq!(doujinshi.event_name(), Some("コミックマーケット103"));
    }

    #[test]
    fn test_release_date_fallback() {
        let html = HTML.replace("<td>発行日</td>", "<td>頒布日</td>");
        let record = scrape(&Document::parse(URL, &html)).unwrap();
        assert_eq!(record.published_at, NaiveDate::from_ymd_opt(2023, 12, 30));
    }

    #[test]
    fn test_missing_detail_table_is_none() {
        let html = r#"<div class="product-detail-desc-title"><span>虎</span></div>"#;
        assert!(scrape(&Document::parse(URL, html)).is_none());
    }
}
