//! FANZA anime video pages.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use scraper::ElementRef;
use serde::Serialize;

use super::dom::{Document, next_element_sibling, row_cells, select_all, table_rows, text_of};
use crate::models::{Film, Product, ProductBase, Service};
use crate::utils::date::{parse_numeric_date, parse_release_date};
use crate::utils::text::non_empty;

const TITLE_SELECTORS: &[&str] = &["h1.font-semibold", "h1", "#title"];
const TABLE_SELECTORS: &[&str] = &["table.text-xs.shrink", "table.mg-b20"];

static ANNOTATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"【.*】").expect("annotation regex"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FanzaAnimeRecord {
    pub url: String,
    pub title: String,
    pub label: Option<String>,
    pub published_at: Option<NaiveDate>,
    pub product_number: Option<String>,
    pub manufacturer_product_number: Option<String>,
}

impl FanzaAnimeRecord {
    /// Anime pages list no performers or director. The manufacturer's product
    /// number is the one people search for, so it becomes the id.
    pub fn into_product(self) -> Product {
        let base = ProductBase::new(
            Service::FanzaAnime,
            &self.title,
            Vec::new(),
            self.url,
            self.published_at,
        );
        Film::make(base, None, self.label, self.manufacturer_product_number).into()
    }
}

/// Value for `label`: the second cell of the first row whose first cell
/// starts with it, or the sibling of any cell reading exactly `label`.
fn value_by_label(table: ElementRef<'_>, label: &str) -> Option<String> {
    let from_row = table_rows(table).into_iter().find_map(|row| {
        let cells = row_cells(row);
        let first = text_of(*cells.first()?);
        if first.starts_with(label) {
            cells.get(1).map(|cell| text_of(*cell))
        } else {
            None
        }
    });
    if from_row.is_some() {
        return from_row.and_then(|text| non_empty(&text));
    }

    select_all(table, "td, th")
        .into_iter()
        .find(|cell| text_of(*cell) == label)
        .and_then(next_element_sibling)
        .and_then(|cell| non_empty(&text_of(cell)))
}

/// Scrape a FANZA anime page. Requires a non-empty title and the product table.
pub fn scrape(doc: &Document) -> Option<FanzaAnimeRecord> {
    let heading = doc.first_match(TITLE_SELECTORS, false)?;
    let title = ANNOTATION.replace(&text_of(heading), "").trim().to_string();
    if title.is_empty() {
        log::debug!("FANZA anime title is empty on {}", doc.url());
        return None;
    }

    let table = doc.first_match(TABLE_SELECTORS, false)?;

    let published_at = value_by_label(table, "配信開始日")
        .and_then(|text| parse_release_date("FANZA anime", &text, parse_numeric_date));

    Some(FanzaAnimeRecord {
        url: doc.url().to_string(),
        title,
        label: value_by_label(table, "レーベル"),
        published_at,
        product_number: value_by_label(table, "品番"),
        manufacturer_product_number: value_by_label(table, "メーカー品番"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://video.dmm.co.jp/anime/content/?id=abc001";

    const HTML: &str = r#"
        <h1 class="font-semibold">OVA 作品名 ＃1【期間限定】</h1>
        <table class="text-xs shrink">
          <tr><th>配信開始日：</th><td>2023/05/12</td></tr>
          <tr><th>レーベル</th><td>レーベルA</td></tr>
          <tr><th>品番</th><td>abc001</td></tr>
          <tr><th>メーカー品番</th><td>ABC-001</td></tr>
        </table>
    "#;

    #[test]
    fn test_anime_page() {
        let record = scrape(&Document::parse(URL, HTML)).unwrap();
        assert_eq!(record.title, "OVA 作品名 ＃1");
        assert_eq!(record.label.as_deref(), Some("レーベルA"));
        assert_eq!(record.published_at, NaiveDate::from_ymd_opt(2023, 5, 12));
        assert_eq!(record.product_number.as_deref(), Some("abc001"));

        let product = record.into_product();
        let Product::Film(film) = &product else {
            panic!("expected a film, got {product:?}");
        };
        assert_eq!(film.id(), Some("ABC-001"));
        assert_eq!(film.director(), None);
        assert!(film.actors().is_empty());
    }

    #[test]
    fn test_cell_fallback() {
        let html = r#"
            <h1>作品</h1>
            <table class="mg-b20">
              <tr><td>情報</td><td>x</td><td>レーベル</td><td>レーベルB</td></tr>
            </table>
        "#;
        let record = scrape(&Document::parse(URL, html)).unwrap();
        assert_eq!(record.label.as_deref(), Some("レーベルB"));
        assert_eq!(record.published_at, None);
    }

    #[test]
    fn test_empty_title_is_none() {
        let html = HTML.replace("OVA 作品名 ＃1【期間限定】", "【期間限定】");
        assert!(scrape(&Document::parse(URL, &html)).is_none());
    }

    #[test]
    fn test_missing_table_is_none() {
        let html = HTML.replace("text-xs shrink", "other");
        assert!(scrape(&Document::parse(URL, &html)).is_none());
    }
}
