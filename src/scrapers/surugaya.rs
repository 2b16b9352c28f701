//! Suruga-ya item pages.

use chrono::NaiveDate;
use serde::Serialize;

use super::dom::{Document, select_all, text_of};
use crate::models::{Doujinshi, Product, ProductBase, Service};
use crate::utils::date::{parse_date, parse_release_date};
use crate::utils::text::non_empty;

const TITLE: &str = "#item_title";
const DETAIL_TABLE: &str = "#item_detailInfo > div:nth-child(1) > table";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SurugayaRecord {
    pub url: String,
    pub title: String,
    pub authors: Vec<String>,
    pub publisher: Option<String>,
    pub published_at: Option<NaiveDate>,
}

impl SurugayaRecord {
    /// Suruga-ya's publisher is the circle for doujin items.
    pub fn into_product(self) -> Product {
        let base = ProductBase::new(
            Service::Surugaya,
            &self.title,
            self.authors,
            self.url,
            self.published_at,
        );
        Doujinshi::make(base, self.publisher, None).into()
    }
}

/// Scrape a Suruga-ya item page. Title and detail table are required.
pub fn scrape(doc: &Document) -> Option<SurugayaRecord> {
    let title = text_of(doc.select_first(TITLE)?);
    let table = doc.select_first(DETAIL_TABLE)?;

    let mut record = SurugayaRecord {
        url: doc.url().to_string(),
        title,
        authors: Vec::new(),
        publisher: None,
        published_at: None,
    };

    // A row holds several header/value pairs; headers and cells pair by index.
    for row in select_all(table, "tr") {
        let cells = select_all(row, "td");
        for (index, th) in select_all(row, "th.text-right").into_iter().enumerate() {
            let value = cells.get(index).map(|td| text_of(*td)).unwrap_or_default();
            match text_of(th).as_str() {
                "画" => record.authors.extend(non_empty(&value)),
                "出版社" => record.publisher = non_empty(&value),
                "発売日" => record.published_at = parse_release_date("Surugaya", &value, parse_date),
                _ => {}
            }
        }
    }

    Some(record)
}
