//! DLsite books floor (commercial comics and novels).

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;

use super::dlsite::{WorkTables, release_date};
use super::dom::{Document, link_text, row_value, text_of};
use crate::models::{Book, Product, ProductBase, Service};
use crate::utils::text::{first_line, non_empty, split_names};

static LENTICULAR_GROUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"【.*?】").expect("lenticular bracket regex"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DlsiteBooksRecord {
    pub url: String,
    pub title: String,
    pub authors: Vec<String>,
    pub label: Option<String>,
    pub publisher: Option<String>,
    pub published_at: Option<NaiveDate>,
}

impl DlsiteBooksRecord {
    pub fn into_product(self) -> Product {
        let base = ProductBase::new(
            Service::Dlsite,
            &self.title,
            self.authors,
            self.url,
            self.published_at,
        );
        Book::make(base, self.publisher, self.label).into()
    }
}

/// Scrape a DLsite books page. Both work tables are required.
pub fn scrape(doc: &Document) -> Option<DlsiteBooksRecord> {
    let heading = doc.select_first("#work_name")?;
    let title = LENTICULAR_GROUP
        .replace_all(&text_of(heading), "")
        .trim()
        .to_string();

    let tables = WorkTables::find(doc);
    let maker = tables.maker?;
    tables.outline?;

    // The publisher cell also holds a follow button.
    let publisher = row_value(maker, "出版社名").and_then(|cell| {
        let text = text_of(cell);
        non_empty(first_line(&text))
    });

    Some(DlsiteBooksRecord {
        url: doc.url().to_string(),
        title,
        authors: tables
            .maker_text("著者")
            .map(|text| split_names(&text, &['/']))
            .unwrap_or_default(),
        label: row_value(maker, "レーベル").and_then(|cell| non_empty(&link_text(cell))),
        publisher,
        published_at: release_date(&tables),
    })
}
