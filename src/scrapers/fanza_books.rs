//! FANZA books (commercial comics).

use chrono::NaiveDate;
use serde::Serialize;

use super::dom::{Document, link_or_span_text, names_in, select_all, text_of};
use crate::models::{Book, Product, ProductBase, Service};
use crate::utils::date::{parse_date, parse_release_date};
use crate::utils::text::non_empty;

const CONTAINER_SELECTORS: &[&str] = &[".css-1omcat5", "dl"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FanzaBooksRecord {
    pub url: String,
    pub title: String,
    pub authors: Vec<String>,
    pub label: Option<String>,
    pub publisher: Option<String>,
    pub published_at: Option<NaiveDate>,
}

impl FanzaBooksRecord {
    pub fn into_product(self) -> Product {
        let base = ProductBase::new(
            Service::Fanza,
            &self.title,
            self.authors,
            self.url,
            self.published_at,
        );
        Book::make(base, self.publisher, self.label).into()
    }
}

/// Scrape a FANZA books page. `None` without a series name.
pub fn scrape(doc: &Document) -> Option<FanzaBooksRecord> {
    let container = doc.first_match(CONTAINER_SELECTORS, false)?;
    let terms = select_all(container, "dt");
    let definitions = select_all(container, "dd");

    let mut record = FanzaBooksRecord {
        url: doc.url().to_string(),
        title: String::new(),
        authors: Vec::new(),
        label: None,
        publisher: None,
        published_at: None,
    };

    // Terms and definitions pair up by position.
    for (dt, dd) in terms.into_iter().zip(definitions) {
        let value = link_or_span_text(dd);
        match text_of(dt).as_str() {
            "シリーズ名" => record.title = value,
            "作家" => record.authors = names_in(dd, &[',']),
            "掲載誌・レーベル" => record.label = non_empty(&value),
            "出版社" => record.publisher = non_empty(&value),
            "配信開始日" => record.published_at = parse_release_date("FANZA books", &value, parse_date),
            _ => {}
        }
    }

    if record.title.is_empty() {
        log::debug!("No series name on {}", doc.url());
        return None;
    }
    Some(record)
}
