//! DLsite work pages outside the books and maniax floors.
//!
//! Also home to the table helpers the other DLsite scrapers share.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use scraper::ElementRef;
use serde::Serialize;

use super::dom::{Document, row_text, text_of};
use crate::models::{Asmr, AsmrCredits, Doujinshi, Product, ProductBase, Service};
use crate::utils::date::{parse_japanese_date, parse_release_date};
use crate::utils::text::{dedup_preserving_order, first_line, non_empty, split_names};

static FOLLOW_BUTTON: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*フォローする.*$").expect("follow button regex"));
static FOLLOWER_COUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+\d+.*$").expect("follower count regex"));

const CREDIT_SEPARATORS: &[char] = &[',', '、', '・'];

/// The maker table (`#work_maker`) and the outline table (`#work_outline`).
pub(crate) struct WorkTables<'a> {
    pub maker: Option<ElementRef<'a>>,
    pub outline: Option<ElementRef<'a>>,
}

impl<'a> WorkTables<'a> {
    pub fn find(doc: &'a Document) -> Self {
        Self {
            maker: doc.select_first("#work_maker"),
            outline: doc.select_first("#work_outline"),
        }
    }

    pub fn maker_text(&self, label: &str) -> Option<String> {
        self.maker.and_then(|table| row_text(table, label))
    }

    pub fn outline_text(&self, label: &str) -> Option<String> {
        self.outline.and_then(|table| row_text(table, label))
    }
}

/// Circle cell text without the follow button and follower count.
pub(crate) fn clean_circle_name(raw: &str) -> String {
    let line = first_line(raw);
    let line = FOLLOW_BUTTON.replace(line, "");
    FOLLOWER_COUNT.replace(&line, "").trim().to_string()
}

/// `販売日` cell, logging when it is present but unreadable.
pub(crate) fn release_date(tables: &WorkTables<'_>) -> Option<NaiveDate> {
    let text = tables.outline_text("販売日")?;
    parse_release_date("DLsite", &text, parse_japanese_date)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DlsiteRecord {
    pub url: String,
    pub title: String,
    pub authors: Vec<String>,
    pub voice_actors: Vec<String>,
    pub illustrators: Vec<String>,
    pub writers: Vec<String>,
    pub circle_name: Option<String>,
    pub event_name: Option<String>,
    pub published_at: Option<NaiveDate>,
}

impl DlsiteRecord {
    /// A voice work when voice actors are credited, otherwise a doujinshi.
    pub fn into_product(self) -> Product {
        let base = ProductBase::new(
            Service::Dlsite,
            &self.title,
            self.authors,
            self.url,
            self.published_at,
        );
        if self.voice_actors.is_empty() {
            return Doujinshi::make(base, self.circle_name, self.event_name).into();
        }
        Asmr::make(
            base,
            self.circle_name,
            self.event_name,
            AsmrCredits {
                illustrators: Some(self.illustrators),
                voice_actors: Some(self.voice_actors),
                writers: Some(self.writers),
            },
        )
        .into()
    }
}

/// Scrape a DLsite work page. Both tables are optional here.
pub fn scrape(doc: &Document) -> Option<DlsiteRecord> {
    let title = text_of(doc.select_first("#work_name")?);
    let tables = WorkTables::find(doc);

    let credits = |label: &str| {
        tables
            .maker_text(label)
            .map(|text| split_names(&text, CREDIT_SEPARATORS))
            .unwrap_or_default()
    };
    let voice_actors = credits("声優");
    let illustrators = credits("イラスト");
    let writers = credits("シナリオ");

    let authors = dedup_preserving_order(illustrators.iter().chain(&writers).cloned().collect());

    Some(DlsiteRecord {
        url: doc.url().to_string(),
        title,
        authors,
        voice_actors,
        illustrators,
        writers,
        circle_name: tables
            .maker_text("サークル名")
            .and_then(|raw| non_empty(&clean_circle_name(&raw))),
        event_name: tables.outline_text("イベント"),
        published_at: release_date(&tables),
    })
}
