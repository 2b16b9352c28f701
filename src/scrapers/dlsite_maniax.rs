//! DLsite maniax floor (adult doujin works and voice works).

use chrono::NaiveDate;
use serde::Serialize;

use super::dlsite::{WorkTables, clean_circle_name, release_date};
use super::dom::{Document, text_of};
use crate::models::{Asmr, AsmrCredits, Doujinshi, Product, ProductBase, Service};
use crate::utils::text::{non_empty, split_names};

/// Work format that marks a voice work.
pub const VOICE_WORK_FORMAT: &str = "ボイス・ASMR";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DlsiteManiaxRecord {
    pub url: String,
    pub title: String,
    pub work_format: String,
    pub authors: Vec<String>,
    pub voice_actors: Vec<String>,
    pub illustrators: Vec<String>,
    pub writers: Vec<String>,
    pub circle_name: Option<String>,
    pub event_name: Option<String>,
    pub published_at: Option<NaiveDate>,
}

impl DlsiteManiaxRecord {
    pub fn into_product(self) -> Product {
        let base = ProductBase::new(
            Service::DlsiteManiax,
            &self.title,
            self.authors,
            self.url,
            self.published_at,
        );
        if self.work_format != VOICE_WORK_FORMAT {
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

/// Scrape a DLsite maniax page. Both work tables are required.
pub fn scrape(doc: &Document) -> Option<DlsiteManiaxRecord> {
    let title = text_of(doc.select_first("#work_name")?);
    let tables = WorkTables::find(doc);
    tables.maker?;
    tables.outline?;

    let names = |label: &str| {
        tables
            .outline_text(label)
            .map(|text| split_names(&text, &['/']))
            .unwrap_or_default()
    };

    Some(DlsiteManiaxRecord {
        url: doc.url().to_string(),
        title,
        work_format: tables.outline_text("作品形式").unwrap_or_default(),
        authors: names("作者"),
        voice_actors: names("声優"),
        illustrators: names("イラスト"),
        writers: names("シナリオ"),
        circle_name: tables
            .maker_text("サークル名")
            .and_then(|raw| non_empty(&clean_circle_name(&raw))),
        event_name: tables.outline_text("イベント"),
        published_at: release_date(&tables),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://www.dlsite.com/maniax/work/=/product_id/RJ000002.html";

    fn page(work_format: &str) -> String {
        format!(
            r#"
            <h1 id="work_name">【超加速オナサポ鉄道】快楽急行</h1>
            <table id="work_maker">
              <tr><th>サークル名</th><td>サークルB
                フォローする</td></tr>
            </table>
            <table id="work_outline">
              <tr><th>販売日</th><td>2023年01月02日</td></tr>
              <tr><th>作者</th><td>作者A / 作者B</td></tr>
              <tr><th>声優</th><td>声優A / 声優B /</td></tr>
              <tr><th>イラスト</th><td>絵師A</td></tr>
              <tr><th>作品形式</th><td>{work_format}</td></tr>
            </table>
            "#
        )
    }

    #[test]
    fn test_voice_work() {
        let record = scrape(&Document::parse(URL, &page("ボイス・ASMR"))).unwrap();
        assert_eq!(record.title, "【超加速オナサポ鉄道】快楽急行");
        assert_eq!(record.circle_name.as_deref(), Some("サークルB"));
        assert_eq!(record.authors, ["作者A", "作者B"]);
        assert_eq!(record.voice_actors, ["声優A", "声優B"]);
        assert!(record.writers.is_empty());
        assert_eq!(record.event_name, None);
        assert_eq!(record.published_at, NaiveDate::from_ymd_opt(2023, 1, 2));

        let product = record.into_product();
        let Product::Asmr(asmr) = &product else {
            panic!("expected a voice work, got {product:?}");
        };
        assert_eq!(asmr.illustrators().map(<[String]>::to_vec), Some(vec!["絵師A".to_string()]));
        assert_eq!(product.title_for_search(), "快楽急行");
    }

    #[test]
    fn test_other_formats_are_doujinshi() {
        let record = scrape(&Document::parse(URL, &page("マンガ"))).unwrap();
        assert!(matches!(record.into_product(), Product::Doujinshi(_)));
    }

    #[test]
    fn test_tables_are_required() {
        let html = page("マンガ").replace("work_maker", "other");
        assert!(scrape(&Document::parse(URL, &html)).is_none());
    }
}
