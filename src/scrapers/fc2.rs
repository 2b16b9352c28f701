//! FC2 content market article pages.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;

use super::dom::{Document, text_of};
use crate::models::{Film, Product, ProductBase, Service};
use crate::utils::date::{parse_date, parse_release_date};
use crate::utils::text::non_empty;

const HEADER_INFO: &str = "#top > div.items_article_left > section.items_article_header > div > section > div.items_article_headerInfo";

static ANNOTATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"【[^】]*】").expect("annotation regex"));
static ARTICLE_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/article/(\d+)/").expect("article id regex"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fc2Record {
    pub url: String,
    pub title: String,
    pub director: Option<String>,
    pub published_at: Option<NaiveDate>,
    pub id: Option<String>,
}

impl Fc2Record {
    /// FC2 lists the seller as the director and has no labels.
    pub fn into_product(self) -> Product {
        let base = ProductBase::new(
            Service::Fc2ContentMarket,
            &self.title,
            Vec::new(),
            self.url,
            self.published_at,
        );
        Film::make(base, self.director, Some(String::new()), self.id).into()
    }
}

/// Numeric article id from an article URL.
pub fn article_id(url: &str) -> Option<String> {
    ARTICLE_ID.captures(url).map(|caps| caps[1].to_string())
}

/// Scrape an FC2 article page. `None` without the header title.
pub fn scrape(doc: &Document) -> Option<Fc2Record> {
    let heading = doc.select_first(&format!("{HEADER_INFO} > h3"))?;
    let title = ANNOTATION.replace_all(&text_of(heading), "").trim().to_string();

    let director = doc
        .select_first(&format!("{HEADER_INFO} > ul > li:nth-child(3) > a"))
        .and_then(|a| non_empty(&text_of(a)));

    let published_at = doc
        .select_first(&format!("{HEADER_INFO} > div:nth-child(5) > p"))
        .map(text_of)
        .and_then(|text| parse_release_date("FC2", &text, parse_date));

    Some(Fc2Record {
        url: doc.url().to_string(),
        title,
        director,
        published_at,
        id: article_id(doc.url()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://adult.contents.fc2.com/article/1234567/";

    const HTML: &str = r#"
        <div id="top">
          <div class="items_article_left">
            <section class="items_article_header">
              <div>
                <section>
                  <div class="items_article_headerInfo">
                    <h3>【個人撮影】作品名【特典付き】</h3>
                    <ul>
                      <li>カテゴリ</li>
                      <li>タグ</li>
                      <li>by <a href="/users/seller">販売者A</a></li>
                    </ul>
                    <div></div>
                    <div></div>
                    <div><p>販売日 : 2022/07/08</p></div>
                  </div>
                </section>
              </div>
            </section>
          </div>
        </div>
    "#;

    #[test]
    fn test_article_page() {
        let record = scrape(&Document::parse(URL, HTML)).unwrap();
        assert_eq!(record.title, "作品名");
        assert_eq!(record.director.as_deref(), Some("販売者A"));
        assert_eq!(record.published_at, NaiveDate::from_ymd_opt(2022, 7, 8));
        assert_eq!(record.id.as_deref(), Some("1234567"));

        let Product::Film(film) = record.into_product() else {
            panic!("expected a film");
        };
        assert_eq!(film.label(), Some(""));
    }

    #[test]
    fn test_article_id() {
        assert_eq!(article_id(URL).as_deref(), Some("1234567"));
        assert_eq!(article_id("https://adult.contents.fc2.com/users/x/"), None);
    }

    #[test]
    fn test_missing_heading_is_none() {
        let html = HTML.replace("<h3>", "<h4>").replace("</h3>", "</h4>");
        assert!(scrape(&Document::parse(URL, &html)).is_none());
    }
}
