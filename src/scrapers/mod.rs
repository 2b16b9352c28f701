// src/scrapers/mod.rs

//! Per-site scrapers.
//!
//! Each site module exposes `scrape(&Document) -> Option<Record>`: a plain
//! serializable record of what the page shows, with `into_product` deciding
//! which [`Product`] variant it becomes. [`SiteRoute`] picks the module for
//! a page URL.

pub mod amazon;
pub mod bookwalker;
pub mod cart;
pub mod dlsite;
pub mod dlsite_books;
pub mod dlsite_maniax;
pub mod dom;
pub mod fanza_anime;
pub mod fanza_books;
pub mod fanza_doujin;
pub mod fanza_video;
pub mod fc2;
pub mod melonbooks;
pub mod surugaya;
pub mod toranoana;

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use url::Url;

use crate::models::Product;

pub use cart::{CartItem, CartKind};
pub use dom::Document;

static BOOKWALKER_PRODUCT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^/[0-9a-z]{10}(-[0-9a-f]{4}){3}-[0-9a-f]{12}(/|$)").expect("bookwalker path regex")
});

/// Which scraper handles a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SiteRoute {
    FanzaBooks,
    FanzaDoujin,
    FanzaVideo,
    FanzaAnime,
    DmmBasket,
    Fc2,
    Dlsite,
    DlsiteBooks,
    DlsiteManiax,
    DlsiteCart,
    Amazon,
    BookWalker,
    Melonbooks,
    Surugaya,
    Toranoana,
}

fn host_is(host: &str, domain: &str) -> bool {
    host == domain || host.ends_with(&format!(".{domain}"))
}

impl SiteRoute {
    /// Route a page URL. `None` for unsupported sites and pages.
    pub fn detect(url: &str) -> Option<SiteRoute> {
        let parsed = Url::parse(url).ok()?;
        let host = parsed.host_str()?.to_lowercase();
        let path = parsed.path();

        let route = match host.as_str() {
            "book.dmm.co.jp" => SiteRoute::FanzaBooks,
            "video.dmm.co.jp" if path.starts_with("/anime/") => SiteRoute::FanzaAnime,
            "video.dmm.co.jp" => SiteRoute::FanzaVideo,
            "www.dmm.co.jp" if path.starts_with("/dc/doujin/") => {
                if path.contains("/basket") {
                    SiteRoute::DmmBasket
                } else {
                    SiteRoute::FanzaDoujin
                }
            }
            "adult.contents.fc2.com" => SiteRoute::Fc2,
            h if host_is(h, "dlsite.com") => {
                if path.split('/').any(|segment| segment == "cart") {
                    SiteRoute::DlsiteCart
                } else if path.starts_with("/books/") {
                    SiteRoute::DlsiteBooks
                } else if path.starts_with("/maniax/") {
                    SiteRoute::DlsiteManiax
                } else {
                    SiteRoute::Dlsite
                }
            }
            h if host_is(h, "amazon.co.jp") => SiteRoute::Amazon,
            h if host_is(h, "bookwalker.jp") && BOOKWALKER_PRODUCT.is_match(path) => {
                SiteRoute::BookWalker
            }
            h if host_is(h, "melonbooks.co.jp") => SiteRoute::Melonbooks,
            h if host_is(h, "suruga-ya.jp") => SiteRoute::Surugaya,
            h if host_is(h, "toranoana.jp") => SiteRoute::Toranoana,
            _ => return None,
        };
        Some(route)
    }

    /// Cart pages list many products instead of one.
    pub fn is_cart(&self) -> bool {
        matches!(self, SiteRoute::DmmBasket | SiteRoute::DlsiteCart)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SiteRoute::FanzaBooks => "fanza-books",
            SiteRoute::FanzaDoujin => "fanza-doujin",
            SiteRoute::FanzaVideo => "fanza-video",
            SiteRoute::FanzaAnime => "fanza-anime",
            SiteRoute::DmmBasket => "dmm-basket",
            SiteRoute::Fc2 => "fc2",
            SiteRoute::Dlsite => "dlsite",
            SiteRoute::DlsiteBooks => "dlsite-books",
            SiteRoute::DlsiteManiax => "dlsite-maniax",
            SiteRoute::DlsiteCart => "dlsite-cart",
            SiteRoute::Amazon => "amazon",
            SiteRoute::BookWalker => "bookwalker",
            SiteRoute::Melonbooks => "melonbooks",
            SiteRoute::Surugaya => "surugaya",
            SiteRoute::Toranoana => "toranoana",
        }
    }
}

impl fmt::Display for SiteRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a product page scraper extracted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "site", rename_all = "snake_case")]
pub enum ScrapedRecord {
    Amazon(amazon::AmazonRecord),
    BookWalker(bookwalker::BookWalkerRecord),
    Dlsite(dlsite::DlsiteRecord),
    DlsiteBooks(dlsite_books::DlsiteBooksRecord),
    DlsiteManiax(dlsite_maniax::DlsiteManiaxRecord),
    FanzaAnime(fanza_anime::FanzaAnimeRecord),
    FanzaBooks(fanza_books::FanzaBooksRecord),
    FanzaDoujin(fanza_doujin::FanzaDoujinRecord),
    FanzaVideo(fanza_video::FanzaVideoRecord),
    Fc2(fc2::Fc2Record),
    Melonbooks(melonbooks::MelonbooksRecord),
    Surugaya(surugaya::SurugayaRecord),
    Toranoana(toranoana::ToranoanaRecord),
}

impl ScrapedRecord {
    pub fn into_product(self) -> Product {
        match self {
            ScrapedRecord::Amazon(r) => r.into_product(),
            ScrapedRecord::BookWalker(r) => r.into_product(),
            ScrapedRecord::Dlsite(r) => r.into_product(),
            ScrapedRecord::DlsiteBooks(r) => r.into_product(),
            ScrapedRecord::DlsiteManiax(r) => r.into_product(),
            ScrapedRecord::FanzaAnime(r) => r.into_product(),
            ScrapedRecord::FanzaBooks(r) => r.into_product(),
            ScrapedRecord::FanzaDoujin(r) => r.into_product(),
            ScrapedRecord::FanzaVideo(r) => r.into_product(),
            ScrapedRecord::Fc2(r) => r.into_product(),
            ScrapedRecord::Melonbooks(r) => r.into_product(),
            ScrapedRecord::Surugaya(r) => r.into_product(),
            ScrapedRecord::Toranoana(r) => r.into_product(),
        }
    }
}

/// Run the product page scraper for `route`. Cart routes yield `None`; use
/// [`scrape_cart`] for those.
pub fn scrape(route: SiteRoute, doc: &Document) -> Option<ScrapedRecord> {
    let record = match route {
        SiteRoute::Amazon => ScrapedRecord::Amazon(amazon::scrape(doc)?),
        SiteRoute::BookWalker => ScrapedRecord::BookWalker(bookwalker::scrape(doc)?),
        SiteRoute::Dlsite => ScrapedRecord::Dlsite(dlsite::scrape(doc)?),
        SiteRoute::DlsiteBooks => ScrapedRecord::DlsiteBooks(dlsite_books::scrape(doc)?),
        SiteRoute::DlsiteManiax => ScrapedRecord::DlsiteManiax(dlsite_maniax::scrape(doc)?),
        SiteRoute::FanzaAnime => ScrapedRecord::FanzaAnime(fanza_anime::scrape(doc)?),
        SiteRoute::FanzaBooks => ScrapedRecord::FanzaBooks(fanza_books::scrape(doc)?),
        SiteRoute::FanzaDoujin => ScrapedRecord::FanzaDoujin(fanza_doujin::scrape(doc)?),
        SiteRoute::FanzaVideo => ScrapedRecord::FanzaVideo(fanza_video::scrape(doc)?),
        SiteRoute::Fc2 => ScrapedRecord::Fc2(fc2::scrape(doc)?),
        SiteRoute::Melonbooks => ScrapedRecord::Melonbooks(melonbooks::scrape(doc)?),
        SiteRoute::Surugaya => ScrapedRecord::Surugaya(surugaya::scrape(doc)?),
        SiteRoute::Toranoana => ScrapedRecord::Toranoana(toranoana::scrape(doc)?),
        SiteRoute::DmmBasket | SiteRoute::DlsiteCart => return None,
    };
    Some(record)
}

/// Items of a cart page. Empty for product page routes.
pub fn scrape_cart(route: SiteRoute, doc: &Document) -> Vec<CartItem> {
    match route {
        SiteRoute::DmmBasket => cart::scrape_dmm_basket(doc),
        SiteRoute::DlsiteCart => cart::scrape_dlsite_cart(doc),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ProductType, Service};

    #[test]
    fn test_detect_known_pages() {
        let cases = [
            ("https://book.dmm.co.jp/product/4425627/b425aakkg00576/", SiteRoute::FanzaBooks),
            ("https://video.dmm.co.jp/anime/content/?id=196glod00333", SiteRoute::FanzaAnime),
            ("https://video.dmm.co.jp/av/content/?id=apns00240", SiteRoute::FanzaVideo),
            ("https://www.dmm.co.jp/dc/doujin/-/detail/=/cid=d_335698/", SiteRoute::FanzaDoujin),
            ("https://www.dmm.co.jp/dc/doujin/-/basket/", SiteRoute::DmmBasket),
            ("https://adult.contents.fc2.com/article/4762382/", SiteRoute::Fc2),
            ("https://www.dlsite.com/books/work/=/product_id/BJ02112599.html", SiteRoute::DlsiteBooks),
            ("https://www.dlsite.com/maniax/work/=/product_id/RJ01341329.html", SiteRoute::DlsiteManiax),
            ("https://www.dlsite.com/maniax/cart", SiteRoute::DlsiteCart),
            ("https://www.dlsite.com/home/work/=/product_id/RJ01.html", SiteRoute::Dlsite),
            ("https://www.amazon.co.jp/dp/4758069778/", SiteRoute::Amazon),
            ("https://bookwalker.jp/defb2e0181-c515-4443-9039-11b07c68a30b/", SiteRoute::BookWalker),
            ("https://www.melonbooks.co.jp/detail/detail.php?product_id=3193504", SiteRoute::Melonbooks),
            ("https://www.suruga-ya.jp/product/detail/ZHORE232364", SiteRoute::Surugaya),
            ("https://ec.toranoana.jp/tora_r/ec/item/040031259959/", SiteRoute::Toranoana),
        ];
        for (url, expected) in cases {
            assert_eq!(SiteRoute::detect(url), Some(expected), "{url}");
        }
    }

    #[test]
    fn test_detect_unsupported_pages() {
        assert_eq!(SiteRoute::detect("https://bookwalker.jp/series/12345/"), None);
        assert_eq!(SiteRoute::detect("https://www.dmm.co.jp/digital/"), None);
        assert_eq!(SiteRoute::detect("https://example.com/"), None);
        assert_eq!(SiteRoute::detect("not a url"), None);
    }

    #[test]
    fn test_cart_routes() {
        assert!(SiteRoute::DmmBasket.is_cart());
        assert!(SiteRoute::DlsiteCart.is_cart());
        assert!(!SiteRoute::Amazon.is_cart());

        let doc = Document::parse("https://www.dlsite.com/maniax/cart", "<p></p>");
        assert!(scrape(SiteRoute::DlsiteCart, &doc).is_none());
        assert!(scrape_cart(SiteRoute::Amazon, &doc).is_empty());
    }

    #[test]
    fn test_scrape_dispatches_to_site() {
        let html = r#"
            <div id="top"><div class="items_article_left"><section class="items_article_header">
              <div><section><div class="items_article_headerInfo"><h3>作品</h3></div></section></div>
            </section></div></div>
        "#;
        let url = "https://adult.contents.fc2.com/article/42/";
        let route = SiteRoute::detect(url).unwrap();
        let record = scrape(route, &Document::parse(url, html)).unwrap();
        assert!(matches!(record, ScrapedRecord::Fc2(_)));

        let product = record.into_product();
        assert_eq!(product.product_type(), ProductType::Film);
        assert_eq!(product.service(), Service::Fc2ContentMarket);
    }
}
