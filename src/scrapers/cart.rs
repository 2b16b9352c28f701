//! Shopping cart listings: the DMM doujin basket and the DLsite cart.
//!
//! A cart page lists many works with little detail each. Every listed work
//! becomes one [`CartItem`] which is checked against the wiki on its own.

use scraper::ElementRef;
use serde::Serialize;

use super::dom::{Document, attr, select_first, text_of};
use crate::models::{Doujinshi, Product, ProductBase, Service};
use crate::utils::text::non_empty;
use crate::utils::url::resolve;

const DMM_ITEM: &str = "li.basket-listItem";
const DMM_TITLE: &str = "b.basket-name a";
const DMM_CIRCLE: &str = "p.basket-circle a";

const DLSITE_ITEM: &str = "li.cart_list_item";
const DLSITE_TITLE: &str = ".work_name > a";
const DLSITE_MAKER: &str = ".maker_name > a";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CartKind {
    DmmBasket,
    DlsiteCart,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartItem {
    pub kind: CartKind,
    pub url: String,
    pub title: String,
    /// Circle on DMM, maker on DLsite.
    pub maker: Option<String>,
}

impl CartItem {
    /// DMM basket entries are doujinshi; DLsite entries carry too little to
    /// tell, so they stay generic products with the maker as author.
    pub fn into_product(self) -> Product {
        match self.kind {
            CartKind::DmmBasket => {
                let base = ProductBase::new(
                    Service::DmmDoujinBasket,
                    &self.title,
                    Vec::new(),
                    self.url,
                    None,
                );
                Doujinshi::make(base, self.maker, None).into()
            }
            CartKind::DlsiteCart => Product::Generic(ProductBase::new(
                Service::Dlsite,
                &self.title,
                self.maker.into_iter().collect(),
                self.url,
                None,
            )),
        }
    }
}

fn scrape_items(
    doc: &Document,
    kind: CartKind,
    item_css: &str,
    title_css: &str,
    maker_css: &str,
) -> Vec<CartItem> {
    let items: Vec<CartItem> = doc
        .select_all(item_css)
        .into_iter()
        .filter_map(|item| cart_item(doc, item, kind, title_css, maker_css))
        .collect();
    log::debug!("{} cart items on {}", items.len(), doc.url());
    items
}

/// `None` for entries without a title.
fn cart_item(
    doc: &Document,
    item: ElementRef<'_>,
    kind: CartKind,
    title_css: &str,
    maker_css: &str,
) -> Option<CartItem> {
    let anchor = select_first(item, title_css)?;
    let title = non_empty(&text_of(anchor))?;
    let url = attr(anchor, "href")
        .filter(|href| !href.trim().is_empty())
        .map(|href| resolve(doc.url(), &href))
        .unwrap_or_else(|| doc.url().to_string());

    Some(CartItem {
        kind,
        url,
        title,
        maker: select_first(item, maker_css).and_then(|a| non_empty(&text_of(a))),
    })
}

pub fn scrape_dmm_basket(doc: &Document) -> Vec<CartItem> {
    scrape_items(doc, CartKind::DmmBasket, DMM_ITEM, DMM_TITLE, DMM_CIRCLE)
}

pub fn scrape_dlsite_cart(doc: &Document) -> Vec<CartItem> {
    scrape_items(doc, CartKind::DlsiteCart, DLSITE_ITEM, DLSITE_TITLE, DLSITE_MAKER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dmm_basket() {
        let html = r#"
            <ul>
              <li class="basket-listItem">
                <b class="basket-name"><a href="/dc/doujin/-/detail/=/cid=d_1/">作品Ａ１</a></b>
                <p class="basket-circle"><a>サークルA</a></p>
              </li>
              <li class="basket-listItem">
                <b class="basket-name"><a>作品B</a></b>
              </li>
              <li class="basket-listItem"><b class="basket-name"><a> </a></b></li>
            </ul>
        "#;
        let doc = Document::parse("https://www.dmm.co.jp/dc/doujin/-/basket/", html);
        let items = scrape_dmm_basket(&doc);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].url, "https://www.dmm.co.jp/dc/doujin/-/detail/=/cid=d_1/");
        assert_eq!(items[0].maker.as_deref(), Some("サークルA"));
        assert_eq!(items[1].url, "https://www.dmm.co.jp/dc/doujin/-/basket/");
        assert_eq!(items[1].maker, None);

        let product = items[0].clone().into_product();
        assert_eq!(product.service(), Service::DmmDoujinBasket);
        assert_eq!(product.title(), "作品A1");
        let Product::Doujinshi(doujinshi) = product else {
            panic!("expected a doujinshi");
        };
        assert_eq!(doujinshi.circle_name(), Some("サークルA"));
    }

    #[test]
    fn test_dlsite_cart() {
        let html = r#"
            <li class="cart_list_item">
              <dl>
                <dd class="work_name"><a href="https://www.dlsite.com/maniax/work/=/product_id/RJ01000001.html">作品D</a></dd>
                <dd class="maker_name"><a>メーカーD</a></dd>
              </dl>
            </li>
        "#;
        let doc = Document::parse("https://www.dlsite.com/maniax/cart", html);
        let items = scrape_dlsite_cart(&doc);
        assert_eq!(items.len(), 1);

        let product = items[0].clone().into_product();
        assert!(matches!(product, Product::Generic(_)));
        assert_eq!(product.service(), Service::Dlsite);
        assert_eq!(product.authors(), ["メーカーD"]);
    }

    #[test]
    fn test_empty_cart() {
        let doc = Document::parse("https://www.dlsite.com/maniax/cart", "<ul></ul>");
        assert!(scrape_dlsite_cart(&doc).is_empty());
        assert!(scrape_dmm_basket(&doc).is_empty());
    }
}
