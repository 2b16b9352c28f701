// src/models/product.rs

//! Normalized product entities.
//!
//! Every scraped page ends up as one [`Product`]. The variants share a
//! common [`ProductBase`] and add the fields their catalog pages expose.

use std::borrow::Cow;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::Result;
use crate::format;
use crate::models::{ProductType, Service};
use crate::storage::FormatStore;
use crate::title::{title_for_search, to_half_width_alphanumeric};

/// Fields shared by every product variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductBase {
    service: Service,
    title: String,
    authors: Vec<String>,
    url: String,
    published_at: Option<NaiveDate>,
}

impl ProductBase {
    /// Build the shared fields. The title is stored with full-width Latin
    /// letters and digits folded to half-width.
    pub fn new(
        service: Service,
        title: &str,
        authors: Vec<String>,
        url: impl Into<String>,
        published_at: Option<NaiveDate>,
    ) -> Self {
        Self {
            service,
            title: to_half_width_alphanumeric(title),
            authors,
            url: url.into(),
            published_at,
        }
    }

    pub fn service(&self) -> Service {
        self.service
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn authors(&self) -> &[String] {
        &self.authors
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn published_at(&self) -> Option<NaiveDate> {
        self.published_at
    }
}

/// A book sold by a commercial publisher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Book {
    base: ProductBase,
    publisher: Option<String>,
    label: Option<String>,
}

impl Book {
    pub fn make(base: ProductBase, publisher: Option<String>, label: Option<String>) -> Self {
        Self {
            base,
            publisher,
            label,
        }
    }

    pub fn publisher(&self) -> Option<&str> {
        self.publisher.as_deref()
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

/// A self-published work sold through a doujin shop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Doujinshi {
    base: ProductBase,
    circle_name: Option<String>,
    event_name: Option<String>,
}

impl Doujinshi {
    pub fn make(base: ProductBase, circle_name: Option<String>, event_name: Option<String>) -> Self {
        Self {
            base,
            circle_name,
            event_name,
        }
    }

    pub fn circle_name(&self) -> Option<&str> {
        self.circle_name.as_deref()
    }

    pub fn event_name(&self) -> Option<&str> {
        self.event_name.as_deref()
    }
}

/// Credits listed on a voice work page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AsmrCredits {
    pub illustrators: Option<Vec<String>>,
    pub voice_actors: Option<Vec<String>>,
    pub writers: Option<Vec<String>>,
}

/// A voice work. Shares the circle fields of a doujinshi and adds credits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Asmr {
    base: ProductBase,
    circle_name: Option<String>,
    event_name: Option<String>,
    credits: AsmrCredits,
}

impl Asmr {
    pub fn make(
        base: ProductBase,
        circle_name: Option<String>,
        event_name: Option<String>,
        credits: AsmrCredits,
    ) -> Self {
        Self {
            base,
            circle_name,
            event_name,
            credits,
        }
    }

    pub fn circle_name(&self) -> Option<&str> {
        self.circle_name.as_deref()
    }

    pub fn event_name(&self) -> Option<&str> {
        self.event_name.as_deref()
    }

    pub fn illustrators(&self) -> Option<&[String]> {
        self.credits.illustrators.as_deref()
    }

    pub fn voice_actors(&self) -> Option<&[String]> {
        self.credits.voice_actors.as_deref()
    }

    pub fn writers(&self) -> Option<&[String]> {
        self.credits.writers.as_deref()
    }

    pub fn credits(&self) -> &AsmrCredits {
        &self.credits
    }
}

/// A video. The authors of the base are the performers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Film {
    base: ProductBase,
    director: Option<String>,
    label: Option<String>,
    id: Option<String>,
}

impl Film {
    pub fn make(
        base: ProductBase,
        director: Option<String>,
        label: Option<String>,
        id: Option<String>,
    ) -> Self {
        Self {
            base,
            director,
            label,
            id,
        }
    }

    pub fn actors(&self) -> &[String] {
        self.base.authors()
    }

    pub fn director(&self) -> Option<&str> {
        self.director.as_deref()
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

/// A normalized product scraped from one of the supported services.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Product {
    Book(Book),
    Doujinshi(Doujinshi),
    Asmr(Asmr),
    Film(Film),
    /// Cart entries and other pages that only expose the shared fields.
    Generic(ProductBase),
}

impl Product {
    /// Template key for this product. Generic products share the
    /// doujinshi templates.
    pub fn product_type(&self) -> ProductType {
        match self {
            Product::Book(_) => ProductType::Book,
            Product::Doujinshi(_) | Product::Generic(_) => ProductType::Doujinshi,
            Product::Asmr(_) => ProductType::Asmr,
            Product::Film(_) => ProductType::Film,
        }
    }

    pub fn base(&self) -> &ProductBase {
        match self {
            Product::Book(book) => &book.base,
            Product::Doujinshi(doujinshi) => &doujinshi.base,
            Product::Asmr(asmr) => &asmr.base,
            Product::Film(film) => &film.base,
            Product::Generic(base) => base,
        }
    }

    pub fn service(&self) -> Service {
        self.base().service()
    }

    pub fn title(&self) -> &str {
        self.base().title()
    }

    pub fn authors(&self) -> &[String] {
        self.base().authors()
    }

    pub fn url(&self) -> &str {
        self.base().url()
    }

    pub fn published_at(&self) -> Option<NaiveDate> {
        self.base().published_at()
    }

    /// Compact query used to look for existing pages about this product.
    pub fn title_for_search(&self) -> String {
        title_for_search(self.title())
    }

    /// Built-in template used when the user has not saved one for this type.
    pub fn default_scrapbox_format(&self) -> Cow<'static, str> {
        format::default_template(self)
    }

    /// Body of the Scrapbox page for this product.
    ///
    /// Reads the user's templates from `store` once. A missing template falls
    /// back to the built-in one; a failing store is reported, not masked.
    pub async fn create_scrapbox_body_string(&self, store: &dyn FormatStore) -> Result<String> {
        let formats = store.scrapbox_formats().await?;
        let custom = formats
            .as_ref()
            .and_then(|formats| formats.get(self.product_type()))
            .filter(|template| !template.is_empty());

        let template = match custom {
            Some(template) => Cow::Owned(template.to_string()),
            None => self.default_scrapbox_format(),
        };
        Ok(format::render(&template, self))
    }
}

impl From<Book> for Product {
    fn from(book: Book) -> Self {
        Product::Book(book)
    }
}

impl From<Doujinshi> for Product {
    fn from(doujinshi: Doujinshi) -> Self {
        Product::Doujinshi(doujinshi)
    }
}

impl From<Asmr> for Product {
    fn from(asmr: Asmr) -> Self {
        Product::Asmr(asmr)
    }
}

impl From<Film> for Product {
    fn from(film: Film) -> Self {
        Product::Film(film)
    }
}
