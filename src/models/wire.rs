// src/models/wire.rs

//! Plain serializable form of a [`Product`].
//!
//! Products cross a process boundary as JSON with underscore-prefixed field
//! names and a `_variant` tag. Records without the tag are still accepted and
//! dispatched on their service.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{AppError, Result};
use crate::models::product::{Asmr, AsmrCredits, Book, Doujinshi, Film, ProductBase};
use crate::models::{Product, Service};
use crate::utils::date::parse_iso_date;

/// Fields shared by every wire record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireBase {
    #[serde(rename = "_service")]
    pub service: Service,
    #[serde(rename = "_title")]
    pub title: String,
    #[serde(rename = "_authors", default, deserialize_with = "nullable_list")]
    pub authors: Vec<String>,
    #[serde(rename = "_url", default)]
    pub url: String,
    #[serde(rename = "_publishedAt", default, deserialize_with = "lenient_date")]
    pub published_at: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireBook {
    #[serde(flatten)]
    pub base: WireBase,
    #[serde(rename = "_publisher", default)]
    pub publisher: Option<String>,
    #[serde(rename = "_label", default)]
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireDoujinshi {
    #[serde(flatten)]
    pub base: WireBase,
    #[serde(rename = "_circleName", default)]
    pub circle_name: Option<String>,
    #[serde(rename = "_eventName", default)]
    pub event_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireAsmr {
    #[serde(flatten)]
    pub base: WireBase,
    #[serde(rename = "_circleName", default)]
    pub circle_name: Option<String>,
    #[serde(rename = "_eventName", default)]
    pub event_name: Option<String>,
    #[serde(rename = "_illustrators", default)]
    pub illustrators: Option<Vec<String>>,
    #[serde(rename = "_voiceActors", default)]
    pub voice_actors: Option<Vec<String>>,
    #[serde(rename = "_writers", default)]
    pub writers: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireFilm {
    #[serde(flatten)]
    pub base: WireBase,
    #[serde(rename = "_director", default)]
    pub director: Option<String>,
    #[serde(rename = "_label", default)]
    pub label: Option<String>,
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
}

/// Tagged wire record, one arm per product variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "_variant", rename_all = "lowercase")]
pub enum WireProduct {
    Book(WireBook),
    Doujinshi(WireDoujinshi),
    Asmr(WireAsmr),
    Film(WireFilm),
    Generic(WireBase),
}

fn nullable_list<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts `null`, a plain date, or a timestamp whose first ten characters
/// are the date. Anything else is treated as absent.
fn lenient_date<'de, D>(deserializer: D) -> std::result::Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_iso_date))
}

impl From<&ProductBase> for WireBase {
    fn from(base: &ProductBase) -> Self {
        Self {
            service: base.service(),
            title: base.title().to_string(),
            authors: base.authors().to_vec(),
            url: base.url().to_string(),
            published_at: base.published_at(),
        }
    }
}

impl From<WireBase> for ProductBase {
    fn from(wire: WireBase) -> Self {
        ProductBase::new(
            wire.service,
            &wire.title,
            wire.authors,
            wire.url,
            wire.published_at,
        )
    }
}

impl Product {
    /// Convert to the tagged wire record.
    pub fn to_wire(&self) -> WireProduct {
        match self {
            Product::Book(book) => WireProduct::Book(WireBook {
                base: self.base().into(),
                publisher: book.publisher().map(str::to_string),
                label: book.label().map(str::to_string),
            }),
            Product::Doujinshi(doujinshi) => WireProduct::Doujinshi(WireDoujinshi {
                base: self.base().into(),
                circle_name: doujinshi.circle_name().map(str::to_string),
                event_name: doujinshi.event_name().map(str::to_string),
            }),
            Product::Asmr(asmr) => WireProduct::Asmr(WireAsmr {
                base: self.base().into(),
                circle_name: asmr.circle_name().map(str::to_string),
                event_name: asmr.event_name().map(str::to_string),
                illustrators: asmr.credits().illustrators.clone(),
                voice_actors: asmr.credits().voice_actors.clone(),
                writers: asmr.credits().writers.clone(),
            }),
            Product::Film(film) => WireProduct::Film(WireFilm {
                base: self.base().into(),
                director: film.director().map(str::to_string),
                label: film.label().map(str::to_string),
                id: film.id().map(str::to_string),
            }),
            Product::Generic(base) => WireProduct::Generic(base.into()),
        }
    }

    /// Rebuild a product from its wire record.
    pub fn from_wire(wire: WireProduct) -> Product {
        match wire {
            WireProduct::Book(w) => Book::make(w.base.into(), w.publisher, w.label).into(),
            WireProduct::Doujinshi(w) => {
                Doujinshi::make(w.base.into(), w.circle_name, w.event_name).into()
            }
            WireProduct::Asmr(w) => Asmr::make(
                w.base.into(),
                w.circle_name,
                w.event_name,
                AsmrCredits {
                    illustrators: w.illustrators,
                    voice_actors: w.voice_actors,
                    writers: w.writers,
                },
            )
            .into(),
            WireProduct::Film(w) => Film::make(w.base.into(), w.director, w.label, w.id).into(),
            WireProduct::Generic(base) => Product::Generic(base.into()),
        }
    }

    /// Serialize to the JSON sent across the boundary.
    pub fn to_wire_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_wire())?)
    }

    /// Revive a product from a JSON message.
    ///
    /// Tagged records are decoded directly. Untagged records are dispatched on
    /// `_service`: book services become a book, video services a film, and
    /// everything else a doujinshi.
    pub fn from_listener_request(json: &str) -> Result<Product> {
        let value: Value = serde_json::from_str(json)?;
        let object = value
            .as_object()
            .ok_or_else(|| AppError::revival("product record is not an object"))?;

        if object.contains_key("_variant") {
            let wire: WireProduct = serde_json::from_value(value)?;
            return Ok(Product::from_wire(wire));
        }

        let service = object
            .get("_service")
            .and_then(Value::as_str)
            .ok_or_else(|| AppError::revival("product record has no _service"))?
            .parse::<Service>()
            .map_err(|e| AppError::revival(e.to_string()))?;

        log::debug!("Reviving untagged record for {service}");
        let wire = if service.is_book() {
            WireProduct::Book(serde_json::from_value(value)?)
        } else if service.is_video() {
            WireProduct::Film(serde_json::from_value(value)?)
        } else {
            WireProduct::Doujinshi(serde_json::from_value(value)?)
        };
        Ok(Product::from_wire(wire))
    }
}
