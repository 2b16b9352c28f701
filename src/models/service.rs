//! Source services and product types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// A catalog site a product can be scraped from.
///
/// The serialized form is the display name, which is also what ends up in
/// the `{service}` placeholder of a page body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Service {
    #[serde(rename = "FANZA")]
    Fanza,
    #[serde(rename = "FANZA（同人）")]
    FanzaDoujin,
    #[serde(rename = "FANZA（動画）")]
    FanzaVideo,
    #[serde(rename = "FANZA（アニメ）")]
    FanzaAnime,
    #[serde(rename = "DMM同人カート")]
    DmmDoujinBasket,
    #[serde(rename = "FC2コンテンツマーケット")]
    Fc2ContentMarket,
    #[serde(rename = "DLsite")]
    Dlsite,
    #[serde(rename = "DLsiteManiax")]
    DlsiteManiax,
    #[serde(rename = "Amazon")]
    Amazon,
    #[serde(rename = "駿河屋")]
    Surugaya,
    #[serde(rename = "とらのあな")]
    Toranoana,
    #[serde(rename = "メロンブックス")]
    Melonbooks,
    #[serde(rename = "Book Walker")]
    BookWalker,
}

impl Service {
    /// Every known service, in declaration order.
    pub const ALL: [Service; 13] = [
        Service::Fanza,
        Service::FanzaDoujin,
        Service::FanzaVideo,
        Service::FanzaAnime,
        Service::DmmDoujinBasket,
        Service::Fc2ContentMarket,
        Service::Dlsite,
        Service::DlsiteManiax,
        Service::Amazon,
        Service::Surugaya,
        Service::Toranoana,
        Service::Melonbooks,
        Service::BookWalker,
    ];

    /// Display name used in page bodies and on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Service::Fanza => "FANZA",
            Service::FanzaDoujin => "FANZA（同人）",
            Service::FanzaVideo => "FANZA（動画）",
            Service::FanzaAnime => "FANZA（アニメ）",
            Service::DmmDoujinBasket => "DMM同人カート",
            Service::Fc2ContentMarket => "FC2コンテンツマーケット",
            Service::Dlsite => "DLsite",
            Service::DlsiteManiax => "DLsiteManiax",
            Service::Amazon => "Amazon",
            Service::Surugaya => "駿河屋",
            Service::Toranoana => "とらのあな",
            Service::Melonbooks => "メロンブックス",
            Service::BookWalker => "Book Walker",
        }
    }

    /// Services whose products are books. Everything that is neither a book
    /// nor a video is treated as a doujinshi.
    pub fn is_book(&self) -> bool {
        matches!(
            self,
            Service::Fanza | Service::Dlsite | Service::Amazon | Service::BookWalker
        )
    }

    /// Services whose products are videos.
    pub fn is_video(&self) -> bool {
        matches!(
            self,
            Service::FanzaVideo | Service::FanzaAnime | Service::Fc2ContentMarket
        )
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Service {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        Service::ALL
            .iter()
            .copied()
            .find(|service| service.as_str() == s)
            .ok_or_else(|| AppError::validation(format!("Unknown service: {s}")))
    }
}

/// Kind of product, used as the key of the user's format templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductType {
    Book,
    Doujinshi,
    Film,
    Asmr,
}

impl ProductType {
    pub const ALL: [ProductType; 4] = [
        ProductType::Book,
        ProductType::Doujinshi,
        ProductType::Film,
        ProductType::Asmr,
    ];

    /// Key under which the template for this type is stored.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductType::Book => "book",
            ProductType::Doujinshi => "doujinshi",
            ProductType::Film => "film",
            ProductType::Asmr => "asmr",
        }
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        ProductType::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| AppError::validation(format!("Unknown product type: {s}")))
    }
}
