// src/models/mod.rs

//! Domain models for the unibar library.
//!
//! This module contains the product entities, their wire form, the
//! configuration and the Scrapbox search results.

mod config;
pub mod product;
mod search;
mod service;
pub mod wire;

// Re-export all public types
pub use config::{Config, HttpConfig, ScrapboxConfig, ScrapboxFormats};
pub use product::{Asmr, AsmrCredits, Book, Doujinshi, Film, Product, ProductBase};
pub use search::{CheckOutcome, ScrapboxPage, SearchResult};
pub(crate) use search::SearchResponse;
pub use service::{ProductType, Service};
pub use wire::WireProduct;
