// src/lib.rs

//! unibar library
//!
//! Scrapes product pages of Japanese e-book, doujin and video shops into a
//! common [`models::Product`] model, derives the key used to search a
//! Scrapbox project for it, and renders the body of a new wiki page.

pub mod error;
pub mod format;
pub mod models;
pub mod pipeline;
pub mod scrapers;
pub mod services;
pub mod storage;
pub mod title;
pub mod utils;
