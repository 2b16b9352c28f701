//! Pipeline entry points.
//!
//! - `run_check`: Scrape one product page and look it up in the wiki
//! - `run_cart`: Look up every item of a cart page

pub mod cart;
pub mod check;

pub use cart::{CartCheck, CartOutcome, check_items, run_cart};
pub use check::{CheckReport, check_product, load_document, project_name, run_check, scrape_product};
