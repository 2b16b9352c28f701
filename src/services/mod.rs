//! Service layer.
//!
//! - Scrapbox project search (`ScrapboxClient`)
//! - Create-page and search URL builders

mod scrapbox;

pub use scrapbox::{ScrapboxClient, create_page_url, search_url};
