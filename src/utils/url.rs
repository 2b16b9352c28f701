// src/utils/url.rs

//! URL manipulation utilities.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::error::Result;

static PROJECT_IN_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"scrapbox\.io/([^/?]+)").expect("project url regex"));

/// Reduce whatever the user typed to a bare Scrapbox project name.
///
/// # Examples
/// ```
/// use unibar::utils::url::normalize_project_name;
///
/// assert_eq!(normalize_project_name("https://scrapbox.io/my-books/"), "my-books");
/// assert_eq!(normalize_project_name(" my-books/ "), "my-books");
/// ```
pub fn normalize_project_name(input: &str) -> String {
    let trimmed = input.trim();
    let name = PROJECT_IN_URL
        .captures(trimmed)
        .and_then(|caps| caps.get(1))
        .map_or(trimmed, |m| m.as_str());
    name.strip_suffix('/').unwrap_or(name).trim().to_string()
}

/// Resolve a potentially relative URL against a base URL.
///
/// Falls back to `href` as given when either side cannot be parsed.
pub fn resolve(base: &str, href: &str) -> String {
    Url::parse(base)
        .and_then(|base| base.join(href))
        .map(|u| u.to_string())
        .unwrap_or_else(|_| href.to_string())
}

/// `{base}/{project}/{title}` with the title percent-encoded as one segment.
pub fn page_url(base: &str, project: &str, title: &str) -> Result<Url> {
    let mut url = Url::parse(base)?;
    url.path_segments_mut()
        .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
        .pop_if_empty()
        .push(project)
        .push(title);
    Ok(url)
}
