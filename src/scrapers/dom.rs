// src/scrapers/dom.rs

//! DOM query helpers shared by the site scrapers.
//!
//! Catalog markup changes often, so most lookups take a list of candidate
//! selectors and every miss is logged at debug level. An invalid selector is
//! logged and treated as a miss.

use scraper::{ElementRef, Html, Selector};

use crate::error::AppError;

/// A parsed catalog page and the URL it was loaded from.
pub struct Document {
    url: String,
    html: Html,
}

impl Document {
    pub fn parse(url: impl Into<String>, html: &str) -> Self {
        Self {
            url: url.into(),
            html: Html::parse_document(html),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn root(&self) -> ElementRef<'_> {
        self.html.root_element()
    }

    pub fn select_first(&self, css: &str) -> Option<ElementRef<'_>> {
        select_first(self.root(), css)
    }

    pub fn select_all(&self, css: &str) -> Vec<ElementRef<'_>> {
        select_all(self.root(), css)
    }

    /// First element matched by any of `selectors`, tried in order.
    ///
    /// With `require_text` an element only counts when it has non-blank text.
    pub fn first_match(&self, selectors: &[&str], require_text: bool) -> Option<ElementRef<'_>> {
        for css in selectors {
            match self.select_first(css) {
                Some(el) if !require_text || !text_of(el).is_empty() => {
                    log::debug!("Matched {css} on {}", self.url);
                    return Some(el);
                }
                Some(_) => log::debug!("Selector {css} matched an empty element"),
                None => log::debug!("Selector {css} matched nothing"),
            }
        }
        None
    }

    /// Trimmed text of the first candidate that has any.
    pub fn first_text(&self, selectors: &[&str]) -> Option<String> {
        self.first_match(selectors, true).map(text_of)
    }
}

/// Parse a selector, logging instead of failing.
pub fn parse_selector(css: &str) -> Option<Selector> {
    Selector::parse(css)
        .map_err(|e| AppError::selector(css, format!("{e:?}")))
        .inspect_err(|e| log::warn!("{e}"))
        .ok()
}

pub fn select_first<'a>(scope: ElementRef<'a>, css: &str) -> Option<ElementRef<'a>> {
    let selector = parse_selector(css)?;
    scope.select(&selector).next()
}

pub fn select_all<'a>(scope: ElementRef<'a>, css: &str) -> Vec<ElementRef<'a>> {
    match parse_selector(css) {
        Some(selector) => scope.select(&selector).collect(),
        None => Vec::new(),
    }
}

/// All descendant text, trimmed.
pub fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Text of the element's first `a`, else its own.
pub fn link_text(el: ElementRef<'_>) -> String {
    select_first(el, "a").map(text_of).unwrap_or_else(|| text_of(el))
}

/// Text of the element's first `a`, else its first `span`, else its own.
pub fn link_or_span_text(el: ElementRef<'_>) -> String {
    select_first(el, "a")
        .or_else(|| select_first(el, "span"))
        .map(text_of)
        .unwrap_or_else(|| text_of(el))
}

/// Names listed in a cell: one per link when there are several links,
/// otherwise the cell value split on `separators`.
pub fn names_in(cell: ElementRef<'_>, separators: &[char]) -> Vec<String> {
    let links: Vec<String> = select_all(cell, "a")
        .into_iter()
        .map(text_of)
        .filter(|name| !name.is_empty())
        .collect();
    if links.len() > 1 {
        return links;
    }
    crate::utils::text::split_names(&link_or_span_text(cell), separators)
}

pub fn attr(el: ElementRef<'_>, name: &str) -> Option<String> {
    el.value().attr(name).map(str::to_string)
}

pub fn is_tag(el: ElementRef<'_>, name: &str) -> bool {
    el.value().name().eq_ignore_ascii_case(name)
}

/// Next element sibling, skipping text nodes.
pub fn next_element_sibling(el: ElementRef<'_>) -> Option<ElementRef<'_>> {
    el.next_siblings().find_map(ElementRef::wrap)
}

/// Child elements with one of the given tag names.
pub fn child_elements<'a>(el: ElementRef<'a>, names: &[&str]) -> Vec<ElementRef<'a>> {
    el.children()
        .filter_map(ElementRef::wrap)
        .filter(|child| names.iter().any(|name| is_tag(*child, name)))
        .collect()
}

/// Table rows, including those inside `thead`/`tbody`, without descending
/// into nested tables.
pub fn table_rows(table: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    if is_tag(table, "tr") {
        return vec![table];
    }
    let mut rows = Vec::new();
    for child in table.children().filter_map(ElementRef::wrap) {
        if is_tag(child, "tr") {
            rows.push(child);
        } else if ["thead", "tbody", "tfoot"].iter().any(|t| is_tag(child, t)) {
            rows.extend(child_elements(child, &["tr"]));
        }
    }
    rows
}

/// The `th`/`td` cells of a row, in order.
pub fn row_cells(row: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    child_elements(row, &["th", "td"])
}

/// Row whose first cell reads exactly `label`.
pub fn find_row<'a>(table: ElementRef<'a>, label: &str) -> Option<ElementRef<'a>> {
    table_rows(table).into_iter().find(|row| {
        row_cells(*row)
            .first()
            .is_some_and(|cell| text_of(*cell) == label)
    })
}

/// Second cell of the row labelled `label`.
pub fn row_value<'a>(table: ElementRef<'a>, label: &str) -> Option<ElementRef<'a>> {
    find_row(table, label).and_then(|row| row_cells(row).get(1).copied())
}

/// Trimmed text of the second cell of the row labelled `label`.
pub fn row_text(table: ElementRef<'_>, label: &str) -> Option<String> {
    row_value(table, label).map(text_of)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HTML: &str = r#"
        <html><body>
          <h1 class="title">  </h1>
          <h1 id="main">Main <span>Title</span></h1>
          <table id="info">
            <tbody>
              <tr><th>著者</th><td><a href="/a">作者A</a></td></tr>
              <tr><th>出版社</th><td>出版社名</td></tr>
              <tr><td>ネスト</td><td><table><tr><td>内側</td><td>x</td></tr></table></td></tr>
            </tbody>
          </table>
          <dl><dt>レーベル</dt>
              <dd>レーベル名</dd></dl>
        </body></html>
    "#;

    #[test]
    fn test_first_match_skips_empty_candidates() {
        let doc = Document::parse("https://example.com", HTML);
        assert_eq!(doc.first_text(&["h1.title", "h1#main"]), Some("Main Title".to_string()));
        assert!(doc.first_match(&["h1.title"], false).is_some());
        assert!(doc.first_match(&["h1.title"], true).is_none());
        assert!(doc.first_match(&["[[invalid"], false).is_none());
    }

    #[test]
    fn test_row_lookup() {
        let doc = Document::parse("https://example.com", HTML);
        let table = doc.select_first("#info").unwrap();
        assert_eq!(table_rows(table).len(), 3);
        assert_eq!(row_text(table, "出版社"), Some("出版社名".to_string()));
        assert_eq!(row_value(table, "著者").map(link_or_span_text), Some("作者A".to_string()));
        assert_eq!(row_text(table, "内側"), None);
        assert_eq!(row_text(table, "発売日"), None);
    }

    #[test]
    fn test_next_element_sibling_skips_whitespace() {
        let doc = Document::parse("https://example.com", HTML);
        let dt = doc.select_first("dt").unwrap();
        let value = next_element_sibling(dt).map(text_of);
        assert_eq!(value, Some("レーベル名".to_string()));
    }
}
