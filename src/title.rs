// src/title.rs

//! Title normalization and search-key derivation.
//!
//! Titles are stored with full-width Latin letters and digits folded to
//! half-width. The search key is a much more aggressive reduction: it drops
//! edition labels and decoration so the Scrapbox full-text search can match
//! pages about the same work.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Bracketed title kept verbatim even though it uses the 【】 annotation style.
pub const PROTECTED_BRACKET_TITLE: &str = "【推しの子】";

/// Maximum number of words kept in a search key.
pub const MAX_SEARCH_TERMS: usize = 4;

static NUMBERED_PAREN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([0-9]+)\)").expect("numbered paren regex"));
static LEADING_PAREN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\([^)]*\)").expect("leading paren regex"));
static TRAILING_PAREN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([^)]*\)$").expect("trailing paren regex"));
static LENTICULAR_GROUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"【.*?】").expect("lenticular bracket regex"));

/// Full-width code point offset from its ASCII counterpart.
const FULL_WIDTH_OFFSET: u32 = 0xFEE0;

/// Fold a full-width ASCII variant (U+FF01..U+FF5E) back to ASCII.
fn fold(c: char) -> char {
    char::from_u32(c as u32 - FULL_WIDTH_OFFSET).unwrap_or(c)
}

fn is_full_width_alphanumeric(c: char) -> bool {
    matches!(c, 'Ａ'..='Ｚ' | 'ａ'..='ｚ' | '０'..='９')
}

/// Convert full-width Latin letters and digits to half-width.
///
/// Everything else, including full-width punctuation, is left as is.
pub fn to_half_width_alphanumeric(text: &str) -> String {
    text.chars()
        .map(|c| if is_full_width_alphanumeric(c) { fold(c) } else { c })
        .collect()
}

/// Convert full-width digits only. Used for dates printed in catalog tables.
pub fn to_half_width_digits(text: &str) -> String {
    text.chars()
        .map(|c| if matches!(c, '０'..='９') { fold(c) } else { c })
        .collect()
}

/// Full-width alphanumerics plus the punctuation that varies between
/// full-width and half-width across catalogs. 。 and 、 have no ASCII
/// counterpart and are never touched.
fn to_half_width_searchable(text: &str) -> String {
    text.chars()
        .map(|c| {
            if is_full_width_alphanumeric(c) || matches!(c, '（' | '）' | '！' | '？' | '，' | '＃') {
                fold(c)
            } else {
                c
            }
        })
        .collect()
}

/// Characters replaced by a space once the edge annotations are gone.
fn is_separator(c: char) -> bool {
    matches!(
        c,
        '(' | ')'
            | '（'
            | '）'
            | '［'
            | '］'
            | '['
            | ']'
            | '-'
            | '―'
            | '—'
            | '・'
            | '●'
            | '～'
            | '〜'
            | '~'
            | '?'
            | '#'
            | '○'
            | '◯'
            | '!'
            | ','
    )
}

/// Derive the compact search phrase for a title.
///
/// The result is meant for querying, not for display, and applying it twice
/// is not guaranteed to be stable.
pub fn title_for_search(title: &str) -> String {
    let text = to_half_width_searchable(title);

    // Volume numbers survive as their own search term.
    let text = NUMBERED_PAREN.replace_all(&text, " $1 ");

    // Edge parens are labels such as (最新刊) or (同人BOOKS).
    let text = LEADING_PAREN.replace(&text, "");
    let text = TRAILING_PAREN.replace(&text, "");
    let text = text.trim();

    let text = LENTICULAR_GROUP.replace_all(text, |caps: &Captures| {
        let group = &caps[0];
        if group == PROTECTED_BRACKET_TITLE {
            group.to_string()
        } else {
            String::new()
        }
    });

    let text = text.trim_end();
    let text = text.strip_suffix('▼').unwrap_or(text);

    let spaced: String = text
        .chars()
        .map(|c| if is_separator(c) { ' ' } else { c })
        .collect();

    spaced
        .split_whitespace()
        .take(MAX_SEARCH_TERMS)
        .collect::<Vec<_>>()
        .join(" ")
}
