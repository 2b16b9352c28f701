// src/utils/date.rs

//! Date parsing for the formats catalog pages print.
//!
//! Every parser returns `None` on anything it does not recognize. A product
//! without a publication date is normal; a wrong one is not.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::title::to_half_width_digits;

static JAPANESE_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{4})\s*年\s*(\d{1,2})\s*月\s*(\d{1,2})\s*日").expect("japanese date regex")
});
static NUMERIC_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{4})[/\-.](\d{1,2})[/\-.](\d{1,2})").expect("numeric date regex")
});

fn from_captures(caps: &regex::Captures<'_>) -> Option<NaiveDate> {
    let year = caps[1].parse().ok()?;
    let month = caps[2].parse().ok()?;
    let day = caps[3].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// `2021年5月20日`, with or without padding or full-width digits.
pub fn parse_japanese_date(text: &str) -> Option<NaiveDate> {
    let text = to_half_width_digits(text);
    JAPANESE_DATE.captures(&text).and_then(|c| from_captures(&c))
}

/// `2021/05/20`, `2021-5-20` or `2021.5.20` anywhere in the text.
pub fn parse_numeric_date(text: &str) -> Option<NaiveDate> {
    let text = to_half_width_digits(text);
    NUMERIC_DATE.captures(&text).and_then(|c| from_captures(&c))
}

/// English dates as printed by Amazon, e.g. `May 20, 2021` or `20 May 2021`.
pub fn parse_english_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim().trim_end_matches('.');
    ["%B %d, %Y", "%b %d, %Y", "%d %B %Y", "%d %b %Y"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
}

/// Try every known format.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    parse_japanese_date(text)
        .or_else(|| parse_numeric_date(text))
        .or_else(|| parse_english_date(text))
}

/// Parse a release date printed by `site`, logging text that does not parse.
pub fn parse_release_date(
    site: &str,
    text: &str,
    parse: impl Fn(&str) -> Option<NaiveDate>,
) -> Option<NaiveDate> {
    let date = parse(text);
    if date.is_none() {
        log::warn!("Unparseable {site} release date: {}", text.trim());
    }
    date
}

/// Leading `YYYY-MM-DD` of a date or timestamp string.
pub fn parse_iso_date(text: &str) -> Option<NaiveDate> {
    let head = text.get(..10)?;
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}
