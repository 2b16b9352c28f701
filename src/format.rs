// src/format.rs

//! Placeholder templating for Scrapbox page bodies.
//!
//! A template is plain text with `{name}` placeholders. Substitution runs in
//! two passes: the fields every product has, then the fields of its variant.
//! Placeholders that do not belong to the product stay in the output as
//! literal text.
//!
//! Rendering rules:
//!
//! | value                 | output        |
//! |-----------------------|---------------|
//! | list `["a", "b"]`     | `[a] [b]`     |
//! | scalar `"v"`          | `[v]`         |
//! | absent or empty       | empty string  |
//! | `{id}`                | raw value     |
//! | date parts            | no zero pad   |

use std::borrow::Cow;

use chrono::Datelike;

use crate::models::{Product, ProductBase};

pub const DOUJINSHI_TEMPLATE: &str = "[{service}で読む {url}]
[[著者]]：{authors}
[[概要]]：
[[サークル名]]：{circleName}
[[イベント]]: {eventName}
[[発行年]]：[{publishedYear}]/{publishedMonth}/{publishedDate}
";

pub const ASMR_TEMPLATE: &str = "[{service}で読む {url}]
[[著者]]：{authors}
[[概要]]：
[[サークル名]]：{circleName}
[[声優]]：{voiceActors}
[[シナリオライター]]：{writers}
[[イラストレーター]]：{illustrators}
[[イベント]]: {eventName}
[[発行年]]：[{publishedYear}]/{publishedMonth}/{publishedDate}
";

pub const FILM_TEMPLATE: &str = "[{service}で視聴 {url}]
[[出演者]]：{authors}
[[概要]]：
[[監督]]： {director}
[[レーベル]]：{label}
[[ID]]：{id}
[[発行年]]：[{publishedYear}]/{publishedMonth}/{publishedDate}
";

pub const GENERIC_TEMPLATE: &str =
    "[{title}] [{authors}] {service} {url} {publishedYear}年{publishedMonth}月{publishedDate}日";

/// Book template before the optional label and publisher lines are decided.
const BOOK_TEMPLATE_HEAD: &str = "[{service}で読む {url}]
[[著者]]：{authors}
[[概要]]：
";
const BOOK_TEMPLATE_TAIL: &str = "[[発行年]]：[{publishedYear}]/{publishedMonth}/{publishedDate}
";

/// Built-in template for a product.
///
/// Book templates only carry the label and publisher lines when the book
/// has those values.
pub fn default_template(product: &Product) -> Cow<'static, str> {
    match product {
        Product::Book(book) => {
            let mut template = String::from(BOOK_TEMPLATE_HEAD);
            if let Some(label) = book.label().filter(|l| !l.is_empty()) {
                template.push_str(&format!("[[レーベル]]：[{label}]\n"));
            }
            if let Some(publisher) = book.publisher().filter(|p| !p.is_empty()) {
                template.push_str(&format!("[[出版社]]: [{publisher}]\n"));
            }
            template.push_str(BOOK_TEMPLATE_TAIL);
            Cow::Owned(template)
        }
        Product::Doujinshi(_) => Cow::Borrowed(DOUJINSHI_TEMPLATE),
        Product::Asmr(_) => Cow::Borrowed(ASMR_TEMPLATE),
        Product::Film(_) => Cow::Borrowed(FILM_TEMPLATE),
        Product::Generic(_) => Cow::Borrowed(GENERIC_TEMPLATE),
    }
}

/// Substitute every placeholder the product knows about.
pub fn render(template: &str, product: &Product) -> String {
    let text = render_base(template, product.base());
    render_variant(&text, product)
}

fn render_base(template: &str, base: &ProductBase) -> String {
    let (year, month, day) = match base.published_at() {
        Some(date) => (
            date.year().to_string(),
            date.month().to_string(),
            date.day().to_string(),
        ),
        None => Default::default(),
    };

    template
        .replace("{title}", base.title())
        .replace("{authors}", &bracket_list(Some(base.authors())))
        .replace("{service}", base.service().as_str())
        .replace("{url}", base.url())
        .replace("{publishedYear}", &year)
        .replace("{publishedMonth}", &month)
        .replace("{publishedDate}", &day)
}

fn render_variant(text: &str, product: &Product) -> String {
    match product {
        Product::Book(book) => text
            .replace("{publisher}", &bracket(book.publisher()))
            .replace("{label}", &bracket(book.label())),
        Product::Doujinshi(doujinshi) => text
            .replace("{circleName}", &bracket(doujinshi.circle_name()))
            .replace("{eventName}", &bracket(doujinshi.event_name())),
        Product::Asmr(asmr) => text
            .replace("{circleName}", &bracket(asmr.circle_name()))
            .replace("{eventName}", &bracket(asmr.event_name()))
            .replace("{illustrators}", &bracket_list(asmr.illustrators()))
            .replace("{voiceActors}", &bracket_list(asmr.voice_actors()))
            .replace("{writers}", &bracket_list(asmr.writers())),
        Product::Film(film) => text
            .replace("{director}", &bracket(film.director()))
            .replace("{label}", &bracket(film.label()))
            .replace("{id}", film.id().unwrap_or_default()),
        Product::Generic(_) => text.to_string(),
    }
}

/// `[v]`, or nothing for an absent or empty value.
fn bracket(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => format!("[{v}]"),
        _ => String::new(),
    }
}

/// `[a] [b]`, or nothing for an absent or empty list.
fn bracket_list(items: Option<&[String]>) -> String {
    items
        .unwrap_or_default()
        .iter()
        .filter(|item| !item.is_empty())
        .map(|item| format!("[{item}]"))
        .collect::<Vec<_>>()
        .join(" ")
}
