//! Title, author and date extraction.

use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;

use super::commands::{closing_brace, strip_commands};
use super::document::Metadata;

static TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\title\{").expect("valid title regex"));
static AUTHOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\author\{").expect("valid author regex"));
static DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\date\{").expect("valid date regex"));

/// Format a date the way `\today` renders: `M/D/YYYY`.
pub fn format_today(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.month(), date.day(), date.year())
}

/// Read the first title, author and date declarations anywhere in `markup`.
pub(crate) fn extract(markup: &str, today: NaiveDate) -> Metadata {
    let date = first_arg(&DATE, markup)
        .map(|raw| raw.replace(r"\today", &format_today(today)))
        .and_then(|raw| clean(&raw));

    Metadata {
        title: first_arg(&TITLE, markup).and_then(clean),
        author: first_arg(&AUTHOR, markup).and_then(clean),
        date,
    }
}

/// Balanced argument of the first declaration whose group closes.
fn first_arg<'a>(pattern: &Regex, markup: &'a str) -> Option<&'a str> {
    pattern.find_iter(markup).find_map(|open| {
        let rest = &markup[open.end()..];
        closing_brace(rest).map(|close| &rest[..close])
    })
}

fn clean(value: &str) -> Option<String> {
    let value = strip_commands(value);
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}
