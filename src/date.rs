use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

/// Format of the `**Published:**` value, e.g. `March 1, 2024`.
pub(crate) const POST_DATE_FORMAT: &str = "%B %d, %Y";
/// W3C date used for `<lastmod>`.
pub(crate) const LASTMOD_FORMAT: &str = "%Y-%m-%d";

/// chrono accepts years of any width and no space after the comma;
/// `Month D, YYYY` is checked first so those fall back like any other miss.
static POST_DATE_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[[:alpha:]]+\s+\d{1,2},\s+\d{4}$").expect("date pattern is valid")
});

pub(crate) fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub(crate) fn parse_post_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if !POST_DATE_SHAPE.is_match(value) {
        return None;
    }
    NaiveDate::parse_from_str(value, POST_DATE_FORMAT).ok()
}

pub(crate) fn lastmod(date: NaiveDate) -> String {
    date.format(LASTMOD_FORMAT).to_string()
}
