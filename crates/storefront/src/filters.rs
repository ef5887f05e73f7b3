//! Askama filters shared by the storefront templates.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

use chrono::Datelike;
use nutribook_core::parse_date;

/// Year shown in the page footer.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    Ok(chrono::Local::now().year())
}

/// English weekday name for a `YYYY-MM-DD` date, empty when it does not parse.
///
/// Usage in templates: `{{ selected_date|weekday }}`
#[askama::filter_fn]
pub fn weekday(date: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(weekday_name(&date.to_string()))
}

fn weekday_name(date: &str) -> String {
    parse_date(date)
        .map(|d| d.format("%A").to_string())
        .unwrap_or_default()
}
