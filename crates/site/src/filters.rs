//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

use chrono::{DateTime, Utc};

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(Utc::now().year())
}

/// Formats a timestamp for the admin dashboard.
///
/// Usage in templates: `{{ guest.created_at|short_datetime }}`
#[askama::filter_fn]
pub fn short_datetime(
    value: impl std::borrow::Borrow<DateTime<Utc>>,
    _env: &dyn askama::Values,
) -> askama::Result<String> {
    Ok(value.borrow().format("%Y-%m-%d %H:%M").to_string())
}
