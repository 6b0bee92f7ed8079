use chrono::{Local, Months, NaiveDate};

use crate::error::{Error, Result};

pub(crate) fn current_month() -> String {
    Local::now().format("%Y-%m").to_string()
}

/// Validate a period key and normalise it to `YYYY-MM` ("2026-2" → "2026-02").
pub(crate) fn normalize_month(s: &str) -> Result<String> {
    let trimmed = s.trim();
    NaiveDate::parse_from_str(&format!("{trimmed}-01"), "%Y-%m-%d")
        .map(|d| d.format("%Y-%m").to_string())
        .map_err(|_| Error::InvalidMonth(trimmed.to_string()))
}

/// Move a `YYYY-MM` key by `delta` months. Returns `None` for an invalid key.
pub(crate) fn shift_month(month: &str, delta: i32) -> Option<String> {
    let date = NaiveDate::parse_from_str(&format!("{month}-01"), "%Y-%m-%d").ok()?;
    let shifted = if delta >= 0 {
        date.checked_add_months(Months::new(delta.unsigned_abs()))
    } else {
        date.checked_sub_months(Months::new(delta.unsigned_abs()))
    };
    shifted.map(|d| d.format("%Y-%m").to_string())
}
