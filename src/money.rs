use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

use crate::error::{Error, Result};

/// Format a decimal amount with thousand separators and 2 decimal places.
/// e.g. `1234567.89` → `"$1,234,567.89"`
pub(crate) fn format_amount(val: Decimal) -> String {
    format_currency(val, 2)
}

/// Format a decimal amount rounded to whole dollars (half away from zero).
/// e.g. `1599.50` → `"$1,600"`
pub(crate) fn format_whole_amount(val: Decimal) -> String {
    format_currency(val, 0)
}

/// Format a percentage with one decimal place, e.g. `52` → `"52.0%"`.
pub(crate) fn format_percent(val: Decimal) -> String {
    let rounded = val.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.1}%")
}

fn format_currency(val: Decimal, places: u32) -> String {
    let rounded = val.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero);
    let abs = rounded.abs();
    let formatted = format!("{abs:.prec$}", prec = places as usize);
    let (int_part, dec_part) = match formatted.split_once('.') {
        Some((int_part, dec_part)) => (int_part, Some(dec_part)),
        None => (formatted.as_str(), None),
    };

    let with_commas: String = int_part
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(",");

    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    match dec_part {
        Some(dec_part) => format!("{sign}${with_commas}.{dec_part}"),
        None => format!("{sign}${with_commas}"),
    }
}

/// Parse a user-entered amount. Accepts `$`, thousands separators,
/// surrounding quotes and accounting-style `(500.00)` negatives.
/// Blank input parses as zero.
pub(crate) fn parse_decimal(s: &str) -> Result<Decimal> {
    let cleaned = s
        .replace(['$', ',', '"'], "")
        .replace('(', "-")
        .replace(')', "")
        .trim()
        .to_string();
    if cleaned.is_empty() {
        return Ok(Decimal::ZERO);
    }
    Decimal::from_str(&cleaned).map_err(|_| Error::InvalidAmount(s.trim().to_string()))
}

#[cfg(test)]
#[path = "money_tests.rs"]
mod tests;
