#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;

fn make_expense(name: &str, category: &str, amount: Decimal) -> ExpenseRecord {
    ExpenseRecord::new(1, name.into(), category.into(), amount, "2026-02".into())
}

// ── ExpenseRecord ─────────────────────────────────────────────

#[test]
fn test_expense_new_defaults() {
    let e = make_expense("Rent", "Housing", dec!(1500));
    assert_eq!(e.id, 1);
    assert_eq!(e.name, "Rent");
    assert_eq!(e.category, "Housing");
    assert_eq!(e.amount, dec!(1500));
    assert_eq!(e.month, "2026-02");
    assert_eq!(e.expense_type, ExpenseType::Variable);
    assert!(e.note.is_empty());
}

#[test]
fn test_category_key_trims() {
    let e = make_expense("Rent", "  Housing ", dec!(1));
    assert_eq!(e.category_key(), "Housing");
}

#[test]
fn test_category_key_blank_is_other() {
    assert_eq!(make_expense("x", "", dec!(1)).category_key(), OTHER_CATEGORY);
    assert_eq!(make_expense("x", "   ", dec!(1)).category_key(), "Other");
}

#[test]
fn test_matches_name_and_category() {
    let e = make_expense("Netflix", "Entertainment", dec!(15));
    assert!(e.matches("netf"));
    assert!(e.matches("ENTERTAIN"));
    assert!(!e.matches("rent"));
}

// ── ExpenseType ───────────────────────────────────────────────

#[test]
fn test_expense_type_parse() {
    assert_eq!(ExpenseType::parse("fixed"), ExpenseType::Fixed);
    assert_eq!(ExpenseType::parse("FIXED"), ExpenseType::Fixed);
    assert_eq!(ExpenseType::parse("one-time"), ExpenseType::OneTime);
    assert_eq!(ExpenseType::parse("once"), ExpenseType::OneTime);
    assert_eq!(ExpenseType::parse("variable"), ExpenseType::Variable);
    assert_eq!(ExpenseType::parse("whatever"), ExpenseType::Variable);
    assert_eq!(ExpenseType::parse(""), ExpenseType::Variable);
}

#[test]
fn test_expense_type_roundtrip() {
    for t in ExpenseType::all() {
        let s = t.as_str();
        assert_eq!(*t, ExpenseType::parse(s), "Roundtrip failed for {s}");
    }
}

#[test]
fn test_expense_type_display() {
    assert_eq!(format!("{}", ExpenseType::OneTime), "One-time");
}

// ── Months ────────────────────────────────────────────────────

#[test]
fn test_normalize_month() {
    assert_eq!(normalize_month("2026-02").unwrap(), "2026-02");
    assert_eq!(normalize_month("2026-2").unwrap(), "2026-02");
    assert_eq!(normalize_month(" 2026-11 ").unwrap(), "2026-11");
}

#[test]
fn test_normalize_month_invalid() {
    assert!(normalize_month("2026-13").is_err());
    assert!(normalize_month("February").is_err());
    assert!(normalize_month("").is_err());
}

#[test]
fn test_shift_month_forward_and_back() {
    assert_eq!(shift_month("2026-02", 1).as_deref(), Some("2026-03"));
    assert_eq!(shift_month("2026-02", -1).as_deref(), Some("2026-01"));
    assert_eq!(shift_month("2026-02", 0).as_deref(), Some("2026-02"));
}

#[test]
fn test_shift_month_crosses_year() {
    assert_eq!(shift_month("2025-12", 1).as_deref(), Some("2026-01"));
    assert_eq!(shift_month("2026-01", -1).as_deref(), Some("2025-12"));
}

#[test]
fn test_shift_month_invalid() {
    assert_eq!(shift_month("nope", 1), None);
}

#[test]
fn test_current_month_is_valid_key() {
    let m = current_month();
    assert_eq!(normalize_month(&m).unwrap(), m);
}

// ── Samples ───────────────────────────────────────────────────

#[test]
fn test_sample_expenses_ids_and_month() {
    let (expenses, next_id) = sample_expenses("2026-02");
    assert!(!expenses.is_empty());
    assert_eq!(next_id, expenses.len() as i64 + 1);
    for (i, e) in expenses.iter().enumerate() {
        assert_eq!(e.id, i as i64 + 1);
        assert_eq!(e.month, "2026-02");
        assert!(e.amount > Decimal::ZERO);
    }
}
