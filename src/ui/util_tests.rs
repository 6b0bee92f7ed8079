#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::util::*;

// ── truncate ──────────────────────────────────────────────────

#[test]
fn test_truncate_fits() {
    assert_eq!(truncate("Rent", 10), "Rent");
    assert_eq!(truncate("Groceries", 9), "Groceries");
}

#[test]
fn test_truncate_long_name() {
    assert_eq!(truncate("Electricity & Water", 8), "Electri…");
}

#[test]
fn test_truncate_degenerate_widths() {
    assert_eq!(truncate("Rent", 0), "");
    assert_eq!(truncate("Rent", 1), "…");
    assert_eq!(truncate("", 3), "");
}

#[test]
fn test_truncate_multibyte() {
    assert_eq!(truncate("café résumé", 5), "café…");
    assert_eq!(truncate("日本語テスト", 4), "日本語…");
}

// ── gauge_ratio ───────────────────────────────────────────────

#[test]
fn test_gauge_ratio_in_range() {
    assert!((gauge_ratio(dec!(40)) - 0.4).abs() < 1e-9);
    assert!((gauge_ratio(dec!(0)) - 0.0).abs() < 1e-9);
}

#[test]
fn test_gauge_ratio_clamps() {
    assert!((gauge_ratio(dec!(250)) - 1.0).abs() < 1e-9);
    assert!((gauge_ratio(dec!(-5)) - 0.0).abs() < 1e-9);
}

// ── scrolling ─────────────────────────────────────────────────

#[test]
fn test_scroll_down_moves_window() {
    let (mut index, mut scroll) = (0, 0);
    for _ in 0..5 {
        scroll_down(&mut index, &mut scroll, 10, 3);
    }
    assert_eq!(index, 5);
    assert_eq!(scroll, 3);
}

#[test]
fn test_scroll_down_stops_at_end() {
    let (mut index, mut scroll) = (2, 0);
    scroll_down(&mut index, &mut scroll, 3, 10);
    assert_eq!(index, 2);
}

#[test]
fn test_scroll_up_pulls_window() {
    let (mut index, mut scroll) = (3, 3);
    scroll_up(&mut index, &mut scroll);
    assert_eq!((index, scroll), (2, 2));
    let (mut index, mut scroll) = (0, 0);
    scroll_up(&mut index, &mut scroll);
    assert_eq!((index, scroll), (0, 0));
}

#[test]
fn test_scroll_to_bounds() {
    let (mut index, mut scroll) = (4, 2);
    scroll_to_bottom(&mut index, &mut scroll, 9, 4);
    assert_eq!((index, scroll), (8, 5));
    scroll_to_top(&mut index, &mut scroll);
    assert_eq!((index, scroll), (0, 0));

    scroll_to_bottom(&mut index, &mut scroll, 0, 4);
    assert_eq!((index, scroll), (0, 0));
}
