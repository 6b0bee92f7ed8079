#![allow(clippy::unwrap_used)]

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;

fn make_expense(category: &str, amount: Decimal) -> ExpenseRecord {
    ExpenseRecord::new(1, category.into(), category.into(), amount, "2026-02".into())
}

fn config() -> BudgetConfig {
    BudgetConfig::embedded().unwrap()
}

fn scenario() -> Vec<ExpenseRecord> {
    vec![
        make_expense("Housing", dec!(2000)),
        make_expense("Food", dec!(400)),
        make_expense("Savings", dec!(1000)),
    ]
}

/// Small xorshift generator so the property loops are reproducible.
struct Rng(u64);

impl Rng {
    fn next(&mut self) -> u64 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 7;
        self.0 ^= self.0 << 17;
        self.0
    }

    fn below(&mut self, n: u64) -> u64 {
        self.next() % n
    }
}

const CATEGORIES: &[&str] = &[
    "Housing",
    "Transportation",
    "Debt",
    "Food",
    "Entertainment",
    "Savings",
    "Other",
    "Pets",
    "",
];

fn random_expenses(rng: &mut Rng) -> Vec<ExpenseRecord> {
    let count = rng.below(12) + 1;
    (0..count)
        .map(|_| {
            let category = CATEGORIES[rng.below(CATEGORIES.len() as u64) as usize];
            let cents = rng.below(500_000) as i64;
            make_expense(category, Decimal::new(cents, 2))
        })
        .collect()
}

// ── Scenario ──────────────────────────────────────────────────

#[test]
fn test_scenario_totals() {
    let s = compute_budget(&scenario(), dec!(5000), &config());
    assert_eq!(s.total_expenses, dec!(3400));
    assert_eq!(s.savings_total, dec!(1000));
    assert_eq!(s.spending_total, dec!(2400));
    assert_eq!(s.net_savings, dec!(1600));
    assert_eq!(s.savings_rate, dec!(52));
}

#[test]
fn test_scenario_buckets() {
    let s = compute_budget(&scenario(), dec!(5000), &config());
    assert_eq!(s.needs, dec!(2000));
    assert_eq!(s.needs_pct, dec!(40));
    assert_eq!(s.wants, dec!(400));
    assert_eq!(s.wants_pct, dec!(8));
    assert_eq!(s.saves, dec!(2600));
    assert_eq!(s.saves_pct, dec!(52));
}

#[test]
fn test_scenario_category_detail() {
    let s = compute_budget(&scenario(), dec!(5000), &config());
    let order: Vec<&str> = s.category_detail.iter().map(|d| d.category.as_str()).collect();
    assert_eq!(order, vec!["Housing", "Savings", "Food"]);

    let housing = &s.category_detail[0];
    assert_eq!(housing.percent_of_income, dec!(40));
    assert_eq!(housing.benchmark_amount, dec!(1500));
    assert!(housing.over_budget);

    let savings = &s.category_detail[1];
    assert_eq!(savings.benchmark_amount, dec!(1000));
    assert!(!savings.over_budget);

    let food = &s.category_detail[2];
    assert_eq!(food.benchmark_amount, dec!(600));
    assert!(!food.over_budget);
    assert_eq!(s.over_budget_count(), 1);
}

#[test]
fn test_scenario_health_score() {
    let s = compute_budget(&scenario(), dec!(5000), &config());
    // 50 + 30 + 10 + 10 + 6.4, clamped
    assert_eq!(s.health_score, 100);
    assert_eq!(s.rating(), HealthRating::Excellent);
}

#[test]
fn test_by_category_aggregates_repeats() {
    let expenses = vec![
        make_expense("Food", dec!(100)),
        make_expense("Housing", dec!(900)),
        make_expense("Food", dec!(50.25)),
    ];
    let s = compute_budget(&expenses, dec!(3000), &config());
    assert_eq!(s.by_category.len(), 2);
    assert_eq!(s.by_category["Food"], dec!(150.25));
    assert_eq!(s.by_category["Housing"], dec!(900));
}

#[test]
fn test_blank_category_counts_as_other() {
    let expenses = vec![make_expense("", dec!(40)), make_expense("Other", dec!(10))];
    let s = compute_budget(&expenses, dec!(1000), &config());
    assert_eq!(s.by_category.len(), 1);
    assert_eq!(s.by_category["Other"], dec!(50));
}

#[test]
fn test_unknown_category_uses_default_benchmark() {
    let expenses = vec![make_expense("Pets", dec!(200))];
    let s = compute_budget(&expenses, dec!(2000), &config());
    let pets = &s.category_detail[0];
    assert_eq!(pets.benchmark_amount, dec!(100));
    assert!(pets.over_budget);
    assert_eq!(s.needs, Decimal::ZERO);
    assert_eq!(s.wants, Decimal::ZERO);
}

#[test]
fn test_negative_net_savings_has_no_leftover() {
    let expenses = vec![make_expense("Housing", dec!(2500)), make_expense("Savings", dec!(100))];
    let s = compute_budget(&expenses, dec!(2000), &config());
    assert_eq!(s.net_savings, dec!(-600));
    assert_eq!(s.saves, dec!(100));
    assert_eq!(s.savings_rate, dec!(5));
}

// ── Degenerate input ──────────────────────────────────────────

#[test]
fn test_empty_expenses() {
    let s = compute_budget(&[], dec!(4200), &config());
    assert_eq!(s, BudgetSummary::empty(dec!(4200)));
    assert_eq!(s.net_savings, dec!(4200));
    assert_eq!(s.health_score, 50);
    assert!(s.by_category.is_empty());
    assert!(s.category_detail.is_empty());
}

#[test]
fn test_zero_income_with_expenses_is_empty() {
    let s = compute_budget(&scenario(), Decimal::ZERO, &config());
    assert_eq!(s, BudgetSummary::empty(Decimal::ZERO));
    assert_eq!(s.total_expenses, Decimal::ZERO);
    assert_eq!(s.health_score, 50);
}

#[test]
fn test_negative_income_is_empty() {
    let s = compute_budget(&scenario(), dec!(-100), &config());
    assert_eq!(s.net_savings, dec!(-100));
    assert_eq!(s.savings_rate, Decimal::ZERO);
    assert!(s.by_category.is_empty());
}

#[test]
fn test_negative_amounts_propagate() {
    let expenses = vec![make_expense("Housing", dec!(500)), make_expense("Housing", dec!(-200))];
    let s = compute_budget(&expenses, dec!(1000), &config());
    assert_eq!(s.total_expenses, dec!(300));
    assert_eq!(s.net_savings, dec!(700));
}

#[test]
fn test_extreme_magnitudes_do_not_panic() {
    let expenses = vec![
        make_expense("Housing", Decimal::MAX),
        make_expense("Housing", Decimal::MAX),
        make_expense("Savings", Decimal::MIN),
        make_expense("Food", Decimal::MAX),
    ];
    for income in [Decimal::MAX, dec!(0.0000001), Decimal::ONE] {
        let s = compute_budget(&expenses, income, &config());
        assert!(s.health_score <= 100);
        assert_eq!(s.by_category.len(), 3);
    }
}

// ── Over-budget boundary ──────────────────────────────────────

#[test]
fn test_over_budget_exactly_at_tolerance_is_not_over() {
    // Food benchmark 0.12 × 5000 = 600; tolerance 660
    let s = compute_budget(&[make_expense("Food", dec!(660))], dec!(5000), &config());
    assert!(!s.category_detail[0].over_budget);
}

#[test]
fn test_over_budget_one_cent_above_tolerance() {
    let s = compute_budget(&[make_expense("Food", dec!(660.01))], dec!(5000), &config());
    assert!(s.category_detail[0].over_budget);
}

// ── Health score ──────────────────────────────────────────────

#[test]
fn test_health_score_all_on_target() {
    // 50 + 25 + 10 + 10 + 0.4
    assert_eq!(health_score(dec!(25), dec!(45), dec!(25), dec!(100), dec!(5000)), 95);
}

#[test]
fn test_health_score_clamps_high() {
    assert_eq!(health_score(dec!(40), dec!(40), dec!(10), dec!(5000), dec!(10000)), 100);
}

#[test]
fn test_health_score_savings_rate_capped() {
    let at_cap = health_score(dec!(30), dec!(60), dec!(40), Decimal::ZERO, dec!(1000));
    let above = health_score(dec!(90), dec!(60), dec!(40), Decimal::ZERO, dec!(1000));
    assert_eq!(at_cap, above);
    // 50 + 30 - 5 - 5
    assert_eq!(at_cap, 70);
}

#[test]
fn test_health_score_overshoot_penalty() {
    // 50 + 0 - (70 - 50) × 0.5 + 10 + 0
    assert_eq!(health_score(Decimal::ZERO, dec!(70), dec!(20), Decimal::ZERO, dec!(1000)), 50);
}

#[test]
fn test_health_score_net_bonus_capped() {
    // 50 + 0 + 10 + 10 + min(18, 10)
    assert_eq!(health_score(Decimal::ZERO, dec!(10), dec!(10), dec!(900), dec!(1000)), 80);
}

#[test]
fn test_health_score_negative_net_uncapped() {
    // 50 + 0 + 10 + 10 - 60
    assert_eq!(health_score(Decimal::ZERO, dec!(10), dec!(10), dec!(-3000), dec!(1000)), 10);
}

#[test]
fn test_health_score_truncates() {
    // 50 + 12.9 + 10 + 10 = 82.9
    assert_eq!(health_score(dec!(12.9), dec!(40), dec!(20), Decimal::ZERO, dec!(1000)), 82);
}

#[test]
fn test_health_score_clamps_once_at_end() {
    // 50 + 30 - 100 + 10 + 10 = 0; clamping per step would give 20
    assert_eq!(health_score(dec!(30), dec!(250), dec!(0), dec!(500), dec!(1000)), 0);
}

#[test]
fn test_health_score_heavy_overspend_floors_at_zero() {
    let s = compute_budget(&[make_expense("Housing", dec!(3000))], dec!(1000), &config());
    assert_eq!(s.net_savings, dec!(-2000));
    assert_eq!(s.health_score, 0);
    assert_eq!(s.rating(), HealthRating::NeedsWork);
}

#[test]
fn test_health_rating_thresholds() {
    assert_eq!(HealthRating::from_score(100), HealthRating::Excellent);
    assert_eq!(HealthRating::from_score(85), HealthRating::Excellent);
    assert_eq!(HealthRating::from_score(84), HealthRating::Good);
    assert_eq!(HealthRating::from_score(70), HealthRating::Good);
    assert_eq!(HealthRating::from_score(69), HealthRating::Fair);
    assert_eq!(HealthRating::from_score(40), HealthRating::Fair);
    assert_eq!(HealthRating::from_score(39), HealthRating::NeedsWork);
    assert_eq!(HealthRating::from_score(0), HealthRating::NeedsWork);
    assert_eq!(HealthRating::NeedsWork.to_string(), "Needs Work");
}

// ── Properties ────────────────────────────────────────────────

#[test]
fn test_totals_are_consistent_for_generated_input() {
    let config = config();
    let mut rng = Rng(0x9E37_79B9_7F4A_7C15);
    for _ in 0..500 {
        let expenses = random_expenses(&mut rng);
        let income = Decimal::from(rng.below(20_000) + 1);
        let s = compute_budget(&expenses, income, &config);

        let by_category_sum: Decimal = s.by_category.values().copied().sum();
        assert_eq!(s.total_expenses, by_category_sum);
        assert_eq!(s.spending_total + s.savings_total, s.total_expenses);
        assert_eq!(s.net_savings, income - s.total_expenses);
        assert!(s.health_score <= 100);
    }
}

#[test]
fn test_categories_present_exactly_once() {
    let config = config();
    let mut rng = Rng(42);
    for _ in 0..300 {
        let expenses = random_expenses(&mut rng);
        let s = compute_budget(&expenses, dec!(5000), &config);

        let expected: BTreeSet<&str> = expenses.iter().map(|e| e.category_key()).collect();
        let keys: BTreeSet<&str> = s.by_category.keys().map(String::as_str).collect();
        assert_eq!(keys, expected);
        assert_eq!(s.category_detail.len(), s.by_category.len());
        for pair in s.category_detail.windows(2) {
            assert!(pair[0].amount >= pair[1].amount);
        }
    }
}

#[test]
fn test_compute_is_idempotent() {
    let config = config();
    let mut rng = Rng(7);
    for _ in 0..100 {
        let expenses = random_expenses(&mut rng);
        let income = Decimal::from(rng.below(10_000) + 1);
        assert_eq!(
            compute_budget(&expenses, income, &config),
            compute_budget(&expenses, income, &config)
        );
    }
}

#[test]
fn test_empty_law_for_any_income() {
    let config = config();
    for income in [dec!(-50), Decimal::ZERO, dec!(0.01), dec!(1234.56)] {
        let s = compute_budget(&[], income, &config);
        assert_eq!(s.net_savings, income);
        assert_eq!(s.health_score, 50);
    }
}
