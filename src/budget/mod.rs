//! Budget computation engine.
//!
//! [`compute_budget`] maps the caller's expense list and monthly income to a
//! [`BudgetSummary`]: totals, the 50/30/20 needs/wants/saves comparison, a
//! per-category benchmark check and a 0–100 health score.
//!
//! It is a total function. Empty input and non-positive income collapse to
//! [`BudgetSummary::empty`], and arithmetic saturates at the `Decimal` range
//! instead of overflowing. Nothing is cached between calls.

mod report;

use std::collections::BTreeMap;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::config::{BudgetConfig, SAVINGS_CATEGORY};
use crate::models::ExpenseRecord;

pub(crate) use report::{render_report, summarize_for_ai, target_amount};

// 50/30/20 targets, as percent of income.
pub(crate) const NEEDS_TARGET_PCT: Decimal = Decimal::from_parts(50, 0, 0, false, 0);
pub(crate) const WANTS_TARGET_PCT: Decimal = Decimal::from_parts(30, 0, 0, false, 0);
pub(crate) const SAVES_TARGET_PCT: Decimal = Decimal::from_parts(20, 0, 0, false, 0);

/// A category is over budget once it exceeds its benchmark by more than 10%.
const OVER_BUDGET_TOLERANCE: Decimal = Decimal::from_parts(11, 0, 0, false, 1);

const HEALTH_BASELINE: Decimal = Decimal::from_parts(50, 0, 0, false, 0);
const SAVINGS_RATE_CAP: Decimal = Decimal::from_parts(30, 0, 0, false, 0);
const ON_TARGET_BONUS: Decimal = Decimal::from_parts(10, 0, 0, false, 0);
const OVERSHOOT_PENALTY: Decimal = Decimal::from_parts(5, 0, 0, false, 1);
const NET_SAVINGS_WEIGHT: Decimal = Decimal::from_parts(20, 0, 0, false, 0);
const NET_SAVINGS_CAP: Decimal = Decimal::from_parts(10, 0, 0, false, 0);
const NEUTRAL_SCORE: u8 = 50;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CategoryDetail {
    pub(crate) category: String,
    pub(crate) amount: Decimal,
    pub(crate) percent_of_income: Decimal,
    pub(crate) benchmark_amount: Decimal,
    pub(crate) over_budget: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct BudgetSummary {
    pub(crate) total_expenses: Decimal,
    pub(crate) spending_total: Decimal,
    pub(crate) savings_total: Decimal,
    /// Income left after all spending and designated savings. May be negative.
    pub(crate) net_savings: Decimal,
    pub(crate) savings_rate: Decimal,
    pub(crate) needs: Decimal,
    pub(crate) wants: Decimal,
    pub(crate) saves: Decimal,
    pub(crate) needs_pct: Decimal,
    pub(crate) wants_pct: Decimal,
    pub(crate) saves_pct: Decimal,
    pub(crate) by_category: BTreeMap<String, Decimal>,
    /// Sorted by amount, largest first.
    pub(crate) category_detail: Vec<CategoryDetail>,
    pub(crate) health_score: u8,
}

impl BudgetSummary {
    /// The summary for an empty expense list or non-positive income.
    pub(crate) fn empty(income: Decimal) -> Self {
        Self {
            total_expenses: Decimal::ZERO,
            spending_total: Decimal::ZERO,
            savings_total: Decimal::ZERO,
            net_savings: income,
            savings_rate: Decimal::ZERO,
            needs: Decimal::ZERO,
            wants: Decimal::ZERO,
            saves: Decimal::ZERO,
            needs_pct: Decimal::ZERO,
            wants_pct: Decimal::ZERO,
            saves_pct: Decimal::ZERO,
            by_category: BTreeMap::new(),
            category_detail: Vec::new(),
            health_score: NEUTRAL_SCORE,
        }
    }

    pub(crate) fn rating(&self) -> HealthRating {
        HealthRating::from_score(self.health_score)
    }

    pub(crate) fn over_budget_count(&self) -> usize {
        self.category_detail.iter().filter(|d| d.over_budget).count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HealthRating {
    Excellent,
    Good,
    Fair,
    NeedsWork,
}

impl HealthRating {
    pub(crate) fn from_score(score: u8) -> Self {
        match score {
            85..=u8::MAX => Self::Excellent,
            70..=84 => Self::Good,
            40..=69 => Self::Fair,
            _ => Self::NeedsWork,
        }
    }

    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::NeedsWork => "Needs Work",
        }
    }
}

impl std::fmt::Display for HealthRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

pub(crate) fn compute_budget(
    expenses: &[ExpenseRecord],
    income: Decimal,
    config: &BudgetConfig,
) -> BudgetSummary {
    if expenses.is_empty() || income <= Decimal::ZERO {
        tracing::debug!(
            records = expenses.len(),
            %income,
            "Nothing to budget, using empty summary"
        );
        return BudgetSummary::empty(income);
    }

    let totals = group_by_category(expenses);

    let total_expenses = totals
        .iter()
        .fold(Decimal::ZERO, |acc, (_, amt)| acc.saturating_add(*amt));
    let savings_total = totals
        .iter()
        .find(|(name, _)| name == SAVINGS_CATEGORY)
        .map_or(Decimal::ZERO, |(_, amt)| *amt);
    let spending_total = total_expenses.saturating_sub(savings_total);
    let net_savings = income
        .saturating_sub(spending_total)
        .saturating_sub(savings_total);

    let saves = savings_total.saturating_add(net_savings.max(Decimal::ZERO));
    let savings_rate = percent_of(saves, income);

    let needs_set = config.needs_set();
    let wants_set = config.wants_set();
    let needs = sum_where(&totals, |name| needs_set.contains(name));
    let wants = sum_where(&totals, |name| wants_set.contains(name));

    let needs_pct = percent_of(needs, income);
    let wants_pct = percent_of(wants, income);
    let saves_pct = percent_of(saves, income);

    let category_detail = build_category_detail(&totals, income, config);
    let health_score = health_score(savings_rate, needs_pct, wants_pct, net_savings, income);

    tracing::debug!(
        records = expenses.len(),
        categories = totals.len(),
        %total_expenses,
        %net_savings,
        health_score,
        "Computed budget summary"
    );

    BudgetSummary {
        total_expenses,
        spending_total,
        savings_total,
        net_savings,
        savings_rate,
        needs,
        wants,
        saves,
        needs_pct,
        wants_pct,
        saves_pct,
        by_category: totals.into_iter().collect(),
        category_detail,
        health_score,
    }
}

/// Per-category sums in the order categories are first seen.
fn group_by_category(expenses: &[ExpenseRecord]) -> Vec<(String, Decimal)> {
    let mut totals: Vec<(String, Decimal)> = Vec::new();
    for expense in expenses {
        let key = expense.category_key();
        match totals.iter_mut().find(|(name, _)| name == key) {
            Some((_, sum)) => *sum = sum.saturating_add(expense.amount),
            None => totals.push((key.to_string(), expense.amount)),
        }
    }
    totals
}

fn sum_where(totals: &[(String, Decimal)], include: impl Fn(&str) -> bool) -> Decimal {
    totals
        .iter()
        .filter(|(name, _)| include(name))
        .fold(Decimal::ZERO, |acc, (_, amt)| acc.saturating_add(*amt))
}

fn build_category_detail(
    totals: &[(String, Decimal)],
    income: Decimal,
    config: &BudgetConfig,
) -> Vec<CategoryDetail> {
    let mut detail: Vec<CategoryDetail> = totals
        .iter()
        .map(|(category, amount)| {
            let benchmark_amount = config.benchmark_ratio(category).saturating_mul(income);
            CategoryDetail {
                category: category.clone(),
                amount: *amount,
                percent_of_income: percent_of(*amount, income),
                benchmark_amount,
                over_budget: *amount > benchmark_amount.saturating_mul(OVER_BUDGET_TOLERANCE),
            }
        })
        .collect();

    // Stable: equal amounts keep discovery order.
    detail.sort_by(|a, b| b.amount.cmp(&a.amount));
    detail
}

/// Coarse 0–100 "financial fitness" heuristic; not a validated metric.
///
/// Starts from 50, credits the savings rate (capped at 30 points), rewards or
/// penalises needs and wants against their 50%/30% targets, then adds a
/// net-savings term that is capped at +10 but unbounded below. The result is
/// clamped once, at the end, and truncated.
fn health_score(
    savings_rate: Decimal,
    needs_pct: Decimal,
    wants_pct: Decimal,
    net_savings: Decimal,
    income: Decimal,
) -> u8 {
    let mut score = HEALTH_BASELINE.saturating_add(savings_rate.min(SAVINGS_RATE_CAP));
    score = apply_target(score, needs_pct, NEEDS_TARGET_PCT);
    score = apply_target(score, wants_pct, WANTS_TARGET_PCT);

    let net_term = scaled_ratio(net_savings, income, NET_SAVINGS_WEIGHT);
    score = if net_savings > Decimal::ZERO {
        score.saturating_add(net_term.min(NET_SAVINGS_CAP))
    } else {
        score.saturating_add(net_term)
    };

    score
        .clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
        .trunc()
        .to_u8()
        .unwrap_or(0)
}

fn apply_target(score: Decimal, pct: Decimal, target: Decimal) -> Decimal {
    if pct <= target {
        score.saturating_add(ON_TARGET_BONUS)
    } else {
        score.saturating_sub(pct.saturating_sub(target).saturating_mul(OVERSHOOT_PENALTY))
    }
}

/// `part / whole × 100`. `whole` is positive on every call path.
fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    scaled_ratio(part, whole, Decimal::ONE_HUNDRED)
}

/// `part / whole × factor`, saturating to the `Decimal` range on overflow.
fn scaled_ratio(part: Decimal, whole: Decimal, factor: Decimal) -> Decimal {
    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(factor))
        .unwrap_or(if part.is_sign_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        })
}

#[cfg(test)]
mod tests;
