use rust_decimal::Decimal;

use super::{
    compute_budget, BudgetSummary, NEEDS_TARGET_PCT, SAVES_TARGET_PCT, WANTS_TARGET_PCT,
};
use crate::config::BudgetConfig;
use crate::models::ExpenseRecord;
use crate::money::{format_percent, format_whole_amount};

/// Plain-text financial summary handed to the assistant.
pub(crate) fn summarize_for_ai(
    expenses: &[ExpenseRecord],
    income: Decimal,
    config: &BudgetConfig,
) -> String {
    let summary = compute_budget(expenses, income, config);
    render_report(&summary, income)
}

/// Render an already-computed summary. Line order is fixed.
pub(crate) fn render_report(summary: &BudgetSummary, income: Decimal) -> String {
    let mut lines = vec![
        format!("Monthly Income: {}", format_whole_amount(income)),
        format!("Total Expenses: {}", format_whole_amount(summary.total_expenses)),
        format!("Net Savings: {}", format_whole_amount(summary.net_savings)),
        format!("Savings Rate: {}", format_percent(summary.savings_rate)),
        bucket_line("Needs", NEEDS_TARGET_PCT, income, summary.needs, summary.needs_pct),
        bucket_line("Wants", WANTS_TARGET_PCT, income, summary.wants, summary.wants_pct),
        bucket_line("Saves", SAVES_TARGET_PCT, income, summary.saves, summary.saves_pct),
        format!(
            "Health Score: {}/100 ({})",
            summary.health_score,
            summary.rating()
        ),
        String::new(),
        "Expense Breakdown:".to_string(),
    ];

    for item in &summary.category_detail {
        let flag = if item.over_budget { " OVER BENCHMARK" } else { "" };
        lines.push(format!(
            "  {}: {} ({}){flag}",
            item.category,
            format_whole_amount(item.amount),
            format_percent(item.percent_of_income)
        ));
    }

    lines.join("\n")
}

fn bucket_line(
    label: &str,
    target: Decimal,
    income: Decimal,
    amount: Decimal,
    pct: Decimal,
) -> String {
    format!(
        "{label} ({target}% goal, {}): {} ({})",
        format_whole_amount(target_amount(income, target)),
        format_whole_amount(amount),
        format_percent(pct)
    )
}

/// The dollar value of a percent-of-income target.
pub(crate) fn target_amount(income: Decimal, target_pct: Decimal) -> Decimal {
    income.saturating_mul(target_pct) / Decimal::ONE_HUNDRED
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
