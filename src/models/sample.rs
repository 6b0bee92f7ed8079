use rust_decimal::Decimal;

use super::{ExpenseRecord, ExpenseType};

/// Starter expenses shown when the dashboard is opened without a sheet.
/// Ids run from 1; the returned counter is the next free id.
pub(crate) fn sample_expenses(month: &str) -> (Vec<ExpenseRecord>, i64) {
    let rows: [(&str, &str, i64, ExpenseType); 9] = [
        ("Rent", "Housing", 1500, ExpenseType::Fixed),
        ("Electricity & Water", "Housing", 120, ExpenseType::Fixed),
        ("Groceries", "Food", 450, ExpenseType::Variable),
        ("Dining Out", "Food", 180, ExpenseType::Variable),
        ("Car Payment", "Transportation", 320, ExpenseType::Fixed),
        ("Streaming", "Entertainment", 45, ExpenseType::Fixed),
        ("Student Loan", "Debt", 280, ExpenseType::Fixed),
        ("Emergency Fund", "Savings", 500, ExpenseType::Fixed),
        ("Gifts", "Other", 60, ExpenseType::OneTime),
    ];

    let expenses: Vec<ExpenseRecord> = rows
        .iter()
        .zip(1..)
        .map(|((name, category, amount, expense_type), id)| ExpenseRecord {
            expense_type: *expense_type,
            ..ExpenseRecord::new(
                id,
                (*name).to_string(),
                (*category).to_string(),
                Decimal::from(*amount),
                month.to_string(),
            )
        })
        .collect();

    let next_id = expenses.len() as i64 + 1;
    (expenses, next_id)
}
