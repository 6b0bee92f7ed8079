use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::path::Path;

use crate::config::BudgetConfig;
use crate::models::{normalize_month, ExpenseRecord, ExpenseType, OTHER_CATEGORY};
use crate::money::parse_decimal;

/// Which CSV column holds each expense field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ExpenseColumns {
    pub(crate) name: Option<usize>,
    pub(crate) category: Option<usize>,
    pub(crate) amount: usize,
    pub(crate) month: Option<usize>,
    pub(crate) expense_type: Option<usize>,
    pub(crate) note: Option<usize>,
}

impl Default for ExpenseColumns {
    /// Positional layout for sheets without a header row.
    fn default() -> Self {
        Self {
            name: Some(0),
            category: Some(1),
            amount: 2,
            month: Some(3),
            expense_type: Some(4),
            note: Some(5),
        }
    }
}

const NAME_HEADERS: &[&str] = &["name", "description", "expense", "item", "label"];
const CATEGORY_HEADERS: &[&str] = &["category", "cat"];
const AMOUNT_HEADERS: &[&str] = &["amount", "cost", "value", "spend", "total"];
const MONTH_HEADERS: &[&str] = &["month", "period", "date"];
const TYPE_HEADERS: &[&str] = &["type", "expense_type", "kind"];
const NOTE_HEADERS: &[&str] = &["note", "notes", "memo"];

impl ExpenseColumns {
    /// Map header names to columns. `None` means the sheet had no header row.
    pub(crate) fn detect(headers: Option<&[String]>) -> Result<Self> {
        let Some(headers) = headers else {
            return Ok(Self::default());
        };

        let normalized: Vec<String> = headers
            .iter()
            .map(|h| h.trim().to_lowercase().replace([' ', '-'], "_"))
            .collect();
        let find = |aliases: &[&str]| normalized.iter().position(|h| aliases.contains(&h.as_str()));

        let amount = find(AMOUNT_HEADERS).with_context(|| {
            format!(
                "No amount column found in header ({}). Expected one of: {}",
                headers.join(", "),
                AMOUNT_HEADERS.join(", ")
            )
        })?;

        Ok(Self {
            name: find(NAME_HEADERS),
            category: find(CATEGORY_HEADERS),
            amount,
            month: find(MONTH_HEADERS),
            expense_type: find(TYPE_HEADERS),
            note: find(NOTE_HEADERS),
        })
    }
}

pub(crate) struct CsvImporter;

impl CsvImporter {
    /// Read the CSV and return the header row (if it has one) plus all data rows.
    pub(crate) fn read(path: &Path) -> Result<(Option<Vec<String>>, Vec<Vec<String>>)> {
        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .has_headers(false)
            .from_path(path)
            .with_context(|| format!("Failed to open CSV file {}", path.display()))?;

        let mut all_rows: Vec<Vec<String>> = Vec::new();
        for result in rdr.records() {
            let record = result.context("Failed to read CSV record")?;
            all_rows.push(record.iter().map(|s| s.to_string()).collect());
        }

        if all_rows.is_empty() {
            anyhow::bail!("CSV file is empty");
        }

        // A data row always carries an amount; a header row never does
        let looks_like_header = all_rows[0].iter().all(|field| {
            let trimmed = field.trim();
            trimmed.is_empty() || parse_decimal(trimmed).is_err()
        });

        if looks_like_header {
            let headers = all_rows.remove(0);
            Ok((Some(headers), all_rows))
        } else {
            Ok((None, all_rows))
        }
    }

    /// Parse rows into expense records. Ids come from `next_id`, which is only
    /// advanced when every row parses.
    pub(crate) fn parse(
        rows: &[Vec<String>],
        columns: &ExpenseColumns,
        config: &BudgetConfig,
        default_month: &str,
        next_id: &mut i64,
    ) -> Result<Vec<ExpenseRecord>> {
        let mut expenses = Vec::new();
        let mut id = *next_id;

        for (i, row) in rows.iter().enumerate() {
            if row.iter().all(|f| f.trim().is_empty()) {
                continue;
            }

            let raw_amount = field(row, Some(columns.amount));
            let amount = parse_decimal(raw_amount)
                .with_context(|| format!("Row {}: failed to parse amount", i + 1))?;

            let category = canonical_category(field(row, columns.category), config);

            let raw_month = field(row, columns.month);
            let month = if raw_month.is_empty() {
                default_month.to_string()
            } else {
                month_key(raw_month)
                    .with_context(|| format!("Row {}: failed to parse month", i + 1))?
            };

            let name = match field(row, columns.name) {
                "" => category.clone(),
                n => n.to_string(),
            };

            expenses.push(ExpenseRecord {
                expense_type: ExpenseType::parse(field(row, columns.expense_type)),
                note: field(row, columns.note).to_string(),
                ..ExpenseRecord::new(id, name, category, amount, month)
            });
            id += 1;
        }

        *next_id = id;
        Ok(expenses)
    }

    /// Read, detect columns and parse in one step.
    pub(crate) fn import(
        path: &Path,
        config: &BudgetConfig,
        default_month: &str,
        next_id: &mut i64,
    ) -> Result<Vec<ExpenseRecord>> {
        let (headers, rows) = Self::read(path)?;
        let columns = ExpenseColumns::detect(headers.as_deref())?;
        let expenses = Self::parse(&rows, &columns, config, default_month, next_id)
            .with_context(|| format!("Failed to import {}", path.display()))?;
        tracing::info!(
            path = %path.display(),
            rows = rows.len(),
            imported = expenses.len(),
            "Imported expense sheet"
        );
        Ok(expenses)
    }
}

fn field(row: &[String], column: Option<usize>) -> &str {
    column
        .and_then(|c| row.get(c))
        .map(|s| s.trim())
        .unwrap_or("")
}

/// Configured categories match case-insensitively; anything else is kept as typed.
fn canonical_category(raw: &str, config: &BudgetConfig) -> String {
    if raw.is_empty() {
        return OTHER_CATEGORY.to_string();
    }
    config
        .find_category(raw)
        .map_or_else(|| raw.to_string(), |c| c.name.clone())
}

/// Accept `YYYY-MM` or a full date, reduced to its month.
fn month_key(s: &str) -> Result<String> {
    if let Ok(month) = normalize_month(s) {
        return Ok(month);
    }
    for fmt in &["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(d.format("%Y-%m").to_string());
        }
    }
    anyhow::bail!("Could not parse month: {s}")
}

#[cfg(test)]
#[path = "csv_import_tests.rs"]
mod tests;
