use anyhow::{Context, Result};
use rust_decimal::Decimal;
use std::path::Path;

use crate::budget::{
    compute_budget, summarize_for_ai, target_amount, NEEDS_TARGET_PCT, SAVES_TARGET_PCT,
    WANTS_TARGET_PCT,
};
use crate::config::{self, BudgetConfig, ConfigSource};
use crate::import::CsvImporter;
use crate::models::{current_month, normalize_month, ExpenseRecord};
use crate::money::{format_amount, format_percent, parse_decimal};
use crate::ui::app::App;

pub(crate) fn as_cli(args: &[String], config: BudgetConfig, source: ConfigSource) -> Result<()> {
    match args[1].as_str() {
        "summary" | "s" => cli_summary(&args[2..], &config),
        "report" | "r" => cli_report(&args[2..], &config),
        "categories" => {
            cli_categories(&config);
            Ok(())
        }
        "config" => {
            cli_config(&source);
            Ok(())
        }
        "tui" => cli_tui(&args[2..], config),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("finmind {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("FinMind: 50/30/20 budget breakdown and financial health score");
    println!();
    println!("Usage: finmind [command]");
    println!();
    println!("Commands:");
    println!("  (none)                        Launch interactive TUI with sample expenses");
    println!("  tui <file.csv>                Launch TUI seeded from an expense sheet");
    println!("  summary <file.csv>            Print the budget breakdown");
    println!("    --income <amount>           Monthly income (default: from config)");
    println!("    --month <YYYY-MM>           Only rows for this month (default: all rows)");
    println!("  report <file.csv>             Print the plain-text financial summary");
    println!("    --income, --month           As for summary");
    println!("  categories                    List configured categories");
    println!("  config                        Show where configuration is loaded from");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
}

/// The sheet, income and month arguments shared by `summary` and `report`.
struct SheetArgs {
    expenses: Vec<ExpenseRecord>,
    income: Decimal,
    month: Option<String>,
}

fn flag<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == name)
        .map(|w| w[1].as_str())
}

fn load_sheet_args(args: &[String], config: &BudgetConfig, usage: &str) -> Result<SheetArgs> {
    let file = args
        .first()
        .filter(|a| !a.starts_with('-'))
        .ok_or_else(|| anyhow::anyhow!("Usage: {usage}"))?;
    let expanded = shellexpand(file);
    let path = Path::new(&expanded);
    if !path.exists() {
        anyhow::bail!("File not found: {file}");
    }

    let income = match flag(args, "--income") {
        Some(raw) => parse_decimal(raw).context("--income")?,
        None => config.default_income,
    };
    let month = flag(args, "--month")
        .map(normalize_month)
        .transpose()
        .context("--month")?;

    let mut next_id = 1;
    let mut expenses = CsvImporter::import(path, config, &current_month(), &mut next_id)?;
    if let Some(month) = &month {
        expenses.retain(|e| &e.month == month);
    }

    Ok(SheetArgs {
        expenses,
        income,
        month,
    })
}

fn cli_summary(args: &[String], config: &BudgetConfig) -> Result<()> {
    let sheet = load_sheet_args(
        args,
        config,
        "finmind summary <file.csv> [--income N] [--month YYYY-MM]",
    )?;
    let summary = compute_budget(&sheet.expenses, sheet.income, config);
    let period = sheet.month.as_deref().unwrap_or("all months");

    println!("FinMind — {period} ({} expenses)", sheet.expenses.len());
    println!("{}", "─".repeat(52));
    println!("  Income:        {}", format_amount(sheet.income));
    println!("  Expenses:      {}", format_amount(summary.total_expenses));
    println!("  Net Savings:   {}", format_amount(summary.net_savings));
    println!("  Savings Rate:  {}", format_percent(summary.savings_rate));
    println!(
        "  Health Score:  {}/100 ({})",
        summary.health_score,
        summary.rating()
    );

    println!();
    println!("{:<10} {:>14} {:>8} {:>14}", "Bucket", "Actual", "Share", "Target");
    let buckets = [
        ("Needs", summary.needs, summary.needs_pct, NEEDS_TARGET_PCT),
        ("Wants", summary.wants, summary.wants_pct, WANTS_TARGET_PCT),
        ("Saves", summary.saves, summary.saves_pct, SAVES_TARGET_PCT),
    ];
    for (label, amount, pct, target) in buckets {
        println!(
            "{label:<10} {:>14} {:>8} {:>14}",
            format_amount(amount),
            format_percent(pct),
            format_amount(target_amount(sheet.income, target)),
        );
    }

    if !summary.category_detail.is_empty() {
        println!();
        println!("Spending by Category:");
        for detail in &summary.category_detail {
            let flag = if detail.over_budget { "  OVER" } else { "" };
            println!(
                "  {:<20} {:>14} {:>8}{flag}",
                detail.category,
                format_amount(detail.amount),
                format_percent(detail.percent_of_income),
            );
        }
    }

    let over = summary.over_budget_count();
    if over > 0 {
        println!();
        println!(
            "{over} categor{} more than 10% over benchmark",
            if over == 1 { "y" } else { "ies" }
        );
    }
    Ok(())
}

fn cli_report(args: &[String], config: &BudgetConfig) -> Result<()> {
    let sheet = load_sheet_args(
        args,
        config,
        "finmind report <file.csv> [--income N] [--month YYYY-MM]",
    )?;
    println!("{}", summarize_for_ai(&sheet.expenses, sheet.income, config));
    Ok(())
}

fn cli_categories(config: &BudgetConfig) {
    println!("{:<20} {:<6} Benchmark", "Category", "Group");
    println!("{}", "─".repeat(40));
    for cat in &config.categories {
        let ratio = config.benchmark_ratio(&cat.name);
        let note = if cat.benchmark.is_some() { "" } else { " (default)" };
        println!(
            "{:<20} {:<6} {}{note}",
            cat.name,
            cat.group.as_str(),
            format_percent(ratio.saturating_mul(Decimal::ONE_HUNDRED)),
        );
    }
    println!();
    println!(
        "Unlisted categories use {} of income. Default income: {}",
        format_percent(config.default_benchmark.saturating_mul(Decimal::ONE_HUNDRED)),
        format_amount(config.default_income)
    );
}

fn cli_config(source: &ConfigSource) {
    println!("Active config: {source}");
    match config::default_config_path() {
        Some(path) => println!("Override path: {}", path.display()),
        None => println!("Override path: unavailable on this platform"),
    }
    println!("Set {} to use a different file", config::CONFIG_ENV);
}

fn cli_tui(args: &[String], config: BudgetConfig) -> Result<()> {
    let file = args
        .first()
        .ok_or_else(|| anyhow::anyhow!("Usage: finmind tui <file.csv>"))?;
    let app = App::from_sheet(config, Path::new(&shellexpand(file)))?;
    super::as_tui(app)
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}
