use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

use super::app::{App, InputMode, PendingAction, Screen};
use crate::models::{normalize_month, ExpenseRecord, ExpenseType};
use crate::money::{format_amount, parse_decimal};

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit FinMind", cmd_quit, r);
    register_command!("quit", "Quit FinMind", cmd_quit, r);
    register_command!("d", "Go to Dashboard", cmd_dashboard, r);
    register_command!("dashboard", "Go to Dashboard", cmd_dashboard, r);
    register_command!("e", "Go to Expenses", cmd_expenses, r);
    register_command!("expenses", "Go to Expenses", cmd_expenses, r);
    register_command!("c", "Go to Categories", cmd_categories, r);
    register_command!("categories", "Go to Categories", cmd_categories, r);
    register_command!("i", "Go to Insights", cmd_insights, r);
    register_command!("insights", "Go to Insights", cmd_insights, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!("month", "Set month (e.g. :month 2026-02)", cmd_month, r);
    register_command!("m", "Set month (e.g. :m 2026-02)", cmd_month, r);
    register_command!("next-month", "Go to next month", cmd_next_month, r);
    register_command!("prev-month", "Go to previous month", cmd_prev_month, r);
    register_command!(
        "income",
        "Set monthly income (e.g. :income 5200)",
        cmd_income,
        r
    );
    register_command!(
        "add",
        "Add expense (e.g. :add 45.99 Food Groceries)",
        cmd_add,
        r
    );
    register_command!("a", "Add expense (e.g. :a 45.99 Food)", cmd_add, r);
    register_command!("rename", "Rename selected expense", cmd_rename, r);
    register_command!("recat", "Re-categorize selected expense", cmd_recat, r);
    register_command!("amount", "Change amount of selected expense", cmd_amount, r);
    register_command!(
        "type",
        "Set type of selected expense (fixed, variable, one-time)",
        cmd_type,
        r
    );
    register_command!("note", "Set note on selected expense", cmd_note, r);
    register_command!("delete", "Delete selected expense", cmd_delete, r);
    register_command!(
        "search",
        "Search expenses (e.g. :search rent)",
        cmd_search,
        r
    );
    register_command!("s", "Search expenses (e.g. :s rent)", cmd_search, r);
    register_command!(
        "load",
        "Load expenses from CSV (e.g. :load ~/budget.csv)",
        cmd_load,
        r
    );

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app)?;
    } else {
        // Try fuzzy match
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| levenshtein(input, k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_dashboard(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.screen = Screen::Dashboard;
    Ok(())
}

fn cmd_expenses(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.screen = Screen::Expenses;
    Ok(())
}

fn cmd_categories(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.screen = Screen::Categories;
    Ok(())
}

fn cmd_insights(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.screen = Screen::Insights;
    app.insights_scroll = 0;
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_month(args: &str, app: &mut App) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status(format!("Month: {}", app.current_month));
        return Ok(());
    }

    // Accept "2026-02", "2026-2", or just "02"/"2" for the current year
    let candidate = if args.len() <= 2 {
        let year = app.current_month.get(..4).unwrap_or("1970");
        format!("{year}-{args:0>2}")
    } else {
        args.to_string()
    };

    match normalize_month(&candidate) {
        Ok(month) => {
            app.set_status(format!("Switched to month: {month}"));
            app.set_month(month);
        }
        Err(e) => app.set_status(e.to_string()),
    }
    Ok(())
}

fn cmd_next_month(_args: &str, app: &mut App) -> anyhow::Result<()> {
    advance_month(app, 1)
}

fn cmd_prev_month(_args: &str, app: &mut App) -> anyhow::Result<()> {
    advance_month(app, -1)
}

fn advance_month(app: &mut App, delta: i32) -> anyhow::Result<()> {
    if app.shift_month(delta) {
        let month = app.current_month.clone();
        app.set_status(format!("Month: {month}"));
    }
    Ok(())
}

fn cmd_income(args: &str, app: &mut App) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status(format!(
            "Income: {}. Usage: :income <amount>",
            format_amount(app.income)
        ));
        return Ok(());
    }

    match parse_decimal(args) {
        Ok(income) if income >= rust_decimal::Decimal::ZERO => {
            app.set_income(income);
            app.set_status(format!("Income set to {}", format_amount(income)));
        }
        Ok(_) => app.set_status("Income cannot be negative"),
        Err(e) => app.set_status(e.to_string()),
    }
    Ok(())
}

fn cmd_add(args: &str, app: &mut App) -> anyhow::Result<()> {
    let mut parts = args.splitn(3, ' ');
    let (Some(amount_str), Some(category_str)) = (parts.next(), parts.next()) else {
        app.set_status(
            "Usage: :add <amount> <category> [name]. Example: :add 45.99 Food Groceries",
        );
        return Ok(());
    };
    if amount_str.is_empty() {
        app.set_status("Usage: :add <amount> <category> [name]");
        return Ok(());
    }

    let amount = match parse_decimal(amount_str) {
        Ok(a) => a,
        Err(e) => {
            app.set_status(e.to_string());
            return Ok(());
        }
    };

    let Some(category) = resolve_category(app, category_str) else {
        return Ok(());
    };

    let name = match parts.next().map(str::trim) {
        Some(n) if !n.is_empty() => n.to_string(),
        _ => category.clone(),
    };

    let expense = ExpenseRecord::new(
        0,
        name.clone(),
        category.clone(),
        amount,
        app.current_month.clone(),
    );
    app.add_expense(expense);
    app.set_status(format!(
        "Added {name} ({category}) {}",
        format_amount(amount)
    ));
    Ok(())
}

fn cmd_rename(args: &str, app: &mut App) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :rename <name>");
        return Ok(());
    }
    let Some(id) = selected_id(app) else {
        return Ok(());
    };
    if let Some(expense) = app.expense_mut(id) {
        expense.name = args.to_string();
    }
    app.set_status(format!("Renamed expense to: {args}"));
    Ok(())
}

fn cmd_recat(args: &str, app: &mut App) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :recat <category>");
        return Ok(());
    }
    let Some(id) = selected_id(app) else {
        return Ok(());
    };
    let Some(category) = resolve_category(app, args) else {
        return Ok(());
    };
    if let Some(expense) = app.expense_mut(id) {
        expense.category = category.clone();
    }
    app.refresh_summary();
    app.set_status(format!("Categorized as: {category}"));
    Ok(())
}

fn cmd_amount(args: &str, app: &mut App) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :amount <amount>");
        return Ok(());
    }
    let Some(id) = selected_id(app) else {
        return Ok(());
    };
    let amount = match parse_decimal(args) {
        Ok(a) => a,
        Err(e) => {
            app.set_status(e.to_string());
            return Ok(());
        }
    };
    if let Some(expense) = app.expense_mut(id) {
        expense.amount = amount;
    }
    app.refresh_summary();
    app.set_status(format!("Amount set to {}", format_amount(amount)));
    Ok(())
}

fn cmd_type(args: &str, app: &mut App) -> anyhow::Result<()> {
    if args.is_empty() {
        let types: Vec<&str> = ExpenseType::all().iter().map(|t| t.as_str()).collect();
        app.set_status(format!("Usage: :type <type>. Types: {}", types.join(", ")));
        return Ok(());
    }
    let Some(id) = selected_id(app) else {
        return Ok(());
    };
    let expense_type = ExpenseType::parse(args);
    if let Some(expense) = app.expense_mut(id) {
        expense.expense_type = expense_type;
    }
    app.set_status(format!("Type set to {expense_type}"));
    Ok(())
}

fn cmd_note(args: &str, app: &mut App) -> anyhow::Result<()> {
    let Some(id) = selected_id(app) else {
        return Ok(());
    };
    if let Some(expense) = app.expense_mut(id) {
        expense.note = args.to_string();
    }
    if args.is_empty() {
        app.set_status("Note cleared");
    } else {
        app.set_status("Note saved");
    }
    Ok(())
}

fn cmd_delete(_args: &str, app: &mut App) -> anyhow::Result<()> {
    let Some(expense) = selected_on_expenses(app) else {
        return Ok(());
    };
    let (id, name) = (expense.id, expense.name.clone());
    app.confirm_message = format!("Delete '{name}'?");
    app.pending_action = Some(PendingAction::DeleteExpense { id, name });
    app.input_mode = InputMode::Confirm;
    Ok(())
}

fn cmd_search(args: &str, app: &mut App) -> anyhow::Result<()> {
    app.search_input = args.to_string();
    app.screen = Screen::Expenses;
    app.expense_index = 0;
    app.expense_scroll = 0;

    if args.is_empty() {
        app.set_status("Search cleared");
    } else {
        let matches = app.visible_expenses().len();
        app.set_status(format!("Searching: {args} ({matches} matches)"));
    }

    Ok(())
}

fn cmd_load(args: &str, app: &mut App) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :load <file.csv>");
        return Ok(());
    }

    let path = crate::run::shellexpand(args);
    match app.load_sheet(Path::new(&path)) {
        Ok(count) => app.set_status(format!("Loaded {count} expenses from {path}")),
        Err(e) => app.set_status(format!("Load failed: {e:#}")),
    }
    Ok(())
}

// ── Helpers ──────────────────────────────────────────────────

/// Canonical configured category name, or a status message listing the valid ones.
fn resolve_category(app: &mut App, input: &str) -> Option<String> {
    match app.config.find_category(input) {
        Some(cat) => Some(cat.name.clone()),
        None => {
            let names = app.config.category_names().join(", ");
            app.set_status(format!("Unknown category '{input}'. Available: {names}"));
            None
        }
    }
}

fn selected_on_expenses(app: &mut App) -> Option<ExpenseRecord> {
    let selected = if app.screen == Screen::Expenses {
        app.selected_expense().cloned()
    } else {
        None
    };
    if selected.is_none() {
        app.set_status("Navigate to Expenses and select one first");
    }
    selected
}

fn selected_id(app: &mut App) -> Option<i64> {
    selected_on_expenses(app).map(|e| e.id)
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
