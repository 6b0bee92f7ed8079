use anyhow::Result;
use rust_decimal::Decimal;
use std::path::Path;

use crate::budget::{compute_budget, render_report, BudgetSummary};
use crate::config::BudgetConfig;
use crate::import::CsvImporter;
use crate::models::{current_month, sample_expenses, shift_month, ExpenseRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Dashboard,
    Expenses,
    Categories,
    Insights,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[
            Self::Dashboard,
            Self::Expenses,
            Self::Categories,
            Self::Insights,
        ]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dashboard => write!(f, "Dashboard"),
            Self::Expenses => write!(f, "Expenses"),
            Self::Categories => write!(f, "Categories"),
            Self::Insights => write!(f, "Insights"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Search,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Search => write!(f, "SEARCH"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PendingAction {
    DeleteExpense { id: i64, name: String },
}

/// Session state for the dashboard. Expenses live only in memory.
pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) search_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,
    pub(crate) current_month: String,

    pub(crate) config: BudgetConfig,
    pub(crate) income: Decimal,
    /// Every month's records; screens filter to `current_month`.
    pub(crate) expenses: Vec<ExpenseRecord>,
    pub(crate) next_id: i64,
    /// Engine output for `current_month`, recomputed after every change.
    pub(crate) summary: BudgetSummary,

    // Expenses
    pub(crate) expense_index: usize,
    pub(crate) expense_scroll: usize,

    // Categories
    pub(crate) category_index: usize,

    // Insights
    pub(crate) insights_scroll: usize,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new(
        config: BudgetConfig,
        expenses: Vec<ExpenseRecord>,
        next_id: i64,
        month: String,
    ) -> Self {
        let income = config.default_income;
        let mut app = Self {
            running: true,
            screen: Screen::Dashboard,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            search_input: String::new(),
            status_message: String::new(),
            show_help: false,
            current_month: month,

            summary: BudgetSummary::empty(income),
            config,
            income,
            expenses,
            next_id,

            expense_index: 0,
            expense_scroll: 0,

            category_index: 0,

            insights_scroll: 0,

            pending_action: None,
            confirm_message: String::new(),

            visible_rows: 20,
        };
        app.refresh_summary();
        app
    }

    /// A session seeded with the starter expenses for this month.
    pub(crate) fn with_samples(config: BudgetConfig) -> Self {
        let month = current_month();
        let (expenses, next_id) = sample_expenses(&month);
        Self::new(config, expenses, next_id, month)
    }

    /// A session seeded from an expense sheet, opened on its latest month.
    pub(crate) fn from_sheet(config: BudgetConfig, path: &Path) -> Result<Self> {
        let mut next_id = 1;
        let month = current_month();
        let expenses = CsvImporter::import(path, &config, &month, &mut next_id)?;
        let start = latest_month(&expenses).unwrap_or(month);
        let mut app = Self::new(config, expenses, next_id, start);
        app.set_status(format!(
            "Loaded {} expenses from {}",
            app.expenses.len(),
            path.display()
        ));
        Ok(app)
    }

    pub(crate) fn refresh_summary(&mut self) {
        let month: Vec<ExpenseRecord> = self
            .expenses
            .iter()
            .filter(|e| e.month == self.current_month)
            .cloned()
            .collect();
        self.summary = compute_budget(&month, self.income, &self.config);
        self.clamp_selection();
    }

    /// The current month's expenses that pass the search filter, in list order.
    pub(crate) fn visible_expenses(&self) -> Vec<&ExpenseRecord> {
        self.expenses
            .iter()
            .filter(|e| e.month == self.current_month)
            .filter(|e| self.search_input.is_empty() || e.matches(&self.search_input))
            .collect()
    }

    pub(crate) fn month_expense_count(&self) -> usize {
        self.expenses
            .iter()
            .filter(|e| e.month == self.current_month)
            .count()
    }

    pub(crate) fn selected_expense(&self) -> Option<&ExpenseRecord> {
        self.visible_expenses().get(self.expense_index).copied()
    }

    pub(crate) fn expense_mut(&mut self, id: i64) -> Option<&mut ExpenseRecord> {
        self.expenses.iter_mut().find(|e| e.id == id)
    }

    pub(crate) fn add_expense(&mut self, mut expense: ExpenseRecord) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        expense.id = id;
        self.expenses.push(expense);
        self.refresh_summary();
        id
    }

    pub(crate) fn remove_expense(&mut self, id: i64) -> Option<ExpenseRecord> {
        let pos = self.expenses.iter().position(|e| e.id == id)?;
        let removed = self.expenses.remove(pos);
        self.refresh_summary();
        Some(removed)
    }

    pub(crate) fn set_month(&mut self, month: String) {
        self.current_month = month;
        self.expense_index = 0;
        self.expense_scroll = 0;
        self.refresh_summary();
    }

    pub(crate) fn shift_month(&mut self, delta: i32) -> bool {
        match shift_month(&self.current_month, delta) {
            Some(month) => {
                self.set_month(month);
                true
            }
            None => false,
        }
    }

    pub(crate) fn set_income(&mut self, income: Decimal) {
        self.income = income;
        self.refresh_summary();
    }

    /// Append a sheet's rows to the session. Returns how many were added.
    pub(crate) fn load_sheet(&mut self, path: &Path) -> Result<usize> {
        let loaded =
            CsvImporter::import(path, &self.config, &self.current_month, &mut self.next_id)?;
        let count = loaded.len();
        self.expenses.extend(loaded);
        self.refresh_summary();
        Ok(count)
    }

    pub(crate) fn report_text(&self) -> String {
        render_report(&self.summary, self.income)
    }

    pub(crate) fn clamp_selection(&mut self) {
        let len = self.visible_expenses().len();
        if self.expense_index >= len {
            self.expense_index = len.saturating_sub(1);
        }
        if self.expense_scroll > self.expense_index {
            self.expense_scroll = self.expense_index;
        }
        let cats = self.config.categories.len();
        if self.category_index >= cats {
            self.category_index = cats.saturating_sub(1);
        }
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}

fn latest_month(expenses: &[ExpenseRecord]) -> Option<String> {
    expenses.iter().map(|e| e.month.clone()).max()
}
