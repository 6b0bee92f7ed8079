use rust_decimal::Decimal;

/// Category name every blank category falls back to.
pub(crate) const OTHER_CATEGORY: &str = "Other";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ExpenseType {
    Fixed,
    Variable,
    OneTime,
}

impl ExpenseType {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Fixed => "Fixed",
            Self::Variable => "Variable",
            Self::OneTime => "One-time",
        }
    }

    pub(crate) fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "fixed" | "recurring" => Self::Fixed,
            "one-time" | "onetime" | "one time" | "once" => Self::OneTime,
            _ => Self::Variable,
        }
    }

    pub(crate) fn all() -> &'static [ExpenseType] {
        &[Self::Fixed, Self::Variable, Self::OneTime]
    }
}

impl std::fmt::Display for ExpenseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One month's spend in one category, as recorded by the user.
///
/// Only `category` and `amount` feed the budget engine; the rest is
/// bookkeeping for whoever owns the list.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ExpenseRecord {
    pub(crate) id: i64,
    pub(crate) name: String,
    pub(crate) category: String,
    pub(crate) amount: Decimal,
    /// Format: "YYYY-MM"
    pub(crate) month: String,
    pub(crate) expense_type: ExpenseType,
    pub(crate) note: String,
}

impl ExpenseRecord {
    pub(crate) fn new(
        id: i64,
        name: String,
        category: String,
        amount: Decimal,
        month: String,
    ) -> Self {
        Self {
            id,
            name,
            category,
            amount,
            month,
            expense_type: ExpenseType::Variable,
            note: String::new(),
        }
    }

    /// Category used for grouping; blank categories count as "Other".
    pub(crate) fn category_key(&self) -> &str {
        let trimmed = self.category.trim();
        if trimmed.is_empty() {
            OTHER_CATEGORY
        } else {
            trimmed
        }
    }

    /// Case-insensitive match on name or category, used by the expense search.
    pub(crate) fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.name.to_lowercase().contains(&query) || self.category.to_lowercase().contains(&query)
    }
}
