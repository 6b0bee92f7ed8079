mod expense;
mod month;
mod sample;

pub(crate) use expense::{ExpenseRecord, ExpenseType, OTHER_CATEGORY};
pub(crate) use month::{current_month, normalize_month, shift_month};
pub(crate) use sample::sample_expenses;

#[cfg(test)]
mod tests;
