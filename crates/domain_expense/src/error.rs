//! Expense domain errors

use core_kernel::MoneyError;
use thiserror::Error;

/// Errors that can occur in the expense domain
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExpenseError {
    #[error("Expense amount must be positive, got {0}")]
    NonPositiveAmount(String),

    #[error("Expense description must not be empty")]
    EmptyDescription,

    #[error("Invalid schedule: {0}")]
    InvalidSchedule(String),

    #[error(transparent)]
    Money(#[from] MoneyError),
}
