//! Expense Domain
//!
//! Personal and shared expenses, the schedules that generate recurring
//! ones, and the monthly budgets they are measured against.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_expense::{Expense, ExpenseCategory, Budget, BudgetScope};
//!
//! let lunch = Expense::new(payer, Money::new(dec!(250), Currency::PHP), "Lunch", ExpenseCategory::Food, today)?;
//! let budget = Budget::new(BudgetScope::Member(payer), limit, YearMonth::from_date(today));
//! let usage = budget.evaluate(&[lunch])?;
//! ```

pub mod expense;
pub mod recurring;
pub mod budget;
pub mod error;

pub use expense::{Expense, ExpenseCategory};
pub use recurring::{Frequency, RecurringExpense};
pub use budget::{Budget, BudgetScope, BudgetStatus, BudgetUsage};
pub use error::ExpenseError;
