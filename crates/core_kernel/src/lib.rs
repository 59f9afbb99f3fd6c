//! Core Kernel - Foundational types shared by every gasTITO crate
//!
//! This crate provides the fundamental building blocks used across all domain modules:
//! - Money types with precise decimal arithmetic
//! - Calendar types for monthly budgets and reports
//! - Strongly-typed identifiers

pub mod money;
pub mod temporal;
pub mod identifiers;
pub mod error;

pub use money::{Money, Currency, MoneyError, Rate};
pub use temporal::{YearMonth, DateRange, TemporalError};
pub use identifiers::{
    UserId, GroupId, MemberId, ExpenseId, RecurringExpenseId, BudgetId, InvitationId,
};
pub use error::CoreError;
