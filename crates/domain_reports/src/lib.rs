//! Reports Domain - Where the Money Went
//!
//! Read-only views over a list of expenses:
//! - Monthly totals with empty months filled in
//! - Spending by category and by member
//! - A straight-line forecast of the next few months
//!
//! Every function takes the expenses and the reporting currency
//! explicitly; an expense in any other currency is an error rather than
//! being silently converted.

pub mod trends;
pub mod breakdown;
pub mod forecast;
pub mod error;

pub use trends::{monthly_totals, MonthlyTotal};
pub use breakdown::{category_breakdown, member_spending, CategoryShare, MemberSpending};
pub use forecast::Forecast;
pub use error::ReportError;
