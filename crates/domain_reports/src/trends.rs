//! Monthly spending totals

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use core_kernel::{Currency, DateRange, Money, YearMonth};
use domain_expense::Expense;
use crate::error::ReportError;

/// Total spent in one calendar month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTotal {
    pub month: YearMonth,
    pub total: Money,
    pub expense_count: usize,
}

impl MonthlyTotal {
    pub fn empty(month: YearMonth, currency: Currency) -> Self {
        Self {
            month,
            total: Money::zero(currency),
            expense_count: 0,
        }
    }
}

/// Sums expenses per month, oldest first
///
/// With a `range`, only expenses inside it count and every month the range
/// touches is reported. Without one, the report runs from the first to the
/// last month that has an expense. Months with no spending are included
/// with a zero total either way.
///
/// # Errors
///
/// `ReportError::CurrencyMismatch` if a counted expense is not in `currency`,
/// `ReportError::Overflow` if a month's total leaves `Decimal`'s range
pub fn monthly_totals(
    expenses: &[Expense],
    currency: Currency,
    range: Option<DateRange>,
) -> Result<Vec<MonthlyTotal>, ReportError> {
    let mut by_month: BTreeMap<YearMonth, (Decimal, usize)> = BTreeMap::new();

    for expense in expenses {
        if range.is_some_and(|r| !r.contains(expense.spent_on)) {
            continue;
        }
        ReportError::check_currency(currency, expense.amount.currency())?;

        let entry = by_month
            .entry(YearMonth::from_date(expense.spent_on))
            .or_insert((Decimal::ZERO, 0));
        entry.0 = ReportError::in_range(entry.0.checked_add(expense.amount.amount()))?;
        entry.1 += 1;
    }

    let bounds = match range {
        Some(r) => Some((YearMonth::from_date(r.start), YearMonth::from_date(r.end))),
        None => by_month
            .first_key_value()
            .zip(by_month.last_key_value())
            .map(|((first, _), (last, _))| (*first, *last)),
    };

    let Some((first, last)) = bounds else {
        return Ok(Vec::new());
    };

    let totals: Vec<MonthlyTotal> = first
        .months_until(last)
        .map(|month| match by_month.get(&month) {
            Some((total, count)) => MonthlyTotal {
                month,
                total: Money::new(*total, currency),
                expense_count: *count,
            },
            None => MonthlyTotal::empty(month, currency),
        })
        .collect();

    debug!(
        months = totals.len(),
        expenses = expenses.len(),
        "Monthly totals computed"
    );

    Ok(totals)
}
