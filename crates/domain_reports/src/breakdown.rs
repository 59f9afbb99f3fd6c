//! Spending breakdowns by category and by member

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use core_kernel::{Currency, MemberId, Money};
use domain_expense::{Expense, ExpenseCategory};
use crate::error::ReportError;

/// One category's slice of total spending
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryShare {
    pub category: ExpenseCategory,
    pub total: Money,
    /// Percentage of all spending, to 2 decimal places
    pub share_pct: Decimal,
    pub expense_count: usize,
}

/// What one member paid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberSpending {
    pub member_id: MemberId,
    pub total: Money,
    pub share_pct: Decimal,
    pub expense_count: usize,
}

fn share_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        Decimal::ZERO
    } else {
        (part / whole * dec!(100)).round_dp(2)
    }
}

/// Totals per category, largest first
///
/// Only categories with at least one expense appear. Equal totals keep
/// the order of `ExpenseCategory::ALL`.
pub fn category_breakdown(
    expenses: &[Expense],
    currency: Currency,
) -> Result<Vec<CategoryShare>, ReportError> {
    let mut sums: HashMap<ExpenseCategory, (Decimal, usize)> = HashMap::new();
    let mut grand_total = Decimal::ZERO;

    for expense in expenses {
        ReportError::check_currency(currency, expense.amount.currency())?;
        let entry = sums.entry(expense.category).or_insert((Decimal::ZERO, 0));
        entry.0 = ReportError::in_range(entry.0.checked_add(expense.amount.amount()))?;
        entry.1 += 1;
        grand_total = ReportError::in_range(grand_total.checked_add(expense.amount.amount()))?;
    }

    let mut shares: Vec<CategoryShare> = ExpenseCategory::ALL
        .iter()
        .filter_map(|category| {
            sums.get(category).map(|(total, count)| CategoryShare {
                category: *category,
                total: Money::new(*total, currency),
                share_pct: share_of(*total, grand_total),
                expense_count: *count,
            })
        })
        .collect();

    shares.sort_by(|a, b| b.total.amount().cmp(&a.total.amount()));
    Ok(shares)
}

/// Totals per paying member, largest first
///
/// Equal totals keep the order in which members first appear in `expenses`.
pub fn member_spending(
    expenses: &[Expense],
    currency: Currency,
) -> Result<Vec<MemberSpending>, ReportError> {
    let mut order: Vec<MemberId> = Vec::new();
    let mut sums: HashMap<MemberId, (Decimal, usize)> = HashMap::new();
    let mut grand_total = Decimal::ZERO;

    for expense in expenses {
        ReportError::check_currency(currency, expense.amount.currency())?;
        let entry = sums.entry(expense.payer).or_insert_with(|| {
            order.push(expense.payer);
            (Decimal::ZERO, 0)
        });
        entry.0 = ReportError::in_range(entry.0.checked_add(expense.amount.amount()))?;
        entry.1 += 1;
        grand_total = ReportError::in_range(grand_total.checked_add(expense.amount.amount()))?;
    }

    let mut spending: Vec<MemberSpending> = order
        .into_iter()
        .map(|member_id| {
            let (total, count) = sums.get(&member_id).copied().unwrap_or_default();
            MemberSpending {
                member_id,
                total: Money::new(total, currency),
                share_pct: share_of(total, grand_total),
                expense_count: count,
            }
        })
        .collect();

    spending.sort_by(|a, b| b.total.amount().cmp(&a.total.amount()));
    Ok(spending)
}
