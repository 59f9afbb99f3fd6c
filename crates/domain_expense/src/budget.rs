//! Monthly budgets
//!
//! A budget is always passed in explicitly alongside the expenses it is
//! measured against; nothing here reads ambient state.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use core_kernel::{BudgetId, GroupId, MemberId, Money, MoneyError, Rate, YearMonth};
use crate::error::ExpenseError;
use crate::expense::{Expense, ExpenseCategory};

/// Whose spending a budget covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum BudgetScope {
    /// All expenses recorded against the group
    Group(GroupId),
    /// Expenses paid by one member
    Member(MemberId),
}

impl BudgetScope {
    fn covers(&self, expense: &Expense) -> bool {
        match self {
            BudgetScope::Group(group) => expense.group_id == Some(*group),
            BudgetScope::Member(member) => expense.payer == *member,
        }
    }
}

/// Budget health
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
    UnderBudget,
    /// At or above the alert threshold but not over the limit
    NearLimit,
    OverBudget,
}

/// A spending limit for one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: BudgetId,
    pub scope: BudgetScope,
    pub limit: Money,
    pub period: YearMonth,
    /// Restricts the budget to a single category
    pub category: Option<ExpenseCategory>,
    pub alert_threshold: Rate,
}

impl Budget {
    /// Creates a budget with the default 80% alert threshold
    pub fn new(scope: BudgetScope, limit: Money, period: YearMonth) -> Self {
        Self {
            id: BudgetId::new_v7(),
            scope,
            limit,
            period,
            category: None,
            alert_threshold: Rate::from_percentage(dec!(80)),
        }
    }

    pub fn for_category(mut self, category: ExpenseCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_alert_threshold(mut self, threshold: Rate) -> Self {
        self.alert_threshold = threshold;
        self
    }

    fn applies_to(&self, expense: &Expense) -> bool {
        self.period.contains(expense.spent_on)
            && self.scope.covers(expense)
            && self.category.map_or(true, |c| c == expense.category)
    }

    /// Measures spending against the limit
    ///
    /// Expenses outside the period, scope or category are ignored.
    ///
    /// # Errors
    ///
    /// Returns a money error if a counted expense is in a different currency
    /// or the amounts are too large to total
    pub fn evaluate(&self, expenses: &[Expense]) -> Result<BudgetUsage, ExpenseError> {
        let counted: Vec<&Expense> = expenses.iter().filter(|e| self.applies_to(e)).collect();
        let spent = Money::try_sum(counted.iter().copied().map(|e| &e.amount), self.limit.currency())?;
        let remaining = self.limit.checked_sub(&spent)?;

        let utilisation_pct = if self.limit.is_zero() {
            if spent.is_zero() { Decimal::ZERO } else { dec!(100) }
        } else {
            spent
                .amount()
                .checked_div(self.limit.amount())
                .and_then(|ratio| ratio.checked_mul(dec!(100)))
                .ok_or(MoneyError::Overflow)?
                .round_dp(2)
        };

        let status = if spent.amount() > self.limit.amount() {
            BudgetStatus::OverBudget
        } else if spent.amount() >= self.alert_threshold.apply(&self.limit)?.amount()
            && !spent.is_zero()
        {
            BudgetStatus::NearLimit
        } else {
            BudgetStatus::UnderBudget
        };

        debug!(
            budget_id = %self.id,
            period = %self.period,
            spent = %spent,
            status = ?status,
            "Budget evaluated"
        );

        Ok(BudgetUsage {
            budget_id: self.id,
            period: self.period,
            limit: self.limit,
            spent,
            remaining,
            utilisation_pct,
            expense_count: counted.len(),
            status,
        })
    }
}

/// Result of evaluating a budget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetUsage {
    pub budget_id: BudgetId,
    pub period: YearMonth,
    pub limit: Money,
    pub spent: Money,
    /// Negative when over budget
    pub remaining: Money,
    pub utilisation_pct: Decimal,
    pub expense_count: usize,
    pub status: BudgetStatus,
}
