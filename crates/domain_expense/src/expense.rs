//! Expenses and their categories

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::{ExpenseId, GroupId, MemberId, Money, RecurringExpenseId};
use crate::error::ExpenseError;

/// Spending category
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    Food,
    Transportation,
    Housing,
    Utilities,
    Entertainment,
    Healthcare,
    Shopping,
    Education,
    #[default]
    Other,
}

impl ExpenseCategory {
    pub const ALL: [ExpenseCategory; 9] = [
        ExpenseCategory::Food,
        ExpenseCategory::Transportation,
        ExpenseCategory::Housing,
        ExpenseCategory::Utilities,
        ExpenseCategory::Entertainment,
        ExpenseCategory::Healthcare,
        ExpenseCategory::Shopping,
        ExpenseCategory::Education,
        ExpenseCategory::Other,
    ];
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExpenseCategory::Food => "food",
            ExpenseCategory::Transportation => "transportation",
            ExpenseCategory::Housing => "housing",
            ExpenseCategory::Utilities => "utilities",
            ExpenseCategory::Entertainment => "entertainment",
            ExpenseCategory::Healthcare => "healthcare",
            ExpenseCategory::Shopping => "shopping",
            ExpenseCategory::Education => "education",
            ExpenseCategory::Other => "other",
        };
        f.write_str(name)
    }
}

/// A recorded expense
///
/// `group_id` is `None` for personal expenses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    pub group_id: Option<GroupId>,
    /// Member who paid
    pub payer: MemberId,
    pub amount: Money,
    pub description: String,
    pub category: ExpenseCategory,
    pub spent_on: NaiveDate,
    /// Schedule that generated this expense, if any
    pub recurring_id: Option<RecurringExpenseId>,
    pub created_at: DateTime<Utc>,
}

impl Expense {
    /// Creates a new expense
    ///
    /// # Errors
    ///
    /// - `NonPositiveAmount` if the amount is zero or negative
    /// - `EmptyDescription` if the description is blank
    pub fn new(
        payer: MemberId,
        amount: Money,
        description: impl Into<String>,
        category: ExpenseCategory,
        spent_on: NaiveDate,
    ) -> Result<Self, ExpenseError> {
        if !amount.is_positive() {
            return Err(ExpenseError::NonPositiveAmount(amount.to_string()));
        }
        let description = description.into().trim().to_string();
        if description.is_empty() {
            return Err(ExpenseError::EmptyDescription);
        }

        Ok(Self {
            id: ExpenseId::new_v7(),
            group_id: None,
            payer,
            amount,
            description,
            category,
            spent_on,
            recurring_id: None,
            created_at: Utc::now(),
        })
    }

    /// Attaches the expense to a group
    pub fn with_group(mut self, group_id: GroupId) -> Self {
        self.group_id = Some(group_id);
        self
    }

    pub fn is_shared(&self) -> bool {
        self.group_id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::Currency;
    use rust_decimal_macros::dec;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    #[test]
    fn test_zero_amount_rejected() {
        let result = Expense::new(
            MemberId::new(),
            Money::zero(Currency::PHP),
            "Jeepney",
            ExpenseCategory::Transportation,
            today(),
        );
        assert!(matches!(result, Err(ExpenseError::NonPositiveAmount(_))));
    }

    #[test]
    fn test_description_trimmed() {
        let expense = Expense::new(
            MemberId::new(),
            Money::new(dec!(13), Currency::PHP),
            "  Jeepney ",
            ExpenseCategory::Transportation,
            today(),
        )
        .unwrap();
        assert_eq!(expense.description, "Jeepney");
        assert!(!expense.is_shared());
    }
}
