//! Expense payloads shared by every endpoint

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::{Validate, ValidationError};

use core_kernel::{Currency, GroupId, MemberId, Money};
use domain_expense::{Expense, ExpenseCategory};
use crate::error::ApiError;

/// Largest single amount a request may carry: one trillion
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);

/// Rejects amounts whose magnitude exceeds `MAX_AMOUNT`
pub fn validate_amount(amount: &Decimal) -> Result<(), ValidationError> {
    if amount.abs() > MAX_AMOUNT {
        let mut error = ValidationError::new("amount_too_large");
        error.message = Some(format!("must not exceed {MAX_AMOUNT}").into());
        return Err(error);
    }
    Ok(())
}

#[derive(Debug, Deserialize, Validate)]
pub struct ExpenseInput {
    pub payer_id: MemberId,
    #[validate(custom(function = "validate_amount"))]
    pub amount: Decimal,
    #[validate(length(max = 200))]
    pub description: Option<String>,
    #[serde(default)]
    pub category: ExpenseCategory,
    pub spent_on: Option<NaiveDate>,
    pub group_id: Option<GroupId>,
}

impl ExpenseInput {
    /// Builds the domain expense
    ///
    /// `default_date` is used when the payload has no `spent_on`; without
    /// either the expense is rejected.
    pub fn to_expense(
        &self,
        currency: Currency,
        default_date: Option<NaiveDate>,
    ) -> Result<Expense, ApiError> {
        let spent_on = self
            .spent_on
            .or(default_date)
            .ok_or_else(|| ApiError::validation("spent_on is required"))?;
        let description = self
            .description
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or("Shared expense");

        let expense = Expense::new(
            self.payer_id,
            Money::new(self.amount, currency),
            description,
            self.category,
            spent_on,
        )?;

        Ok(match self.group_id {
            Some(group) => expense.with_group(group),
            None => expense,
        })
    }
}

/// Converts every input, stopping at the first invalid one
pub fn to_expenses(
    inputs: &[ExpenseInput],
    currency: Currency,
    default_date: Option<NaiveDate>,
) -> Result<Vec<Expense>, ApiError> {
    inputs
        .iter()
        .map(|input| input.to_expense(currency, default_date))
        .collect()
}
