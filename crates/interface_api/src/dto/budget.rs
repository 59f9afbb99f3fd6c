//! Budget DTOs

use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use core_kernel::{Currency, YearMonth};
use domain_expense::{BudgetScope, ExpenseCategory};
use super::expense::{validate_amount, ExpenseInput};

#[derive(Debug, Deserialize, Validate)]
pub struct EvaluateBudgetRequest {
    pub currency: Option<Currency>,
    pub scope: BudgetScope,
    #[validate(custom(function = "validate_amount"))]
    pub limit: Decimal,
    /// Budget month as `YYYY-MM`
    pub period: YearMonth,
    pub category: Option<ExpenseCategory>,
    /// Percentage of the limit at which the budget is near its limit
    #[validate(range(min = 1, max = 100))]
    pub alert_threshold_pct: Option<u32>,
    #[validate(nested)]
    pub expenses: Vec<ExpenseInput>,
}
