//! Report DTOs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::Currency;
use domain_reports::{CategoryShare, Forecast, MemberSpending, MonthlyTotal};
use super::expense::ExpenseInput;

#[derive(Debug, Deserialize, Validate)]
pub struct TrendsRequest {
    pub currency: Option<Currency>,
    /// Inclusive start of the reporting window
    pub from: Option<NaiveDate>,
    /// Inclusive end of the reporting window
    pub to: Option<NaiveDate>,
    /// Months to forecast; no forecast when absent
    #[validate(range(min = 1, max = 24))]
    pub forecast_months: Option<u32>,
    #[validate(nested)]
    pub expenses: Vec<ExpenseInput>,
}

#[derive(Debug, Serialize)]
pub struct TrendsResponse {
    pub currency: Currency,
    pub monthly_totals: Vec<MonthlyTotal>,
    pub categories: Vec<CategoryShare>,
    pub members: Vec<MemberSpending>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forecast: Option<Forecast>,
}
