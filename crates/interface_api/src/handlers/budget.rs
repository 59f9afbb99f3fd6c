//! Budget handlers

use axum::{extract::State, Extension, Json};
use rust_decimal::Decimal;
use validator::Validate;

use core_kernel::{Money, Rate};
use domain_expense::{Budget, BudgetUsage};
use crate::auth::{permissions, require_permission, Claims};
use crate::dto::budget::EvaluateBudgetRequest;
use crate::dto::expense::to_expenses;
use crate::{AppState, error::ApiError};

/// Measures the given expenses against a budget
pub async fn evaluate_budget(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(request): Json<EvaluateBudgetRequest>,
) -> Result<Json<BudgetUsage>, ApiError> {
    require_permission(&claims, permissions::BUDGET_READ)?;
    request.validate()?;

    if request.limit <= Decimal::ZERO {
        return Err(ApiError::validation("limit must be positive"));
    }

    let currency = request.currency.unwrap_or(state.config.default_currency);
    let mut budget = Budget::new(request.scope, Money::new(request.limit, currency), request.period);
    if let Some(category) = request.category {
        budget = budget.for_category(category);
    }
    if let Some(pct) = request.alert_threshold_pct {
        budget = budget.with_alert_threshold(Rate::from_percentage(Decimal::from(pct)));
    }

    let expenses = to_expenses(&request.expenses, currency, Some(request.period.first_day()))?;
    let usage = budget.evaluate(&expenses)?;

    Ok(Json(usage))
}
