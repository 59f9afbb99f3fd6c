//! Report handlers

use axum::{extract::State, Extension, Json};
use validator::Validate;

use core_kernel::DateRange;
use domain_reports::{category_breakdown, member_spending, monthly_totals, Forecast};
use crate::auth::{permissions, require_permission, Claims};
use crate::dto::expense::to_expenses;
use crate::dto::reports::{TrendsRequest, TrendsResponse};
use crate::{AppState, error::ApiError};

/// Monthly totals, breakdowns and an optional forecast
pub async fn spending_trends(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(request): Json<TrendsRequest>,
) -> Result<Json<TrendsResponse>, ApiError> {
    require_permission(&claims, permissions::REPORT_READ)?;
    request.validate()?;

    let currency = request.currency.unwrap_or(state.config.default_currency);
    let range = match (request.from, request.to) {
        (Some(from), Some(to)) => Some(
            DateRange::new(from, to).map_err(|e| ApiError::validation(e.to_string()))?,
        ),
        (None, None) => None,
        _ => return Err(ApiError::validation("from and to must be given together")),
    };

    let expenses: Vec<_> = to_expenses(&request.expenses, currency, None)?
        .into_iter()
        .filter(|e| range.map_or(true, |r| r.contains(e.spent_on)))
        .collect();

    let totals = monthly_totals(&expenses, currency, range)?;
    let forecast = request
        .forecast_months
        .map(|months| Forecast::linear(&totals, months))
        .transpose()?;

    Ok(Json(TrendsResponse {
        currency,
        categories: category_breakdown(&expenses, currency)?,
        members: member_spending(&expenses, currency)?,
        monthly_totals: totals,
        forecast,
    }))
}
