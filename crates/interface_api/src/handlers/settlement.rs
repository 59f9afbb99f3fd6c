//! Settlement handlers

use axum::{extract::State, Extension, Json};
use chrono::Utc;
use tracing::info;
use validator::Validate;

use domain_group::Member;
use domain_settlement::{SettlementCalculator, SettlementOptions};
use crate::auth::{permissions, require_permission, Claims};
use crate::dto::expense::to_expenses;
use crate::dto::settlement::{SettlementRequest, SettlementResponse};
use crate::{AppState, error::ApiError};

/// Computes balances and the transfers that settle them
pub async fn compute_settlement(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(request): Json<SettlementRequest>,
) -> Result<Json<SettlementResponse>, ApiError> {
    require_permission(&claims, permissions::SETTLEMENT_COMPUTE)?;
    request.validate()?;

    let currency = request.currency.unwrap_or(state.config.default_currency);
    let members: Vec<Member> = request.members.iter().map(|m| m.to_member()).collect();
    let expenses = to_expenses(&request.expenses, currency, Some(Utc::now().date_naive()))?;

    let report = SettlementCalculator::new(currency)
        .with_options(SettlementOptions {
            epsilon: state.config.settlement_epsilon,
        })
        .compute(&members, &expenses)?;

    info!(
        user = %claims.sub,
        members = members.len(),
        expenses = expenses.len(),
        transfers = report.transfers.len(),
        "Settlement computed"
    );

    Ok(Json(SettlementResponse::try_from(report)?))
}
