//! Straight-line spending forecast

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use core_kernel::Money;
use crate::error::ReportError;
use crate::trends::MonthlyTotal;

/// A least-squares trend line and the months it predicts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    /// Change in spending per month
    pub slope: Decimal,
    /// Fitted spending for the first month of history
    pub intercept: Decimal,
    /// Predicted totals for the months after the history, never negative
    pub predictions: Vec<MonthlyTotal>,
}

impl Forecast {
    /// Fits an ordinary least squares line through `history`
    ///
    /// The x value of each point is its distance in months from the first
    /// point, so gaps in the history are handled. Predictions start the
    /// month after the last point.
    ///
    /// # Errors
    ///
    /// - `InvalidHorizon` when `horizon` is zero
    /// - `InsufficientData` with fewer than two points, or when every
    ///   point falls in the same month
    /// - `CurrencyMismatch` when the history mixes currencies
    /// - `Overflow` when the fit or a prediction leaves `Decimal`'s range,
    ///   or a predicted month falls past the supported calendar
    pub fn linear(history: &[MonthlyTotal], horizon: u32) -> Result<Self, ReportError> {
        if horizon == 0 {
            return Err(ReportError::InvalidHorizon);
        }
        let (first, last) = match history {
            [first, .., last] => (first, last),
            _ => {
                return Err(ReportError::InsufficientData {
                    required: 2,
                    found: history.len(),
                })
            }
        };

        let currency = first.total.currency();
        let n = Decimal::from(history.len());
        let (mut sum_x, mut sum_y, mut sum_xy, mut sum_xx) =
            (Decimal::ZERO, Decimal::ZERO, Decimal::ZERO, Decimal::ZERO);

        for point in history {
            ReportError::check_currency(currency, point.total.currency())?;
            let x = Decimal::from(first.month.months_between(&point.month));
            let y = point.total.amount();
            sum_x += x;
            sum_xx += x * x;
            sum_y = ReportError::in_range(sum_y.checked_add(y))?;
            sum_xy = ReportError::in_range(x.checked_mul(y).and_then(|xy| sum_xy.checked_add(xy)))?;
        }

        // x values are whole months, so this is zero only when every point
        // shares a month.
        let denominator = n * sum_xx - sum_x * sum_x;
        if denominator.is_zero() {
            return Err(ReportError::InsufficientData {
                required: 2,
                found: 1,
            });
        }

        let slope = ReportError::in_range(
            n.checked_mul(sum_xy)
                .zip(sum_x.checked_mul(sum_y))
                .and_then(|(a, b)| a.checked_sub(b))
                .and_then(|numerator| numerator.checked_div(denominator)),
        )?;
        let intercept = ReportError::in_range(
            slope
                .checked_mul(sum_x)
                .and_then(|drift| sum_y.checked_sub(drift))
                .and_then(|offset| offset.checked_div(n)),
        )?;

        let last_x = first.month.months_between(&last.month);
        let predictions = (1..=horizon)
            .map(|step| {
                let x = Decimal::from(last_x + i64::from(step));
                let predicted = ReportError::in_range(
                    slope.checked_mul(x).and_then(|rise| intercept.checked_add(rise)),
                )?;
                Ok(MonthlyTotal {
                    month: last.month.plus_months(step).ok_or(ReportError::Overflow)?,
                    total: Money::new(predicted.max(Decimal::ZERO), currency).round_to_currency(),
                    expense_count: 0,
                })
            })
            .collect::<Result<Vec<_>, ReportError>>()?;

        debug!(
            points = history.len(),
            horizon,
            slope = %slope,
            intercept = %intercept,
            "Linear forecast fitted"
        );

        Ok(Self {
            slope,
            intercept,
            predictions,
        })
    }

    /// Sum of all predicted months, `None` past `Decimal::MAX`
    pub fn predicted_total(&self) -> Option<Decimal> {
        self.predictions
            .iter()
            .try_fold(Decimal::ZERO, |acc, p| acc.checked_add(p.total.amount()))
    }
}
