//! Report errors

use core_kernel::Currency;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur while building a report
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReportError {
    #[error("Not enough data: need at least {required} points, got {found}")]
    InsufficientData { required: usize, found: usize },

    #[error("Forecast horizon must be at least one month")]
    InvalidHorizon,

    #[error("Currency mismatch: report is in {expected}, found {found}")]
    CurrencyMismatch { expected: Currency, found: Currency },

    #[error("Report value out of range")]
    Overflow,
}

impl ReportError {
    pub(crate) fn check_currency(expected: Currency, found: Currency) -> Result<(), Self> {
        if expected == found {
            Ok(())
        } else {
            Err(Self::CurrencyMismatch { expected, found })
        }
    }

    /// Unwraps the result of a `checked_*` operation
    pub(crate) fn in_range(value: Option<Decimal>) -> Result<Decimal, Self> {
        value.ok_or(Self::Overflow)
    }
}
