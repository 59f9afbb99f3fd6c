//! Custom Test Assertions
//!
//! Assertion helpers for domain types that give more meaningful failure
//! messages than plain `assert!`.

use core_kernel::Money;
use domain_settlement::{apply_transfers, SettlementReport, ZERO_SUM_TOLERANCE};
use rust_decimal::Decimal;

/// Asserts that two Money values are approximately equal within a tolerance
///
/// # Panics
///
/// Panics if the currencies don't match or the amounts differ by more than tolerance
pub fn assert_money_approx_eq(actual: &Money, expected: &Money, tolerance: Decimal) {
    assert_eq!(
        actual.currency(),
        expected.currency(),
        "Currency mismatch: actual={}, expected={}",
        actual.currency(),
        expected.currency()
    );

    let diff = (actual.amount() - expected.amount()).abs();
    assert!(
        diff <= tolerance,
        "Money amounts differ by more than tolerance: actual={}, expected={}, diff={}, tolerance={}",
        actual.amount(),
        expected.amount(),
        diff,
        tolerance
    );
}

/// Asserts that money values sum to a total
pub fn assert_money_sum_equals(parts: &[Money], total: &Money) {
    let sum = Money::try_sum(parts, total.currency()).expect("Currency mismatch in sum");

    assert_eq!(
        sum.amount(),
        total.amount(),
        "Sum of parts ({}) doesn't equal total ({})",
        sum.amount(),
        total.amount()
    );
}

/// Asserts that the report's balances sum to zero
pub fn assert_zero_sum(report: &SettlementReport) {
    let sum: Decimal = report.balances.iter().map(|b| b.balance).sum();
    assert!(
        sum.abs() <= ZERO_SUM_TOLERANCE,
        "Balances sum to {} instead of zero",
        sum
    );
}

/// Asserts that applying the report's transfers leaves everyone within `epsilon`
pub fn assert_transfers_settle(report: &SettlementReport, epsilon: Decimal) {
    for (member, residual) in apply_transfers(&report.balances, &report.transfers) {
        assert!(
            residual.abs() <= epsilon,
            "{} is left with {} after all transfers",
            member,
            residual
        );
    }
}

/// Asserts that no member both pays and receives
pub fn assert_no_member_pays_and_receives(report: &SettlementReport) {
    for transfer in &report.transfers {
        assert!(
            !report.transfers.iter().any(|t| t.to == transfer.from),
            "{} both pays and receives",
            transfer.from_label
        );
    }
}
