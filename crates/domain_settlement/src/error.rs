//! Settlement domain errors

use core_kernel::{Currency, ExpenseId, MemberId};
use thiserror::Error;

/// Errors that can occur while computing a settlement
///
/// Every failure is an input problem: the computation is deterministic,
/// so retrying with the same input fails the same way.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettlementError {
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),
}

/// Reasons the balance computation rejects its input
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidInput {
    #[error("no members to split between")]
    NoMembers,

    #[error("member {0} appears more than once")]
    DuplicateMember(MemberId),

    #[error("expense {expense} was paid by {payer}, who is not a member")]
    UnknownPayer { expense: ExpenseId, payer: MemberId },

    #[error("expense {0} has a negative amount")]
    NegativeAmount(ExpenseId),

    #[error("expense {0} pushes the group total past the largest representable amount")]
    AmountOverflow(ExpenseId),

    #[error("expense {expense} is in {found}, settlement is in {expected}")]
    CurrencyMismatch {
        expense: ExpenseId,
        expected: Currency,
        found: Currency,
    },
}
