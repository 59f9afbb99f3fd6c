//! Settlement Domain - Who Owes Whom
//!
//! Splits a group's expenses equally between its members and works out
//! the transfers that square everyone up.
//!
//! # Flow
//!
//! ```text
//! (members, expenses) -> BalanceCalculator -> BalanceSheet -> SettlementMatcher -> [Transfer]
//! ```
//!
//! # Sign Convention
//!
//! - **Positive balance**: creditor, paid more than their equal share and is owed money
//! - **Negative balance**: debtor, paid less than their share and owes money
//!
//! Balances always sum to zero, because the equal share multiplied by the
//! member count is the group total.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_settlement::compute_balances_and_settlement;
//!
//! let report = compute_balances_and_settlement(group.members(), &expenses, Currency::PHP)?;
//! for transfer in &report.transfers {
//!     println!("{} pays {} {}", transfer.from_label, transfer.to_label, transfer.amount);
//! }
//! ```

pub mod balance;
pub mod matcher;
pub mod settlement;
pub mod error;

pub use balance::{BalanceCalculator, BalanceSheet, MemberBalance, ZERO_SUM_TOLERANCE};
pub use matcher::{SettlementMatcher, Transfer, DEFAULT_EPSILON};
pub use settlement::{
    apply_transfers, compute_balances_and_settlement, PrecisionWarning, SettlementCalculator,
    SettlementOptions, SettlementReport,
};
pub use error::{InvalidInput, SettlementError};
