//! Balances plus transfers in one report

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, warn};

use core_kernel::{Currency, MemberId};
use domain_expense::Expense;
use domain_group::Member;
use crate::balance::{BalanceCalculator, MemberBalance};
use crate::error::SettlementError;
use crate::matcher::{SettlementMatcher, Transfer, DEFAULT_EPSILON};

/// Tunables for a settlement run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementOptions {
    /// Amounts at or below this are treated as settled
    pub epsilon: Decimal,
}

impl Default for SettlementOptions {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
        }
    }
}

/// A member left with more than epsilon outstanding after all transfers
///
/// Advisory only: the transfers that were found are still returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrecisionWarning {
    pub member_id: MemberId,
    pub label: String,
    pub residual: Decimal,
}

/// Outcome of a settlement run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettlementReport {
    pub currency: Currency,
    pub total: Decimal,
    pub equal_share: Decimal,
    /// One entry per member, in input order
    pub balances: Vec<MemberBalance>,
    /// Transfers in the order they should be applied
    pub transfers: Vec<Transfer>,
    pub warnings: Vec<PrecisionWarning>,
}

impl SettlementReport {
    /// Balances keyed by member
    pub fn balances(&self) -> HashMap<MemberId, Decimal> {
        self.balances
            .iter()
            .map(|b| (b.member_id, b.balance))
            .collect()
    }

    pub fn is_fully_settled(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Transfers the member pays or receives
    pub fn transfers_for<'a>(&'a self, member: &'a MemberId) -> impl Iterator<Item = &'a Transfer> + 'a {
        self.transfers
            .iter()
            .filter(move |t| &t.from == member || &t.to == member)
    }
}

/// Computes balances and settlement transfers for one currency
#[derive(Debug, Clone, Copy)]
pub struct SettlementCalculator {
    currency: Currency,
    options: SettlementOptions,
}

impl SettlementCalculator {
    pub fn new(currency: Currency) -> Self {
        Self {
            currency,
            options: SettlementOptions::default(),
        }
    }

    pub fn with_options(mut self, options: SettlementOptions) -> Self {
        self.options = options;
        self
    }

    /// Computes balances, then matches debtors to creditors
    ///
    /// # Errors
    ///
    /// `SettlementError::InvalidInput` from the balance computation
    pub fn compute(
        &self,
        members: &[Member],
        expenses: &[Expense],
    ) -> Result<SettlementReport, SettlementError> {
        let sheet = BalanceCalculator::new(self.currency).compute(members, expenses)?;
        let matcher = SettlementMatcher::new(self.options.epsilon);
        let transfers = matcher.settle(&sheet.balances);

        let warnings: Vec<PrecisionWarning> = apply_transfers(&sheet.balances, &transfers)
            .into_iter()
            .filter(|(_, residual)| residual.abs() > matcher.epsilon())
            .filter_map(|(member_id, residual)| {
                sheet.get(&member_id).map(|b| PrecisionWarning {
                    member_id,
                    label: b.label.clone(),
                    residual,
                })
            })
            .collect();

        for warning in &warnings {
            warn!(
                member_id = %warning.member_id,
                residual = %warning.residual,
                "Balance left unsettled after matching"
            );
        }

        debug!(
            transfers = transfers.len(),
            warnings = warnings.len(),
            "Settlement computed"
        );

        Ok(SettlementReport {
            currency: sheet.currency,
            total: sheet.total,
            equal_share: sheet.equal_share,
            balances: sheet.balances,
            transfers,
            warnings,
        })
    }
}

/// Computes balances and transfers with default options
pub fn compute_balances_and_settlement(
    members: &[Member],
    expenses: &[Expense],
    currency: Currency,
) -> Result<SettlementReport, SettlementError> {
    SettlementCalculator::new(currency).compute(members, expenses)
}

/// Applies transfers to the starting balances
///
/// Paying moves the debtor's balance up and the creditor's down. Returns
/// each member's residual in the order of `balances`.
pub fn apply_transfers(balances: &[MemberBalance], transfers: &[Transfer]) -> Vec<(MemberId, Decimal)> {
    let mut residuals: HashMap<MemberId, Decimal> =
        balances.iter().map(|b| (b.member_id, b.balance)).collect();

    for transfer in transfers {
        if let Some(from) = residuals.get_mut(&transfer.from) {
            *from += transfer.amount;
        }
        if let Some(to) = residuals.get_mut(&transfer.to) {
            *to -= transfer.amount;
        }
    }

    balances
        .iter()
        .map(|b| (b.member_id, residuals.get(&b.member_id).copied().unwrap_or_default()))
        .collect()
}
