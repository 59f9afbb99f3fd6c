//! Greedy settlement matching
//!
//! Pairs the largest creditor with the largest debtor, moves as much as
//! one of them needs, and repeats. This does not guarantee the minimum
//! number of transfers, but never needs more than
//! `creditors + debtors - 1` of them.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::trace;

use core_kernel::{Currency, MemberId, Money};
use crate::balance::MemberBalance;

/// Amounts at or below this many currency units count as settled
pub const DEFAULT_EPSILON: Decimal = dec!(0.01);

/// A payment from a debtor to a creditor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transfer {
    pub from: MemberId,
    pub from_label: String,
    pub to: MemberId,
    pub to_label: String,
    pub amount: Decimal,
}

impl Transfer {
    /// The amount rounded for display in `currency`
    pub fn display_amount(&self, currency: Currency) -> Money {
        Money::new(self.amount, currency).round_to_currency()
    }
}

/// Working copy of one party's outstanding amount
///
/// `display` keeps pointing at the untouched balance so emitted transfers
/// never see partially consumed state.
struct Party<'a> {
    display: &'a MemberBalance,
    remaining: Decimal,
}

/// Matches debtors to creditors
#[derive(Debug, Clone, Copy)]
pub struct SettlementMatcher {
    epsilon: Decimal,
}

impl Default for SettlementMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_EPSILON)
    }
}

impl SettlementMatcher {
    /// Creates a matcher treating amounts within `epsilon` of zero as settled
    pub fn new(epsilon: Decimal) -> Self {
        Self {
            epsilon: epsilon.abs(),
        }
    }

    pub fn epsilon(&self) -> Decimal {
        self.epsilon
    }

    /// Produces transfers that bring every balance to within epsilon of zero
    ///
    /// Balances should sum to zero. If they don't, the walk stops when one
    /// side runs out and the leftover is simply not transferred.
    ///
    /// Ties between equal balances keep the order in which members were given.
    pub fn settle(&self, balances: &[MemberBalance]) -> Vec<Transfer> {
        let eps = self.epsilon;

        let mut creditors: Vec<Party<'_>> = balances
            .iter()
            .filter(|b| b.is_creditor(eps))
            .map(|b| Party { display: b, remaining: b.balance })
            .collect();
        let mut debtors: Vec<Party<'_>> = balances
            .iter()
            .filter(|b| b.is_debtor(eps))
            .map(|b| Party { display: b, remaining: b.balance })
            .collect();

        // Largest credit first, largest debt (most negative) first; sort_by is stable
        creditors.sort_by(|a, b| b.remaining.cmp(&a.remaining));
        debtors.sort_by(|a, b| a.remaining.cmp(&b.remaining));

        let mut transfers =
            Vec::with_capacity((creditors.len() + debtors.len()).saturating_sub(1));
        let (mut ci, mut di) = (0, 0);

        while ci < creditors.len() && di < debtors.len() {
            let creditor = &mut creditors[ci];
            let debtor = &mut debtors[di];

            let amount = creditor.remaining.min(debtor.remaining.abs());
            if amount <= eps {
                break;
            }

            transfers.push(Transfer {
                from: debtor.display.member_id,
                from_label: debtor.display.label.clone(),
                to: creditor.display.member_id,
                to_label: creditor.display.label.clone(),
                amount,
            });
            trace!(from = %debtor.display.member_id, to = %creditor.display.member_id, %amount, "Transfer matched");

            creditor.remaining -= amount;
            debtor.remaining += amount;

            if creditor.remaining <= eps {
                ci += 1;
            }
            if debtor.remaining >= -eps {
                di += 1;
            }
        }

        transfers
    }
}
