//! Balance computation
//!
//! Turns a member list and the expenses they paid into a signed balance
//! per member: total paid minus the equal share of the group total.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::debug;

use core_kernel::{Currency, MemberId, Money};
use domain_expense::Expense;
use domain_group::Member;
use crate::error::{InvalidInput, SettlementError};

/// Largest acceptable deviation of the balance sum from zero
pub const ZERO_SUM_TOLERANCE: Decimal = dec!(0.000001);

/// One member's position in the group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberBalance {
    pub member_id: MemberId,
    /// Display name, or email when no name is set
    pub label: String,
    pub total_paid: Decimal,
    /// `total_paid - equal_share`; positive means the member is owed money
    pub balance: Decimal,
}

impl MemberBalance {
    /// Owed more than `epsilon`
    pub fn is_creditor(&self, epsilon: Decimal) -> bool {
        self.balance > epsilon
    }

    /// Owes more than `epsilon`
    pub fn is_debtor(&self, epsilon: Decimal) -> bool {
        self.balance < -epsilon
    }

    /// Within `epsilon` of zero
    pub fn is_settled(&self, epsilon: Decimal) -> bool {
        self.balance.abs() <= epsilon
    }
}

/// Balances for every member, in the order the members were given
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceSheet {
    pub currency: Currency,
    /// Sum of all expenses
    pub total: Decimal,
    /// `total / member count`, unrounded
    pub equal_share: Decimal,
    pub balances: Vec<MemberBalance>,
}

impl BalanceSheet {
    pub fn get(&self, member: &MemberId) -> Option<&MemberBalance> {
        self.balances.iter().find(|b| &b.member_id == member)
    }

    /// Balances keyed by member
    pub fn balance_map(&self) -> HashMap<MemberId, Decimal> {
        self.balances
            .iter()
            .map(|b| (b.member_id, b.balance))
            .collect()
    }

    /// Sum of all balances; zero up to rounding
    pub fn balance_sum(&self) -> Decimal {
        self.balances.iter().map(|b| b.balance).sum()
    }

    pub fn is_zero_sum(&self) -> bool {
        self.balance_sum().abs() <= ZERO_SUM_TOLERANCE
    }

    pub fn total_money(&self) -> Money {
        Money::new(self.total, self.currency)
    }

    pub fn equal_share_money(&self) -> Money {
        Money::new(self.equal_share, self.currency)
    }
}

/// Computes per-member balances from expenses
#[derive(Debug, Clone, Copy)]
pub struct BalanceCalculator {
    currency: Currency,
}

impl BalanceCalculator {
    /// Creates a calculator for expenses in `currency`
    pub fn new(currency: Currency) -> Self {
        Self { currency }
    }

    /// Computes each member's total paid and balance
    ///
    /// # Arguments
    ///
    /// * `members` - Non-empty list of distinct members
    /// * `expenses` - Expenses paid by those members, all in the calculator's currency
    ///
    /// # Errors
    ///
    /// `SettlementError::InvalidInput` when `members` is empty or has duplicates,
    /// when an expense has an unknown payer, a negative amount or another
    /// currency, or when the amounts add up past `Decimal::MAX`
    pub fn compute(
        &self,
        members: &[Member],
        expenses: &[Expense],
    ) -> Result<BalanceSheet, SettlementError> {
        if members.is_empty() {
            return Err(InvalidInput::NoMembers.into());
        }

        let mut seen = HashSet::with_capacity(members.len());
        for member in members {
            if !seen.insert(member.id) {
                return Err(InvalidInput::DuplicateMember(member.id).into());
            }
        }

        let mut paid: HashMap<MemberId, Decimal> =
            members.iter().map(|m| (m.id, Decimal::ZERO)).collect();
        let mut total = Decimal::ZERO;

        for expense in expenses {
            if expense.amount.currency() != self.currency {
                return Err(InvalidInput::CurrencyMismatch {
                    expense: expense.id,
                    expected: self.currency,
                    found: expense.amount.currency(),
                }
                .into());
            }
            if expense.amount.is_negative() {
                return Err(InvalidInput::NegativeAmount(expense.id).into());
            }
            let payer_total = paid.get_mut(&expense.payer).ok_or(InvalidInput::UnknownPayer {
                expense: expense.id,
                payer: expense.payer,
            })?;

            // Each payer's total is bounded by the group total.
            total = total
                .checked_add(expense.amount.amount())
                .ok_or(InvalidInput::AmountOverflow(expense.id))?;
            *payer_total += expense.amount.amount();
        }

        let equal_share = total / Decimal::from(members.len());

        let balances = members
            .iter()
            .map(|member| {
                let total_paid = paid.get(&member.id).copied().unwrap_or_default();
                MemberBalance {
                    member_id: member.id,
                    label: member.label(),
                    total_paid,
                    balance: total_paid - equal_share,
                }
            })
            .collect();

        let sheet = BalanceSheet {
            currency: self.currency,
            total,
            equal_share,
            balances,
        };

        debug!(
            members = members.len(),
            expenses = expenses.len(),
            total = %sheet.total,
            equal_share = %sheet.equal_share,
            "Balances computed"
        );

        Ok(sheet)
    }
}
