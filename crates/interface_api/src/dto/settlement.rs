//! Settlement DTOs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::{Currency, MemberId, Money, MoneyError, UserId};
use domain_group::{Member, MemberRole};
use domain_settlement::SettlementReport;
use super::expense::ExpenseInput;

#[derive(Debug, Deserialize, Validate)]
pub struct SettlementRequest {
    /// Defaults to the server's configured currency
    pub currency: Option<Currency>,
    #[validate(nested)]
    pub members: Vec<MemberInput>,
    #[validate(nested)]
    #[serde(default)]
    pub expenses: Vec<ExpenseInput>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct MemberInput {
    pub id: MemberId,
    #[validate(length(max = 100))]
    #[serde(default)]
    pub name: String,
    #[validate(email)]
    pub email: Option<String>,
}

impl MemberInput {
    /// Request members have no account, so the user id mirrors the member id
    pub fn to_member(&self) -> Member {
        let mut member = Member::new(UserId::from_uuid(*self.id.as_uuid()), self.name.trim(), MemberRole::Member);
        member.id = self.id;
        match &self.email {
            Some(email) => member.with_email(email.trim()),
            None => member,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SettlementResponse {
    pub currency: Currency,
    pub total: Decimal,
    pub equal_share: Decimal,
    pub balances: Vec<BalanceResponse>,
    pub transfers: Vec<TransferResponse>,
    pub warnings: Vec<WarningResponse>,
}

#[derive(Debug, Serialize)]
pub struct BalanceResponse {
    pub member_id: MemberId,
    pub name: String,
    pub total_paid: Decimal,
    pub balance: Decimal,
}

#[derive(Debug, Serialize)]
pub struct TransferResponse {
    pub from: MemberId,
    pub from_name: String,
    pub to: MemberId,
    pub to_name: String,
    pub amount: Decimal,
}

#[derive(Debug, Serialize)]
pub struct WarningResponse {
    pub member_id: MemberId,
    pub name: String,
    pub residual: Decimal,
}

fn rounded(amount: Decimal, currency: Currency) -> Decimal {
    Money::new(amount, currency).round_to_currency().amount()
}

/// Rounds each value for display while keeping the column's total exact
fn rounded_column(values: &[Decimal], currency: Currency) -> Result<Vec<Decimal>, MoneyError> {
    Ok(Money::round_preserving_total(values, currency)?
        .into_iter()
        .map(|m| m.amount())
        .collect())
}

impl TryFrom<SettlementReport> for SettlementResponse {
    type Error = MoneyError;

    /// Displayed balances net to zero and displayed payments add up to the
    /// displayed total, even when the unrounded shares repeat forever.
    fn try_from(report: SettlementReport) -> Result<Self, Self::Error> {
        let currency = report.currency;
        let paid: Vec<Decimal> = report.balances.iter().map(|b| b.total_paid).collect();
        let owed: Vec<Decimal> = report.balances.iter().map(|b| b.balance).collect();
        let paid = rounded_column(&paid, currency)?;
        let owed = rounded_column(&owed, currency)?;

        let balances = report
            .balances
            .into_iter()
            .zip(paid.into_iter().zip(owed))
            .map(|(b, (total_paid, balance))| BalanceResponse {
                member_id: b.member_id,
                name: b.label,
                total_paid,
                balance,
            })
            .collect();

        Ok(Self {
            currency,
            total: rounded(report.total, currency),
            equal_share: rounded(report.equal_share, currency),
            balances,
            transfers: report
                .transfers
                .into_iter()
                .map(|t| TransferResponse {
                    amount: t.display_amount(currency).amount(),
                    from: t.from,
                    from_name: t.from_label,
                    to: t.to,
                    to_name: t.to_label,
                })
                .collect(),
            warnings: report
                .warnings
                .into_iter()
                .map(|w| WarningResponse {
                    member_id: w.member_id,
                    name: w.label,
                    residual: w.residual,
                })
                .collect(),
        })
    }
}
