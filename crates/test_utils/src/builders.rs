//! Test Data Builders
//!
//! Builder patterns for constructing test data with sensible defaults, so
//! tests only spell out the fields they care about.

use chrono::NaiveDate;
use core_kernel::{Currency, GroupId, MemberId, Money, UserId};
use domain_expense::{Expense, ExpenseCategory};
use domain_group::{Group, MemberRole};
use rust_decimal::Decimal;

use crate::fixtures::{DateFixtures, MoneyFixtures};

/// Builder for test expenses
pub struct TestExpenseBuilder {
    payer: MemberId,
    amount: Money,
    description: String,
    category: ExpenseCategory,
    spent_on: NaiveDate,
    group_id: Option<GroupId>,
}

impl TestExpenseBuilder {
    /// Creates a builder for an expense paid by `payer`
    pub fn paid_by(payer: MemberId) -> Self {
        Self {
            payer,
            amount: MoneyFixtures::php_100(),
            description: "Test expense".to_string(),
            category: ExpenseCategory::Other,
            spent_on: DateFixtures::mid_month(),
            group_id: None,
        }
    }

    /// Sets the amount in pesos
    pub fn php(mut self, amount: Decimal) -> Self {
        self.amount = Money::new(amount, Currency::PHP);
        self
    }

    pub fn with_amount(mut self, amount: Money) -> Self {
        self.amount = amount;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_category(mut self, category: ExpenseCategory) -> Self {
        self.category = category;
        self
    }

    pub fn on(mut self, date: NaiveDate) -> Self {
        self.spent_on = date;
        self
    }

    pub fn in_group(mut self, group: GroupId) -> Self {
        self.group_id = Some(group);
        self
    }

    /// Builds the expense
    ///
    /// # Panics
    ///
    /// Panics if the amount is not positive or the description is blank
    pub fn build(self) -> Expense {
        let expense = Expense::new(
            self.payer,
            self.amount,
            self.description,
            self.category,
            self.spent_on,
        )
        .expect("TestExpenseBuilder produced an invalid expense");

        match self.group_id {
            Some(group) => expense.with_group(group),
            None => expense,
        }
    }
}

/// Builder for test groups
///
/// Extra members join through the normal invite-and-accept flow, so the
/// resulting group is in a state the domain could have reached itself.
pub struct TestGroupBuilder {
    name: String,
    currency: Currency,
    owner_name: String,
    members: Vec<(String, MemberRole)>,
}

impl Default for TestGroupBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestGroupBuilder {
    pub fn new() -> Self {
        Self {
            name: "Household".to_string(),
            currency: Currency::PHP,
            owner_name: "Owner".to_string(),
            members: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    pub fn with_owner(mut self, name: impl Into<String>) -> Self {
        self.owner_name = name.into();
        self
    }

    /// Adds a member with the `Member` role
    pub fn with_member(self, name: impl Into<String>) -> Self {
        self.with_member_role(name, MemberRole::Member)
    }

    pub fn with_member_role(mut self, name: impl Into<String>, role: MemberRole) -> Self {
        self.members.push((name.into(), role));
        self
    }

    /// Builds the group
    ///
    /// # Panics
    ///
    /// Panics if the group name is blank or a role cannot be granted by invitation
    pub fn build(self) -> Group {
        let mut group = Group::new(
            self.name,
            self.currency,
            UserId::new(),
            self.owner_name,
            Some("owner@example.com".to_string()),
        )
        .expect("TestGroupBuilder produced an invalid group");
        let owner = group.members()[0].id;

        for (index, (name, role)) in self.members.into_iter().enumerate() {
            let email = format!("member{index}@example.com");
            let invitation = group
                .invite(&owner, &email, role)
                .expect("invitation rejected");
            group
                .accept_invitation(&invitation, UserId::new(), name)
                .expect("acceptance rejected");
        }

        group
    }
}
