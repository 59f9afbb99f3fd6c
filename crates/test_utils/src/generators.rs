//! Property-Based Test Generators
//!
//! Proptest strategies for random test data that respects domain
//! invariants, plus `fake`-backed helpers for realistic names.

use chrono::NaiveDate;
use core_kernel::{Currency, Money, UserId};
use domain_expense::{Expense, ExpenseCategory};
use domain_group::{Member, MemberRole};
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::FirstName;
use fake::Fake;
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Strategy for generating valid Currency values
pub fn currency_strategy() -> impl Strategy<Value = Currency> {
    prop_oneof![
        Just(Currency::PHP),
        Just(Currency::USD),
        Just(Currency::EUR),
        Just(Currency::GBP),
        Just(Currency::JPY),
        Just(Currency::SGD),
        Just(Currency::AUD),
        Just(Currency::CAD),
        Just(Currency::HKD),
        Just(Currency::INR),
    ]
}

/// Strategy for generating valid positive amounts in minor units
pub fn positive_amount_minor_strategy() -> impl Strategy<Value = i64> + Clone {
    1i64..1_000_000_000i64
}

/// Strategy for peso amounts from one centavo up to ten million pesos
pub fn php_money_strategy() -> impl Strategy<Value = Money> + Clone {
    positive_amount_minor_strategy().prop_map(|amount| Money::from_minor(amount, Currency::PHP))
}

/// Strategy for whole-peso amounts
pub fn whole_php_strategy() -> impl Strategy<Value = Money> + Clone {
    (1i64..100_000i64).prop_map(|amount| Money::new(Decimal::from(amount), Currency::PHP))
}

/// Strategy for generating expense categories
pub fn category_strategy() -> impl Strategy<Value = ExpenseCategory> {
    proptest::sample::select(ExpenseCategory::ALL.to_vec())
}

/// Strategy for dates in 2024
pub fn date_2024_strategy() -> impl Strategy<Value = NaiveDate> {
    (1u32..=366u32).prop_map(|ordinal| {
        NaiveDate::from_yo_opt(2024, ordinal).expect("2024 is a leap year")
    })
}

/// Strategy for a list of between `min` and `max` members
pub fn members_strategy(min: usize, max: usize) -> impl Strategy<Value = Vec<Member>> {
    (min..=max).prop_map(|count| (0..count).map(|_| fake_member()).collect())
}

/// Strategy for a group of members and expenses they paid
///
/// Amounts come from `amounts`, so callers choose between centavo and
/// whole-peso precision.
pub fn household_strategy<S>(
    max_members: usize,
    max_expenses: usize,
    amounts: S,
) -> impl Strategy<Value = (Vec<Member>, Vec<Expense>)>
where
    S: Strategy<Value = Money> + Clone,
{
    members_strategy(1, max_members).prop_flat_map(move |members| {
        let count = members.len();
        let expense = (0..count, amounts.clone(), category_strategy(), date_2024_strategy());
        (
            Just(members),
            proptest::collection::vec(expense, 0..=max_expenses),
        )
            .prop_map(|(members, raw)| {
                let expenses = raw
                    .into_iter()
                    .map(|(payer, amount, category, spent_on)| {
                        Expense::new(members[payer].id, amount, "Generated", category, spent_on)
                            .expect("generated amounts are positive")
                    })
                    .collect();
                (members, expenses)
            })
    })
}

/// A member with a random first name and email
pub fn fake_member() -> Member {
    let name: String = FirstName().fake();
    let email: String = SafeEmail().fake();
    Member::new(UserId::new(), name, MemberRole::Member).with_email(email)
}

/// Strategy for generating valid email addresses
pub fn email_strategy() -> impl Strategy<Value = String> {
    ("[a-z]{5,10}", "[a-z]{3,8}")
        .prop_map(|(local, domain)| format!("{}@{}.com", local, domain))
}
