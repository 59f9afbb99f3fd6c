//! Pre-built Test Fixtures
//!
//! Ready-to-use test data for common entities. Fixtures are fixed and
//! predictable; use `generators` for random data.

use chrono::NaiveDate;
use core_kernel::{Currency, Money, UserId, YearMonth};
use domain_group::{Member, MemberRole};
use rust_decimal_macros::dec;

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    pub fn php_100() -> Money {
        Money::new(dec!(100.00), Currency::PHP)
    }

    /// A typical monthly rent
    pub fn php_rent() -> Money {
        Money::new(dec!(15000.00), Currency::PHP)
    }

    pub fn php_zero() -> Money {
        Money::zero(Currency::PHP)
    }

    /// For currency mismatch tests
    pub fn usd_100() -> Money {
        Money::new(dec!(100.00), Currency::USD)
    }

    /// JPY has no minor unit
    pub fn jpy_1000() -> Money {
        Money::new(dec!(1000), Currency::JPY)
    }
}

/// Fixture for calendar test data
pub struct DateFixtures;

impl DateFixtures {
    /// May 2024
    pub fn month() -> YearMonth {
        YearMonth::from_date(Self::mid_month())
    }

    pub fn first_of_month() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    pub fn mid_month() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 15).unwrap()
    }

    pub fn end_of_month() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 31).unwrap()
    }

    /// Month-end date that needs clamping in shorter months
    pub fn january_31() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()
    }
}

/// Fixture for household members
pub struct MemberFixtures;

impl MemberFixtures {
    pub fn named(name: &str) -> Member {
        Member::new(UserId::new(), name, MemberRole::Member)
    }

    pub fn ana() -> Member {
        Self::named("Ana").with_email("ana@example.com")
    }

    pub fn ben() -> Member {
        Self::named("Ben").with_email("ben@example.com")
    }

    /// Member with no display name; labelled by email
    pub fn cara() -> Member {
        Self::named("").with_email("cara@example.com")
    }

    pub fn household() -> Vec<Member> {
        vec![Self::ana(), Self::ben(), Self::cara()]
    }
}
