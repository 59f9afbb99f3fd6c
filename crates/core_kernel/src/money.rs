//! Currency-tagged amounts
//!
//! `Money` keeps four decimal places so shares of a bill stay exact
//! enough to net out; rounding to centavos happens only when an amount
//! is shown to someone.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// ISO 4217 currencies a group can keep its books in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    PHP,
    USD,
    EUR,
    GBP,
    JPY,
    SGD,
    AUD,
    CAD,
    HKD,
    INR,
}

impl Currency {
    /// Digits after the decimal point in the smallest coin
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::JPY => 0,
            _ => 2,
        }
    }

    /// Minor units per major unit
    fn minor_scale(&self) -> Decimal {
        Decimal::from(10_i64.pow(self.decimal_places()))
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::PHP => "₱",
            Currency::USD => "$",
            Currency::EUR => "€",
            Currency::GBP => "£",
            Currency::JPY => "¥",
            Currency::SGD => "S$",
            Currency::AUD => "A$",
            Currency::CAD => "C$",
            Currency::HKD => "HK$",
            Currency::INR => "₹",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Currency::PHP => "PHP",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::JPY => "JPY",
            Currency::SGD => "SGD",
            Currency::AUD => "AUD",
            Currency::CAD => "CAD",
            Currency::HKD => "HKD",
            Currency::INR => "INR",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PHP" => Ok(Currency::PHP),
            "USD" => Ok(Currency::USD),
            "EUR" => Ok(Currency::EUR),
            "GBP" => Ok(Currency::GBP),
            "JPY" => Ok(Currency::JPY),
            "SGD" => Ok(Currency::SGD),
            "AUD" => Ok(Currency::AUD),
            "CAD" => Ok(Currency::CAD),
            "HKD" => Ok(Currency::HKD),
            "INR" => Ok(Currency::INR),
            other => Err(MoneyError::UnknownCurrency(other.to_string())),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Currency mismatch: cannot combine {0} with {1}")]
    CurrencyMismatch(String, String),

    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    #[error("Amount out of range")]
    Overflow,
}

/// An amount in a specific currency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    amount: Decimal,
    currency: Currency,
}

impl Money {
    /// Wraps `amount`, keeping four decimal places
    pub fn new(amount: Decimal, currency: Currency) -> Self {
        Self {
            amount: amount.round_dp(4),
            currency,
        }
    }

    /// Builds an amount from whole minor units (centavos, cents, yen)
    pub fn from_minor(minor_units: i64, currency: Currency) -> Self {
        Self::new(Decimal::from(minor_units) / currency.minor_scale(), currency)
    }

    pub fn zero(currency: Currency) -> Self {
        Self::new(Decimal::ZERO, currency)
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    pub fn is_positive(&self) -> bool {
        self.amount > Decimal::ZERO
    }

    pub fn is_negative(&self) -> bool {
        self.amount < Decimal::ZERO
    }

    pub fn abs(&self) -> Self {
        Self::new(self.amount.abs(), self.currency)
    }

    /// Rounds to the currency's minor unit
    pub fn round_to_currency(&self) -> Self {
        Self::new(self.amount.round_dp(self.currency.decimal_places()), self.currency)
    }

    /// # Errors
    ///
    /// `CurrencyMismatch` for different currencies, `Overflow` past `Decimal::MAX`
    pub fn checked_add(&self, other: &Money) -> Result<Money, MoneyError> {
        self.ensure_same_currency(other)?;
        let sum = self.amount.checked_add(other.amount).ok_or(MoneyError::Overflow)?;
        Ok(Self::new(sum, self.currency))
    }

    /// # Errors
    ///
    /// `CurrencyMismatch` for different currencies, `Overflow` past `Decimal::MIN`
    pub fn checked_sub(&self, other: &Money) -> Result<Money, MoneyError> {
        self.ensure_same_currency(other)?;
        let difference = self.amount.checked_sub(other.amount).ok_or(MoneyError::Overflow)?;
        Ok(Self::new(difference, self.currency))
    }

    /// Sums amounts that must all be in `currency`
    pub fn try_sum<'a, I>(items: I, currency: Currency) -> Result<Money, MoneyError>
    where
        I: IntoIterator<Item = &'a Money>,
    {
        items
            .into_iter()
            .try_fold(Money::zero(currency), |acc, m| acc.checked_add(m))
    }

    /// Rounds every amount to the minor unit so the rounded parts add up
    /// to the rounded total of the unrounded ones
    ///
    /// Uses the largest remainder method: each amount is floored, then
    /// the missing minor units go to the amounts that lost the most.
    /// Equal remainders favour the earlier amount.
    ///
    /// # Errors
    ///
    /// `MoneyError::Overflow` if an amount or the total cannot be scaled
    /// to minor units
    pub fn round_preserving_total(
        amounts: &[Decimal],
        currency: Currency,
    ) -> Result<Vec<Money>, MoneyError> {
        let scale = currency.minor_scale();

        let mut minor = Vec::with_capacity(amounts.len());
        let mut exact_total = Decimal::ZERO;
        let mut floor_total = Decimal::ZERO;
        for amount in amounts {
            let scaled = amount.checked_mul(scale).ok_or(MoneyError::Overflow)?;
            exact_total = exact_total.checked_add(scaled).ok_or(MoneyError::Overflow)?;
            floor_total = floor_total
                .checked_add(scaled.floor())
                .ok_or(MoneyError::Overflow)?;
            minor.push((scaled.floor(), scaled - scaled.floor()));
        }

        // Between zero and `amounts.len()` units were lost to flooring.
        let missing = (exact_total.round() - floor_total).to_usize().unwrap_or(0);

        let mut by_remainder: Vec<usize> = (0..minor.len()).collect();
        by_remainder.sort_by(|&a, &b| minor[b].1.cmp(&minor[a].1));
        for &index in by_remainder.iter().take(missing) {
            minor[index].0 += Decimal::ONE;
        }

        Ok(minor
            .into_iter()
            .map(|(units, _)| Money::new(units / scale, currency))
            .collect())
    }

    fn ensure_same_currency(&self, other: &Money) -> Result<(), MoneyError> {
        if self.currency != other.currency {
            return Err(MoneyError::CurrencyMismatch(
                self.currency.to_string(),
                other.currency.to_string(),
            ));
        }
        Ok(())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dp = self.currency.decimal_places() as usize;
        write!(f, "{} {:.dp$}", self.currency.symbol(), self.amount)
    }
}

/// A fraction of an amount, such as a budget's alert threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rate {
    value: Decimal,
}

impl Rate {
    /// `0.8` means 80%
    pub fn new(value: Decimal) -> Self {
        Self { value }
    }

    /// `80` means 80%
    pub fn from_percentage(percentage: Decimal) -> Self {
        Self::new(percentage / dec!(100))
    }

    pub fn as_decimal(&self) -> Decimal {
        self.value
    }

    /// The share of `money` this rate describes
    ///
    /// # Errors
    ///
    /// `MoneyError::Overflow` when the product does not fit in a `Decimal`
    pub fn apply(&self, money: &Money) -> Result<Money, MoneyError> {
        let share = money.amount.checked_mul(self.value).ok_or(MoneyError::Overflow)?;
        Ok(Money::new(share, money.currency))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_keeps_four_places() {
        let m = Money::new(dec!(100.50), Currency::PHP);
        assert_eq!(m.amount(), dec!(100.50));
        assert_eq!(m.currency(), Currency::PHP);
    }

    #[test]
    fn test_from_minor_centavos() {
        assert_eq!(Money::from_minor(10050, Currency::PHP).amount(), dec!(100.50));
    }

    #[test]
    fn test_checked_add_rejects_other_currency() {
        let php = Money::new(dec!(100.00), Currency::PHP);
        let usd = Money::new(dec!(100.00), Currency::USD);

        assert!(matches!(php.checked_add(&usd), Err(MoneyError::CurrencyMismatch(_, _))));
    }

    #[test]
    fn test_checked_add_overflow_is_an_error() {
        let huge = Money::new(Decimal::MAX, Currency::PHP);
        assert_eq!(huge.checked_add(&huge), Err(MoneyError::Overflow));
    }

    #[test]
    fn test_thirds_round_to_zero_sum() {
        let parts = Money::round_preserving_total(
            &[dec!(66.6667), dec!(-33.3334), dec!(-33.3333)],
            Currency::PHP,
        )
        .unwrap();

        let amounts: Vec<Decimal> = parts.iter().map(|m| m.amount()).collect();
        assert_eq!(amounts, vec![dec!(66.67), dec!(-33.34), dec!(-33.33)]);
    }

    #[test]
    fn test_rate_application() {
        let rate = Rate::from_percentage(dec!(80));
        let limit = Money::new(dec!(5000.00), Currency::PHP);

        assert_eq!(rate.apply(&limit).unwrap().amount(), dec!(4000.00));
    }

    #[test]
    fn test_rate_overflow_is_an_error() {
        let rate = Rate::new(dec!(2));
        let limit = Money::new(Decimal::MAX, Currency::PHP);

        assert_eq!(rate.apply(&limit), Err(MoneyError::Overflow));
    }
}
