//! Currency amounts.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A price or total in whole cents.
///
/// Serialized as a plain decimal string such as `"5.99"` and stored as
/// `599`, so line totals and subtotals are exact integer sums. Arithmetic
/// saturates at the `i64` bounds instead of overflowing.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct Money {
    cents: i64,
}

impl Money {
    pub fn from_cents(cents: i64) -> Self {
        Self { cents }
    }

    pub fn from_dollars(dollars: i64) -> Self {
        Self::from_cents(dollars.saturating_mul(100))
    }

    pub fn zero() -> Self {
        Self::default()
    }

    pub fn cents(&self) -> i64 {
        self.cents
    }

    pub fn is_zero(&self) -> bool {
        self.cents == 0
    }

    pub fn is_negative(&self) -> bool {
        self.cents < 0
    }

    /// Price of `quantity` units at this unit price.
    pub fn multiply(&self, quantity: u32) -> Money {
        Self::from_cents(self.cents.saturating_mul(i64::from(quantity)))
    }

    /// Formats the amount without a currency symbol, e.g. `"-2.50"`.
    pub fn to_decimal(&self) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        let abs = self.cents.unsigned_abs();
        format!("{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let decimal = self.to_decimal();
        match decimal.strip_prefix('-') {
            Some(abs) => write!(f, "-${abs}"),
            None => write!(f, "${decimal}"),
        }
    }
}

impl std::ops::Add for Money {
    type Output = Money;

    fn add(self, rhs: Self) -> Money {
        Self::from_cents(self.cents.saturating_add(rhs.cents))
    }
}

impl std::ops::Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Self) -> Money {
        Self::from_cents(self.cents.saturating_sub(rhs.cents))
    }
}

impl std::ops::AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl std::ops::SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl TryFrom<String> for Money {
    type Error = MoneyParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Money> for String {
    fn from(money: Money) -> Self {
        money.to_decimal()
    }
}

/// Errors from parsing a decimal amount such as `"5.99"`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyParseError {
    #[error("Invalid amount: {0:?}")]
    Invalid(String),

    #[error("Amount {0:?} has more than two fraction digits")]
    TooPrecise(String),

    #[error("Amount {0:?} is out of range")]
    Overflow(String),
}

impl FromStr for Money {
    type Err = MoneyParseError;

    /// Parses `"5.99"`, `"$5.99"`, `"-0.5"` or `"12"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || MoneyParseError::Invalid(s.to_string());

        let trimmed = s.trim();
        let (negative, body) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        let body = body.strip_prefix('$').unwrap_or(body);

        let (whole, fraction) = match body.split_once('.') {
            Some((_, "")) => return Err(invalid()),
            Some((_, f)) if f.len() > 2 => return Err(MoneyParseError::TooPrecise(s.to_string())),
            Some((w, f)) => (w, f),
            None => (body, ""),
        };

        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if whole.is_empty() || !all_digits(whole) || !all_digits(fraction) {
            return Err(invalid());
        }

        let dollars: i64 = whole
            .parse()
            .map_err(|_| MoneyParseError::Overflow(s.to_string()))?;
        let fraction_cents: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => fraction.parse().map_err(|_| invalid())?,
        };

        let cents = dollars
            .checked_mul(100)
            .and_then(|c| c.checked_add(fraction_cents))
            .ok_or_else(|| MoneyParseError::Overflow(s.to_string()))?;

        Ok(Money::from_cents(if negative { -cents } else { cents }))
    }
}
