//! Monetary amounts.
//!
//! Arithmetic keeps full decimal precision; rounding to two decimals happens
//! only when an amount is displayed.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, Sub};
use core::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::DomainError;

/// An amount of money in the business currency.
///
/// Serialized as a decimal string (`"25.50"`) so no digits are lost on the
/// way to the backend. Deserialization accepts numbers and numeric strings,
/// since decimal columns come back from the backend as `"25.00"`.
///
/// `+`, `-` and `Sum` saturate at the `Decimal` bounds; use the `checked_*`
/// methods where overflow must be reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// Largest magnitude accepted from form input. Keeps every combination the
    /// pricing summary performs well inside `Decimal`'s range.
    pub const MAX_INPUT: Money = Money(Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0));

    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Build an amount from an integer number of cents.
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// Parse user input, treating blank, non-numeric or out-of-range text as
    /// zero.
    ///
    /// Matches how adjustment inputs (discount, tax, ...) behave in the form:
    /// clearing a field means "nothing", not an error. Magnitudes above
    /// [`Money::MAX_INPUT`] are not amounts anyone bills.
    pub fn parse_lenient(input: &str) -> Self {
        input
            .trim()
            .parse::<Decimal>()
            .ok()
            .filter(|value| value.abs() <= Self::MAX_INPUT.0)
            .map(Self)
            .unwrap_or(Self::ZERO)
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// `self * quantity`, saturating at the `Decimal` bounds.
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(Decimal::from(quantity)))
    }

    /// `self * quantity`, exact, or `None` on overflow.
    pub fn checked_times(self, quantity: u32) -> Option<Self> {
        self.0.checked_mul(Decimal::from(quantity)).map(Self)
    }

    pub fn checked_add(self, rhs: Money) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    pub fn checked_sub(self, rhs: Money) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Self)
    }

    /// The amount rounded half away from zero to two decimals.
    pub fn rounded(&self) -> Decimal {
        let mut value = self.0.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        value.rescale(2);
        value
    }

    /// Fixed two-decimal text without the currency symbol (e.g. `"25.00"`).
    pub fn to_fixed(&self) -> String {
        self.rounded().to_string()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self.rounded();
        if rounded.is_sign_negative() && !rounded.is_zero() {
            write!(f, "-${}", rounded.abs())
        } else {
            write!(f, "${}", rounded.abs())
        }
    }
}

impl FromStr for Money {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<Decimal>()
            .map(Self)
            .map_err(|e| DomainError::validation(format!("invalid amount {s:?}: {e}")))
    }
}

impl From<Decimal> for Money {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0.saturating_sub(rhs.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.copied().sum()
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        <Decimal as Deserialize>::deserialize(deserializer).map(Money)
    }
}
