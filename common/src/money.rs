//! [`Money`]-related definitions.

use std::{fmt, str::FromStr};

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};

/// Non-negative amount of money.
///
/// All prices of the system are expressed in a single currency, so only the
/// amount is stored.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Money {
    /// Amount of this [`Money`].
    amount: Decimal,
}

impl Money {
    /// Zero [`Money`].
    pub const ZERO: Self = Self {
        amount: Decimal::ZERO,
    };

    /// Number of fractional digits a [`Money::round()`]ed amount has.
    pub const SCALE: u32 = 2;

    /// Creates a new [`Money`] if the provided `amount` is not negative.
    #[must_use]
    pub fn new(amount: Decimal) -> Option<Self> {
        (amount >= Decimal::ZERO).then_some(Self { amount })
    }

    /// Returns the amount of this [`Money`].
    #[must_use]
    pub fn amount(self) -> Decimal {
        self.amount
    }

    /// Rounds this [`Money`] to [`Money::SCALE`] fractional digits.
    ///
    /// Midpoints are rounded to the nearest even digit.
    #[must_use]
    pub fn round(self) -> Self {
        Self {
            amount: self.amount.round_dp_with_strategy(
                Self::SCALE,
                RoundingStrategy::MidpointNearestEven,
            ),
        }
    }

    /// Multiplies this [`Money`] by the provided `factor`.
    ///
    /// [`None`] is returned on overflow.
    #[must_use]
    pub fn checked_mul(self, factor: u32) -> Option<Self> {
        self.amount
            .checked_mul(Decimal::from(factor))
            .map(|amount| Self { amount })
    }

    /// Subtracts the `other` [`Money`] from this one.
    ///
    /// [`None`] is returned if the result would be negative.
    #[must_use]
    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.amount.checked_sub(other.amount).and_then(Self::new)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.amount.scale() <= Self::SCALE {
            write!(f, "{:.2}", self.amount)
        } else {
            write!(f, "{}", self.amount)
        }
    }
}

impl FromStr for Money {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let amount = Decimal::from_str(s).map_err(|_| "invalid amount")?;
        Self::new(amount).ok_or("negative amount")
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        Self::new(<Decimal as Deserialize>::deserialize(d)?)
            .ok_or_else(|| D::Error::custom("negative amount"))
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use rust_decimal::Decimal;

    use super::Money;

    fn money(s: &str) -> Money {
        Money::from_str(s).unwrap()
    }

    #[test]
    fn from_str() {
        assert_eq!(money("123.45").amount(), Decimal::new(12345, 2));
        assert_eq!(money("123").amount(), Decimal::new(123, 0));
        assert_eq!(money("0").amount(), Decimal::ZERO);

        assert_eq!(Money::from_str("-1.00"), Err("negative amount"));
        assert_eq!(Money::from_str("12.3USD"), Err("invalid amount"));
        assert_eq!(Money::from_str(""), Err("invalid amount"));
    }

    #[test]
    fn to_string() {
        assert_eq!(money("600").to_string(), "600.00");
        assert_eq!(money("600.5").to_string(), "600.50");
        assert_eq!(money("123.45").to_string(), "123.45");
        assert_eq!(money("0.125").to_string(), "0.125");
    }

    #[test]
    fn rounds_half_to_even() {
        assert_eq!(money("0.125").round(), money("0.12"));
        assert_eq!(money("0.135").round(), money("0.14"));
        assert_eq!(money("199.999").round(), money("200.00"));
        assert_eq!(money("10").round(), money("10"));
    }

    #[test]
    fn arithmetic() {
        assert_eq!(money("100.00").checked_mul(6), Some(money("600.00")));
        assert_eq!(money("600").checked_sub(money("450")), Some(money("150")));
        assert_eq!(money("1").checked_sub(money("1.01")), None);
    }

    #[test]
    fn serde() {
        assert_eq!(
            serde_json::to_string(&money("600")).unwrap(),
            "\"600.00\"",
        );
        assert_eq!(
            serde_json::from_str::<Money>("\"99.90\"").unwrap(),
            money("99.9"),
        );
        assert_eq!(
            serde_json::from_str::<Money>("600").unwrap(),
            money("600.00"),
        );
        assert!(serde_json::from_str::<Money>("\"-5\"").is_err());
    }
}
