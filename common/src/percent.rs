//! [`Percent`]-related definitions.

use std::str::FromStr;

use derive_more::Display;
use rust_decimal::Decimal;
use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};

use crate::Money;

/// Percentage in the `0..=100` range.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Percent(Decimal);

impl Percent {
    /// Zero [`Percent`].
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Whole hundred [`Percent`].
    pub const HUNDRED: Self = Self(Decimal::ONE_HUNDRED);

    /// Creates a new [`Percent`] by checking the provided value is within
    /// the `0..=100` range.
    #[expect(unsafe_code, reason = "invariants checked already")]
    #[must_use]
    pub fn new(val: Decimal) -> Option<Self> {
        if val < Decimal::ZERO || val > Decimal::ONE_HUNDRED {
            None
        } else {
            Some(unsafe { Self::new_unchecked(val) })
        }
    }

    /// Creates a new [`Percent`] without performing any validation.
    ///
    /// # Safety
    ///
    /// The provided value must be within the `0..=100` range.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(val: Decimal) -> Self {
        Self(val)
    }

    /// Returns the value of this [`Percent`].
    #[must_use]
    pub fn value(self) -> Decimal {
        self.0
    }

    /// Returns the remainder of this [`Percent`] up to the whole hundred.
    #[expect(unsafe_code, reason = "`0..=100` is closed under `100 - x`")]
    #[must_use]
    pub fn complement(self) -> Self {
        unsafe { Self::new_unchecked(Decimal::ONE_HUNDRED - self.0) }
    }

    /// Returns this [`Percent`] of the provided [`Money`].
    ///
    /// The result is not rounded, unless the amount is too large to be
    /// multiplied first, in which case it's divided first.
    #[must_use]
    pub fn of(self, money: Money) -> Money {
        let amount = money.amount();
        let part = amount
            .checked_mul(self.0)
            .and_then(|a| a.checked_div(Decimal::ONE_HUNDRED))
            .or_else(|| {
                amount
                    .checked_div(Decimal::ONE_HUNDRED)
                    .and_then(|a| a.checked_mul(self.0))
            })
            .unwrap_or(amount);
        Money::new(part).unwrap_or(Money::ZERO)
    }
}

impl From<u8> for Percent {
    /// Converts the provided number of percents, saturating at `100`.
    fn from(val: u8) -> Self {
        Self(Decimal::from(val.min(100)))
    }
}

impl FromStr for Percent {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s)
            .ok()
            .and_then(Self::new)
            .ok_or("invalid percent value")
    }
}

impl Serialize for Percent {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        Serialize::serialize(&self.0, s)
    }
}

impl<'de> Deserialize<'de> for Percent {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        Self::new(<Decimal as Deserialize>::deserialize(d)?)
            .ok_or_else(|| D::Error::custom("invalid percent value"))
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use rust_decimal::Decimal;

    use crate::Money;

    use super::Percent;

    #[test]
    fn validates_range() {
        assert!(Percent::from_str("0").is_ok());
        assert!(Percent::from_str("100").is_ok());
        assert!(Percent::from_str("12.5").is_ok());
        assert!(Percent::from_str("-1").is_err());
        assert!(Percent::from_str("100.01").is_err());
        assert!(Percent::from_str("half").is_err());

        assert_eq!(Percent::from(250), Percent::HUNDRED);
    }

    #[test]
    fn complement() {
        assert_eq!(Percent::from(20).complement(), Percent::from(80));
        assert_eq!(Percent::ZERO.complement(), Percent::HUNDRED);
        assert_eq!(Percent::HUNDRED.complement(), Percent::ZERO);
    }

    #[test]
    fn of_money() {
        let total = Money::from_str("600.00").unwrap();

        assert_eq!(
            Percent::from(50).of(total),
            Money::from_str("300").unwrap(),
        );
        assert_eq!(Percent::ZERO.of(total), Money::ZERO);
        assert_eq!(Percent::HUNDRED.of(total), total);
        assert_eq!(
            Percent::from(33).of(Money::from_str("10").unwrap()),
            Money::from_str("3.3").unwrap(),
        );
    }

    #[test]
    fn serde() {
        assert_eq!(
            serde_json::to_string(&Percent::from(20)).unwrap(),
            "\"20\"",
        );
        assert_eq!(
            serde_json::from_str::<Percent>("\"12.5\"").unwrap(),
            Percent::from_str("12.5").unwrap(),
        );
        assert_eq!(
            serde_json::from_str::<Percent>("50").unwrap(),
            Percent::from(50),
        );
        assert!(serde_json::from_str::<Percent>("\"100.5\"").is_err());
        assert!(serde_json::from_str::<Percent>("-1").is_err());
    }

    #[test]
    fn of_huge_money_does_not_overflow() {
        let max = Money::new(Decimal::MAX).unwrap();

        assert_eq!(Percent::HUNDRED.of(max), max);
        assert_eq!(Percent::ZERO.of(max), Money::ZERO);

        let half = Percent::from(50).of(max);
        assert!(half > Money::ZERO);
        assert!(half < max);
    }
}
