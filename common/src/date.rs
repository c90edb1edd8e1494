//! Calendar [`Date`] utilities.

use std::{fmt, str::FromStr};

use derive_more::{Display, Error};
use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};
use time::{format_description::FormatItem, macros::format_description};

/// `YYYY-MM-DD` format of a [`Date`].
const FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

/// Calendar date without a time zone.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Date(time::Date);

impl Date {
    /// Returns the current [`Date`] in UTC.
    #[must_use]
    pub fn today() -> Self {
        Self(time::OffsetDateTime::now_utc().date())
    }

    /// Creates a new [`Date`] from its components.
    ///
    /// [`None`] is returned if the components don't form a valid date.
    #[must_use]
    pub fn from_ymd(year: i32, month: u8, day: u8) -> Option<Self> {
        let month = time::Month::try_from(month).ok()?;
        time::Date::from_calendar_date(year, month, day).ok().map(Self)
    }

    /// Returns the number of whole days from this [`Date`] until the `other`
    /// one.
    ///
    /// The result is negative if the `other` [`Date`] is before this one.
    #[must_use]
    pub fn days_until(self, other: Self) -> i64 {
        (other.0 - self.0).whole_days()
    }

    /// Returns the [`Date`] the provided number of `days` after this one.
    ///
    /// [`None`] is returned if the result is out of the supported range.
    #[must_use]
    pub fn checked_add_days(self, days: i64) -> Option<Self> {
        self.0.checked_add(time::Duration::days(days)).map(Self)
    }
}

impl From<time::Date> for Date {
    fn from(date: time::Date) -> Self {
        Self(date)
    }
}

impl From<Date> for time::Date {
    fn from(date: Date) -> Self {
        date.0
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.0.format(FORMAT).map_err(|_| fmt::Error)?;
        f.write_str(&s)
    }
}

/// Error of parsing a [`Date`] from a string.
#[derive(Clone, Copy, Debug, Display, Error)]
#[display("invalid `YYYY-MM-DD` date: {_0}")]
pub struct ParseError(time::error::Parse);

impl FromStr for Date {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        time::Date::parse(s, FORMAT).map(Self).map_err(ParseError)
    }
}

impl Serialize for Date {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Date {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s = <std::borrow::Cow<'de, str>>::deserialize(d)?;
        s.parse().map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod spec {
    use super::Date;

    fn date(s: &str) -> Date {
        s.parse().unwrap()
    }

    #[test]
    fn parses_and_formats() {
        assert_eq!(date("2024-06-01"), Date::from_ymd(2024, 6, 1).unwrap());
        assert_eq!(date("2024-06-01").to_string(), "2024-06-01");
        assert_eq!(date("2024-12-31").to_string(), "2024-12-31");

        assert!("2024-02-30".parse::<Date>().is_err());
        assert!("01/06/2024".parse::<Date>().is_err());
        assert!(Date::from_ymd(2024, 13, 1).is_none());
    }

    #[test]
    fn counts_days() {
        assert_eq!(date("2024-06-01").days_until(date("2024-06-04")), 3);
        assert_eq!(date("2024-06-04").days_until(date("2024-06-01")), -3);
        assert_eq!(date("2024-02-28").days_until(date("2024-03-01")), 2);
        assert_eq!(date("2024-06-01").days_until(date("2024-06-01")), 0);
    }

    #[test]
    fn adds_days() {
        assert_eq!(
            date("2024-12-30").checked_add_days(3),
            Some(date("2025-01-02")),
        );
        assert_eq!(
            date("2024-06-10").checked_add_days(-10),
            Some(date("2024-05-31")),
        );
    }

    #[test]
    fn serde() {
        assert_eq!(
            serde_json::to_string(&date("2024-06-01")).unwrap(),
            "\"2024-06-01\"",
        );
        assert_eq!(
            serde_json::from_str::<Date>("\"2024-06-04\"").unwrap(),
            date("2024-06-04"),
        );
        assert!(serde_json::from_str::<Date>("\"tomorrow\"").is_err());
    }
}
