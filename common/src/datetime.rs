//! Date and time utilities.

use std::{cmp::Ordering, marker::PhantomData, ops, time::Duration};

use derive_more::{Debug, Display, Error};
use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};
use time::{format_description::well_known::Rfc3339, UtcOffset};

use crate::Date;

/// Untyped date and time.
pub type DateTime = DateTimeOf;

/// UTC date and time, tagged with the kind of moment it describes.
#[derive(Debug)]
pub struct DateTimeOf<Of: ?Sized = ()> {
    /// Inner representation of the date and time.
    inner: time::OffsetDateTime,

    /// Type parameter describing the kind of date and time.
    #[debug(skip)]
    _of: PhantomData<Of>,
}

impl<Of: ?Sized> DateTimeOf<Of> {
    /// A [`DateTime`] representing the Unix epoch.
    pub const UNIX_EPOCH: Self = Self {
        inner: time::OffsetDateTime::UNIX_EPOCH,
        _of: PhantomData,
    };

    /// Creates a new [`DateTime`] representing the current date and time,
    /// truncated to microseconds.
    #[must_use]
    pub fn now() -> Self {
        let now = time::OffsetDateTime::now_utc();
        let inner = now.replace_microsecond(now.microsecond()).unwrap_or(now);
        Self {
            inner,
            _of: PhantomData,
        }
    }

    /// Creates a new [`DateTime`] from the provided [`UNIX_EPOCH`] timestamp.
    ///
    /// [`None`] is returned if the timestamp is invalid.
    ///
    /// [`UNIX_EPOCH`]: Self::UNIX_EPOCH
    #[must_use]
    pub fn from_unix_timestamp(timestamp: i64) -> Option<Self> {
        Some(Self {
            inner: time::OffsetDateTime::from_unix_timestamp(timestamp).ok()?,
            _of: PhantomData,
        })
    }

    /// Creates a new [`DateTime`] from the provided [RFC 3339] string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid [RFC 3339] date and time.
    ///
    /// [RFC 3339]: https://tools.ietf.org/html/rfc3339
    pub fn from_rfc3339(input: &str) -> Result<Self, ParseError> {
        let inner = time::OffsetDateTime::parse(input, &Rfc3339)
            .map_err(ParseError)?
            .to_offset(UtcOffset::UTC);
        Ok(Self {
            inner,
            _of: PhantomData,
        })
    }

    /// Returns this [`DateTime`] as an [RFC 3339] string.
    ///
    /// [RFC 3339]: https://tools.ietf.org/html/rfc3339
    #[must_use]
    pub fn to_rfc3339(&self) -> String {
        self.inner
            .format(&Rfc3339)
            .unwrap_or_else(|_| self.inner.unix_timestamp().to_string())
    }

    /// Returns the UTC calendar [`Date`] of this [`DateTime`].
    #[must_use]
    pub fn date(&self) -> Date {
        self.inner.date().into()
    }

    /// Coerces one kind of [`DateTime`] into another.
    #[must_use]
    pub fn coerce<NewOf: ?Sized>(self) -> DateTimeOf<NewOf> {
        DateTimeOf {
            inner: self.inner,
            _of: PhantomData,
        }
    }
}

/// Error of parsing a [`DateTime`] from a string.
#[derive(Clone, Copy, Debug, Display, Error)]
#[display("invalid RFC 3339 date and time: {_0}")]
pub struct ParseError(time::error::Parse);

impl<Of: ?Sized> Copy for DateTimeOf<Of> {}
impl<Of: ?Sized> Clone for DateTimeOf<Of> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Of: ?Sized> Eq for DateTimeOf<Of> {}
impl<Of: ?Sized> PartialEq for DateTimeOf<Of> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<Of: ?Sized> Ord for DateTimeOf<Of> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.cmp(&other.inner)
    }
}
impl<Of: ?Sized> PartialOrd for DateTimeOf<Of> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<Of: ?Sized> ops::Add<Duration> for DateTimeOf<Of> {
    type Output = Self;

    fn add(self, rhs: Duration) -> Self::Output {
        Self {
            inner: self.inner + rhs,
            _of: PhantomData,
        }
    }
}

impl<Of: ?Sized> ops::Sub<Duration> for DateTimeOf<Of> {
    type Output = Self;

    fn sub(self, rhs: Duration) -> Self::Output {
        Self {
            inner: self.inner - rhs,
            _of: PhantomData,
        }
    }
}

impl<Of: ?Sized> Serialize for DateTimeOf<Of> {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&self.to_rfc3339())
    }
}

impl<'de, Of: ?Sized> Deserialize<'de> for DateTimeOf<Of> {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s = <std::borrow::Cow<'de, str>>::deserialize(d)?;
        Self::from_rfc3339(&s).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use crate::Date;

    use super::DateTime;

    #[test]
    fn rfc3339() {
        let dt = DateTime::from_rfc3339("2024-06-01T10:30:00+02:00").unwrap();

        assert_eq!(dt.to_rfc3339(), "2024-06-01T08:30:00Z");
        assert_eq!(dt.date(), Date::from_ymd(2024, 6, 1).unwrap());
        assert!(DateTime::from_rfc3339("2024-06-01").is_err());
    }

    #[test]
    fn ordering_and_arithmetic() {
        let epoch = DateTime::UNIX_EPOCH;
        let later = epoch + Duration::from_secs(60 * 60 * 24);

        assert!(epoch < later);
        assert_eq!(later - Duration::from_secs(60 * 60 * 24), epoch);
        assert_eq!(later.date(), Date::from_ymd(1970, 1, 2).unwrap());
        assert_eq!(DateTime::from_unix_timestamp(86_400), Some(later));
    }
}
