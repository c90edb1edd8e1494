//! [`Stay`] definitions.

use std::fmt;

use common::Date;
use serde::{Deserialize, Serialize};

#[cfg(doc)]
use crate::domain::Booking;

/// Half-open range of nights `[check_in, check_out)` of a [`Booking`].
///
/// A [`Stay`] isn't validated on creation: an empty or reversed range is a
/// legit request value, rejected by the engine when evaluated.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Stay {
    /// [`Date`] of the arrival.
    pub check_in: Date,

    /// [`Date`] of the departure, exclusive.
    pub check_out: Date,
}

impl Stay {
    /// Creates a new [`Stay`] from the provided dates.
    #[must_use]
    pub fn new(check_in: Date, check_out: Date) -> Self {
        Self {
            check_in,
            check_out,
        }
    }

    /// Returns the number of nights of this [`Stay`].
    ///
    /// Zero or negative for an invalid [`Stay`].
    #[must_use]
    pub fn nights(self) -> i64 {
        self.check_in.days_until(self.check_out)
    }

    /// Checks whether this [`Stay`] has no nights in it.
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.nights() <= 0
    }

    /// Checks whether this [`Stay`] shares at least one night with the
    /// `other` one.
    #[must_use]
    pub fn overlaps(self, other: Self) -> bool {
        self.check_in < other.check_out && self.check_out > other.check_in
    }
}

impl fmt::Display for Stay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.check_in, self.check_out)
    }
}

#[cfg(test)]
mod spec {
    use common::Date;

    use super::Stay;

    fn stay(check_in: &str, check_out: &str) -> Stay {
        Stay::new(check_in.parse().unwrap(), check_out.parse().unwrap())
    }

    #[test]
    fn counts_nights() {
        assert_eq!(stay("2024-06-01", "2024-06-04").nights(), 3);
        assert_eq!(stay("2024-06-01", "2024-06-01").nights(), 0);
        assert_eq!(stay("2024-06-04", "2024-06-01").nights(), -3);

        assert!(stay("2024-06-01", "2024-06-01").is_empty());
        assert!(!stay("2024-06-01", "2024-06-02").is_empty());
    }

    #[test]
    fn overlaps_as_half_open_ranges() {
        let base = stay("2024-06-01", "2024-06-04");

        assert!(base.overlaps(stay("2024-06-02", "2024-06-05")));
        assert!(base.overlaps(stay("2024-05-20", "2024-06-02")));
        assert!(base.overlaps(stay("2024-06-02", "2024-06-03")));
        assert!(base.overlaps(base));

        // Checking out on the day another guest checks in is not a conflict.
        assert!(!base.overlaps(stay("2024-06-04", "2024-06-06")));
        assert!(!base.overlaps(stay("2024-05-28", "2024-06-01")));
    }

    #[test]
    fn displays_as_range() {
        let stay = Stay::new(
            Date::from_ymd(2024, 6, 1).unwrap(),
            Date::from_ymd(2024, 6, 4).unwrap(),
        );

        assert_eq!(stay.to_string(), "[2024-06-01, 2024-06-04)");
    }
}
