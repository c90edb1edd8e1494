//! Cancellation [`Policy`] definitions.

use std::cmp::Reverse;

use common::Percent;
use derive_more::{AsRef, Display};
use serde::{Deserialize, Serialize};

use crate::domain::hotel;
#[cfg(doc)]
use crate::domain::{Booking, Hotel};

/// Cancellation policy of a [`Hotel`]: a table of penalty [`Tier`]s keyed by
/// the lead time of a cancelled [`Booking`].
#[derive(Clone, Debug, Serialize)]
pub struct Policy {
    /// ID of the [`Hotel`] this [`Policy`] belongs to.
    pub hotel_id: hotel::Id,

    /// [`Tier`]s sorted by descending [`Tier::threshold`].
    tiers: Vec<Tier>,
}

impl Policy {
    /// Creates a new [`Policy`] out of the provided [`Tier`]s, in any order.
    ///
    /// Of several [`Tier`]s with the same threshold only the first one is
    /// kept.
    #[must_use]
    pub fn new(
        hotel_id: hotel::Id,
        tiers: impl IntoIterator<Item = Tier>,
    ) -> Self {
        let mut tiers = tiers.into_iter().collect::<Vec<_>>();
        tiers.sort_by_key(|t| Reverse(t.threshold));
        tiers.dedup_by_key(|t| t.threshold);
        Self { hotel_id, tiers }
    }

    /// Creates a new [`Policy`] without any [`Tier`].
    #[must_use]
    pub fn empty(hotel_id: hotel::Id) -> Self {
        Self {
            hotel_id,
            tiers: Vec::new(),
        }
    }

    /// Returns the [`Tier`]s of this [`Policy`] in descending order of their
    /// thresholds.
    #[must_use]
    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    /// Returns the [`Tier`] applying to a cancellation made `lead_time` days
    /// before the check-in.
    ///
    /// This is the [`Tier`] with the largest threshold not exceeding the
    /// `lead_time`, falling back to the zero-threshold [`Tier`].
    #[must_use]
    pub fn tier_for(&self, lead_time: i64) -> Option<&Tier> {
        self.tiers
            .iter()
            .find(|t| i64::from(t.threshold) <= lead_time)
            .or_else(|| self.tiers.iter().find(|t| t.threshold == 0))
    }
}

/// Single row of a cancellation [`Policy`].
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Tier {
    /// Minimal lead time (in days before the check-in) this [`Tier`] applies
    /// since.
    pub threshold: LeadDays,

    /// Part of the [`Booking`] price retained on cancellation.
    pub penalty: Percent,

    /// Human-readable [`Description`] of this [`Tier`].
    pub description: Description,
}

/// Number of whole days before a check-in.
pub type LeadDays = u32;

/// Description of a [`Tier`].
#[derive(AsRef, Clone, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
#[as_ref(forward)]
#[serde(transparent)]
pub struct Description(String);

impl Description {
    /// Creates a new [`Description`] if the given `text` is not blank.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        (!text.trim().is_empty()).then_some(Self(text))
    }
}

#[cfg(test)]
pub(crate) mod spec {
    use common::Percent;

    use crate::domain::hotel;

    use super::{Description, Policy, Tier};

    pub(crate) fn tier(threshold: u32, penalty: u8) -> Tier {
        Tier {
            threshold,
            penalty: Percent::from(penalty),
            description: Description::new(format!(
                "{penalty}% penalty since {threshold} days before check-in",
            ))
            .unwrap(),
        }
    }

    /// Policy table every seeded hotel uses.
    pub(crate) fn standard() -> Policy {
        Policy::new(
            hotel::Id::new(),
            [tier(0, 100), tier(14, 20), tier(30, 0), tier(7, 50)],
        )
    }

    #[test]
    fn sorts_tiers_descending() {
        let thresholds = standard()
            .tiers()
            .iter()
            .map(|t| t.threshold)
            .collect::<Vec<_>>();

        assert_eq!(thresholds, [30, 14, 7, 0]);
    }

    #[test]
    fn drops_duplicated_thresholds() {
        let policy = Policy::new(
            hotel::Id::new(),
            [tier(7, 50), tier(7, 10), tier(0, 100)],
        );

        assert_eq!(policy.tiers().len(), 2);
        assert_eq!(policy.tiers()[0].penalty, Percent::from(50));
    }

    #[test]
    fn picks_largest_applicable_threshold() {
        let policy = standard();

        for (lead_time, threshold) in [
            (45, 30),
            (30, 30),
            (29, 14),
            (14, 14),
            (10, 7),
            (7, 7),
            (6, 0),
            (2, 0),
        ] {
            assert_eq!(
                policy.tier_for(lead_time).map(|t| t.threshold),
                Some(threshold),
                "lead time {lead_time}",
            );
        }
    }

    #[test]
    fn falls_back_to_zero_threshold() {
        assert_eq!(standard().tier_for(-3).map(|t| t.threshold), Some(0));
    }

    #[test]
    fn incomplete_table_has_gaps() {
        let policy = Policy::new(hotel::Id::new(), [tier(30, 0), tier(14, 20)]);

        assert!(policy.tier_for(10).is_none());
        assert!(Policy::empty(hotel::Id::new()).tier_for(10).is_none());
    }
}
