//! [`Booking`] definitions.

pub mod stay;

use std::{num::NonZeroU16, str::FromStr};

use common::{define_kind, unit, Date, DateTimeOf, Money};
use derive_more::{AsRef, Display, Error, From, Into};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{room_type, user, Email};
#[cfg(doc)]
use crate::domain::{Payment, RoomType, User};

pub use self::stay::Stay;

/// Number of days before check-in since which a [`Booking`] cannot be
/// cancelled anymore.
///
/// A [`Booking`] is cancellable only while its lead time is strictly greater
/// than this value.
pub const CANCELLATION_CUTOFF_DAYS: i64 = 1;

/// Reservation of rooms of a [`RoomType`] for a [`Stay`].
#[derive(Clone, Debug, Serialize)]
pub struct Booking {
    /// ID of this [`Booking`].
    pub id: Id,

    /// ID of the [`User`] who made this [`Booking`].
    pub user_id: user::Id,

    /// ID of the reserved [`RoomType`].
    pub room_type_id: room_type::Id,

    /// Reserved [`Stay`].
    pub stay: Stay,

    /// Number of reserved rooms.
    pub rooms: Rooms,

    /// Number of guests staying in the reserved rooms.
    pub guests: Guests,

    /// Price of the whole [`Booking`].
    pub total_price: Money,

    /// [`Status`] of this [`Booking`].
    pub status: Status,

    /// Wishes of the guests, if any.
    pub special_requests: Option<SpecialRequests>,

    /// [`Email`] the [`Notification`]s about this [`Booking`] are sent to.
    ///
    /// [`Notification`]: crate::domain::Notification
    pub contact_email: Option<Email>,

    /// Reason of the cancellation, if this [`Booking`] was cancelled with one.
    pub cancellation_reason: Option<CancellationReason>,

    /// [`DateTime`] when this [`Booking`] was created.
    ///
    /// [`DateTime`]: common::DateTime
    pub created_at: CreationDateTime,

    /// [`DateTime`] when this [`Booking`] was modified the last time.
    ///
    /// [`DateTime`]: common::DateTime
    pub updated_at: ModificationDateTime,
}

impl Booking {
    /// Returns the number of nights of this [`Booking`].
    #[must_use]
    pub fn nights(&self) -> i64 {
        self.stay.nights()
    }

    /// Returns the number of whole days from the provided `as_of` [`Date`]
    /// until the check-in of this [`Booking`].
    #[must_use]
    pub fn lead_time(&self, as_of: Date) -> i64 {
        as_of.days_until(self.stay.check_in)
    }

    /// Checks whether this [`Booking`] still may be cancelled on the provided
    /// `as_of` [`Date`].
    #[must_use]
    pub fn can_cancel(&self, as_of: Date) -> bool {
        !self.status.is_terminal()
            && self.lead_time(as_of) > CANCELLATION_CUTOFF_DAYS
    }

    /// Checks whether this [`Booking`] holds rooms of the provided
    /// [`RoomType`] during the provided [`Stay`].
    #[must_use]
    pub fn holds(&self, room_type_id: room_type::Id, stay: Stay) -> bool {
        self.room_type_id == room_type_id
            && self.status.holds_inventory()
            && self.stay.overlaps(stay)
    }

    /// Moves this [`Booking`] into the provided [`Status`].
    ///
    /// # Errors
    ///
    /// If the current [`Status`] cannot be left for the provided one.
    pub fn transition(&mut self, to: Status) -> Result<(), TransitionError> {
        if !self.status.can_transition_to(to) {
            return Err(TransitionError {
                from: self.status,
                to,
            });
        }
        self.status = to;
        self.updated_at = ModificationDateTime::now();
        Ok(())
    }
}

/// Error of an illegal [`Booking`] [`Status`] transition.
#[derive(Clone, Copy, Debug, Display, Error)]
#[display("`Booking` cannot move from `{from}` to `{to}` status")]
pub struct TransitionError {
    /// [`Status`] the [`Booking`] is in.
    pub from: Status,

    /// Requested [`Status`].
    pub to: Status,
}

/// ID of a [`Booking`].
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    derive_more::FromStr,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying [`Uuid`] of this [`Id`].
    #[must_use]
    pub fn uuid(self) -> Uuid {
        self.0
    }
}

impl Default for Id {
    fn default() -> Self {
        Self::new()
    }
}

/// Number of rooms reserved by a [`Booking`].
pub type Rooms = NonZeroU16;

/// Number of guests of a [`Booking`].
pub type Guests = NonZeroU16;

define_kind! {
    #[doc = "Status of a [`Booking`]."]
    enum Status {
        #[doc = "Created and waiting for the [`Payment`]."]
        Pending = 1,

        #[doc = "[`Payment`] is completed."]
        Confirmed = 2,

        #[doc = "Cancelled by the [`User`]."]
        Cancelled = 3,

        #[doc = "Guests checked out."]
        Completed = 4,
    }
}

impl Status {
    /// Checks whether no transition out of this [`Status`] is possible.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Cancelled | Self::Completed)
    }

    /// Checks whether a [`Booking`] in this [`Status`] occupies rooms.
    #[must_use]
    pub fn holds_inventory(self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed)
    }

    /// Checks whether a [`Booking`] may move from this [`Status`] into the
    /// provided one.
    #[must_use]
    pub fn can_transition_to(self, to: Self) -> bool {
        matches!(
            (self, to),
            (Self::Pending, Self::Confirmed)
                | (Self::Pending | Self::Confirmed, Self::Cancelled)
                | (Self::Confirmed, Self::Completed),
        )
    }
}

/// Free-form wishes attached to a [`Booking`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq, Serialize)]
#[as_ref(forward)]
#[serde(transparent)]
pub struct SpecialRequests(String);

impl SpecialRequests {
    /// Creates new [`SpecialRequests`] if the given `text` is valid.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        (!text.trim().is_empty() && text.len() <= 2048).then_some(Self(text))
    }
}

impl FromStr for SpecialRequests {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `SpecialRequests`")
    }
}

/// Reason given when cancelling a [`Booking`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq, Serialize)]
#[as_ref(forward)]
#[serde(transparent)]
pub struct CancellationReason(String);

impl CancellationReason {
    /// Creates a new [`CancellationReason`] if the given `reason` is valid.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Option<Self> {
        let reason = reason.into();
        (!reason.trim().is_empty() && reason.len() <= 2048)
            .then_some(Self(reason))
    }
}

impl FromStr for CancellationReason {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `CancellationReason`")
    }
}

/// [`DateTime`] when a [`Booking`] was created.
///
/// [`DateTime`]: common::DateTime
pub type CreationDateTime = DateTimeOf<(Booking, unit::Creation)>;

/// [`DateTime`] when a [`Booking`] was modified.
///
/// [`DateTime`]: common::DateTime
pub type ModificationDateTime = DateTimeOf<(Booking, unit::Modification)>;

#[cfg(test)]
pub(crate) mod spec {
    use std::num::NonZeroU16;

    use common::{Date, DateTime, Money};

    use crate::domain::{room_type, user};

    use super::{
        Booking, Id, Status, Stay, TransitionError, CANCELLATION_CUTOFF_DAYS,
    };

    pub(crate) fn date(s: &str) -> Date {
        s.parse().unwrap()
    }

    pub(crate) fn booking(
        room_type_id: room_type::Id,
        check_in: &str,
        check_out: &str,
        rooms: u16,
        status: Status,
    ) -> Booking {
        Booking {
            id: Id::new(),
            user_id: user::Id::new(),
            room_type_id,
            stay: Stay::new(date(check_in), date(check_out)),
            rooms: NonZeroU16::new(rooms).unwrap(),
            guests: NonZeroU16::new(rooms).unwrap(),
            total_price: "600.00".parse::<Money>().unwrap(),
            status,
            special_requests: None,
            contact_email: None,
            cancellation_reason: None,
            created_at: DateTime::now().coerce(),
            updated_at: DateTime::now().coerce(),
        }
    }

    #[test]
    fn follows_state_machine() {
        use Status as S;

        for (from, to, allowed) in [
            (S::Pending, S::Confirmed, true),
            (S::Pending, S::Cancelled, true),
            (S::Confirmed, S::Cancelled, true),
            (S::Confirmed, S::Completed, true),
            (S::Pending, S::Completed, false),
            (S::Confirmed, S::Pending, false),
            (S::Cancelled, S::Confirmed, false),
            (S::Cancelled, S::Pending, false),
            (S::Completed, S::Cancelled, false),
            (S::Completed, S::Confirmed, false),
        ] {
            assert_eq!(from.can_transition_to(to), allowed, "{from} -> {to}");
        }
        for s in Status::ALL {
            assert!(!s.can_transition_to(*s), "{s} -> {s}");
        }
    }

    #[test]
    fn transition_updates_status() {
        let mut b = booking(
            room_type::Id::new(),
            "2024-06-01",
            "2024-06-04",
            1,
            Status::Pending,
        );

        b.transition(Status::Confirmed).unwrap();
        assert_eq!(b.status, Status::Confirmed);

        let err = b.transition(Status::Pending).unwrap_err();
        assert!(matches!(
            err,
            TransitionError {
                from: Status::Confirmed,
                to: Status::Pending,
            },
        ));
        assert_eq!(b.status, Status::Confirmed);
    }

    #[test]
    fn cancellable_only_before_cutoff() {
        let b = booking(
            room_type::Id::new(),
            "2024-06-10",
            "2024-06-12",
            1,
            Status::Confirmed,
        );

        assert_eq!(b.lead_time(date("2024-06-01")), 9);
        assert!(b.can_cancel(date("2024-06-08")));
        assert_eq!(b.lead_time(date("2024-06-09")), CANCELLATION_CUTOFF_DAYS);
        assert!(!b.can_cancel(date("2024-06-09")));
        assert!(!b.can_cancel(date("2024-06-10")));
        assert!(!b.can_cancel(date("2024-06-20")));

        let mut cancelled = b.clone();
        cancelled.status = Status::Cancelled;
        assert!(!cancelled.can_cancel(date("2024-06-01")));
    }

    #[test]
    fn holds_only_active_overlapping_rooms() {
        use Status::{Cancelled, Pending};

        let room_type = room_type::Id::new();
        let requested = Stay::new(date("2024-06-01"), date("2024-06-04"));

        let b = booking(room_type, "2024-06-02", "2024-06-05", 2, Pending);
        assert!(b.holds(room_type, requested));
        assert!(!b.holds(room_type::Id::new(), requested));

        let b = booking(room_type, "2024-06-04", "2024-06-05", 2, Pending);
        assert!(!b.holds(room_type, requested));

        let b = booking(room_type, "2024-06-02", "2024-06-05", 2, Cancelled);
        assert!(!b.holds(room_type, requested));
    }
}
