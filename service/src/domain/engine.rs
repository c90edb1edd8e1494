//! Booking availability and pricing engine.
//!
//! Pure computations over a [`RoomType`], a requested [`Stay`] and the
//! [`Booking`]s already made. Nothing here reads a clock or a database:
//! callers provide the reference [`Date`] and decide whether the availability
//! check and the following insert happen atomically.

use common::{define_kind, Date, Money};
use derive_more::{Display, Error as StdError};
use serde::Serialize;

use crate::domain::{
    booking::{self, Guests, Rooms, Stay, CANCELLATION_CUTOFF_DAYS},
    policy::{self, Policy},
    Booking, RoomType,
};

/// Rooms of a [`RoomType`] left for a requested [`Stay`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct Availability {
    /// Rooms held by the existing [`Booking`]s overlapping the [`Stay`].
    pub booked: u32,

    /// Rooms left once the requested ones are booked too.
    pub remaining: u32,
}

/// Outcome of cancelling a [`Booking`].
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Refund {
    /// Days between the cancellation and the check-in.
    pub lead_time: i64,

    /// Applied cancellation [`policy::Tier`].
    pub tier: policy::Tier,

    /// Amount returned to the guest.
    pub amount: Money,

    /// Amount kept as the penalty.
    pub retained: Money,
}

/// Checks whether the requested `rooms` of the provided [`RoomType`] can host
/// the `guests` during the [`Stay`], given the `existing` [`Booking`]s.
///
/// Only [`Booking`]s of the same [`RoomType`] that still hold their rooms and
/// overlap the [`Stay`] are counted.
///
/// # Errors
///
/// - [`Error::InvalidRange`] if the [`Stay`] has no nights;
/// - [`Error::Unavailable`] if not enough rooms are left, or the rooms cannot
///   host all the `guests`.
pub fn check_availability<'b>(
    room_type: &RoomType,
    stay: Stay,
    rooms: Rooms,
    guests: Guests,
    existing: impl IntoIterator<Item = &'b Booking>,
) -> Result<Availability, Error> {
    _ = nights(stay)?;

    let booked = existing
        .into_iter()
        .filter(|b| b.holds(room_type.id, stay))
        .map(|b| u32::from(b.rooms.get()))
        .sum::<u32>();
    let requested = u32::from(rooms.get());
    let quantity = u32::from(room_type.quantity);

    let Some(remaining) = quantity
        .checked_sub(booked)
        .and_then(|left| left.checked_sub(requested))
    else {
        return Err(Error::Unavailable(Unavailability::SoldOut {
            booked,
            requested,
            quantity,
        }));
    };

    let capacity = u32::from(room_type.capacity) * requested;
    if u32::from(guests.get()) > capacity {
        return Err(Error::Unavailable(Unavailability::OverCapacity {
            guests: guests.get(),
            rooms: rooms.get(),
            capacity: room_type.capacity,
        }));
    }

    Ok(Availability { booked, remaining })
}

/// Computes the total price of the requested `rooms` of the provided
/// [`RoomType`] for the whole [`Stay`].
///
/// The result is rounded once, after multiplying the nightly price.
///
/// # Errors
///
/// [`Error::InvalidRange`] if the [`Stay`] has no nights.
pub fn compute_price(
    room_type: &RoomType,
    stay: Stay,
    rooms: Rooms,
) -> Result<Money, Error> {
    let nights = nights(stay)?;
    room_type
        .price_per_night
        .checked_mul(nights)
        .and_then(|m| m.checked_mul(u32::from(rooms.get())))
        .map(Money::round)
        // Only reachable for stays of millions of years.
        .ok_or(Error::InvalidRange(stay))
}

/// Computes the [`Refund`] of cancelling the provided [`Booking`] on the
/// `as_of` [`Date`] under the provided cancellation [`Policy`].
///
/// # Errors
///
/// - [`Error::NotCancellable`] if the [`Booking`] is already cancelled or
///   completed, or its check-in is [`CANCELLATION_CUTOFF_DAYS`] or less away;
/// - [`Error::NoPolicyDefined`] if no [`policy::Tier`] applies.
pub fn compute_refund(
    booking: &Booking,
    policy: &Policy,
    as_of: Date,
) -> Result<Refund, Error> {
    if booking.status.is_terminal() {
        return Err(Error::NotCancellable(NotCancellable::Terminal(
            booking.status,
        )));
    }

    let lead_time = booking.lead_time(as_of);
    if lead_time <= CANCELLATION_CUTOFF_DAYS {
        return Err(Error::NotCancellable(NotCancellable::TooLate {
            lead_time,
        }));
    }

    let tier = policy
        .tier_for(lead_time)
        .ok_or(Error::NoPolicyDefined { lead_time })?;

    let amount = tier.penalty.complement().of(booking.total_price).round();
    let retained = booking
        .total_price
        .checked_sub(amount)
        .unwrap_or(Money::ZERO);

    Ok(Refund {
        lead_time,
        tier: tier.clone(),
        amount,
        retained,
    })
}

/// Returns the number of nights of the provided [`Stay`].
fn nights(stay: Stay) -> Result<u32, Error> {
    u32::try_from(stay.nights())
        .ok()
        .filter(|n| *n > 0)
        .ok_or(Error::InvalidRange(stay))
}

/// Error of the engine computations.
#[derive(Clone, Debug, Display, StdError)]
pub enum Error {
    /// Requested [`Stay`] has no nights.
    #[display("`check_out` must be after `check_in`, got {_0}")]
    InvalidRange(#[error(not(source))] Stay),

    /// Requested rooms cannot be booked.
    #[display("{_0}")]
    Unavailable(#[error(not(source))] Unavailability),

    /// [`Booking`] cannot be cancelled.
    #[display("{_0}")]
    NotCancellable(#[error(not(source))] NotCancellable),

    /// Cancellation [`Policy`] has no [`policy::Tier`] for the lead time.
    #[display(
        "cancellation policy has no tier for {lead_time} days before \
         check-in"
    )]
    NoPolicyDefined {
        /// Days between the cancellation and the check-in.
        lead_time: i64,
    },
}

impl Error {
    /// Returns the [`ErrorKind`] of this [`Error`].
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidRange(_) => ErrorKind::InvalidRange,
            Self::Unavailable(_) => ErrorKind::Unavailable,
            Self::NotCancellable(_) => ErrorKind::NotCancellable,
            Self::NoPolicyDefined { .. } => ErrorKind::NoPolicyDefined,
        }
    }
}

define_kind! {
    #[doc = "Kind of an engine [`Error`]."]
    enum ErrorKind {
        #[doc = "[`Error::InvalidRange`]."]
        InvalidRange = 1,

        #[doc = "[`Error::Unavailable`]."]
        Unavailable = 2,

        #[doc = "[`Error::NotCancellable`]."]
        NotCancellable = 3,

        #[doc = "[`Error::NoPolicyDefined`]."]
        NoPolicyDefined = 4,
    }
}

/// Reason of [`Error::Unavailable`].
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum Unavailability {
    /// Not enough rooms are left.
    #[display(
        "{booked} of {quantity} rooms are already booked for the period, \
         {requested} more requested"
    )]
    SoldOut {
        /// Rooms held by the overlapping [`Booking`]s.
        booked: u32,

        /// Requested rooms.
        requested: u32,

        /// Total rooms of the [`RoomType`].
        quantity: u32,
    },

    /// Requested rooms cannot host all the guests.
    #[display(
        "{guests} guests exceed the capacity of {rooms} room(s) hosting \
         {capacity} guest(s) each"
    )]
    OverCapacity {
        /// Requested guests.
        guests: u16,

        /// Requested rooms.
        rooms: u16,

        /// Guests a single room hosts.
        capacity: u16,
    },
}

/// Reason of [`Error::NotCancellable`].
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum NotCancellable {
    /// [`Booking`] is already in a terminal [`booking::Status`].
    #[display("`Booking` is already {_0}")]
    Terminal(booking::Status),

    /// Check-in is too close.
    #[display(
        "`Booking` can only be cancelled more than {} day(s) before \
         check-in, {lead_time} left",
        CANCELLATION_CUTOFF_DAYS
    )]
    TooLate {
        /// Days between the cancellation and the check-in.
        lead_time: i64,
    },
}
