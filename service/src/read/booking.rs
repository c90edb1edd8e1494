//! [`Booking`]-related read definitions.

use common::Date;

use crate::domain::{booking::Stay, room_type};
#[cfg(doc)]
use crate::domain::{booking::Status, Booking, RoomType};

/// Selector of the [`Booking`]s of a [`RoomType`] holding its rooms during a
/// [`Stay`].
///
/// Only [`Status::Pending`] and [`Status::Confirmed`] [`Booking`]s hold
/// rooms.
#[derive(Clone, Copy, Debug)]
pub struct Overlapping {
    /// ID of the [`RoomType`] to select [`Booking`]s of.
    pub room_type_id: room_type::Id,

    /// [`Stay`] the selected [`Booking`]s overlap.
    pub stay: Stay,
}

/// Selector of the [`Status::Confirmed`] [`Booking`]s checked out on or before
/// the provided [`Date`].
#[derive(Clone, Copy, Debug)]
pub struct Finished(pub Date);
