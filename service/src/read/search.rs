//! Room search read definitions.

use common::Money;
use serde::Serialize;

use crate::domain::{
    booking::{Guests, Rooms, Stay},
    hotel::{self, Hotel},
    RoomType,
};

/// Filter of a room search.
#[derive(Clone, Debug)]
pub struct Filter {
    /// Requested [`Stay`].
    pub stay: Stay,

    /// Number of requested rooms.
    pub rooms: Rooms,

    /// Number of guests to host.
    pub guests: Guests,

    /// Part of the [`Hotel`] city name, matched ignoring case.
    pub city: Option<String>,

    /// Minimal nightly price of a room.
    pub min_price: Option<Money>,

    /// Maximal nightly price of a room.
    pub max_price: Option<Money>,

    /// Exact [`hotel::Stars`] of a [`Hotel`].
    pub stars: Option<hotel::Stars>,
}

impl Filter {
    /// Checks whether the provided [`RoomType`] of the provided [`Hotel`]
    /// passes the optional criteria of this [`Filter`].
    ///
    /// Availability is not checked here.
    #[must_use]
    pub fn admits(&self, hotel: &Hotel, room_type: &RoomType) -> bool {
        let price = room_type.price_per_night;
        room_type.hotel_id == hotel.id
            && room_type.quantity > 0
            && self.city.as_deref().map_or(true, |c| hotel.city.matches(c))
            && self.min_price.map_or(true, |min| price >= min)
            && self.max_price.map_or(true, |max| price <= max)
            && self.stars.map_or(true, |s| hotel.stars == s)
    }
}

/// [`RoomType`]s (along with their [`Hotel`]s) passing a [`Filter`] before
/// their availability is checked.
#[derive(Clone, Debug, Default)]
pub struct Candidates(pub Vec<(Hotel, RoomType)>);

/// Single result of a room search.
#[derive(Clone, Debug, Serialize)]
pub struct Match {
    /// [`Hotel`] offering the [`RoomType`].
    pub hotel: Hotel,

    /// Available [`RoomType`].
    pub room_type: RoomType,

    /// Number of nights of the requested [`Stay`].
    pub nights: u32,

    /// Price of the requested rooms for the whole [`Stay`].
    pub total_price: Money,

    /// Rooms left once the requested ones are booked.
    pub rooms_left: u32,
}
