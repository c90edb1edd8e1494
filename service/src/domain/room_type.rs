//! [`RoomType`] definitions.

use std::str::FromStr;

use common::{define_kind, Money};
use derive_more::{AsRef, Display, From, Into};
use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;
use uuid::Uuid;

use crate::domain::hotel;
#[cfg(doc)]
use crate::domain::{Booking, Hotel};

/// Bookable category of rooms in a [`Hotel`].
///
/// This is the inventory [`Booking`]s hold rooms against: a [`Hotel`] has
/// [`RoomType::quantity`] identical rooms of this type.
#[derive(Clone, Debug, Serialize)]
pub struct RoomType {
    /// ID of this [`RoomType`].
    pub id: Id,

    /// ID of the [`Hotel`] this [`RoomType`] belongs to.
    pub hotel_id: hotel::Id,

    /// [`Name`] of this [`RoomType`].
    pub name: Name,

    /// [`Kind`] of this [`RoomType`].
    pub kind: Kind,

    /// Maximum number of guests a single room of this [`RoomType`] hosts.
    pub capacity: Capacity,

    /// Price of a single room of this [`RoomType`] for one night.
    pub price_per_night: Money,

    /// Total number of rooms of this [`RoomType`] in the [`Hotel`].
    pub quantity: Quantity,

    /// [`Description`] of this [`RoomType`].
    pub description: Description,

    /// Area of a single room of this [`RoomType`], in square meters.
    pub size: Size,

    /// [`Amenities`] of a single room of this [`RoomType`].
    #[serde(flatten)]
    pub amenities: Amenities,
}

/// ID of a [`RoomType`].
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
}

impl Default for Id {
    fn default() -> Self {
        Self::new()
    }
}

/// Name of a [`RoomType`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq, Serialize)]
#[as_ref(forward)]
#[serde(transparent)]
pub struct Name(String);

impl Name {
    /// Creates a new [`Name`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`Name`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        name.trim() == name && !name.is_empty() && name.len() <= 100
    }
}

impl FromStr for Name {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Name`")
    }
}

/// Free-form description of a [`RoomType`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq, Serialize)]
#[as_ref(forward)]
#[serde(transparent)]
pub struct Description(String);

impl Description {
    /// Creates a new [`Description`] if the given `text` isn't blank.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        (!text.trim().is_empty() && text.len() <= 5000).then_some(Self(text))
    }
}

/// Area of a room, in square meters.
pub type Size = u16;

/// Equipment of every room of a [`RoomType`].
#[derive(
    Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize,
    SmartDefault,
)]
pub struct Amenities {
    /// Whether there is a TV.
    #[default(true)]
    pub has_tv: bool,

    /// Whether there is air conditioning.
    #[default(true)]
    pub has_ac: bool,

    /// Whether there is a minibar.
    pub has_minibar: bool,

    /// Whether there is a safe.
    pub has_safe: bool,

    /// Whether there is a balcony.
    pub has_balcony: bool,

    /// Whether smoking is allowed.
    pub is_smoking: bool,
}

/// Number of guests a single room hosts.
pub type Capacity = u16;

/// Number of rooms of a [`RoomType`].
pub type Quantity = u16;

define_kind! {
    #[doc = "Kind of a [`RoomType`]."]
    enum Kind {
        #[doc = "Room with a single bed."]
        Single = 1,

        #[doc = "Room with a double bed."]
        Double = 2,

        #[doc = "Room with two single beds."]
        Twin = 3,

        #[doc = "Suite."]
        Suite = 4,

        #[doc = "Room for a family."]
        Family = 5,

        #[doc = "Presidential suite."]
        Presidential = 6,
    }
}
