//! [`Hotel`] definitions.

use std::str::FromStr;

use common::{unit, DateTimeOf};
use derive_more::{AsRef, Display, From, Into};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use crate::domain::Email;

/// Hotel offering [`RoomType`]s for booking.
///
/// [`RoomType`]: crate::domain::RoomType
#[derive(Clone, Debug, Serialize)]
pub struct Hotel {
    /// ID of this [`Hotel`].
    pub id: Id,

    /// [`Name`] of this [`Hotel`].
    pub name: Name,

    /// [`City`] this [`Hotel`] is located in.
    pub city: City,

    /// [`Country`] this [`Hotel`] is located in.
    pub country: Country,

    /// Street [`Address`] of this [`Hotel`].
    pub address: Address,

    /// Rating of this [`Hotel`].
    pub stars: Stars,

    /// [`Description`] of this [`Hotel`].
    pub description: Description,

    /// Contact [`Email`] of this [`Hotel`].
    pub email: Email,

    /// Contact [`Phone`] of this [`Hotel`].
    pub phone: Phone,

    /// [`Amenities`] this [`Hotel`] offers.
    #[serde(flatten)]
    pub amenities: Amenities,

    /// [`DateTime`] when this [`Hotel`] was created.
    ///
    /// [`DateTime`]: common::DateTime
    pub created_at: CreationDateTime,
}

/// ID of a [`Hotel`].
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

/// Checks whether the given `text` is a valid single-line hotel attribute.
fn is_valid_text(text: &str, max_len: usize) -> bool {
    text.trim() == text && !text.is_empty() && text.len() <= max_len
}

/// Name of a [`Hotel`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq, Serialize)]
#[as_ref(forward)]
#[serde(transparent)]
pub struct Name(String);

impl Name {
    /// Creates a new [`Name`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        is_valid_text(&name, 200).then_some(Self(name))
    }
}

impl FromStr for Name {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Name`")
    }
}

/// City of a [`Hotel`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq, Serialize)]
#[as_ref(forward)]
#[serde(transparent)]
pub struct City(String);

impl City {
    /// Creates a new [`City`] if the given `city` is valid.
    #[must_use]
    pub fn new(city: impl Into<String>) -> Option<Self> {
        let city = city.into();
        is_valid_text(&city, 100).then_some(Self(city))
    }

    /// Checks whether this [`City`] contains the provided `pattern`,
    /// ignoring case.
    #[must_use]
    pub fn matches(&self, pattern: &str) -> bool {
        self.0.to_lowercase().contains(&pattern.to_lowercase())
    }
}

impl FromStr for City {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `City`")
    }
}

/// Country of a [`Hotel`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq, Serialize)]
#[as_ref(forward)]
#[serde(transparent)]
pub struct Country(String);

impl Country {
    /// Creates a new [`Country`] if the given `country` is valid.
    #[must_use]
    pub fn new(country: impl Into<String>) -> Option<Self> {
        let country = country.into();
        is_valid_text(&country, 100).then_some(Self(country))
    }
}

impl FromStr for Country {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Country`")
    }
}

/// Street address of a [`Hotel`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq, Serialize)]
#[as_ref(forward)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    /// Creates a new [`Address`] if the given `address` is valid.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Option<Self> {
        let address = address.into();
        is_valid_text(&address, 255).then_some(Self(address))
    }
}

impl FromStr for Address {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Address`")
    }
}

/// Star rating of a [`Hotel`], from `1` to `5`.
#[derive(
    Clone,
    Copy,
    Debug,
    Display,
    Eq,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[serde(transparent)]
pub struct Stars(u8);

impl Stars {
    /// Creates new [`Stars`] if the given `stars` are within `1..=5`.
    #[must_use]
    pub fn new(stars: u8) -> Option<Self> {
        (1..=5).contains(&stars).then_some(Self(stars))
    }
}

impl<'de> Deserialize<'de> for Stars {
    fn deserialize<D>(d: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error as _;

        Self::new(u8::deserialize(d)?)
            .ok_or_else(|| D::Error::custom("stars must be within `1..=5`"))
    }
}

/// Free-form description of a [`Hotel`].
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

    /// Checks whether this [`Description`] contains the provided `pattern`,
    /// ignoring case.
    #[must_use]
    pub fn matches(&self, pattern: &str) -> bool {
        self.0.to_lowercase().contains(&pattern.to_lowercase())
    }
}

impl FromStr for Description {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Description`")
    }
}

/// Contact phone number of a [`Hotel`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq, Serialize)]
#[as_ref(forward)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    /// Creates a new [`Phone`] if the given `phone` is valid.
    #[must_use]
    pub fn new(phone: impl Into<String>) -> Option<Self> {
        let phone = phone.into();
        let valid = is_valid_text(&phone, 20)
            && phone.chars().any(|c| c.is_ascii_digit())
            && phone
                .chars()
                .all(|c| c.is_ascii_digit() || " +-().".contains(c));
        valid.then_some(Self(phone))
    }
}

impl FromStr for Phone {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Phone`")
    }
}

/// Facilities a [`Hotel`] offers to its guests.
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize,
)]
pub struct Amenities {
    /// Whether Wi-Fi is available.
    pub has_wifi: bool,

    /// Whether guests may park.
    pub has_parking: bool,

    /// Whether there is a swimming pool.
    pub has_pool: bool,

    /// Whether there is a spa.
    pub has_spa: bool,

    /// Whether there is a restaurant.
    pub has_restaurant: bool,

    /// Whether there is a gym.
    pub has_gym: bool,
}

/// [`DateTime`] when a [`Hotel`] was created.
///
/// [`DateTime`]: common::DateTime
pub type CreationDateTime = DateTimeOf<(Hotel, unit::Creation)>;

#[cfg(test)]
mod spec {
    use super::{City, Description, Name, Phone, Stars};

    #[test]
    fn validates_text() {
        assert!(Name::new("Hôtel Plaza Paris").is_some());
        assert!(Name::new("").is_none());
        assert!(Name::new(" Plaza").is_none());
        assert!(Name::new("x".repeat(201)).is_none());
    }

    #[test]
    fn matches_city_ignoring_case() {
        let city = City::new("Paris").unwrap();

        assert!(city.matches("paris"));
        assert!(city.matches("ARI"));
        assert!(!city.matches("Lyon"));
    }

    #[test]
    fn validates_stars() {
        assert!(Stars::new(0).is_none());
        assert!(Stars::new(1).is_some());
        assert!(Stars::new(5).is_some());
        assert!(Stars::new(6).is_none());
    }

    #[test]
    fn validates_phone() {
        assert!(Phone::new("+33 1 53 67 66 65").is_some());
        assert!(Phone::new("(04) 78-00-00-00").is_some());
        assert!(Phone::new("call us").is_none());
        assert!(Phone::new("+").is_none());
        assert!(Phone::new("0".repeat(21)).is_none());
    }

    #[test]
    fn validates_description() {
        let text = Description::new("Vue sur la Tour Eiffel.\nSpa.").unwrap();

        assert!(text.matches("tour eiffel"));
        assert!(!text.matches("piscine"));
        assert!(Description::new("  \n ").is_none());
    }
}
