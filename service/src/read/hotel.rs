//! [`Hotel`] listing read definitions.

use std::{cmp, str::FromStr};

use common::define_kind;
use serde::Deserialize;

use crate::domain::hotel::{self, Hotel};

/// Filter of a [`Hotel`]s listing.
#[derive(Clone, Debug, Default)]
pub struct Filter {
    /// Exact [`hotel::City`] of a [`Hotel`].
    pub city: Option<hotel::City>,

    /// Exact [`hotel::Country`] of a [`Hotel`].
    pub country: Option<hotel::Country>,

    /// Exact [`hotel::Stars`] of a [`Hotel`].
    pub stars: Option<hotel::Stars>,

    /// Required Wi-Fi availability.
    pub has_wifi: Option<bool>,

    /// Required parking availability.
    pub has_parking: Option<bool>,

    /// Text to find in the name, city, country or description of a
    /// [`Hotel`], ignoring case.
    pub search: Option<String>,

    /// [`Ordering`] of the listed [`Hotel`]s.
    pub ordering: Ordering,
}

impl Filter {
    /// Checks whether the provided [`Hotel`] passes this [`Filter`].
    #[must_use]
    pub fn admits(&self, hotel: &Hotel) -> bool {
        let amenities = &hotel.amenities;
        self.city.as_ref().map_or(true, |c| &hotel.city == c)
            && self.country.as_ref().map_or(true, |c| &hotel.country == c)
            && self.stars.map_or(true, |s| hotel.stars == s)
            && self.has_wifi.map_or(true, |w| amenities.has_wifi == w)
            && self.has_parking.map_or(true, |p| amenities.has_parking == p)
            && self.search.as_deref().map_or(true, |text| {
                let text = text.trim();
                text.is_empty()
                    || contains(&hotel.name, text)
                    || hotel.city.matches(text)
                    || contains(&hotel.country, text)
                    || hotel.description.matches(text)
            })
    }
}

/// Checks whether the provided `value` contains the provided `pattern`,
/// ignoring case.
fn contains(value: &impl AsRef<str>, pattern: &str) -> bool {
    value
        .as_ref()
        .to_lowercase()
        .contains(&pattern.to_lowercase())
}

define_kind! {
    #[doc = "Attribute [`Hotel`]s are ordered by."]
    enum OrderKey {
        #[doc = "[`hotel::Name`], alphabetically."]
        Name = 1,

        #[doc = "[`hotel::Stars`], lowest first."]
        Stars = 2,
    }
}

/// Ordering of listed [`Hotel`]s.
///
/// Its string form is the [`OrderKey`], prefixed with `-` for the descending
/// direction: `stars`, `-stars`, `name`, `-name`.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(try_from = "String")]
pub struct Ordering {
    /// [`OrderKey`] to compare [`Hotel`]s by.
    pub key: OrderKey,

    /// Whether the greatest [`Hotel`]s go first.
    pub descending: bool,
}

impl Ordering {
    /// Compares the provided [`Hotel`]s according to this [`Ordering`].
    ///
    /// Ties are resolved by [`hotel::Name`] and then by [`hotel::Id`], so
    /// listings are stable.
    #[must_use]
    pub fn compare(self, a: &Hotel, b: &Hotel) -> cmp::Ordering {
        let by_name = || {
            AsRef::<str>::as_ref(&a.name).cmp(AsRef::<str>::as_ref(&b.name))
        };
        let primary = match self.key {
            OrderKey::Name => by_name(),
            OrderKey::Stars => a.stars.cmp(&b.stars),
        };
        let primary = if self.descending {
            primary.reverse()
        } else {
            primary
        };
        primary.then_with(by_name).then_with(|| a.id.cmp(&b.id))
    }
}

impl Default for Ordering {
    fn default() -> Self {
        Self {
            key: OrderKey::Name,
            descending: false,
        }
    }
}

impl FromStr for Ordering {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (descending, key) = match s.strip_prefix('-') {
            Some(key) => (true, key),
            None => (false, s),
        };
        let key = key.parse().map_err(|_| "unknown `Ordering`")?;
        Ok(Self { key, descending })
    }
}

impl TryFrom<String> for Ordering {
    type Error = &'static str;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}
