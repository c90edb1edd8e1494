//! [`Email`] definitions.

use std::str::FromStr;

use derive_more::{AsRef, Display};
use serde::Serialize;

/// Email address, in the `local@domain` form.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq, Serialize)]
#[as_ref(forward)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Creates a new [`Email`] if the given `email` is valid.
    #[must_use]
    pub fn new(email: impl Into<String>) -> Option<Self> {
        let email = email.into();
        Self::check(&email).then_some(Self(email))
    }

    /// Checks whether the given `email` is a valid [`Email`].
    fn check(email: &str) -> bool {
        let Some((local, domain)) = email.split_once('@') else {
            return false;
        };
        !local.is_empty()
            && domain.contains('.')
            && !domain.starts_with('.')
            && !domain.ends_with('.')
            && !domain.contains('@')
            && !email.chars().any(char::is_whitespace)
            && email.len() <= 254
    }
}

impl FromStr for Email {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Email`")
    }
}

#[cfg(test)]
mod spec {
    use super::Email;

    #[test]
    fn validates() {
        assert!(Email::new("contact@plaza-paris.fr").is_some());
        assert!(Email::new("client1@test.com").is_some());
        assert!(Email::new("contact@localhost").is_none());
        assert!(Email::new("@plaza.fr").is_none());
        assert!(Email::new("contact@.fr").is_none());
        assert!(Email::new("con tact@plaza.fr").is_none());
        assert!(Email::new("a@b@plaza.fr").is_none());
    }
}
