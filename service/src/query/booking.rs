//! [`Query`] collection related to [`Booking`]s.

use common::operations::By;

use crate::domain::{booking, user, Booking, Payment};
#[cfg(doc)]
use crate::{domain::User, Query};

use super::DatabaseQuery;

/// Queries a [`Booking`] by its [`booking::Id`].
pub type ById = DatabaseQuery<By<Option<Booking>, booking::Id>>;

/// Queries [`Booking`]s of a [`User`], newest first.
pub type ByUser = DatabaseQuery<By<Vec<Booking>, user::Id>>;

/// Queries the [`Payment`] of a [`Booking`].
pub type PaymentOf = DatabaseQuery<By<Option<Payment>, booking::Id>>;
