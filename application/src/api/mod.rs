//! REST API definitions.

pub mod booking;
pub mod hotel;
pub mod search;

use std::num::NonZeroU16;

use axum::{
    routing::{get, post},
    Router,
};

use crate::define_error;

/// Builds the [`Router`] of the REST API.
///
/// Handlers expect the [`Service`] to be provided as an
/// [`Extension`](axum::Extension).
///
/// [`Service`]: crate::Service
#[must_use]
pub fn router() -> Router {
    Router::new()
        .route("/hotels", get(hotel::list))
        .route("/hotels/:id", get(hotel::get))
        .route("/hotels/:id/room-types", get(hotel::room_types))
        .route(
            "/hotels/:id/cancellation-policy",
            get(hotel::cancellation_policy),
        )
        .route("/search", post(search::search))
        .route("/bookings", get(booking::list).post(booking::create))
        .route("/bookings/:id", get(booking::get))
        .route("/bookings/:id/payment", post(booking::pay))
        .route("/bookings/:id/cancel", post(booking::cancel))
}

/// Default number of requested rooms and guests.
pub(crate) fn one() -> NonZeroU16 {
    NonZeroU16::MIN
}

define_error! {
    enum ApiError {
        #[code = "HOTEL_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Hotel` with the provided ID does not exist"]
        HotelNotExists,

        #[code = "INVALID_HOTEL_FILTER"]
        #[status = BAD_REQUEST]
        #[message = "City and country must be up to 100 bytes"]
        InvalidHotelFilter,

        #[code = "POLICY_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Hotel` has no cancellation policy"]
        PolicyNotExists,

        #[code = "BOOKING_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Booking` with the provided ID does not exist"]
        BookingNotExists,

        #[code = "INVALID_SPECIAL_REQUESTS"]
        #[status = BAD_REQUEST]
        #[message = "Special requests must be non-blank and up to 2048 bytes"]
        InvalidSpecialRequests,

        #[code = "INVALID_CONTACT_EMAIL"]
        #[status = BAD_REQUEST]
        #[message = "Contact email must look like `local@domain`"]
        InvalidContactEmail,

        #[code = "INVALID_CANCELLATION_REASON"]
        #[status = BAD_REQUEST]
        #[message = "Cancellation reason must be non-blank and up to 2048 \
                     bytes"]
        InvalidCancellationReason,
    }
}
