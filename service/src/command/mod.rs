//! [`Command`] definition.

pub mod cancel_booking;
pub mod create_booking;
pub mod process_payment;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    cancel_booking::CancelBooking, create_booking::CreateBooking,
    process_payment::ProcessPayment,
};
