//! Domain definitions.

pub mod booking;
pub mod email;
pub mod engine;
pub mod hotel;
pub mod notification;
pub mod payment;
pub mod policy;
pub mod room_type;
pub mod user;

pub use self::{
    booking::Booking, email::Email, hotel::Hotel,
    notification::Notification, payment::Payment, policy::Policy,
    room_type::RoomType, user::User,
};
