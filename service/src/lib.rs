//! Service contains the business logic of the hotel booking backend: the
//! domain model, the availability and pricing engine, and the [`Command`]s,
//! [`Query`]s and [`Task`]s built upon them.
#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod command;
pub mod domain;
pub mod infra;
pub mod query;
pub mod read;
pub mod task;

use std::error::Error;

use common::operations::{By, Notify, Start};
use tracing as log;

use self::{domain::Notification, infra::Mailer};

#[cfg(doc)]
use infra::Database;

pub use self::{command::Command, query::Query, task::Task};

/// [`Service`] configuration.
#[derive(Clone, Copy, Debug, Default)]
pub struct Config {
    /// [`task::CompleteFinishedBookings`] configuration.
    pub complete_finished_bookings: task::complete_finished_bookings::Config,
}

/// Domain service.
#[derive(Clone, Debug)]
pub struct Service<Db> {
    /// Configuration of this [`Service`].
    config: Config,

    /// [`Database`] of this [`Service`].
    database: Db,

    /// [`Mailer`] notifying guests about their [`Booking`]s.
    ///
    /// [`Booking`]: domain::Booking
    mailer: Mailer,
}

impl<Db> Service<Db> {
    /// Creates a new [`Service`] with the provided parameters, along with the
    /// [`task::Background`] environment running its [`Task`]s.
    pub fn new(
        config: Config,
        database: Db,
        mailer: Mailer,
    ) -> (Self, task::Background)
    where
        Self: Task<
                Start<
                    By<
                        task::CompleteFinishedBookings<Self>,
                        task::complete_finished_bookings::Config,
                    >,
                >,
                Ok = (),
                Err: Error,
            > + Clone
            + 'static,
    {
        let this = Service {
            config,
            database,
            mailer,
        };

        let mut bg = task::Background::default();
        let svc = this.clone();
        bg.spawn("complete_finished_bookings", async move {
            svc.execute(Start(By::new(svc.config().complete_finished_bookings)))
                .await
        });

        (this, bg)
    }

    /// Returns [`Config`] of this [`Service`].
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns [`Database`] of this [`Service`].
    #[must_use]
    pub fn database(&self) -> &Db {
        &self.database
    }

    /// Returns [`Mailer`] of this [`Service`].
    #[must_use]
    pub fn mailer(&self) -> &Mailer {
        &self.mailer
    }

    /// Delivers the provided [`Notification`] with the [`Mailer`].
    ///
    /// A delivery failure is only logged, since the [`Booking`] change it
    /// reports is already committed.
    ///
    /// [`Booking`]: domain::Booking
    pub(crate) async fn notify(&self, notification: Notification) {
        let id = notification.booking.id;
        if let Err(e) = self.mailer.execute(Notify(notification)).await {
            log::warn!(
                booking.id = %id,
                "failed to notify about `Booking(id: {id})`: {e}",
            );
        }
    }
}

#[cfg(test)]
pub(crate) mod spec {
    use std::num::NonZeroU16;

    use common::{operations::Insert, Date, DateTime, Handler as _};

    use crate::{
        command::{create_booking, CreateBooking},
        domain::{
            booking::Stay, hotel, payment, policy, room_type, user, Email,
            Hotel, Policy, RoomType,
        },
        infra::{Mailer, Memory},
        Config, Service,
    };

    pub(crate) fn service() -> Service<Memory> {
        service_with(Mailer::default())
    }

    /// Creates a new [`Service`] notifying with the provided [`Mailer`].
    pub(crate) fn service_with(mailer: Mailer) -> Service<Memory> {
        Service {
            config: Config::default(),
            database: Memory::new(),
            mailer,
        }
    }

    pub(crate) fn days_from_today(days: i64) -> Date {
        Date::today().checked_add_days(days).unwrap()
    }

    /// Stores a new [`RoomType`] of a new five-star Parisian [`Hotel`] having
    /// the standard cancellation [`Policy`].
    pub(crate) async fn room_type(
        svc: &Service<Memory>,
        quantity: u16,
        capacity: u16,
        price: &str,
    ) -> RoomType {
        let hotel = Hotel {
            id: hotel::Id::new(),
            name: hotel::Name::new("Hôtel Plaza Paris").unwrap(),
            city: hotel::City::new("Paris").unwrap(),
            country: hotel::Country::new("France").unwrap(),
            address: hotel::Address::new("25 Avenue Montaigne").unwrap(),
            stars: hotel::Stars::new(5).unwrap(),
            description: hotel::Description::new("Palace parisien.").unwrap(),
            email: hotel::Email::new("contact@plaza-paris.fr").unwrap(),
            phone: hotel::Phone::new("+33 1 53 67 66 65").unwrap(),
            amenities: hotel::Amenities::default(),
            created_at: DateTime::now().coerce(),
        };
        let policy = Policy::new(
            hotel.id,
            policy::spec::standard().tiers().iter().cloned(),
        );
        let room_type = RoomType {
            id: room_type::Id::new(),
            hotel_id: hotel.id,
            name: room_type::Name::new("Chambre Double Supérieure").unwrap(),
            kind: room_type::Kind::Double,
            capacity,
            price_per_night: price.parse().unwrap(),
            quantity,
            description: room_type::Description::new("Lit queen size.")
                .unwrap(),
            size: 25,
            amenities: room_type::Amenities::default(),
        };

        let db = svc.database();
        db.execute(Insert(hotel)).await.unwrap();
        db.execute(Insert(policy)).await.unwrap();
        db.execute(Insert(room_type.clone())).await.unwrap();
        room_type
    }

    /// Books a single room of the provided [`RoomType`] for one guest
    /// leaving a contact [`Email`].
    pub(crate) async fn book(
        svc: &Service<Memory>,
        room_type: &RoomType,
        from: i64,
        to: i64,
    ) -> create_booking::Output {
        svc.execute(CreateBooking {
            user_id: user::Id::new(),
            room_type_id: room_type.id,
            stay: Stay::new(days_from_today(from), days_from_today(to)),
            rooms: NonZeroU16::MIN,
            guests: NonZeroU16::MIN,
            special_requests: None,
            contact_email: Email::new("client1@test.com"),
            payment_method: payment::Method::CreditCard,
        })
        .await
        .unwrap()
    }
}
