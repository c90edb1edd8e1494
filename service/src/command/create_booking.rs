//! [`Command`] for creating a new [`Booking`].

use common::{
    operations::{By, Commit, Insert, Lock, Select, Transact, Transacted},
    Date, DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{
        booking::{
            self, Guests, Rooms, SpecialRequests, Status, Stay,
        },
        engine, hotel, notification, payment, room_type, user, Booking,
        Email, Hotel, Notification, Payment, RoomType,
    },
    infra::{database, Database},
    read::booking::Overlapping,
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Booking`].
///
/// Checks the availability and computes the price of the requested rooms
/// inside a single [`Database`] transaction holding the [`RoomType`], so
/// concurrent [`Booking`]s cannot overbook it.
#[derive(Clone, Debug)]
pub struct CreateBooking {
    /// ID of the [`User`] making the [`Booking`].
    ///
    /// [`User`]: crate::domain::User
    pub user_id: user::Id,

    /// ID of the [`RoomType`] to book.
    pub room_type_id: room_type::Id,

    /// Requested [`Stay`].
    pub stay: Stay,

    /// Number of requested rooms.
    pub rooms: Rooms,

    /// Number of guests.
    pub guests: Guests,

    /// [`SpecialRequests`] of the guests, if any.
    pub special_requests: Option<SpecialRequests>,

    /// [`Email`] to send the [`Notification`]s about the [`Booking`] to.
    pub contact_email: Option<Email>,

    /// [`payment::Method`] the [`Booking`] will be paid with.
    pub payment_method: payment::Method,
}

/// Output of [`CreateBooking`] [`Command`].
#[derive(Clone, Debug)]
pub struct Output {
    /// Created [`Booking`].
    pub booking: Booking,

    /// Pending [`Payment`] of the created [`Booking`].
    pub payment: Payment,

    /// Number of nights of the created [`Booking`].
    pub nights: u32,

    /// Rooms of the [`RoomType`] left for the [`Stay`].
    pub rooms_left: u32,
}

impl<Db> Command<CreateBooking> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Lock<By<RoomType, room_type::Id>>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<RoomType>, room_type::Id>>,
            Ok = Option<RoomType>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Hotel>, hotel::Id>>,
            Ok = Option<Hotel>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<Booking>, Overlapping>>,
            Ok = Vec<Booking>,
            Err = Traced<database::Error>,
        > + Database<Insert<Booking>, Err = Traced<database::Error>>
        + Database<Insert<Payment>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Output;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateBooking) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateBooking {
            user_id,
            room_type_id,
            stay,
            rooms,
            guests,
            special_requests,
            contact_email,
            payment_method,
        } = cmd;

        let today = Date::today();
        if stay.check_in < today {
            return Err(tracerr::new!(E::CheckInInPast(stay.check_in)));
        }

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent overbooking of the same `RoomType`.
        tx.execute(Lock(By::<RoomType, _>::new(room_type_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let room_type = tx
            .execute(Select(By::<Option<RoomType>, _>::new(room_type_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::RoomTypeNotExists(room_type_id))
            .map_err(tracerr::wrap!())?;

        let hotel = tx
            .execute(Select(By::<Option<Hotel>, _>::new(room_type.hotel_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::HotelNotExists(room_type.hotel_id))
            .map_err(tracerr::wrap!())?;

        let existing = tx
            .execute(Select(By::new(Overlapping { room_type_id, stay })))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let availability = engine::check_availability(
            &room_type, stay, rooms, guests, &existing,
        )
        .map_err(tracerr::from_and_wrap!(=> E))?;
        let total_price = engine::compute_price(&room_type, stay, rooms)
            .map_err(tracerr::from_and_wrap!(=> E))?;

        let now = DateTime::now();
        let booking = Booking {
            id: booking::Id::new(),
            user_id,
            room_type_id,
            stay,
            rooms,
            guests,
            total_price,
            status: Status::Pending,
            special_requests,
            contact_email,
            cancellation_reason: None,
            created_at: now.coerce(),
            updated_at: now.coerce(),
        };
        let payment = Payment::pending(&booking, payment_method);

        tx.execute(Insert(booking.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Insert(payment.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        self.notify(Notification {
            booking: booking.clone(),
            hotel: hotel.name,
            room_type: room_type.name,
            event: notification::Event::Created,
        })
        .await;

        let nights = u32::try_from(booking.nights()).unwrap_or_default();
        Ok(Output {
            booking,
            payment,
            nights,
            rooms_left: availability.remaining,
        })
    }
}

/// Error of [`CreateBooking`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// Requested check-in [`Date`] has already passed.
    #[display("check-in `{_0}` is in the past")]
    CheckInInPast(#[error(not(source))] Date),

    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// Requested rooms cannot be booked.
    #[display("{_0}")]
    #[from]
    Engine(engine::Error),

    /// [`Hotel`] of the [`RoomType`] does not exist.
    #[display("`Hotel(id: {_0})` does not exist")]
    HotelNotExists(#[error(not(source))] hotel::Id),

    /// [`RoomType`] with the provided ID does not exist.
    #[display("`RoomType(id: {_0})` does not exist")]
    RoomTypeNotExists(#[error(not(source))] room_type::Id),
}

#[cfg(test)]
mod spec {
    use std::num::NonZeroU16;

    use common::{
        operations::{By, Select},
        Date, Handler as _,
    };

    use crate::{
        domain::{
            booking::{self, Status, Stay},
            engine, payment, room_type, user, Booking, Email, Payment,
        },
        infra::mailer,
        spec::{days_from_today, room_type, service, service_with},
    };

    use super::{CreateBooking, ExecutionError};

    fn cmd(
        room_type_id: room_type::Id,
        from: i64,
        to: i64,
        rooms: u16,
        guests: u16,
    ) -> CreateBooking {
        CreateBooking {
            user_id: user::Id::new(),
            room_type_id,
            stay: Stay::new(days_from_today(from), days_from_today(to)),
            rooms: NonZeroU16::new(rooms).unwrap(),
            guests: NonZeroU16::new(guests).unwrap(),
            special_requests: booking::SpecialRequests::new("Late arrival"),
            contact_email: Email::new("client2@test.com"),
            payment_method: payment::Method::Paypal,
        }
    }

    #[tokio::test]
    async fn creates_pending_booking_with_payment() {
        let svc = service();
        let rt = room_type(&svc, 5, 2, "100.00").await;

        let out = svc.execute(cmd(rt.id, 10, 13, 2, 3)).await.unwrap();

        assert_eq!(out.booking.status, Status::Pending);
        assert_eq!(out.booking.total_price.to_string(), "600.00");
        assert_eq!(out.nights, 3);
        assert_eq!(out.rooms_left, 3);
        assert_eq!(out.payment.status, payment::Status::Pending);
        assert_eq!(out.payment.amount, out.booking.total_price);
        assert_eq!(out.payment.method, payment::Method::Paypal);

        let stored = svc
            .database()
            .execute(Select(By::<Option<Booking>, _>::new(out.booking.id)))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status, Status::Pending);
        let payment = svc
            .database()
            .execute(Select(By::<Option<Payment>, _>::new(out.booking.id)))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(payment.transaction_id, out.payment.transaction_id);
    }

    #[tokio::test]
    async fn notifies_guest_once_committed() {
        let (mailer, sent) = mailer::spec::mailer(true);
        let svc = service_with(mailer);
        let rt = room_type(&svc, 5, 2, "100.00").await;

        let out = svc.execute(cmd(rt.id, 10, 13, 1, 2)).await.unwrap();
        let messages = sent.messages().await;
        assert_eq!(messages.len(), 1);
        let (envelope, _) = &messages[0];
        let to = envelope.to().iter().map(ToString::to_string);
        assert_eq!(to.collect::<Vec<_>>(), ["client2@test.com"]);
        assert_eq!(out.booking.contact_email, Email::new("client2@test.com"));

        _ = svc.execute(cmd(rt.id, 10, 13, 9, 2)).await.unwrap_err();
        assert_eq!(sent.messages().await.len(), 1, "rejected booking");
    }

    #[tokio::test]
    async fn books_despite_failed_notification() {
        let (mailer, _) = mailer::spec::mailer(false);
        let svc = service_with(mailer);
        let rt = room_type(&svc, 5, 2, "100.00").await;

        let out = svc.execute(cmd(rt.id, 10, 13, 1, 2)).await.unwrap();

        assert_eq!(out.booking.status, Status::Pending);
    }

    #[tokio::test]
    async fn prevents_overbooking() {
        let svc = service();
        let rt = room_type(&svc, 5, 2, "100.00").await;

        let first = svc.execute(cmd(rt.id, 11, 14, 2, 2)).await.unwrap();
        assert_eq!(first.rooms_left, 3);

        let second = svc.execute(cmd(rt.id, 10, 13, 3, 2)).await.unwrap();
        assert_eq!(second.rooms_left, 0);

        let err = svc.execute(cmd(rt.id, 12, 15, 1, 1)).await.unwrap_err();
        assert!(matches!(
            err.as_ref(),
            ExecutionError::Engine(engine::Error::Unavailable(_)),
        ));

        // Checking out frees the rooms for the next check-in.
        let _ = svc.execute(cmd(rt.id, 14, 16, 3, 3)).await.unwrap();
    }

    #[tokio::test]
    async fn prevents_concurrent_overbooking() {
        let svc = service();
        let rt = room_type(&svc, 3, 2, "100.00").await;

        let results = futures::future::join_all(
            (0..6).map(|_| svc.execute(cmd(rt.id, 20, 22, 1, 1))),
        )
        .await;

        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 3);
    }

    #[tokio::test]
    async fn rejects_too_many_guests() {
        let svc = service();
        let rt = room_type(&svc, 5, 2, "100.00").await;

        let err = svc.execute(cmd(rt.id, 10, 12, 1, 3)).await.unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::Engine(engine::Error::Unavailable(_)),
        ));
    }

    #[tokio::test]
    async fn rejects_invalid_stay() {
        let svc = service();
        let rt = room_type(&svc, 5, 2, "100.00").await;

        let err = svc.execute(cmd(rt.id, 10, 10, 1, 1)).await.unwrap_err();
        assert!(matches!(
            err.as_ref(),
            ExecutionError::Engine(engine::Error::InvalidRange(_)),
        ));

        let err = svc.execute(cmd(rt.id, -1, 2, 1, 1)).await.unwrap_err();
        assert!(matches!(err.as_ref(), ExecutionError::CheckInInPast(d)
            if *d < Date::today()));
    }

    #[tokio::test]
    async fn rejects_unknown_room_type() {
        let svc = service();

        let id = room_type::Id::new();
        let err = svc.execute(cmd(id, 10, 12, 1, 1)).await.unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::RoomTypeNotExists(i) if *i == id,
        ));
    }
}
