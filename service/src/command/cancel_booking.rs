//! [`Command`] for cancelling a [`Booking`].

use common::{
    operations::{By, Commit, Lock, Select, Transact, Transacted, Update},
    Date,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{
        booking::{self, CancellationReason},
        engine::{self, Refund},
        hotel, notification, payment, room_type, user, Booking, Hotel,
        Notification, Payment, Policy, RoomType,
    },
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for cancelling a [`Booking`] under the cancellation [`Policy`]
/// of its [`Hotel`].
///
/// [`Hotel`]: crate::domain::Hotel
#[derive(Clone, Debug)]
pub struct CancelBooking {
    /// ID of the [`Booking`] to cancel.
    pub booking_id: booking::Id,

    /// ID of the [`User`] cancelling the [`Booking`].
    ///
    /// [`User`]: crate::domain::User
    pub user_id: user::Id,

    /// [`CancellationReason`], if any.
    pub reason: Option<CancellationReason>,

    /// [`Date`] the cancellation happens on.
    pub as_of: Date,
}

/// Output of [`CancelBooking`] [`Command`].
#[derive(Clone, Debug)]
pub struct Output {
    /// Cancelled [`Booking`].
    pub booking: Booking,

    /// Closed [`Payment`] of the cancelled [`Booking`].
    pub payment: Payment,

    /// [`Refund`] of the cancellation.
    pub refund: Refund,
}

impl<Db> Command<CancelBooking> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Lock<By<Booking, booking::Id>>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Booking>, booking::Id>>,
            Ok = Option<Booking>,
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
            Select<By<Option<Policy>, hotel::Id>>,
            Ok = Option<Policy>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Payment>, booking::Id>>,
            Ok = Option<Payment>,
            Err = Traced<database::Error>,
        > + Database<Update<Booking>, Err = Traced<database::Error>>
        + Database<Update<Payment>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Output;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CancelBooking) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CancelBooking {
            booking_id,
            user_id,
            reason,
            as_of,
        } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent payment or cancellation.
        tx.execute(Lock(By::<Booking, _>::new(booking_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let mut booking = tx
            .execute(Select(By::<Option<Booking>, _>::new(booking_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .filter(|b| b.user_id == user_id)
            .ok_or(E::BookingNotExists(booking_id))
            .map_err(tracerr::wrap!())?;
        let room_type = tx
            .execute(Select(By::<Option<RoomType>, _>::new(
                booking.room_type_id,
            )))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::RoomTypeNotExists(booking.room_type_id))
            .map_err(tracerr::wrap!())?;
        let hotel = tx
            .execute(Select(By::<Option<Hotel>, _>::new(room_type.hotel_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::HotelNotExists(room_type.hotel_id))
            .map_err(tracerr::wrap!())?;
        let policy = tx
            .execute(Select(By::<Option<Policy>, _>::new(room_type.hotel_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .unwrap_or_else(|| Policy::empty(room_type.hotel_id));
        let mut payment = tx
            .execute(Select(By::<Option<Payment>, _>::new(booking_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::PaymentNotExists(booking_id))
            .map_err(tracerr::wrap!())?;

        let refund = engine::compute_refund(&booking, &policy, as_of)
            .map_err(tracerr::from_and_wrap!(=> E))?;

        booking
            .transition(booking::Status::Cancelled)
            .map_err(tracerr::from_and_wrap!(=> E))?;
        booking.cancellation_reason = reason;
        _ = payment.close().map_err(tracerr::from_and_wrap!(=> E))?;

        tx.execute(Update(booking.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Update(payment.clone()))
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
            event: notification::Event::Cancelled {
                penalty: refund.tier.penalty,
                refund: refund.amount,
            },
        })
        .await;

        Ok(Output {
            booking,
            payment,
            refund,
        })
    }
}

/// Error of [`CancelBooking`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Booking`] with the provided ID does not exist.
    #[display("`Booking(id: {_0})` does not exist")]
    BookingNotExists(#[error(not(source))] booking::Id),

    /// [`Booking`] cannot be cancelled.
    #[display("{_0}")]
    #[from]
    BookingTransition(booking::TransitionError),

    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// Cancellation is refused.
    #[display("{_0}")]
    #[from]
    Engine(engine::Error),

    /// [`Hotel`] of the [`Booking`] does not exist.
    #[display("`Hotel(id: {_0})` does not exist")]
    HotelNotExists(#[error(not(source))] hotel::Id),

    /// [`Payment`] of the [`Booking`] does not exist.
    #[display("`Payment` of `Booking(id: {_0})` does not exist")]
    PaymentNotExists(#[error(not(source))] booking::Id),

    /// [`Payment`] is already closed.
    #[display("{_0}")]
    #[from]
    PaymentTransition(payment::TransitionError),

    /// [`RoomType`] of the [`Booking`] does not exist.
    #[display("`RoomType(id: {_0})` does not exist")]
    RoomTypeNotExists(#[error(not(source))] room_type::Id),
}
