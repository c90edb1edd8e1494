//! [`Command`] for paying a [`Booking`].

use common::operations::{
    By, Commit, Lock, Select, Transact, Transacted, Update,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{booking, payment, user, Booking, Payment},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for paying a [`Booking`].
///
/// Payment is simulated: the [`Payment`] always succeeds and confirms the
/// [`Booking`].
#[derive(Clone, Copy, Debug)]
pub struct ProcessPayment {
    /// ID of the [`Booking`] to pay.
    pub booking_id: booking::Id,

    /// ID of the [`User`] paying the [`Booking`].
    ///
    /// [`User`]: crate::domain::User
    pub user_id: user::Id,
}

/// Output of [`ProcessPayment`] [`Command`].
#[derive(Clone, Debug)]
pub struct Output {
    /// Confirmed [`Booking`].
    pub booking: Booking,

    /// Completed [`Payment`].
    pub payment: Payment,
}

impl<Db> Command<ProcessPayment> for Service<Db>
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
            Select<By<Option<Payment>, booking::Id>>,
            Ok = Option<Payment>,
            Err = Traced<database::Error>,
        > + Database<Update<Booking>, Err = Traced<database::Error>>
        + Database<Update<Payment>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Output;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: ProcessPayment,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let ProcessPayment {
            booking_id,
            user_id,
        } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid paying the same `Booking` twice.
        tx.execute(Lock(By::<Booking, _>::new(booking_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let mut booking = tx
            .execute(Select(By::<Option<Booking>, _>::new(booking_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            // Other `User`s' `Booking`s are not disclosed.
            .filter(|b| b.user_id == user_id)
            .ok_or(E::BookingNotExists(booking_id))
            .map_err(tracerr::wrap!())?;
        let mut payment = tx
            .execute(Select(By::<Option<Payment>, _>::new(booking_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::PaymentNotExists(booking_id))
            .map_err(tracerr::wrap!())?;

        booking
            .transition(booking::Status::Confirmed)
            .map_err(tracerr::from_and_wrap!(=> E))?;
        payment.complete().map_err(tracerr::from_and_wrap!(=> E))?;

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

        Ok(Output { booking, payment })
    }
}

/// Error of [`ProcessPayment`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Booking`] with the provided ID does not exist.
    #[display("`Booking(id: {_0})` does not exist")]
    BookingNotExists(#[error(not(source))] booking::Id),

    /// [`Booking`] is not awaiting a [`Payment`].
    #[display("{_0}")]
    #[from]
    BookingTransition(booking::TransitionError),

    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Payment`] of the [`Booking`] does not exist.
    #[display("`Payment` of `Booking(id: {_0})` does not exist")]
    PaymentNotExists(#[error(not(source))] booking::Id),

    /// [`Payment`] cannot be completed.
    #[display("{_0}")]
    #[from]
    PaymentTransition(payment::TransitionError),
}
