//! [`CompleteFinishedBookings`] [`Task`].

use std::{convert::Infallible, error::Error, time};

use common::{
    operations::{
        By, Commit, Perform, Select, Start, Transact, Transacted, Update,
    },
    Date,
};
use derive_more::{Display, Error as StdError, From};
use smart_default::SmartDefault;
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{booking, Booking},
    infra::{database, Database},
    read::booking::Finished,
    Service,
};

use super::Task;

/// Configuration for [`CompleteFinishedBookings`] [`Task`].
#[derive(Clone, Copy, Debug, SmartDefault)]
pub struct Config {
    /// Interval between checks for finished [`Booking`]s.
    #[default(time::Duration::from_secs(60 * 60))]
    pub interval: time::Duration,
}

/// [`Task`] moving [`booking::Status::Confirmed`] [`Booking`]s into
/// [`booking::Status::Completed`] once their guests checked out.
#[derive(Clone, Copy, Debug)]
pub struct CompleteFinishedBookings<S> {
    /// [`Config`] of this [`Task`].
    config: Config,

    /// [`Service`] instance.
    service: S,
}

impl<Db> Task<Start<By<CompleteFinishedBookings<Self>, Config>>>
    for Service<Db>
where
    CompleteFinishedBookings<Service<Db>>:
        Task<Perform<Date>, Ok = usize, Err: Error> + 'static,
    Self: Clone,
{
    type Ok = ();
    type Err = Infallible;

    async fn execute(
        &self,
        Start(by): Start<By<CompleteFinishedBookings<Self>, Config>>,
    ) -> Result<Self::Ok, Self::Err> {
        let config = by.into_inner();
        let task = CompleteFinishedBookings {
            config,
            service: self.clone(),
        };

        let mut interval = tokio::time::interval(task.config.interval);
        loop {
            let _ = interval.tick().await;
            match task.execute(Perform(Date::today())).await {
                Ok(0) => {}
                Ok(n) => log::info!(
                    "`task::CompleteFinishedBookings` completed {n} bookings",
                ),
                Err(e) => log::error!(
                    "`task::CompleteFinishedBookings` failed: {e}",
                ),
            }
        }
    }
}

impl<Db> Task<Perform<Date>> for CompleteFinishedBookings<Service<Db>>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Vec<Booking>, Finished>>,
            Ok = Vec<Booking>,
            Err = Traced<database::Error>,
        > + Database<Update<Booking>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = usize;
    type Err = Traced<ExecutionError>;

    /// Completes the [`Booking`]s checked out on or before the provided
    /// [`Date`], returning their number.
    async fn execute(
        &self,
        Perform(today): Perform<Date>,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let tx = self
            .service
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let finished = tx
            .execute(Select(By::new(Finished(today))))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        let count = finished.len();

        for mut booking in finished {
            booking
                .transition(booking::Status::Completed)
                .map_err(tracerr::from_and_wrap!(=> E))?;
            tx.execute(Update(booking))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))
                .map(drop)?;
        }

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(count)
    }
}

/// Error of [`CompleteFinishedBookings`] execution.
#[derive(Debug, Display, From, StdError)]
pub enum ExecutionError {
    /// [`Booking`] cannot be completed.
    #[display("{_0}")]
    BookingTransition(booking::TransitionError),

    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use common::{
        operations::{By, Perform, Select, Update},
        Handler as _,
    };

    use crate::{
        domain::{booking, Booking},
        spec::{book, days_from_today, room_type, service},
    };

    use super::{CompleteFinishedBookings, Config};

    #[tokio::test]
    async fn completes_checked_out_bookings() {
        let svc = service();
        let rt = room_type(&svc, 5, 2, "100.00").await;

        let mut bookings = Vec::new();
        for (from, to, status) in [
            (2, 4, booking::Status::Confirmed),
            (2, 5, booking::Status::Confirmed),
            (2, 4, booking::Status::Pending),
            (3, 8, booking::Status::Confirmed),
        ] {
            let mut b = book(&svc, &rt, from, to).await.booking;
            b.status = status;
            svc.database().execute(Update(b.clone())).await.unwrap();
            bookings.push(b);
        }

        let task = CompleteFinishedBookings {
            config: Config {
                interval: Duration::from_secs(60),
            },
            service: svc.clone(),
        };
        let completed =
            task.execute(Perform(days_from_today(5))).await.unwrap();
        assert_eq!(completed, 2);

        let mut statuses = Vec::new();
        for b in &bookings {
            statuses.push(
                svc.database()
                    .execute(Select(By::<Option<Booking>, _>::new(b.id)))
                    .await
                    .unwrap()
                    .unwrap()
                    .status,
            );
        }
        assert_eq!(
            statuses,
            [
                booking::Status::Completed,
                booking::Status::Completed,
                booking::Status::Pending,
                booking::Status::Confirmed,
            ],
        );

        let again = task.execute(Perform(days_from_today(5))).await.unwrap();
        assert_eq!(again, 0);
    }
}
