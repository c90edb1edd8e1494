//! [`Booking`]-related [`Database`] implementations.

use std::cmp::Reverse;

use common::operations::{By, Insert, Lock, Select, Update};
use tracerr::Traced;

use crate::{
    domain::{
        booking::{self, Status},
        user, Booking,
    },
    infra::{
        database::{
            self,
            memory::{Connection, Tx},
            Memory,
        },
        Database,
    },
    read::booking::{Finished, Overlapping},
};

impl<C> Database<Select<By<Option<Booking>, booking::Id>>> for Memory<C>
where
    C: Connection,
{
    type Ok = Option<Booking>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Booking>, booking::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        self.read(|t| t.bookings.get(&id).cloned())
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Select<By<Vec<Booking>, user::Id>>> for Memory<C>
where
    C: Connection,
{
    type Ok = Vec<Booking>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Booking>, user::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let user_id = by.into_inner();
        let mut bookings = self
            .read(|t| {
                t.bookings
                    .values()
                    .filter(|b| b.user_id == user_id)
                    .cloned()
                    .collect::<Vec<_>>()
            })
            .await
            .map_err(tracerr::wrap!())?;
        bookings.sort_by_key(|b| Reverse((b.created_at, b.id)));
        Ok(bookings)
    }
}

impl<C> Database<Select<By<Vec<Booking>, Overlapping>>> for Memory<C>
where
    C: Connection,
{
    type Ok = Vec<Booking>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Booking>, Overlapping>>,
    ) -> Result<Self::Ok, Self::Err> {
        let Overlapping { room_type_id, stay } = by.into_inner();
        self.read(|t| {
            t.bookings
                .values()
                .filter(|b| b.holds(room_type_id, stay))
                .cloned()
                .collect()
        })
        .await
        .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Select<By<Vec<Booking>, Finished>>> for Memory<C>
where
    C: Connection,
{
    type Ok = Vec<Booking>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Booking>, Finished>>,
    ) -> Result<Self::Ok, Self::Err> {
        let Finished(today) = by.into_inner();
        self.read(|t| {
            t.bookings
                .values()
                .filter(|b| {
                    b.status == Status::Confirmed && b.stay.check_out <= today
                })
                .cloned()
                .collect()
        })
        .await
        .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Insert<Booking>> for Memory<C>
where
    C: Connection,
    Self: Database<Update<Booking>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(booking): Insert<Booking>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(booking)).await.map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Booking>> for Memory<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(booking): Update<Booking>,
    ) -> Result<Self::Ok, Self::Err> {
        self.write(|t| drop(t.bookings.insert(booking.id, booking)))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl Database<Lock<By<Booking, booking::Id>>> for Memory<Tx> {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Lock<By<Booking, booking::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // `Tx` holds all the tables exclusively already.
        Ok(())
    }
}
