//! [`Payment`]-related [`Database`] implementations.

use common::operations::{By, Insert, Select, Update};
use tracerr::Traced;

use crate::{
    domain::{booking, Payment},
    infra::{
        database::{self, memory::Connection, Memory},
        Database,
    },
};

impl<C> Database<Select<By<Option<Payment>, booking::Id>>> for Memory<C>
where
    C: Connection,
{
    type Ok = Option<Payment>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Payment>, booking::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let booking_id = by.into_inner();
        self.read(|t| t.payments.get(&booking_id).cloned())
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Insert<Payment>> for Memory<C>
where
    C: Connection,
    Self: Database<Update<Payment>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(payment): Insert<Payment>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(payment)).await.map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Payment>> for Memory<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(payment): Update<Payment>,
    ) -> Result<Self::Ok, Self::Err> {
        self.write(|t| drop(t.payments.insert(payment.booking_id, payment)))
            .await
            .map_err(tracerr::wrap!())
    }
}
