//! [`Hotel`]-related [`Database`] implementations.

use common::operations::{By, Insert, Select};
use tracerr::Traced;

use crate::{
    domain::{hotel, Hotel},
    infra::{
        database::{self, memory::Connection, Memory},
        Database,
    },
    read::hotel::Filter,
};

impl<C> Database<Select<By<Option<Hotel>, hotel::Id>>> for Memory<C>
where
    C: Connection,
{
    type Ok = Option<Hotel>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Hotel>, hotel::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        self.read(|t| t.hotels.get(&id).cloned())
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Select<By<Vec<Hotel>, Filter>>> for Memory<C>
where
    C: Connection,
{
    type Ok = Vec<Hotel>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Hotel>, Filter>>,
    ) -> Result<Self::Ok, Self::Err> {
        let filter = by.into_inner();
        let mut hotels = self
            .read(|t| {
                t.hotels
                    .values()
                    .filter(|h| filter.admits(h))
                    .cloned()
                    .collect::<Vec<_>>()
            })
            .await
            .map_err(tracerr::wrap!())?;
        hotels.sort_by(|a, b| filter.ordering.compare(a, b));
        Ok(hotels)
    }
}

impl<C> Database<Insert<Hotel>> for Memory<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(hotel): Insert<Hotel>,
    ) -> Result<Self::Ok, Self::Err> {
        self.write(|t| drop(t.hotels.insert(hotel.id, hotel)))
            .await
            .map_err(tracerr::wrap!())
    }
}
