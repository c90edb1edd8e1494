//! [`RoomType`]-related [`Database`] implementations.

use common::operations::{By, Insert, Lock, Select};
use tracerr::Traced;

use crate::{
    domain::{hotel, room_type, RoomType},
    infra::{
        database::{
            self,
            memory::{Connection, Tx},
            Memory,
        },
        Database,
    },
    read::search::{Candidates, Filter},
};

impl<C> Database<Select<By<Option<RoomType>, room_type::Id>>> for Memory<C>
where
    C: Connection,
{
    type Ok = Option<RoomType>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<RoomType>, room_type::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        self.read(|t| t.room_types.get(&id).cloned())
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Select<By<Vec<RoomType>, hotel::Id>>> for Memory<C>
where
    C: Connection,
{
    type Ok = Vec<RoomType>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<RoomType>, hotel::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let hotel_id = by.into_inner();
        let mut room_types = self
            .read(|t| {
                t.room_types
                    .values()
                    .filter(|rt| rt.hotel_id == hotel_id)
                    .cloned()
                    .collect::<Vec<_>>()
            })
            .await
            .map_err(tracerr::wrap!())?;
        room_types.sort_by(|a, b| {
            a.price_per_night
                .cmp(&b.price_per_night)
                .then_with(|| {
                    AsRef::<str>::as_ref(&a.name)
                        .cmp(AsRef::<str>::as_ref(&b.name))
                })
        });
        Ok(room_types)
    }
}

impl<C> Database<Select<By<Candidates, Filter>>> for Memory<C>
where
    C: Connection,
{
    type Ok = Candidates;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Candidates, Filter>>,
    ) -> Result<Self::Ok, Self::Err> {
        let filter = by.into_inner();
        self.read(|t| {
            Candidates(
                t.room_types
                    .values()
                    .filter_map(|rt| {
                        let hotel = t.hotels.get(&rt.hotel_id)?;
                        filter
                            .admits(hotel, rt)
                            .then(|| (hotel.clone(), rt.clone()))
                    })
                    .collect(),
            )
        })
        .await
        .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Insert<RoomType>> for Memory<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(room_type): Insert<RoomType>,
    ) -> Result<Self::Ok, Self::Err> {
        self.write(|t| drop(t.room_types.insert(room_type.id, room_type)))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl Database<Lock<By<RoomType, room_type::Id>>> for Memory<Tx> {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Lock<By<RoomType, room_type::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // `Tx` holds all the tables exclusively already.
        Ok(())
    }
}
