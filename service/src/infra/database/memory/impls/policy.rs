//! [`Policy`]-related [`Database`] implementations.

use common::operations::{By, Insert, Select};
use tracerr::Traced;

use crate::{
    domain::{hotel, Policy},
    infra::{
        database::{self, memory::Connection, Memory},
        Database,
    },
};

impl<C> Database<Select<By<Option<Policy>, hotel::Id>>> for Memory<C>
where
    C: Connection,
{
    type Ok = Option<Policy>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Policy>, hotel::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let hotel_id = by.into_inner();
        self.read(|t| t.policies.get(&hotel_id).cloned())
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Insert<Policy>> for Memory<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(policy): Insert<Policy>,
    ) -> Result<Self::Ok, Self::Err> {
        self.write(|t| drop(t.policies.insert(policy.hotel_id, policy)))
            .await
            .map_err(tracerr::wrap!())
    }
}
