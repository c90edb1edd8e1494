//! In-memory [`Database`] implementation.

pub mod client;
pub mod connection;
mod impls;

use std::collections::HashMap;

use derive_more::{Deref, Display, Error as StdError};

use crate::domain::{
    booking, hotel, room_type, Booking, Hotel, Payment, Policy, RoomType,
};
#[cfg(doc)]
use crate::infra::Database;

pub use self::{
    client::{NonTx, Tx},
    connection::Connection,
};

/// In-memory [`Database`] client.
#[derive(Clone, Debug, Default, Deref)]
pub struct Memory<C = NonTx>(C);

impl Memory {
    /// Creates a new empty [`Memory`] database.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Tables stored by a [`Memory`] database.
#[derive(Clone, Debug, Default)]
pub struct Tables {
    /// [`Hotel`]s by their IDs.
    pub(crate) hotels: HashMap<hotel::Id, Hotel>,

    /// [`RoomType`]s by their IDs.
    pub(crate) room_types: HashMap<room_type::Id, RoomType>,

    /// [`Booking`]s by their IDs.
    pub(crate) bookings: HashMap<booking::Id, Booking>,

    /// [`Payment`]s by the IDs of their [`Booking`]s.
    pub(crate) payments: HashMap<booking::Id, Payment>,

    /// Cancellation [`Policy`]s by the IDs of their [`Hotel`]s.
    pub(crate) policies: HashMap<hotel::Id, Policy>,
}

/// [`Memory`] database error.
#[derive(Clone, Copy, Debug, Display, StdError)]
pub enum Error {
    /// [`Tx`] was used after being committed.
    #[display("transaction is already committed")]
    TxFinished,
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use common::{
        operations::{By, Commit, Insert, Select, Transact},
        Handler as _,
    };
    use tokio::time;

    use crate::{
        domain::{hotel, Policy},
        infra::database,
    };

    use super::{Error, Memory};

    async fn policy(db: &Memory, id: hotel::Id) -> Option<Policy> {
        db.execute(Select(By::<Option<Policy>, _>::new(id)))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn commit_publishes_writes() {
        let db = Memory::new();
        let id = hotel::Id::new();

        let tx = db.execute(Transact).await.unwrap();
        tx.execute(Insert(Policy::empty(id))).await.unwrap();
        assert!(tx
            .execute(Select(By::<Option<Policy>, _>::new(id)))
            .await
            .unwrap()
            .is_some());
        tx.execute(Commit).await.unwrap();
        drop(tx);

        assert!(policy(&db, id).await.is_some());
    }

    #[tokio::test]
    async fn drop_discards_writes() {
        let db = Memory::new();
        let id = hotel::Id::new();

        let tx = db.execute(Transact).await.unwrap();
        tx.execute(Insert(Policy::empty(id))).await.unwrap();
        drop(tx);

        assert!(policy(&db, id).await.is_none());
    }

    #[tokio::test]
    async fn rejects_use_after_commit() {
        let db = Memory::new();

        let tx = db.execute(Transact).await.unwrap();
        tx.execute(Commit).await.unwrap();

        let err = tx
            .execute(Insert(Policy::empty(hotel::Id::new())))
            .await
            .unwrap_err();
        assert!(matches!(
            err.as_ref(),
            database::Error::Memory(Error::TxFinished),
        ));
        assert!(tx.execute(Commit).await.is_err());
    }

    #[tokio::test]
    async fn serializes_transactions() {
        let db = Memory::new();

        let tx = db.execute(Transact).await.unwrap();
        assert!(time::timeout(Duration::from_millis(20), db.execute(Transact))
            .await
            .is_err());
        assert!(time::timeout(
            Duration::from_millis(20),
            policy(&db, hotel::Id::new()),
        )
        .await
        .is_err());

        drop(tx);
        assert!(time::timeout(Duration::from_millis(20), db.execute(Transact))
            .await
            .is_ok());
    }
}
