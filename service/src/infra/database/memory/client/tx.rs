//! [`Tx`] client definitions.

use std::sync::Arc;

use tokio::sync::{Mutex, OwnedRwLockWriteGuard};
use tracerr::Traced;

use crate::infra::database::{
    self,
    memory::{self, Connection, Tables},
};

use super::NonTx;

/// Transactional in-memory database client.
///
/// Holds the shared [`Tables`] exclusively until committed or dropped, so
/// transactions are serialized. Writes are staged on a copy of the
/// [`Tables`] and become visible on [`Tx::commit()`] only: dropping a [`Tx`]
/// without committing discards them.
#[derive(Clone, Debug)]
pub struct Tx {
    /// Inner state of this client, [`None`] once committed.
    inner: Arc<Mutex<Option<Staged>>>,
}

/// Uncommitted state of a [`Tx`].
#[derive(Debug)]
struct Staged {
    /// Exclusive guard of the shared [`Tables`].
    guard: OwnedRwLockWriteGuard<Tables>,

    /// Copy of the [`Tables`] the writes are applied to.
    tables: Tables,
}

impl Tx {
    /// Starts a new [`Tx`] over the [`Tables`] of the provided [`NonTx`]
    /// client.
    pub async fn from_non_tx(client: &NonTx) -> Self {
        let guard = client.lock_owned().await;
        let tables = guard.clone();
        Self {
            inner: Arc::new(Mutex::new(Some(Staged { guard, tables }))),
        }
    }

    /// Commits this [`Tx`], publishing its writes.
    ///
    /// # Errors
    ///
    /// If this [`Tx`] is already committed.
    pub async fn commit(&self) -> Result<(), Traced<database::Error>> {
        let Staged { mut guard, tables } =
            self.inner.lock().await.take().ok_or_else(finished)?;
        *guard = tables;
        Ok(())
    }
}

impl Connection for Tx {
    async fn read<F, T>(&self, f: F) -> Result<T, Traced<database::Error>>
    where
        F: FnOnce(&Tables) -> T,
    {
        let inner = self.inner.lock().await;
        let staged = inner.as_ref().ok_or_else(finished)?;
        Ok(f(&staged.tables))
    }

    async fn write<F, T>(&self, f: F) -> Result<T, Traced<database::Error>>
    where
        F: FnOnce(&mut Tables) -> T,
    {
        let mut inner = self.inner.lock().await;
        let staged = inner.as_mut().ok_or_else(finished)?;
        Ok(f(&mut staged.tables))
    }
}

/// Returns the error of using an already committed [`Tx`].
fn finished() -> Traced<database::Error> {
    tracerr::new!(database::Error::Memory(memory::Error::TxFinished))
}
