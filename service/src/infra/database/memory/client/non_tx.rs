//! [`NonTx`] client definitions.

use std::sync::Arc;

use tokio::sync::{OwnedRwLockWriteGuard, RwLock};
use tracerr::Traced;

use crate::infra::database::{
    self,
    memory::{Connection, Tables},
};

/// Non-transactional in-memory database client.
///
/// Every operation locks the shared [`Tables`] only for its own duration.
#[derive(Clone, Debug, Default)]
pub struct NonTx {
    /// Shared [`Tables`].
    tables: Arc<RwLock<Tables>>,
}

impl NonTx {
    /// Locks the shared [`Tables`] exclusively, waiting for other
    /// transactions to finish.
    pub(crate) async fn lock_owned(&self) -> OwnedRwLockWriteGuard<Tables> {
        Arc::clone(&self.tables).write_owned().await
    }
}

impl Connection for NonTx {
    async fn read<F, T>(&self, f: F) -> Result<T, Traced<database::Error>>
    where
        F: FnOnce(&Tables) -> T,
    {
        Ok(f(&*self.tables.read().await))
    }

    async fn write<F, T>(&self, f: F) -> Result<T, Traced<database::Error>>
    where
        F: FnOnce(&mut Tables) -> T,
    {
        Ok(f(&mut *self.tables.write().await))
    }
}
