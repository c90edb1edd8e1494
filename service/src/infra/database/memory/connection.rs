//! [`Connection`] definitions.

use std::future::Future;

use tracerr::Traced;

use crate::infra::database;

use super::Tables;

/// Generic connection to the [`Tables`] of an in-memory database.
pub trait Connection {
    /// Runs the provided function over the current state of [`Tables`].
    ///
    /// # Errors
    ///
    /// If the [`Tables`] are not accessible anymore.
    fn read<F, T>(
        &self,
        f: F,
    ) -> impl Future<Output = Result<T, Traced<database::Error>>>
    where
        F: FnOnce(&Tables) -> T;

    /// Runs the provided function modifying [`Tables`].
    ///
    /// # Errors
    ///
    /// If the [`Tables`] are not accessible anymore.
    fn write<F, T>(
        &self,
        f: F,
    ) -> impl Future<Output = Result<T, Traced<database::Error>>>
    where
        F: FnOnce(&mut Tables) -> T;
}
