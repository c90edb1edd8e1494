//! Background environment for running [`Task`]s.

use std::{
    error::Error,
    future::{Future, IntoFuture},
    iter,
};

use derive_more::Display;
use futures::{
    future::{self, LocalBoxFuture},
    FutureExt as _, TryFutureExt as _,
};
use tokio::task;

#[cfg(doc)]
use crate::Task;

/// Background environment for running [`Task`]s.
///
/// [`Task`]s are spawned onto a [`task::LocalSet`], so they don't need to be
/// [`Send`]. The whole environment runs once awaited, and fails as soon as
/// any of its [`Task`]s fails.
#[derive(Debug, Default)]
pub struct Background {
    /// Local set of tasks.
    set: task::LocalSet,

    /// Handles of spawned tasks.
    handles: Vec<task::JoinHandle<Result<(), Failure>>>,
}

impl Background {
    /// Spawns a new [`Task`] named `name` inside this [`Background`]
    /// environment.
    pub fn spawn<F, E>(&mut self, name: &'static str, future: F)
    where
        F: Future<Output = Result<(), E>> + 'static,
        E: Error + 'static,
    {
        self.handles
            .push(self.set.spawn_local(future.map_err(move |e| Failure {
                task: name,
                cause: Box::new(e),
            })));
    }

    /// Returns the number of [`Task`]s spawned in this [`Background`]
    /// environment.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Checks whether no [`Task`] was spawned in this [`Background`]
    /// environment.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

impl IntoFuture for Background {
    type Output = Result<(), Failure>;
    type IntoFuture = LocalBoxFuture<'static, Self::Output>;

    fn into_future(self) -> Self::IntoFuture {
        let Self { set, handles } = self;
        future::try_join_all(iter::once(set.map(Ok).boxed_local()).chain(
            handles.into_iter().map(|h| {
                h.map(|r| match r {
                    Ok(res) => res,
                    Err(e) => Err(Failure {
                        task: "unknown",
                        cause: Box::new(e),
                    }),
                })
                .boxed_local()
            }),
        ))
        .map_ok(drop)
        .boxed_local()
    }
}

/// Failure of a [`Task`] running in a [`Background`] environment.
#[derive(Debug, Display)]
#[display("`{task}` task failed: {cause}")]
pub struct Failure {
    /// Name of the failed [`Task`].
    pub task: &'static str,

    /// Error the [`Task`] failed with.
    pub cause: Box<dyn Error + 'static>,
}

impl Error for Failure {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&*self.cause)
    }
}
