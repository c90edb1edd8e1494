//! Operations executed by a [`Handler`].

use std::marker::PhantomData;

use crate::Handler;

/// Operation to insert a new value.
#[derive(Clone, Copy, Debug)]
pub struct Insert<T>(pub T);

/// Operation to overwrite an existing value.
#[derive(Clone, Copy, Debug)]
pub struct Update<T>(pub T);

/// Operation to read a value.
#[derive(Clone, Copy, Debug)]
pub struct Select<T>(pub T);

/// Operation to hold a value exclusively until the end of a transaction.
#[derive(Clone, Copy, Debug)]
pub struct Lock<T>(pub T);

/// Operation to start a long-running value (a background task, for example).
#[derive(Clone, Copy, Debug)]
pub struct Start<T>(pub T);

/// Operation to perform a single run of a value.
#[derive(Clone, Copy, Debug)]
pub struct Perform<T>(pub T);

/// Operation to deliver a value to its recipient (an email, for example).
#[derive(Clone, Copy, Debug)]
pub struct Notify<T>(pub T);

/// Operation to open a transaction.
#[derive(Clone, Copy, Debug)]
pub struct Transact;

/// Handler returned by the [`Transact`] operation.
pub type Transacted<T> = <T as Handler<Transact>>::Ok;

/// Operation to commit a transaction.
#[derive(Clone, Copy, Debug)]
pub struct Commit;

/// Selector of a `W`hat by a `B`y value.
#[derive(Clone, Copy, Debug)]
pub struct By<W, B> {
    /// Type of the selected value.
    _what: PhantomData<W>,

    /// Value to select by.
    by: B,
}

impl<W, B> By<W, B> {
    /// Creates a new [`By`] selector.
    #[must_use]
    pub fn new(by: B) -> Self {
        Self {
            _what: PhantomData,
            by,
        }
    }

    /// Consumes this [`By`] and returns the value it selects by.
    #[must_use]
    pub fn into_inner(self) -> B {
        self.by
    }
}
