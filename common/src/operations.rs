//! Operation markers a [`Handler`] is implemented for.
//!
//! Each marker wraps the operation's argument, so a single database type may
//! implement [`Handler`] for `Select<By<Vec<Unit>, Filter>>` and
//! `Insert<Unit>` at the same time.
//!
//! [`Handler`]: crate::Handler

use std::marker::PhantomData;

/// Inserts a new value.
#[derive(Clone, Copy, Debug)]
pub struct Insert<T>(pub T);

/// Overwrites an existing value.
#[derive(Clone, Copy, Debug)]
pub struct Update<T>(pub T);

/// Deletes a value, or the values matched by a [`By`] selector.
#[derive(Clone, Copy, Debug)]
pub struct Delete<T>(pub T);

/// Reads values matched by a [`By`] selector.
#[derive(Clone, Copy, Debug)]
pub struct Select<T>(pub T);

/// Starts a long-running value, like a periodic background task.
#[derive(Clone, Copy, Debug)]
pub struct Start<T>(pub T);

/// Performs a single run of a value.
#[derive(Clone, Copy, Debug)]
pub struct Perform<T>(pub T);

/// Selector of a `W`hat by the provided `B` argument.
///
/// `W` only disambiguates the output, so `By<Option<City>, city::Id>` and
/// `By<Vec<Unit>, city::Id>` select different things by the same argument.
#[derive(Clone, Copy, Debug)]
pub struct By<W, B> {
    /// Type of the selected value.
    _what: PhantomData<W>,

    /// Argument to select by.
    by: B,
}

impl<W, B> By<W, B> {
    /// Wraps the provided argument into a [`By`] selector.
    #[must_use]
    pub const fn new(by: B) -> Self {
        Self {
            _what: PhantomData,
            by,
        }
    }

    /// Unwraps the argument of this [`By`] selector.
    #[must_use]
    pub fn into_inner(self) -> B {
        self.by
    }
}
