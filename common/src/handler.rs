//! [`Handler`] abstractions.

use std::future::Future;

/// Asynchronous handler of `Args`, like a query, a command or a background
/// task of a service.
///
/// A single type may handle many different `Args`, each with its own result.
pub trait Handler<Args = ()> {
    /// Type of successful [`Handler`] result.
    type Ok;

    /// Type of this [`Handler`] error.
    type Err;

    /// Executes this [`Handler`] with the provided `args`.
    fn execute(
        &self,
        args: Args,
    ) -> impl Future<Output = Result<Self::Ok, Self::Err>>;
}
