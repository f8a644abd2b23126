//! [`Query`] definition.

pub mod building;
pub mod buildings;
pub mod cities;
pub mod city;
pub mod content;
pub mod inquiries;
pub mod timeline;
pub mod unit;
pub mod units;

use std::{convert::Infallible, fmt};

use common::operations::{By, Select};
use tracerr::Traced;
use tracing as log;

use crate::{
    infra::{database, Database},
    Service,
};

/// [`Query`] of the [`Service`].
pub use common::Handler as Query;

/// [`Query`] [`Select`]ing a `T`ype from a [`Database`].
#[derive(Clone, Copy, Debug)]
#[expect(clippy::module_name_repetitions, reason = "more readable")]
pub struct DatabaseQuery<T>(T);

impl<W, B> DatabaseQuery<By<W, B>> {
    /// Creates a new [`DatabaseQuery`] selecting a `W` by the provided `B`.
    #[must_use]
    pub fn by(by: B) -> Self {
        Self(By::new(by))
    }
}

impl<Db, W, B> Query<DatabaseQuery<By<W, B>>> for Service<Db>
where
    Db: Database<Select<By<W, B>>, Ok = W, Err = Traced<database::Error>>,
{
    type Ok = W;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        DatabaseQuery(by): DatabaseQuery<By<W, B>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.database()
            .execute(Select(by))
            .await
            .map_err(tracerr::wrap!())
    }
}

/// [`Query`] wrapping another one and degrading to its default output on
/// failure, so public pages render even when the [`Database`] is unavailable.
///
/// The failure is logged.
#[derive(Clone, Copy, Debug)]
pub struct Degraded<Q>(pub Q);

impl<Db, Q> Query<Degraded<Q>> for Service<Db>
where
    Self: Query<Q, Ok: Default, Err: fmt::Display>,
{
    type Ok = <Self as Query<Q>>::Ok;
    type Err = Infallible;

    async fn execute(
        &self,
        Degraded(query): Degraded<Q>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self.execute(query).await.unwrap_or_else(|e| {
            log::error!(
                "`{}` failed, degrading to default: {e}",
                std::any::type_name::<Q>(),
            );
            Default::default()
        }))
    }
}
