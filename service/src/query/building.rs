//! [`Query`] collection related to a single [`Building`].

use std::collections::HashMap;

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    domain::{building, Building},
    infra::{database, Database},
    read, Query, Service,
};

use super::DatabaseQuery;

/// Queries a [`Building`] by its [`building::Id`].
pub type ById = DatabaseQuery<By<Option<Building>, building::Id>>;

/// [`Query`] of a [`Building`] along with its [`read::building::Stats`] by
/// its [`building::Id`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Enriched(pub building::Id);

impl<Db> Query<Enriched> for Service<Db>
where
    Db: Database<
            Select<By<Option<Building>, building::Id>>,
            Ok = Option<Building>,
            Err = Traced<database::Error>,
        > + Database<
            Select<
                By<
                    HashMap<building::Id, read::building::Stats>,
                    [building::Id; 1],
                >,
            >,
            Ok = HashMap<building::Id, read::building::Stats>,
            Err = Traced<database::Error>,
        >,
{
    type Ok = Option<read::building::Enriched>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Enriched(id): Enriched,
    ) -> Result<Self::Ok, Self::Err> {
        let Some(building) = self
            .database()
            .execute(Select(By::<Option<Building>, _>::new(id)))
            .await
            .map_err(tracerr::wrap!())?
        else {
            return Ok(None);
        };

        let stats = self
            .database()
            .execute(Select(
                By::<HashMap<_, read::building::Stats>, _>::new([building
                    .id
                    .clone()]),
            ))
            .await
            .map_err(tracerr::wrap!())?
            .remove(&building.id)
            .unwrap_or_default();

        Ok(Some(read::building::Enriched { building, stats }))
    }
}
