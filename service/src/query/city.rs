//! [`Query`] collection related to a single [`City`].

use std::collections::HashMap;

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    domain::{city, City},
    infra::{database, Database},
    read, Query, Service,
};

use super::DatabaseQuery;

/// Queries a [`City`] by its [`city::Id`].
pub type ById = DatabaseQuery<By<Option<City>, city::Id>>;

/// [`Query`] of a [`City`] along with its [`read::city::Stats`] by its
/// [`city::Id`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Enriched(pub city::Id);

impl<Db> Query<Enriched> for Service<Db>
where
    Db: Database<
            Select<By<Option<City>, city::Id>>,
            Ok = Option<City>,
            Err = Traced<database::Error>,
        > + Database<
            Select<
                By<HashMap<city::Id, read::city::Stats>, [city::Id; 1]>,
            >,
            Ok = HashMap<city::Id, read::city::Stats>,
            Err = Traced<database::Error>,
        >,
{
    type Ok = Option<read::city::Enriched>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Enriched(id): Enriched,
    ) -> Result<Self::Ok, Self::Err> {
        let Some(city) = self
            .database()
            .execute(Select(By::<Option<City>, _>::new(id)))
            .await
            .map_err(tracerr::wrap!())?
        else {
            return Ok(None);
        };

        let stats = self
            .database()
            .execute(Select(By::<HashMap<_, read::city::Stats>, _>::new([
                city.id.clone(),
            ])))
            .await
            .map_err(tracerr::wrap!())?
            .remove(&city.id)
            .unwrap_or_default();

        Ok(Some(read::city::Enriched { city, stats }))
    }
}

#[cfg(all(test, feature = "postgres"))]
mod spec {
    use std::sync::atomic::Ordering;

    use crate::{
        domain::city,
        fake::{self, FakeDb},
        query::Degraded,
        read, Query as _,
    };

    use super::Enriched;

    #[tokio::test]
    async fn missing_stats_are_zero() {
        let db = FakeDb::default();
        db.cities.lock().unwrap().push(fake::city("North Coast"));
        let service = fake::service(db);

        let city = service
            .execute(Enriched(city::Id::new("north-coast").unwrap()))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(city.stats, read::city::Stats::default());

        assert!(service
            .execute(Enriched(city::Id::new("unknown").unwrap()))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn degrades_to_none() {
        let db = FakeDb::default();
        db.cities.lock().unwrap().push(fake::city("North Coast"));
        db.broken.store(true, Ordering::SeqCst);

        let city = fake::service(db)
            .execute(Degraded(Enriched(city::Id::new("north-coast").unwrap())))
            .await
            .unwrap();
        assert!(city.is_none());
    }
}
