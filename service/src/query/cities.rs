//! [`Query`] collection related to the multiple [`City`]s.

use std::collections::HashMap;

use common::operations::{By, Select};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::Building;
use crate::{
    domain::{city, City},
    infra::{database, Database},
    read::{self, city::list::Selector},
    Query, Service,
};

use super::DatabaseQuery;

/// Queries a list of [`City`]s, propagating any failure.
pub type List = DatabaseQuery<By<Vec<City>, Selector>>;

/// [`Query`] of [`City`]s along with their [`read::city::Stats`].
///
/// [`City`]s without any [`Building`] have zero [`read::city::Stats`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Enriched(pub Selector);

impl Enriched {
    /// [`Enriched`] [`City`]s with an `active` status, oldest first.
    pub const ACTIVE: Self = Self(Selector::Active);
}

impl<Db> Query<Enriched> for Service<Db>
where
    Db: Database<
            Select<By<Vec<City>, Selector>>,
            Ok = Vec<City>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<HashMap<city::Id, read::city::Stats>, Vec<city::Id>>>,
            Ok = HashMap<city::Id, read::city::Stats>,
            Err = Traced<database::Error>,
        >,
{
    type Ok = Vec<read::city::Enriched>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Enriched(selector): Enriched,
    ) -> Result<Self::Ok, Self::Err> {
        let cities = self
            .database()
            .execute(Select(By::<Vec<City>, _>::new(selector)))
            .await
            .map_err(tracerr::wrap!())?;
        if cities.is_empty() {
            return Ok(vec![]);
        }

        let ids = cities.iter().map(|c| c.id.clone()).collect::<Vec<_>>();
        let mut stats = self
            .database()
            .execute(Select(By::<HashMap<_, read::city::Stats>, _>::new(ids)))
            .await
            .map_err(tracerr::wrap!())?;

        Ok(cities
            .into_iter()
            .map(|city| read::city::Enriched {
                stats: stats.remove(&city.id).unwrap_or_default(),
                city,
            })
            .collect())
    }
}

#[cfg(all(test, feature = "postgres"))]
mod spec {
    use std::sync::atomic::Ordering;

    use crate::{
        fake::{self, FakeDb},
        query::Degraded,
        read, Query as _,
    };

    use super::Enriched;

    #[tokio::test]
    async fn enriches_cities_with_stats() {
        let db = FakeDb::default();
        let cairo = fake::city("New Cairo");
        let zayed = fake::city("Sheikh Zayed");
        let stats = read::city::Stats {
            total_buildings: 2,
            total_units: 30,
            available_units: 12,
        };
        _ = db.city_stats.lock().unwrap().insert(cairo.id.clone(), stats);
        db.cities.lock().unwrap().extend([cairo, zayed]);

        let cities = fake::service(db).execute(Enriched::ACTIVE).await.unwrap();

        assert_eq!(cities.len(), 2);
        assert_eq!(cities[0].city.id.to_string(), "new-cairo");
        assert_eq!(cities[0].stats, stats);
        assert_eq!(cities[1].city.id.to_string(), "sheikh-zayed");
        assert_eq!(cities[1].stats, read::city::Stats::default());
    }

    #[tokio::test]
    async fn degrades_to_empty_list() {
        let db = FakeDb::default();
        db.cities.lock().unwrap().push(fake::city("New Cairo"));
        db.broken.store(true, Ordering::SeqCst);
        let service = fake::service(db);

        assert!(service.execute(Enriched::ACTIVE).await.is_err());
        assert!(service
            .execute(Degraded(Enriched::ACTIVE))
            .await
            .unwrap()
            .is_empty());
    }
}
