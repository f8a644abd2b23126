//! [`Query`] collection related to the multiple [`Building`]s.

use std::collections::HashMap;

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    domain::{building, Building},
    infra::{database, Database},
    read::{self, building::list::Selector},
    Query, Service,
};

use super::DatabaseQuery;

/// Queries a list of [`Building`]s, propagating any failure.
pub type List = DatabaseQuery<By<Vec<Building>, Selector>>;

/// [`Query`] of [`Building`]s along with their [`read::building::Stats`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Enriched(pub Selector);

impl<Db> Query<Enriched> for Service<Db>
where
    Db: Database<
            Select<By<Vec<Building>, Selector>>,
            Ok = Vec<Building>,
            Err = Traced<database::Error>,
        > + Database<
            Select<
                By<
                    HashMap<building::Id, read::building::Stats>,
                    Vec<building::Id>,
                >,
            >,
            Ok = HashMap<building::Id, read::building::Stats>,
            Err = Traced<database::Error>,
        >,
{
    type Ok = Vec<read::building::Enriched>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Enriched(selector): Enriched,
    ) -> Result<Self::Ok, Self::Err> {
        let buildings = self
            .database()
            .execute(Select(By::<Vec<Building>, _>::new(selector)))
            .await
            .map_err(tracerr::wrap!())?;
        if buildings.is_empty() {
            return Ok(vec![]);
        }

        let ids = buildings.iter().map(|b| b.id.clone()).collect::<Vec<_>>();
        let mut stats = self
            .database()
            .execute(Select(
                By::<HashMap<_, read::building::Stats>, _>::new(ids),
            ))
            .await
            .map_err(tracerr::wrap!())?;

        Ok(buildings
            .into_iter()
            .map(|building| read::building::Enriched {
                stats: stats.remove(&building.id).unwrap_or_default(),
                building,
            })
            .collect())
    }
}

#[cfg(all(test, feature = "postgres"))]
mod spec {
    use std::sync::atomic::Ordering;

    use crate::{
        domain::building::timeline::{self, Label},
        fake::{self, FakeDb},
        query::Degraded,
        read::{self, building::list::Selector},
        Query as _,
    };

    use super::{Enriched, List};

    #[tokio::test]
    async fn selects_buildings_of_city() {
        let db = FakeDb::default();
        let cairo = fake::city("New Cairo");
        let zayed = fake::city("Sheikh Zayed");
        db.buildings.lock().unwrap().extend([
            fake::building("Nile Tower", &cairo.id),
            fake::building("Palm Hills", &zayed.id),
        ]);

        let buildings = fake::service(db)
            .execute(Enriched(Selector::ByCity(cairo.id.clone())))
            .await
            .unwrap();

        assert_eq!(buildings.len(), 1);
        assert_eq!(buildings[0].building.city_id, cairo.id);
        assert_eq!(buildings[0].stats, read::building::Stats::default());
    }

    #[tokio::test]
    async fn selects_buildings_with_timeline() {
        let db = FakeDb::default();
        let cairo = fake::city("New Cairo");
        let mut tracked = fake::building("Nile Tower", &cairo.id);
        tracked.timeline = timeline::Timeline::new(vec![timeline::Phase::new(
            Label::new("Foundation").unwrap(),
            Label::empty(),
            timeline::Status::InProgress,
            1,
        )]);
        db.buildings
            .lock()
            .unwrap()
            .extend([tracked, fake::building("Palm Hills", &cairo.id)]);

        let buildings = fake::service(db)
            .execute(List::by(Selector::WithTimeline))
            .await
            .unwrap();

        assert_eq!(buildings.len(), 1);
        assert_eq!(buildings[0].timeline.progress(), 0);
    }

    #[tokio::test]
    async fn admin_list_propagates_failure() {
        let db = FakeDb::default();
        db.broken.store(true, Ordering::SeqCst);
        let service = fake::service(db);

        assert!(service.execute(List::by(Selector::All)).await.is_err());
        assert!(service
            .execute(Degraded(Enriched(Selector::All)))
            .await
            .unwrap()
            .is_empty());
    }
}
