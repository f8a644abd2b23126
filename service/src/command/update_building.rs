//! [`Command`] for updating an existing [`Building`].

use common::{
    operations::{By, Select, Update},
    Bilingual, DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::Unit;
use crate::{
    domain::{
        building::{self, Address, Floors, Gallery, Status, Timeline},
        city,
        geo::Coordinate,
        Building, City, Description, ImageUrl, Name,
    },
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for updating an existing [`Building`].
///
/// Replaces every editable field of the [`Building`]. Moving it to another
/// [`City`] moves all its [`Unit`]s as well.
#[derive(Clone, Debug)]
pub struct UpdateBuilding {
    /// ID of the [`Building`] to update.
    pub id: building::Id,

    /// ID of the [`City`] the [`Building`] is located in.
    pub city_id: city::Id,

    /// New [`Name`] of the [`Building`].
    pub name: Bilingual<Name>,

    /// New [`Description`] of the [`Building`].
    pub description: Bilingual<Description>,

    /// New [`Address`] of the [`Building`].
    pub address: Option<Address>,

    /// New [`Coordinate`] of the [`Building`].
    pub coordinate: Option<Coordinate>,

    /// New number of [`Floors`] in the [`Building`].
    pub floors: Floors,

    /// New [`Status`] of the [`Building`].
    pub status: Status,

    /// New main image of the [`Building`].
    pub image: Option<ImageUrl>,

    /// New [`Gallery`] of the [`Building`].
    pub gallery: Gallery,

    /// New construction [`Timeline`] of the [`Building`], if it should be
    /// replaced.
    pub timeline: Option<Timeline>,
}

impl<Db> Command<UpdateBuilding> for Service<Db>
where
    Db: Database<
            Select<By<Option<Building>, building::Id>>,
            Ok = Option<Building>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<City>, city::Id>>,
            Ok = Option<City>,
            Err = Traced<database::Error>,
        > + Database<Update<Building>, Err = Traced<database::Error>>,
{
    type Ok = Building;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdateBuilding,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateBuilding {
            id,
            city_id,
            name,
            description,
            address,
            coordinate,
            floors,
            status,
            image,
            gallery,
            timeline,
        } = cmd;

        let mut building = self
            .database()
            .execute(Select(By::<Option<Building>, _>::new(id.clone())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::BuildingNotExists(id))
            .map_err(tracerr::wrap!())?;

        if building.city_id != city_id {
            let city = self
                .database()
                .execute(Select(By::<Option<City>, _>::new(city_id.clone())))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?;
            if city.is_none() {
                return Err(tracerr::new!(E::CityNotExists(city_id)));
            }
        }

        building.city_id = city_id;
        building.name = name;
        building.description = description;
        building.address = address;
        building.coordinate = coordinate;
        building.floors = floors;
        building.status = status;
        building.image = image;
        building.gallery = gallery;
        if let Some(timeline) = timeline {
            building.timeline = timeline;
        }
        building.updated_at = DateTime::now().coerce();

        self.database()
            .execute(Update(building.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(building)
    }
}

/// Error of [`UpdateBuilding`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Building`] with the provided ID does not exist.
    #[display("`Building(id: {_0})` does not exist")]
    #[from(ignore)]
    BuildingNotExists(#[error(not(source))] building::Id),

    /// [`City`] with the provided ID does not exist.
    #[display("`City(id: {_0})` does not exist")]
    #[from(ignore)]
    CityNotExists(#[error(not(source))] city::Id),
}

#[cfg(all(test, feature = "postgres"))]
mod spec {
    use common::Bilingual;

    use crate::{
        command::Command as _,
        domain::{
            building::{timeline, Floors, Gallery, Status},
            city, Name,
        },
        fake::{self, FakeDb},
    };

    use super::{ExecutionError, UpdateBuilding};

    fn update(
        building: &crate::domain::Building,
        city_id: &city::Id,
    ) -> UpdateBuilding {
        UpdateBuilding {
            id: building.id.clone(),
            city_id: city_id.clone(),
            name: Bilingual::new(Name::new("Nile Tower II").unwrap(), None),
            description: building.description.clone(),
            address: None,
            coordinate: None,
            floors: Floors::new(30),
            status: Status::SoldOut,
            image: None,
            gallery: Gallery::default(),
            timeline: None,
        }
    }

    #[tokio::test]
    async fn keeps_timeline_when_omitted() {
        let db = FakeDb::default();
        let cairo = fake::city("New Cairo");
        let mut building = fake::building("Nile Tower", &cairo.id);
        building.timeline = timeline::Timeline::new(vec![timeline::Phase::new(
            timeline::Label::new("Foundation").unwrap(),
            timeline::Label::empty(),
            timeline::Status::Completed,
            1,
        )]);
        db.cities.lock().unwrap().push(cairo.clone());
        db.buildings.lock().unwrap().push(building.clone());

        let updated = fake::service(db.clone())
            .execute(update(&building, &cairo.id))
            .await
            .unwrap();

        assert_eq!(updated.name.default.as_str(), "Nile Tower II");
        assert_eq!(updated.floors.get(), 30);
        assert_eq!(updated.timeline, building.timeline);
        assert_eq!(
            db.buildings.lock().unwrap()[0].status,
            Status::SoldOut,
        );
    }

    #[tokio::test]
    async fn rejects_unknown_city() {
        let db = FakeDb::default();
        let cairo = fake::city("New Cairo");
        let building = fake::building("Nile Tower", &cairo.id);
        db.cities.lock().unwrap().push(cairo);
        db.buildings.lock().unwrap().push(building.clone());

        let err = fake::service(db)
            .execute(update(&building, &city::Id::new("atlantis").unwrap()))
            .await
            .unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::CityNotExists(id) if id.to_string() == "atlantis",
        ));
    }
}
