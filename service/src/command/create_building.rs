//! [`Command`] for creating a new [`Building`].

use common::{
    operations::{By, Insert, Select},
    Bilingual,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

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

/// [`Command`] for creating a new [`Building`] in an existing [`City`].
#[derive(Clone, Debug)]
pub struct CreateBuilding {
    /// ID of the [`City`] a new [`Building`] is located in.
    pub city_id: city::Id,

    /// [`Name`] of a new [`Building`].
    pub name: Bilingual<Name>,

    /// [`Description`] of a new [`Building`].
    pub description: Bilingual<Description>,

    /// [`Address`] of a new [`Building`], if any.
    pub address: Option<Address>,

    /// [`Coordinate`] of a new [`Building`], if known.
    pub coordinate: Option<Coordinate>,

    /// Number of [`Floors`] in a new [`Building`].
    pub floors: Floors,

    /// [`Status`] of a new [`Building`].
    pub status: Status,

    /// Main image of a new [`Building`], if any.
    pub image: Option<ImageUrl>,

    /// [`Gallery`] of a new [`Building`].
    pub gallery: Gallery,

    /// Construction [`Timeline`] of a new [`Building`].
    pub timeline: Timeline,
}

impl<Db> Command<CreateBuilding> for Service<Db>
where
    Db: Database<
            Select<By<Option<City>, city::Id>>,
            Ok = Option<City>,
            Err = Traced<database::Error>,
        > + Database<Insert<Building>, Err = Traced<database::Error>>,
{
    type Ok = Building;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateBuilding,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateBuilding {
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

        let city = self
            .database()
            .execute(Select(By::new(city_id.clone())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if city.is_none() {
            return Err(tracerr::new!(E::CityNotExists(city_id)));
        }

        let created_at = building::CreationDateTime::now();
        let building = Building {
            id: building::Id::generate(&name.default, created_at),
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
            created_at,
            updated_at: created_at.coerce(),
        };
        self.database()
            .execute(Insert(building.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(building)
    }
}

/// Error of [`CreateBuilding`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`City`] with the provided ID does not exist.
    #[display("`City(id: {_0})` does not exist")]
    #[from(ignore)]
    CityNotExists(#[error(not(source))] city::Id),
}

#[cfg(all(test, feature = "postgres"))]
mod spec {
    use common::Bilingual;

    use crate::{
        domain::{
            building::{Floors, Gallery, Status, Timeline},
            city, Description, Name,
        },
        fake::{self, FakeDb},
        Command as _,
    };

    use super::{CreateBuilding, ExecutionError};

    fn cmd(name: &str, city_id: &city::Id) -> CreateBuilding {
        CreateBuilding {
            city_id: city_id.clone(),
            name: Bilingual::new(Name::new(name).unwrap(), None),
            description: Bilingual::new(Description::new("").unwrap(), None),
            address: None,
            coordinate: None,
            floors: Floors::new(12),
            status: Status::Available,
            image: None,
            gallery: Gallery::default(),
            timeline: Timeline::default(),
        }
    }

    #[tokio::test]
    async fn creates_building_in_existing_city() {
        let db = FakeDb::default();
        let cairo = fake::city("New Cairo");
        db.cities.lock().unwrap().push(cairo.clone());
        let service = fake::service(db.clone());

        let building =
            service.execute(cmd("Nile Tower", &cairo.id)).await.unwrap();

        assert!(building.id.to_string().starts_with("nile-tower-"));
        assert_eq!(building.city_id, cairo.id);
        assert_eq!(db.buildings.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn rejects_unknown_city() {
        let db = FakeDb::default();
        let service = fake::service(db.clone());
        let unknown = city::Id::new("atlantis").unwrap();

        let err = service
            .execute(cmd("Nile Tower", &unknown))
            .await
            .unwrap_err();

        assert!(
            matches!(err.as_ref(), ExecutionError::CityNotExists(_)),
            "wrong error: {err}",
        );
        assert!(db.buildings.lock().unwrap().is_empty());
    }
}
