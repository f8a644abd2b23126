//! [`Command`] for creating a new [`City`].

use common::{
    operations::{By, Insert, Select},
    Bilingual, DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{
        city::{self, Location, Status},
        geo::Coordinate,
        City, Description, ImageUrl, Name,
    },
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`City`].
///
/// [`city::Id`] of the new [`City`] is derived from its English [`Name`].
#[derive(Clone, Debug)]
pub struct CreateCity {
    /// [`Name`] of a new [`City`].
    pub name: Bilingual<Name>,

    /// [`Description`] of a new [`City`].
    pub description: Bilingual<Description>,

    /// [`Location`] of a new [`City`], if any.
    pub location: Option<Location>,

    /// [`Coordinate`] of a new [`City`].
    pub coordinate: Coordinate,

    /// [`Status`] of a new [`City`].
    pub status: Status,

    /// Hero image of a new [`City`], if any.
    pub hero_image: Option<ImageUrl>,
}

impl<Db> Command<CreateCity> for Service<Db>
where
    Db: Database<
            Select<By<Option<City>, city::Id>>,
            Ok = Option<City>,
            Err = Traced<database::Error>,
        > + Database<Insert<City>, Err = Traced<database::Error>>,
{
    type Ok = City;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateCity) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateCity {
            name,
            description,
            location,
            coordinate,
            status,
            hero_image,
        } = cmd;

        let id = city::Id::from_name(&name.default);
        let existing = self
            .database()
            .execute(Select(By::new(id.clone())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if existing.is_some() {
            return Err(tracerr::new!(E::CityExists(id)));
        }

        let now = DateTime::now();
        let city = City {
            id,
            name,
            description,
            location,
            coordinate,
            status,
            hero_image,
            created_at: now.coerce(),
            updated_at: now.coerce(),
        };
        self.database()
            .execute(Insert(city.clone()))
            .await
            .map_err(|e| {
                // Lost a race with a concurrent creation.
                if e.as_ref().is_unique_violation() {
                    tracerr::new!(E::CityExists(city.id.clone()))
                } else {
                    tracerr::map_from(e)
                }
            })
            .map(drop)?;

        Ok(city)
    }
}

/// Error of [`CreateCity`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`City`] with the same [`city::Id`] exists already.
    #[display("`City(id: {_0})` already exists")]
    #[from(ignore)]
    CityExists(#[error(not(source))] city::Id),
}

#[cfg(all(test, feature = "postgres"))]
mod spec {
    use common::Bilingual;

    use crate::{
        domain::{city::Status, geo::Coordinate, Description, Name},
        fake::{self, FakeDb},
        Command as _,
    };

    use super::{CreateCity, ExecutionError};

    fn cmd(name: &str) -> CreateCity {
        CreateCity {
            name: Bilingual::new(Name::new(name).unwrap(), None),
            description: Bilingual::new(Description::new("").unwrap(), None),
            location: None,
            coordinate: Coordinate::default(),
            status: Status::Active,
            hero_image: None,
        }
    }

    #[tokio::test]
    async fn derives_id_from_name() {
        let db = FakeDb::default();
        let service = fake::service(db.clone());

        let city = service.execute(cmd("New  Cairo")).await.unwrap();

        assert_eq!(city.id.to_string(), "new-cairo");
        assert_eq!(db.cities.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn rejects_taken_slug() {
        let db = FakeDb::default();
        db.cities.lock().unwrap().push(fake::city("New Cairo"));
        let service = fake::service(db.clone());

        let err = service.execute(cmd("new cairo")).await.unwrap_err();

        assert!(
            matches!(err.as_ref(), ExecutionError::CityExists(id) if id.to_string() == "new-cairo"),
            "wrong error: {err}",
        );
        assert_eq!(db.cities.lock().unwrap().len(), 1);
    }
}
