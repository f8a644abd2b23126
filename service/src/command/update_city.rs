//! [`Command`] for updating an existing [`City`].

use common::{
    operations::{By, Select, Update},
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

/// [`Command`] for updating an existing [`City`].
///
/// Replaces every editable field of the [`City`]. Its [`city::Id`] stays
/// untouched even if its English [`Name`] changes.
#[derive(Clone, Debug)]
pub struct UpdateCity {
    /// ID of the [`City`] to update.
    pub id: city::Id,

    /// New [`Name`] of the [`City`].
    pub name: Bilingual<Name>,

    /// New [`Description`] of the [`City`].
    pub description: Bilingual<Description>,

    /// New [`Location`] of the [`City`].
    pub location: Option<Location>,

    /// New [`Coordinate`] of the [`City`].
    pub coordinate: Coordinate,

    /// New [`Status`] of the [`City`].
    pub status: Status,

    /// New hero image of the [`City`].
    pub hero_image: Option<ImageUrl>,
}

impl<Db> Command<UpdateCity> for Service<Db>
where
    Db: Database<
            Select<By<Option<City>, city::Id>>,
            Ok = Option<City>,
            Err = Traced<database::Error>,
        > + Database<Update<City>, Err = Traced<database::Error>>,
{
    type Ok = City;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: UpdateCity) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateCity {
            id,
            name,
            description,
            location,
            coordinate,
            status,
            hero_image,
        } = cmd;

        let mut city = self
            .database()
            .execute(Select(By::new(id.clone())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::CityNotExists(id))
            .map_err(tracerr::wrap!())?;

        city.name = name;
        city.description = description;
        city.location = location;
        city.coordinate = coordinate;
        city.status = status;
        city.hero_image = hero_image;
        city.updated_at = DateTime::now().coerce();

        self.database()
            .execute(Update(city.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(city)
    }
}

/// Error of [`UpdateCity`] [`Command`] execution.
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
        command::Command as _,
        domain::{
            city::{self, Status},
            Name,
        },
        fake::{self, FakeDb},
    };

    use super::{ExecutionError, UpdateCity};

    fn update(city: &crate::domain::City, id: &city::Id) -> UpdateCity {
        UpdateCity {
            id: id.clone(),
            name: Bilingual::new(Name::new("Cairo East").unwrap(), None),
            description: city.description.clone(),
            location: None,
            coordinate: city.coordinate,
            status: Status::SoldOut,
            hero_image: None,
        }
    }

    #[tokio::test]
    async fn keeps_id_when_renamed() {
        let db = FakeDb::default();
        let cairo = fake::city("New Cairo");
        db.cities.lock().unwrap().push(cairo.clone());

        let updated = fake::service(db.clone())
            .execute(update(&cairo, &cairo.id))
            .await
            .unwrap();

        assert_eq!(updated.id, cairo.id);
        assert_eq!(updated.name.default.as_str(), "Cairo East");
        assert_eq!(db.cities.lock().unwrap()[0].status, Status::SoldOut);
    }

    #[tokio::test]
    async fn rejects_unknown_city() {
        let db = FakeDb::default();
        let cairo = fake::city("New Cairo");
        db.cities.lock().unwrap().push(cairo.clone());

        let err = fake::service(db.clone())
            .execute(update(&cairo, &city::Id::new("atlantis").unwrap()))
            .await
            .unwrap_err();

        assert!(
            matches!(err.as_ref(), ExecutionError::CityNotExists(_)),
            "wrong error: {err}",
        );
        assert_eq!(db.cities.lock().unwrap()[0].status, cairo.status);
    }
}
