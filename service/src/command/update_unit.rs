//! [`Command`] for updating an existing [`Unit`].

use common::{
    operations::{By, Select, Update},
    Bilingual, DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::{Building, City};
use crate::{
    domain::{
        building, city,
        unit::{self, Area, Features, Kind, Number, Pricing, Status},
        Description, ImageUrl, Unit,
    },
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for updating an existing [`Unit`].
///
/// Replaces every editable field of the [`Unit`]. Its [`City`] always
/// follows its [`Building`].
#[derive(Clone, Debug)]
pub struct UpdateUnit {
    /// ID of the [`Unit`] to update.
    pub id: unit::Id,

    /// ID of the [`Building`] the [`Unit`] belongs to.
    pub building_id: building::Id,

    /// ID of the [`City`] the [`Unit`] is located in, if provided.
    ///
    /// Must match the [`City`] of the [`Building`].
    pub city_id: Option<city::Id>,

    /// New [`Number`] of the [`Unit`].
    pub number: Number,

    /// New [`Kind`] of the [`Unit`].
    pub kind: Kind,

    /// New number of bedrooms in the [`Unit`].
    pub bedrooms: u8,

    /// New number of bathrooms in the [`Unit`].
    pub bathrooms: u8,

    /// New [`Area`] of the [`Unit`].
    pub area: Area,

    /// New floor of the [`Unit`].
    pub floor: i16,

    /// New [`Pricing`] of the [`Unit`].
    pub pricing: Pricing,

    /// New [`Status`] of the [`Unit`].
    pub status: Status,

    /// New indicator whether the [`Unit`] is promoted on the home page.
    pub is_featured: bool,

    /// New [`Description`] of the [`Unit`].
    pub description: Bilingual<Description>,

    /// New [`Features`] of the [`Unit`].
    pub features: Option<Features>,

    /// New image of the [`Unit`].
    pub image: Option<ImageUrl>,
}

impl<Db> Command<UpdateUnit> for Service<Db>
where
    Db: Database<
            Select<By<Option<Unit>, unit::Id>>,
            Ok = Option<Unit>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<city::Id>, building::Id>>,
            Ok = Option<city::Id>,
            Err = Traced<database::Error>,
        > + Database<Update<Unit>, Err = Traced<database::Error>>,
{
    type Ok = Unit;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: UpdateUnit) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateUnit {
            id,
            building_id,
            city_id,
            number,
            kind,
            bedrooms,
            bathrooms,
            area,
            floor,
            pricing,
            status,
            is_featured,
            description,
            features,
            image,
        } = cmd;

        let mut unit = self
            .database()
            .execute(Select(By::<Option<Unit>, _>::new(id.clone())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::UnitNotExists(id))
            .map_err(tracerr::wrap!())?;

        let building_city_id = self
            .database()
            .execute(Select(By::<Option<city::Id>, _>::new(building_id.clone())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or_else(|| E::BuildingNotExists(building_id.clone()))
            .map_err(tracerr::wrap!())?;
        if let Some(city_id) = city_id {
            if city_id != building_city_id {
                return Err(tracerr::new!(E::CityMismatch {
                    building_id,
                    city_id,
                }));
            }
        }

        unit.building_id = building_id;
        unit.city_id = building_city_id;
        unit.number = number;
        unit.kind = kind;
        unit.bedrooms = bedrooms;
        unit.bathrooms = bathrooms;
        unit.area = area;
        unit.floor = floor;
        unit.pricing = pricing;
        unit.status = status;
        unit.is_featured = is_featured;
        unit.description = description;
        unit.features = features;
        unit.image = image;
        unit.updated_at = DateTime::now().coerce();

        self.database()
            .execute(Update(unit.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(unit)
    }
}

/// Error of [`UpdateUnit`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Unit`] with the provided ID does not exist.
    #[display("`Unit(id: {_0})` does not exist")]
    #[from(ignore)]
    UnitNotExists(#[error(not(source))] unit::Id),

    /// [`Building`] with the provided ID does not exist.
    #[display("`Building(id: {_0})` does not exist")]
    #[from(ignore)]
    BuildingNotExists(#[error(not(source))] building::Id),

    /// Provided [`City`] differs from the one of the [`Building`].
    #[display("`Building(id: {building_id})` is not in `City(id: {city_id})`")]
    #[from(ignore)]
    CityMismatch {
        /// ID of the [`Building`].
        building_id: building::Id,

        /// ID of the provided [`City`].
        city_id: city::Id,
    },
}

#[cfg(all(test, feature = "postgres"))]
mod spec {
    use crate::{
        command::Command as _,
        domain::{
            building, city,
            unit::{self, Status},
            Unit,
        },
        fake::{self, FakeDb},
    };

    use super::{ExecutionError, UpdateUnit};

    fn update(
        unit: &Unit,
        building_id: &building::Id,
        city_id: Option<&city::Id>,
    ) -> UpdateUnit {
        UpdateUnit {
            id: unit.id.clone(),
            building_id: building_id.clone(),
            city_id: city_id.cloned(),
            number: unit.number.clone(),
            kind: unit.kind,
            bedrooms: 4,
            bathrooms: unit.bathrooms,
            area: unit.area,
            floor: unit.floor,
            pricing: unit.pricing,
            status: Status::Sold,
            is_featured: true,
            description: unit.description.clone(),
            features: None,
            image: None,
        }
    }

    #[tokio::test]
    async fn follows_city_of_new_building() {
        let db = FakeDb::default();
        let cairo = fake::city("New Cairo");
        let zayed = fake::city("Sheikh Zayed");
        let tower = fake::building("Nile Tower", &cairo.id);
        let plaza = fake::building("Zayed Plaza", &zayed.id);
        let unit = fake::unit("A-101", &tower);
        db.buildings
            .lock()
            .unwrap()
            .extend([tower.clone(), plaza.clone()]);
        db.units.lock().unwrap().push(unit.clone());

        let updated = fake::service(db.clone())
            .execute(update(&unit, &plaza.id, None))
            .await
            .unwrap();

        assert_eq!(updated.id, unit.id);
        assert_eq!(updated.building_id, plaza.id);
        assert_eq!(updated.city_id, zayed.id);
        assert_eq!(db.units.lock().unwrap()[0].bedrooms, 4);
    }

    #[tokio::test]
    async fn rejects_unknown_unit() {
        let db = FakeDb::default();
        let cairo = fake::city("New Cairo");
        let tower = fake::building("Nile Tower", &cairo.id);
        db.buildings.lock().unwrap().push(tower.clone());
        let mut unit = fake::unit("A-101", &tower);
        unit.id = unit::Id::new("unit-missing").unwrap();

        let err = fake::service(db)
            .execute(update(&unit, &tower.id, None))
            .await
            .unwrap_err();

        assert!(
            matches!(err.as_ref(), ExecutionError::UnitNotExists(_)),
            "wrong error: {err}",
        );
    }

    #[tokio::test]
    async fn rejects_mismatching_city() {
        let db = FakeDb::default();
        let cairo = fake::city("New Cairo");
        let zayed = fake::city("Sheikh Zayed");
        let tower = fake::building("Nile Tower", &cairo.id);
        let unit = fake::unit("A-101", &tower);
        db.buildings.lock().unwrap().push(tower.clone());
        db.units.lock().unwrap().push(unit.clone());

        let err = fake::service(db.clone())
            .execute(update(&unit, &tower.id, Some(&zayed.id)))
            .await
            .unwrap_err();

        assert!(
            matches!(err.as_ref(), ExecutionError::CityMismatch { .. }),
            "wrong error: {err}",
        );
        assert_eq!(db.units.lock().unwrap()[0].bedrooms, unit.bedrooms);
    }
}
