//! [`Command`] for creating a new [`Unit`].

use common::{
    operations::{By, Insert, Select},
    Bilingual,
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

/// [`Command`] for creating a new [`Unit`] in an existing [`Building`].
#[derive(Clone, Debug)]
pub struct CreateUnit {
    /// ID of the [`Building`] a new [`Unit`] belongs to.
    pub building_id: building::Id,

    /// ID of the [`City`] a new [`Unit`] is located in.
    ///
    /// Taken from its [`Building`] if omitted, and must match it otherwise.
    pub city_id: Option<city::Id>,

    /// [`Number`] of a new [`Unit`].
    pub number: Number,

    /// [`Kind`] of a new [`Unit`].
    pub kind: Kind,

    /// Number of bedrooms in a new [`Unit`].
    pub bedrooms: u8,

    /// Number of bathrooms in a new [`Unit`].
    pub bathrooms: u8,

    /// [`Area`] of a new [`Unit`].
    pub area: Area,

    /// Floor a new [`Unit`] is located on.
    pub floor: i16,

    /// [`Pricing`] of a new [`Unit`].
    pub pricing: Pricing,

    /// [`Status`] of a new [`Unit`].
    pub status: Status,

    /// Indicator whether a new [`Unit`] is promoted on the home page.
    pub is_featured: bool,

    /// [`Description`] of a new [`Unit`].
    pub description: Bilingual<Description>,

    /// [`Features`] of a new [`Unit`], if any.
    pub features: Option<Features>,

    /// Image of a new [`Unit`], if any.
    pub image: Option<ImageUrl>,
}

impl<Db> Command<CreateUnit> for Service<Db>
where
    Db: Database<
            Select<By<Option<city::Id>, building::Id>>,
            Ok = Option<city::Id>,
            Err = Traced<database::Error>,
        > + Database<Insert<Unit>, Err = Traced<database::Error>>,
{
    type Ok = Unit;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateUnit) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateUnit {
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

        let building_city_id = self
            .database()
            .execute(Select(By::new(building_id.clone())))
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

        let created_at = unit::CreationDateTime::now();
        let unit = Unit {
            id: unit::Id::generate(&building_id, &number, created_at),
            building_id,
            city_id: building_city_id,
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
            created_at,
            updated_at: created_at.coerce(),
        };
        self.database()
            .execute(Insert(unit.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(unit)
    }
}

/// Error of [`CreateUnit`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

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
    use common::{Bilingual, Money};
    use rust_decimal::Decimal;

    use crate::{
        domain::{
            building, city,
            unit::{Area, Kind, Number, PaymentType, Pricing, Status},
            Description,
        },
        fake::{self, FakeDb},
        Command as _,
    };

    use super::{CreateUnit, ExecutionError};

    fn cmd(
        building_id: &building::Id,
        city_id: Option<&city::Id>,
    ) -> CreateUnit {
        CreateUnit {
            building_id: building_id.clone(),
            city_id: city_id.cloned(),
            number: Number::new("A-101").unwrap(),
            kind: Kind::Apartment,
            bedrooms: 3,
            bathrooms: 2,
            area: Area::new(Decimal::from(150)).unwrap(),
            floor: 1,
            pricing: Pricing {
                payment_type: PaymentType::Cash,
                price: Money::egp(Decimal::from(2_500_000)),
                installment_price: None,
                installment_years: None,
                down_payment: None,
            },
            status: Status::Available,
            is_featured: false,
            description: Bilingual::new(Description::new("").unwrap(), None),
            features: None,
            image: None,
        }
    }

    #[tokio::test]
    async fn copies_city_of_building() {
        let db = FakeDb::default();
        let cairo = fake::city("New Cairo");
        let tower = fake::building("Nile Tower", &cairo.id);
        db.buildings.lock().unwrap().push(tower.clone());
        let service = fake::service(db.clone());

        let unit = service.execute(cmd(&tower.id, None)).await.unwrap();

        assert_eq!(unit.city_id, cairo.id);
        assert!(
            unit.id
                .to_string()
                .starts_with(&format!("unit-{}-A-101-", tower.id)),
        );
        assert_eq!(db.units.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn rejects_mismatching_city() {
        let db = FakeDb::default();
        let cairo = fake::city("New Cairo");
        let zayed = fake::city("Sheikh Zayed");
        let tower = fake::building("Nile Tower", &cairo.id);
        db.buildings.lock().unwrap().push(tower.clone());
        let service = fake::service(db.clone());

        let err = service
            .execute(cmd(&tower.id, Some(&zayed.id)))
            .await
            .unwrap_err();

        assert!(
            matches!(err.as_ref(), ExecutionError::CityMismatch { .. }),
            "wrong error: {err}",
        );
        assert!(db.units.lock().unwrap().is_empty());
    }
}
