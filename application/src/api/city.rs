//! [`City`]-related definitions.

use common::DateTime;
use derive_more::{AsRef, Display, From, Into};
use juniper::{graphql_object, GraphQLEnum, GraphQLInputObject, GraphQLScalar};
use service::{
    domain::{self, geo::Coordinate},
    query::{self, Degraded},
    read, Query as _,
};

use crate::{
    api::{self, scalar, text},
    AsError, Context, Error,
};

/// A city where properties are sold.
#[derive(Clone, Debug, From)]
pub struct City(read::city::Enriched);

/// A city where properties are sold.
#[graphql_object(context = Context)]
impl City {
    /// Unique slug identifier of this `City`, derived from its English name.
    #[must_use]
    pub fn id(&self) -> Id {
        self.0.city.id.clone().into()
    }

    /// Name of this `City`.
    #[must_use]
    pub fn name(&self) -> api::BilingualText {
        (&self.0.city.name).into()
    }

    /// Description of this `City`.
    #[must_use]
    pub fn description(&self) -> api::BilingualText {
        (&self.0.city.description).into()
    }

    /// Human-readable location of this `City`, like `East of Cairo`.
    #[must_use]
    pub fn location(&self) -> Option<Location> {
        self.0.city.location.clone().map(Into::into)
    }

    /// Latitude of this `City` on the map.
    #[must_use]
    pub fn latitude(&self) -> f64 {
        self.0.city.coordinate.latitude()
    }

    /// Longitude of this `City` on the map.
    #[must_use]
    pub fn longitude(&self) -> f64 {
        self.0.city.coordinate.longitude()
    }

    /// Sales status of this `City`.
    #[must_use]
    pub fn status(&self) -> Status {
        self.0.city.status.into()
    }

    /// Hero image of this `City`, if any.
    #[must_use]
    pub fn hero_image(&self) -> Option<text::ImageUrl> {
        self.0.city.hero_image.clone().map(Into::into)
    }

    /// Number of `Building`s in this `City`.
    #[must_use]
    pub fn total_buildings(&self) -> i32 {
        api::widen(self.0.stats.total_buildings)
    }

    /// Number of `Unit`s in this `City`.
    #[must_use]
    pub fn total_units(&self) -> i32 {
        api::widen(self.0.stats.total_units)
    }

    /// Number of available `Unit`s in this `City`.
    #[must_use]
    pub fn available_units(&self) -> i32 {
        api::widen(self.0.stats.available_units)
    }

    /// `Building`s of this `City` ordered by their name.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "City.buildings",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn buildings(
        &self,
        ctx: &Context,
    ) -> Result<Vec<api::Building>, Error> {
        ctx.service()
            .execute(Degraded(query::buildings::Enriched(
                read::building::list::Selector::ByCity(self.0.city.id.clone()),
            )))
            .await
            .map_err(AsError::into_error)
            .map(|list| list.into_iter().map(Into::into).collect())
    }

    /// Available `Unit`s of this `City` ordered by their number.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "City.units",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn units(&self, ctx: &Context) -> Result<Vec<api::Unit>, Error> {
        ctx.service()
            .execute(Degraded(query::units::List::by(
                read::unit::list::Selector::AvailableByCity(
                    self.0.city.id.clone(),
                ),
            )))
            .await
            .map_err(AsError::into_error)
            .map(|list| list.into_iter().map(Into::into).collect())
    }

    /// Featured available `Unit`s of this `City`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "City.featuredUnits",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn featured_units(
        &self,
        ctx: &Context,
    ) -> Result<Vec<api::Unit>, Error> {
        api::unit::featured(Some(self.0.city.id.clone()), ctx).await
    }

    /// `DateTime` when this `City` was created.
    #[must_use]
    pub fn created_at(&self) -> DateTime {
        self.0.city.created_at.coerce()
    }

    /// `DateTime` when this `City` was last modified.
    #[must_use]
    pub fn updated_at(&self) -> DateTime {
        self.0.city.updated_at.coerce()
    }
}

/// Unique slug identifier of a `City`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "CityId", with = scalar::Via::<domain::city::Id>)]
pub struct Id(domain::city::Id);

/// Human-readable location of a `City`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "CityLocation",
    with = scalar::Via::<domain::city::Location>,
)]
pub struct Location(domain::city::Location);

/// Sales status of a `City`.
#[derive(Clone, Copy, Debug, GraphQLEnum)]
#[graphql(name = "CityStatus")]
pub enum Status {
    /// Units are being sold.
    Active,

    /// Sales have not started yet.
    Upcoming,

    /// Development is completed.
    Completed,

    /// No units left for sale.
    SoldOut,
}

impl From<domain::city::Status> for Status {
    fn from(status: domain::city::Status) -> Self {
        use domain::city::Status as S;
        match status {
            S::Active => Self::Active,
            S::Upcoming => Self::Upcoming,
            S::Completed => Self::Completed,
            S::SoldOut => Self::SoldOut,
        }
    }
}

impl From<Status> for domain::city::Status {
    fn from(status: Status) -> Self {
        match status {
            Status::Active => Self::Active,
            Status::Upcoming => Self::Upcoming,
            Status::Completed => Self::Completed,
            Status::SoldOut => Self::SoldOut,
        }
    }
}

/// Editable fields of a `City`.
#[derive(Clone, Debug, GraphQLInputObject)]
#[graphql(name = "CityInput")]
pub struct Input {
    /// English name.
    pub name: text::Name,

    /// Arabic name.
    pub name_ar: Option<text::Name>,

    /// English description.
    pub description: text::Description,

    /// Arabic description.
    pub description_ar: Option<text::Description>,

    /// Human-readable location.
    pub location: Option<Location>,

    /// Latitude on the map, Cairo if omitted together with the longitude.
    pub latitude: Option<f64>,

    /// Longitude on the map, Cairo if omitted together with the latitude.
    pub longitude: Option<f64>,

    /// Sales status.
    pub status: Status,

    /// Hero image.
    pub hero_image: Option<text::ImageUrl>,
}

/// [`Input`] parsed into domain values.
#[derive(Debug)]
pub(crate) struct Parsed {
    /// Name of the [`domain::City`].
    pub(crate) name: common::Bilingual<domain::Name>,

    /// Description of the [`domain::City`].
    pub(crate) description: common::Bilingual<domain::Description>,

    /// Location of the [`domain::City`].
    pub(crate) location: Option<domain::city::Location>,

    /// Coordinate of the [`domain::City`].
    pub(crate) coordinate: Coordinate,

    /// Status of the [`domain::City`].
    pub(crate) status: domain::city::Status,

    /// Hero image of the [`domain::City`].
    pub(crate) hero_image: Option<domain::ImageUrl>,
}

impl Input {
    /// Parses this [`Input`] into domain values.
    ///
    /// Omitted coordinates default to Cairo.
    ///
    /// # Errors
    ///
    /// Errors if the coordinate is invalid.
    pub(crate) fn parse(self) -> Result<Parsed, Error> {
        let Self {
            name,
            name_ar,
            description,
            description_ar,
            location,
            latitude,
            longitude,
            status,
            hero_image,
        } = self;

        Ok(Parsed {
            name: text::bilingual(name, name_ar),
            description: text::bilingual(description, description_ar),
            location: location.map(Into::into),
            coordinate: coordinate(latitude, longitude)?.unwrap_or_default(),
            status: status.into(),
            hero_image: hero_image.map(Into::into),
        })
    }
}

/// Parses an optional [`Coordinate`] out of its optional parts.
///
/// # Errors
///
/// Errors if only one part is provided, or the parts are out of range.
pub(crate) fn coordinate(
    latitude: Option<f64>,
    longitude: Option<f64>,
) -> Result<Option<Coordinate>, Error> {
    match (latitude, longitude) {
        (None, None) => Ok(None),
        (Some(lat), Some(lng)) => Coordinate::new(lat, lng)
            .map(Some)
            .ok_or_else(|| api::InputError::InvalidCoordinate.into()),
        (Some(_), None) | (None, Some(_)) => {
            Err(api::InputError::InvalidCoordinate.into())
        }
    }
}

#[cfg(test)]
mod spec {
    use super::coordinate;

    #[test]
    fn coordinate_requires_both_parts() {
        assert_eq!(coordinate(None, None).unwrap(), None);
        assert!(coordinate(Some(30.0), Some(31.0)).unwrap().is_some());
        assert!(coordinate(Some(30.0), None).is_err());
        assert!(coordinate(None, Some(31.0)).is_err());
        assert!(coordinate(Some(95.0), Some(31.0)).is_err());
    }
}
