//! [`Building`]-related definitions.

use std::sync::Arc;

use common::{DateTime, Language};
use derive_more::{AsRef, Display, From, Into};
use juniper::{graphql_object, GraphQLEnum, GraphQLInputObject, GraphQLScalar};
use service::{
    domain::{
        self,
        building::timeline::{self, MasterPhase},
    },
    query::{self, Degraded},
    read, Query as _,
};

use crate::{
    api::{self, scalar, text},
    AsError, Context, Error,
};

/// A residential building.
#[derive(Clone, Debug, From)]
pub struct Building(read::building::Enriched);

impl From<domain::Building> for Building {
    fn from(building: domain::Building) -> Self {
        Self(read::building::Enriched {
            building,
            stats: read::building::Stats::default(),
        })
    }
}

/// A residential building.
#[graphql_object(context = Context)]
impl Building {
    /// Unique identifier of this `Building`.
    #[must_use]
    pub fn id(&self) -> Id {
        self.0.building.id.clone().into()
    }

    /// ID of the `City` this `Building` is located in.
    #[must_use]
    pub fn city_id(&self) -> api::city::Id {
        self.0.building.city_id.clone().into()
    }

    /// `City` this `Building` is located in.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Building.city",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn city(&self, ctx: &Context) -> Result<Option<api::City>, Error> {
        ctx.service()
            .execute(Degraded(query::city::Enriched(
                self.0.building.city_id.clone(),
            )))
            .await
            .map_err(AsError::into_error)
            .map(|c| c.map(Into::into))
    }

    /// Name of this `Building`.
    #[must_use]
    pub fn name(&self) -> api::BilingualText {
        (&self.0.building.name).into()
    }

    /// Description of this `Building`.
    #[must_use]
    pub fn description(&self) -> api::BilingualText {
        (&self.0.building.description).into()
    }

    /// Street address of this `Building`, if any.
    #[must_use]
    pub fn address(&self) -> Option<Address> {
        self.0.building.address.clone().map(Into::into)
    }

    /// Latitude of this `Building` on the map, if known.
    #[must_use]
    pub fn latitude(&self) -> Option<f64> {
        self.0.building.coordinate.map(|c| c.latitude())
    }

    /// Longitude of this `Building` on the map, if known.
    #[must_use]
    pub fn longitude(&self) -> Option<f64> {
        self.0.building.coordinate.map(|c| c.longitude())
    }

    /// Number of floors in this `Building`.
    #[must_use]
    pub fn floors(&self) -> i32 {
        self.0.building.floors.get().into()
    }

    /// Sales status of this `Building`.
    #[must_use]
    pub fn status(&self) -> Status {
        self.0.building.status.into()
    }

    /// Main image of this `Building`, if any.
    #[must_use]
    pub fn image(&self) -> Option<text::ImageUrl> {
        self.0.building.image.clone().map(Into::into)
    }

    /// Gallery images of this `Building`.
    #[must_use]
    pub fn gallery(&self) -> Vec<text::ImageUrl> {
        self.0.building.gallery.iter().cloned().map(Into::into).collect()
    }

    /// Images to display for this `Building`: its gallery, or its main image
    /// when the gallery is empty.
    #[must_use]
    pub fn display_images(&self) -> Vec<text::ImageUrl> {
        self.0
            .building
            .display_images()
            .into_iter()
            .cloned()
            .map(Into::into)
            .collect()
    }

    /// Construction phases of this `Building` in order.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Building.timeline",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn timeline(&self, ctx: &Context) -> Result<Vec<Phase>, Error> {
        let phases = self.0.building.timeline.phases();
        if phases.is_empty() {
            return Ok(vec![]);
        }

        let masters: Arc<[MasterPhase]> = ctx
            .service()
            .execute(Degraded(query::timeline::MasterPhases::by(())))
            .await
            .map_err(AsError::into_error)?
            .into();
        Ok(phases
            .iter()
            .enumerate()
            .map(|(index, phase)| Phase {
                phase: phase.clone(),
                index,
                masters: Arc::clone(&masters),
            })
            .collect())
    }

    /// Construction progress of this `Building` in percents.
    #[must_use]
    pub fn progress(&self) -> i32 {
        self.0.building.timeline.progress().into()
    }

    /// Number of `Unit`s in this `Building`.
    #[must_use]
    pub fn total_units(&self) -> i32 {
        api::widen(self.0.stats.total_units)
    }

    /// Number of available `Unit`s in this `Building`.
    #[must_use]
    pub fn available_units(&self) -> i32 {
        api::widen(self.0.stats.available_units)
    }

    /// Available `Unit`s of this `Building` ordered by their floor.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Building.units",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn units(&self, ctx: &Context) -> Result<Vec<api::Unit>, Error> {
        ctx.service()
            .execute(Degraded(query::units::List::by(
                read::unit::list::Selector::AvailableByBuilding(
                    self.0.building.id.clone(),
                ),
            )))
            .await
            .map_err(AsError::into_error)
            .map(|list| list.into_iter().map(Into::into).collect())
    }

    /// `DateTime` when this `Building` was created.
    #[must_use]
    pub fn created_at(&self) -> DateTime {
        self.0.building.created_at.coerce()
    }

    /// `DateTime` when this `Building` was last modified.
    #[must_use]
    pub fn updated_at(&self) -> DateTime {
        self.0.building.updated_at.coerce()
    }
}

/// Unique identifier of a `Building`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "BuildingId", with = scalar::Via::<domain::building::Id>)]
pub struct Id(domain::building::Id);

/// Street address of a `Building`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "BuildingAddress",
    with = scalar::Via::<domain::building::Address>,
)]
pub struct Address(domain::building::Address);

/// Sales status of a `Building`.
#[derive(Clone, Copy, Debug, GraphQLEnum)]
#[graphql(name = "BuildingStatus")]
pub enum Status {
    /// Units are available for sale.
    Available,

    /// Sales will open soon.
    ComingSoon,

    /// No units left for sale.
    SoldOut,
}

impl From<domain::building::Status> for Status {
    fn from(status: domain::building::Status) -> Self {
        use domain::building::Status as S;
        match status {
            S::Available => Self::Available,
            S::ComingSoon => Self::ComingSoon,
            S::SoldOut => Self::SoldOut,
        }
    }
}

impl From<Status> for domain::building::Status {
    fn from(status: Status) -> Self {
        match status {
            Status::Available => Self::Available,
            Status::ComingSoon => Self::ComingSoon,
            Status::SoldOut => Self::SoldOut,
        }
    }
}

/// Construction phase of a [`Building`].
#[derive(Clone, Debug)]
pub struct Phase {
    /// Underlying [`timeline::Phase`].
    phase: timeline::Phase,

    /// Index of this [`Phase`] in its timeline.
    index: usize,

    /// [`MasterPhase`]s legacy [`Phase`]s are named after.
    masters: Arc<[MasterPhase]>,
}

/// Construction phase of a `Building`.
#[graphql_object(name = "TimelinePhase", context = Context)]
impl Phase {
    /// Stable identifier of this `TimelinePhase`.
    #[must_use]
    pub fn id(&self) -> juniper::ID {
        juniper::ID::new(self.phase.id().to_string())
    }

    /// 0-based index of this `TimelinePhase` used to edit it.
    #[must_use]
    pub fn index(&self) -> i32 {
        api::widen(self.index)
    }

    /// 1-based position of this `TimelinePhase`.
    #[must_use]
    pub fn order(&self) -> i32 {
        self.phase.order().into()
    }

    /// English label of this `TimelinePhase`.
    #[must_use]
    pub fn label(&self) -> PhaseLabel {
        self.phase.label().clone().into()
    }

    /// Arabic label of this `TimelinePhase`, if any.
    #[must_use]
    pub fn label_ar(&self) -> Option<PhaseLabel> {
        self.phase.label_ar().cloned().map(Into::into)
    }

    /// Name of this `TimelinePhase` to display in the provided `Language`.
    #[must_use]
    pub fn display_name(&self, lang: Option<Language>) -> &str {
        self.phase
            .display_name(lang.unwrap_or_default(), &self.masters)
    }

    /// Status of this `TimelinePhase`.
    #[must_use]
    pub fn status(&self) -> PhaseStatus {
        self.phase.status().into()
    }
}

/// Label of a construction phase, possibly empty while being edited.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "TimelinePhaseLabel",
    with = scalar::Via::<timeline::Label>,
)]
pub struct PhaseLabel(timeline::Label);

/// Status of a construction phase.
#[derive(Clone, Copy, Debug, GraphQLEnum)]
#[graphql(name = "TimelinePhaseStatus")]
pub enum PhaseStatus {
    /// Work has not started yet.
    Upcoming,

    /// Work is ongoing.
    InProgress,

    /// Work is done.
    Completed,
}

impl From<timeline::Status> for PhaseStatus {
    fn from(status: timeline::Status) -> Self {
        match status {
            timeline::Status::Upcoming => Self::Upcoming,
            timeline::Status::InProgress => Self::InProgress,
            timeline::Status::Completed => Self::Completed,
        }
    }
}

impl From<PhaseStatus> for timeline::Status {
    fn from(status: PhaseStatus) -> Self {
        match status {
            PhaseStatus::Upcoming => Self::Upcoming,
            PhaseStatus::InProgress => Self::InProgress,
            PhaseStatus::Completed => Self::Completed,
        }
    }
}

/// Direction to move a construction phase in.
#[derive(Clone, Copy, Debug, GraphQLEnum)]
#[graphql(name = "TimelinePhaseDirection")]
pub enum PhaseDirection {
    /// Towards the beginning of the timeline.
    Up,

    /// Towards the end of the timeline.
    Down,
}

impl From<PhaseDirection> for timeline::Direction {
    fn from(direction: PhaseDirection) -> Self {
        match direction {
            PhaseDirection::Up => Self::Up,
            PhaseDirection::Down => Self::Down,
        }
    }
}

/// Reference construction phase.
#[derive(Clone, Debug, From)]
pub struct Master(MasterPhase);

/// Reference construction phase offered for new timelines.
#[graphql_object(name = "MasterPhase", context = Context)]
impl Master {
    /// Identifier of this `MasterPhase`, matched by labels of legacy
    /// `TimelinePhase`s.
    #[must_use]
    pub fn id(&self) -> &str {
        self.0.id.as_str()
    }

    /// Name of this `MasterPhase`.
    #[must_use]
    pub fn name(&self) -> api::BilingualText {
        (&self.0.name).into()
    }

    /// Description of this `MasterPhase`.
    #[must_use]
    pub fn description(&self) -> api::BilingualText {
        (&self.0.description).into()
    }

    /// Typical duration of this `MasterPhase` in days, if known.
    #[must_use]
    pub fn typical_duration_days(&self) -> Option<i32> {
        self.0.typical_duration_days.map(Into::into)
    }

    /// Position of this `MasterPhase` among the others.
    #[must_use]
    pub fn display_order(&self) -> i32 {
        self.0.display_order
    }
}

/// Construction phase of a `Building` being created or updated.
#[derive(Clone, Debug, GraphQLInputObject)]
#[graphql(name = "TimelinePhaseInput")]
pub struct PhaseInput {
    /// English label.
    pub label: PhaseLabel,

    /// Arabic label.
    pub label_ar: Option<PhaseLabel>,

    /// Status.
    pub status: PhaseStatus,
}

/// Editable fields of a `Building`.
#[derive(Clone, Debug, GraphQLInputObject)]
#[graphql(name = "BuildingInput")]
pub struct Input {
    /// ID of the `City` the `Building` is located in.
    pub city_id: api::city::Id,

    /// English name.
    pub name: text::Name,

    /// Arabic name.
    pub name_ar: Option<text::Name>,

    /// English description.
    pub description: text::Description,

    /// Arabic description.
    pub description_ar: Option<text::Description>,

    /// Street address.
    pub address: Option<Address>,

    /// Latitude on the map.
    pub latitude: Option<f64>,

    /// Longitude on the map.
    pub longitude: Option<f64>,

    /// Number of floors.
    pub floors: i32,

    /// Sales status.
    pub status: Status,

    /// Main image.
    pub image: Option<text::ImageUrl>,

    /// Gallery images, at most 8.
    pub gallery: Option<Vec<text::ImageUrl>>,

    /// Construction phases in order.
    ///
    /// Omitting them on update keeps the current ones.
    pub timeline: Option<Vec<PhaseInput>>,
}

/// [`Input`] parsed into domain values.
#[derive(Debug)]
pub(crate) struct Parsed {
    /// ID of the [`domain::City`].
    pub(crate) city_id: domain::city::Id,

    /// Name of the [`domain::Building`].
    pub(crate) name: common::Bilingual<domain::Name>,

    /// Description of the [`domain::Building`].
    pub(crate) description: common::Bilingual<domain::Description>,

    /// Address of the [`domain::Building`].
    pub(crate) address: Option<domain::building::Address>,

    /// Coordinate of the [`domain::Building`].
    pub(crate) coordinate: Option<domain::geo::Coordinate>,

    /// Floors of the [`domain::Building`].
    pub(crate) floors: domain::building::Floors,

    /// Status of the [`domain::Building`].
    pub(crate) status: domain::building::Status,

    /// Main image of the [`domain::Building`].
    pub(crate) image: Option<domain::ImageUrl>,

    /// Gallery of the [`domain::Building`].
    pub(crate) gallery: domain::building::Gallery,

    /// Timeline of the [`domain::Building`], if provided.
    pub(crate) timeline: Option<domain::building::Timeline>,
}

impl Input {
    /// Parses this [`Input`] into domain values.
    ///
    /// # Errors
    ///
    /// Errors if the coordinate, floors or gallery are invalid.
    pub(crate) fn parse(self) -> Result<Parsed, Error> {
        let Self {
            city_id,
            name,
            name_ar,
            description,
            description_ar,
            address,
            latitude,
            longitude,
            floors,
            status,
            image,
            gallery,
            timeline,
        } = self;

        Ok(Parsed {
            city_id: city_id.into(),
            name: text::bilingual(name, name_ar),
            description: text::bilingual(description, description_ar),
            address: address.map(Into::into),
            coordinate: api::city::coordinate(latitude, longitude)?,
            floors: domain::building::Floors::new(api::narrow(floors)?),
            status: status.into(),
            image: image.map(Into::into),
            gallery: domain::building::Gallery::new(
                gallery
                    .unwrap_or_default()
                    .into_iter()
                    .map(Into::into)
                    .collect(),
            )
            .ok_or_else(|| Error::from(api::InputError::GalleryTooLarge))?,
            timeline: timeline.map(|phases| {
                domain::building::Timeline::new(
                    phases
                        .into_iter()
                        .zip(1..)
                        .map(|(p, order)| {
                            timeline::Phase::new(
                                p.label.into(),
                                p.label_ar
                                    .map_or_else(timeline::Label::empty, Into::into),
                                p.status.into(),
                                order,
                            )
                        })
                        .collect(),
                )
            }),
        })
    }
}

#[cfg(test)]
mod spec {
    use service::domain::{self, building::timeline};

    use crate::api::{city, text};

    use super::{Input, PhaseInput, PhaseLabel, PhaseStatus, Status};

    fn input() -> Input {
        Input {
            city_id: city::Id::from(domain::city::Id::new("new-cairo").unwrap()),
            name: text::Name::from(domain::Name::new("Nile Tower").unwrap()),
            name_ar: None,
            description: text::Description::from(
                domain::Description::new("").unwrap(),
            ),
            description_ar: None,
            address: None,
            latitude: None,
            longitude: None,
            floors: 12,
            status: Status::Available,
            image: None,
            gallery: None,
            timeline: None,
        }
    }

    fn label(s: &str) -> PhaseLabel {
        PhaseLabel::from(timeline::Label::new(s).unwrap())
    }

    #[test]
    fn numbers_phases_in_input_order() {
        let parsed = Input {
            timeline: Some(vec![
                PhaseInput {
                    label: label("Foundation"),
                    label_ar: Some(label("الأساسات")),
                    status: PhaseStatus::Completed,
                },
                PhaseInput {
                    label: label("Finishing"),
                    label_ar: None,
                    status: PhaseStatus::Upcoming,
                },
            ]),
            ..input()
        }
        .parse()
        .unwrap();

        let timeline = parsed.timeline.unwrap();
        let phases = timeline.phases();
        assert_eq!(phases.len(), 2);
        assert_eq!(phases[0].label().as_str(), "Foundation");
        assert_eq!(phases[0].order(), 1);
        assert_eq!(phases[1].label().as_str(), "Finishing");
        assert_eq!(phases[1].label_ar(), None);
        assert_eq!(phases[1].order(), 2);
        assert_eq!(timeline.progress(), 50);
    }

    #[test]
    fn rejects_oversized_gallery() {
        let image = |n| {
            text::ImageUrl::from(
                domain::ImageUrl::new(format!("https://cdn.example.com/{n}"))
                    .unwrap(),
            )
        };

        let err = Input {
            gallery: Some((0..9).map(image).collect()),
            ..input()
        }
        .parse()
        .unwrap_err();
        assert_eq!(err.code, "GALLERY_TOO_LARGE");

        let err = Input {
            floors: -1,
            ..input()
        }
        .parse()
        .unwrap_err();
        assert_eq!(err.code, "NUMBER_OUT_OF_RANGE");
    }
}
