//! GraphQL [`Mutation`]s definitions.

use juniper::graphql_object;
use service::{
    command,
    domain::building::timeline::{self, Edit},
    Command as _,
};

use crate::{api, define_error, AsError, Context, Error};

/// Root of all GraphQL mutations.
#[derive(Clone, Copy, Debug)]
pub struct Mutation;

impl Mutation {
    /// Name of the [`tracing::Span`] for the mutations.
    const SPAN_NAME: &'static str = "GraphQL mutation";
}

#[graphql_object(context = Context)]
impl Mutation {
    /// Signs an `Admin` in with the provided credentials.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `WRONG_CREDENTIALS` - provided credentials does not match any
    ///                         `Admin`.
    #[tracing::instrument(
        skip_all,
        fields(
            email = %email,
            gql.name = "createAdminSession",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn create_admin_session(
        email: api::inquiry::Email,
        password: api::admin::Password,
        ctx: &Context,
    ) -> Result<api::admin::session::CreateResult, Error> {
        let output = ctx
            .service()
            .execute(command::CreateAdminSession {
                email: email.into(),
                password: secrecy::SecretBox::init_with(move || {
                    password.into()
                }),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?;

        ctx.sign_in(output.token.clone(), output.session).await;

        Ok(output.into())
    }

    /// Signs the current `Admin` out.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request is not authorized.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "deleteAdminSession",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn delete_admin_session(ctx: &Context) -> Result<bool, Error> {
        let session_id = ctx.current_session().await?.id;
        ctx.service()
            .execute(command::DeleteAdminSession { session_id })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?;
        ctx.sign_out().await;
        Ok(true)
    }

    /// Creates a new `City` identified by the slug of its English name.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request is not authorized;
    /// - `INVALID_COORDINATE` - provided coordinate is invalid;
    /// - `CITY_EXISTS` - a `City` with the same slug already exists.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "createCity",
            name = %input.name,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn create_city(
        input: api::city::Input,
        ctx: &Context,
    ) -> Result<api::City, Error> {
        _ = ctx.current_session().await?;
        let api::city::Parsed {
            name,
            description,
            location,
            coordinate,
            status,
            hero_image,
        } = input.parse().map_err(ctx.error())?;

        ctx.service()
            .execute(command::CreateCity {
                name,
                description,
                location,
                coordinate,
                status,
                hero_image,
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|city| api::City::from(service::read::city::Enriched {
                city,
                stats: service::read::city::Stats::default(),
            }))
    }

    /// Replaces every editable field of the `City` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request is not authorized;
    /// - `INVALID_COORDINATE` - provided coordinate is invalid;
    /// - `CITY_NOT_EXISTS` - the `City` does not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "updateCity",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn update_city(
        id: api::city::Id,
        input: api::city::Input,
        ctx: &Context,
    ) -> Result<api::City, Error> {
        _ = ctx.current_session().await?;
        let api::city::Parsed {
            name,
            description,
            location,
            coordinate,
            status,
            hero_image,
        } = input.parse().map_err(ctx.error())?;

        ctx.service()
            .execute(command::UpdateCity {
                id: id.into(),
                name,
                description,
                location,
                coordinate,
                status,
                hero_image,
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|city| api::City::from(service::read::city::Enriched {
                city,
                stats: service::read::city::Stats::default(),
            }))
    }

    /// Deletes the `City` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request is not authorized;
    /// - `CITY_NOT_EXISTS` - the `City` does not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "deleteCity",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn delete_city(
        id: api::city::Id,
        ctx: &Context,
    ) -> Result<bool, Error> {
        _ = ctx.current_session().await?;
        ctx.service()
            .execute(command::DeleteCity { id: id.into() })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|()| true)
    }

    /// Creates a new `Building` in an existing `City`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request is not authorized;
    /// - `GALLERY_TOO_LARGE` - more than 8 gallery images are provided;
    /// - `CITY_NOT_EXISTS` - the `City` does not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            city_id = %input.city_id,
            gql.name = "createBuilding",
            name = %input.name,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn create_building(
        input: api::building::Input,
        ctx: &Context,
    ) -> Result<api::Building, Error> {
        _ = ctx.current_session().await?;
        let api::building::Parsed {
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
        } = input.parse().map_err(ctx.error())?;

        ctx.service()
            .execute(command::CreateBuilding {
                city_id,
                name,
                description,
                address,
                coordinate,
                floors,
                status,
                image,
                gallery,
                timeline: timeline.unwrap_or_default(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Replaces every editable field of the `Building` with the specified ID.
    ///
    /// The construction timeline is kept when omitted.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request is not authorized;
    /// - `GALLERY_TOO_LARGE` - more than 8 gallery images are provided;
    /// - `BUILDING_NOT_EXISTS` - the `Building` does not exist;
    /// - `CITY_NOT_EXISTS` - the `City` does not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "updateBuilding",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn update_building(
        id: api::building::Id,
        input: api::building::Input,
        ctx: &Context,
    ) -> Result<api::Building, Error> {
        _ = ctx.current_session().await?;
        let api::building::Parsed {
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
        } = input.parse().map_err(ctx.error())?;

        ctx.service()
            .execute(command::UpdateBuilding {
                id: id.into(),
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
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Deletes the `Building` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request is not authorized;
    /// - `BUILDING_NOT_EXISTS` - the `Building` does not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "deleteBuilding",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn delete_building(
        id: api::building::Id,
        ctx: &Context,
    ) -> Result<bool, Error> {
        _ = ctx.current_session().await?;
        ctx.service()
            .execute(command::DeleteBuilding { id: id.into() })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|()| true)
    }

    /// Appends an empty upcoming phase to the timeline of the `Building`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request is not authorized;
    /// - `BUILDING_NOT_EXISTS` - the `Building` does not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            building_id = %building_id,
            gql.name = "addTimelinePhase",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn add_timeline_phase(
        building_id: api::building::Id,
        ctx: &Context,
    ) -> Result<api::Building, Error> {
        edit_timeline(building_id, Edit::Add, ctx).await
    }

    /// Removes the phase at the specified index from the timeline of the
    /// `Building`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request is not authorized;
    /// - `BUILDING_NOT_EXISTS` - the `Building` does not exist;
    /// - `PHASE_INDEX_OUT_OF_BOUNDS` - there is no phase at the index.
    #[tracing::instrument(
        skip_all,
        fields(
            building_id = %building_id,
            gql.name = "removeTimelinePhase",
            index = index,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn remove_timeline_phase(
        building_id: api::building::Id,
        index: i32,
        ctx: &Context,
    ) -> Result<api::Building, Error> {
        let index = phase_index(index);
        edit_timeline(building_id, Edit::Remove { index }, ctx).await
    }

    /// Moves the phase at the specified index one position in the specified
    /// direction.
    ///
    /// Moving the first phase up or the last one down changes nothing.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request is not authorized;
    /// - `BUILDING_NOT_EXISTS` - the `Building` does not exist;
    /// - `PHASE_INDEX_OUT_OF_BOUNDS` - there is no phase at the index.
    #[tracing::instrument(
        skip_all,
        fields(
            building_id = %building_id,
            direction = ?direction,
            gql.name = "moveTimelinePhase",
            index = index,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn move_timeline_phase(
        building_id: api::building::Id,
        index: i32,
        direction: api::building::PhaseDirection,
        ctx: &Context,
    ) -> Result<api::Building, Error> {
        let edit = Edit::Move {
            index: phase_index(index),
            direction: direction.into(),
        };
        edit_timeline(building_id, edit, ctx).await
    }

    /// Sets the English label of the phase at the specified index.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request is not authorized;
    /// - `BUILDING_NOT_EXISTS` - the `Building` does not exist;
    /// - `PHASE_INDEX_OUT_OF_BOUNDS` - there is no phase at the index.
    #[tracing::instrument(
        skip_all,
        fields(
            building_id = %building_id,
            gql.name = "setTimelinePhaseLabel",
            index = index,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn set_timeline_phase_label(
        building_id: api::building::Id,
        index: i32,
        label: api::building::PhaseLabel,
        ctx: &Context,
    ) -> Result<api::Building, Error> {
        let edit = Edit::Update {
            index: phase_index(index),
            field: timeline::Field::Label(label.into()),
        };
        edit_timeline(building_id, edit, ctx).await
    }

    /// Sets the Arabic label of the phase at the specified index, removing it
    /// when omitted.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request is not authorized;
    /// - `BUILDING_NOT_EXISTS` - the `Building` does not exist;
    /// - `PHASE_INDEX_OUT_OF_BOUNDS` - there is no phase at the index.
    #[tracing::instrument(
        skip_all,
        fields(
            building_id = %building_id,
            gql.name = "setTimelinePhaseLabelAr",
            index = index,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn set_timeline_phase_label_ar(
        building_id: api::building::Id,
        index: i32,
        label: Option<api::building::PhaseLabel>,
        ctx: &Context,
    ) -> Result<api::Building, Error> {
        let edit = Edit::Update {
            index: phase_index(index),
            field: timeline::Field::LabelAr(
                label.map_or_else(timeline::Label::empty, Into::into),
            ),
        };
        edit_timeline(building_id, edit, ctx).await
    }

    /// Sets the status of the phase at the specified index.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request is not authorized;
    /// - `BUILDING_NOT_EXISTS` - the `Building` does not exist;
    /// - `PHASE_INDEX_OUT_OF_BOUNDS` - there is no phase at the index.
    #[tracing::instrument(
        skip_all,
        fields(
            building_id = %building_id,
            gql.name = "setTimelinePhaseStatus",
            index = index,
            otel.name = Self::SPAN_NAME,
            status = ?status,
        ),
    )]
    pub async fn set_timeline_phase_status(
        building_id: api::building::Id,
        index: i32,
        status: api::building::PhaseStatus,
        ctx: &Context,
    ) -> Result<api::Building, Error> {
        let edit = Edit::Update {
            index: phase_index(index),
            field: timeline::Field::Status(status.into()),
        };
        edit_timeline(building_id, edit, ctx).await
    }

    /// Creates a new `Unit` in an existing `Building`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request is not authorized;
    /// - `NUMBER_OUT_OF_RANGE` - a provided number is out of range;
    /// - `INVALID_PRICE` - a provided price is negative;
    /// - `BUILDING_NOT_EXISTS` - the `Building` does not exist;
    /// - `CITY_MISMATCH` - the `City` differs from the one of the `Building`.
    #[tracing::instrument(
        skip_all,
        fields(
            building_id = %input.building_id,
            gql.name = "createUnit",
            number = %input.number,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn create_unit(
        input: api::unit::Input,
        ctx: &Context,
    ) -> Result<api::Unit, Error> {
        _ = ctx.current_session().await?;
        let api::unit::Parsed {
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
        } = input.parse().map_err(ctx.error())?;

        ctx.service()
            .execute(command::CreateUnit {
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
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Replaces every editable field of the `Unit` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request is not authorized;
    /// - `NUMBER_OUT_OF_RANGE` - a provided number is out of range;
    /// - `INVALID_PRICE` - a provided price is negative;
    /// - `UNIT_NOT_EXISTS` - the `Unit` does not exist;
    /// - `BUILDING_NOT_EXISTS` - the `Building` does not exist;
    /// - `CITY_MISMATCH` - the `City` differs from the one of the `Building`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "updateUnit",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn update_unit(
        id: api::unit::Id,
        input: api::unit::Input,
        ctx: &Context,
    ) -> Result<api::Unit, Error> {
        _ = ctx.current_session().await?;
        let api::unit::Parsed {
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
        } = input.parse().map_err(ctx.error())?;

        ctx.service()
            .execute(command::UpdateUnit {
                id: id.into(),
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
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Deletes the `Unit` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request is not authorized;
    /// - `UNIT_NOT_EXISTS` - the `Unit` does not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "deleteUnit",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn delete_unit(
        id: api::unit::Id,
        ctx: &Context,
    ) -> Result<bool, Error> {
        _ = ctx.current_session().await?;
        ctx.service()
            .execute(command::DeleteUnit { id: id.into() })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|()| true)
    }

    /// Submits a new `Inquiry` through a contact or interest form.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_MESSAGE` - the message is too long;
    /// - `CITY_NOT_EXISTS` - the referenced `City` does not exist;
    /// - `UNIT_NOT_EXISTS` - the referenced `Unit` does not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            city_id = ?input.city_id.as_ref().map(ToString::to_string),
            gql.name = "submitInquiry",
            otel.name = Self::SPAN_NAME,
            unit_id = ?input.unit_id.as_ref().map(ToString::to_string),
        ),
    )]
    pub async fn submit_inquiry(
        input: api::inquiry::Input,
        ctx: &Context,
    ) -> Result<api::Inquiry, Error> {
        let cmd = input.parse().map_err(ctx.error())?;
        ctx.service()
            .execute(cmd)
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Deletes the `Inquiry` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request is not authorized;
    /// - `INQUIRY_NOT_EXISTS` - the `Inquiry` does not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "deleteInquiry",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn delete_inquiry(
        id: api::inquiry::Id,
        ctx: &Context,
    ) -> Result<bool, Error> {
        _ = ctx.current_session().await?;
        ctx.service()
            .execute(command::DeleteInquiry { id: id.into() })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|()| true)
    }
}

/// Converts the provided GraphQL phase index into a [`usize`].
///
/// Negative indices become out of bounds of any timeline.
fn phase_index(index: i32) -> usize {
    usize::try_from(index).unwrap_or(usize::MAX)
}

/// Applies the provided [`Edit`] to the timeline of the `Building` with the
/// provided ID.
async fn edit_timeline(
    building_id: api::building::Id,
    edit: Edit,
    ctx: &Context,
) -> Result<api::Building, Error> {
    _ = ctx.current_session().await?;
    ctx.service()
        .execute(command::EditBuildingTimeline {
            building_id: building_id.into(),
            edit,
        })
        .await
        .map_err(AsError::into_error)
        .map_err(ctx.error())
        .map(Into::into)
}

define_error! {
    enum CityError {
        #[code = "CITY_EXISTS"]
        #[status = CONFLICT]
        #[message = "`City` with the same name already exists"]
        Exists,

        #[code = "CITY_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`City` with the provided ID does not exist"]
        NotExists,

        #[code = "CITY_MISMATCH"]
        #[status = CONFLICT]
        #[message = "`Unit` must be located in the `City` of its `Building`"]
        Mismatch,
    }
}

define_error! {
    enum BuildingError {
        #[code = "BUILDING_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Building` with the provided ID does not exist"]
        NotExists,

        #[code = "PHASE_INDEX_OUT_OF_BOUNDS"]
        #[status = BAD_REQUEST]
        #[message = "Timeline has no phase at the provided index"]
        PhaseIndexOutOfBounds,
    }
}

define_error! {
    enum UnitError {
        #[code = "UNIT_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Unit` with the provided ID does not exist"]
        NotExists,
    }
}

impl AsError for command::create_admin_session::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "WRONG_CREDENTIALS"]
                #[status = FORBIDDEN]
                #[message = "Provided credentials does not match any `Admin`"]
                WrongCredentials,
            }
        }

        match self {
            Self::Db(e) => e.try_as_error(),
            Self::JsonWebTokenEncodeError(_) => None,
            Self::WrongCredentials => Some(Error::WrongCredentials.into()),
        }
    }
}

impl AsError for command::create_city::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::CityExists(_) => Some(CityError::Exists.into()),
        }
    }
}

impl AsError for command::update_city::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::CityNotExists(_) => Some(CityError::NotExists.into()),
        }
    }
}

impl AsError for command::delete_city::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::CityNotExists(_) => Some(CityError::NotExists.into()),
        }
    }
}

impl AsError for command::create_building::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::CityNotExists(_) => Some(CityError::NotExists.into()),
        }
    }
}

impl AsError for command::update_building::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::BuildingNotExists(_) => Some(BuildingError::NotExists.into()),
            Self::CityNotExists(_) => Some(CityError::NotExists.into()),
        }
    }
}

impl AsError for command::delete_building::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::BuildingNotExists(_) => Some(BuildingError::NotExists.into()),
        }
    }
}

impl AsError for command::edit_building_timeline::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::BuildingNotExists(_) => Some(BuildingError::NotExists.into()),
            Self::Edit(timeline::EditError::IndexOutOfBounds { .. }) => {
                Some(BuildingError::PhaseIndexOutOfBounds.into())
            }
        }
    }
}

impl AsError for command::create_unit::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::BuildingNotExists(_) => Some(BuildingError::NotExists.into()),
            Self::CityMismatch { .. } => Some(CityError::Mismatch.into()),
        }
    }
}

impl AsError for command::update_unit::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::UnitNotExists(_) => Some(UnitError::NotExists.into()),
            Self::BuildingNotExists(_) => Some(BuildingError::NotExists.into()),
            Self::CityMismatch { .. } => Some(CityError::Mismatch.into()),
        }
    }
}

impl AsError for command::delete_unit::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::UnitNotExists(_) => Some(UnitError::NotExists.into()),
        }
    }
}

impl AsError for command::submit_inquiry::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::CityNotExists(_) => Some(CityError::NotExists.into()),
            Self::UnitNotExists(_) => Some(UnitError::NotExists.into()),
        }
    }
}

impl AsError for command::delete_inquiry::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "INQUIRY_NOT_EXISTS"]
                #[status = NOT_FOUND]
                #[message = "`Inquiry` with the provided ID does not exist"]
                NotExists,
            }
        }

        match self {
            Self::Db(e) => e.try_as_error(),
            Self::InquiryNotExists(_) => Some(Error::NotExists.into()),
        }
    }
}

#[cfg(test)]
mod spec {
    use service::{command, domain::building::timeline::EditError};

    use crate::AsError as _;

    use super::phase_index;

    #[test]
    fn negative_phase_index_is_out_of_bounds() {
        assert_eq!(phase_index(2), 2);
        assert_eq!(phase_index(-1), usize::MAX);
    }

    #[test]
    fn maps_timeline_edit_errors() {
        let err = command::edit_building_timeline::ExecutionError::Edit(
            EditError::IndexOutOfBounds { index: 5, len: 2 },
        )
        .try_as_error()
        .unwrap();

        assert_eq!(err.code, "PHASE_INDEX_OUT_OF_BOUNDS");
        assert_eq!(err.status_code, http::StatusCode::BAD_REQUEST);
    }
}
