//! GraphQL [`Query`]s definitions.

use juniper::graphql_object;
use service::{
    command::{self, Command as _},
    query::{self, Degraded},
    read, Query as _,
};
use tracing as log;

use crate::{api, AsError, Context, Error};

/// Root of all GraphQL queries.
#[derive(Clone, Copy, Debug)]
pub struct Query;

impl Query {
    /// Name of the [`tracing::Span`] for the queries.
    pub(crate) const SPAN_NAME: &'static str = "GraphQL query";
}

#[graphql_object(context = Context)]
impl Query {
    /// Returns active `City`s along with their statistics.
    ///
    /// Degrades to an empty list if the `City`s cannot be loaded.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "cities",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn cities(ctx: &Context) -> Result<Vec<api::City>, Error> {
        ctx.service()
            .execute(Degraded(query::cities::Enriched::ACTIVE))
            .await
            .map_err(AsError::into_error)
            .map(|list| list.into_iter().map(Into::into).collect())
    }

    /// Returns the `City` with the specified ID, if any.
    #[tracing::instrument(
        skip_all,
        fields(
            id = %id,
            gql.name = "city",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn city(
        id: api::city::Id,
        ctx: &Context,
    ) -> Result<Option<api::City>, Error> {
        ctx.service()
            .execute(Degraded(query::city::Enriched(id.into())))
            .await
            .map_err(AsError::into_error)
            .map(|c| c.map(Into::into))
    }

    /// Returns the `Building` with the specified ID, if any.
    #[tracing::instrument(
        skip_all,
        fields(
            id = %id,
            gql.name = "building",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn building(
        id: api::building::Id,
        ctx: &Context,
    ) -> Result<Option<api::Building>, Error> {
        ctx.service()
            .execute(Degraded(query::building::Enriched(id.into())))
            .await
            .map_err(AsError::into_error)
            .map(|b| b.map(Into::into))
    }

    /// Returns `Building`s having a construction timeline.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "timelineBuildings",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn timeline_buildings(
        ctx: &Context,
    ) -> Result<Vec<api::Building>, Error> {
        ctx.service()
            .execute(Degraded(query::buildings::Enriched(
                read::building::list::Selector::WithTimeline,
            )))
            .await
            .map_err(AsError::into_error)
            .map(|list| list.into_iter().map(Into::into).collect())
    }

    /// Returns the `Unit` with the specified ID, if any.
    #[tracing::instrument(
        skip_all,
        fields(
            id = %id,
            gql.name = "unit",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn unit(
        id: api::unit::Id,
        ctx: &Context,
    ) -> Result<Option<api::Unit>, Error> {
        ctx.service()
            .execute(Degraded(query::unit::ById::by(id.into())))
            .await
            .map_err(AsError::into_error)
            .map(|u| u.map(Into::into))
    }

    /// Returns featured available `Unit`s, optionally of the `City` with the
    /// specified ID.
    #[tracing::instrument(
        skip_all,
        fields(
            city_id = ?city_id.as_ref().map(ToString::to_string),
            gql.name = "featuredUnits",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn featured_units(
        city_id: Option<api::city::Id>,
        ctx: &Context,
    ) -> Result<Vec<api::Unit>, Error> {
        api::unit::featured(city_id.map(Into::into), ctx).await
    }

    /// Searches available `Unit`s matching the provided `filter`, cheapest
    /// first.
    ///
    /// The search is logged for analytics, without failing the request if
    /// the logging fails.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_PRICE` - the provided price bounds are invalid;
    /// - `NUMBER_OUT_OF_RANGE` - the provided area bounds are invalid.
    #[tracing::instrument(
        skip_all,
        fields(
            filter = ?filter,
            gql.name = "searchUnits",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn search_units(
        filter: Option<api::unit::SearchFilter>,
        ctx: &Context,
    ) -> Result<Vec<api::Unit>, Error> {
        let filter = filter.unwrap_or_default().parse()?;

        let (units, logged) = futures::join!(
            ctx.service().execute(Degraded(query::units::List::by(
                read::unit::list::Selector::Search(filter.clone()),
            ))),
            ctx.service().execute(command::LogSearchQuery { filter }),
        );
        if let Err(e) = logged {
            log::warn!("failed to log search query: {e}");
        }
        units
            .map_err(AsError::into_error)
            .map(|list| list.into_iter().map(Into::into).collect())
    }

    /// Returns reference construction phases by their display order.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "masterPhases",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn master_phases(
        ctx: &Context,
    ) -> Result<Vec<api::building::Master>, Error> {
        ctx.service()
            .execute(Degraded(query::timeline::MasterPhases::by(())))
            .await
            .map_err(AsError::into_error)
            .map(|list| list.into_iter().map(Into::into).collect())
    }

    /// Returns achievement counters of the home page.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "counters",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn counters(
        ctx: &Context,
    ) -> Result<Vec<api::content::Counter>, Error> {
        ctx.service()
            .execute(query::content::Counters)
            .await
            .map_err(AsError::into_error)
            .map(|list| list.into_iter().map(Into::into).collect())
    }

    /// Returns the hero banner of the home page.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "hero",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn hero(ctx: &Context) -> Result<api::content::Hero, Error> {
        ctx.service()
            .execute(query::content::Hero)
            .await
            .map_err(AsError::into_error)
            .map(Into::into)
    }

    /// Returns client testimonials.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "testimonials",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn testimonials(
        ctx: &Context,
    ) -> Result<Vec<api::content::Testimonial>, Error> {
        ctx.service()
            .execute(query::content::Testimonials)
            .await
            .map_err(AsError::into_error)
            .map(|list| list.into_iter().map(Into::into).collect())
    }

    /// Returns the currently authenticated `Admin`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request is not authorized.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "myAdmin",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn my_admin(ctx: &Context) -> Result<api::Admin, Error> {
        let token = ctx.current_session().await?.token;
        ctx.service()
            .execute(command::AuthorizeAdminSession { token })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|out| out.admin.into())
    }

    /// Returns every `City` for the back office, newest first.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request is not authorized.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "adminCities",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn admin_cities(ctx: &Context) -> Result<Vec<api::City>, Error> {
        _ = ctx.current_session().await?;
        ctx.service()
            .execute(query::cities::Enriched(read::city::list::Selector::All))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|list| list.into_iter().map(Into::into).collect())
    }

    /// Returns every `Building` for the back office, newest first.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request is not authorized.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "adminBuildings",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn admin_buildings(
        ctx: &Context,
    ) -> Result<Vec<api::Building>, Error> {
        _ = ctx.current_session().await?;
        ctx.service()
            .execute(query::buildings::Enriched(
                read::building::list::Selector::All,
            ))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|list| list.into_iter().map(Into::into).collect())
    }

    /// Returns every `Unit` for the back office, newest first, optionally
    /// narrowed down to a `City` or a `Building`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request is not authorized.
    #[tracing::instrument(
        skip_all,
        fields(
            building_id = ?building_id.as_ref().map(ToString::to_string),
            city_id = ?city_id.as_ref().map(ToString::to_string),
            gql.name = "adminUnits",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn admin_units(
        city_id: Option<api::city::Id>,
        building_id: Option<api::building::Id>,
        ctx: &Context,
    ) -> Result<Vec<api::Unit>, Error> {
        _ = ctx.current_session().await?;
        ctx.service()
            .execute(query::units::List::by(read::unit::list::Selector::All {
                city_id: city_id.map(Into::into),
                building_id: building_id.map(Into::into),
            }))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|list| list.into_iter().map(Into::into).collect())
    }

    /// Returns submitted `Inquiry`s, newest first, optionally filtered by a
    /// `City` and a date window.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request is not authorized.
    #[tracing::instrument(
        skip_all,
        fields(
            city_id = ?city_id.as_ref().map(ToString::to_string),
            gql.name = "inquiries",
            otel.name = Self::SPAN_NAME,
            window = ?window,
        ),
    )]
    pub async fn inquiries(
        city_id: Option<api::city::Id>,
        window: Option<api::inquiry::Window>,
        ctx: &Context,
    ) -> Result<Vec<api::Inquiry>, Error> {
        _ = ctx.current_session().await?;
        ctx.service()
            .execute(query::inquiries::List(read::inquiry::Filter {
                city_id: city_id.map(Into::into),
                window: window.map(Into::into),
            }))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|list| list.into_iter().map(Into::into).collect())
    }
}
