//! GraphQL [`Subscription`]s definitions.

use common::DateTime;
use futures::{
    stream::{self, BoxStream},
    FutureExt as _, StreamExt as _,
};
use juniper::graphql_subscription;

use crate::{context, Context, Error};

/// Root of all GraphQL subscription.
#[derive(Clone, Copy, Debug)]
pub struct Subscription;

#[graphql_subscription(context = Context)]
impl Subscription {
    /// Waits for the current `Admin` session to expire, so the back office
    /// signs out in time.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - if the current session is not
    ///                              authenticated or session expired.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "waitAdminSession",
            otel.name = "GraphQL subscription",
        ),
    )]
    pub async fn wait_admin_session(
        &self,
        ctx: &Context,
    ) -> Result<BoxStream<'static, Result<bool, Error>>, Error> {
        let session = ctx.current_session().await?;
        let timeout = session.expires_at - DateTime::now();
        Ok(stream::once(tokio::time::sleep(timeout).map(|()| {
            Err(context::AuthError::AuthorizationRequired.into())
        }))
        .boxed())
    }
}
