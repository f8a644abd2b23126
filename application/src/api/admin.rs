//! [`Admin`]-related definitions.

use common::DateTime;
use derive_more::{AsRef, Display, From, Into};
use juniper::{graphql_object, GraphQLScalar};
use service::domain;
use uuid::Uuid;

use crate::{
    api::{self, scalar},
    Context,
};

/// Back office administrator.
#[derive(Clone, Debug, From)]
pub struct Admin(domain::Admin);

/// Back office administrator.
#[graphql_object(context = Context)]
impl Admin {
    /// Unique identifier of this `Admin`.
    #[must_use]
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// Email this `Admin` signs in with.
    #[must_use]
    pub fn email(&self) -> api::inquiry::Email {
        self.0.email.clone().into()
    }

    /// `DateTime` when this `Admin` was created.
    #[must_use]
    pub fn created_at(&self) -> DateTime {
        self.0.created_at.coerce()
    }
}

/// Unique identifier of an `Admin`.
#[derive(
    Clone, Copy, Debug, Display, Eq, From, GraphQLScalar, Into, PartialEq,
)]
#[from(domain::admin::Id)]
#[into(domain::admin::Id)]
#[graphql(name = "AdminId", transparent)]
pub struct Id(Uuid);

/// Password of an `Admin`.
#[derive(AsRef, Clone, Debug, From, GraphQLScalar, Into)]
#[graphql(
    name = "AdminPassword",
    with = scalar::Via::<domain::admin::Password>,
)]
pub struct Password(domain::admin::Password);

pub mod session {
    //! [`Session`]-related definitions.
    //!
    //! [`Session`]: crate::Session

    use common::DateTime;
    use derive_more::{AsRef, From, Into};
    use juniper::{GraphQLObject, GraphQLScalar};
    use service::{command, domain};

    use crate::{
        api::{self, scalar},
        Context,
    };

    /// `Session` access token.
    #[derive(AsRef, Clone, Debug, From, GraphQLScalar, Into)]
    #[graphql(
        name = "AdminAuthToken",
        with = scalar::Via::<domain::admin::session::Token>,
    )]
    pub struct Token(domain::admin::session::Token);

    /// Result of a `Session` creation.
    #[derive(Clone, Debug, From, GraphQLObject)]
    #[graphql(context = Context, name = "CreateAdminSessionResult")]
    pub struct CreateResult {
        /// Access token of the created `Session`.
        pub token: Token,

        /// `Admin` associated with the created `Session`.
        pub admin: api::Admin,

        /// `DateTime` when the created `Session` expires.
        pub expires_at: DateTime,
    }

    impl From<command::create_admin_session::Output> for CreateResult {
        fn from(output: command::create_admin_session::Output) -> Self {
            let command::create_admin_session::Output {
                token,
                session,
                admin,
            } = output;
            Self {
                token: token.into(),
                admin: admin.into(),
                expires_at: session.expires_at.coerce(),
            }
        }
    }
}
