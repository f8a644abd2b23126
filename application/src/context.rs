//! [`Context`]-related definitions.

use std::sync::atomic::{self, AtomicU16};

use axum::{async_trait, extract::FromRequestParts, RequestPartsExt as _};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use common::DateTime;
use juniper::{
    http::{GraphQLBatchResponse, GraphQLResponse},
    IntoFieldError as _,
};
use service::{
    command::{self, Command as _},
    domain::admin::{self, session, Gate},
};
use tokio::sync::Mutex;
use tracing as log;

#[cfg(doc)]
use crate::api::Admin;
use crate::{api, define_error, AsError, Error, JuniperResponse, Service};

/// Context of a single GraphQL request.
#[derive(Debug)]
pub struct Context {
    /// [`Service`] instance.
    service: Service,

    /// Status code of the response, if the request fails.
    error_status_code: AtomicU16,

    /// Parts of the HTTP request.
    parts: http::request::Parts,

    /// Back office [`Auth`] state, resolved on first demand.
    auth: Mutex<Option<Auth>>,
}

/// Back office authentication state of a [`Context`].
#[derive(Clone, Debug, Default)]
struct Auth {
    /// Current [`Gate`].
    gate: Gate,

    /// [`session::Token`] of the [`Gate`]'s session, if authenticated.
    token: Option<session::Token>,
}

impl Auth {
    /// Returns the current [`Session`] of this [`Auth`], if it's not expired
    /// at the provided [`DateTime`].
    fn session(&mut self, now: DateTime) -> Option<Session> {
        self.gate = self.gate.expire_if_due(now.coerce());
        let session = self.gate.session()?;
        let token = self.token.clone()?;
        Some(Session {
            id: session.id,
            admin_id: session.admin_id.into(),
            token,
            expires_at: session.expires_at.coerce(),
        })
    }
}

impl Context {
    /// Returns [`Service`] instance of this [`Context`].
    #[must_use]
    pub fn service(&self) -> &Service {
        &self.service
    }

    /// Returns the status code to respond with if the request fails.
    #[must_use]
    pub fn error_status_code(&self) -> http::StatusCode {
        http::StatusCode::from_u16(
            self.error_status_code.load(atomic::Ordering::Relaxed),
        )
        .unwrap_or(http::StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Sets the status code to respond with if the request fails.
    pub fn set_error_status_code(&self, status_code: http::StatusCode) {
        self.error_status_code
            .store(status_code.as_u16(), atomic::Ordering::Relaxed);
    }

    /// Helper method calling [`Context::set_error_status_code()`] inside
    /// [`Result::map_err()`] closure.
    pub fn error(&self) -> impl FnOnce(Error) -> Error + '_ {
        move |err| {
            self.set_error_status_code(err.status_code);
            err
        }
    }

    /// Signs this [`Context`] in with the provided [`admin::Session`] and its
    /// [`session::Token`], replacing the request credentials.
    pub async fn sign_in(
        &self,
        token: session::Token,
        session: admin::Session,
    ) {
        let mut auth = self.auth.lock().await;
        let auth = auth.get_or_insert_with(Auth::default);
        auth.gate = auth.gate.sign_in(session);
        auth.token = Some(token);
    }

    /// Signs this [`Context`] out.
    pub async fn sign_out(&self) {
        let mut auth = self.auth.lock().await;
        let auth = auth.get_or_insert_with(Auth::default);
        auth.gate = auth.gate.sign_out();
        auth.token = None;
    }

    /// Returns the current [`Session`] of this [`Context`].
    ///
    /// # Errors
    ///
    /// Errors if:
    /// - the current HTTP request is not authorized;
    /// - the provided authentication token is invalid;
    /// - the [`Session`] has expired.
    pub async fn current_session(&self) -> Result<Session, Error> {
        let mut auth = self.auth.lock().await;
        if auth.is_none() {
            *auth = Some(self.authenticate().await.map_err(self.error())?);
        }
        auth.as_mut()
            .and_then(|a| a.session(DateTime::now()))
            .ok_or_else(|| AuthError::AuthorizationRequired.into())
            .map_err(self.error())
    }

    /// Applies the [`juniper::Variables`] provided by the client on GraphQL
    /// subscription initialization.
    ///
    /// # Errors
    ///
    /// Errors if the provided variables are invalid.
    pub(crate) fn apply_subscription_variables(
        &mut self,
        vars: &juniper::Variables,
    ) -> Result<(), Error> {
        let Some(token) = vars.get("authToken") else {
            return Ok(());
        };
        let header = token
            .as_string_value()
            .and_then(|t| format!("Bearer {t}").parse().ok())
            .ok_or_else(|| Error::from(AuthError::InvalidVariables))?;
        drop(
            self.parts
                .headers
                .insert(http::header::AUTHORIZATION, header),
        );
        Ok(())
    }

    /// Authenticates the request by its `Authorization` header.
    ///
    /// Missing or rejected credentials resolve into an anonymous [`Auth`].
    ///
    /// # Errors
    ///
    /// Errors if the header is malformed, or the credentials cannot be
    /// checked.
    async fn authenticate(&self) -> Result<Auth, Error> {
        let bearer = match self
            .parts
            .clone()
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
        {
            Ok(TypedHeader(Authorization(bearer))) => bearer,
            Err(e) if e.is_missing() => return Ok(Auth::default()),
            Err(e) => return Err(e.into_error()),
        };

        #[expect(unsafe_code, reason = "specified in correct header")]
        let token =
            unsafe { session::Token::new_unchecked(bearer.token().to_owned()) };
        match self
            .service
            .execute(command::AuthorizeAdminSession {
                token: token.clone(),
            })
            .await
        {
            Ok(out) => Ok(Auth {
                gate: Gate::default().sign_in(out.session),
                token: Some(token),
            }),
            Err(e) => {
                use command::authorize_admin_session::ExecutionError as E;

                match e.as_ref() {
                    E::Db(_) => Err(e.into_error()),
                    E::JsonWebTokenDecodeError(_)
                    | E::SessionNotExists(_)
                    | E::AdminNotExists(_) => {
                        log::debug!("rejected admin credentials: {e}");
                        Ok(Auth::default())
                    }
                }
            }
        }
    }
}

impl juniper::Context for Context {}

#[async_trait]
impl<S> FromRequestParts<S> for Context
where
    S: Send + Sync,
{
    type Rejection = JuniperResponse;

    async fn from_request_parts(
        parts: &mut http::request::Parts,
        _: &S,
    ) -> Result<Self, Self::Rejection> {
        let service =
            parts.extensions.get::<Service>().cloned().ok_or_else(|| {
                JuniperResponse {
                    status_code: http::StatusCode::INTERNAL_SERVER_ERROR,
                    response: GraphQLBatchResponse::Single(
                        GraphQLResponse::error(
                            Error::internal(&"missing `Service` extension")
                                .into_field_error(),
                        ),
                    ),
                }
            })?;

        Ok(Self {
            service,
            error_status_code: AtomicU16::new(
                http::StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
            ),
            parts: parts.clone(),
            auth: Mutex::new(None),
        })
    }
}

/// Signed-in [`Admin`] session of a request.
#[derive(Clone, Debug)]
pub struct Session {
    /// ID of this [`Session`].
    pub id: session::Id,

    /// ID of the [`Admin`] associated with this [`Session`].
    pub admin_id: api::admin::Id,

    /// Authentication token.
    pub token: session::Token,

    /// [`DateTime`] when this [`Session`] expires.
    pub expires_at: DateTime,
}

impl AsError for command::authorize_admin_session::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::JsonWebTokenDecodeError(_)
            | Self::SessionNotExists(_)
            | Self::AdminNotExists(_) => {
                Some(AuthError::AuthorizationRequired.into())
            }
        }
    }
}

define_error! {
    enum AuthError {
        #[code = "AUTHORIZATION_REQUIRED"]
        #[status = UNAUTHORIZED]
        #[message = "Authorization required"]
        AuthorizationRequired,

        #[code = "INVALID_VARIABLES"]
        #[status = BAD_REQUEST]
        #[message = "Invalid subscription authorization variables"]
        InvalidVariables,
    }
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use common::DateTime;
    use service::domain::admin::{self, session, Gate};

    use super::Auth;

    fn auth(expires_at: DateTime) -> Auth {
        #[expect(unsafe_code, reason = "test token")]
        let token = unsafe { session::Token::new_unchecked("token".into()) };
        Auth {
            gate: Gate::default().sign_in(admin::Session {
                id: session::Id::new(),
                admin_id: admin::Id::new(),
                expires_at: expires_at.coerce(),
            }),
            token: Some(token),
        }
    }

    #[test]
    fn anonymous_has_no_session() {
        assert!(Auth::default().session(DateTime::now()).is_none());
    }

    #[test]
    fn expired_session_signs_out() {
        let now = DateTime::now();
        let mut auth = auth(now + Duration::from_secs(60));

        let session = auth.session(now).unwrap();
        assert_eq!(session.token.to_string(), "token");

        assert!(auth.session(now + Duration::from_secs(61)).is_none());
        assert_eq!(auth.gate, Gate::Anonymous);
    }
}
