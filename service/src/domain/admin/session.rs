//! [`Session`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{unit, DateTimeOf};
use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(doc)]
use crate::domain::Admin;
use crate::domain::admin;

/// Signed-in [`Admin`] session.
///
/// Encoded as [JWT] claims into its [`Token`] and stored in the database
/// until it expires or the [`Admin`] signs out.
///
/// [JWT]: https://datatracker.ietf.org/doc/html/rfc7519
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Session {
    /// ID of this [`Session`].
    #[serde(rename = "sid")]
    pub id: Id,

    /// ID of the [`Admin`] this [`Session`] belongs to.
    #[serde(rename = "sub")]
    pub admin_id: admin::Id,

    /// [`DateTime`] when this [`Session`] expires.
    #[serde(rename = "exp", with = "common::datetime::serde::unix_timestamp")]
    pub expires_at: ExpirationDateTime,
}

impl Session {
    /// Indicates whether this [`Session`] is expired at the provided
    /// [`DateTime`].
    #[must_use]
    pub fn is_expired_at(&self, now: ExpirationDateTime) -> bool {
        self.expires_at <= now
    }
}

/// ID of a [`Session`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Access token of a [`Session`].
#[derive(AsRef, Clone, Debug, Display, FromStr)]
pub struct Token(String);

impl Token {
    /// Creates a new [`Token`] without checking its contents.
    ///
    /// # Safety
    ///
    /// The provided `token` must be a valid [`Token`] representation.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub const unsafe fn new_unchecked(token: String) -> Self {
        Self(token)
    }
}

/// [`DateTime`] of a [`Session`] expiration.
pub type ExpirationDateTime = DateTimeOf<(Session, unit::Expiration)>;

/// Access gate of the back office.
///
/// Starts [`Gate::Anonymous`], becomes [`Gate::Authenticated`] on a
/// successful sign-in, and returns to [`Gate::Anonymous`] on sign-out or
/// once its [`Session`] expires.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Gate {
    /// No valid [`Session`].
    #[default]
    Anonymous,

    /// Valid [`Session`] is present.
    Authenticated(Session),
}

impl Gate {
    /// Transitions this [`Gate`] into [`Gate::Authenticated`] with the
    /// provided [`Session`].
    #[must_use]
    pub fn sign_in(self, session: Session) -> Self {
        Self::Authenticated(session)
    }

    /// Transitions this [`Gate`] into [`Gate::Anonymous`].
    #[must_use]
    pub fn sign_out(self) -> Self {
        Self::Anonymous
    }

    /// Transitions this [`Gate`] into [`Gate::Anonymous`] if its [`Session`]
    /// is expired at the provided [`DateTime`].
    #[must_use]
    pub fn expire_if_due(self, now: ExpirationDateTime) -> Self {
        match self {
            Self::Authenticated(s) if s.is_expired_at(now) => Self::Anonymous,
            Self::Anonymous | Self::Authenticated(_) => self,
        }
    }

    /// Returns the [`Session`] of this [`Gate`], if authenticated.
    #[must_use]
    pub const fn session(&self) -> Option<&Session> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated(s) => Some(s),
        }
    }
}
