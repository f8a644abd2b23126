//! [`Inquiry`]-related definitions.

use common::DateTime;
use derive_more::{AsRef, Display, From, Into};
use juniper::{graphql_object, GraphQLEnum, GraphQLInputObject, GraphQLScalar};
use service::{
    command::SubmitInquiry,
    domain::{self, contact},
    query::{self, Degraded},
    read, Query as _,
};
use uuid::Uuid;

use crate::{
    api::{self, scalar, text},
    AsError, Context, Error,
};

/// A lead submitted through a contact or interest form.
#[derive(Clone, Debug, From)]
pub struct Inquiry(domain::Inquiry);

/// A lead submitted through a contact or interest form.
#[graphql_object(context = Context)]
impl Inquiry {
    /// Unique identifier of this `Inquiry`.
    #[must_use]
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// Name of the person submitted this `Inquiry`.
    #[must_use]
    pub fn name(&self) -> text::Name {
        self.0.name.clone().into()
    }

    /// Email of the person submitted this `Inquiry`.
    #[must_use]
    pub fn email(&self) -> Email {
        self.0.email.clone().into()
    }

    /// Phone of the person submitted this `Inquiry`, if provided.
    #[must_use]
    pub fn phone(&self) -> Option<Phone> {
        self.0.phone.clone().map(Into::into)
    }

    /// ID of the `City` this `Inquiry` refers to, if any.
    #[must_use]
    pub fn city_id(&self) -> Option<api::city::Id> {
        self.0.city_id.clone().map(Into::into)
    }

    /// `City` this `Inquiry` refers to, if any.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Inquiry.city",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn city(&self, ctx: &Context) -> Result<Option<api::City>, Error> {
        let Some(id) = self.0.city_id.clone() else {
            return Ok(None);
        };
        ctx.service()
            .execute(Degraded(query::city::Enriched(id)))
            .await
            .map_err(AsError::into_error)
            .map(|c| c.map(Into::into))
    }

    /// ID of the `Unit` this `Inquiry` refers to, if any.
    #[must_use]
    pub fn unit_id(&self) -> Option<api::unit::Id> {
        self.0.unit_id.clone().map(Into::into)
    }

    /// `Unit` this `Inquiry` refers to, if any.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Inquiry.unit",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn unit(&self, ctx: &Context) -> Result<Option<api::Unit>, Error> {
        let Some(id) = self.0.unit_id.clone() else {
            return Ok(None);
        };
        ctx.service()
            .execute(Degraded(query::unit::ById::by(id)))
            .await
            .map_err(AsError::into_error)
            .map(|u| u.map(Into::into))
    }

    /// Message of this `Inquiry`, if any.
    #[must_use]
    pub fn message(&self) -> Option<Message> {
        self.0.message.clone().map(Into::into)
    }

    /// `DateTime` when this `Inquiry` was submitted.
    #[must_use]
    pub fn created_at(&self) -> DateTime {
        self.0.created_at.coerce()
    }
}

/// Unique identifier of an `Inquiry`.
#[derive(Clone, Copy, Debug, Display, From, GraphQLScalar, Into)]
#[from(domain::inquiry::Id)]
#[graphql(name = "InquiryId", transparent)]
#[into(domain::inquiry::Id)]
pub struct Id(Uuid);

/// Email address of a person.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(with = scalar::Via::<contact::Email>)]
pub struct Email(contact::Email);

/// Phone number of a person.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(with = scalar::Via::<contact::Phone>)]
pub struct Phone(contact::Phone);

/// Free-form message of an `Inquiry`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "InquiryMessage",
    with = scalar::Via::<domain::inquiry::Message>,
)]
pub struct Message(domain::inquiry::Message);

/// Relative date window to filter `Inquiry`s by.
#[derive(Clone, Copy, Debug, GraphQLEnum)]
#[graphql(name = "InquiryWindow")]
pub enum Window {
    /// Submitted since the start of the current day (UTC).
    Today,

    /// Submitted during the last 7 days.
    Week,

    /// Submitted during the last 30 days.
    Month,
}

impl From<Window> for read::inquiry::DateWindow {
    fn from(window: Window) -> Self {
        match window {
            Window::Today => Self::Today,
            Window::Week => Self::Week,
            Window::Month => Self::Month,
        }
    }
}

/// Fields of a contact or interest form.
#[derive(Clone, Debug, GraphQLInputObject)]
#[graphql(name = "InquiryInput")]
pub struct Input {
    /// Name of the person.
    pub name: text::Name,

    /// Email of the person.
    pub email: Email,

    /// Phone of the person.
    pub phone: Option<Phone>,

    /// ID of the `City` the person is interested in.
    pub city_id: Option<api::city::Id>,

    /// ID of the `Unit` the person is interested in.
    pub unit_id: Option<api::unit::Id>,

    /// Subject of a general contact form.
    pub subject: Option<String>,

    /// Free-form message.
    pub message: Option<String>,
}

impl Input {
    /// Parses this [`Input`] into a [`SubmitInquiry`] command.
    ///
    /// # Errors
    ///
    /// Errors with [`api::InputError::InvalidMessage`] if the composed message
    /// is too long.
    pub(crate) fn parse(self) -> Result<SubmitInquiry, Error> {
        let Self {
            name,
            email,
            phone,
            city_id,
            unit_id,
            subject,
            message,
        } = self;

        Ok(SubmitInquiry {
            name: name.into(),
            email: email.into(),
            phone: phone.map(Into::into),
            city_id: city_id.map(Into::into),
            unit_id: unit_id.map(Into::into),
            message: compose_message(subject.as_deref(), message.as_deref())?,
        })
    }
}

/// Composes an optional [`domain::inquiry::Message`] out of the provided
/// form fields.
///
/// # Errors
///
/// Errors with [`api::InputError::InvalidMessage`] if the fields are not
/// blank, but the composed message is invalid.
pub(crate) fn compose_message(
    subject: Option<&str>,
    body: Option<&str>,
) -> Result<Option<domain::inquiry::Message>, Error> {
    let blank = |s: Option<&str>| s.map_or(true, |s| s.trim().is_empty());
    if blank(subject) && blank(body) {
        return Ok(None);
    }
    domain::inquiry::Message::compose(subject, body.unwrap_or_default())
        .map(Some)
        .ok_or_else(|| api::InputError::InvalidMessage.into())
}

#[cfg(test)]
mod spec {
    use super::compose_message;

    #[test]
    fn composes_optional_message() {
        assert_eq!(compose_message(None, None).unwrap(), None);
        assert_eq!(compose_message(Some("  "), Some("")).unwrap(), None);

        let message = compose_message(Some("Visit"), Some("Call me"))
            .unwrap()
            .unwrap();
        assert_eq!(message.as_str(), "Subject: Visit\n\nCall me");

        let err = compose_message(None, Some(&"a".repeat(5001))).unwrap_err();
        assert_eq!(err.code, "INVALID_MESSAGE");
    }
}
