//! [`Inquiry`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{unit, DateTimeOf};
use derive_more::{Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    city, contact::Email, contact::Phone, text::define_text, unit as unit_,
    Name,
};

/// Request for information left by a website visitor.
///
/// Immutable once submitted: it can only be deleted.
#[derive(Clone, Debug)]
pub struct Inquiry {
    /// ID of this [`Inquiry`].
    pub id: Id,

    /// [`Name`] of the visitor.
    pub name: Name,

    /// [`Email`] of the visitor.
    pub email: Email,

    /// [`Phone`] of the visitor, if provided.
    pub phone: Option<Phone>,

    /// ID of the [`City`] the visitor is interested in, if any.
    ///
    /// [`City`]: super::City
    pub city_id: Option<city::Id>,

    /// ID of the [`Unit`] the visitor is interested in, if any.
    ///
    /// [`Unit`]: super::Unit
    pub unit_id: Option<unit_::Id>,

    /// [`Message`] of the visitor, if provided.
    pub message: Option<Message>,

    /// [`DateTime`] when this [`Inquiry`] was submitted.
    pub created_at: CreationDateTime,
}

/// ID of an [`Inquiry`].
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

define_text! {
    #[doc = "Free-form message of an [`Inquiry`]."]
    pub struct Message;
    check = |s| s.trim() == s && !s.is_empty() && s.chars().count() <= 5000;
}

impl Message {
    /// Composes a [`Message`] of a general contact form out of its optional
    /// `subject` and `body`.
    ///
    /// [`None`] is returned if both are blank or the result is too long.
    #[must_use]
    pub fn compose(subject: Option<&str>, body: &str) -> Option<Self> {
        let body = body.trim();
        match subject.map(str::trim).filter(|s| !s.is_empty()) {
            Some(subject) if body.is_empty() => {
                Self::new(format!("Subject: {subject}"))
            }
            Some(subject) => Self::new(format!("Subject: {subject}\n\n{body}")),
            None => Self::new(body),
        }
    }
}

/// [`DateTime`] when an [`Inquiry`] was submitted.
pub type CreationDateTime = DateTimeOf<(Inquiry, unit::Creation)>;

#[cfg(test)]
mod spec {
    use super::Message;

    #[test]
    fn composes_subject_and_body() {
        assert_eq!(
            Message::compose(Some("Pricing"), "Is unit 12 available?")
                .unwrap()
                .as_str(),
            "Subject: Pricing\n\nIs unit 12 available?",
        );
        assert_eq!(
            Message::compose(None, " Call me back ").unwrap().as_str(),
            "Call me back",
        );
        assert_eq!(
            Message::compose(Some(" "), "Hi").unwrap().as_str(),
            "Hi",
        );
        assert_eq!(
            Message::compose(Some("Visit"), "").unwrap().as_str(),
            "Subject: Visit",
        );
        assert!(Message::compose(None, "   ").is_none());
    }

    #[test]
    fn message_is_limited() {
        assert!(Message::new("x".repeat(5000)).is_some());
        assert!(Message::new("x".repeat(5001)).is_none());
    }
}
