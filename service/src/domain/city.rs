//! [`City`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, Bilingual, DateTimeOf};
use derive_more::{AsRef, Display};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};

use super::{
    geo::Coordinate,
    text::{self, define_text},
    Description, ImageUrl, Name,
};

/// City (or area) where buildings are developed.
#[derive(Clone, Debug)]
pub struct City {
    /// ID of this [`City`].
    pub id: Id,

    /// [`Name`] of this [`City`].
    pub name: Bilingual<Name>,

    /// [`Description`] of this [`City`].
    pub description: Bilingual<Description>,

    /// Human-readable [`Location`] of this [`City`], if any.
    pub location: Option<Location>,

    /// [`Coordinate`] of this [`City`] on a map.
    pub coordinate: Coordinate,

    /// [`Status`] of this [`City`].
    pub status: Status,

    /// Hero image of this [`City`], if any.
    pub hero_image: Option<ImageUrl>,

    /// [`DateTime`] when this [`City`] was created.
    pub created_at: CreationDateTime,

    /// [`DateTime`] when this [`City`] was last modified.
    pub updated_at: ModificationDateTime,
}

/// ID of a [`City`].
///
/// Derived from the English name of the [`City`], see [`Id::from_name()`].
#[derive(
    AsRef,
    Clone,
    Debug,
    Deserialize,
    Display,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
#[serde(transparent)]
pub struct Id(String);

impl Id {
    /// Maximum length of an [`Id`] in bytes.
    pub const MAX_LEN: usize = 512;

    /// Creates a new [`Id`] if the given `id` is valid.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        (!id.is_empty()
            && id.len() <= Self::MAX_LEN
            && !id.chars().any(char::is_whitespace))
        .then_some(Self(id))
    }

    /// Derives an [`Id`] from the provided [`City`] [`Name`]: lowercased,
    /// with whitespace replaced by `-`, and cut to [`Id::MAX_LEN`].
    #[must_use]
    pub fn from_name(name: &Name) -> Self {
        Self(text::slugify(name.as_ref(), Self::MAX_LEN))
    }
}

impl std::str::FromStr for Id {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `city::Id`")
    }
}

define_text! {
    #[doc = "Human-readable location of a [`City`], like `East of Cairo`."]
    pub struct Location;
    check = |s| s.trim() == s && !s.is_empty() && s.len() <= 512;
}

define_kind! {
    #[doc = "Sales status of a [`City`]."]
    enum Status {
        #[doc = "Units are being sold."]
        Active = "active",

        #[doc = "Sales have not started yet."]
        Upcoming = "upcoming",

        #[doc = "Development is completed."]
        Completed = "completed",

        #[doc = "No units left for sale."]
        SoldOut = "sold_out",
    }
}

/// [`DateTime`] when a [`City`] was created.
pub type CreationDateTime = DateTimeOf<(City, unit::Creation)>;

/// [`DateTime`] when a [`City`] was last modified.
pub type ModificationDateTime = DateTimeOf<(City, unit::Modification)>;
