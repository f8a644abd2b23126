//! [`Building`] definitions.

pub mod timeline;

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, Bilingual, DateTimeOf};
use derive_more::{AsRef, Display};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};

use super::{
    city,
    geo::Coordinate,
    text::{self, define_text},
    Description, ImageUrl, Name,
};

pub use self::timeline::Timeline;

/// Building developed in a [`City`].
///
/// [`City`]: super::City
#[derive(Clone, Debug)]
pub struct Building {
    /// ID of this [`Building`].
    pub id: Id,

    /// ID of the [`City`] this [`Building`] is located in.
    ///
    /// [`City`]: super::City
    pub city_id: city::Id,

    /// [`Name`] of this [`Building`].
    pub name: Bilingual<Name>,

    /// [`Description`] of this [`Building`].
    pub description: Bilingual<Description>,

    /// Street [`Address`] of this [`Building`], if any.
    pub address: Option<Address>,

    /// [`Coordinate`] of this [`Building`], if known.
    pub coordinate: Option<Coordinate>,

    /// Number of floors in this [`Building`].
    pub floors: Floors,

    /// [`Status`] of this [`Building`].
    pub status: Status,

    /// Main image of this [`Building`], if any.
    pub image: Option<ImageUrl>,

    /// [`Gallery`] of this [`Building`].
    pub gallery: Gallery,

    /// Construction [`Timeline`] of this [`Building`].
    pub timeline: Timeline,

    /// [`DateTime`] when this [`Building`] was created.
    pub created_at: CreationDateTime,

    /// [`DateTime`] when this [`Building`] was last modified.
    pub updated_at: ModificationDateTime,
}

impl Building {
    /// Returns the images to display for this [`Building`]: its [`Gallery`],
    /// or its main image if the [`Gallery`] is empty.
    #[must_use]
    pub fn display_images(&self) -> Vec<&ImageUrl> {
        if self.gallery.is_empty() {
            self.image.iter().collect()
        } else {
            self.gallery.iter().collect()
        }
    }
}

/// ID of a [`Building`].
///
/// Generated as a slug of the English name suffixed with a creation
/// timestamp, see [`Id::generate()`].
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
    pub const MAX_LEN: usize = 600;

    /// Creates a new [`Id`] if the given `id` is valid.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        (!id.is_empty()
            && id.len() <= Self::MAX_LEN
            && !id.chars().any(char::is_whitespace))
        .then_some(Self(id))
    }

    /// Generates a new [`Id`] for a [`Building`] with the provided [`Name`]
    /// created at the provided [`DateTime`].
    #[must_use]
    pub fn generate(name: &Name, at: CreationDateTime) -> Self {
        let suffix = format!("-{}", at.unix_timestamp_millis());
        let mut id =
            text::slugify(name.as_ref(), Self::MAX_LEN - suffix.len());
        id.push_str(&suffix);
        Self(id)
    }
}

impl std::str::FromStr for Id {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `building::Id`")
    }
}

define_text! {
    #[doc = "Street address of a [`Building`]."]
    pub struct Address;
    check = |s| s.trim() == s && !s.is_empty() && s.len() <= 1024;
}

/// Number of floors in a [`Building`].
#[derive(Clone, Copy, Debug, Default, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Floors(u16);

impl Floors {
    /// Creates a new [`Floors`] count.
    #[must_use]
    pub const fn new(count: u16) -> Self {
        Self(count)
    }

    /// Returns the number of floors.
    #[must_use]
    pub const fn get(self) -> u16 {
        self.0
    }
}

/// Ordered collection of at most [`Gallery::CAPACITY`] images of a
/// [`Building`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Gallery(Vec<ImageUrl>);

impl Gallery {
    /// Maximum number of images in a [`Gallery`].
    pub const CAPACITY: usize = 8;

    /// Creates a new [`Gallery`] if the given `images` fit its
    /// [`Gallery::CAPACITY`].
    #[must_use]
    pub fn new(images: Vec<ImageUrl>) -> Option<Self> {
        (images.len() <= Self::CAPACITY).then_some(Self(images))
    }

    /// Indicates whether this [`Gallery`] has no images.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the images of this [`Gallery`].
    pub fn iter(&self) -> impl Iterator<Item = &ImageUrl> {
        self.0.iter()
    }

    /// Returns the images of this [`Gallery`] as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[ImageUrl] {
        &self.0
    }
}

define_kind! {
    #[doc = "Sales status of a [`Building`]."]
    enum Status {
        #[doc = "Units are available for sale."]
        Available = "available",

        #[doc = "Sales will open soon."]
        ComingSoon = "coming_soon",

        #[doc = "No units left for sale."]
        SoldOut = "sold_out",
    }
}

/// [`DateTime`] when a [`Building`] was created.
pub type CreationDateTime = DateTimeOf<(Building, unit::Creation)>;

/// [`DateTime`] when a [`Building`] was last modified.
pub type ModificationDateTime = DateTimeOf<(Building, unit::Modification)>;

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use super::{CreationDateTime, Gallery, Id, ImageUrl, Name};

    fn image(n: usize) -> ImageUrl {
        ImageUrl::new(format!("https://cdn.example.com/{n}.jpg")).unwrap()
    }

    #[test]
    fn id_is_slug_with_timestamp() {
        let at = CreationDateTime::UNIX_EPOCH
            + Duration::from_millis(1_718_000_000_123);
        let name = Name::new("Nile Tower  B").unwrap();

        assert_eq!(
            Id::generate(&name, at).to_string(),
            "nile-tower-b-1718000000123",
        );
    }

    #[test]
    fn id_from_longest_name_is_valid() {
        let at = CreationDateTime::UNIX_EPOCH
            + Duration::from_millis(1_718_000_000_123);
        let name = Name::new("İ".repeat(256)).unwrap();

        let id = Id::generate(&name, at).to_string();

        assert!(id.len() <= Id::MAX_LEN, "too long: {}", id.len());
        assert!(id.ends_with("-1718000000123"));
        assert!(Id::new(id).is_some());
    }

    #[test]
    fn gallery_holds_at_most_eight_images() {
        assert!(Gallery::new((0..8).map(image).collect()).is_some());
        assert!(Gallery::new((0..9).map(image).collect()).is_none());
    }
}
