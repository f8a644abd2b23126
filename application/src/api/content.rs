//! Marketing content definitions.

use derive_more::From;
use juniper::graphql_object;
use rust_decimal::prelude::ToPrimitive as _;
use service::domain::content;

use crate::{
    api::{self, text},
    Context,
};

/// Achievement counter shown on the home page, like `500+ Units Sold`.
#[derive(Clone, Debug, From)]
pub struct Counter(content::Counter);

/// Achievement counter shown on the home page.
#[graphql_object(context = Context)]
impl Counter {
    /// Identifier of this `Counter`.
    #[must_use]
    pub fn id(&self) -> String {
        self.0.id.to_string()
    }

    /// Counted value.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.0.value.to_f64().unwrap_or_default()
    }

    /// Label of this `Counter`.
    #[must_use]
    pub fn label(&self) -> api::BilingualText {
        (&self.0.label).into()
    }

    /// Suffix displayed after the value, like `+`.
    #[must_use]
    pub fn suffix(&self) -> api::BilingualText {
        (&self.0.suffix).into()
    }

    /// Name of the icon to display, if any.
    #[must_use]
    pub fn icon(&self) -> Option<&str> {
        self.0.icon.map(content::Icon::as_str)
    }

    /// Position of this `Counter` among the others.
    #[must_use]
    pub fn display_order(&self) -> i32 {
        self.0.display_order
    }
}

/// Hero banner of the home page.
#[derive(Clone, Debug, From)]
pub struct Hero(content::Hero);

/// Hero banner of the home page.
#[graphql_object(context = Context)]
impl Hero {
    /// Main headline.
    #[must_use]
    pub fn headline(&self) -> Option<api::BilingualText> {
        self.0.content.as_ref().map(|c| (&c.headline).into())
    }

    /// Headline under the main one.
    #[must_use]
    pub fn subheadline(&self) -> Option<api::BilingualText> {
        self.0.content.as_ref().map(|c| (&c.subheadline).into())
    }

    /// Feature chips shown under the headlines.
    #[must_use]
    pub fn chips(&self) -> Vec<HeroChip> {
        self.0.chips.iter().cloned().map(HeroChip).collect()
    }

    /// Aggregated clients rating, if any.
    #[must_use]
    pub fn rating(&self) -> Option<HeroRating> {
        self.0.rating.clone().map(HeroRating)
    }
}

/// Feature chip of the hero banner.
#[derive(Clone, Debug)]
pub struct HeroChip(content::HeroChip);

/// Feature chip of the hero banner.
#[graphql_object(context = Context)]
impl HeroChip {
    /// Identifier of this `HeroChip`.
    #[must_use]
    pub fn id(&self) -> String {
        self.0.id.to_string()
    }

    /// Title of this `HeroChip`.
    #[must_use]
    pub fn title(&self) -> api::BilingualText {
        (&self.0.title).into()
    }

    /// Name of the icon to display, if any.
    #[must_use]
    pub fn icon(&self) -> Option<&str> {
        self.0.icon.map(content::Icon::as_str)
    }

    /// Position of this `HeroChip` among the others.
    #[must_use]
    pub fn display_order(&self) -> i32 {
        self.0.display_order
    }
}

/// Aggregated clients rating of the hero banner.
#[derive(Clone, Debug)]
pub struct HeroRating(content::HeroRating);

/// Aggregated clients rating of the hero banner.
#[graphql_object(context = Context)]
impl HeroRating {
    /// Rating value, like `4.9`.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.0.value.to_f64().unwrap_or_default()
    }

    /// Number of clients rated.
    #[must_use]
    pub fn total_clients(&self) -> i32 {
        api::widen(self.0.total_clients)
    }

    /// Text displayed next to the rating.
    #[must_use]
    pub fn text(&self) -> api::BilingualText {
        (&self.0.text).into()
    }
}

/// Client testimonial.
#[derive(Clone, Debug, From)]
pub struct Testimonial(content::Testimonial);

/// Client testimonial.
#[graphql_object(context = Context)]
impl Testimonial {
    /// Identifier of this `Testimonial`.
    #[must_use]
    pub fn id(&self) -> String {
        self.0.id.to_string()
    }

    /// Name of the client.
    #[must_use]
    pub fn name(&self) -> api::BilingualText {
        (&self.0.name).into()
    }

    /// Role of the client, like `Homeowner`.
    #[must_use]
    pub fn role(&self) -> api::BilingualText {
        (&self.0.role).into()
    }

    /// Testimonial itself.
    #[must_use]
    pub fn content(&self) -> api::BilingualText {
        (&self.0.content).into()
    }

    /// Rating in stars from 1 to 5.
    #[must_use]
    pub fn rating(&self) -> i32 {
        self.0.rating.stars().into()
    }

    /// Photo of the client, if any.
    #[must_use]
    pub fn image(&self) -> Option<text::ImageUrl> {
        self.0.image.clone().map(Into::into)
    }

    /// Position of this `Testimonial` among the others.
    #[must_use]
    pub fn display_order(&self) -> i32 {
        self.0.display_order
    }
}
