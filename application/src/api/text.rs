//! Textual definitions shared across the GraphQL API.

use common::{Bilingual, Language};
use derive_more::{AsRef, Display, From, Into};
use juniper::{graphql_object, GraphQLScalar};
use service::domain;

use crate::{api::scalar, Context};

/// Text having an English representation and an optional Arabic one.
#[derive(Clone, Debug)]
pub struct BilingualText(Bilingual<String>);

impl<T: AsRef<str>> From<Bilingual<T>> for BilingualText {
    fn from(text: Bilingual<T>) -> Self {
        Self(text.map(|t| t.as_ref().to_owned()))
    }
}

impl<T: AsRef<str>> From<&Bilingual<T>> for BilingualText {
    fn from(text: &Bilingual<T>) -> Self {
        Self(Bilingual {
            default: text.default.as_ref().to_owned(),
            ar: text.ar.as_ref().map(|t| t.as_ref().to_owned()),
        })
    }
}

/// Text having an English representation and an optional Arabic one.
#[graphql_object(context = Context)]
impl BilingualText {
    /// Representation of this `BilingualText` to display in the provided
    /// `Language`.
    ///
    /// Falls back to English when the Arabic representation is absent or
    /// blank.
    #[must_use]
    pub fn text(&self, lang: Option<Language>) -> &str {
        self.0.resolve(lang.unwrap_or_default())
    }

    /// English representation of this `BilingualText`.
    #[must_use]
    pub fn en(&self) -> &str {
        &self.0.default
    }

    /// Arabic representation of this `BilingualText`, if any.
    #[must_use]
    pub fn ar(&self) -> Option<&str> {
        self.0.ar.as_deref()
    }
}

/// Name of an entity.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(with = scalar::Via::<domain::Name>)]
pub struct Name(domain::Name);

/// Description of an entity, possibly empty.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(with = scalar::Via::<domain::Description>)]
pub struct Description(domain::Description);

/// URL of an image.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(with = scalar::Via::<domain::ImageUrl>)]
pub struct ImageUrl(domain::ImageUrl);

/// Builds a [`Bilingual`] value out of its English and Arabic inputs.
///
/// A blank Arabic input is treated as absent.
pub(crate) fn bilingual<T, U>(default: T, ar: Option<T>) -> Bilingual<U>
where
    T: Into<U>,
    U: AsRef<str>,
{
    Bilingual::new(
        default.into(),
        ar.map(Into::into).filter(|ar: &U| !ar.as_ref().trim().is_empty()),
    )
}

#[cfg(test)]
mod spec {
    use common::{Bilingual, Language};
    use service::domain;

    use super::{bilingual, BilingualText, Name};

    #[test]
    fn resolves_requested_language() {
        let text = BilingualText::from(Bilingual::new("Cairo", Some("القاهرة")));

        assert_eq!(text.text(None), "Cairo");
        assert_eq!(text.text(Some(Language::Ar)), "القاهرة");
        assert_eq!(text.en(), "Cairo");
        assert_eq!(text.ar(), Some("القاهرة"));
    }

    #[test]
    fn drops_blank_arabic_input() {
        let name = |s: &str| Name::from(domain::Name::new(s).unwrap());

        let text: Bilingual<domain::Name> =
            bilingual(name("New Cairo"), Some(name("القاهرة الجديدة")));
        assert_eq!(text.ar.unwrap().as_str(), "القاهرة الجديدة");

        let text: Bilingual<domain::Description> = bilingual(
            super::Description::from(domain::Description::new("Sea").unwrap()),
            Some(super::Description::from(
                domain::Description::new("").unwrap(),
            )),
        );
        assert!(text.ar.is_none());
    }
}
