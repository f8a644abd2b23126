//! [`Language`]-related definitions.

use crate::define_kind;

define_kind! {
    #[doc = "Language of the displayed content."]
    enum Language {
        #[doc = "English, the default language of every record."]
        En = "en",

        #[doc = "Arabic, stored in the optional `*_ar` fields."]
        Ar = "ar",
    }
}

impl Default for Language {
    fn default() -> Self {
        Self::En
    }
}

/// Value having a default (English) representation and an optional Arabic
/// translation.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Bilingual<T> {
    /// Default representation, always present.
    pub default: T,

    /// Arabic representation, if any.
    pub ar: Option<T>,
}

impl<T> Bilingual<T> {
    /// Creates a new [`Bilingual`] value out of its representations.
    #[must_use]
    pub const fn new(default: T, ar: Option<T>) -> Self {
        Self { default, ar }
    }

    /// Maps both representations with the provided function.
    #[must_use]
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Bilingual<U> {
        Bilingual {
            default: f(self.default),
            ar: self.ar.map(f),
        }
    }
}

impl<T: AsRef<str>> Bilingual<T> {
    /// Resolves the representation to display in the provided [`Language`].
    ///
    /// An absent or blank Arabic representation falls back to the default
    /// one.
    #[must_use]
    pub fn resolve(&self, lang: Language) -> &T {
        match lang {
            Language::En => &self.default,
            Language::Ar => self
                .ar
                .as_ref()
                .filter(|ar| !ar.as_ref().trim().is_empty())
                .unwrap_or(&self.default),
        }
    }
}

#[cfg(feature = "juniper")]
mod juniper {
    //! Module providing integration with [`juniper`] crate.

    use std::str::FromStr as _;

    use juniper::{graphql_scalar, InputValue, ScalarValue, Value};

    /// Language of the displayed content: `en` or `ar`.
    #[graphql_scalar(with = Self, parse_token(String))]
    type Language = super::Language;

    impl Language {
        fn to_output<S: ScalarValue>(l: &Language) -> Value<S> {
            Value::scalar(l.as_str().to_owned())
        }

        fn from_input<S: ScalarValue>(
            input: &InputValue<S>,
        ) -> Result<Self, String> {
            input
                .as_string_value()
                .ok_or_else(|| {
                    format!(
                        "Cannot parse `Language` input scalar from \
                         non-string value: {input}",
                    )
                })
                .and_then(|s| {
                    Self::from_str(s).map_err(|e| {
                        format!("Cannot parse `Language` input scalar: {e}")
                    })
                })
        }
    }
}

#[cfg(test)]
mod spec {
    use super::{Bilingual, Language};

    #[test]
    fn resolves_default_for_english() {
        let name = Bilingual::new("Cairo", Some("القاهرة"));

        assert_eq!(*name.resolve(Language::En), "Cairo");
    }

    #[test]
    fn resolves_arabic_when_present() {
        let name = Bilingual::new("Cairo", Some("القاهرة"));

        assert_eq!(*name.resolve(Language::Ar), "القاهرة");
    }

    #[test]
    fn falls_back_to_default_when_arabic_is_missing_or_blank() {
        assert_eq!(*Bilingual::new("Cairo", None).resolve(Language::Ar), "Cairo");
        assert_eq!(
            *Bilingual::new("Cairo", Some("")).resolve(Language::Ar),
            "Cairo",
        );
        assert_eq!(
            *Bilingual::new("Cairo", Some("  ")).resolve(Language::Ar),
            "Cairo",
        );
    }

    #[test]
    fn maps_both_representations() {
        let len = Bilingual::new("ab", Some("abc")).map(str::len);

        assert_eq!(len, Bilingual::new(2, Some(3)));
    }
}
