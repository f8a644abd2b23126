//! Textual value definitions shared between entities.

/// Defines a textual newtype checked by the provided predicate.
macro_rules! define_text {
    (
        #[doc = $doc:literal]
        $vis:vis struct $name:ident;
        check = $check:expr;
    ) => {
        #[doc = $doc]
        #[derive(
            ::derive_more::AsRef,
            Clone,
            Debug,
            ::derive_more::Display,
            Eq,
            Hash,
            PartialEq,
            ::serde::Deserialize,
            ::serde::Serialize,
        )]
        #[as_ref(str, String)]
        #[cfg_attr(
            feature = "postgres",
            derive(::postgres_types::FromSql, ::postgres_types::ToSql),
            postgres(transparent),
        )]
        #[serde(transparent)]
        $vis struct $name(String);

        impl $name {
            #[doc = ::core::concat!(
                "Creates a new [`", ::core::stringify!($name), "`].",
            )]
            ///
            /// # Safety
            ///
            /// The caller must ensure that the given `value` matches the
            /// format.
            #[expect(unsafe_code, reason = "bypass")]
            #[must_use]
            pub unsafe fn new_unchecked(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            #[doc = ::core::concat!(
                "Creates a new [`", ::core::stringify!($name),
                "`] if the given `value` is valid.",
            )]
            #[must_use]
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let value = value.into();
                Self::check(&value).then_some(Self(value))
            }

            /// Returns the textual representation of this value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            #[doc = ::core::concat!(
                "Checks whether the given `value` is a valid [`",
                ::core::stringify!($name), "`].",
            )]
            fn check(value: &str) -> bool {
                let check: fn(&str) -> bool = $check;
                check(value)
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = &'static str;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s).ok_or(::core::concat!(
                    "invalid `", ::core::stringify!($name), "`",
                ))
            }
        }
    };
}

pub(crate) use define_text;

define_text! {
    #[doc = "Non-empty single-line name of an entity."]
    pub struct Name;
    check = |s| s.trim() == s && !s.is_empty() && s.len() <= 512;
}

define_text! {
    #[doc = "Free-form description of an entity, possibly empty."]
    pub struct Description;
    check = |s| s.trim() == s && s.len() <= 8192;
}

define_text! {
    #[doc = "URL of an image hosted elsewhere."]
    pub struct ImageUrl;
    check = |s| {
        !s.is_empty()
            && s.len() <= 2048
            && !s.chars().any(char::is_whitespace)
    };
}

/// Converts the provided text into a URL slug: lowercased, with runs of
/// whitespace replaced by a single `-`.
///
/// Lowercasing may grow the text, so the slug is cut at a char boundary to
/// fit into `max_len` bytes, without a trailing `-`.
pub(crate) fn slugify(text: &str, max_len: usize) -> String {
    let mut slug = text
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-");
    if slug.len() > max_len {
        let mut end = max_len;
        while !slug.is_char_boundary(end) {
            end -= 1;
        }
        slug.truncate(end);
        let trimmed = slug.trim_end_matches('-').len();
        slug.truncate(trimmed);
    }
    slug
}

#[cfg(test)]
mod spec {
    use super::{slugify, Description, ImageUrl, Name};

    #[test]
    fn name_requires_trimmed_non_empty_text() {
        assert!(Name::new("New Cairo").is_some());
        assert!(Name::new("").is_none());
        assert!(Name::new(" New Cairo").is_none());
        assert!(Name::new("x".repeat(513)).is_none());
    }

    #[test]
    fn description_may_be_empty() {
        assert!(Description::new("").is_some());
        assert!(Description::new("Sea view.").is_some());
        assert!(Description::new("Sea view.\n").is_none());
    }

    #[test]
    fn image_url_has_no_whitespace() {
        assert!(ImageUrl::new("https://cdn.example.com/a.jpg").is_some());
        assert!(ImageUrl::new("https://cdn.example.com/a b.jpg").is_none());
        assert!(ImageUrl::new("").is_none());
    }

    #[test]
    fn slugifies_names() {
        assert_eq!(slugify("New Cairo", 64), "new-cairo");
        assert_eq!(slugify("  North   Coast ", 64), "north-coast");
        assert_eq!(slugify("Sheikh\tZayed\nCity", 64), "sheikh-zayed-city");
    }

    #[test]
    fn slug_is_cut_at_char_boundary() {
        // `İ` lowercases into 3 bytes.
        let slug = slugify(&"İ".repeat(4), 8);
        assert_eq!(slug, "i\u{307}i\u{307}i");

        assert_eq!(slugify("north coast", 6), "north");
        assert_eq!(slugify("north coast", 5), "north");
    }
}
