//! Marketing content definitions: achievement [`Counter`]s, [`Hero`] banner
//! and [`Testimonial`]s.

use common::{define_kind, Bilingual};
use derive_more::{AsRef, Display};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use rust_decimal::Decimal;

use super::{text::define_text, ImageUrl};

/// ID of a content record.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Id(String);

impl Id {
    /// Creates a new [`Id`].
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

define_text! {
    #[doc = "Short line of marketing text."]
    pub struct Text;
    check = |s| s.trim() == s && s.len() <= 4096;
}

impl Text {
    /// Creates a new [`Text`] out of a string known to be valid.
    fn fallback(text: &str) -> Self {
        Self(text.to_owned())
    }
}

define_kind! {
    #[doc = "Icon displayed next to a piece of content."]
    enum Icon {
        #[doc = "Building outline."]
        Building2 = "Building2",

        #[doc = "Group of people."]
        Users = "Users",

        #[doc = "Award ribbon."]
        Award = "Award",

        #[doc = "Rising chart."]
        TrendingUp = "TrendingUp",

        #[doc = "House."]
        Home = "Home",

        #[doc = "Shield."]
        Shield = "Shield",

        #[doc = "Star."]
        Star = "Star",

        #[doc = "Map pin."]
        MapPin = "MapPin",

        #[doc = "Clock."]
        Clock = "Clock",

        #[doc = "Circled check mark."]
        CheckCircle = "CheckCircle",
    }
}

/// Achievement counter, like `150+ buildings`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Counter {
    /// ID of this [`Counter`].
    pub id: Id,

    /// Value of this [`Counter`].
    pub value: u64,

    /// Label of this [`Counter`].
    pub label: Bilingual<Text>,

    /// Suffix displayed after the value, like `+`.
    pub suffix: Bilingual<Text>,

    /// [`Icon`] of this [`Counter`], if any.
    pub icon: Option<Icon>,

    /// Position of this [`Counter`] among the others.
    pub display_order: i32,
}

impl Counter {
    /// Returns the [`Counter`]s displayed when none can be loaded.
    #[must_use]
    pub fn fallback() -> Vec<Self> {
        [
            (150, "Buildings", "مبنى", Icon::Building2),
            (10_000, "Happy Clients", "عميل سعيد", Icon::Users),
            (24, "Awards", "جائزة", Icon::Award),
            (15, "Years of Experience", "سنة خبرة", Icon::TrendingUp),
        ]
        .into_iter()
        .zip(1..)
        .map(|((value, en, ar, icon), order)| Self {
            id: Id::new(order.to_string()),
            value,
            label: Bilingual::new(Text::fallback(en), Some(Text::fallback(ar))),
            suffix: Bilingual::new(Text::fallback("+"), Some(Text::fallback("+"))),
            icon: Some(icon),
            display_order: order,
        })
        .collect()
    }
}

/// Hero banner of the home page.
#[derive(Clone, Debug, PartialEq)]
pub struct Hero {
    /// Headlines of this [`Hero`], if configured.
    pub content: Option<HeroContent>,

    /// [`HeroChip`]s of this [`Hero`].
    pub chips: Vec<HeroChip>,

    /// [`HeroRating`] of this [`Hero`], if configured.
    pub rating: Option<HeroRating>,
}

impl Hero {
    /// Returns the [`Hero`] displayed when none can be loaded.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            content: None,
            chips: HeroChip::fallback(),
            rating: Some(HeroRating::fallback()),
        }
    }

    /// Fills the missing parts of this [`Hero`] with the
    /// [`Hero::fallback()`] ones.
    #[must_use]
    pub fn or_fallback(self) -> Self {
        Self {
            content: self.content,
            chips: if self.chips.is_empty() {
                HeroChip::fallback()
            } else {
                self.chips
            },
            rating: self.rating.or_else(|| Some(HeroRating::fallback())),
        }
    }
}

/// Headlines of a [`Hero`] banner.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HeroContent {
    /// Main headline.
    pub headline: Bilingual<Text>,

    /// Subheadline.
    pub subheadline: Bilingual<Text>,
}

/// Highlight chip of a [`Hero`] banner.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HeroChip {
    /// ID of this [`HeroChip`].
    pub id: Id,

    /// Title of this [`HeroChip`].
    pub title: Bilingual<Text>,

    /// [`Icon`] of this [`HeroChip`], if any.
    pub icon: Option<Icon>,

    /// Position of this [`HeroChip`] among the others.
    pub display_order: i32,
}

impl HeroChip {
    /// Returns the [`HeroChip`]s displayed when none can be loaded.
    #[must_use]
    pub fn fallback() -> Vec<Self> {
        [
            ("Premium Locations", "مواقع متميزة", Icon::Home),
            ("High ROI", "عائد استثمار مرتفع", Icon::TrendingUp),
            ("Trusted Developer", "مطور موثوق", Icon::Award),
        ]
        .into_iter()
        .zip(1..)
        .map(|((en, ar, icon), order)| Self {
            id: Id::new(order.to_string()),
            title: Bilingual::new(Text::fallback(en), Some(Text::fallback(ar))),
            icon: Some(icon),
            display_order: order,
        })
        .collect()
    }
}

/// Customer rating shown on a [`Hero`] banner.
#[derive(Clone, Debug, PartialEq)]
pub struct HeroRating {
    /// Average rating value, like `4.9`.
    pub value: Decimal,

    /// Number of clients who rated.
    pub total_clients: u32,

    /// Caption of this [`HeroRating`].
    pub text: Bilingual<Text>,
}

impl HeroRating {
    /// Returns the [`HeroRating`] displayed when none can be loaded.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            value: Decimal::new(49, 1),
            total_clients: 500,
            text: Bilingual::new(
                Text::fallback("from 500+ happy clients"),
                Some(Text::fallback("من أكثر من 500 عميل سعيد")),
            ),
        }
    }
}

/// Review left by a client.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Testimonial {
    /// ID of this [`Testimonial`].
    pub id: Id,

    /// Name of the client.
    pub name: Bilingual<Text>,

    /// Role of the client, like `Investor`.
    pub role: Bilingual<Text>,

    /// Review text.
    pub content: Bilingual<Text>,

    /// [`Rating`] given by the client.
    pub rating: Rating,

    /// Photo of the client, if any.
    pub image: Option<ImageUrl>,

    /// Position of this [`Testimonial`] among the others.
    pub display_order: i32,
}

impl Testimonial {
    /// Returns the [`Testimonial`]s displayed when none can be loaded.
    #[must_use]
    pub fn fallback() -> Vec<Self> {
        [
            (
                ("Ahmed Hassan", "أحمد حسن"),
                ("Property Owner", "مالك عقار"),
                (
                    "Al-Fouad exceeded my expectations. The quality of \
                     construction and attention to detail in New Heliopolis \
                     is outstanding. Highly recommended!",
                    "فاقت شركة الفؤاد توقعاتي. جودة البناء والاهتمام بالتفاصيل \
                     في هليوبوليس الجديدة رائعة. أنصح بها بشدة!",
                ),
                "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d\
                 ?w=150&h=150&fit=crop",
            ),
            (
                ("Sarah Mohamed", "سارة محمد"),
                ("Investor", "مستثمرة"),
                (
                    "Professional team and transparent process. They guided \
                     me through every step of purchasing my villa in Beit \
                     El-Watan. Couldn't be happier!",
                    "فريق محترف وعملية شفافة. أرشدوني في كل خطوة لشراء فيلتي \
                     في بيت الوطن. لا يمكن أن أكون أكثر سعادة!",
                ),
                "https://images.unsplash.com/photo-1494790108377-be9c29b29330\
                 ?w=150&h=150&fit=crop",
            ),
            (
                ("Khaled Ibrahim", "خالد إبراهيم"),
                ("Homeowner", "صاحب منزل"),
                (
                    "The best real estate investment I've made. Premium \
                     location, excellent amenities, and a company that truly \
                     cares about its clients.",
                    "أفضل استثمار عقاري قمت به. موقع مميز، ومرافق ممتازة، \
                     وشركة تهتم حقاً بعملائها.",
                ),
                "https://images.unsplash.com/photo-1500648767791-00dcc994a43e\
                 ?w=150&h=150&fit=crop",
            ),
        ]
        .into_iter()
        .zip(1..)
        .map(|(((name, name_ar), (role, role_ar), (text, text_ar), image), order)| {
            Self {
                id: Id::new(order.to_string()),
                name: Bilingual::new(
                    Text::fallback(name),
                    Some(Text::fallback(name_ar)),
                ),
                role: Bilingual::new(
                    Text::fallback(role),
                    Some(Text::fallback(role_ar)),
                ),
                content: Bilingual::new(
                    Text::fallback(text),
                    Some(Text::fallback(text_ar)),
                ),
                rating: Rating::MAX,
                image: ImageUrl::new(image),
                display_order: order,
            }
        })
        .collect()
    }
}

/// Rating of a [`Testimonial`], from `1` to `5` stars.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Rating(u8);

impl Rating {
    /// Highest possible [`Rating`].
    pub const MAX: Self = Self(5);

    /// Creates a new [`Rating`] if the given number of `stars` is within
    /// `1..=5`.
    #[must_use]
    pub fn new(stars: u8) -> Option<Self> {
        (1..=5).contains(&stars).then_some(Self(stars))
    }

    /// Returns the number of stars of this [`Rating`].
    #[must_use]
    pub const fn stars(self) -> u8 {
        self.0
    }
}

#[cfg(test)]
mod spec {
    use common::Language;

    use super::{Counter, Hero, HeroChip, Icon, Rating, Testimonial};

    #[test]
    fn fallback_counters() {
        let counters = Counter::fallback();

        let values = counters
            .iter()
            .map(|c| (c.value, c.icon, c.suffix.default.as_str()))
            .collect::<Vec<_>>();
        assert_eq!(
            values,
            [
                (150, Some(Icon::Building2), "+"),
                (10_000, Some(Icon::Users), "+"),
                (24, Some(Icon::Award), "+"),
                (15, Some(Icon::TrendingUp), "+"),
            ],
        );
        assert!(counters.windows(2).all(|w| w[0].display_order < w[1].display_order));
    }

    #[test]
    fn fallback_hero() {
        let hero = Hero::fallback();

        let icons = hero.chips.iter().map(|c| c.icon).collect::<Vec<_>>();
        assert_eq!(
            icons,
            [Some(Icon::Home), Some(Icon::TrendingUp), Some(Icon::Award)],
        );
        let rating = hero.rating.unwrap();
        assert_eq!(rating.value.to_string(), "4.9");
        assert_eq!(rating.total_clients, 500);
    }

    #[test]
    fn partial_hero_is_completed_with_fallback() {
        let hero = Hero {
            content: None,
            chips: vec![],
            rating: None,
        }
        .or_fallback();

        assert_eq!(hero.chips, HeroChip::fallback());
        assert!(hero.rating.is_some());
    }

    #[test]
    fn fallback_testimonials_are_bilingual() {
        let testimonials = Testimonial::fallback();

        assert_eq!(testimonials.len(), 3);
        for t in &testimonials {
            assert_ne!(t.name.resolve(Language::Ar), &t.name.default);
            assert_eq!(t.rating, Rating::MAX);
            assert!(t.image.is_some());
        }
    }

    #[test]
    fn rating_is_one_to_five_stars() {
        assert!(Rating::new(0).is_none());
        assert!(Rating::new(1).is_some());
        assert!(Rating::new(5).is_some());
        assert!(Rating::new(6).is_none());
    }

    #[test]
    fn icon_names_are_closed() {
        assert_eq!("Building2".parse::<Icon>(), Ok(Icon::Building2));
        assert!("Skull".parse::<Icon>().is_err());
    }
}
