//! [`Unit`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, Bilingual, DateTimeOf, Money, Percent};
use derive_more::{AsRef, Display};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{building, city, text::define_text, Description, ImageUrl};

/// Unit (apartment, villa, etc.) for sale in a [`Building`].
///
/// [`Building`]: super::Building
#[derive(Clone, Debug)]
pub struct Unit {
    /// ID of this [`Unit`].
    pub id: Id,

    /// ID of the [`Building`] this [`Unit`] belongs to.
    ///
    /// [`Building`]: super::Building
    pub building_id: building::Id,

    /// ID of the [`City`] this [`Unit`] is located in.
    ///
    /// Always equals to the [`City`] of its [`Building`].
    ///
    /// [`Building`]: super::Building
    /// [`City`]: super::City
    pub city_id: city::Id,

    /// [`Number`] of this [`Unit`] inside its [`Building`].
    ///
    /// [`Building`]: super::Building
    pub number: Number,

    /// [`Kind`] of this [`Unit`].
    pub kind: Kind,

    /// Number of bedrooms in this [`Unit`].
    pub bedrooms: u8,

    /// Number of bathrooms in this [`Unit`].
    pub bathrooms: u8,

    /// [`Area`] of this [`Unit`].
    pub area: Area,

    /// Floor this [`Unit`] is located on.
    pub floor: i16,

    /// [`Pricing`] of this [`Unit`].
    pub pricing: Pricing,

    /// [`Status`] of this [`Unit`].
    pub status: Status,

    /// Indicator whether this [`Unit`] is promoted on the home page.
    pub is_featured: bool,

    /// [`Description`] of this [`Unit`].
    pub description: Bilingual<Description>,

    /// [`Features`] of this [`Unit`], if any.
    pub features: Option<Features>,

    /// Image of this [`Unit`], if any.
    pub image: Option<ImageUrl>,

    /// [`DateTime`] when this [`Unit`] was created.
    pub created_at: CreationDateTime,

    /// [`DateTime`] when this [`Unit`] was last modified.
    pub updated_at: ModificationDateTime,
}

/// ID of a [`Unit`].
///
/// Generated out of its [`Building`], [`Number`] and creation timestamp, see
/// [`Id::generate()`].
///
/// [`Building`]: super::Building
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
    /// Creates a new [`Id`] if the given `id` is valid.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        (!id.is_empty()
            && id.len() <= 1024
            && !id.chars().any(char::is_whitespace))
        .then_some(Self(id))
    }

    /// Generates a new [`Id`] for a [`Unit`] with the provided [`Number`] in
    /// the provided [`Building`] created at the provided [`DateTime`].
    ///
    /// [`Building`]: super::Building
    #[must_use]
    pub fn generate(
        building_id: &building::Id,
        number: &Number,
        at: CreationDateTime,
    ) -> Self {
        Self(format!(
            "unit-{building_id}-{}-{}",
            number.as_str().split_whitespace().collect::<Vec<_>>().join("-"),
            at.unix_timestamp_millis(),
        ))
    }
}

impl std::str::FromStr for Id {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `unit::Id`")
    }
}

define_text! {
    #[doc = "Number of a [`Unit`] inside its `Building`, like `A-1204`."]
    pub struct Number;
    check = |s| s.trim() == s && !s.is_empty() && s.len() <= 64;
}

define_text! {
    #[doc = "Free-form list of [`Unit`] features, like `Garden, Sea view`."]
    pub struct Features;
    check = |s| s.trim() == s && !s.is_empty() && s.len() <= 4096;
}

/// Area of a [`Unit`] in square meters.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Area(Decimal);

impl Area {
    /// Creates a new [`Area`] if the provided `value` is positive.
    #[must_use]
    pub fn new(value: Decimal) -> Option<Self> {
        (value > Decimal::ZERO).then_some(Self(value))
    }

    /// Returns the value of this [`Area`] in square meters.
    #[must_use]
    pub const fn get(self) -> Decimal {
        self.0
    }
}

impl std::str::FromStr for Area {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<Decimal>()
            .ok()
            .and_then(Self::new)
            .ok_or("invalid `Area`")
    }
}

/// Prices and payment terms of a [`Unit`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Pricing {
    /// Accepted [`PaymentType`].
    pub payment_type: PaymentType,

    /// Price when paying in cash.
    pub price: Money,

    /// Total price when paying in installments, if they are accepted.
    pub installment_price: Option<Money>,

    /// Number of years installments span, if they are accepted.
    pub installment_years: Option<u8>,

    /// Down payment required for installments, if any.
    pub down_payment: Option<Percent>,
}

impl Pricing {
    /// Markup applied to the cash price when no installment price is set.
    const DEFAULT_INSTALLMENT_MARKUP: Decimal =
        Decimal::from_parts(12, 0, 0, false, 1);

    /// Returns the total price when paying in installments, if installments
    /// are accepted.
    ///
    /// Defaults to the cash price with a 20% markup.
    #[must_use]
    pub fn effective_installment_price(&self) -> Option<Money> {
        if !self.payment_type.allows_installments() {
            return None;
        }
        Some(self.installment_price.unwrap_or(Money {
            amount: (self.price.amount * Self::DEFAULT_INSTALLMENT_MARKUP)
                .round_dp(2),
            currency: self.price.currency,
        }))
    }

    /// Returns the amount due upfront when paying in installments, if they
    /// are accepted and require a down payment.
    #[must_use]
    pub fn down_payment_amount(&self) -> Option<Money> {
        let total = self.effective_installment_price()?;
        self.down_payment.map(|p| Money {
            amount: p.of(total.amount),
            currency: total.currency,
        })
    }
}

define_kind! {
    #[doc = "Kind of a [`Unit`]."]
    enum Kind {
        #[doc = "Apartment in a multi-storey building."]
        Apartment = "apartment",

        #[doc = "Apartment on the top floor."]
        Penthouse = "penthouse",

        #[doc = "Standalone house."]
        Villa = "villa",

        #[doc = "House sharing walls with neighbors."]
        Townhouse = "townhouse",

        #[doc = "Single-room apartment."]
        Studio = "studio",
    }
}

define_kind! {
    #[doc = "Payment type accepted for a [`Unit`]."]
    enum PaymentType {
        #[doc = "Full payment upfront."]
        Cash = "Cash",

        #[doc = "Payment spread over years."]
        Installments = "Installments",

        #[doc = "Either of the above."]
        Both = "Both",
    }
}

impl PaymentType {
    /// Indicates whether this [`PaymentType`] allows paying in installments.
    #[must_use]
    pub const fn allows_installments(self) -> bool {
        matches!(self, Self::Installments | Self::Both)
    }

    /// Indicates whether a [`Unit`] with this [`PaymentType`] satisfies a
    /// search for the `wanted` one.
    #[must_use]
    pub fn satisfies(self, wanted: Self) -> bool {
        self == wanted || self == Self::Both
    }
}

define_kind! {
    #[doc = "Sales status of a [`Unit`]."]
    enum Status {
        #[doc = "Can be bought."]
        Available = "available",

        #[doc = "Reserved by a buyer."]
        Reserved = "reserved",

        #[doc = "Already sold."]
        Sold = "sold",
    }
}

/// [`DateTime`] when a [`Unit`] was created.
pub type CreationDateTime = DateTimeOf<(Unit, unit::Creation)>;

/// [`DateTime`] when a [`Unit`] was last modified.
pub type ModificationDateTime = DateTimeOf<(Unit, unit::Modification)>;

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use common::{Money, Percent};
    use rust_decimal::Decimal;

    use super::{
        building, Area, CreationDateTime, Id, Number, PaymentType, Pricing,
    };

    fn money(s: &str) -> Money {
        Money::egp(s.parse::<Decimal>().unwrap())
    }

    #[test]
    fn id_is_built_from_building_and_number() {
        let at = CreationDateTime::UNIX_EPOCH
            + Duration::from_millis(1_718_000_000_000);
        let building = building::Id::new("nile-tower-1717000000000").unwrap();

        assert_eq!(
            Id::generate(&building, &Number::new("A 12").unwrap(), at)
                .to_string(),
            "unit-nile-tower-1717000000000-A-12-1718000000000",
        );
    }

    #[test]
    fn both_satisfies_any_payment_type() {
        assert!(PaymentType::Both.satisfies(PaymentType::Cash));
        assert!(PaymentType::Both.satisfies(PaymentType::Installments));
        assert!(PaymentType::Cash.satisfies(PaymentType::Cash));
        assert!(!PaymentType::Cash.satisfies(PaymentType::Installments));
        assert!(!PaymentType::Installments.satisfies(PaymentType::Both));
    }

    #[test]
    fn installment_price_defaults_to_markup() {
        let pricing = Pricing {
            payment_type: PaymentType::Both,
            price: money("1000000"),
            installment_price: None,
            installment_years: Some(5),
            down_payment: None,
        };
        assert_eq!(
            pricing.effective_installment_price(),
            Some(money("1200000")),
        );

        let explicit = Pricing {
            installment_price: Some(money("1150000")),
            ..pricing
        };
        assert_eq!(
            explicit.effective_installment_price(),
            Some(money("1150000")),
        );

        let cash = Pricing {
            payment_type: PaymentType::Cash,
            ..pricing
        };
        assert_eq!(cash.effective_installment_price(), None);
    }

    #[test]
    fn down_payment_applies_to_installment_price() {
        let pricing = Pricing {
            payment_type: PaymentType::Installments,
            price: money("1000000"),
            installment_price: None,
            installment_years: Some(6),
            down_payment: Percent::new(Decimal::from(20)),
        };
        assert_eq!(pricing.down_payment_amount(), Some(money("240000")));

        let cash = Pricing {
            payment_type: PaymentType::Cash,
            ..pricing
        };
        assert_eq!(cash.down_payment_amount(), None);
    }

    #[test]
    fn area_is_positive() {
        assert_eq!("120.5".parse::<Area>().unwrap().to_string(), "120.5");
        assert!("0".parse::<Area>().is_err());
        assert!("-3".parse::<Area>().is_err());
        assert!("big".parse::<Area>().is_err());
    }
}
