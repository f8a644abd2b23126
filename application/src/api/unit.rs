//! [`Unit`]-related definitions.

use common::{DateTime, Money, Percent};
use derive_more::{AsRef, Display, From, Into};
use juniper::{graphql_object, GraphQLEnum, GraphQLInputObject, GraphQLScalar};
use rust_decimal::Decimal;
use service::{
    domain::{self, city},
    query::{self, Degraded},
    read, Query as _,
};

use crate::{
    api::{self, scalar, text},
    AsError, Context, Error,
};

/// A unit (apartment, villa, etc.) for sale.
#[derive(Clone, Debug, From)]
pub struct Unit(domain::Unit);

/// A unit (apartment, villa, etc.) for sale.
#[graphql_object(context = Context)]
impl Unit {
    /// Unique identifier of this `Unit`.
    #[must_use]
    pub fn id(&self) -> Id {
        self.0.id.clone().into()
    }

    /// ID of the `Building` this `Unit` belongs to.
    #[must_use]
    pub fn building_id(&self) -> api::building::Id {
        self.0.building_id.clone().into()
    }

    /// `Building` this `Unit` belongs to.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Unit.building",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn building(
        &self,
        ctx: &Context,
    ) -> Result<Option<api::Building>, Error> {
        ctx.service()
            .execute(Degraded(query::building::Enriched(
                self.0.building_id.clone(),
            )))
            .await
            .map_err(AsError::into_error)
            .map(|b| b.map(Into::into))
    }

    /// ID of the `City` this `Unit` is located in.
    #[must_use]
    pub fn city_id(&self) -> api::city::Id {
        self.0.city_id.clone().into()
    }

    /// `City` this `Unit` is located in.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Unit.city",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn city(&self, ctx: &Context) -> Result<Option<api::City>, Error> {
        ctx.service()
            .execute(Degraded(query::city::Enriched(self.0.city_id.clone())))
            .await
            .map_err(AsError::into_error)
            .map(|c| c.map(Into::into))
    }

    /// Number of this `Unit` inside its `Building`.
    #[must_use]
    pub fn number(&self) -> Number {
        self.0.number.clone().into()
    }

    /// Kind of this `Unit`.
    #[must_use]
    pub fn kind(&self) -> Kind {
        self.0.kind.into()
    }

    /// Number of bedrooms.
    #[must_use]
    pub fn bedrooms(&self) -> i32 {
        self.0.bedrooms.into()
    }

    /// Number of bathrooms.
    #[must_use]
    pub fn bathrooms(&self) -> i32 {
        self.0.bathrooms.into()
    }

    /// Area of this `Unit` in square meters.
    #[must_use]
    pub fn area(&self) -> Area {
        self.0.area.into()
    }

    /// Floor this `Unit` is located on.
    #[must_use]
    pub fn floor(&self) -> i32 {
        self.0.floor.into()
    }

    /// Prices and payment terms of this `Unit`.
    #[must_use]
    pub fn pricing(&self) -> Pricing {
        Pricing(self.0.pricing)
    }

    /// Sales status of this `Unit`.
    #[must_use]
    pub fn status(&self) -> Status {
        self.0.status.into()
    }

    /// Indicator whether this `Unit` is promoted on the home page.
    #[must_use]
    pub fn is_featured(&self) -> bool {
        self.0.is_featured
    }

    /// Description of this `Unit`.
    #[must_use]
    pub fn description(&self) -> api::BilingualText {
        (&self.0.description).into()
    }

    /// Features of this `Unit`, if any.
    #[must_use]
    pub fn features(&self) -> Option<Features> {
        self.0.features.clone().map(Into::into)
    }

    /// Image of this `Unit`, if any.
    #[must_use]
    pub fn image(&self) -> Option<text::ImageUrl> {
        self.0.image.clone().map(Into::into)
    }

    /// `DateTime` when this `Unit` was created.
    #[must_use]
    pub fn created_at(&self) -> DateTime {
        self.0.created_at.coerce()
    }

    /// `DateTime` when this `Unit` was last modified.
    #[must_use]
    pub fn updated_at(&self) -> DateTime {
        self.0.updated_at.coerce()
    }
}

/// Prices and payment terms of a [`Unit`].
#[derive(Clone, Copy, Debug)]
pub struct Pricing(domain::unit::Pricing);

/// Prices and payment terms of a `Unit`.
#[graphql_object(name = "UnitPricing", context = Context)]
impl Pricing {
    /// Accepted payment type.
    #[must_use]
    pub fn payment_type(&self) -> PaymentType {
        self.0.payment_type.into()
    }

    /// Price when paying in cash.
    #[must_use]
    pub fn price(&self) -> Money {
        self.0.price
    }

    /// Human-readable cash price, like `2.5M EGP`.
    #[must_use]
    pub fn price_text(&self) -> String {
        self.0.price.compact()
    }

    /// Total price when paying in installments, if they are accepted.
    ///
    /// Defaults to the cash price with a 20% markup.
    #[must_use]
    pub fn installment_price(&self) -> Option<Money> {
        self.0.effective_installment_price()
    }

    /// Number of years installments span, if they are accepted.
    #[must_use]
    pub fn installment_years(&self) -> Option<i32> {
        self.0.installment_years.map(Into::into)
    }

    /// Down payment required for installments, if any.
    #[must_use]
    pub fn down_payment(&self) -> Option<Percent> {
        self.0.down_payment
    }

    /// Amount due upfront when paying in installments, if any.
    #[must_use]
    pub fn down_payment_amount(&self) -> Option<Money> {
        self.0.down_payment_amount()
    }
}

/// Unique identifier of a `Unit`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "UnitId", with = scalar::Via::<domain::unit::Id>)]
pub struct Id(domain::unit::Id);

/// Number of a `Unit` inside its `Building`, like `A-1204`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "UnitNumber", with = scalar::Via::<domain::unit::Number>)]
pub struct Number(domain::unit::Number);

/// Free-form list of `Unit` features.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "UnitFeatures",
    with = scalar::Via::<domain::unit::Features>,
)]
pub struct Features(domain::unit::Features);

/// Positive area of a `Unit` in square meters, like `120.5`.
#[derive(AsRef, Clone, Copy, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "UnitArea", with = scalar::Via::<domain::unit::Area>)]
pub struct Area(domain::unit::Area);

/// Kind of a `Unit`.
#[derive(Clone, Copy, Debug, GraphQLEnum)]
#[graphql(name = "UnitKind")]
pub enum Kind {
    /// Apartment in a multi-storey building.
    Apartment,

    /// Apartment on the top floor.
    Penthouse,

    /// Standalone house.
    Villa,

    /// House sharing walls with neighbors.
    Townhouse,

    /// Single-room apartment.
    Studio,
}

impl From<domain::unit::Kind> for Kind {
    fn from(kind: domain::unit::Kind) -> Self {
        use domain::unit::Kind as K;
        match kind {
            K::Apartment => Self::Apartment,
            K::Penthouse => Self::Penthouse,
            K::Villa => Self::Villa,
            K::Townhouse => Self::Townhouse,
            K::Studio => Self::Studio,
        }
    }
}

impl From<Kind> for domain::unit::Kind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Apartment => Self::Apartment,
            Kind::Penthouse => Self::Penthouse,
            Kind::Villa => Self::Villa,
            Kind::Townhouse => Self::Townhouse,
            Kind::Studio => Self::Studio,
        }
    }
}

/// Payment type accepted for a `Unit`.
#[derive(Clone, Copy, Debug, GraphQLEnum)]
#[graphql(name = "PaymentType")]
pub enum PaymentType {
    /// Full payment upfront.
    Cash,

    /// Payment spread over years.
    Installments,

    /// Either of the above.
    Both,
}

impl From<domain::unit::PaymentType> for PaymentType {
    fn from(ty: domain::unit::PaymentType) -> Self {
        use domain::unit::PaymentType as P;
        match ty {
            P::Cash => Self::Cash,
            P::Installments => Self::Installments,
            P::Both => Self::Both,
        }
    }
}

impl From<PaymentType> for domain::unit::PaymentType {
    fn from(ty: PaymentType) -> Self {
        match ty {
            PaymentType::Cash => Self::Cash,
            PaymentType::Installments => Self::Installments,
            PaymentType::Both => Self::Both,
        }
    }
}

/// Sales status of a `Unit`.
#[derive(Clone, Copy, Debug, GraphQLEnum)]
#[graphql(name = "UnitStatus")]
pub enum Status {
    /// Can be bought.
    Available,

    /// Reserved by a buyer.
    Reserved,

    /// Already sold.
    Sold,
}

impl From<domain::unit::Status> for Status {
    fn from(status: domain::unit::Status) -> Self {
        use domain::unit::Status as S;
        match status {
            S::Available => Self::Available,
            S::Reserved => Self::Reserved,
            S::Sold => Self::Sold,
        }
    }
}

impl From<Status> for domain::unit::Status {
    fn from(status: Status) -> Self {
        match status {
            Status::Available => Self::Available,
            Status::Reserved => Self::Reserved,
            Status::Sold => Self::Sold,
        }
    }
}

/// Editable fields of a `Unit`.
#[derive(Clone, Debug, GraphQLInputObject)]
#[graphql(name = "UnitInput")]
pub struct Input {
    /// ID of the `Building` the `Unit` belongs to.
    pub building_id: api::building::Id,

    /// ID of the `City` the `Unit` is located in.
    ///
    /// Ignored in favor of the `City` of the `Building`.
    pub city_id: Option<api::city::Id>,

    /// Number inside the `Building`.
    pub number: Number,

    /// Kind.
    pub kind: Kind,

    /// Number of bedrooms.
    pub bedrooms: i32,

    /// Number of bathrooms.
    pub bathrooms: i32,

    /// Area in square meters.
    pub area: Area,

    /// Floor.
    pub floor: i32,

    /// Accepted payment type.
    pub payment_type: PaymentType,

    /// Price when paying in cash.
    pub price: Money,

    /// Total price when paying in installments.
    pub installment_price: Option<Money>,

    /// Number of years installments span.
    pub installment_years: Option<i32>,

    /// Down payment required for installments.
    pub down_payment: Option<Percent>,

    /// Sales status.
    pub status: Status,

    /// Indicator whether the `Unit` is promoted on the home page.
    pub is_featured: Option<bool>,

    /// English description.
    pub description: text::Description,

    /// Arabic description.
    pub description_ar: Option<text::Description>,

    /// Features.
    pub features: Option<Features>,

    /// Image.
    pub image: Option<text::ImageUrl>,
}

/// [`Input`] parsed into domain values.
#[derive(Debug)]
pub(crate) struct Parsed {
    /// ID of the [`domain::Building`].
    pub(crate) building_id: domain::building::Id,

    /// ID of the [`domain::City`].
    pub(crate) city_id: Option<city::Id>,

    /// Number of the [`domain::Unit`].
    pub(crate) number: domain::unit::Number,

    /// Kind of the [`domain::Unit`].
    pub(crate) kind: domain::unit::Kind,

    /// Bedrooms of the [`domain::Unit`].
    pub(crate) bedrooms: u8,

    /// Bathrooms of the [`domain::Unit`].
    pub(crate) bathrooms: u8,

    /// Area of the [`domain::Unit`].
    pub(crate) area: domain::unit::Area,

    /// Floor of the [`domain::Unit`].
    pub(crate) floor: i16,

    /// Pricing of the [`domain::Unit`].
    pub(crate) pricing: domain::unit::Pricing,

    /// Status of the [`domain::Unit`].
    pub(crate) status: domain::unit::Status,

    /// Featured flag of the [`domain::Unit`].
    pub(crate) is_featured: bool,

    /// Description of the [`domain::Unit`].
    pub(crate) description: common::Bilingual<domain::Description>,

    /// Features of the [`domain::Unit`].
    pub(crate) features: Option<domain::unit::Features>,

    /// Image of the [`domain::Unit`].
    pub(crate) image: Option<domain::ImageUrl>,
}

impl Input {
    /// Parses this [`Input`] into domain values.
    ///
    /// # Errors
    ///
    /// Errors if numbers are out of range or prices are negative.
    pub(crate) fn parse(self) -> Result<Parsed, Error> {
        let Self {
            building_id,
            city_id,
            number,
            kind,
            bedrooms,
            bathrooms,
            area,
            floor,
            payment_type,
            price,
            installment_price,
            installment_years,
            down_payment,
            status,
            is_featured,
            description,
            description_ar,
            features,
            image,
        } = self;

        let non_negative = |m: Money| {
            (m.amount >= Decimal::ZERO)
                .then_some(m)
                .ok_or_else(|| Error::from(api::InputError::InvalidPrice))
        };

        Ok(Parsed {
            building_id: building_id.into(),
            city_id: city_id.map(Into::into),
            number: number.into(),
            kind: kind.into(),
            bedrooms: api::narrow(bedrooms)?,
            bathrooms: api::narrow(bathrooms)?,
            area: area.into(),
            floor: api::narrow(floor)?,
            pricing: domain::unit::Pricing {
                payment_type: payment_type.into(),
                price: non_negative(price)?,
                installment_price: installment_price
                    .map(non_negative)
                    .transpose()?,
                installment_years: installment_years
                    .map(api::narrow)
                    .transpose()?,
                down_payment,
            },
            status: status.into(),
            is_featured: is_featured.unwrap_or_default(),
            description: text::bilingual(description, description_ar),
            features: features.map(Into::into),
            image: image.map(Into::into),
        })
    }
}

/// Criteria of a `Unit` search, combined with `AND`.
#[derive(Clone, Debug, Default, GraphQLInputObject)]
#[graphql(name = "UnitSearchFilter")]
pub struct SearchFilter {
    /// ID of the `City` to search in.
    pub city_id: Option<api::city::Id>,

    /// Text to match against `City` names and locations.
    pub location: Option<String>,

    /// Minimum cash price in EGP.
    pub min_price: Option<f64>,

    /// Maximum cash price in EGP.
    pub max_price: Option<f64>,

    /// Payment type a `Unit` must accept.
    pub payment_type: Option<PaymentType>,

    /// Minimum number of installment years.
    pub installment_years: Option<i32>,

    /// Minimum area in square meters.
    pub min_area: Option<f64>,

    /// Maximum area in square meters.
    pub max_area: Option<f64>,
}

impl SearchFilter {
    /// Converts this [`SearchFilter`] into a [`read::unit::search::Filter`].
    ///
    /// Blank location text is ignored.
    ///
    /// # Errors
    ///
    /// Errors if prices or areas are not finite non-negative numbers.
    pub(crate) fn parse(self) -> Result<read::unit::search::Filter, Error> {
        let Self {
            city_id,
            location,
            min_price,
            max_price,
            payment_type,
            installment_years,
            min_area,
            max_area,
        } = self;

        let price = |v: f64| {
            Decimal::from_f64_retain(v)
                .filter(|d| *d >= Decimal::ZERO)
                .ok_or_else(|| Error::from(api::InputError::InvalidPrice))
        };
        let area = |v: f64| {
            Decimal::from_f64_retain(v)
                .and_then(domain::unit::Area::new)
                .ok_or_else(|| Error::from(api::InputError::NumberOutOfRange))
        };

        Ok(read::unit::search::Filter {
            city_id: city_id.map(Into::into),
            location: location
                .map(|l| l.trim().to_owned())
                .filter(|l| !l.is_empty()),
            min_price: min_price.map(price).transpose()?,
            max_price: max_price.map(price).transpose()?,
            payment_type: payment_type.map(Into::into),
            installment_years: installment_years
                .map(api::narrow)
                .transpose()?,
            min_area: min_area.map(area).transpose()?,
            max_area: max_area.map(area).transpose()?,
        })
    }
}

/// Loads featured available [`Unit`]s, optionally of the [`City`] with the
/// provided ID.
///
/// [`City`]: domain::City
pub(crate) async fn featured(
    city_id: Option<city::Id>,
    ctx: &Context,
) -> Result<Vec<Unit>, Error> {
    ctx.service()
        .execute(Degraded(query::units::List::by(
            read::unit::list::Selector::Featured {
                city_id,
                limit: query::units::FEATURED_LIMIT,
            },
        )))
        .await
        .map_err(AsError::into_error)
        .map(|list| list.into_iter().map(Into::into).collect())
}

#[cfg(test)]
mod spec {
    use common::Money;
    use rust_decimal::Decimal;
    use service::domain;

    use crate::api::{building, text};

    use super::{
        Area, Input, Kind, Number, PaymentType, SearchFilter, Status,
    };

    fn input() -> Input {
        Input {
            building_id: building::Id::from(
                domain::building::Id::new("nile-tower-1").unwrap(),
            ),
            city_id: None,
            number: Number::from(domain::unit::Number::new("A-12").unwrap()),
            kind: Kind::Apartment,
            bedrooms: 3,
            bathrooms: 2,
            area: Area::from("150".parse::<domain::unit::Area>().unwrap()),
            floor: 4,
            payment_type: PaymentType::Both,
            price: Money::egp(Decimal::from(2_500_000)),
            installment_price: None,
            installment_years: Some(6),
            down_payment: None,
            status: Status::Available,
            is_featured: None,
            description: text::Description::from(
                domain::Description::new("").unwrap(),
            ),
            description_ar: None,
            features: None,
            image: None,
        }
    }

    #[test]
    fn parses_unit_input() {
        let parsed = input().parse().unwrap();

        assert_eq!(parsed.bedrooms, 3);
        assert_eq!(parsed.floor, 4);
        assert!(!parsed.is_featured);
        assert_eq!(parsed.pricing.installment_years, Some(6));
        assert_eq!(
            parsed.pricing.effective_installment_price(),
            Some(Money::egp(Decimal::from(3_000_000))),
        );
    }

    #[test]
    fn rejects_out_of_range_input() {
        let err = Input {
            bedrooms: 300,
            ..input()
        }
        .parse()
        .unwrap_err();
        assert_eq!(err.code, "NUMBER_OUT_OF_RANGE");

        let err = Input {
            price: Money::egp(Decimal::from(-1)),
            ..input()
        }
        .parse()
        .unwrap_err();
        assert_eq!(err.code, "INVALID_PRICE");
    }

    #[test]
    fn search_filter_ignores_blank_location() {
        let filter = SearchFilter {
            location: Some("   ".into()),
            min_price: Some(1_000_000.0),
            payment_type: Some(PaymentType::Installments),
            ..SearchFilter::default()
        }
        .parse()
        .unwrap();

        assert_eq!(filter.location, None);
        assert_eq!(filter.min_price, Some(Decimal::from(1_000_000)));
        assert_eq!(
            filter.payment_type,
            Some(domain::unit::PaymentType::Installments),
        );
    }

    #[test]
    fn search_filter_rejects_invalid_numbers() {
        let err = SearchFilter {
            max_price: Some(f64::NAN),
            ..SearchFilter::default()
        }
        .parse()
        .unwrap_err();
        assert_eq!(err.code, "INVALID_PRICE");

        let err = SearchFilter {
            min_area: Some(0.0),
            ..SearchFilter::default()
        }
        .parse()
        .unwrap_err();
        assert_eq!(err.code, "NUMBER_OUT_OF_RANGE");
    }
}
