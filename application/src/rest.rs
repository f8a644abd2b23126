//! REST endpoints consumed by the public website.
//!
//! Every endpoint requires the public anonymous key as a bearer token, and
//! speaks JSON with field names of the underlying tables.

use axum::{
    async_trait, extract::FromRequestParts, Extension, Json,
    RequestPartsExt as _,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use common::Bilingual;
use rust_decimal::prelude::ToPrimitive as _;
use secrecy::{ExposeSecret as _, SecretString};
use serde::{Deserialize, Serialize};
use service::{
    command::SubmitInquiry,
    domain::{
        self, city,
        contact::{Email, Phone},
        content, unit,
    },
    query, Command as _, Query as _,
};
use tracing as log;

use crate::{api, define_error, AsError, Error, Service};

/// Public anonymous key the website authorizes with.
#[derive(Clone, Debug)]
pub struct AnonKey(pub SecretString);

/// Proof of a request being authorized with the [`AnonKey`].
#[derive(Clone, Copy, Debug)]
pub struct Anonymous;

#[async_trait]
impl<S> FromRequestParts<S> for Anonymous
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(
        parts: &mut http::request::Parts,
        _: &S,
    ) -> Result<Self, Self::Rejection> {
        let key = parts
            .extensions
            .get::<AnonKey>()
            .cloned()
            .ok_or_else(|| Error::internal(&"missing `AnonKey` extension"))?;
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| Error::from(RestError::Unauthorized))?;

        if is_authorized(&key, bearer.token()) {
            Ok(Self)
        } else {
            Err(RestError::Unauthorized.into())
        }
    }
}

/// Checks whether the provided bearer `token` matches the [`AnonKey`].
fn is_authorized(key: &AnonKey, token: &str) -> bool {
    key.0.expose_secret() == token
}

/// Splits the provided [`Bilingual`] text into its English and Arabic parts.
fn split<T: AsRef<str>>(text: &Bilingual<T>) -> (String, Option<String>) {
    (
        text.default.as_ref().to_owned(),
        text.ar.as_ref().map(|t| t.as_ref().to_owned()),
    )
}

/// Achievement counter row.
#[derive(Clone, Debug, Serialize)]
pub struct CounterRow {
    /// ID of the counter.
    pub id: String,

    /// Counted value.
    pub counter_value: u64,

    /// English label.
    pub counter_label_en: String,

    /// Arabic label.
    pub counter_label_ar: Option<String>,

    /// English suffix.
    pub suffix_en: String,

    /// Arabic suffix.
    pub suffix_ar: Option<String>,

    /// Icon name.
    pub icon_name: Option<&'static str>,

    /// Position among the others.
    pub display_order: i32,
}

impl From<content::Counter> for CounterRow {
    fn from(counter: content::Counter) -> Self {
        let (counter_label_en, counter_label_ar) = split(&counter.label);
        let (suffix_en, suffix_ar) = split(&counter.suffix);
        Self {
            id: counter.id.to_string(),
            counter_value: counter.value,
            counter_label_en,
            counter_label_ar,
            suffix_en,
            suffix_ar,
            icon_name: counter.icon.map(content::Icon::as_str),
            display_order: counter.display_order,
        }
    }
}

/// Hero banner of the home page.
#[derive(Clone, Debug, Serialize)]
pub struct HeroRow {
    /// Headlines, if any.
    pub content: Option<HeroContentRow>,

    /// Feature chips.
    pub chips: Vec<HeroChipRow>,

    /// Clients rating, if any.
    pub rating: Option<HeroRatingRow>,
}

/// Hero headlines row.
#[derive(Clone, Debug, Serialize)]
pub struct HeroContentRow {
    /// English main headline.
    pub main_headline_en: String,

    /// Arabic main headline.
    pub main_headline_ar: Option<String>,

    /// English subheadline.
    pub subheadline_en: String,

    /// Arabic subheadline.
    pub subheadline_ar: Option<String>,
}

/// Hero chip row.
#[derive(Clone, Debug, Serialize)]
pub struct HeroChipRow {
    /// ID of the chip.
    pub id: String,

    /// English title.
    pub title_en: String,

    /// Arabic title.
    pub title_ar: Option<String>,

    /// Icon name.
    pub icon_name: Option<&'static str>,

    /// Position among the others.
    pub display_order: i32,
}

/// Hero rating row.
#[derive(Clone, Debug, Serialize)]
pub struct HeroRatingRow {
    /// Rating value, like `4.9`.
    pub rating_value: f64,

    /// Number of clients rated.
    pub total_clients: u32,

    /// English text.
    pub rating_text_en: String,

    /// Arabic text.
    pub rating_text_ar: Option<String>,
}

impl From<content::Hero> for HeroRow {
    fn from(hero: content::Hero) -> Self {
        let content::Hero {
            content,
            chips,
            rating,
        } = hero;

        Self {
            content: content.map(|c| {
                let (main_headline_en, main_headline_ar) = split(&c.headline);
                let (subheadline_en, subheadline_ar) = split(&c.subheadline);
                HeroContentRow {
                    main_headline_en,
                    main_headline_ar,
                    subheadline_en,
                    subheadline_ar,
                }
            }),
            chips: chips
                .into_iter()
                .map(|chip| {
                    let (title_en, title_ar) = split(&chip.title);
                    HeroChipRow {
                        id: chip.id.to_string(),
                        title_en,
                        title_ar,
                        icon_name: chip.icon.map(content::Icon::as_str),
                        display_order: chip.display_order,
                    }
                })
                .collect(),
            rating: rating.map(|r| {
                let (rating_text_en, rating_text_ar) = split(&r.text);
                HeroRatingRow {
                    rating_value: r.value.to_f64().unwrap_or_default(),
                    total_clients: r.total_clients,
                    rating_text_en,
                    rating_text_ar,
                }
            }),
        }
    }
}

/// Client testimonial row.
#[derive(Clone, Debug, Serialize)]
pub struct TestimonialRow {
    /// ID of the testimonial.
    pub id: String,

    /// English client name.
    pub name_en: String,

    /// Arabic client name.
    pub name_ar: Option<String>,

    /// English client role.
    pub role_en: String,

    /// Arabic client role.
    pub role_ar: Option<String>,

    /// English testimonial.
    pub content_en: String,

    /// Arabic testimonial.
    pub content_ar: Option<String>,

    /// Rating in stars.
    pub rating: u8,

    /// Photo of the client.
    pub image: Option<String>,

    /// Position among the others.
    pub display_order: i32,
}

impl From<content::Testimonial> for TestimonialRow {
    fn from(t: content::Testimonial) -> Self {
        let (name_en, name_ar) = split(&t.name);
        let (role_en, role_ar) = split(&t.role);
        let (content_en, content_ar) = split(&t.content);
        Self {
            id: t.id.to_string(),
            name_en,
            name_ar,
            role_en,
            role_ar,
            content_en,
            content_ar,
            rating: t.rating.stars(),
            image: t.image.map(|i| i.to_string()),
            display_order: t.display_order,
        }
    }
}

/// Body of a submitted inquiry.
#[derive(Clone, Debug, Deserialize)]
pub struct InquiryBody {
    /// Name of the person.
    pub name: String,

    /// Email of the person.
    pub email: String,

    /// Phone of the person.
    #[serde(default)]
    pub phone: Option<String>,

    /// Free-form message.
    #[serde(default)]
    pub message: Option<String>,

    /// ID of the city the person is interested in.
    #[serde(default)]
    pub city_id: Option<String>,

    /// ID of the unit the person is interested in.
    #[serde(default)]
    pub unit_id: Option<String>,
}

impl InquiryBody {
    /// Parses this [`InquiryBody`] into a [`SubmitInquiry`] command.
    ///
    /// Blank optional fields are treated as absent.
    ///
    /// # Errors
    ///
    /// Errors if any of the fields is invalid.
    pub fn parse(self) -> Result<SubmitInquiry, Error> {
        /// Trims the provided optional value, dropping it if blank.
        fn present(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_owned())
                .filter(|v| !v.is_empty())
        }

        let Self {
            name,
            email,
            phone,
            message,
            city_id,
            unit_id,
        } = self;

        Ok(SubmitInquiry {
            name: domain::Name::new(name.trim())
                .ok_or_else(|| Error::from(RestError::InvalidName))?,
            email: Email::new(email.trim())
                .ok_or_else(|| Error::from(RestError::InvalidEmail))?,
            phone: present(phone)
                .map(|p| {
                    Phone::new(p)
                        .ok_or_else(|| Error::from(RestError::InvalidPhone))
                })
                .transpose()?,
            city_id: present(city_id)
                .map(|id| {
                    city::Id::new(id)
                        .ok_or_else(|| Error::from(RestError::InvalidReference))
                })
                .transpose()?,
            unit_id: present(unit_id)
                .map(|id| {
                    unit::Id::new(id)
                        .ok_or_else(|| Error::from(RestError::InvalidReference))
                })
                .transpose()?,
            message: api::inquiry::compose_message(None, message.as_deref())?,
        })
    }
}

/// Submitted inquiry row.
#[derive(Clone, Debug, Serialize)]
pub struct InquiryRow {
    /// ID of the inquiry.
    pub id: String,

    /// Name of the person.
    pub name: String,

    /// Email of the person.
    pub email: String,

    /// Phone of the person.
    pub phone: Option<String>,

    /// Free-form message.
    pub message: Option<String>,

    /// ID of the referenced city.
    pub city_id: Option<String>,

    /// ID of the referenced unit.
    pub unit_id: Option<String>,

    /// RFC 3339 timestamp of the submission.
    pub created_at: String,
}

impl From<domain::Inquiry> for InquiryRow {
    fn from(inquiry: domain::Inquiry) -> Self {
        Self {
            id: inquiry.id.to_string(),
            name: inquiry.name.to_string(),
            email: inquiry.email.to_string(),
            phone: inquiry.phone.map(|p| p.to_string()),
            message: inquiry.message.map(|m| m.to_string()),
            city_id: inquiry.city_id.map(|id| id.to_string()),
            unit_id: inquiry.unit_id.map(|id| id.to_string()),
            created_at: inquiry.created_at.to_rfc3339(),
        }
    }
}

/// `GET /counters` handler.
#[tracing::instrument(skip_all, fields(otel.name = "GET /counters"))]
pub async fn counters(
    _: Anonymous,
    Extension(service): Extension<Service>,
) -> Result<Json<Vec<CounterRow>>, Error> {
    let counters = service
        .execute(query::content::Counters)
        .await
        .map_err(AsError::into_error)?;
    Ok(Json(counters.into_iter().map(Into::into).collect()))
}

/// `GET /hero-content` handler.
#[tracing::instrument(skip_all, fields(otel.name = "GET /hero-content"))]
pub async fn hero_content(
    _: Anonymous,
    Extension(service): Extension<Service>,
) -> Result<Json<HeroRow>, Error> {
    let hero = service
        .execute(query::content::Hero)
        .await
        .map_err(AsError::into_error)?;
    Ok(Json(hero.into()))
}

/// `GET /testimonials` handler.
#[tracing::instrument(skip_all, fields(otel.name = "GET /testimonials"))]
pub async fn testimonials(
    _: Anonymous,
    Extension(service): Extension<Service>,
) -> Result<Json<Vec<TestimonialRow>>, Error> {
    let testimonials = service
        .execute(query::content::Testimonials)
        .await
        .map_err(AsError::into_error)?;
    Ok(Json(testimonials.into_iter().map(Into::into).collect()))
}

/// `POST /inquiries` handler.
#[tracing::instrument(skip_all, fields(otel.name = "POST /inquiries"))]
pub async fn submit_inquiry(
    _: Anonymous,
    Extension(service): Extension<Service>,
    Json(body): Json<InquiryBody>,
) -> Result<(http::StatusCode, Json<InquiryRow>), Error> {
    let inquiry = service
        .execute(body.parse()?)
        .await
        .map_err(AsError::into_error)?;
    log::info!("inquiry `{}` submitted", inquiry.id);
    Ok((http::StatusCode::CREATED, Json(inquiry.into())))
}

define_error! {
    enum RestError {
        #[code = "UNAUTHORIZED"]
        #[status = UNAUTHORIZED]
        #[message = "Missing or invalid anonymous key"]
        Unauthorized,

        #[code = "INVALID_NAME"]
        #[status = BAD_REQUEST]
        #[message = "Name must not be blank"]
        InvalidName,

        #[code = "INVALID_EMAIL"]
        #[status = BAD_REQUEST]
        #[message = "Email address is invalid"]
        InvalidEmail,

        #[code = "INVALID_PHONE"]
        #[status = BAD_REQUEST]
        #[message = "Phone number is invalid"]
        InvalidPhone,

        #[code = "INVALID_REFERENCE"]
        #[status = BAD_REQUEST]
        #[message = "Referenced city or unit ID is invalid"]
        InvalidReference,
    }
}
