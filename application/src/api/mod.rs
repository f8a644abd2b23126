//! GraphQL API definitions.

pub mod admin;
pub mod building;
pub mod city;
pub mod content;
pub mod inquiry;
mod mutation;
mod query;
pub mod scalar;
mod subscription;
pub mod text;
pub mod unit;

use crate::define_error;

pub use self::{
    admin::Admin,
    building::Building,
    city::City,
    inquiry::Inquiry,
    mutation::Mutation,
    query::Query,
    subscription::Subscription,
    text::BilingualText,
    unit::Unit,
};

/// GraphQL schema.
pub type Schema = juniper::RootNode<'static, Query, Mutation, Subscription>;

define_error! {
    enum InputError {
        #[code = "INVALID_COORDINATE"]
        #[status = BAD_REQUEST]
        #[message = "Latitude and longitude must be provided together and be \
                     within their ranges"]
        InvalidCoordinate,

        #[code = "GALLERY_TOO_LARGE"]
        #[status = BAD_REQUEST]
        #[message = "Gallery holds at most 8 images"]
        GalleryTooLarge,

        #[code = "NUMBER_OUT_OF_RANGE"]
        #[status = BAD_REQUEST]
        #[message = "Provided number is out of the allowed range"]
        NumberOutOfRange,

        #[code = "INVALID_PRICE"]
        #[status = BAD_REQUEST]
        #[message = "Provided price is not a valid amount"]
        InvalidPrice,

        #[code = "INVALID_MESSAGE"]
        #[status = BAD_REQUEST]
        #[message = "Message must be at most 5000 characters long"]
        InvalidMessage,
    }
}

/// Converts the provided GraphQL integer into a narrower one.
///
/// # Errors
///
/// Errors with [`InputError::NumberOutOfRange`] if the value doesn't fit.
fn narrow<T: TryFrom<i32>>(value: i32) -> Result<T, crate::Error> {
    T::try_from(value).map_err(|_| InputError::NumberOutOfRange.into())
}

/// Widens the provided count into a GraphQL integer, saturating on overflow.
fn widen(value: impl TryInto<i32>) -> i32 {
    value.try_into().unwrap_or(i32::MAX)
}
