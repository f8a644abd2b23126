//! [`SearchQuery`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{unit, DateTimeOf};
use derive_more::{Display, From, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use rust_decimal::Decimal;
use uuid::Uuid;

use super::unit::PaymentType;

/// Units search performed by a website visitor, kept for analytics.
#[derive(Clone, Debug)]
pub struct SearchQuery {
    /// ID of this [`SearchQuery`].
    pub id: Id,

    /// Location text the visitor searched for, if any.
    pub location: Option<String>,

    /// Minimum price the visitor searched for, if any.
    pub min_price: Option<Decimal>,

    /// Maximum price the visitor searched for, if any.
    pub max_price: Option<Decimal>,

    /// [`PaymentType`] the visitor searched for, if any.
    pub payment_type: Option<PaymentType>,

    /// Minimum installment years the visitor searched for, if any.
    pub installment_years: Option<u8>,

    /// [`DateTime`] when this [`SearchQuery`] was performed.
    pub created_at: CreationDateTime,
}

/// ID of a [`SearchQuery`].
#[derive(Clone, Copy, Debug, Display, Eq, From, Hash, Into, PartialEq)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// [`DateTime`] when a [`SearchQuery`] was performed.
pub type CreationDateTime = DateTimeOf<(SearchQuery, unit::Creation)>;
