//! [`Query`] collection related to the multiple [`Unit`]s.

use common::operations::By;

use crate::{domain::Unit, read::unit::list::Selector};
#[cfg(doc)]
use crate::{domain::City, Query};

use super::DatabaseQuery;

/// Queries a list of [`Unit`]s.
pub type List = DatabaseQuery<By<Vec<Unit>, Selector>>;

/// Maximum number of featured [`Unit`]s shown on a [`City`] page.
pub const FEATURED_LIMIT: u8 = 3;
