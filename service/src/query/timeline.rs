//! [`Query`] collection related to construction timelines.

use common::operations::By;

use crate::domain::building::timeline::MasterPhase;
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries active [`MasterPhase`]s by their display order.
pub type MasterPhases = DatabaseQuery<By<Vec<MasterPhase>, ()>>;
