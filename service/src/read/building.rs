//! [`Building`]-related read definitions.

use crate::domain::Building;

/// Aggregated counts of a [`Building`], computed at read time.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Stats {
    /// Number of `Unit`s in the [`Building`].
    pub total_units: u32,

    /// Number of available `Unit`s in the [`Building`].
    pub available_units: u32,
}

/// [`Building`] along with its [`Stats`].
#[derive(Clone, Debug)]
pub struct Enriched {
    /// [`Building`] itself.
    pub building: Building,

    /// [`Stats`] of the [`Building`].
    pub stats: Stats,
}

pub mod list {
    //! [`Building`] list definitions.

    use crate::domain::city;
    #[cfg(doc)]
    use crate::domain::{Building, City};

    /// Selector of a [`Building`] list.
    #[derive(Clone, Debug, Eq, PartialEq)]
    pub enum Selector {
        /// Every [`Building`], newest first.
        All,

        /// [`Building`]s of the [`City`] with the provided ID, by name.
        ByCity(city::Id),

        /// [`Building`]s having a non-empty timeline, newest first.
        WithTimeline,
    }
}
