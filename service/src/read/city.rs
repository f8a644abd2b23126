//! [`City`]-related read definitions.

use crate::domain::City;

/// Aggregated counts of a [`City`], computed at read time.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Stats {
    /// Number of `Building`s in the [`City`].
    pub total_buildings: u32,

    /// Number of `Unit`s in the [`City`].
    pub total_units: u32,

    /// Number of available `Unit`s in the [`City`].
    pub available_units: u32,
}

/// [`City`] along with its [`Stats`].
#[derive(Clone, Debug)]
pub struct Enriched {
    /// [`City`] itself.
    pub city: City,

    /// [`Stats`] of the [`City`].
    pub stats: Stats,
}

pub mod list {
    //! [`City`] list definitions.

    #[cfg(doc)]
    use crate::domain::City;

    /// Selector of a [`City`] list.
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub enum Selector {
        /// Every [`City`], newest first.
        All,

        /// [`City`]s with an `active` status, oldest first.
        Active,
    }
}
