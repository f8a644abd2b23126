//! [`Unit`]-related read definitions.

#[cfg(doc)]
use crate::domain::Unit;

pub mod list {
    //! [`Unit`] list definitions.

    use crate::domain::{building, city};
    #[cfg(doc)]
    use crate::domain::{Building, City, Unit};

    /// Selector of a [`Unit`] list.
    #[derive(Clone, Debug, Eq, PartialEq)]
    pub enum Selector {
        /// Every [`Unit`], newest first, optionally narrowed down.
        All {
            /// ID of the [`City`] to narrow down to.
            city_id: Option<city::Id>,

            /// ID of the [`Building`] to narrow down to.
            building_id: Option<building::Id>,
        },

        /// Available [`Unit`]s of a [`City`], by their number.
        AvailableByCity(city::Id),

        /// Available [`Unit`]s of a [`Building`], by their floor.
        AvailableByBuilding(building::Id),

        /// Featured available [`Unit`]s, optionally of a [`City`].
        Featured {
            /// ID of the [`City`] to narrow down to.
            city_id: Option<city::Id>,

            /// Maximum number of [`Unit`]s to select.
            limit: u8,
        },

        /// Available [`Unit`]s matching a search [`Filter`], cheapest first.
        ///
        /// [`Filter`]: super::search::Filter
        Search(super::search::Filter),
    }
}

pub mod search {
    //! [`Unit`] search definitions.

    use rust_decimal::Decimal;

    use crate::domain::{
        city,
        unit::{Area, PaymentType},
    };
    #[cfg(doc)]
    use crate::domain::{City, Unit};

    /// Filter of a [`Unit`] search.
    ///
    /// Every criterion is optional and they are combined with `AND`.
    #[derive(Clone, Debug, Default, Eq, PartialEq)]
    pub struct Filter {
        /// ID of the [`City`] to search in.
        pub city_id: Option<city::Id>,

        /// Text to match against [`City`] names and locations.
        pub location: Option<String>,

        /// Minimum cash price.
        pub min_price: Option<Decimal>,

        /// Maximum cash price.
        pub max_price: Option<Decimal>,

        /// [`PaymentType`] a [`Unit`] must accept.
        pub payment_type: Option<PaymentType>,

        /// Minimum number of installment years.
        pub installment_years: Option<u8>,

        /// Minimum [`Area`].
        pub min_area: Option<Area>,

        /// Maximum [`Area`].
        pub max_area: Option<Area>,
    }
}
