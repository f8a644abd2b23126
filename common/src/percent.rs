//! [`Percent`]-related definitions.

use std::str::FromStr;

use derive_more::Display;
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use rust_decimal::Decimal;

/// Percentage within `0..=100`, like a down payment share.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Percent(Decimal);

impl Percent {
    /// Creates a new [`Percent`] if the provided value is within `0..=100`.
    #[must_use]
    pub fn new(val: Decimal) -> Option<Self> {
        (Decimal::ZERO..=Decimal::ONE_HUNDRED)
            .contains(&val)
            .then_some(Self(val))
    }

    /// Returns the numeric value of this [`Percent`].
    #[must_use]
    pub const fn value(self) -> Decimal {
        self.0
    }

    /// Applies this [`Percent`] to the provided `amount`, rounding the
    /// result to 2 decimal places.
    #[must_use]
    pub fn of(self, amount: Decimal) -> Decimal {
        (amount * self.0 / Decimal::ONE_HUNDRED).round_dp(2)
    }
}

impl FromStr for Percent {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s.trim_end_matches('%'))
            .ok()
            .and_then(Self::new)
            .ok_or("invalid percent value")
    }
}

#[cfg(feature = "juniper")]
mod juniper {
    //! Module providing integration with [`juniper`] crate.

    use juniper::{graphql_scalar, InputValue, ScalarValue, Value};

    /// Percentage within `0..=100`, like `"10"` or `"12.5"`.
    #[graphql_scalar(with = Self, parse_token(String))]
    type Percent = super::Percent;

    impl Percent {
        fn to_output<S: ScalarValue>(p: &Percent) -> Value<S> {
            Value::scalar(p.to_string())
        }

        fn from_input<S: ScalarValue>(
            input: &InputValue<S>,
        ) -> Result<Self, String> {
            let s = input.as_string_value().ok_or_else(|| {
                format!(
                    "Cannot parse `Percent` input scalar from non-string \
                     value: {input}",
                )
            })?;
            s.parse()
                .map_err(|e| format!("Cannot parse `Percent` input scalar: {e}"))
        }
    }
}

#[cfg(test)]
mod spec {
    use rust_decimal::Decimal;

    use super::Percent;

    #[test]
    fn bounded_by_hundred() {
        assert!(Percent::new(Decimal::ZERO).is_some());
        assert!(Percent::new(Decimal::ONE_HUNDRED).is_some());
        assert!(Percent::new(Decimal::NEGATIVE_ONE).is_none());
        assert!(Percent::new(Decimal::from(101)).is_none());

        assert_eq!(
            "12.5%".parse::<Percent>().map(Percent::value),
            Ok(Decimal::new(125, 1)),
        );
        assert!("abc".parse::<Percent>().is_err());
    }

    #[test]
    fn applies_to_amount() {
        let p = Percent::new(Decimal::from(10)).unwrap();

        assert_eq!(p.of(Decimal::from(2_500_000)), Decimal::from(250_000));
        assert_eq!(p.of(Decimal::new(333, 2)), Decimal::new(33, 2));
    }
}
