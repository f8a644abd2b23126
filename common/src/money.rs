//! [`Money`]-related definitions.

use std::{fmt, str::FromStr};

use rust_decimal::{prelude::ToPrimitive as _, Decimal, RoundingStrategy};

use crate::define_kind;

/// Amount of money in some [`Currency`].
///
/// Unit prices are quoted in [`Currency::Egp`] unless stated otherwise.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Money {
    /// Amount of this [`Money`].
    pub amount: Decimal,

    /// [`Currency`] of this amount.
    pub currency: Currency,
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount.normalize(), self.currency)
    }
}

impl Money {
    /// Creates a new [`Money`] in [`Currency::Egp`].
    #[must_use]
    pub const fn egp(amount: Decimal) -> Self {
        Self {
            amount,
            currency: Currency::Egp,
        }
    }

    /// Returns a human-readable representation of this [`Money`]:
    /// millions are shortened to `2.5M EGP`, smaller amounts are grouped by
    /// thousands as `850,000 EGP`.
    #[must_use]
    pub fn compact(&self) -> String {
        const MILLION: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

        let Self { amount, currency } = self;
        if amount.abs() >= MILLION {
            let millions = (amount / MILLION)
                .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
            return format!("{millions:.1}M {currency}");
        }

        let whole = amount
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_i128()
            .unwrap_or_default();
        let digits = whole.unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(c);
        }
        let sign = if whole < 0 { "-" } else { "" };
        format!("{sign}{grouped} {currency}")
    }
}

impl FromStr for Money {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let split = s.len().checked_sub(3).filter(|&at| at > 0);
        let (amount, currency) = split
            .and_then(|at| s.is_char_boundary(at).then(|| s.split_at(at)))
            .ok_or("too short")?;

        Ok(Self {
            amount: amount.parse().map_err(|_| "invalid amount")?,
            currency: currency.parse().map_err(|_| "invalid currency")?,
        })
    }
}

define_kind! {
    #[doc = "Currency of a [`Money`] amount."]
    enum Currency {
        #[doc = "Egyptian Pound."]
        Egp = "EGP",

        #[doc = "US Dollar."]
        Usd = "USD",

        #[doc = "Euro."]
        Eur = "EUR",
    }
}

#[cfg(feature = "juniper")]
mod juniper {
    //! Module providing integration with [`juniper`] crate.

    use std::str::FromStr as _;

    use juniper::{graphql_scalar, InputValue, ScalarValue, Value};

    /// Money in `{major}.{minor}{currency}` format, where:
    /// - `major` is an integer;
    /// - `minor` is an optional integer;
    /// - `currency` is a three-letter currency code (`EGP`, `USD`, `EUR`).
    #[graphql_scalar(with = Self, parse_token(String))]
    type Money = super::Money;

    impl Money {
        fn to_output<S: ScalarValue>(m: &Money) -> Value<S> {
            Value::scalar(m.to_string())
        }

        fn from_input<S: ScalarValue>(
            input: &InputValue<S>,
        ) -> Result<Self, String> {
            input
                .as_string_value()
                .ok_or_else(|| {
                    format!(
                        "Cannot parse `Money` input scalar from \
                         non-string value: {input}",
                    )
                })
                .and_then(|s| {
                    Self::from_str(s).map_err(|e| {
                        format!("Cannot parse `Money` input scalar: {e}")
                    })
                })
        }
    }
}
