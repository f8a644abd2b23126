//! Helpers for defining GraphQL scalars on top of domain types.

use std::{fmt, marker::PhantomData, str::FromStr};

use juniper::{
    GraphQLType, InputValue, ParseScalarResult, ParseScalarValue, ScalarToken,
    ScalarValue, Value,
};

/// Helper type to use in `#[graphql(with = ..)]` attribute, representing the
/// target type as a GraphQL string via the `As` domain type.
///
/// The domain type validates the input through its [`FromStr`] impl, so the
/// API wrapper only needs [`TryFrom`] and [`AsRef`] for it.
///
/// ```ignore
/// #[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
/// #[graphql(name = "CityId", with = scalar::Via::<domain::city::Id>)]
/// pub struct Id(domain::city::Id);
/// ```
#[derive(Debug)]
pub struct Via<As>(PhantomData<As>);

impl<As> Via<As> {
    /// Converts the target type into a string [`Value`] by using [`Display`]
    /// impl of `As` type.
    ///
    /// [`Display`]: fmt::Display
    pub fn to_output<T, S>(value: &T) -> Value<S>
    where
        As: fmt::Display,
        T: AsRef<As>,
        S: ScalarValue,
    {
        Value::from(value.as_ref().to_string())
    }

    /// Constructs the target type from a string [`InputValue`] by using
    /// [`FromStr`] impl of `As` type.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the input value is not a string;
    /// - the input value cannot be parsed into `As` type;
    /// - the parsed value cannot be converted into the target type.
    pub fn from_input<T, S>(input: &InputValue<S>) -> Result<T, String>
    where
        As: FromStr + fmt::Display,
        As::Err: fmt::Display,
        T: TryFrom<As> + GraphQLType<S, TypeInfo = ()>,
        T::Error: fmt::Display,
        S: ScalarValue,
    {
        let name = T::name(&()).unwrap_or("<unnamed>");
        let s = input.as_string_value().ok_or_else(|| {
            format!(
                "Cannot parse input scalar `{name}`: expected string input \
                 value, found: {input}",
            )
        })?;
        let value = s.parse::<As>().map_err(|e| {
            format!("Cannot parse input scalar `{name}` from \"{s}\": {e}")
        })?;
        T::try_from(value)
            .map_err(|e| format!("Cannot parse input scalar `{name}`: {e}"))
    }

    /// Parse the provided [`ScalarToken`].
    ///
    /// # Errors
    ///
    /// Returns an error if the token cannot be parsed as [`String`].
    pub fn parse_token<S: ScalarValue>(
        value: ScalarToken<'_>,
    ) -> ParseScalarResult<S> {
        <String as ParseScalarValue<S>>::from_str(value)
    }
}

#[cfg(test)]
mod spec {
    use derive_more::{AsRef, Display, From, Into};
    use juniper::{DefaultScalarValue, GraphQLScalar, InputValue, Value};
    use service::domain::city;

    use super::Via;

    #[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
    #[graphql(name = "TestCityId", with = Via::<city::Id>)]
    struct Id(city::Id);

    #[test]
    fn converts_via_domain_type() {
        let input = InputValue::<DefaultScalarValue>::scalar("new-cairo");
        let id: Id = Via::<city::Id>::from_input(&input).unwrap();
        assert_eq!(id.to_string(), "new-cairo");

        let out: Value<DefaultScalarValue> = Via::<city::Id>::to_output(&id);
        assert_eq!(out.as_string_value(), Some("new-cairo"));
    }

    #[test]
    fn rejects_invalid_input() {
        let input = InputValue::<DefaultScalarValue>::scalar(5);
        let err = Via::<city::Id>::from_input::<Id, _>(&input).unwrap_err();
        assert!(err.contains("TestCityId"), "{err}");
    }
}
