//! [`Database`] implementations.

#![allow(
    clippy::items_after_statements,
    reason = "`const SQL` after statements"
)]
#![allow(clippy::too_many_lines, reason = "SQL-related code a bit verbose")]

mod admin;
mod building;
mod city;
mod content;
mod inquiry;
mod search;
mod timeline;
mod unit;

use async_trait::async_trait;
use common::Bilingual;
use postgres_types::FromSql;
use refinery_core::{
    traits::r#async::{AsyncQuery, AsyncTransaction},
    AsyncMigrate, Migration,
};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::infra::{database, postgres};
#[cfg(doc)]
use crate::infra::Database;

use super::Postgres;

/// Reads a [`Bilingual`] value out of the `default` and `ar` columns of the
/// provided [`Row`].
fn bilingual<'r, T>(row: &'r Row, default: &str, ar: &str) -> Bilingual<T>
where
    T: FromSql<'r>,
{
    Bilingual::new(row.get(default), row.get(ar))
}

/// Reads a row count out of the provided `column`.
fn count(row: &Row, column: &str) -> u32 {
    u32::try_from(row.get::<_, i64>(column)).unwrap_or(u32::MAX)
}

/// Narrows down a `SMALLINT` value to a [`u8`], clamping it into range.
fn narrow(value: i16) -> u8 {
    u8::try_from(value.max(0)).unwrap_or(u8::MAX)
}

/// Widens the provided [`u8`] into a `SMALLINT` value.
fn widen(value: u8) -> i16 {
    value.into()
}

/// Builds a case-insensitive `ILIKE` pattern matching any text containing the
/// provided one literally.
fn contains_pattern(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[async_trait]
impl AsyncTransaction for Postgres {
    type Error = Traced<database::Error>;

    async fn execute(
        &mut self,
        queries: &[&str],
    ) -> Result<usize, Self::Error> {
        let mut conn = self.0.connection().await?;
        AsyncTransaction::execute(&mut **conn, queries)
            .await
            .map_err(tracerr::from_and_wrap!(=> postgres::Error))
            .map_err(tracerr::map_from)
    }
}

#[async_trait]
impl AsyncQuery<Vec<Migration>> for Postgres {
    async fn query(
        &mut self,
        query: &str,
    ) -> Result<Vec<Migration>, <Self as AsyncTransaction>::Error> {
        let mut conn = self.0.connection().await?;
        AsyncQuery::query(&mut **conn, query)
            .await
            .map_err(tracerr::from_and_wrap!(=> postgres::Error))
            .map_err(tracerr::map_from)
    }
}

impl AsyncMigrate for Postgres {}
