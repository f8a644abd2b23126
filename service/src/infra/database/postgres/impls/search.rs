//! [`SearchQuery`]-related [`Database`] implementations.

use common::operations::Insert;
use tracerr::Traced;

use crate::{
    domain::SearchQuery,
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

use super::widen;

impl<C> Database<Insert<SearchQuery>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(query): Insert<SearchQuery>,
    ) -> Result<Self::Ok, Self::Err> {
        let SearchQuery {
            id,
            location,
            min_price,
            max_price,
            payment_type,
            installment_years,
            created_at,
        } = query;

        const SQL: &str = "\
            INSERT INTO search_queries (\
                id, location, min_price, max_price, \
                payment_type, installment_years, created_at\
            ) \
            VALUES (\
                $1::UUID, $2::TEXT, $3::NUMERIC, $4::NUMERIC, \
                $5::VARCHAR, $6::INT2, $7::TIMESTAMPTZ\
            )";
        self.exec(
            SQL,
            &[
                &id,
                &location,
                &min_price,
                &max_price,
                &payment_type,
                &installment_years.map(widen),
                &created_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}
