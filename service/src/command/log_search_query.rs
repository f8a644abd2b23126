//! [`Command`] for logging a [`SearchQuery`].

use common::operations::Insert;
use tracerr::Traced;

use crate::{
    domain::{search, SearchQuery},
    infra::{database, Database},
    read::unit::search::Filter,
    Service,
};

use super::Command;

/// [`Command`] for logging a units search [`Filter`] as a [`SearchQuery`]
/// for analytics.
#[derive(Clone, Debug)]
pub struct LogSearchQuery {
    /// [`Filter`] the visitor searched with.
    pub filter: Filter,
}

impl<Db> Command<LogSearchQuery> for Service<Db>
where
    Db: Database<Insert<SearchQuery>, Err = Traced<database::Error>>,
{
    type Ok = SearchQuery;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: LogSearchQuery,
    ) -> Result<Self::Ok, Self::Err> {
        let Filter {
            location,
            min_price,
            max_price,
            payment_type,
            installment_years,
            ..
        } = cmd.filter;

        let query = SearchQuery {
            id: search::Id::new(),
            location,
            min_price,
            max_price,
            payment_type,
            installment_years,
            created_at: search::CreationDateTime::now(),
        };
        self.database()
            .execute(Insert(query.clone()))
            .await
            .map_err(tracerr::wrap!())
            .map(drop)?;

        Ok(query)
    }
}

/// Error of [`LogSearchQuery`] [`Command`] execution.
pub type ExecutionError = database::Error;
