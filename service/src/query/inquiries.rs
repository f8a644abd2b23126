//! [`Query`] collection related to the multiple [`Inquiry`]s.

use common::{
    operations::{By, Select},
    DateTime,
};
use tracerr::Traced;

use crate::{
    domain::Inquiry,
    infra::{database, Database},
    read::inquiry::Filter,
    Query, Service,
};

/// [`Query`] of [`Inquiry`]s satisfying a [`Filter`], newest first.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct List(pub Filter);

impl<Db> Query<List> for Service<Db>
where
    Db: Database<
        Select<By<Vec<Inquiry>, ()>>,
        Ok = Vec<Inquiry>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Vec<Inquiry>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        List(filter): List,
    ) -> Result<Self::Ok, Self::Err> {
        let inquiries = self
            .database()
            .execute(Select(By::new(())))
            .await
            .map_err(tracerr::wrap!())?;
        Ok(filter.apply(inquiries, DateTime::now()))
    }
}
