//! [`MasterPhase`]-related [`Database`] implementations.

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    domain::building::timeline::MasterPhase,
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

use super::bilingual;

impl<C> Database<Select<By<Vec<MasterPhase>, ()>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<MasterPhase>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<MasterPhase>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT id, name, name_ar, \
                   description, description_ar, \
                   typical_duration_days, display_order, is_active \
            FROM timeline_phases \
            WHERE is_active \
            ORDER BY display_order ASC, id ASC";
        Ok(self
            .query(SQL, &[])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| MasterPhase {
                id: row.get("id"),
                name: bilingual(&row, "name", "name_ar"),
                description: bilingual(&row, "description", "description_ar"),
                typical_duration_days: row
                    .get::<_, Option<i32>>("typical_duration_days")
                    .and_then(|d| u16::try_from(d).ok()),
                display_order: row.get("display_order"),
                is_active: row.get("is_active"),
            })
            .collect())
    }
}
