//! [`Command`] for deleting a [`Building`].

use common::operations::{By, Delete};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::Unit;
use crate::{
    domain::{building, Building},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for deleting a [`Building`] along with all its [`Unit`]s.
#[derive(Clone, Debug, From)]
pub struct DeleteBuilding {
    /// ID of the [`Building`] to delete.
    pub id: building::Id,
}

impl<Db> Command<DeleteBuilding> for Service<Db>
where
    Db: Database<
        Delete<By<Building, building::Id>>,
        Ok = bool,
        Err = Traced<database::Error>,
    >,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: DeleteBuilding,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let DeleteBuilding { id } = cmd;

        let deleted = self
            .database()
            .execute(Delete(By::new(id.clone())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if !deleted {
            return Err(tracerr::new!(E::BuildingNotExists(id)));
        }
        Ok(())
    }
}

/// Error of [`DeleteBuilding`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Building`] with the provided ID does not exist.
    #[display("`Building(id: {_0})` does not exist")]
    #[from(ignore)]
    BuildingNotExists(#[error(not(source))] building::Id),
}

#[cfg(all(test, feature = "postgres"))]
mod spec {
    use crate::{
        command::Command as _,
        domain::building,
        fake::{self, FakeDb},
    };

    use super::{DeleteBuilding, ExecutionError};

    #[tokio::test]
    async fn removes_building() {
        let db = FakeDb::default();
        let cairo = fake::city("New Cairo");
        let tower = fake::building("Nile Tower", &cairo.id);
        db.buildings.lock().unwrap().push(tower.clone());

        fake::service(db.clone())
            .execute(DeleteBuilding { id: tower.id })
            .await
            .unwrap();

        assert!(db.buildings.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn rejects_unknown_building() {
        let db = FakeDb::default();
        let cairo = fake::city("New Cairo");
        db.buildings
            .lock()
            .unwrap()
            .push(fake::building("Nile Tower", &cairo.id));

        let err = fake::service(db.clone())
            .execute(DeleteBuilding {
                id: building::Id::new("missing-tower-1").unwrap(),
            })
            .await
            .unwrap_err();

        assert!(
            matches!(err.as_ref(), ExecutionError::BuildingNotExists(_)),
            "wrong error: {err}",
        );
        assert_eq!(db.buildings.lock().unwrap().len(), 1);
    }
}
