//! [`Command`] for deleting a [`Unit`].

use common::operations::{By, Delete};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{unit, Unit},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for deleting a [`Unit`].
#[derive(Clone, Debug, From)]
pub struct DeleteUnit {
    /// ID of the [`Unit`] to delete.
    pub id: unit::Id,
}

impl<Db> Command<DeleteUnit> for Service<Db>
where
    Db: Database<
        Delete<By<Unit, unit::Id>>,
        Ok = bool,
        Err = Traced<database::Error>,
    >,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: DeleteUnit) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let DeleteUnit { id } = cmd;

        let deleted = self
            .database()
            .execute(Delete(By::new(id.clone())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if !deleted {
            return Err(tracerr::new!(E::UnitNotExists(id)));
        }
        Ok(())
    }
}

/// Error of [`DeleteUnit`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Unit`] with the provided ID does not exist.
    #[display("`Unit(id: {_0})` does not exist")]
    #[from(ignore)]
    UnitNotExists(#[error(not(source))] unit::Id),
}

#[cfg(all(test, feature = "postgres"))]
mod spec {
    use crate::{
        command::Command as _,
        domain::unit,
        fake::{self, FakeDb},
    };

    use super::{DeleteUnit, ExecutionError};

    #[tokio::test]
    async fn removes_unit() {
        let db = FakeDb::default();
        let cairo = fake::city("New Cairo");
        let tower = fake::building("Nile Tower", &cairo.id);
        let unit = fake::unit("A-101", &tower);
        db.units.lock().unwrap().push(unit.clone());

        fake::service(db.clone())
            .execute(DeleteUnit { id: unit.id })
            .await
            .unwrap();

        assert!(db.units.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn rejects_unknown_unit() {
        let db = FakeDb::default();

        let err = fake::service(db)
            .execute(DeleteUnit {
                id: unit::Id::new("unit-missing").unwrap(),
            })
            .await
            .unwrap_err();

        assert!(
            matches!(err.as_ref(), ExecutionError::UnitNotExists(_)),
            "wrong error: {err}",
        );
    }
}
