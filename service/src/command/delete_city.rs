//! [`Command`] for deleting a [`City`].

use common::operations::{By, Delete};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::{Building, Unit};
use crate::{
    domain::{city, City},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for deleting a [`City`] along with all its [`Building`]s and
/// [`Unit`]s.
#[derive(Clone, Debug, From)]
pub struct DeleteCity {
    /// ID of the [`City`] to delete.
    pub id: city::Id,
}

impl<Db> Command<DeleteCity> for Service<Db>
where
    Db: Database<
        Delete<By<City, city::Id>>,
        Ok = bool,
        Err = Traced<database::Error>,
    >,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: DeleteCity) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let DeleteCity { id } = cmd;

        let deleted = self
            .database()
            .execute(Delete(By::new(id.clone())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if !deleted {
            return Err(tracerr::new!(E::CityNotExists(id)));
        }
        Ok(())
    }
}

/// Error of [`DeleteCity`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`City`] with the provided ID does not exist.
    #[display("`City(id: {_0})` does not exist")]
    #[from(ignore)]
    CityNotExists(#[error(not(source))] city::Id),
}

#[cfg(all(test, feature = "postgres"))]
mod spec {
    use crate::{
        command::Command as _,
        domain::city,
        fake::{self, FakeDb},
    };

    use super::{DeleteCity, ExecutionError};

    #[tokio::test]
    async fn removes_city() {
        let db = FakeDb::default();
        let cairo = fake::city("New Cairo");
        let zayed = fake::city("Sheikh Zayed");
        db.cities.lock().unwrap().extend([cairo.clone(), zayed.clone()]);

        fake::service(db.clone())
            .execute(DeleteCity { id: cairo.id })
            .await
            .unwrap();

        let cities = db.cities.lock().unwrap();
        assert_eq!(cities.len(), 1);
        assert_eq!(cities[0].id, zayed.id);
    }

    #[tokio::test]
    async fn rejects_unknown_city() {
        let db = FakeDb::default();
        db.cities.lock().unwrap().push(fake::city("New Cairo"));

        let err = fake::service(db.clone())
            .execute(DeleteCity {
                id: city::Id::new("atlantis").unwrap(),
            })
            .await
            .unwrap_err();

        assert!(
            matches!(err.as_ref(), ExecutionError::CityNotExists(_)),
            "wrong error: {err}",
        );
        assert_eq!(db.cities.lock().unwrap().len(), 1);
    }
}
