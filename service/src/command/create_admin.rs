//! [`Command`] for creating a new [`Admin`].

use common::{
    operations::{By, Insert, Select},
    DateTime,
};
use derive_more::{Display, Error, From};
use secrecy::SecretBox;
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::admin::Password;
use crate::{
    domain::{admin, contact::Email, Admin},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Admin`].
#[derive(Clone, Debug)]
pub struct CreateAdmin {
    /// [`Email`] of a new [`Admin`].
    pub email: Email,

    /// [`Password`] of a new [`Admin`].
    pub password: SecretBox<admin::Password>,
}

impl<Db> Command<CreateAdmin> for Service<Db>
where
    Db: for<'e> Database<
            Select<By<Option<Admin>, &'e Email>>,
            Ok = Option<Admin>,
            Err = Traced<database::Error>,
        > + Database<Insert<Admin>, Err = Traced<database::Error>>,
{
    type Ok = Admin;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateAdmin) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateAdmin { email, password } = cmd;

        let existing = self
            .database()
            .execute(Select(By::new(&email)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if existing.is_some() {
            return Err(tracerr::new!(E::EmailOccupied(email)));
        }

        let admin = Admin {
            id: admin::Id::new(),
            email,
            password_hash: admin::PasswordHash::new(&password),
            created_at: DateTime::now().coerce(),
        };
        self.database()
            .execute(Insert(admin.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(admin)
    }
}

/// Error of [`CreateAdmin`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Email`] is already occupied by another [`Admin`].
    #[display("`{_0}` email is occupied")]
    EmailOccupied(#[error(not(source))] Email),
}

#[cfg(all(test, feature = "postgres"))]
mod spec {
    use secrecy::SecretBox;

    use crate::{
        command::Command as _,
        domain::{admin::Password, contact::Email},
        fake::{self, FakeDb},
    };

    use super::{CreateAdmin, ExecutionError};

    fn create(email: &str) -> CreateAdmin {
        CreateAdmin {
            email: Email::new(email).unwrap(),
            password: SecretBox::new(Box::new(
                Password::new("correct horse").unwrap(),
            )),
        }
    }

    #[tokio::test]
    async fn stores_admin_with_hashed_password() {
        let db = FakeDb::default();

        let admin = fake::service(db.clone())
            .execute(create("admin@example.com"))
            .await
            .unwrap();

        assert_eq!(admin.email, Email::new("admin@example.com").unwrap());
        assert!(admin.password_hash.verify(&SecretBox::new(Box::new(
            Password::new("correct horse").unwrap(),
        ))));
        assert_eq!(db.admins.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn rejects_occupied_email() {
        let db = FakeDb::default();
        db.admins
            .lock()
            .unwrap()
            .push(fake::admin("admin@example.com", "another horse"));

        let err = fake::service(db.clone())
            .execute(create("admin@example.com"))
            .await
            .unwrap_err();

        assert!(
            matches!(err.as_ref(), ExecutionError::EmailOccupied(_)),
            "wrong error: {err}",
        );
        assert_eq!(db.admins.lock().unwrap().len(), 1);
    }
}
