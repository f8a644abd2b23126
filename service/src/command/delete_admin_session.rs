//! [`Command`] for deleting a [`Session`].

use common::operations::{By, Delete};
use derive_more::From;
use tracerr::Traced;

use crate::{
    domain::admin::{session, Session},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for deleting a [`Session`] (signing out).
///
/// Deleting an already deleted [`Session`] is not an error.
#[derive(Clone, Copy, Debug, From)]
pub struct DeleteAdminSession {
    /// ID of the [`Session`] to delete.
    pub session_id: session::Id,
}

impl<Db> Command<DeleteAdminSession> for Service<Db>
where
    Db: Database<
        Delete<By<Session, session::Id>>,
        Ok = bool,
        Err = Traced<database::Error>,
    >,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: DeleteAdminSession,
    ) -> Result<Self::Ok, Self::Err> {
        let DeleteAdminSession { session_id } = cmd;

        self.database()
            .execute(Delete(By::new(session_id)))
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

/// Error of [`DeleteAdminSession`] [`Command`] execution.
pub type ExecutionError = database::Error;

#[cfg(all(test, feature = "postgres"))]
mod spec {
    use secrecy::SecretBox;

    use crate::{
        command::{
            authorize_admin_session, AuthorizeAdminSession, Command as _,
            CreateAdminSession,
        },
        domain::{admin::Password, contact::Email},
        fake::{self, FakeDb},
    };

    use super::DeleteAdminSession;

    #[tokio::test]
    async fn signed_out_session_is_not_authorized() {
        let db = FakeDb::default();
        db.admins
            .lock()
            .unwrap()
            .push(fake::admin("admin@example.com", "correct horse"));
        let service = fake::service(db.clone());
        let signed_in = service
            .execute(CreateAdminSession {
                email: Email::new("admin@example.com").unwrap(),
                password: SecretBox::new(Box::new(
                    Password::new("correct horse").unwrap(),
                )),
            })
            .await
            .unwrap();

        service
            .execute(DeleteAdminSession {
                session_id: signed_in.session.id,
            })
            .await
            .unwrap();
        let err = service
            .execute(AuthorizeAdminSession {
                token: signed_in.token,
            })
            .await
            .unwrap_err();

        assert!(
            matches!(
                err.as_ref(),
                authorize_admin_session::ExecutionError::SessionNotExists(_),
            ),
            "wrong error: {err}",
        );
        assert!(db.sessions.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn ignores_unknown_session() {
        let db = FakeDb::default();

        fake::service(db)
            .execute(DeleteAdminSession {
                session_id: crate::domain::admin::session::Id::new(),
            })
            .await
            .unwrap();
    }
}
