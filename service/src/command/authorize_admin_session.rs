//! [`Command`] for authorizing an [`Admin`] [`Session`].

use common::operations::{By, Select};
use derive_more::{Display, Error, From};
use jsonwebtoken::Validation;
use tracerr::Traced;

use crate::{
    domain::{
        admin::{self, session, Session},
        Admin,
    },
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for authorizing an [`Admin`] [`Session`] by its token.
#[derive(Clone, Debug, From)]
pub struct AuthorizeAdminSession {
    /// [`Session`] token to authorize.
    pub token: session::Token,
}

/// Output of [`AuthorizeAdminSession`] [`Command`].
#[derive(Clone, Debug)]
pub struct Output {
    /// Authorized [`Session`].
    pub session: Session,

    /// [`Admin`] the [`Session`] belongs to.
    pub admin: Admin,
}

impl<Db> Command<AuthorizeAdminSession> for Service<Db>
where
    Db: Database<
            Select<By<Option<Session>, session::Id>>,
            Ok = Option<Session>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Admin>, admin::Id>>,
            Ok = Option<Admin>,
            Err = Traced<database::Error>,
        >,
{
    type Ok = Output;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: AuthorizeAdminSession,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let AuthorizeAdminSession { token } = cmd;

        let claims = jsonwebtoken::decode::<Session>(
            token.as_ref(),
            &self.config().jwt_decoding_key,
            &Validation::default(),
        )
        .map_err(tracerr::from_and_wrap!(=> E))?
        .claims;

        let session = self
            .database()
            .execute(Select(By::<Option<Session>, _>::new(claims.id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .filter(|s| !s.is_expired_at(session::ExpirationDateTime::now()))
            .ok_or(E::SessionNotExists(claims.id))
            .map_err(tracerr::wrap!())?;

        let admin = self
            .database()
            .execute(Select(By::<Option<Admin>, _>::new(session.admin_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::AdminNotExists(session.admin_id))
            .map_err(tracerr::wrap!())?;

        Ok(Output { session, admin })
    }
}

/// Error of [`AuthorizeAdminSession`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`jsonwebtoken`] decoding error.
    #[display("Failed to decode a JSON Web Token: {_0}")]
    JsonWebTokenDecodeError(jsonwebtoken::errors::Error),

    /// [`Session`] is signed out or expired.
    #[display("`Session(id: {_0})` does not exist or is expired")]
    #[from(ignore)]
    SessionNotExists(#[error(not(source))] session::Id),

    /// [`Admin`] the [`Session`] belongs to does not exist.
    #[display("`Admin(id: {_0})` does not exist")]
    #[from(ignore)]
    AdminNotExists(#[error(not(source))] admin::Id),
}

#[cfg(all(test, feature = "postgres"))]
mod spec {
    use std::time::Duration;

    use secrecy::SecretBox;

    use crate::{
        command::{Command as _, CreateAdminSession},
        domain::{
            admin::{session, Password},
            contact::Email,
        },
        fake::{self, FakeDb},
    };

    use super::{AuthorizeAdminSession, ExecutionError};

    async fn sign_in(db: &FakeDb) -> session::Token {
        db.admins
            .lock()
            .unwrap()
            .push(fake::admin("admin@example.com", "correct horse"));
        fake::service(db.clone())
            .execute(CreateAdminSession {
                email: Email::new("admin@example.com").unwrap(),
                password: SecretBox::new(Box::new(
                    Password::new("correct horse").unwrap(),
                )),
            })
            .await
            .unwrap()
            .token
    }

    #[tokio::test]
    async fn authorizes_signed_in_admin() {
        let db = FakeDb::default();
        let token = sign_in(&db).await;

        let out = fake::service(db.clone())
            .execute(AuthorizeAdminSession { token })
            .await
            .unwrap();

        assert_eq!(out.session.admin_id, out.admin.id);
        assert_eq!(db.sessions.lock().unwrap()[0], out.session);
    }

    #[tokio::test]
    async fn rejects_expired_session() {
        let db = FakeDb::default();
        let token = sign_in(&db).await;
        db.sessions.lock().unwrap()[0].expires_at =
            session::ExpirationDateTime::now() - Duration::from_secs(1);

        let err = fake::service(db)
            .execute(AuthorizeAdminSession { token })
            .await
            .unwrap_err();

        assert!(
            matches!(err.as_ref(), ExecutionError::SessionNotExists(_)),
            "wrong error: {err}",
        );
    }

    #[tokio::test]
    async fn rejects_foreign_token() {
        let token = jsonwebtoken::encode(
            &jsonwebtoken::Header::default(),
            &session::Session {
                id: session::Id::new(),
                admin_id: crate::domain::admin::Id::new(),
                expires_at: session::ExpirationDateTime::now()
                    + Duration::from_secs(60),
            },
            &jsonwebtoken::EncodingKey::from_secret(b"another secret"),
        )
        .unwrap();

        let err = fake::service(FakeDb::default())
            .execute(AuthorizeAdminSession {
                token: token.parse().unwrap(),
            })
            .await
            .unwrap_err();

        assert!(
            matches!(err.as_ref(), ExecutionError::JsonWebTokenDecodeError(_)),
            "wrong error: {err}",
        );
    }
}
