//! [`Command`] for creating a [`Session`].

use common::{
    operations::{By, Insert, Select},
    DateTime,
};
use derive_more::{Display, Error, From};
use secrecy::SecretBox;
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::admin::{session::Token, Password};
use crate::{
    domain::{
        admin::{self, session, Session},
        contact::Email,
        Admin,
    },
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a [`Session`] by [`Admin`] credentials
/// (signing in).
#[derive(Clone, Debug)]
pub struct CreateAdminSession {
    /// [`Email`] of an [`Admin`].
    pub email: Email,

    /// [`Password`] of an [`Admin`].
    pub password: SecretBox<admin::Password>,
}

/// Output of [`CreateAdminSession`] [`Command`].
#[derive(Clone, Debug)]
pub struct Output {
    /// [`Token`] of the created [`Session`].
    pub token: session::Token,

    /// Created [`Session`].
    pub session: Session,

    /// [`Admin`] whose [`Session`] has been created.
    pub admin: Admin,
}

impl<Db> Command<CreateAdminSession> for Service<Db>
where
    Db: for<'e> Database<
            Select<By<Option<Admin>, &'e Email>>,
            Ok = Option<Admin>,
            Err = Traced<database::Error>,
        > + Database<Insert<Session>, Err = Traced<database::Error>>,
{
    type Ok = Output;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateAdminSession,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateAdminSession { email, password } = cmd;

        let admin = self
            .database()
            .execute(Select(By::new(&email)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::WrongCredentials)
            .map_err(tracerr::wrap!())?;
        if !admin.password_hash.verify(&password) {
            return Err(tracerr::new!(E::WrongCredentials));
        }

        let session = Session {
            id: session::Id::new(),
            admin_id: admin.id,
            expires_at: (DateTime::now() + self.config().session_ttl).coerce(),
        };
        let token = jsonwebtoken::encode(
            &jsonwebtoken::Header::default(),
            &session,
            &self.config().jwt_encoding_key,
        )
        .map_err(tracerr::from_and_wrap!(=> E))?;

        // SAFETY: `jsonwebtoken::encode` always returns a valid
        //         `session::Token`.
        #[expect(unsafe_code, reason = "invariants are preserved")]
        let token = unsafe { session::Token::new_unchecked(token) };

        self.database()
            .execute(Insert(session))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(Output {
            token,
            session,
            admin,
        })
    }
}

/// Error of [`CreateAdminSession`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`jsonwebtoken`] encoding error.
    #[display("Failed to encode a JSON Web Token: {_0}")]
    JsonWebTokenEncodeError(jsonwebtoken::errors::Error),

    /// Wrong [`Email`] or [`Password`] provided.
    #[display("Wrong `Admin` credentials")]
    #[from(ignore)]
    WrongCredentials,
}
