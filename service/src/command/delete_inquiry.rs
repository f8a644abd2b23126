//! [`Command`] for deleting an [`Inquiry`].

use common::operations::{By, Delete};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{inquiry, Inquiry},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for deleting an [`Inquiry`].
#[derive(Clone, Copy, Debug, From)]
pub struct DeleteInquiry {
    /// ID of the [`Inquiry`] to delete.
    pub id: inquiry::Id,
}

impl<Db> Command<DeleteInquiry> for Service<Db>
where
    Db: Database<
        Delete<By<Inquiry, inquiry::Id>>,
        Ok = bool,
        Err = Traced<database::Error>,
    >,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: DeleteInquiry,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let DeleteInquiry { id } = cmd;

        let deleted = self
            .database()
            .execute(Delete(By::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if !deleted {
            return Err(tracerr::new!(E::InquiryNotExists(id)));
        }
        Ok(())
    }
}

/// Error of [`DeleteInquiry`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Inquiry`] with the provided ID does not exist.
    #[display("`Inquiry(id: {_0})` does not exist")]
    #[from(ignore)]
    InquiryNotExists(#[error(not(source))] inquiry::Id),
}

#[cfg(all(test, feature = "postgres"))]
mod spec {
    use common::DateTime;

    use crate::{
        command::Command as _,
        domain::{contact::Email, inquiry, Inquiry, Name},
        fake::{self, FakeDb},
    };

    use super::{DeleteInquiry, ExecutionError};

    fn inquiry() -> Inquiry {
        Inquiry {
            id: inquiry::Id::new(),
            name: Name::new("Mona Hassan").unwrap(),
            email: Email::new("mona@example.com").unwrap(),
            phone: None,
            city_id: None,
            unit_id: None,
            message: None,
            created_at: DateTime::now().coerce(),
        }
    }

    #[tokio::test]
    async fn removes_inquiry() {
        let db = FakeDb::default();
        let inquiry = inquiry();
        db.inquiries.lock().unwrap().push(inquiry.clone());

        fake::service(db.clone())
            .execute(DeleteInquiry { id: inquiry.id })
            .await
            .unwrap();

        assert!(db.inquiries.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn rejects_unknown_inquiry() {
        let db = FakeDb::default();
        db.inquiries.lock().unwrap().push(inquiry());

        let err = fake::service(db.clone())
            .execute(DeleteInquiry {
                id: inquiry::Id::new(),
            })
            .await
            .unwrap_err();

        assert!(
            matches!(err.as_ref(), ExecutionError::InquiryNotExists(_)),
            "wrong error: {err}",
        );
        assert_eq!(db.inquiries.lock().unwrap().len(), 1);
    }
}
