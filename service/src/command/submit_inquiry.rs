//! [`Command`] for submitting a new [`Inquiry`].

use common::operations::{By, Insert, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{
        city,
        contact::{Email, Phone},
        inquiry::{self, Message},
        unit, City, Inquiry, Name, Unit,
    },
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for submitting a new [`Inquiry`] by a website visitor.
#[derive(Clone, Debug)]
pub struct SubmitInquiry {
    /// [`Name`] of the visitor.
    pub name: Name,

    /// [`Email`] of the visitor.
    pub email: Email,

    /// [`Phone`] of the visitor, if provided.
    pub phone: Option<Phone>,

    /// ID of the [`City`] the visitor is interested in, if any.
    pub city_id: Option<city::Id>,

    /// ID of the [`Unit`] the visitor is interested in, if any.
    pub unit_id: Option<unit::Id>,

    /// [`Message`] of the visitor, if provided.
    pub message: Option<Message>,
}

impl<Db> Command<SubmitInquiry> for Service<Db>
where
    Db: Database<
            Select<By<Option<City>, city::Id>>,
            Ok = Option<City>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Unit>, unit::Id>>,
            Ok = Option<Unit>,
            Err = Traced<database::Error>,
        > + Database<Insert<Inquiry>, Err = Traced<database::Error>>,
{
    type Ok = Inquiry;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: SubmitInquiry,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let SubmitInquiry {
            name,
            email,
            phone,
            city_id,
            unit_id,
            message,
        } = cmd;

        if let Some(id) = &city_id {
            let city = self
                .database()
                .execute(Select(By::<Option<City>, _>::new(id.clone())))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?;
            if city.is_none() {
                return Err(tracerr::new!(E::CityNotExists(id.clone())));
            }
        }
        if let Some(id) = &unit_id {
            let unit = self
                .database()
                .execute(Select(By::<Option<Unit>, _>::new(id.clone())))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?;
            if unit.is_none() {
                return Err(tracerr::new!(E::UnitNotExists(id.clone())));
            }
        }

        let inquiry = Inquiry {
            id: inquiry::Id::new(),
            name,
            email,
            phone,
            city_id,
            unit_id,
            message,
            created_at: inquiry::CreationDateTime::now(),
        };
        self.database()
            .execute(Insert(inquiry.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(inquiry)
    }
}

/// Error of [`SubmitInquiry`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// Referenced [`City`] does not exist.
    #[display("`City(id: {_0})` does not exist")]
    #[from(ignore)]
    CityNotExists(#[error(not(source))] city::Id),

    /// Referenced [`Unit`] does not exist.
    #[display("`Unit(id: {_0})` does not exist")]
    #[from(ignore)]
    UnitNotExists(#[error(not(source))] unit::Id),
}

#[cfg(all(test, feature = "postgres"))]
mod spec {
    use crate::{
        domain::{city, contact::Email, inquiry::Message, Name},
        fake::{self, FakeDb},
        Command as _,
    };

    use super::{ExecutionError, SubmitInquiry};

    fn cmd(city_id: Option<city::Id>) -> SubmitInquiry {
        SubmitInquiry {
            name: Name::new("Omar").unwrap(),
            email: Email::new("omar@example.com").unwrap(),
            phone: None,
            city_id,
            unit_id: None,
            message: Message::compose(Some("Visit"), "Can I visit Friday?"),
        }
    }

    #[tokio::test]
    async fn stores_inquiry() {
        let db = FakeDb::default();
        let cairo = fake::city("New Cairo");
        db.cities.lock().unwrap().push(cairo.clone());
        let service = fake::service(db.clone());

        let inquiry = service.execute(cmd(Some(cairo.id))).await.unwrap();

        let stored = db.inquiries.lock().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, inquiry.id);
        assert_eq!(
            stored[0].message.as_ref().map(Message::as_str),
            Some("Subject: Visit\n\nCan I visit Friday?"),
        );
    }

    #[tokio::test]
    async fn rejects_unknown_city() {
        let db = FakeDb::default();
        let service = fake::service(db.clone());

        let err = service
            .execute(cmd(city::Id::new("atlantis")))
            .await
            .unwrap_err();

        assert!(
            matches!(err.as_ref(), ExecutionError::CityNotExists(_)),
            "wrong error: {err}",
        );
        assert!(db.inquiries.lock().unwrap().is_empty());
    }
}
