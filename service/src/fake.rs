//! In-memory [`Database`] used in tests.

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex,
    },
};

use common::{
    operations::{By, Delete, Insert, Select, Update},
    Bilingual, DateTime, Money,
};
use jsonwebtoken::{DecodingKey, EncodingKey};
use rust_decimal::Decimal;
use secrecy::SecretBox;
use tracerr::Traced;

use crate::{
    domain::{
        admin::{self, session, Session},
        building, city,
        contact::Email,
        content::Counter,
        geo::Coordinate,
        inquiry, unit, Admin, Building, City, Description, Inquiry, Name,
        Unit,
    },
    infra::{database, Database},
    read, task, Config, Service,
};

/// In-memory [`Database`] storing catalog entities along with precomputed
/// [`read::city::Stats`], [`Admin`]s and their [`Session`]s.
#[derive(Clone, Debug, Default)]
pub(crate) struct FakeDb {
    /// Stored [`City`]s.
    pub(crate) cities: Arc<Mutex<Vec<City>>>,

    /// Stored [`Building`]s.
    pub(crate) buildings: Arc<Mutex<Vec<Building>>>,

    /// Stored [`read::city::Stats`].
    pub(crate) city_stats: Arc<Mutex<HashMap<city::Id, read::city::Stats>>>,

    /// Stored [`Unit`]s.
    pub(crate) units: Arc<Mutex<Vec<Unit>>>,

    /// Stored [`Inquiry`]s.
    pub(crate) inquiries: Arc<Mutex<Vec<Inquiry>>>,

    /// Stored [`Counter`]s.
    pub(crate) counters: Arc<Mutex<Vec<Counter>>>,

    /// Stored [`Admin`]s.
    pub(crate) admins: Arc<Mutex<Vec<Admin>>>,

    /// Stored [`Session`]s.
    pub(crate) sessions: Arc<Mutex<Vec<Session>>>,

    /// Indicator whether every operation fails.
    pub(crate) broken: Arc<AtomicBool>,
}

impl FakeDb {
    /// Fails if this [`FakeDb`] is broken.
    pub(crate) fn check(&self) -> Result<(), Traced<database::Error>> {
        if self.broken.load(Ordering::SeqCst) {
            return Err(tracerr::new!(database::Error::from(
                database::postgres::Error::from(
                    database::postgres::connection::PoolError::Closed,
                ),
            )));
        }
        Ok(())
    }
}

/// Creates a new [`Service`] over the provided [`FakeDb`].
pub(crate) fn service(db: FakeDb) -> Service<FakeDb> {
    Service::from_parts(
        Config {
            jwt_encoding_key: EncodingKey::from_secret(b"test"),
            jwt_decoding_key: DecodingKey::from_secret(b"test"),
            session_ttl: std::time::Duration::from_secs(60),
            clean_expired_admin_sessions:
                task::clean_expired_admin_sessions::Config {
                    interval: std::time::Duration::from_secs(60),
                },
        },
        db,
    )
}

/// Creates a new [`City`] with the provided `name`.
pub(crate) fn city(name: &str) -> City {
    let name = Name::new(name).unwrap();
    City {
        id: city::Id::from_name(&name),
        name: Bilingual::new(name, None),
        description: Bilingual::new(Description::new("").unwrap(), None),
        location: None,
        coordinate: Coordinate::CAIRO,
        status: city::Status::Active,
        hero_image: None,
        created_at: city::CreationDateTime::now(),
        updated_at: city::ModificationDateTime::now(),
    }
}

/// Creates a new [`Building`] with the provided `name` in the provided
/// [`City`].
pub(crate) fn building(name: &str, city_id: &city::Id) -> Building {
    let name = Name::new(name).unwrap();
    let created_at = building::CreationDateTime::now();
    Building {
        id: building::Id::generate(&name, created_at),
        city_id: city_id.clone(),
        name: Bilingual::new(name, None),
        description: Bilingual::new(Description::new("").unwrap(), None),
        address: None,
        coordinate: None,
        floors: building::Floors::new(10),
        status: building::Status::Available,
        image: None,
        gallery: building::Gallery::default(),
        timeline: building::Timeline::default(),
        created_at,
        updated_at: building::ModificationDateTime::now(),
    }
}

/// Creates a new [`Unit`] with the provided `number` in the provided
/// [`Building`].
pub(crate) fn unit(number: &str, building: &Building) -> Unit {
    let number = unit::Number::new(number).unwrap();
    let created_at = unit::CreationDateTime::now();
    Unit {
        id: unit::Id::generate(&building.id, &number, created_at),
        building_id: building.id.clone(),
        city_id: building.city_id.clone(),
        number,
        kind: unit::Kind::Apartment,
        bedrooms: 2,
        bathrooms: 1,
        area: unit::Area::new(Decimal::from(100)).unwrap(),
        floor: 1,
        pricing: unit::Pricing {
            payment_type: unit::PaymentType::Cash,
            price: Money::egp(Decimal::from(1_000_000)),
            installment_price: None,
            installment_years: None,
            down_payment: None,
        },
        status: unit::Status::Available,
        is_featured: false,
        description: Bilingual::new(Description::new("").unwrap(), None),
        features: None,
        image: None,
        created_at,
        updated_at: unit::ModificationDateTime::now(),
    }
}

/// Creates a new [`Admin`] with the provided `email` and `password`.
pub(crate) fn admin(email: &str, password: &str) -> Admin {
    Admin {
        id: admin::Id::new(),
        email: Email::new(email).unwrap(),
        password_hash: admin::PasswordHash::new(&SecretBox::new(Box::new(
            admin::Password::new(password).unwrap(),
        ))),
        created_at: DateTime::now().coerce(),
    }
}

impl Database<Select<By<Vec<City>, read::city::list::Selector>>> for FakeDb {
    type Ok = Vec<City>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<City>, read::city::list::Selector>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.check()?;
        Ok(self.cities.lock().unwrap().clone())
    }
}

impl Database<Select<By<Option<City>, city::Id>>> for FakeDb {
    type Ok = Option<City>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<City>, city::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.check()?;
        let id = by.into_inner();
        Ok(self
            .cities
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }
}

impl<IDs> Database<Select<By<HashMap<city::Id, read::city::Stats>, IDs>>>
    for FakeDb
where
    IDs: AsRef<[city::Id]>,
{
    type Ok = HashMap<city::Id, read::city::Stats>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<HashMap<city::Id, read::city::Stats>, IDs>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        self.check()?;
        let ids = by.into_inner();
        let stats = self.city_stats.lock().unwrap();
        Ok(ids
            .as_ref()
            .iter()
            .filter_map(|id| Some((id.clone(), *stats.get(id)?)))
            .collect())
    }
}

impl Database<Select<By<Vec<Building>, read::building::list::Selector>>>
    for FakeDb
{
    type Ok = Vec<Building>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<Vec<Building>, read::building::list::Selector>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        use read::building::list::Selector;

        self.check()?;
        let buildings = self.buildings.lock().unwrap();
        Ok(match by.into_inner() {
            Selector::All => buildings.clone(),
            Selector::ByCity(id) => buildings
                .iter()
                .filter(|b| b.city_id == id)
                .cloned()
                .collect(),
            Selector::WithTimeline => buildings
                .iter()
                .filter(|b| !b.timeline.is_empty())
                .cloned()
                .collect(),
        })
    }
}

impl<IDs>
    Database<
        Select<By<HashMap<building::Id, read::building::Stats>, IDs>>,
    > for FakeDb
where
    IDs: AsRef<[building::Id]>,
{
    type Ok = HashMap<building::Id, read::building::Stats>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<HashMap<building::Id, read::building::Stats>, IDs>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.check()?;
        Ok(HashMap::new())
    }
}

impl Database<Select<By<Vec<Counter>, ()>>> for FakeDb {
    type Ok = Vec<Counter>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<Counter>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.check()?;
        Ok(self.counters.lock().unwrap().clone())
    }
}

impl Database<Insert<City>> for FakeDb {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(city): Insert<City>,
    ) -> Result<Self::Ok, Self::Err> {
        self.check()?;
        self.cities.lock().unwrap().push(city);
        Ok(())
    }
}

impl Database<Select<By<Option<Building>, building::Id>>> for FakeDb {
    type Ok = Option<Building>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Building>, building::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.check()?;
        let id = by.into_inner();
        Ok(self
            .buildings
            .lock()
            .unwrap()
            .iter()
            .find(|b| b.id == id)
            .cloned())
    }
}

impl Database<Select<By<Option<city::Id>, building::Id>>> for FakeDb {
    type Ok = Option<city::Id>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<city::Id>, building::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.check()?;
        let id = by.into_inner();
        Ok(self
            .buildings
            .lock()
            .unwrap()
            .iter()
            .find(|b| b.id == id)
            .map(|b| b.city_id.clone()))
    }
}

impl Database<Insert<Building>> for FakeDb {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(building): Insert<Building>,
    ) -> Result<Self::Ok, Self::Err> {
        self.check()?;
        self.buildings.lock().unwrap().push(building);
        Ok(())
    }
}

impl Database<Update<Building>> for FakeDb {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(building): Update<Building>,
    ) -> Result<Self::Ok, Self::Err> {
        self.check()?;
        let mut buildings = self.buildings.lock().unwrap();
        if let Some(stored) = buildings.iter_mut().find(|b| b.id == building.id)
        {
            *stored = building;
        }
        Ok(())
    }
}

impl Database<Select<By<Option<Unit>, unit::Id>>> for FakeDb {
    type Ok = Option<Unit>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Unit>, unit::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.check()?;
        let id = by.into_inner();
        Ok(self
            .units
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned())
    }
}

impl Database<Insert<Unit>> for FakeDb {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(unit): Insert<Unit>,
    ) -> Result<Self::Ok, Self::Err> {
        self.check()?;
        self.units.lock().unwrap().push(unit);
        Ok(())
    }
}

impl Database<Insert<Inquiry>> for FakeDb {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(inquiry): Insert<Inquiry>,
    ) -> Result<Self::Ok, Self::Err> {
        self.check()?;
        self.inquiries.lock().unwrap().push(inquiry);
        Ok(())
    }
}

impl Database<Update<City>> for FakeDb {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(city): Update<City>,
    ) -> Result<Self::Ok, Self::Err> {
        self.check()?;
        let mut cities = self.cities.lock().unwrap();
        if let Some(stored) = cities.iter_mut().find(|c| c.id == city.id) {
            *stored = city;
        }
        Ok(())
    }
}

impl Database<Delete<By<City, city::Id>>> for FakeDb {
    type Ok = bool;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<City, city::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.check()?;
        let id = by.into_inner();
        let mut cities = self.cities.lock().unwrap();
        let before = cities.len();
        cities.retain(|c| c.id != id);
        Ok(cities.len() != before)
    }
}

impl Database<Delete<By<Building, building::Id>>> for FakeDb {
    type Ok = bool;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Building, building::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.check()?;
        let id = by.into_inner();
        let mut buildings = self.buildings.lock().unwrap();
        let before = buildings.len();
        buildings.retain(|b| b.id != id);
        Ok(buildings.len() != before)
    }
}

impl Database<Update<Unit>> for FakeDb {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(unit): Update<Unit>,
    ) -> Result<Self::Ok, Self::Err> {
        self.check()?;
        let mut units = self.units.lock().unwrap();
        if let Some(stored) = units.iter_mut().find(|u| u.id == unit.id) {
            *stored = unit;
        }
        Ok(())
    }
}

impl Database<Delete<By<Unit, unit::Id>>> for FakeDb {
    type Ok = bool;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Unit, unit::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.check()?;
        let id = by.into_inner();
        let mut units = self.units.lock().unwrap();
        let before = units.len();
        units.retain(|u| u.id != id);
        Ok(units.len() != before)
    }
}

impl Database<Delete<By<Inquiry, inquiry::Id>>> for FakeDb {
    type Ok = bool;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Inquiry, inquiry::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.check()?;
        let id = by.into_inner();
        let mut inquiries = self.inquiries.lock().unwrap();
        let before = inquiries.len();
        inquiries.retain(|i| i.id != id);
        Ok(inquiries.len() != before)
    }
}

impl<'e> Database<Select<By<Option<Admin>, &'e Email>>> for FakeDb {
    type Ok = Option<Admin>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Admin>, &'e Email>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.check()?;
        let email = by.into_inner();
        Ok(self
            .admins
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.email == *email)
            .cloned())
    }
}

impl Database<Select<By<Option<Admin>, admin::Id>>> for FakeDb {
    type Ok = Option<Admin>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Admin>, admin::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.check()?;
        let id = by.into_inner();
        Ok(self
            .admins
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id == id)
            .cloned())
    }
}

impl Database<Insert<Admin>> for FakeDb {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(admin): Insert<Admin>,
    ) -> Result<Self::Ok, Self::Err> {
        self.check()?;
        self.admins.lock().unwrap().push(admin);
        Ok(())
    }
}

impl Database<Select<By<Option<Session>, session::Id>>> for FakeDb {
    type Ok = Option<Session>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Session>, session::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.check()?;
        let id = by.into_inner();
        Ok(self
            .sessions
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == id)
            .copied())
    }
}

impl Database<Insert<Session>> for FakeDb {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(session): Insert<Session>,
    ) -> Result<Self::Ok, Self::Err> {
        self.check()?;
        self.sessions.lock().unwrap().push(session);
        Ok(())
    }
}

impl Database<Delete<By<Session, session::Id>>> for FakeDb {
    type Ok = bool;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Session, session::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.check()?;
        let id = by.into_inner();
        let mut sessions = self.sessions.lock().unwrap();
        let before = sessions.len();
        sessions.retain(|s| s.id != id);
        Ok(sessions.len() != before)
    }
}
