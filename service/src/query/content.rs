//! [`Query`] collection related to marketing content.
//!
//! Every [`Query`] here is infallible: whenever the content cannot be loaded
//! or is not configured, the built-in fallback is returned.

use std::{convert::Infallible, fmt};

use common::operations::{By, Select};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::content::{
        self, Counter, HeroChip, HeroContent, HeroRating, Testimonial,
    },
    infra::{database, Database},
    Query, Service,
};

/// [`Query`] of achievement [`Counter`]s.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Counters;

/// [`Query`] of the [`content::Hero`] banner.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Hero;

/// [`Query`] of [`Testimonial`]s.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Testimonials;

/// Logs the provided `error` of loading the `what` content.
fn log_failure(what: &str, error: impl fmt::Display) {
    log::error!("failed to load {what}, using fallback: {error}");
}

impl<Db> Query<Counters> for Service<Db>
where
    Db: Database<
        Select<By<Vec<Counter>, ()>>,
        Ok = Vec<Counter>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Vec<Counter>;
    type Err = Infallible;

    async fn execute(&self, _: Counters) -> Result<Self::Ok, Self::Err> {
        Ok(match self.database().execute(Select(By::new(()))).await {
            Ok(counters) if !counters.is_empty() => counters,
            Ok(_) => Counter::fallback(),
            Err(e) => {
                log_failure("counters", e);
                Counter::fallback()
            }
        })
    }
}

impl<Db> Query<Hero> for Service<Db>
where
    Db: Database<
            Select<By<Option<HeroContent>, ()>>,
            Ok = Option<HeroContent>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<HeroChip>, ()>>,
            Ok = Vec<HeroChip>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<HeroRating>, ()>>,
            Ok = Option<HeroRating>,
            Err = Traced<database::Error>,
        >,
{
    type Ok = content::Hero;
    type Err = Infallible;

    async fn execute(&self, _: Hero) -> Result<Self::Ok, Self::Err> {
        let (content, chips, rating) = futures::join!(
            self.database()
                .execute(Select(By::<Option<HeroContent>, _>::new(()))),
            self.database().execute(Select(By::<Vec<HeroChip>, _>::new(()))),
            self.database()
                .execute(Select(By::<Option<HeroRating>, _>::new(()))),
        );

        let hero = content::Hero {
            content: content.unwrap_or_else(|e| {
                log_failure("hero content", e);
                None
            }),
            chips: chips.unwrap_or_else(|e| {
                log_failure("hero chips", e);
                vec![]
            }),
            rating: rating.unwrap_or_else(|e| {
                log_failure("hero rating", e);
                None
            }),
        };
        Ok(hero.or_fallback())
    }
}

impl<Db> Query<Testimonials> for Service<Db>
where
    Db: Database<
        Select<By<Vec<Testimonial>, ()>>,
        Ok = Vec<Testimonial>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Vec<Testimonial>;
    type Err = Infallible;

    async fn execute(&self, _: Testimonials) -> Result<Self::Ok, Self::Err> {
        Ok(match self.database().execute(Select(By::new(()))).await {
            Ok(testimonials) if !testimonials.is_empty() => testimonials,
            Ok(_) => Testimonial::fallback(),
            Err(e) => {
                log_failure("testimonials", e);
                Testimonial::fallback()
            }
        })
    }
}

#[cfg(all(test, feature = "postgres"))]
mod spec {
    use std::sync::atomic::Ordering;

    use common::Bilingual;

    use crate::{
        domain::content::{self, Counter, Icon},
        fake::{self, FakeDb},
        Query as _,
    };

    use super::Counters;

    #[tokio::test]
    async fn falls_back_when_empty_or_failing() {
        let db = FakeDb::default();
        let service = fake::service(db.clone());

        let empty = service.execute(Counters).await.unwrap();
        assert_eq!(empty, Counter::fallback());

        db.broken.store(true, Ordering::SeqCst);
        let failed = service.execute(Counters).await.unwrap();
        assert_eq!(failed, Counter::fallback());
    }

    #[tokio::test]
    async fn returns_stored_counters() {
        let db = FakeDb::default();
        let stored = Counter {
            id: content::Id::new("projects"),
            value: 42,
            label: Bilingual::new(content::Text::new("Projects").unwrap(), None),
            suffix: Bilingual::new(content::Text::new("+").unwrap(), None),
            icon: Some(Icon::Star),
            display_order: 1,
        };
        db.counters.lock().unwrap().push(stored.clone());

        let counters = fake::service(db).execute(Counters).await.unwrap();

        assert_eq!(counters, vec![stored]);
    }
}
