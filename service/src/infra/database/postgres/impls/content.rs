//! Marketing content [`Database`] implementations.

use common::operations::{By, Select};
use tokio_postgres::Row;
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::content::{
        Counter, HeroChip, HeroContent, HeroRating, Icon, Rating, Testimonial,
    },
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

use super::bilingual;

/// Reads an [`Icon`] out of the `icon_name` column of the provided [`Row`].
///
/// Unknown icon names are dropped.
fn icon(row: &Row) -> Option<Icon> {
    let name = row.get::<_, Option<&str>>("icon_name")?;
    name.parse()
        .map_err(|_| log::warn!("unknown icon `{name}` is dropped"))
        .ok()
}

impl<C> Database<Select<By<Vec<Counter>, ()>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Counter>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<Counter>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT id, counter_value, \
                   counter_label_en, counter_label_ar, \
                   suffix_en, suffix_ar, \
                   icon_name, display_order \
            FROM counters \
            ORDER BY display_order ASC";
        Ok(self
            .query(SQL, &[])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(|row| Counter {
                id: row.get("id"),
                value: u64::try_from(row.get::<_, i64>("counter_value"))
                    .unwrap_or_default(),
                label: bilingual(row, "counter_label_en", "counter_label_ar"),
                suffix: bilingual(row, "suffix_en", "suffix_ar"),
                icon: icon(row),
                display_order: row.get("display_order"),
            })
            .collect())
    }
}

impl<C> Database<Select<By<Option<HeroContent>, ()>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<HeroContent>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Option<HeroContent>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT main_headline_en, main_headline_ar, \
                   subheadline_en, subheadline_ar \
            FROM hero_content \
            ORDER BY updated_at DESC \
            LIMIT 1";
        Ok(self
            .query_opt(SQL, &[])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| HeroContent {
                headline: bilingual(&row, "main_headline_en", "main_headline_ar"),
                subheadline: bilingual(&row, "subheadline_en", "subheadline_ar"),
            }))
    }
}

impl<C> Database<Select<By<Vec<HeroChip>, ()>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<HeroChip>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<HeroChip>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT id, title_en, title_ar, icon_name, display_order \
            FROM hero_chips \
            ORDER BY display_order ASC";
        Ok(self
            .query(SQL, &[])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(|row| HeroChip {
                id: row.get("id"),
                title: bilingual(row, "title_en", "title_ar"),
                icon: icon(row),
                display_order: row.get("display_order"),
            })
            .collect())
    }
}

impl<C> Database<Select<By<Option<HeroRating>, ()>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<HeroRating>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Option<HeroRating>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT rating_value, total_clients, \
                   rating_text_en, rating_text_ar \
            FROM hero_rating \
            ORDER BY updated_at DESC \
            LIMIT 1";
        Ok(self
            .query_opt(SQL, &[])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| HeroRating {
                value: row.get("rating_value"),
                total_clients: u32::try_from(row.get::<_, i32>("total_clients"))
                    .unwrap_or_default(),
                text: bilingual(&row, "rating_text_en", "rating_text_ar"),
            }))
    }
}

impl<C> Database<Select<By<Vec<Testimonial>, ()>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Testimonial>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<Testimonial>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT id, name_en, name_ar, role_en, role_ar, \
                   content_en, content_ar, rating, image, display_order \
            FROM testimonials \
            ORDER BY display_order ASC";
        Ok(self
            .query(SQL, &[])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(|row| Testimonial {
                id: row.get("id"),
                name: bilingual(row, "name_en", "name_ar"),
                role: bilingual(row, "role_en", "role_ar"),
                content: bilingual(row, "content_en", "content_ar"),
                rating: u8::try_from(row.get::<_, i16>("rating"))
                    .ok()
                    .and_then(Rating::new)
                    .unwrap_or(Rating::MAX),
                image: row.get("image"),
                display_order: row.get("display_order"),
            })
            .collect())
    }
}
