//! [`Building`]-related [`Database`] implementations.

use std::collections::HashMap;

use common::operations::{By, Delete, Insert, Select, Update};
use postgres_types::Json;
use tokio_postgres::Row;
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{
        building::{self, Floors, Gallery, Timeline},
        city,
        geo::Coordinate,
        Building, ImageUrl,
    },
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read,
};

use super::{bilingual, count};

/// Builds a [`Building`] out of the provided [`Row`].
fn from_row(row: &Row) -> Building {
    let id: building::Id = row.get("id");

    let mut images: Vec<ImageUrl> = row.get("gallery");
    images.truncate(Gallery::CAPACITY);

    let timeline = row
        .try_get::<_, Json<Timeline>>("timeline_phases")
        .map(|Json(t)| t)
        .unwrap_or_else(|e| {
            log::warn!("malformed timeline of `Building(id: {id})`: {e}");
            Timeline::default()
        });

    Building {
        city_id: row.get("city_id"),
        name: bilingual(row, "name", "name_ar"),
        description: bilingual(row, "description", "description_ar"),
        address: row.get("address"),
        coordinate: Coordinate::try_from_parts(
            row.get("latitude"),
            row.get("longitude"),
        ),
        floors: Floors::new(
            u16::try_from(row.get::<_, i16>("floors")).unwrap_or_default(),
        ),
        status: row.get("status"),
        image: row.get("image"),
        gallery: Gallery::new(images).unwrap_or_default(),
        timeline,
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
        id,
    }
}

impl<C> Database<Select<By<Option<Building>, building::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Building>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Building>, building::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        const SQL: &str = "\
            SELECT id, city_id, name, name_ar, \
                   description, description_ar, \
                   address, latitude, longitude, floors, \
                   status, image, gallery, timeline_phases, \
                   created_at, updated_at \
            FROM buildings \
            WHERE id = $1::VARCHAR";
        Ok(self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .as_ref()
            .map(from_row))
    }
}

impl<C> Database<Select<By<Vec<Building>, read::building::list::Selector>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Building>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Building>, read::building::list::Selector>>,
    ) -> Result<Self::Ok, Self::Err> {
        use read::building::list::Selector;

        let rows = match by.into_inner() {
            Selector::All => {
                const SQL: &str = "\
                    SELECT id, city_id, name, name_ar, \
                           description, description_ar, \
                           address, latitude, longitude, floors, \
                           status, image, gallery, timeline_phases, \
                           created_at, updated_at \
                    FROM buildings \
                    ORDER BY created_at DESC";
                self.query(SQL, &[]).await
            }
            Selector::ByCity(city_id) => {
                const SQL: &str = "\
                    SELECT id, city_id, name, name_ar, \
                           description, description_ar, \
                           address, latitude, longitude, floors, \
                           status, image, gallery, timeline_phases, \
                           created_at, updated_at \
                    FROM buildings \
                    WHERE city_id = $1::VARCHAR \
                    ORDER BY name ASC";
                self.query(SQL, &[&city_id]).await
            }
            Selector::WithTimeline => {
                const SQL: &str = "\
                    SELECT id, city_id, name, name_ar, \
                           description, description_ar, \
                           address, latitude, longitude, floors, \
                           status, image, gallery, timeline_phases, \
                           created_at, updated_at \
                    FROM buildings \
                    WHERE jsonb_typeof(timeline_phases) = 'array' \
                      AND jsonb_array_length(timeline_phases) > 0 \
                    ORDER BY created_at DESC";
                self.query(SQL, &[]).await
            }
        }
        .map_err(tracerr::wrap!())?;

        Ok(rows.iter().map(from_row).collect())
    }
}

impl<C, IDs>
    Database<Select<By<HashMap<building::Id, read::building::Stats>, IDs>>>
    for Postgres<C>
where
    C: Connection,
    IDs: AsRef<[building::Id]>,
{
    type Ok = HashMap<building::Id, read::building::Stats>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<HashMap<building::Id, read::building::Stats>, IDs>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let ids = by.into_inner();
        // Avoid subtle change for SQL.
        let ids: &[building::Id] = ids.as_ref();
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        const SQL: &str = "\
            SELECT ids.id AS building_id, \
                   COUNT(units.id) AS total_units, \
                   COUNT(units.id) FILTER ( \
                       WHERE units.status = 'available' \
                   ) AS available_units \
            FROM unnest($1::VARCHAR[]) AS ids(id) \
            LEFT JOIN units ON units.building_id = ids.id \
            GROUP BY ids.id";
        Ok(self
            .query(SQL, &[&ids])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| {
                (
                    row.get("building_id"),
                    read::building::Stats {
                        total_units: count(&row, "total_units"),
                        available_units: count(&row, "available_units"),
                    },
                )
            })
            .collect())
    }
}

impl<C> Database<Select<By<Option<city::Id>, building::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<city::Id>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<city::Id>, building::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        const SQL: &str = "\
            SELECT city_id \
            FROM buildings \
            WHERE id = $1::VARCHAR";
        Ok(self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| row.get("city_id")))
    }
}

impl<C> Database<Insert<Building>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(building): Insert<Building>,
    ) -> Result<Self::Ok, Self::Err> {
        let Building {
            id,
            city_id,
            name,
            description,
            address,
            coordinate,
            floors,
            status,
            image,
            gallery,
            timeline,
            created_at,
            updated_at,
        } = building;
        let floors = i16::try_from(floors.get()).unwrap_or(i16::MAX);

        const SQL: &str = "\
            INSERT INTO buildings (\
                id, city_id, name, name_ar, \
                description, description_ar, \
                address, latitude, longitude, floors, \
                status, image, gallery, timeline_phases, \
                created_at, updated_at\
            ) \
            VALUES (\
                $1::VARCHAR, $2::VARCHAR, $3::VARCHAR, $4::VARCHAR, \
                $5::TEXT, $6::TEXT, \
                $7::VARCHAR, $8::FLOAT8, $9::FLOAT8, $10::INT2, \
                $11::VARCHAR, $12::TEXT, $13::TEXT[], $14::JSONB, \
                $15::TIMESTAMPTZ, $16::TIMESTAMPTZ\
            )";
        self.exec(
            SQL,
            &[
                &id,
                &city_id,
                &name.default,
                &name.ar,
                &description.default,
                &description.ar,
                &address,
                &coordinate.map(|c| c.latitude()),
                &coordinate.map(|c| c.longitude()),
                &floors,
                &status,
                &image,
                &gallery.as_slice(),
                &Json(&timeline),
                &created_at,
                &updated_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Update<Building>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(building): Update<Building>,
    ) -> Result<Self::Ok, Self::Err> {
        let Building {
            id,
            city_id,
            name,
            description,
            address,
            coordinate,
            floors,
            status,
            image,
            gallery,
            timeline,
            created_at: _,
            updated_at,
        } = building;
        let floors = i16::try_from(floors.get()).unwrap_or(i16::MAX);

        // Units always follow the city of their building.
        const SQL: &str = "\
            WITH moved_units AS (\
                UPDATE units \
                SET city_id = $2::VARCHAR \
                WHERE building_id = $1::VARCHAR \
                  AND city_id <> $2::VARCHAR\
            ) \
            UPDATE buildings \
            SET city_id = $2::VARCHAR, \
                name = $3::VARCHAR, \
                name_ar = $4::VARCHAR, \
                description = $5::TEXT, \
                description_ar = $6::TEXT, \
                address = $7::VARCHAR, \
                latitude = $8::FLOAT8, \
                longitude = $9::FLOAT8, \
                floors = $10::INT2, \
                status = $11::VARCHAR, \
                image = $12::TEXT, \
                gallery = $13::TEXT[], \
                timeline_phases = $14::JSONB, \
                updated_at = $15::TIMESTAMPTZ \
            WHERE id = $1::VARCHAR";
        self.exec(
            SQL,
            &[
                &id,
                &city_id,
                &name.default,
                &name.ar,
                &description.default,
                &description.ar,
                &address,
                &coordinate.map(|c| c.latitude()),
                &coordinate.map(|c| c.longitude()),
                &floors,
                &status,
                &image,
                &gallery.as_slice(),
                &Json(&timeline),
                &updated_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Delete<By<Building, building::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = bool;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Building, building::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        const SQL: &str = "\
            DELETE FROM buildings \
            WHERE id = $1::VARCHAR";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(|deleted| deleted > 0)
    }
}
