//! [`City`]-related [`Database`] implementations.

use std::collections::HashMap;

use common::operations::{By, Delete, Insert, Select, Update};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{city, geo::Coordinate, City},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read,
};

use super::{bilingual, count};

/// Builds a [`City`] out of the provided [`Row`].
fn from_row(row: &Row) -> City {
    City {
        id: row.get("id"),
        name: bilingual(row, "name", "name_ar"),
        description: bilingual(row, "description", "description_ar"),
        location: row.get("location"),
        coordinate: Coordinate::new(row.get("latitude"), row.get("longitude"))
            .unwrap_or_default(),
        status: row.get("status"),
        hero_image: row.get("hero_image"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

impl<C> Database<Select<By<Option<City>, city::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<City>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<City>, city::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        const SQL: &str = "\
            SELECT id, name, name_ar, \
                   description, description_ar, \
                   location, latitude, longitude, \
                   status, hero_image, \
                   created_at, updated_at \
            FROM cities \
            WHERE id = $1::VARCHAR";
        Ok(self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .as_ref()
            .map(from_row))
    }
}

impl<C> Database<Select<By<Vec<City>, read::city::list::Selector>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<City>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<City>, read::city::list::Selector>>,
    ) -> Result<Self::Ok, Self::Err> {
        use read::city::list::Selector;

        const ALL_SQL: &str = "\
            SELECT id, name, name_ar, \
                   description, description_ar, \
                   location, latitude, longitude, \
                   status, hero_image, \
                   created_at, updated_at \
            FROM cities \
            ORDER BY created_at DESC";
        const ACTIVE_SQL: &str = "\
            SELECT id, name, name_ar, \
                   description, description_ar, \
                   location, latitude, longitude, \
                   status, hero_image, \
                   created_at, updated_at \
            FROM cities \
            WHERE status = 'active' \
            ORDER BY created_at ASC";
        let sql = match by.into_inner() {
            Selector::All => ALL_SQL,
            Selector::Active => ACTIVE_SQL,
        };

        Ok(self
            .query(sql, &[])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect())
    }
}

impl<C, IDs> Database<Select<By<HashMap<city::Id, read::city::Stats>, IDs>>>
    for Postgres<C>
where
    C: Connection,
    IDs: AsRef<[city::Id]>,
{
    type Ok = HashMap<city::Id, read::city::Stats>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<HashMap<city::Id, read::city::Stats>, IDs>>,
    ) -> Result<Self::Ok, Self::Err> {
        let ids = by.into_inner();
        // Avoid subtle change for SQL.
        let ids: &[city::Id] = ids.as_ref();
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        const SQL: &str = "\
            SELECT ids.id AS city_id, \
                   (SELECT COUNT(*) \
                    FROM buildings \
                    WHERE buildings.city_id = ids.id) AS total_buildings, \
                   COUNT(units.id) AS total_units, \
                   COUNT(units.id) FILTER ( \
                       WHERE units.status = 'available' \
                   ) AS available_units \
            FROM unnest($1::VARCHAR[]) AS ids(id) \
            LEFT JOIN units ON units.city_id = ids.id \
            GROUP BY ids.id";
        Ok(self
            .query(SQL, &[&ids])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| {
                (
                    row.get("city_id"),
                    read::city::Stats {
                        total_buildings: count(&row, "total_buildings"),
                        total_units: count(&row, "total_units"),
                        available_units: count(&row, "available_units"),
                    },
                )
            })
            .collect())
    }
}

impl<C> Database<Insert<City>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(city): Insert<City>,
    ) -> Result<Self::Ok, Self::Err> {
        let City {
            id,
            name,
            description,
            location,
            coordinate,
            status,
            hero_image,
            created_at,
            updated_at,
        } = city;

        const SQL: &str = "\
            INSERT INTO cities (\
                id, name, name_ar, \
                description, description_ar, \
                location, latitude, longitude, \
                status, hero_image, \
                created_at, updated_at\
            ) \
            VALUES (\
                $1::VARCHAR, $2::VARCHAR, $3::VARCHAR, \
                $4::TEXT, $5::TEXT, \
                $6::VARCHAR, $7::FLOAT8, $8::FLOAT8, \
                $9::VARCHAR, $10::TEXT, \
                $11::TIMESTAMPTZ, $12::TIMESTAMPTZ\
            )";
        self.exec(
            SQL,
            &[
                &id,
                &name.default,
                &name.ar,
                &description.default,
                &description.ar,
                &location,
                &coordinate.latitude(),
                &coordinate.longitude(),
                &status,
                &hero_image,
                &created_at,
                &updated_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Update<City>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(city): Update<City>,
    ) -> Result<Self::Ok, Self::Err> {
        let City {
            id,
            name,
            description,
            location,
            coordinate,
            status,
            hero_image,
            created_at: _,
            updated_at,
        } = city;

        const SQL: &str = "\
            UPDATE cities \
            SET name = $2::VARCHAR, \
                name_ar = $3::VARCHAR, \
                description = $4::TEXT, \
                description_ar = $5::TEXT, \
                location = $6::VARCHAR, \
                latitude = $7::FLOAT8, \
                longitude = $8::FLOAT8, \
                status = $9::VARCHAR, \
                hero_image = $10::TEXT, \
                updated_at = $11::TIMESTAMPTZ \
            WHERE id = $1::VARCHAR";
        self.exec(
            SQL,
            &[
                &id,
                &name.default,
                &name.ar,
                &description.default,
                &description.ar,
                &location,
                &coordinate.latitude(),
                &coordinate.longitude(),
                &status,
                &hero_image,
                &updated_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Delete<By<City, city::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = bool;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<City, city::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        const SQL: &str = "\
            DELETE FROM cities \
            WHERE id = $1::VARCHAR";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(|deleted| deleted > 0)
    }
}
