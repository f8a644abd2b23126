//! [`Unit`]-related [`Database`] implementations.

use common::{
    operations::{By, Delete, Insert, Select, Update},
    Money,
};
use rust_decimal::Decimal;
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{
        unit::{self, Pricing},
        Unit,
    },
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read,
};

use super::{bilingual, contains_pattern, narrow, widen};

/// Builds a [`Unit`] out of the provided [`Row`].
fn from_row(row: &Row) -> Unit {
    let currency = row.get("price_currency");
    Unit {
        id: row.get("id"),
        building_id: row.get("building_id"),
        city_id: row.get("city_id"),
        number: row.get("unit_number"),
        kind: row.get("type"),
        bedrooms: narrow(row.get("bedrooms")),
        bathrooms: narrow(row.get("bathrooms")),
        area: row.get("area"),
        floor: row.get("floor"),
        pricing: Pricing {
            payment_type: row.get("payment_type"),
            price: Money {
                amount: row.get("price"),
                currency,
            },
            installment_price: row
                .get::<_, Option<Decimal>>("price_installment")
                .map(|amount| Money { amount, currency }),
            installment_years: row
                .get::<_, Option<i16>>("installment_years")
                .map(narrow),
            down_payment: row.get("down_payment_percent"),
        },
        status: row.get("status"),
        is_featured: row.get("is_featured"),
        description: bilingual(row, "description", "description_ar"),
        features: row.get("features"),
        image: row.get("image"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

impl<C> Database<Select<By<Option<Unit>, unit::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Unit>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Unit>, unit::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        const SQL: &str = "\
            SELECT id, building_id, city_id, unit_number, type, \
                   bedrooms, bathrooms, area, floor, \
                   payment_type, price, price_currency, price_installment, \
                   installment_years, down_payment_percent, \
                   status, is_featured, description, description_ar, \
                   features, image, created_at, updated_at \
            FROM units \
            WHERE id = $1::VARCHAR";
        Ok(self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .as_ref()
            .map(from_row))
    }
}

impl<C> Database<Select<By<Vec<Unit>, read::unit::list::Selector>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Unit>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Unit>, read::unit::list::Selector>>,
    ) -> Result<Self::Ok, Self::Err> {
        use read::unit::{list::Selector, search::Filter};

        let rows = match by.into_inner() {
            Selector::All {
                city_id,
                building_id,
            } => {
                const SQL: &str = "\
                    SELECT id, building_id, city_id, unit_number, type, \
                           bedrooms, bathrooms, area, floor, \
                           payment_type, price, price_currency, \
                           price_installment, installment_years, \
                           down_payment_percent, status, is_featured, \
                           description, description_ar, \
                           features, image, created_at, updated_at \
                    FROM units \
                    WHERE ($1::VARCHAR IS NULL OR city_id = $1::VARCHAR) \
                      AND ($2::VARCHAR IS NULL \
                           OR building_id = $2::VARCHAR) \
                    ORDER BY created_at DESC";
                self.query(SQL, &[&city_id, &building_id]).await
            }
            Selector::AvailableByCity(city_id) => {
                const SQL: &str = "\
                    SELECT id, building_id, city_id, unit_number, type, \
                           bedrooms, bathrooms, area, floor, \
                           payment_type, price, price_currency, \
                           price_installment, installment_years, \
                           down_payment_percent, status, is_featured, \
                           description, description_ar, \
                           features, image, created_at, updated_at \
                    FROM units \
                    WHERE city_id = $1::VARCHAR \
                      AND status = 'available' \
                    ORDER BY unit_number ASC";
                self.query(SQL, &[&city_id]).await
            }
            Selector::AvailableByBuilding(building_id) => {
                const SQL: &str = "\
                    SELECT id, building_id, city_id, unit_number, type, \
                           bedrooms, bathrooms, area, floor, \
                           payment_type, price, price_currency, \
                           price_installment, installment_years, \
                           down_payment_percent, status, is_featured, \
                           description, description_ar, \
                           features, image, created_at, updated_at \
                    FROM units \
                    WHERE building_id = $1::VARCHAR \
                      AND status = 'available' \
                    ORDER BY floor ASC, unit_number ASC";
                self.query(SQL, &[&building_id]).await
            }
            Selector::Featured { city_id, limit } => {
                let limit = i32::from(limit);

                const SQL: &str = "\
                    SELECT id, building_id, city_id, unit_number, type, \
                           bedrooms, bathrooms, area, floor, \
                           payment_type, price, price_currency, \
                           price_installment, installment_years, \
                           down_payment_percent, status, is_featured, \
                           description, description_ar, \
                           features, image, created_at, updated_at \
                    FROM units \
                    WHERE is_featured \
                      AND status = 'available' \
                      AND ($1::VARCHAR IS NULL OR city_id = $1::VARCHAR) \
                    ORDER BY created_at DESC \
                    LIMIT $2::INT4";
                self.query(SQL, &[&city_id, &limit]).await
            }
            Selector::Search(Filter {
                city_id,
                location,
                min_price,
                max_price,
                payment_type,
                installment_years,
                min_area,
                max_area,
            }) => {
                let location = location
                    .as_deref()
                    .map(str::trim)
                    .filter(|l| !l.is_empty())
                    .map(contains_pattern);
                let installment_years = installment_years.map(widen);

                const SQL: &str = "\
                    SELECT id, building_id, city_id, unit_number, type, \
                           bedrooms, bathrooms, area, floor, \
                           payment_type, price, price_currency, \
                           price_installment, installment_years, \
                           down_payment_percent, status, is_featured, \
                           description, description_ar, \
                           features, image, created_at, updated_at \
                    FROM units \
                    WHERE status = 'available' \
                      AND ($1::VARCHAR IS NULL OR city_id = $1::VARCHAR) \
                      AND ($2::VARCHAR IS NULL OR city_id IN (\
                          SELECT id \
                          FROM cities \
                          WHERE name ILIKE $2::VARCHAR \
                             OR name_ar ILIKE $2::VARCHAR \
                             OR location ILIKE $2::VARCHAR\
                      )) \
                      AND ($3::NUMERIC IS NULL OR price >= $3::NUMERIC) \
                      AND ($4::NUMERIC IS NULL OR price <= $4::NUMERIC) \
                      AND ($5::VARCHAR IS NULL \
                           OR payment_type = $5::VARCHAR \
                           OR payment_type = 'Both') \
                      AND ($6::INT2 IS NULL \
                           OR installment_years >= $6::INT2) \
                      AND ($7::NUMERIC IS NULL OR area >= $7::NUMERIC) \
                      AND ($8::NUMERIC IS NULL OR area <= $8::NUMERIC) \
                    ORDER BY price ASC, unit_number ASC";
                self.query(
                    SQL,
                    &[
                        &city_id,
                        &location,
                        &min_price,
                        &max_price,
                        &payment_type,
                        &installment_years,
                        &min_area,
                        &max_area,
                    ],
                )
                .await
            }
        }
        .map_err(tracerr::wrap!())?;

        Ok(rows.iter().map(from_row).collect())
    }
}

impl<C> Database<Insert<Unit>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(unit): Insert<Unit>,
    ) -> Result<Self::Ok, Self::Err> {
        let Unit {
            id,
            building_id,
            city_id,
            number,
            kind,
            bedrooms,
            bathrooms,
            area,
            floor,
            pricing,
            status,
            is_featured,
            description,
            features,
            image,
            created_at,
            updated_at,
        } = unit;

        const SQL: &str = "\
            INSERT INTO units (\
                id, building_id, city_id, unit_number, type, \
                bedrooms, bathrooms, area, floor, \
                payment_type, price, price_currency, price_installment, \
                installment_years, down_payment_percent, \
                status, is_featured, description, description_ar, \
                features, image, created_at, updated_at\
            ) \
            VALUES (\
                $1::VARCHAR, $2::VARCHAR, $3::VARCHAR, $4::VARCHAR, \
                $5::VARCHAR, \
                $6::INT2, $7::INT2, $8::NUMERIC, $9::INT2, \
                $10::VARCHAR, $11::NUMERIC, $12::VARCHAR, $13::NUMERIC, \
                $14::INT2, $15::NUMERIC, \
                $16::VARCHAR, $17::BOOLEAN, $18::TEXT, $19::TEXT, \
                $20::TEXT, $21::TEXT, $22::TIMESTAMPTZ, $23::TIMESTAMPTZ\
            )";
        self.exec(
            SQL,
            &[
                &id,
                &building_id,
                &city_id,
                &number,
                &kind,
                &widen(bedrooms),
                &widen(bathrooms),
                &area,
                &floor,
                &pricing.payment_type,
                &pricing.price.amount,
                &pricing.price.currency,
                &pricing.installment_price.map(|m| m.amount),
                &pricing.installment_years.map(widen),
                &pricing.down_payment,
                &status,
                &is_featured,
                &description.default,
                &description.ar,
                &features,
                &image,
                &created_at,
                &updated_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Update<Unit>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(unit): Update<Unit>,
    ) -> Result<Self::Ok, Self::Err> {
        let Unit {
            id,
            building_id,
            city_id,
            number,
            kind,
            bedrooms,
            bathrooms,
            area,
            floor,
            pricing,
            status,
            is_featured,
            description,
            features,
            image,
            created_at: _,
            updated_at,
        } = unit;

        const SQL: &str = "\
            UPDATE units \
            SET building_id = $2::VARCHAR, \
                city_id = $3::VARCHAR, \
                unit_number = $4::VARCHAR, \
                type = $5::VARCHAR, \
                bedrooms = $6::INT2, \
                bathrooms = $7::INT2, \
                area = $8::NUMERIC, \
                floor = $9::INT2, \
                payment_type = $10::VARCHAR, \
                price = $11::NUMERIC, \
                price_currency = $12::VARCHAR, \
                price_installment = $13::NUMERIC, \
                installment_years = $14::INT2, \
                down_payment_percent = $15::NUMERIC, \
                status = $16::VARCHAR, \
                is_featured = $17::BOOLEAN, \
                description = $18::TEXT, \
                description_ar = $19::TEXT, \
                features = $20::TEXT, \
                image = $21::TEXT, \
                updated_at = $22::TIMESTAMPTZ \
            WHERE id = $1::VARCHAR";
        self.exec(
            SQL,
            &[
                &id,
                &building_id,
                &city_id,
                &number,
                &kind,
                &widen(bedrooms),
                &widen(bathrooms),
                &area,
                &floor,
                &pricing.payment_type,
                &pricing.price.amount,
                &pricing.price.currency,
                &pricing.installment_price.map(|m| m.amount),
                &pricing.installment_years.map(widen),
                &pricing.down_payment,
                &status,
                &is_featured,
                &description.default,
                &description.ar,
                &features,
                &image,
                &updated_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Delete<By<Unit, unit::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = bool;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Unit, unit::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        const SQL: &str = "\
            DELETE FROM units \
            WHERE id = $1::VARCHAR";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(|deleted| deleted > 0)
    }
}
