use async_trait::async_trait;
use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use skylane_core::catalog::{
    Airplane, AirplaneType, Airport, AirportFilter, City, Crew, NewAirplane, NewAirplaneType,
    NewAirport, NewCity, NewCrew,
};
use skylane_core::repository::CatalogRepository;
use skylane_core::BookingError;

use crate::storage_error;

pub struct StoreCatalogRepository {
    pool: PgPool,
}

impl StoreCatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal structs for type-safe querying
#[derive(sqlx::FromRow)]
struct NamedRow {
    id: Uuid,
    name: String,
}

#[derive(sqlx::FromRow)]
struct CrewRow {
    id: Uuid,
    first_name: String,
    last_name: String,
}

#[derive(sqlx::FromRow)]
struct AirportRow {
    id: Uuid,
    name: String,
    city_id: Uuid,
    city: String,
}

#[derive(sqlx::FromRow)]
struct AirplaneRow {
    id: Uuid,
    name: String,
    rows: i32,
    seats_in_row: i32,
    airplane_type_id: Uuid,
    airplane_type: String,
}

/// Map an insert error, turning a name-uniqueness violation into Duplicate.
fn insert_error(e: sqlx::Error, entity: &'static str) -> BookingError {
    match e.as_database_error() {
        Some(db) if db.is_unique_violation() => BookingError::Duplicate { entity },
        _ => storage_error(e),
    }
}

#[async_trait]
impl CatalogRepository for StoreCatalogRepository {
    async fn list_airplane_types(&self) -> Result<Vec<AirplaneType>, BookingError> {
        let rows: Vec<NamedRow> =
            sqlx::query_as("SELECT id, name FROM airplane_types ORDER BY name")
                .fetch_all(&self.pool)
                .await
                .map_err(storage_error)?;

        Ok(rows
            .into_iter()
            .map(|r| AirplaneType { id: r.id, name: r.name })
            .collect())
    }

    async fn create_airplane_type(
        &self,
        new: NewAirplaneType,
    ) -> Result<AirplaneType, BookingError> {
        let id = Uuid::new_v4();
        sqlx::query("INSERT INTO airplane_types (id, name) VALUES ($1, $2)")
            .bind(id)
            .bind(&new.name)
            .execute(&self.pool)
            .await
            .map_err(|e| insert_error(e, "airplane type"))?;

        Ok(AirplaneType { id, name: new.name })
    }

    async fn list_cities(&self) -> Result<Vec<City>, BookingError> {
        let rows: Vec<NamedRow> = sqlx::query_as("SELECT id, name FROM cities ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(storage_error)?;

        Ok(rows
            .into_iter()
            .map(|r| City { id: r.id, name: r.name })
            .collect())
    }

    async fn create_city(&self, new: NewCity) -> Result<City, BookingError> {
        let id = Uuid::new_v4();
        sqlx::query("INSERT INTO cities (id, name) VALUES ($1, $2)")
            .bind(id)
            .bind(&new.name)
            .execute(&self.pool)
            .await
            .map_err(|e| insert_error(e, "city"))?;

        Ok(City { id, name: new.name })
    }

    async fn list_crew(&self) -> Result<Vec<Crew>, BookingError> {
        let rows: Vec<CrewRow> = sqlx::query_as(
            "SELECT id, first_name, last_name FROM crew ORDER BY last_name, first_name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(rows
            .into_iter()
            .map(|r| Crew {
                id: r.id,
                first_name: r.first_name,
                last_name: r.last_name,
            })
            .collect())
    }

    async fn create_crew(&self, new: NewCrew) -> Result<Crew, BookingError> {
        let id = Uuid::new_v4();
        sqlx::query("INSERT INTO crew (id, first_name, last_name) VALUES ($1, $2, $3)")
            .bind(id)
            .bind(&new.first_name)
            .bind(&new.last_name)
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;

        Ok(Crew {
            id,
            first_name: new.first_name,
            last_name: new.last_name,
        })
    }

    async fn list_airports(&self, filter: &AirportFilter) -> Result<Vec<Airport>, BookingError> {
        let mut qb = QueryBuilder::new(
            "SELECT a.id, a.name, a.city_id, c.name AS city \
             FROM airports a \
             JOIN cities c ON a.city_id = c.id \
             WHERE 1=1",
        );

        if let Some(name) = &filter.name {
            qb.push(" AND a.name ILIKE ");
            qb.push_bind(format!("%{}%", name));
        }
        if let Some(city_id) = filter.city_id {
            qb.push(" AND a.city_id = ");
            qb.push_bind(city_id);
        }
        qb.push(" ORDER BY a.name");

        let rows: Vec<AirportRow> = qb
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(storage_error)?;

        Ok(rows
            .into_iter()
            .map(|r| Airport {
                id: r.id,
                name: r.name,
                city_id: r.city_id,
                city: r.city,
            })
            .collect())
    }

    async fn create_airport(&self, new: NewAirport) -> Result<Airport, BookingError> {
        let city: Option<NamedRow> = sqlx::query_as("SELECT id, name FROM cities WHERE id = $1")
            .bind(new.city_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)?;
        let city = city.ok_or_else(|| BookingError::not_found("city", new.city_id))?;

        let id = Uuid::new_v4();
        sqlx::query("INSERT INTO airports (id, name, city_id) VALUES ($1, $2, $3)")
            .bind(id)
            .bind(&new.name)
            .bind(new.city_id)
            .execute(&self.pool)
            .await
            .map_err(|e| insert_error(e, "airport"))?;

        Ok(Airport {
            id,
            name: new.name,
            city_id: new.city_id,
            city: city.name,
        })
    }

    async fn list_airplanes(&self) -> Result<Vec<Airplane>, BookingError> {
        let rows: Vec<AirplaneRow> = sqlx::query_as(
            "SELECT a.id, a.name, a.\"rows\", a.seats_in_row, a.airplane_type_id, \
                    t.name AS airplane_type \
             FROM airplanes a \
             JOIN airplane_types t ON a.airplane_type_id = t.id \
             ORDER BY a.name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(rows
            .into_iter()
            .map(|r| Airplane {
                id: r.id,
                name: r.name,
                rows: r.rows,
                seats_in_row: r.seats_in_row,
                airplane_type_id: r.airplane_type_id,
                airplane_type: r.airplane_type,
            })
            .collect())
    }

    async fn create_airplane(&self, new: NewAirplane) -> Result<Airplane, BookingError> {
        new.validate()?;

        let airplane_type: Option<NamedRow> =
            sqlx::query_as("SELECT id, name FROM airplane_types WHERE id = $1")
                .bind(new.airplane_type_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(storage_error)?;
        let airplane_type = airplane_type
            .ok_or_else(|| BookingError::not_found("airplane type", new.airplane_type_id))?;

        let id = Uuid::new_v4();
        sqlx::query(
            "INSERT INTO airplanes (id, name, \"rows\", seats_in_row, airplane_type_id) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(id)
        .bind(&new.name)
        .bind(new.rows)
        .bind(new.seats_in_row)
        .bind(new.airplane_type_id)
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(Airplane {
            id,
            name: new.name,
            rows: new.rows,
            seats_in_row: new.seats_in_row,
            airplane_type_id: new.airplane_type_id,
            airplane_type: airplane_type.name,
        })
    }
}
