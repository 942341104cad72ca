use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use skylane_core::repository::RouteRepository;
use skylane_core::routes::{NewRoute, Route};
use skylane_core::BookingError;

use crate::storage_error;

pub struct StoreRouteRepository {
    pool: PgPool,
}

impl StoreRouteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct RouteRow {
    id: Uuid,
    source_id: Uuid,
    source: String,
    destination_id: Uuid,
    destination: String,
    distance: i32,
}

impl From<RouteRow> for Route {
    fn from(r: RouteRow) -> Self {
        Route {
            id: r.id,
            source_id: r.source_id,
            source: r.source,
            destination_id: r.destination_id,
            destination: r.destination,
            distance: r.distance,
        }
    }
}

const ROUTE_SELECT: &str = "SELECT r.id, r.source_id, src.name AS source, \
                                   r.destination_id, dst.name AS destination, r.distance \
                            FROM routes r \
                            JOIN airports src ON r.source_id = src.id \
                            JOIN airports dst ON r.destination_id = dst.id";

#[async_trait]
impl RouteRepository for StoreRouteRepository {
    async fn list_routes(&self) -> Result<Vec<Route>, BookingError> {
        let rows: Vec<RouteRow> =
            sqlx::query_as(&format!("{ROUTE_SELECT} ORDER BY src.name, dst.name"))
                .fetch_all(&self.pool)
                .await
                .map_err(storage_error)?;

        Ok(rows.into_iter().map(Route::from).collect())
    }

    async fn create_route(&self, new: NewRoute) -> Result<Route, BookingError> {
        new.validate()?;

        let source: Option<String> = sqlx::query_scalar("SELECT name FROM airports WHERE id = $1")
            .bind(new.source_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)?;
        let source = source.ok_or_else(|| BookingError::not_found("airport", new.source_id))?;

        let destination: Option<String> =
            sqlx::query_scalar("SELECT name FROM airports WHERE id = $1")
                .bind(new.destination_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(storage_error)?;
        let destination =
            destination.ok_or_else(|| BookingError::not_found("airport", new.destination_id))?;

        let id = Uuid::new_v4();
        sqlx::query(
            "INSERT INTO routes (id, source_id, destination_id, distance) VALUES ($1, $2, $3, $4)",
        )
        .bind(id)
        .bind(new.source_id)
        .bind(new.destination_id)
        .bind(new.distance)
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(Route {
            id,
            source_id: new.source_id,
            source,
            destination_id: new.destination_id,
            destination,
            distance: new.distance,
        })
    }
}
