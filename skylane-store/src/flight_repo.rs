use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use skylane_core::catalog::{Airplane, Crew};
use skylane_core::flights::{FlightDetail, FlightFilter, FlightSummary, NewFlight};
use skylane_core::repository::FlightRepository;
use skylane_core::routes::Route;
use skylane_core::seats::TakenSeat;
use skylane_core::BookingError;

use crate::storage_error;

pub struct StoreFlightRepository {
    pool: PgPool,
}

impl StoreFlightRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal structs for type-safe querying
#[derive(sqlx::FromRow)]
struct FlightSummaryRow {
    id: Uuid,
    route: String,
    airplane: String,
    departure_time: DateTime<Utc>,
    arrival_time: DateTime<Utc>,
    crew: Vec<String>,
    tickets_available: i64,
}

#[derive(sqlx::FromRow)]
struct FlightRow {
    id: Uuid,
    route_id: Uuid,
    airplane_id: Uuid,
    departure_time: DateTime<Utc>,
    arrival_time: DateTime<Utc>,
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

#[derive(sqlx::FromRow)]
struct AirplaneRow {
    id: Uuid,
    name: String,
    rows: i32,
    seats_in_row: i32,
    airplane_type_id: Uuid,
    airplane_type: String,
}

#[derive(sqlx::FromRow)]
struct CrewRow {
    id: Uuid,
    first_name: String,
    last_name: String,
}

#[derive(sqlx::FromRow)]
struct TakenSeatRow {
    row: i32,
    seat: i32,
}

impl StoreFlightRepository {
    async fn load_route(&self, id: Uuid) -> Result<Route, BookingError> {
        let row: Option<RouteRow> = sqlx::query_as(
            "SELECT r.id, r.source_id, src.name AS source, \
                    r.destination_id, dst.name AS destination, r.distance \
             FROM routes r \
             JOIN airports src ON r.source_id = src.id \
             JOIN airports dst ON r.destination_id = dst.id \
             WHERE r.id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error)?;

        let r = row.ok_or_else(|| BookingError::not_found("route", id))?;
        Ok(Route {
            id: r.id,
            source_id: r.source_id,
            source: r.source,
            destination_id: r.destination_id,
            destination: r.destination,
            distance: r.distance,
        })
    }

    async fn load_airplane(&self, id: Uuid) -> Result<Airplane, BookingError> {
        let row: Option<AirplaneRow> = sqlx::query_as(
            "SELECT a.id, a.name, a.\"rows\", a.seats_in_row, a.airplane_type_id, \
                    t.name AS airplane_type \
             FROM airplanes a \
             JOIN airplane_types t ON a.airplane_type_id = t.id \
             WHERE a.id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error)?;

        let a = row.ok_or_else(|| BookingError::not_found("airplane", id))?;
        Ok(Airplane {
            id: a.id,
            name: a.name,
            rows: a.rows,
            seats_in_row: a.seats_in_row,
            airplane_type_id: a.airplane_type_id,
            airplane_type: a.airplane_type,
        })
    }

    async fn load_crew(&self, flight_id: Uuid) -> Result<Vec<Crew>, BookingError> {
        let rows: Vec<CrewRow> = sqlx::query_as(
            "SELECT c.id, c.first_name, c.last_name \
             FROM flight_crew fc \
             JOIN crew c ON fc.crew_id = c.id \
             WHERE fc.flight_id = $1 \
             ORDER BY c.last_name, c.first_name",
        )
        .bind(flight_id)
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(rows
            .into_iter()
            .map(|c| Crew {
                id: c.id,
                first_name: c.first_name,
                last_name: c.last_name,
            })
            .collect())
    }

    async fn load_taken_seats(&self, flight_id: Uuid) -> Result<Vec<TakenSeat>, BookingError> {
        let rows: Vec<TakenSeatRow> = sqlx::query_as(
            "SELECT t.\"row\", t.seat FROM tickets t \
             WHERE t.flight_id = $1 \
             ORDER BY t.\"row\", t.seat",
        )
        .bind(flight_id)
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(rows
            .into_iter()
            .map(|t| TakenSeat {
                row: t.row,
                seat: t.seat,
            })
            .collect())
    }

    async fn detail(&self, flight: FlightRow) -> Result<FlightDetail, BookingError> {
        let route = self.load_route(flight.route_id).await?;
        let airplane = self.load_airplane(flight.airplane_id).await?;
        let crew = self.load_crew(flight.id).await?;
        let taken_seats = self.load_taken_seats(flight.id).await?;

        Ok(FlightDetail {
            id: flight.id,
            route,
            airplane,
            departure_time: flight.departure_time,
            arrival_time: flight.arrival_time,
            crew,
            taken_seats,
        })
    }
}

#[async_trait]
impl FlightRepository for StoreFlightRepository {
    async fn list_flights(
        &self,
        filter: &FlightFilter,
    ) -> Result<Vec<FlightSummary>, BookingError> {
        // Availability is capacity minus sold tickets, derived per query and
        // never stored.
        let mut qb = QueryBuilder::new(
            "SELECT f.id, \
                    src.name || ' -> ' || dst.name AS route, \
                    a.name AS airplane, \
                    f.departure_time, f.arrival_time, \
                    (SELECT COALESCE(ARRAY_AGG(c.first_name || ' ' || c.last_name \
                                               ORDER BY c.last_name, c.first_name), '{}') \
                     FROM flight_crew fc \
                     JOIN crew c ON fc.crew_id = c.id \
                     WHERE fc.flight_id = f.id) AS crew, \
                    a.\"rows\"::BIGINT * a.seats_in_row::BIGINT \
                        - (SELECT COUNT(*) FROM tickets t WHERE t.flight_id = f.id) \
                        AS tickets_available \
             FROM flights f \
             JOIN routes r ON f.route_id = r.id \
             JOIN airports src ON r.source_id = src.id \
             JOIN airports dst ON r.destination_id = dst.id \
             JOIN airplanes a ON f.airplane_id = a.id \
             WHERE 1=1",
        );

        if let Some(date) = filter.date {
            qb.push(" AND f.departure_time::date = ");
            qb.push_bind(date);
        }
        if let Some(route_id) = filter.route_id {
            qb.push(" AND f.route_id = ");
            qb.push_bind(route_id);
        }
        if !filter.crew_ids.is_empty() {
            // Any-of semantics: a flight matches when at least one of the
            // supplied crew ids is assigned to it.
            qb.push(
                " AND EXISTS (SELECT 1 FROM flight_crew fc \
                  WHERE fc.flight_id = f.id AND fc.crew_id = ANY(",
            );
            qb.push_bind(filter.crew_ids.clone());
            qb.push("))");
        }
        qb.push(" ORDER BY f.departure_time DESC");

        let rows: Vec<FlightSummaryRow> = qb
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(storage_error)?;

        Ok(rows
            .into_iter()
            .map(|r| FlightSummary {
                id: r.id,
                route: r.route,
                airplane: r.airplane,
                departure_time: r.departure_time,
                arrival_time: r.arrival_time,
                crew: r.crew,
                tickets_available: r.tickets_available,
            })
            .collect())
    }

    async fn get_flight(&self, id: Uuid) -> Result<Option<FlightDetail>, BookingError> {
        let flight: Option<FlightRow> = sqlx::query_as(
            "SELECT id, route_id, airplane_id, departure_time, arrival_time \
             FROM flights WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error)?;

        match flight {
            Some(row) => Ok(Some(self.detail(row).await?)),
            None => Ok(None),
        }
    }

    async fn create_flight(&self, new: NewFlight) -> Result<FlightDetail, BookingError> {
        new.validate()?;

        // Resolve references up front so missing ids surface as NotFound
        // rather than opaque foreign-key failures.
        let route = self.load_route(new.route_id).await?;
        let airplane = self.load_airplane(new.airplane_id).await?;

        let known: Vec<Uuid> = sqlx::query_scalar("SELECT id FROM crew WHERE id = ANY($1)")
            .bind(&new.crew_ids)
            .fetch_all(&self.pool)
            .await
            .map_err(storage_error)?;
        if let Some(missing) = new.crew_ids.iter().find(|id| !known.contains(*id)) {
            return Err(BookingError::not_found("crew member", *missing));
        }

        let id = Uuid::new_v4();
        let mut tx = self.pool.begin().await.map_err(storage_error)?;

        sqlx::query(
            "INSERT INTO flights (id, route_id, airplane_id, departure_time, arrival_time) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(id)
        .bind(new.route_id)
        .bind(new.airplane_id)
        .bind(new.departure_time)
        .bind(new.arrival_time)
        .execute(&mut *tx)
        .await
        .map_err(storage_error)?;

        for crew_id in &new.crew_ids {
            sqlx::query("INSERT INTO flight_crew (flight_id, crew_id) VALUES ($1, $2)")
                .bind(id)
                .bind(crew_id)
                .execute(&mut *tx)
                .await
                .map_err(storage_error)?;
        }

        tx.commit().await.map_err(storage_error)?;

        let crew = self.load_crew(id).await?;
        Ok(FlightDetail {
            id,
            route,
            airplane,
            departure_time: new.departure_time,
            arrival_time: new.arrival_time,
            crew,
            taken_seats: Vec::new(),
        })
    }
}
