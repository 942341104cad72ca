use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use skylane_core::orders::{
    validate_ticket_specs, Order, OrderPage, OrderPageRequest, Ticket, TicketFlight, TicketSpec,
};
use skylane_core::repository::OrderRepository;
use skylane_core::seats::{validate_ticket, SeatGrid};
use skylane_core::BookingError;

use crate::storage_error;

pub struct StoreOrderRepository {
    pool: PgPool,
}

impl StoreOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal structs for type-safe querying
#[derive(sqlx::FromRow)]
struct OrderRow {
    id: Uuid,
    user_id: Uuid,
    created_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct TicketRow {
    id: Uuid,
    row: i32,
    seat: i32,
    flight_id: Uuid,
    route: String,
    airplane: String,
    departure_time: DateTime<Utc>,
    arrival_time: DateTime<Utc>,
}

impl From<TicketRow> for Ticket {
    fn from(t: TicketRow) -> Self {
        Ticket {
            id: t.id,
            row: t.row,
            seat: t.seat,
            flight: TicketFlight {
                id: t.flight_id,
                route: t.route,
                airplane: t.airplane,
                departure_time: t.departure_time,
                arrival_time: t.arrival_time,
            },
        }
    }
}

/// Map a ticket insert failure. A unique violation on
/// (flight_id, row, seat) means a concurrent writer won the seat.
fn ticket_insert_error(e: sqlx::Error, spec: &TicketSpec) -> BookingError {
    match e.as_database_error() {
        Some(db) if db.is_unique_violation() => BookingError::SeatTaken {
            flight_id: spec.flight_id,
            row: spec.row,
            seat: spec.seat,
        },
        Some(db) if db.is_foreign_key_violation() => {
            BookingError::not_found("flight", spec.flight_id)
        }
        _ => storage_error(e),
    }
}

impl StoreOrderRepository {
    async fn load_tickets(&self, order_id: Uuid) -> Result<Vec<Ticket>, BookingError> {
        let rows: Vec<TicketRow> = sqlx::query_as(
            "SELECT t.id, t.\"row\", t.seat, f.id AS flight_id, \
                    src.name || ' -> ' || dst.name AS route, \
                    a.name AS airplane, \
                    f.departure_time, f.arrival_time \
             FROM tickets t \
             JOIN flights f ON t.flight_id = f.id \
             JOIN routes r ON f.route_id = r.id \
             JOIN airports src ON r.source_id = src.id \
             JOIN airports dst ON r.destination_id = dst.id \
             JOIN airplanes a ON f.airplane_id = a.id \
             WHERE t.order_id = $1 \
             ORDER BY t.\"row\", t.seat",
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(rows.into_iter().map(Ticket::from).collect())
    }
}

#[async_trait]
impl OrderRepository for StoreOrderRepository {
    async fn create_order(
        &self,
        user_id: Uuid,
        tickets: &[TicketSpec],
    ) -> Result<Order, BookingError> {
        validate_ticket_specs(tickets)?;

        // One transaction for the order and every ticket. Any error path
        // drops the transaction and rolls the whole purchase back; the
        // UNIQUE constraint on (flight_id, row, seat) is checked at insert
        // time, inside the same transaction.
        let mut tx = self.pool.begin().await.map_err(storage_error)?;

        let order_id = Uuid::new_v4();
        let created_at: DateTime<Utc> = sqlx::query_scalar(
            "INSERT INTO orders (id, user_id) VALUES ($1, $2) RETURNING created_at",
        )
        .bind(order_id)
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(storage_error)?;

        let mut grids: HashMap<Uuid, SeatGrid> = HashMap::new();
        for spec in tickets {
            let grid = match grids.get(&spec.flight_id) {
                Some(grid) => *grid,
                None => {
                    let geometry: Option<(i32, i32)> = sqlx::query_as(
                        "SELECT a.\"rows\", a.seats_in_row \
                         FROM flights f \
                         JOIN airplanes a ON f.airplane_id = a.id \
                         WHERE f.id = $1",
                    )
                    .bind(spec.flight_id)
                    .fetch_optional(&mut *tx)
                    .await
                    .map_err(storage_error)?;

                    let (rows, seats_in_row) = geometry
                        .ok_or_else(|| BookingError::not_found("flight", spec.flight_id))?;
                    let grid = SeatGrid::new(rows, seats_in_row);
                    grids.insert(spec.flight_id, grid);
                    grid
                }
            };

            validate_ticket(spec.row, spec.seat, &grid)?;

            sqlx::query(
                "INSERT INTO tickets (id, \"row\", seat, flight_id, order_id) \
                 VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(Uuid::new_v4())
            .bind(spec.row)
            .bind(spec.seat)
            .bind(spec.flight_id)
            .bind(order_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| ticket_insert_error(e, spec))?;
        }

        tx.commit().await.map_err(storage_error)?;

        tracing::info!(%order_id, %user_id, tickets = tickets.len(), "order created");

        let tickets = self.load_tickets(order_id).await?;
        Ok(Order {
            id: order_id,
            user_id,
            created_at,
            tickets,
        })
    }

    async fn list_orders(
        &self,
        user_id: Uuid,
        page: OrderPageRequest,
    ) -> Result<OrderPage, BookingError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(storage_error)?;

        let rows: Vec<OrderRow> = sqlx::query_as(
            "SELECT id, user_id, created_at FROM orders \
             WHERE user_id = $1 \
             ORDER BY created_at DESC \
             LIMIT $2 OFFSET $3",
        )
        .bind(user_id)
        .bind(page.page_size as i64)
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;

        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            let tickets = self.load_tickets(row.id).await?;
            items.push(Order {
                id: row.id,
                user_id: row.user_id,
                created_at: row.created_at,
                tickets,
            });
        }

        Ok(OrderPage {
            items,
            page: page.page,
            page_size: page.page_size,
            total,
        })
    }
}
