use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use skylane_core::flights::{FlightDetail, FlightFilter, FlightSummary, NewFlight};

use crate::error::AppError;
use crate::middleware::auth::{require_admin, Claims};
use crate::state::AppState;

// ============================================================================
// Request Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct FlightQuery {
    /// Calendar-date filter on departure time (ex. ?date=2024-05-30).
    pub date: Option<NaiveDate>,
    /// Exact route filter (ex. ?route=<uuid>).
    pub route: Option<Uuid>,
    /// Comma-separated crew ids; a flight matches when any of them is
    /// assigned (ex. ?crew=<uuid>,<uuid>).
    pub crew: Option<String>,
}

impl FlightQuery {
    fn into_filter(self) -> Result<FlightFilter, AppError> {
        let crew_ids = match self.crew {
            Some(raw) => raw
                .split(',')
                .map(|part| Uuid::parse_str(part.trim()))
                .collect::<Result<Vec<_>, _>>()
                .map_err(|_| AppError::validation("crew", "crew must be a list of ids"))?,
            None => Vec::new(),
        };

        Ok(FlightFilter {
            date: self.date,
            route_id: self.route,
            crew_ids,
        })
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /v1/flights?date=&route=&crew=
pub async fn list_flights(
    State(state): State<AppState>,
    Query(query): Query<FlightQuery>,
) -> Result<Json<Vec<FlightSummary>>, AppError> {
    let filter = query.into_filter()?;
    Ok(Json(state.flight_repo.list_flights(&filter).await?))
}

/// GET /v1/flights/:id
pub async fn get_flight(
    State(state): State<AppState>,
    Path(flight_id): Path<Uuid>,
) -> Result<Json<FlightDetail>, AppError> {
    let flight = state
        .flight_repo
        .get_flight(flight_id)
        .await?
        .ok_or_else(|| AppError::NotFoundError(format!("flight {flight_id} not found")))?;

    Ok(Json(flight))
}

/// POST /v1/flights
pub async fn create_flight(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<NewFlight>,
) -> Result<(StatusCode, Json<FlightDetail>), AppError> {
    require_admin(&claims)?;
    let created = state.flight_repo.create_flight(req).await?;
    Ok((StatusCode::CREATED, Json(created)))
}
