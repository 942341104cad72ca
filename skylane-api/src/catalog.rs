use axum::{
    extract::{Extension, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use skylane_core::catalog::{
    Airplane, AirplaneType, Airport, AirportFilter, City, Crew, NewAirplane, NewAirplaneType,
    NewAirport, NewCity, NewCrew,
};

use crate::error::AppError;
use crate::middleware::auth::{require_admin, Claims};
use crate::state::AppState;

// ============================================================================
// Request Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct AirportQuery {
    /// Case-insensitive substring filter on airport name.
    pub name: Option<String>,
    /// Exact filter on city id.
    pub city: Option<Uuid>,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /v1/airplane-types
pub async fn list_airplane_types(
    State(state): State<AppState>,
) -> Result<Json<Vec<AirplaneType>>, AppError> {
    Ok(Json(state.catalog_repo.list_airplane_types().await?))
}

/// POST /v1/airplane-types
pub async fn create_airplane_type(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<NewAirplaneType>,
) -> Result<(StatusCode, Json<AirplaneType>), AppError> {
    require_admin(&claims)?;
    let created = state.catalog_repo.create_airplane_type(req).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /v1/cities
pub async fn list_cities(State(state): State<AppState>) -> Result<Json<Vec<City>>, AppError> {
    Ok(Json(state.catalog_repo.list_cities().await?))
}

/// POST /v1/cities
pub async fn create_city(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<NewCity>,
) -> Result<(StatusCode, Json<City>), AppError> {
    require_admin(&claims)?;
    let created = state.catalog_repo.create_city(req).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /v1/crew
pub async fn list_crew(State(state): State<AppState>) -> Result<Json<Vec<Crew>>, AppError> {
    Ok(Json(state.catalog_repo.list_crew().await?))
}

/// POST /v1/crew
pub async fn create_crew(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<NewCrew>,
) -> Result<(StatusCode, Json<Crew>), AppError> {
    require_admin(&claims)?;
    let created = state.catalog_repo.create_crew(req).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /v1/airports?name=&city=
pub async fn list_airports(
    State(state): State<AppState>,
    Query(query): Query<AirportQuery>,
) -> Result<Json<Vec<Airport>>, AppError> {
    let filter = AirportFilter {
        name: query.name,
        city_id: query.city,
    };
    Ok(Json(state.catalog_repo.list_airports(&filter).await?))
}

/// POST /v1/airports
pub async fn create_airport(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<NewAirport>,
) -> Result<(StatusCode, Json<Airport>), AppError> {
    require_admin(&claims)?;
    let created = state.catalog_repo.create_airport(req).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /v1/airplanes
pub async fn list_airplanes(
    State(state): State<AppState>,
) -> Result<Json<Vec<Airplane>>, AppError> {
    Ok(Json(state.catalog_repo.list_airplanes().await?))
}

/// POST /v1/airplanes
pub async fn create_airplane(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<NewAirplane>,
) -> Result<(StatusCode, Json<Airplane>), AppError> {
    require_admin(&claims)?;
    let created = state.catalog_repo.create_airplane(req).await?;
    Ok((StatusCode::CREATED, Json(created)))
}
