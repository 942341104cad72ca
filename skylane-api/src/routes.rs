use axum::{
    extract::{Extension, State},
    http::StatusCode,
    Json,
};

use skylane_core::routes::{NewRoute, Route};

use crate::error::AppError;
use crate::middleware::auth::{require_admin, Claims};
use crate::state::AppState;

/// GET /v1/routes
pub async fn list_routes(State(state): State<AppState>) -> Result<Json<Vec<Route>>, AppError> {
    Ok(Json(state.route_repo.list_routes().await?))
}

/// POST /v1/routes
pub async fn create_route(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<NewRoute>,
) -> Result<(StatusCode, Json<Route>), AppError> {
    require_admin(&claims)?;
    let created = state.route_repo.create_route(req).await?;
    Ok((StatusCode::CREATED, Json(created)))
}
