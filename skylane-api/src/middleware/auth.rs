use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

/// JWT claims for API callers. `sub` is the user id; `role` is either
/// CUSTOMER or ADMIN.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,
    pub role: String,
    pub exp: usize,
}

pub const ROLE_CUSTOMER: &str = "CUSTOMER";
pub const ROLE_ADMIN: &str = "ADMIN";

/// Require a valid token from any authenticated caller and inject the
/// claims into request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    // 1. Extract token from Authorization header
    let auth_header = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(StatusCode::UNAUTHORIZED)?;

    // 2. Decode and validate JWT
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(state.auth.secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| StatusCode::UNAUTHORIZED)?;

    // 3. Check the role is one we issue
    if token_data.claims.role != ROLE_CUSTOMER && token_data.claims.role != ROLE_ADMIN {
        return Err(StatusCode::FORBIDDEN);
    }

    // 4. Inject claims into request extensions
    req.extensions_mut().insert(token_data.claims);

    Ok(next.run(req).await)
}

/// Catalog, route and flight writes are admin-only.
pub fn require_admin(claims: &Claims) -> Result<(), AppError> {
    if claims.role != ROLE_ADMIN {
        return Err(AppError::AuthorizationError(
            "admin role required".to_string(),
        ));
    }
    Ok(())
}

/// The authenticated user's id, taken from the token subject. Order
/// scoping relies on this and never on request parameters.
pub fn user_id(claims: &Claims) -> Result<Uuid, AppError> {
    Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::AuthenticationError("malformed token subject".to_string()))
}
