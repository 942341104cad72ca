use axum::{
    http::Method,
    routing::get,
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod auth;
pub mod catalog;
pub mod error;
pub mod flights;
pub mod middleware;
pub mod orders;
pub mod routes;
pub mod state;

pub use state::AppState;

pub fn app(state: AppState) -> Router {
    // CORS Middleware
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
            axum::http::header::USER_AGENT,
        ]);

    // Everything except token issuing requires an authenticated caller;
    // write handlers additionally check the admin role themselves.
    let protected = Router::new()
        .route(
            "/v1/airplane-types",
            get(catalog::list_airplane_types).post(catalog::create_airplane_type),
        )
        .route(
            "/v1/cities",
            get(catalog::list_cities).post(catalog::create_city),
        )
        .route("/v1/crew", get(catalog::list_crew).post(catalog::create_crew))
        .route(
            "/v1/airports",
            get(catalog::list_airports).post(catalog::create_airport),
        )
        .route(
            "/v1/airplanes",
            get(catalog::list_airplanes).post(catalog::create_airplane),
        )
        .route(
            "/v1/routes",
            get(routes::list_routes).post(routes::create_route),
        )
        .route(
            "/v1/flights",
            get(flights::list_flights).post(flights::create_flight),
        )
        .route("/v1/flights/{id}", get(flights::get_flight))
        .route(
            "/v1/orders",
            get(orders::list_orders).post(orders::create_order),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::auth_middleware,
        ));

    Router::new()
        .merge(auth::routes())
        .merge(protected)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
