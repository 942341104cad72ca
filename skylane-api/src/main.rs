use std::net::SocketAddr;
use std::sync::Arc;

use skylane_api::{
    app,
    state::{AppState, AuthConfig},
};
use skylane_store::{
    DbClient, StoreCatalogRepository, StoreFlightRepository, StoreOrderRepository,
    StoreRouteRepository,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "skylane_api=debug,tower_http=debug,axum::rejection=trace".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = skylane_store::app_config::Config::load().expect("Failed to load config");
    tracing::info!("Starting Skylane API on port {}", config.server.port);

    let db = DbClient::new(&config.database.url)
        .await
        .expect("Failed to connect to Postgres");
    db.migrate().await.expect("Failed to run migrations");

    let app_state = AppState {
        catalog_repo: Arc::new(StoreCatalogRepository::new(db.pool.clone())),
        route_repo: Arc::new(StoreRouteRepository::new(db.pool.clone())),
        flight_repo: Arc::new(StoreFlightRepository::new(db.pool.clone())),
        order_repo: Arc::new(StoreOrderRepository::new(db.pool.clone())),
        auth: AuthConfig {
            secret: config.auth.jwt_secret.clone(),
            expiration: config.auth.jwt_expiration_seconds,
        },
        orders: config.orders.clone(),
    };

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
