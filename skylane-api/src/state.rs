use std::sync::Arc;

use skylane_core::repository::{
    CatalogRepository, FlightRepository, OrderRepository, RouteRepository,
};
use skylane_store::app_config::OrdersConfig;

#[derive(Clone)]
pub struct AuthConfig {
    pub secret: String,
    pub expiration: u64,
}

#[derive(Clone)]
pub struct AppState {
    pub catalog_repo: Arc<dyn CatalogRepository>,
    pub route_repo: Arc<dyn RouteRepository>,
    pub flight_repo: Arc<dyn FlightRepository>,
    pub order_repo: Arc<dyn OrderRepository>,
    pub auth: AuthConfig,
    pub orders: OrdersConfig,
}
