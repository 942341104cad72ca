pub mod app_config;
pub mod catalog_repo;
pub mod database;
pub mod flight_repo;
pub mod order_repo;
pub mod route_repo;

pub use catalog_repo::StoreCatalogRepository;
pub use database::DbClient;
pub use flight_repo::StoreFlightRepository;
pub use order_repo::StoreOrderRepository;
pub use route_repo::StoreRouteRepository;

use skylane_core::BookingError;

pub(crate) fn storage_error(e: sqlx::Error) -> BookingError {
    BookingError::Storage(e.to_string())
}
