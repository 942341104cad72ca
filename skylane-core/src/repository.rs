use async_trait::async_trait;
use uuid::Uuid;

use crate::catalog::{
    Airplane, AirplaneType, Airport, AirportFilter, City, Crew, NewAirplane, NewAirplaneType,
    NewAirport, NewCity, NewCrew,
};
use crate::error::BookingError;
use crate::flights::{FlightDetail, FlightFilter, FlightSummary, NewFlight};
use crate::orders::{Order, OrderPage, OrderPageRequest, TicketSpec};
use crate::routes::{NewRoute, Route};

/// Repository trait for reference catalog access
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn list_airplane_types(&self) -> Result<Vec<AirplaneType>, BookingError>;

    async fn create_airplane_type(&self, new: NewAirplaneType)
        -> Result<AirplaneType, BookingError>;

    async fn list_cities(&self) -> Result<Vec<City>, BookingError>;

    async fn create_city(&self, new: NewCity) -> Result<City, BookingError>;

    async fn list_crew(&self) -> Result<Vec<Crew>, BookingError>;

    async fn create_crew(&self, new: NewCrew) -> Result<Crew, BookingError>;

    async fn list_airports(&self, filter: &AirportFilter) -> Result<Vec<Airport>, BookingError>;

    async fn create_airport(&self, new: NewAirport) -> Result<Airport, BookingError>;

    async fn list_airplanes(&self) -> Result<Vec<Airplane>, BookingError>;

    async fn create_airplane(&self, new: NewAirplane) -> Result<Airplane, BookingError>;
}

/// Repository trait for route registry access
#[async_trait]
pub trait RouteRepository: Send + Sync {
    async fn list_routes(&self) -> Result<Vec<Route>, BookingError>;

    async fn create_route(&self, new: NewRoute) -> Result<Route, BookingError>;
}

/// Repository trait for flight schedule access
#[async_trait]
pub trait FlightRepository: Send + Sync {
    async fn list_flights(&self, filter: &FlightFilter)
        -> Result<Vec<FlightSummary>, BookingError>;

    async fn get_flight(&self, id: Uuid) -> Result<Option<FlightDetail>, BookingError>;

    async fn create_flight(&self, new: NewFlight) -> Result<FlightDetail, BookingError>;
}

/// Repository trait for order data access
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Create an order and all of its tickets as one atomic unit.
    ///
    /// Implementations must run the whole operation inside a single
    /// transaction: a range failure or a (flight, row, seat) conflict on
    /// any ticket rolls back the order itself.
    async fn create_order(
        &self,
        user_id: Uuid,
        tickets: &[TicketSpec],
    ) -> Result<Order, BookingError>;

    /// List orders owned by `user_id`, newest first. Never returns another
    /// user's orders.
    async fn list_orders(
        &self,
        user_id: Uuid,
        page: OrderPageRequest,
    ) -> Result<OrderPage, BookingError>;
}
