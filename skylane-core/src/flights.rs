use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::{Airplane, Crew};
use crate::error::BookingError;
use crate::routes::Route;
use crate::seats::TakenSeat;

/// Flight summary for list views: display names plus the availability
/// projection, computed at query time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightSummary {
    pub id: Uuid,
    pub route: String,
    pub airplane: String,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
    pub crew: Vec<String>,
    pub tickets_available: i64,
}

/// Flight detail: full context plus the seats already sold, so a client
/// can render a seat map without proposing collisions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightDetail {
    pub id: Uuid,
    pub route: Route,
    pub airplane: Airplane,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
    pub crew: Vec<Crew>,
    pub taken_seats: Vec<TakenSeat>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewFlight {
    pub route_id: Uuid,
    pub airplane_id: Uuid,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
    #[serde(default)]
    pub crew_ids: Vec<Uuid>,
}

impl NewFlight {
    pub fn validate(&self) -> Result<(), BookingError> {
        if self.departure_time >= self.arrival_time {
            return Err(BookingError::validation(
                "arrival_time",
                "arrival time must be after departure time",
            ));
        }
        Ok(())
    }
}

/// Conjunctive filters for the flight listing.
///
/// The crew filter matches a flight when ANY of the supplied ids is
/// assigned to it (intersection-nonempty, not subset).
#[derive(Debug, Clone, Default)]
pub struct FlightFilter {
    /// Calendar-date match against departure_time, ignoring time of day.
    pub date: Option<NaiveDate>,
    pub route_id: Option<Uuid>,
    pub crew_ids: Vec<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn base_flight() -> NewFlight {
        NewFlight {
            route_id: Uuid::new_v4(),
            airplane_id: Uuid::new_v4(),
            departure_time: Utc.with_ymd_and_hms(2024, 6, 2, 14, 0, 0).unwrap(),
            arrival_time: Utc.with_ymd_and_hms(2024, 6, 2, 15, 40, 0).unwrap(),
            crew_ids: vec![],
        }
    }

    #[test]
    fn accepts_departure_before_arrival() {
        base_flight().validate().unwrap();
    }

    #[test]
    fn rejects_arrival_before_departure() {
        let mut flight = base_flight();
        flight.arrival_time = Utc.with_ymd_and_hms(2024, 6, 2, 13, 0, 0).unwrap();

        let err = flight.validate().unwrap_err();
        assert_eq!(err.field().as_deref(), Some("arrival_time"));
    }

    #[test]
    fn rejects_zero_duration_flight() {
        let mut flight = base_flight();
        flight.arrival_time = flight.departure_time;

        assert!(flight.validate().is_err());
    }
}
