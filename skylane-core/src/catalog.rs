use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::BookingError;
use crate::seats::SeatGrid;

/// Static reference data: no business invariants beyond uniqueness.

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirplaneType {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct City {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Crew {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
}

impl Crew {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// An airport, resolved with the name of the city it belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Airport {
    pub id: Uuid,
    pub name: String,
    pub city_id: Uuid,
    pub city: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Airplane {
    pub id: Uuid,
    pub name: String,
    pub rows: i32,
    pub seats_in_row: i32,
    pub airplane_type_id: Uuid,
    pub airplane_type: String,
}

impl Airplane {
    pub fn grid(&self) -> SeatGrid {
        SeatGrid::new(self.rows, self.seats_in_row)
    }
}

// ============================================================================
// Create payloads
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct NewAirplaneType {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewCity {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewCrew {
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewAirport {
    pub name: String,
    pub city_id: Uuid,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewAirplane {
    pub name: String,
    pub rows: i32,
    pub seats_in_row: i32,
    pub airplane_type_id: Uuid,
}

impl NewAirplane {
    pub fn validate(&self) -> Result<(), BookingError> {
        if self.rows < 1 {
            return Err(BookingError::validation("rows", "rows must be at least 1"));
        }
        if self.seats_in_row < 1 {
            return Err(BookingError::validation(
                "seats_in_row",
                "seats_in_row must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Conjunctive filters for the airport listing.
#[derive(Debug, Clone, Default)]
pub struct AirportFilter {
    /// Case-insensitive substring match on airport name.
    pub name: Option<String>,
    pub city_id: Option<Uuid>,
}
