use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::BookingError;

/// A directed source -> destination pair, resolved with airport names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Route {
    pub id: Uuid,
    pub source_id: Uuid,
    pub source: String,
    pub destination_id: Uuid,
    pub destination: String,
    pub distance: i32,
}

impl Route {
    pub fn trip_name(&self) -> String {
        format!("{} -> {}", self.source, self.destination)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewRoute {
    pub source_id: Uuid,
    pub destination_id: Uuid,
    pub distance: i32,
}

impl NewRoute {
    /// Checked before any persistence attempt.
    pub fn validate(&self) -> Result<(), BookingError> {
        if self.source_id == self.destination_id {
            return Err(BookingError::validation(
                "destination_id",
                "source and destination cannot be the same",
            ));
        }
        if self.distance < 1 {
            return Err(BookingError::validation(
                "distance",
                "distance must be at least 1",
            ));
        }
        Ok(())
    }
}
