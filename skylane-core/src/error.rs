use std::fmt;

use uuid::Uuid;

/// Which ticket coordinate failed range validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeatField {
    Row,
    Seat,
}

impl fmt::Display for SeatField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeatField::Row => write!(f, "row"),
            SeatField::Seat => write!(f, "seat"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("{field}: {message}")]
    Validation { field: String, message: String },

    #[error("{field} number must be in available range: (1, {bound})")]
    SeatOutOfRange {
        field: SeatField,
        value: i32,
        bound: i32,
    },

    /// Lost the insert-time uniqueness check on (flight, row, seat).
    #[error("row {row}, seat {seat} is already taken on this flight")]
    SeatTaken { flight_id: Uuid, row: i32, seat: i32 },

    #[error("{entity} with this name already exists")]
    Duplicate { entity: &'static str },

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: Uuid },

    #[error("storage failure: {0}")]
    Storage(String),
}

impl BookingError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn not_found(entity: &'static str, id: Uuid) -> Self {
        Self::NotFound { entity, id }
    }

    /// The request field this error is addressed to, when there is one.
    pub fn field(&self) -> Option<String> {
        match self {
            Self::Validation { field, .. } => Some(field.clone()),
            Self::SeatOutOfRange { field, .. } => Some(field.to_string()),
            Self::SeatTaken { .. } => Some("seat".to_string()),
            _ => None,
        }
    }
}
