use serde::{Deserialize, Serialize};

use crate::error::{BookingError, SeatField};

/// Physical seat geometry of an airplane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeatGrid {
    pub rows: i32,
    pub seats_in_row: i32,
}

impl SeatGrid {
    pub fn new(rows: i32, seats_in_row: i32) -> Self {
        Self { rows, seats_in_row }
    }

    pub fn capacity(&self) -> i64 {
        (self.rows as i64) * (self.seats_in_row as i64)
    }
}

/// A seat already sold on a flight, as exposed by the flight detail view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TakenSeat {
    pub row: i32,
    pub seat: i32,
}

/// Check that a ticket's coordinates lie within the airplane's grid.
///
/// Pure range validation only. Uniqueness of (flight, row, seat) is the
/// storage layer's insert-time constraint, not a concern of this function.
pub fn validate_ticket(row: i32, seat: i32, grid: &SeatGrid) -> Result<(), BookingError> {
    for (value, field, bound) in [
        (row, SeatField::Row, grid.rows),
        (seat, SeatField::Seat, grid.seats_in_row),
    ] {
        if !(1..=bound).contains(&value) {
            return Err(BookingError::SeatOutOfRange {
                field,
                value,
                bound,
            });
        }
    }
    Ok(())
}

/// Availability projection: unsold seat count, derived at query time.
pub fn tickets_available(grid: &SeatGrid, sold: i64) -> i64 {
    grid.capacity() - sold
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_coordinates_inside_grid() {
        let grid = SeatGrid::new(26, 6);

        validate_ticket(1, 1, &grid).unwrap();
        validate_ticket(26, 6, &grid).unwrap();
        validate_ticket(13, 3, &grid).unwrap();
    }

    #[test]
    fn rejects_row_outside_grid() {
        let grid = SeatGrid::new(26, 6);

        let err = validate_ticket(27, 1, &grid).unwrap_err();
        match err {
            BookingError::SeatOutOfRange { field, value, bound } => {
                assert_eq!(field, SeatField::Row);
                assert_eq!(value, 27);
                assert_eq!(bound, 26);
            }
            other => panic!("expected SeatOutOfRange, got {other:?}"),
        }
    }

    #[test]
    fn rejects_seat_outside_grid() {
        let grid = SeatGrid::new(26, 6);

        let err = validate_ticket(1, 7, &grid).unwrap_err();
        match err {
            BookingError::SeatOutOfRange { field, bound, .. } => {
                assert_eq!(field, SeatField::Seat);
                assert_eq!(bound, 6);
            }
            other => panic!("expected SeatOutOfRange, got {other:?}"),
        }
    }

    #[test]
    fn rejects_zero_and_negative_coordinates() {
        let grid = SeatGrid::new(26, 6);

        assert!(validate_ticket(0, 1, &grid).is_err());
        assert!(validate_ticket(1, 0, &grid).is_err());
        assert!(validate_ticket(-3, 2, &grid).is_err());
    }

    #[test]
    fn availability_is_capacity_minus_sold() {
        let grid = SeatGrid::new(26, 6);

        assert_eq!(grid.capacity(), 156);
        assert_eq!(tickets_available(&grid, 0), 156);
        assert_eq!(tickets_available(&grid, 3), 153);
        assert_eq!(tickets_available(&grid, 156), 0);
    }

    #[test]
    fn capacity_does_not_overflow_i32() {
        let grid = SeatGrid::new(i32::MAX, 2);

        assert_eq!(grid.capacity(), (i32::MAX as i64) * 2);
    }
}
