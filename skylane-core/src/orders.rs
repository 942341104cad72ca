use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::BookingError;

/// One requested seat within an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketSpec {
    pub row: i32,
    pub seat: i32,
    pub flight_id: Uuid,
}

/// Flight context a ticket is displayed with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketFlight {
    pub id: Uuid,
    pub route: String,
    pub airplane: String,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    pub id: Uuid,
    pub row: i32,
    pub seat: i32,
    pub flight: TicketFlight,
}

/// The transactional unit binding one or more tickets to one user.
/// Immutable after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub tickets: Vec<Ticket>,
}

/// Reject empty purchases before any persistence is attempted.
pub fn validate_ticket_specs(specs: &[TicketSpec]) -> Result<(), BookingError> {
    if specs.is_empty() {
        return Err(BookingError::validation(
            "tickets",
            "an order must contain at least one ticket",
        ));
    }
    Ok(())
}

/// Page request for the order listing. Page numbers start at 1.
#[derive(Debug, Clone, Copy)]
pub struct OrderPageRequest {
    pub page: u32,
    pub page_size: u32,
}

impl OrderPageRequest {
    pub const DEFAULT_PAGE_SIZE: u32 = 10;
    pub const MAX_PAGE_SIZE: u32 = 100;

    pub fn new(page: Option<u32>, page_size: Option<u32>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            page_size: page_size
                .unwrap_or(Self::DEFAULT_PAGE_SIZE)
                .clamp(1, Self::MAX_PAGE_SIZE),
        }
    }

    pub fn offset(&self) -> i64 {
        (self.page as i64 - 1) * self.page_size as i64
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderPage {
    pub items: Vec<Order>,
    pub page: u32,
    pub page_size: u32,
    pub total: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_ticket_list_is_rejected() {
        let err = validate_ticket_specs(&[]).unwrap_err();
        assert_eq!(err.field().as_deref(), Some("tickets"));
    }

    #[test]
    fn non_empty_ticket_list_passes() {
        let specs = [TicketSpec {
            row: 1,
            seat: 1,
            flight_id: Uuid::new_v4(),
        }];

        validate_ticket_specs(&specs).unwrap();
    }

    #[test]
    fn page_request_defaults_and_caps() {
        let default = OrderPageRequest::new(None, None);
        assert_eq!(default.page, 1);
        assert_eq!(default.page_size, 10);
        assert_eq!(default.offset(), 0);

        let capped = OrderPageRequest::new(Some(3), Some(500));
        assert_eq!(capped.page_size, 100);
        assert_eq!(capped.offset(), 200);

        let floored = OrderPageRequest::new(Some(0), Some(0));
        assert_eq!(floored.page, 1);
        assert_eq!(floored.page_size, 1);
    }
}
