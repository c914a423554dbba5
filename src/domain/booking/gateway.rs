//! Booking-creation endpoint contract

use async_trait::async_trait;

use super::model::{BookingRecord, BookingRequest};
use crate::shared::errors::GatewayError;

#[async_trait]
pub trait BookingGateway: Send + Sync {
    /// `POST /bookings`. Any non-2xx response is an error; nothing is retried.
    async fn create_booking(&self, request: &BookingRequest) -> Result<BookingRecord, GatewayError>;
}
