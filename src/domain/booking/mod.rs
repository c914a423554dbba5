//! Booking aggregate
//!
//! Request/record types, the form validator, and the booking-creation port.

pub mod gateway;
pub mod model;
pub mod validator;

pub use gateway::BookingGateway;
pub use model::{BookingRecord, BookingRequest, BookingStatus, GuestCount, PaymentMethod};
pub use validator::{validate_booking, BookingField, FieldErrors};
