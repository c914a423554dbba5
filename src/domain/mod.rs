//! Domain layer
//!
//! Entities, pure calculations and the port traits the application layer
//! drives. Nothing in here performs I/O.

pub mod booking;
pub mod favorites;
pub mod listing;
pub mod property;
pub mod stay;
pub mod pricing;
pub mod user;

pub use booking::{
    validate_booking, BookingField, BookingGateway, BookingRecord, BookingRequest, BookingStatus,
    FieldErrors, GuestCount, PaymentMethod,
};
pub use favorites::FavoritesGateway;
pub use pricing::{format_amount, PriceBreakdown};
pub use property::{Property, PropertyGateway};
pub use stay::StayWindow;
pub use user::{CurrentUser, SessionStore, UserRole};

pub use crate::shared::errors::DomainError;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
