//! # Stay Booking
//!
//! Client-side reservation workflow for a property-rental marketplace:
//! date and guest selection, price breakdown, booking validation and a
//! guarded submission that talks to the marketplace REST backend.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Entities, pure calculations (nights, pricing, validation) and port traits
//! - **application**: Reservation state machine and workflow, favorites, auth, listing wizard
//! - **infrastructure**: HTTP backend, in-memory backend, session persistence
//! - **notifications**: In-process events for UI banners and redirects
//! - **shared**: Errors, wire helpers, clock, tracing setup

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod notifications;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export the workflow entry points
pub use application::{open_booking_session, ReservationWorkflow, SubmitOutcome};

// Re-export adapters
pub use infrastructure::{FileSessionStore, HttpBackend, InMemoryBackend};

// Re-export notifications
pub use notifications::{create_event_bus, EventBus, SharedEventBus, WorkflowEvent};
