//! Application layer
//!
//! Orchestrates domain types against the ports: the reservation workflow,
//! the favorites cache, the auth context and the host listing wizard.

pub mod auth;
pub mod favorites;
pub mod listing_wizard;
pub mod reservation;

pub use auth::AuthContext;
pub use favorites::FavoritesStore;
pub use listing_wizard::ListingWizard;
pub use reservation::{
    open_booking_session, RedirectPolicy, ReservationMachine, ReservationSnapshot,
    ReservationWorkflow, SubmissionState, SubmitDecision, SubmitOutcome,
};
