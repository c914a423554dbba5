//! Reservation workflow
//!
//! Stay selection, live price breakdown, validation and the
//! Idle → Validating → Submitting → Success / Error submission flow.

pub mod machine;
pub mod workflow;

pub use machine::{
    ReservationMachine, SubmissionState, SubmitDecision, SubmitOutcome, Transition,
    SUBMISSION_FAILED_MESSAGE,
};
pub use workflow::{open_booking_session, RedirectPolicy, ReservationSnapshot, ReservationWorkflow};
