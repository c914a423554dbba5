//! Workflow events
//!
//! Everything the reservation workflow announces to the hosting UI.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::reservation::SubmissionState;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum WorkflowEvent {
    /// Submission state moved
    StateChanged(StateChangedEvent),
    /// Backend accepted the booking
    BookingConfirmed(BookingConfirmedEvent),
    /// Backend rejected the booking or was unreachable
    SubmissionFailed(SubmissionFailedEvent),
    /// Success banner has been shown long enough; navigate away
    RedirectRequested(RedirectRequestedEvent),
}

impl WorkflowEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            WorkflowEvent::StateChanged(_) => "state_changed",
            WorkflowEvent::BookingConfirmed(_) => "booking_confirmed",
            WorkflowEvent::SubmissionFailed(_) => "submission_failed",
            WorkflowEvent::RedirectRequested(_) => "redirect_requested",
        }
    }

    pub fn property_id(&self) -> &str {
        match self {
            WorkflowEvent::StateChanged(e) => &e.property_id,
            WorkflowEvent::BookingConfirmed(e) => &e.property_id,
            WorkflowEvent::SubmissionFailed(e) => &e.property_id,
            WorkflowEvent::RedirectRequested(e) => &e.property_id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateChangedEvent {
    pub property_id: String,
    pub from: SubmissionState,
    pub to: SubmissionState,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingConfirmedEvent {
    pub property_id: String,
    pub booking_id: String,
    pub total_amount: u64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionFailedEvent {
    pub property_id: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedirectRequestedEvent {
    pub property_id: String,
    pub booking_id: String,
    pub path: String,
    pub timestamp: DateTime<Utc>,
}

/// Envelope sent over the bus
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventMessage {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub event: WorkflowEvent,
}

impl EventMessage {
    pub fn new(event: WorkflowEvent) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            event,
        }
    }
}
