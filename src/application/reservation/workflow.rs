//! Async driver for the reservation state machine
//!
//! Wraps [`ReservationMachine`] behind a `tokio::sync::Mutex`, performs the
//! booking-creation call with the lock released, publishes workflow events,
//! and schedules the post-success redirect.

use std::sync::Arc;
use std::time::Duration;

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, error, info};

use super::machine::{ReservationMachine, SubmissionState, SubmitDecision, SubmitOutcome};
use crate::config::BookingConfig;
use crate::domain::{
    BookingGateway, BookingRecord, DomainError, DomainResult, FieldErrors, PaymentMethod,
    PriceBreakdown, Property, PropertyGateway, StayWindow,
};
use crate::notifications::{
    BookingConfirmedEvent, RedirectRequestedEvent, SharedEventBus, StateChangedEvent,
    SubmissionFailedEvent, WorkflowEvent,
};
use crate::shared::time::Clock;

/// Where and when to navigate after a confirmed booking.
#[derive(Debug, Clone)]
pub struct RedirectPolicy {
    pub delay: Duration,
    pub path: String,
}

impl From<&BookingConfig> for RedirectPolicy {
    fn from(config: &BookingConfig) -> Self {
        Self {
            delay: Duration::from_millis(config.redirect_delay_ms),
            path: config.redirect_path.clone(),
        }
    }
}

impl Default for RedirectPolicy {
    fn default() -> Self {
        Self::from(&BookingConfig::default())
    }
}

/// Read-only view of the form for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationSnapshot {
    pub property_id: String,
    pub state: SubmissionState,
    pub window: StayWindow,
    pub nights: u32,
    pub guests: u8,
    pub payment_method: Option<PaymentMethod>,
    pub price: PriceBreakdown,
    pub errors: FieldErrors,
    pub submission_error: Option<String>,
    pub booking: Option<BookingRecord>,
}

/// Fetch the property that seeds a booking session.
///
/// A property that cannot be found is a precondition failure: the booking form
/// must not be shown at all.
pub async fn open_booking_session(
    properties: &dyn PropertyGateway,
    property_id: &str,
) -> DomainResult<Property> {
    if property_id.trim().is_empty() {
        return Err(DomainError::PropertyNotLoaded(property_id.to_string()));
    }

    match properties.get_property(property_id).await {
        Ok(property) => {
            debug!(%property_id, nightly_rate = property.nightly_rate, "Property loaded");
            Ok(property)
        }
        Err(err) if err.is_not_found() => {
            error!(%property_id, "Property not found; booking form unavailable");
            Err(DomainError::PropertyNotLoaded(property_id.to_string()))
        }
        Err(err) => {
            error!(%property_id, error = %err, "Failed to load property");
            Err(err.into())
        }
    }
}

pub struct ReservationWorkflow {
    machine: Mutex<ReservationMachine>,
    bookings: Arc<dyn BookingGateway>,
    clock: Arc<dyn Clock>,
    events: SharedEventBus,
    redirect: RedirectPolicy,
}

impl ReservationWorkflow {
    pub fn new(
        property: &Property,
        bookings: Arc<dyn BookingGateway>,
        clock: Arc<dyn Clock>,
        events: SharedEventBus,
        redirect: RedirectPolicy,
    ) -> Self {
        Self {
            machine: Mutex::new(ReservationMachine::new(property)),
            bookings,
            clock,
            events,
            redirect,
        }
    }

    pub async fn set_check_in(&self, date: NaiveDate) -> bool {
        self.machine.lock().await.set_check_in(date)
    }

    pub async fn set_check_out(&self, date: NaiveDate) -> bool {
        self.machine.lock().await.set_check_out(date)
    }

    pub async fn set_guests(&self, requested: i64) -> bool {
        self.machine.lock().await.set_guests(requested)
    }

    pub async fn set_payment_method(&self, method: Option<PaymentMethod>) -> bool {
        self.machine.lock().await.set_payment_method(method)
    }

    pub async fn state(&self) -> SubmissionState {
        self.machine.lock().await.state()
    }

    pub async fn snapshot(&self) -> ReservationSnapshot {
        let m = self.machine.lock().await;
        ReservationSnapshot {
            property_id: m.property_id().to_string(),
            state: m.state(),
            window: *m.window(),
            nights: m.nights(),
            guests: m.guests().get(),
            payment_method: m.payment_method(),
            price: m.price(),
            errors: m.errors().clone(),
            submission_error: m.submission_error().map(str::to_string),
            booking: m.record().cloned(),
        }
    }

    /// Validate and, if the form is valid and nothing is in flight, create
    /// the booking. Calls made while a request is outstanding return
    /// [`SubmitOutcome::Ignored`] without touching the backend.
    pub async fn submit(&self) -> SubmitOutcome {
        let (decision, property_id) = {
            let mut m = self.machine.lock().await;
            let decision = m.begin_submit(self.clock.today());
            self.publish_transitions(&mut m);
            (decision, m.property_id().to_string())
        };

        let request = match decision {
            SubmitDecision::Rejected(errors) => {
                metrics::counter!("booking_validation_failures_total").increment(1);
                return SubmitOutcome::Rejected(errors);
            }
            SubmitDecision::Ignored => {
                metrics::counter!("booking_submissions_ignored_total").increment(1);
                return SubmitOutcome::Ignored;
            }
            SubmitDecision::Dispatch(request) => request,
        };

        metrics::counter!("booking_submissions_total").increment(1);
        let result = self.bookings.create_booking(&request).await;

        let outcome = {
            let mut m = self.machine.lock().await;
            let outcome = m.complete(result);
            self.publish_transitions(&mut m);
            outcome
        };

        match &outcome {
            SubmitOutcome::Confirmed(record) => {
                metrics::counter!("booking_success_total").increment(1);
                self.events
                    .publish(WorkflowEvent::BookingConfirmed(BookingConfirmedEvent {
                        property_id: property_id.clone(),
                        booking_id: record.id.clone(),
                        total_amount: request.total_amount,
                        timestamp: Utc::now(),
                    }));
                self.schedule_redirect(property_id, record.id.clone());
            }
            SubmitOutcome::Failed(message) => {
                metrics::counter!("booking_failures_total").increment(1);
                self.events
                    .publish(WorkflowEvent::SubmissionFailed(SubmissionFailedEvent {
                        property_id,
                        message: message.clone(),
                        timestamp: Utc::now(),
                    }));
            }
            SubmitOutcome::Rejected(_) | SubmitOutcome::Ignored => {}
        }

        outcome
    }

    fn publish_transitions(&self, machine: &mut ReservationMachine) {
        for t in machine.take_transitions() {
            self.events
                .publish(WorkflowEvent::StateChanged(StateChangedEvent {
                    property_id: machine.property_id().to_string(),
                    from: t.from,
                    to: t.to,
                    timestamp: Utc::now(),
                }));
        }
    }

    fn schedule_redirect(&self, property_id: String, booking_id: String) {
        let events = self.events.clone();
        let RedirectPolicy { delay, path } = self.redirect.clone();
        info!(%booking_id, delay_ms = delay.as_millis() as u64, %path, "Redirect scheduled");

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            events.publish(WorkflowEvent::RedirectRequested(RedirectRequestedEvent {
                property_id,
                booking_id,
                path,
                timestamp: Utc::now(),
            }));
        });
    }
}

// ── Tests ──────────────────────────────────────────────────────
