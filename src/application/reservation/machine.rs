//! Reservation state machine
//!
//! Owns the booking form (stay window, guests, payment method), its inline
//! errors and the submission state. Submission is two-phase so the network
//! call can happen outside any lock:
//!
//! 1. [`ReservationMachine::begin_submit`] validates and, on success, moves to
//!    `Submitting` and hands back the immutable [`BookingRequest`].
//! 2. [`ReservationMachine::complete`] applies the backend's answer.
//!
//! While `Submitting`, further `begin_submit` calls are ignored. That guard is
//! what keeps a single booking attempt to one outstanding request.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::domain::{
    validate_booking, BookingField, BookingRecord, BookingRequest, FieldErrors, GuestCount,
    PaymentMethod, PriceBreakdown, Property, StayWindow,
};
use crate::shared::errors::GatewayError;

/// User-facing message for any backend or transport failure.
pub const SUBMISSION_FAILED_MESSAGE: &str = "Failed to create booking. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmissionState {
    Idle,
    Validating,
    Submitting,
    Success,
    Error,
}

impl SubmissionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Validating => "Validating",
            Self::Submitting => "Submitting",
            Self::Success => "Success",
            Self::Error => "Error",
        }
    }

    /// A booking request is outstanding.
    pub fn is_in_flight(&self) -> bool {
        matches!(self, Self::Submitting)
    }
}

impl std::fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: SubmissionState,
    pub to: SubmissionState,
}

/// Result of the first submit phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitDecision {
    /// Validation failed; back in `Idle` with errors populated.
    Rejected(FieldErrors),
    /// A request is already in flight, or the booking already succeeded.
    Ignored,
    /// Send this request.
    Dispatch(BookingRequest),
}

/// Final outcome of a submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Rejected(FieldErrors),
    Ignored,
    Confirmed(BookingRecord),
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct ReservationMachine {
    property_id: String,
    nightly_rate: i64,
    window: StayWindow,
    guests: GuestCount,
    payment_method: Option<PaymentMethod>,
    errors: FieldErrors,
    state: SubmissionState,
    submission_error: Option<String>,
    in_flight: Option<BookingRequest>,
    record: Option<BookingRecord>,
    transitions: Vec<Transition>,
}

impl ReservationMachine {
    pub fn new(property: &Property) -> Self {
        Self {
            property_id: property.id.clone(),
            nightly_rate: property.nightly_rate,
            window: StayWindow::new(),
            guests: GuestCount::default(),
            payment_method: None,
            errors: FieldErrors::new(),
            state: SubmissionState::Idle,
            submission_error: None,
            in_flight: None,
            record: None,
            transitions: Vec::new(),
        }
    }

    // ── Form input ────────────────────────────────────────────

    /// Returns `false` if the form is locked (booking already confirmed).
    pub fn set_check_in(&mut self, date: NaiveDate) -> bool {
        if self.is_locked() {
            return false;
        }
        self.errors.clear(BookingField::CheckIn);
        if self.window.set_check_in(date) {
            debug!(property_id = %self.property_id, %date, "Check-out cleared by later check-in");
            self.errors.clear(BookingField::CheckOut);
        }
        true
    }

    pub fn set_check_out(&mut self, date: NaiveDate) -> bool {
        if self.is_locked() {
            return false;
        }
        self.errors.clear(BookingField::CheckOut);
        self.window.set_check_out(date);
        true
    }

    pub fn set_guests(&mut self, requested: i64) -> bool {
        if self.is_locked() {
            return false;
        }
        self.guests = GuestCount::new(requested);
        true
    }

    pub fn set_payment_method(&mut self, method: Option<PaymentMethod>) -> bool {
        if self.is_locked() {
            return false;
        }
        self.errors.clear(BookingField::PaymentMethod);
        self.payment_method = method;
        true
    }

    fn is_locked(&self) -> bool {
        self.state == SubmissionState::Success
    }

    // ── Derived values ────────────────────────────────────────

    pub fn property_id(&self) -> &str {
        &self.property_id
    }

    pub fn window(&self) -> &StayWindow {
        &self.window
    }

    pub fn guests(&self) -> GuestCount {
        self.guests
    }

    pub fn payment_method(&self) -> Option<PaymentMethod> {
        self.payment_method
    }

    pub fn nights(&self) -> u32 {
        self.window.nights()
    }

    /// Always recomputed from the current form; never cached.
    pub fn price(&self) -> PriceBreakdown {
        PriceBreakdown::calculate(self.nightly_rate, self.nights())
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn submission_error(&self) -> Option<&str> {
        self.submission_error.as_deref()
    }

    pub fn in_flight(&self) -> Option<&BookingRequest> {
        self.in_flight.as_ref()
    }

    pub fn record(&self) -> Option<&BookingRecord> {
        self.record.as_ref()
    }

    /// Drain the transitions recorded since the last call.
    pub fn take_transitions(&mut self) -> Vec<Transition> {
        std::mem::take(&mut self.transitions)
    }

    // ── Submission ────────────────────────────────────────────

    pub fn begin_submit(&mut self, today: NaiveDate) -> SubmitDecision {
        match self.state {
            SubmissionState::Idle | SubmissionState::Error => {}
            state => {
                debug!(property_id = %self.property_id, %state, "Submit ignored");
                return SubmitDecision::Ignored;
            }
        }

        self.transition(SubmissionState::Validating);
        self.errors = validate_booking(&self.window, self.payment_method, today);

        let request = match (
            self.errors.is_empty(),
            self.window.check_in(),
            self.window.check_out(),
            self.payment_method,
        ) {
            (true, Some(check_in), Some(check_out), Some(payment_method)) => BookingRequest {
                property_id: self.property_id.clone(),
                check_in,
                check_out,
                guests: self.guests,
                payment_method,
                total_amount: self.price().total,
            },
            _ => {
                debug!(
                    property_id = %self.property_id,
                    errors = self.errors.len(),
                    "Booking form failed validation"
                );
                self.transition(SubmissionState::Idle);
                return SubmitDecision::Rejected(self.errors.clone());
            }
        };

        self.submission_error = None;
        self.in_flight = Some(request.clone());
        self.transition(SubmissionState::Submitting);
        info!(
            property_id = %request.property_id,
            nights = self.nights(),
            total = request.total_amount,
            "Submitting booking"
        );
        SubmitDecision::Dispatch(request)
    }

    pub fn complete(&mut self, result: Result<BookingRecord, GatewayError>) -> SubmitOutcome {
        if self.state != SubmissionState::Submitting {
            warn!(
                property_id = %self.property_id,
                state = %self.state,
                "Completion received with no booking in flight"
            );
            return SubmitOutcome::Ignored;
        }
        self.in_flight = None;

        match result {
            Ok(record) => {
                info!(property_id = %self.property_id, booking_id = %record.id, "Booking confirmed");
                self.record = Some(record.clone());
                self.transition(SubmissionState::Success);
                SubmitOutcome::Confirmed(record)
            }
            Err(err) => {
                warn!(property_id = %self.property_id, error = %err, "Booking submission failed");
                self.submission_error = Some(SUBMISSION_FAILED_MESSAGE.to_string());
                self.transition(SubmissionState::Error);
                self.transition(SubmissionState::Idle);
                SubmitOutcome::Failed(SUBMISSION_FAILED_MESSAGE.to_string())
            }
        }
    }

    fn transition(&mut self, to: SubmissionState) {
        let from = self.state;
        self.state = to;
        self.transitions.push(Transition { from, to });
        debug!(property_id = %self.property_id, %from, %to, "Submission state changed");
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BookingStatus;
    use crate::domain::booking::validator::PAYMENT_METHOD_REQUIRED;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        date(2025, 5, 20)
    }

    fn property() -> Property {
        Property {
            id: "p-42".into(),
            title: "Lake House".into(),
            nightly_rate: 2000,
            location: None,
            max_guests: None,
        }
    }

    fn filled_machine() -> ReservationMachine {
        let mut m = ReservationMachine::new(&property());
        m.set_check_in(date(2025, 6, 1));
        m.set_check_out(date(2025, 6, 4));
        m.set_guests(2);
        m.set_payment_method(Some(PaymentMethod::Upi));
        m
    }

    fn record(id: &str) -> BookingRecord {
        BookingRecord {
            id: id.into(),
            status: BookingStatus::Confirmed,
        }
    }

    fn states(transitions: &[Transition]) -> Vec<SubmissionState> {
        let mut out = Vec::new();
        if let Some(first) = transitions.first() {
            out.push(first.from);
        }
        out.extend(transitions.iter().map(|t| t.to));
        out
    }

    #[test]
    fn price_follows_the_form() {
        let m = filled_machine();
        assert_eq!(m.nights(), 3);
        assert_eq!(m.price().total, 7680);
    }

    #[test]
    fn empty_payment_method_is_rejected_without_dispatch() {
        let mut m = filled_machine();
        m.set_payment_method(None);

        let decision = m.begin_submit(today());

        match decision {
            SubmitDecision::Rejected(errors) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(
                    errors.get(BookingField::PaymentMethod),
                    Some(PAYMENT_METHOD_REQUIRED)
                );
            }
            other => panic!("expected rejection, got {other:?}"),
        }
        assert_eq!(m.state(), SubmissionState::Idle);
        assert!(m.in_flight().is_none());
        assert_eq!(
            states(&m.take_transitions()),
            vec![
                SubmissionState::Idle,
                SubmissionState::Validating,
                SubmissionState::Idle
            ]
        );
    }

    #[test]
    fn valid_form_dispatches_request_with_displayed_total() {
        let mut m = filled_machine();
        let shown_total = m.price().total;

        let request = match m.begin_submit(today()) {
            SubmitDecision::Dispatch(r) => r,
            other => panic!("expected dispatch, got {other:?}"),
        };

        assert_eq!(request.total_amount, shown_total);
        assert_eq!(request.property_id, "p-42");
        assert_eq!(request.guests.get(), 2);
        assert_eq!(request.payment_method, PaymentMethod::Upi);
        assert_eq!(m.state(), SubmissionState::Submitting);
        assert_eq!(m.in_flight(), Some(&request));
    }

    #[test]
    fn repeated_submit_while_submitting_is_ignored() {
        let mut m = filled_machine();
        assert!(matches!(m.begin_submit(today()), SubmitDecision::Dispatch(_)));
        m.take_transitions();

        assert_eq!(m.begin_submit(today()), SubmitDecision::Ignored);
        assert_eq!(m.begin_submit(today()), SubmitDecision::Ignored);
        assert_eq!(m.state(), SubmissionState::Submitting);
        assert!(m.take_transitions().is_empty());
    }

    #[test]
    fn in_flight_request_is_not_changed_by_later_edits() {
        let mut m = filled_machine();
        let request = match m.begin_submit(today()) {
            SubmitDecision::Dispatch(r) => r,
            other => panic!("expected dispatch, got {other:?}"),
        };

        m.set_check_out(date(2025, 6, 10));

        assert_eq!(m.in_flight(), Some(&request));
        assert_eq!(m.in_flight().map(|r| r.total_amount), Some(7680));
        assert_ne!(m.price().total, 7680);
    }

    #[test]
    fn success_path_transitions_and_exposes_record() {
        let mut m = filled_machine();
        assert!(matches!(m.begin_submit(today()), SubmitDecision::Dispatch(_)));
        let outcome = m.complete(Ok(record("b-1")));

        assert_eq!(outcome, SubmitOutcome::Confirmed(record("b-1")));
        assert_eq!(m.state(), SubmissionState::Success);
        assert_eq!(m.record().map(|r| r.id.as_str()), Some("b-1"));
        assert!(m.in_flight().is_none());
        assert_eq!(
            states(&m.take_transitions()),
            vec![
                SubmissionState::Idle,
                SubmissionState::Validating,
                SubmissionState::Submitting,
                SubmissionState::Success
            ]
        );
    }

    #[test]
    fn success_is_terminal() {
        let mut m = filled_machine();
        m.begin_submit(today());
        m.complete(Ok(record("b-1")));

        assert_eq!(m.begin_submit(today()), SubmitDecision::Ignored);
        assert!(!m.set_check_in(date(2025, 7, 1)));
        assert_eq!(m.window().check_in(), Some(date(2025, 6, 1)));
        assert_eq!(m.state(), SubmissionState::Success);
    }

    #[test]
    fn failure_returns_to_idle_and_keeps_form() {
        let mut m = filled_machine();
        m.begin_submit(today());
        let outcome = m.complete(Err(GatewayError::Status {
            status: 500,
            body: "down".into(),
        }));

        assert_eq!(outcome, SubmitOutcome::Failed(SUBMISSION_FAILED_MESSAGE.into()));
        assert_eq!(m.state(), SubmissionState::Idle);
        assert_eq!(m.submission_error(), Some(SUBMISSION_FAILED_MESSAGE));
        assert_eq!(m.nights(), 3);
        assert_eq!(m.payment_method(), Some(PaymentMethod::Upi));
        assert_eq!(
            states(&m.take_transitions()),
            vec![
                SubmissionState::Idle,
                SubmissionState::Validating,
                SubmissionState::Submitting,
                SubmissionState::Error,
                SubmissionState::Idle
            ]
        );

        // resubmission allowed, and clears the previous message
        assert!(matches!(m.begin_submit(today()), SubmitDecision::Dispatch(_)));
        assert_eq!(m.submission_error(), None);
    }

    #[test]
    fn stale_completion_is_ignored() {
        let mut m = filled_machine();
        assert_eq!(m.complete(Ok(record("b-9"))), SubmitOutcome::Ignored);
        assert_eq!(m.state(), SubmissionState::Idle);
        assert!(m.record().is_none());
    }

    #[test]
    fn editing_a_field_clears_only_its_error() {
        let mut m = ReservationMachine::new(&property());
        assert!(matches!(m.begin_submit(today()), SubmitDecision::Rejected(_)));
        assert_eq!(m.errors().len(), 3);
        assert_eq!(
            m.errors().get(BookingField::CheckIn),
            Some("Check-in date cannot be in the past")
        );
        assert_eq!(
            m.errors().get(BookingField::CheckOut),
            Some("Check-out date must be after check-in date")
        );

        m.set_payment_method(Some(PaymentMethod::Credit));
        assert_eq!(m.errors().get(BookingField::PaymentMethod), None);
        assert_eq!(m.errors().len(), 2);

        m.set_check_out(date(2025, 6, 4));
        assert_eq!(m.errors().get(BookingField::CheckOut), None);
        assert_eq!(
            m.errors().get(BookingField::CheckIn),
            Some("Check-in date cannot be in the past")
        );
    }

    #[test]
    fn check_in_past_check_out_resets_nights_and_total() {
        let mut m = filled_machine();
        m.set_check_in(date(2025, 6, 10));
        assert_eq!(m.window().check_out(), None);
        assert_eq!(m.nights(), 0);
        assert_eq!(m.price(), PriceBreakdown::default());
    }

    #[test]
    fn past_check_in_never_reaches_dispatch() {
        let mut m = filled_machine();
        let decision = m.begin_submit(date(2025, 6, 2));
        assert!(matches!(decision, SubmitDecision::Rejected(ref e) if e.get(BookingField::CheckIn).is_some()));
        assert!(m.in_flight().is_none());
    }
}
