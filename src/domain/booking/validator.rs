//! Submit-eligibility rules for the booking form

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Serialize, Serializer};

use super::model::PaymentMethod;
use crate::domain::stay::StayWindow;

pub const CHECK_IN_IN_PAST: &str = "Check-in date cannot be in the past";
pub const CHECK_OUT_NOT_AFTER_CHECK_IN: &str = "Check-out date must be after check-in date";
pub const PAYMENT_METHOD_REQUIRED: &str = "Payment method is required";

/// Form fields that can carry an inline error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BookingField {
    CheckIn,
    CheckOut,
    PaymentMethod,
}

impl BookingField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CheckIn => "checkIn",
            Self::CheckOut => "checkOut",
            Self::PaymentMethod => "paymentMethod",
        }
    }
}

impl std::fmt::Display for BookingField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for BookingField {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Field → message map. Empty means the form may be submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<BookingField, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: BookingField, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: BookingField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    /// Drop the error for one field. Returns whether there was one.
    pub fn clear(&mut self, field: BookingField) -> bool {
        self.0.remove(&field).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (BookingField, &str)> {
        self.0.iter().map(|(f, m)| (*f, m.as_str()))
    }
}

/// Run every rule; there is no short-circuiting between fields.
///
/// `today` is the floor for check-in, compared by date only.
pub fn validate_booking(
    window: &StayWindow,
    payment_method: Option<PaymentMethod>,
    today: NaiveDate,
) -> FieldErrors {
    let mut errors = FieldErrors::new();

    // An absent date fails the same rule as a misplaced one.
    let check_in_ok = matches!(window.check_in(), Some(check_in) if check_in >= today);
    if !check_in_ok {
        errors.insert(BookingField::CheckIn, CHECK_IN_IN_PAST);
    }

    let check_out_ok = match (window.check_in(), window.check_out()) {
        (Some(check_in), Some(check_out)) => check_out > check_in,
        (None, Some(_)) => true,
        (_, None) => false,
    };
    if !check_out_ok {
        errors.insert(BookingField::CheckOut, CHECK_OUT_NOT_AFTER_CHECK_IN);
    }

    if payment_method.is_none() {
        errors.insert(BookingField::PaymentMethod, PAYMENT_METHOD_REQUIRED);
    }

    errors
}

// ── Tests ──────────────────────────────────────────────────────
