//! Booking request and server-confirmed booking record

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::shared::types::wire::{IdFields, WireId};
use crate::shared::validations::clamp_guests;

/// How the guest will pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Credit,
    Debit,
    Upi,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Credit => "credit",
            Self::Debit => "debit",
            Self::Upi => "upi",
        }
    }

    /// Parse the form value; `None` for an empty or unknown selection.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "credit" => Some(Self::Credit),
            "debit" => Some(Self::Debit),
            "upi" => Some(Self::Upi),
            _ => None,
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Number of guests, always within 1..=8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct GuestCount(u8);

impl GuestCount {
    pub fn new(requested: i64) -> Self {
        Self(clamp_guests(requested))
    }

    pub fn get(&self) -> u8 {
        self.0
    }
}

impl Default for GuestCount {
    fn default() -> Self {
        Self(1)
    }
}

/// Body of `POST /bookings`. Built only from a validated form and never
/// modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub property_id: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests: GuestCount,
    pub payment_method: PaymentMethod,
    pub total_amount: u64,
}

/// Booking status as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
    #[serde(other)]
    Unknown,
}

/// Booking as confirmed by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BookingRecordWire")]
pub struct BookingRecord {
    pub id: String,
    #[serde(default)]
    pub status: BookingStatus,
}

#[derive(Deserialize)]
struct BookingRecordWire {
    id: Option<WireId>,
    #[serde(rename = "_id")]
    mongo_id: Option<WireId>,
    #[serde(default)]
    status: BookingStatus,
}

impl TryFrom<BookingRecordWire> for BookingRecord {
    type Error = String;

    fn try_from(wire: BookingRecordWire) -> Result<Self, Self::Error> {
        let id = IdFields {
            id: wire.id,
            mongo_id: wire.mongo_id,
        }
        .resolve()?;
        Ok(Self {
            id,
            status: wire.status,
        })
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn payment_method_parse() {
        assert_eq!(PaymentMethod::parse("UPI"), Some(PaymentMethod::Upi));
        assert_eq!(PaymentMethod::parse(" credit "), Some(PaymentMethod::Credit));
        assert_eq!(PaymentMethod::parse(""), None);
        assert_eq!(PaymentMethod::parse("cash"), None);
    }

    #[test]
    fn guest_count_is_clamped() {
        assert_eq!(GuestCount::new(0).get(), 1);
        assert_eq!(GuestCount::new(9).get(), 8);
        assert_eq!(GuestCount::default().get(), 1);
    }

    #[test]
    fn request_serializes_with_backend_field_names() {
        let req = BookingRequest {
            property_id: "p-42".into(),
            check_in: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            check_out: NaiveDate::from_ymd_opt(2025, 6, 4).unwrap(),
            guests: GuestCount::new(2),
            payment_method: PaymentMethod::Upi,
            total_amount: 7680,
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({
                "propertyId": "p-42",
                "checkIn": "2025-06-01",
                "checkOut": "2025-06-04",
                "guests": 2,
                "paymentMethod": "upi",
                "totalAmount": 7680
            })
        );
    }

    #[test]
    fn record_accepts_string_or_numeric_id() {
        let r: BookingRecord =
            serde_json::from_value(json!({ "id": "b-1", "status": "confirmed" })).unwrap();
        assert_eq!(r.id, "b-1");
        assert_eq!(r.status, BookingStatus::Confirmed);

        let r: BookingRecord = serde_json::from_value(json!({ "id": 17 })).unwrap();
        assert_eq!(r.id, "17");
        assert_eq!(r.status, BookingStatus::Pending);
    }

    #[test]
    fn record_tolerates_extra_fields_and_unknown_status() {
        let r: BookingRecord = serde_json::from_value(json!({
            "_id": "65f0c0ffee",
            "status": "awaiting_host",
            "totalAmount": 7680
        }))
        .unwrap();
        assert_eq!(r.id, "65f0c0ffee");
        assert_eq!(r.status, BookingStatus::Unknown);
    }

    #[test]
    fn record_with_both_id_keys_decodes() {
        let r: BookingRecord = serde_json::from_value(json!({
            "_id": "65f",
            "id": "65f",
            "status": "pending"
        }))
        .unwrap();
        assert_eq!(r.id, "65f");
        assert_eq!(r.status, BookingStatus::Pending);
    }

    #[test]
    fn record_without_id_is_rejected() {
        assert!(serde_json::from_value::<BookingRecord>(json!({ "status": "pending" })).is_err());
    }
}
