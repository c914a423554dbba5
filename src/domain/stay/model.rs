//! Stay window: the check-in / check-out pair and its night count

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Check-in / check-out pair held by the booking form.
///
/// The pair is never left inverted by a check-in change: moving check-in on
/// or past the current check-out clears check-out. Setting check-out directly
/// is unconditional; whether it is acceptable is decided by the validator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StayWindow {
    check_in: Option<NaiveDate>,
    check_out: Option<NaiveDate>,
}

impl StayWindow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check_in(&self) -> Option<NaiveDate> {
        self.check_in
    }

    pub fn check_out(&self) -> Option<NaiveDate> {
        self.check_out
    }

    /// Set check-in. Returns `true` when an existing check-out was cleared.
    pub fn set_check_in(&mut self, date: NaiveDate) -> bool {
        self.check_in = Some(date);
        match self.check_out {
            Some(out) if out <= date => {
                self.check_out = None;
                true
            }
            _ => false,
        }
    }

    pub fn set_check_out(&mut self, date: NaiveDate) {
        self.check_out = Some(date);
    }

    pub fn clear(&mut self) {
        self.check_in = None;
        self.check_out = None;
    }

    /// Calendar nights between the two dates; 0 if either is missing or the
    /// range is not positive.
    pub fn nights(&self) -> u32 {
        match (self.check_in, self.check_out) {
            (Some(check_in), Some(check_out)) => {
                let days = (check_out - check_in).num_days();
                u32::try_from(days.max(0)).unwrap_or(u32::MAX)
            }
            _ => 0,
        }
    }

    /// Both dates present and check-out strictly after check-in.
    pub fn is_complete(&self) -> bool {
        self.nights() > 0
    }
}
