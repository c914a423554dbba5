//! Stay price breakdown

use serde::{Deserialize, Serialize};

/// Service fee, percent of the base price.
pub const SERVICE_FEE_PERCENT: u64 = 10;
/// Taxes, percent of the base price.
pub const TAX_PERCENT: u64 = 18;

/// Price shown to the guest before booking, in whole currency units.
///
/// `total` is always the exact sum of the three rounded components.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    pub base_price: u64,
    pub service_fee: u64,
    pub taxes: u64,
    pub total: u64,
}

impl PriceBreakdown {
    /// Compute the breakdown for `nights` at `nightly_rate`.
    ///
    /// A negative rate is treated as 0. Zero nights gives an all-zero breakdown.
    /// Fee and taxes are rounded independently, half away from zero, before
    /// being summed, so the total can differ by one unit from rounding the sum.
    pub fn calculate(nightly_rate: i64, nights: u32) -> Self {
        if nights == 0 {
            return Self::default();
        }

        let rate = u64::try_from(nightly_rate).unwrap_or(0);
        let base_price = rate.saturating_mul(u64::from(nights));
        let service_fee = percent_rounded(base_price, SERVICE_FEE_PERCENT);
        let taxes = percent_rounded(base_price, TAX_PERCENT);

        Self {
            base_price,
            service_fee,
            taxes,
            total: base_price.saturating_add(service_fee).saturating_add(taxes),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.total == 0
    }
}

fn percent_rounded(amount: u64, percent: u64) -> u64 {
    let scaled = u128::from(amount) * u128::from(percent);
    u64::try_from((scaled + 50) / 100).unwrap_or(u64::MAX)
}

/// Render an amount with Indian digit grouping, e.g. `₹1,23,456`.
/// Display only; never feeds back into arithmetic.
pub fn format_amount(amount: u64, symbol: &str) -> String {
    let digits = amount.to_string();
    if digits.len() <= 3 {
        return format!("{symbol}{digits}");
    }

    let (head, last_three) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);
    groups.reverse();

    format!("{symbol}{},{last_three}", groups.join(","))
}

// ── Tests ──────────────────────────────────────────────────────
