//! Pricing
//!
//! Pure nightly-rate arithmetic and display formatting.

pub mod model;

pub use model::{format_amount, PriceBreakdown, SERVICE_FEE_PERCENT, TAX_PERCENT};
