use validator::ValidationError;

pub const MIN_GUESTS: u8 = 1;
pub const MAX_GUESTS: u8 = 8;

/// Guest selector bounds. Out-of-range input is pulled back into 1..=8
/// instead of being reported as an error.
pub fn clamp_guests(requested: i64) -> u8 {
    requested.clamp(MIN_GUESTS as i64, MAX_GUESTS as i64) as u8
}

/// Rejects strings that are empty once surrounding whitespace is removed.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("This field is required".into());
        return Err(err);
    }
    Ok(())
}

/// Indian postal PIN: exactly six ASCII digits.
pub fn validate_pin_code(value: &str) -> Result<(), ValidationError> {
    if value.len() == 6 && value.bytes().all(|b| b.is_ascii_digit()) {
        return Ok(());
    }
    let mut err = ValidationError::new("pin_code");
    err.message = Some("PIN code must be 6 digits".into());
    Err(err)
}
