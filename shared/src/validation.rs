//! Login form validation. Pure checks, messages shown inline next to the field.

/// A phone number is exactly 10 digits.
pub fn validate_phone(phone: &str) -> Result<(), &'static str> {
    if phone.is_empty() {
        return Err("Phone number can't be empty.");
    }
    if phone.len() != 10 || !phone.chars().all(|c| c.is_ascii_digit()) {
        return Err("Ooops! We need a valid phone number.");
    }
    Ok(())
}

/// A PIN is exactly 4 digits.
pub fn validate_pin(pin: &str) -> Result<(), &'static str> {
    if pin.is_empty() {
        return Err("PIN can't be empty.");
    }
    if pin.len() != 4 || !pin.chars().all(|c| c.is_ascii_digit()) {
        return Err("PIN must be 4 digits.");
    }
    Ok(())
}
